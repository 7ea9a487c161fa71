//! Observable application state shared by the simulation, the timer and the
//! control panel.
//!
//! Each value publishes a [`Change`] to its subscribers when set. Subscribers
//! are channel receivers: dropping the receiver is the unsubscribe. Every
//! change carries the [`Origin`] of the write so a component can ignore the
//! echo of its own updates.

use std::sync::mpsc::{self, Receiver, Sender};

/// Who wrote a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Simulation,
    Ui,
    Host,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Change<T> {
    pub old: T,
    pub new: T,
    pub origin: Origin,
}

pub struct Observable<T> {
    value: T,
    subscribers: Vec<Sender<Change<T>>>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self { value, subscribers: Vec::new() }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn subscribe(&mut self) -> Receiver<Change<T>> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    /// Stores the value and publishes the change, even when the value is
    /// unchanged.
    pub fn set(&mut self, value: T, origin: Origin) {
        let old = std::mem::replace(&mut self.value, value);
        let change = Change { old, new: self.value.clone(), origin };
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// The values the control panel displays and edits.
pub struct Model {
    pub generation: Observable<u64>,
    pub processed_generations: Observable<u64>,
    pub running: Observable<bool>,
    pub interval_ms: Observable<u64>,
}

impl Model {
    pub fn new(interval_ms: u64, running: bool) -> Self {
        Self {
            generation: Observable::new(0),
            processed_generations: Observable::new(0),
            running: Observable::new(running),
            interval_ms: Observable::new(interval_ms),
        }
    }
}
