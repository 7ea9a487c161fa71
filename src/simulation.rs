//! Generation history and the controller that moves through it.
//!
//! `history[g]` is the grid of generation `g`. Generation 0 is the seed and
//! every later entry is the rule applied to its predecessor. The history is a
//! cache: rewinding is a lookup and moving past the frontier only computes the
//! generations that were never computed before.

use crate::compute::next_generation;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::rules::Rule;

pub type Generation = u64;

/// Called with `(current_generation, processed_generations, grid)` after
/// every state change.
pub type Observer = Box<dyn FnMut(Generation, Generation, &Grid)>;

/// A cached generation and the rule that produced it from its predecessor.
struct Snapshot {
    grid: Grid,
    rule: Rule,
}

pub struct Simulation {
    history: Vec<Snapshot>,
    current: usize,
    rule: Rule,
    observer: Option<Observer>,
}

impl Simulation {
    pub fn new(seed: Grid, rule: Rule) -> Self {
        Self {
            history: vec![Snapshot { grid: seed, rule }],
            current: 0,
            rule,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: impl FnMut(Generation, Generation, &Grid) + 'static) {
        self.observer = Some(Box::new(observer));
        self.notify();
    }

    /// Discards the whole history and starts over from `seed`.
    pub fn initialize(&mut self, seed: Grid) {
        log::info!("Loading seed with {} live cells, rule {}", seed.len(), self.rule);
        self.history.clear();
        self.history.push(Snapshot { grid: seed, rule: self.rule });
        self.current = 0;
        self.notify();
    }

    /// Moves one generation forward from the displayed one.
    ///
    /// At the frontier this extends the history. Behind the frontier the
    /// cached successor is reused only if it was computed with the current
    /// rule; otherwise the cached future is dropped and a new branch is
    /// computed from the displayed generation.
    pub fn step(&mut self) {
        if self.current < self.processed_index() && self.history[self.current + 1].rule != self.rule {
            log::debug!(
                "Rule changed since generation {} was cached, dropping {} cached generation(s)",
                self.current + 1,
                self.processed_index() - self.current,
            );
            self.history.truncate(self.current + 1);
        }
        if self.current == self.processed_index() {
            self.advance();
        }
        self.current += 1;
        self.notify();
    }

    /// Jumps to `target`, computing any generations past the frontier.
    pub fn set_generation(&mut self, target: i64) -> Result<()> {
        let target = usize::try_from(target).map_err(|_| Error::InvalidGeneration(target))?;

        if target > self.processed_index() {
            log::debug!("Extending history from {} to {}", self.processed_index(), target);
            while self.processed_index() < target {
                self.advance();
            }
        }
        self.current = target;
        self.notify();
        Ok(())
    }

    /// Changes the rule for generations computed from now on. Cached
    /// generations keep the rule they were computed with.
    pub fn set_rule(&mut self, rule: Rule) {
        log::info!("Rule changed from {} to {}", self.rule, rule);
        self.rule = rule;
        self.notify();
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn current_generation(&self) -> Generation {
        self.current as Generation
    }

    pub fn processed_generations(&self) -> Generation {
        self.processed_index() as Generation
    }

    /// Grid of the displayed generation.
    pub fn grid(&self) -> &Grid {
        &self.history[self.current].grid
    }

    /// Cached grid of any processed generation.
    #[cfg(test)]
    pub fn grid_at(&self, generation: Generation) -> Option<&Grid> {
        usize::try_from(generation).ok().and_then(|g| self.history.get(g)).map(|snapshot| &snapshot.grid)
    }

    fn processed_index(&self) -> usize {
        self.history.len() - 1
    }

    /// Computes the generation after the frontier and appends it.
    fn advance(&mut self) {
        let frontier = &self.history[self.processed_index()].grid;
        let grid = next_generation(frontier, &self.rule);
        self.history.push(Snapshot { grid, rule: self.rule });
    }

    fn notify(&mut self) {
        let (current, processed) = (self.current_generation(), self.processed_generations());
        if let Some(observer) = self.observer.as_mut() {
            observer(current, processed, &self.history[self.current].grid);
        }
    }
}
