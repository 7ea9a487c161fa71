//! Rules module for the survive/birth family of Life-like automata
//!
//! This module contains the rule definition, its digit notation, rule presets
//! and the built-in seed patterns.

mod patterns;
mod presets;

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Set of neighbour counts, one bit per count.
///
/// A Moore neighbourhood has at most 8 live neighbours, but the notation allows
/// the digits 0-9, so counts up to 9 are representable (9 simply never matches).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NeighborCounts(u16);

impl NeighborCounts {
    pub const MAX: u8 = 9;

    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, count: u8) {
        if count <= Self::MAX {
            self.0 |= 1 << count;
        }
    }

    pub fn contains(&self, count: u8) -> bool {
        count <= Self::MAX && self.0 & (1 << count) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=Self::MAX).filter(move |&count| self.contains(count))
    }
}

impl FromIterator<u8> for NeighborCounts {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut counts = Self::empty();
        for count in iter {
            counts.insert(count);
        }
        counts
    }
}

impl fmt::Display for NeighborCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for count in self.iter() {
            write!(f, "{}", count)?;
        }
        Ok(())
    }
}

/// Life-like rule:
/// 1. A live cell stays alive if its live neighbour count is in `survivals`
/// 2. A dead cell becomes alive if its live neighbour count is in `births`
/// 3. Every other cell is dead in the next generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Neighbour counts at which a live cell survives
    pub survivals: NeighborCounts,
    /// Neighbour counts at which a dead cell is born
    pub births: NeighborCounts,
}

impl Default for Rule {
    fn default() -> Self {
        // Classic Conway's Game of Life rules
        Self::new([2, 3], [3])
    }
}

impl Rule {
    pub fn new(
        survivals: impl IntoIterator<Item = u8>,
        births: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            survivals: survivals.into_iter().collect(),
            births: births.into_iter().collect(),
        }
    }

    /// Reads `S/B` notation leniently: every digit before the first `/` is a
    /// survival count, every digit after it a birth count, anything else is
    /// skipped.
    pub fn from_notation(notation: &str) -> Self {
        let mut rule = Self { survivals: NeighborCounts::empty(), births: NeighborCounts::empty() };
        let mut slash_reached = false;
        for c in notation.chars() {
            if !slash_reached && c == '/' {
                slash_reached = true;
            } else if let Some(digit) = c.to_digit(10) {
                if slash_reached {
                    rule.births.insert(digit as u8);
                } else {
                    rule.survivals.insert(digit as u8);
                }
            }
        }
        rule
    }

    /// Whether a cell is alive in the next generation.
    pub fn next_state(&self, alive: bool, live_neighbors: u8) -> bool {
        if alive {
            self.survivals.contains(live_neighbors)
        } else {
            self.births.contains(live_neighbors)
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.survivals, self.births)
    }
}

impl FromStr for Rule {
    type Err = Error;

    /// Strict `S/B` notation, e.g. `23/3` or `/2`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let well_formed = s.matches('/').count() == 1
            && s.chars().all(|c| c == '/' || c.is_ascii_digit());
        if !well_formed {
            return Err(Error::InvalidRule(s.to_string()));
        }
        Ok(Self::from_notation(s))
    }
}

/// Predefined patterns for seeding the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// A small oscillator
    Blinker,
    /// A small oscillator
    Toad,
    /// A small stationary pattern
    Block,
    /// A diagonal spaceship
    Glider,
    /// A horizontal spaceship
    LightweightSpaceship,
    /// A pattern that grows indefinitely
    GosperGliderGun,
}
