//! Sparse, unbounded grid of live cells.
//!
//! Only live cells are stored. A coordinate that is absent is dead, so
//! iteration cost follows the population and not the extent of the pattern.

use std::collections::HashSet;
use std::ops::RangeInclusive;

/// A cell coordinate on the infinite plane.
pub type Cell = (i64, i64);

/// Coordinates a loaded seed may use. One cell of margin on each side keeps
/// every seeded cell's Moore neighbourhood representable.
pub const COORDINATES: RangeInclusive<i64> = (i64::MIN + 1)..=(i64::MAX - 1);

/// Inclusive bounding box over live cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl Bounds {
    pub fn width(&self) -> i64 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> i64 {
        self.max_y - self.min_y + 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: HashSet<Cell>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_alive(&self, x: i64, y: i64) -> bool {
        self.cells.contains(&(x, y))
    }

    /// Marks a cell live or dead. Dead cells are removed, never stored.
    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        if alive {
            self.cells.insert((x, y));
        } else {
            self.cells.remove(&(x, y));
        }
    }

    /// Visits every live cell exactly once, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box of all live cells, `None` for an empty grid.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut cells = self.iter();
        let (x, y) = cells.next()?;
        let start = Bounds { min_x: x, max_x: x, min_y: y, max_y: y };
        Some(cells.fold(start, |b, (x, y)| Bounds {
            min_x: b.min_x.min(x),
            max_x: b.max_x.max(x),
            min_y: b.min_y.min(y),
            max_y: b.max_y.max(y),
        }))
    }
}

impl FromIterator<Cell> for Grid {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl Extend<Cell> for Grid {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear_cells() {
        let mut grid = Grid::new();
        grid.set(3, -4, true);
        assert!(grid.is_alive(3, -4));
        assert!(!grid.is_alive(-4, 3));

        grid.set(3, -4, false);
        assert!(!grid.is_alive(3, -4));
        assert!(grid.is_empty());
    }

    #[test]
    fn clearing_a_dead_cell_stores_nothing() {
        let mut grid = Grid::new();
        grid.set(1_000_000, -1_000_000, false);
        assert_eq!(grid.len(), 0);
    }

    #[test]
    fn iter_visits_each_live_cell_once() {
        let mut grid = Grid::new();
        grid.set(0, 0, true);
        grid.set(0, 0, true);
        grid.set(-7, 12, true);

        let mut cells: Vec<Cell> = grid.iter().collect();
        cells.sort();
        assert_eq!(cells, vec![(-7, 12), (0, 0)]);
    }

    #[test]
    fn bounds_span_negative_and_positive_coordinates() {
        let grid: Grid = [(-5, 2), (3, -8), (0, 0)].into_iter().collect();
        let bounds = grid.bounds().unwrap();
        assert_eq!(bounds, Bounds { min_x: -5, max_x: 3, min_y: -8, max_y: 2 });
        assert_eq!(bounds.width(), 9);
        assert_eq!(bounds.height(), 11);
    }

    #[test]
    fn empty_grid_has_no_bounds() {
        assert_eq!(Grid::new().bounds(), None);
    }
}
