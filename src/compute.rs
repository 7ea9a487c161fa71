use crate::grid::{Cell, Grid};
use crate::rules::Rule;
use std::collections::HashSet;

/// Offsets of the Moore neighbourhood, excluding the centre cell.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Neighbours of a cell. Offsets that leave the `i64` range are dropped, the
/// plane never wraps.
fn neighbors(x: i64, y: i64) -> impl Iterator<Item = Cell> {
    NEIGHBOR_OFFSETS
        .into_iter()
        .filter_map(move |(dx, dy)| Some((x.checked_add(dx)?, y.checked_add(dy)?)))
}

/// Given a grid position, count its live neighbours. The plane is unbounded, no wrapping.
pub fn count_neighbors(grid: &Grid, x: i64, y: i64) -> u8 {
    neighbors(x, y).filter(|&(nx, ny)| grid.is_alive(nx, ny)).count() as u8
}

/// Every cell that could be alive in the next generation: the live cells and
/// their neighbours. A dead cell with no live neighbour can never be born.
fn candidate_cells(grid: &Grid) -> HashSet<Cell> {
    let mut candidates = HashSet::with_capacity(grid.len() * 9);
    for (x, y) in grid.iter() {
        candidates.insert((x, y));
        candidates.extend(neighbors(x, y));
    }
    candidates
}

/// Apply the rule to a grid for one generation. The input grid is left untouched.
pub fn next_generation(grid: &Grid, rule: &Rule) -> Grid {
    candidate_cells(grid)
        .into_iter()
        .filter(|&(x, y)| rule.next_state(grid.is_alive(x, y), count_neighbors(grid, x, y)))
        .collect()
}
