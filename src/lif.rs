//! Reader for the Life 1.05 text format.
//!
//! ```text
//! #Life 1.05
//! #R 23/3
//! #P -1 -1
//! .*.
//! ..*
//! ***
//! ```
//!
//! `#P x y` starts a cell block whose top-left corner is at `(x, y)`, `#R` sets
//! the rule, other `#` lines are descriptions and are ignored. Block rows use
//! `*` for live and `.` for dead cells.

use crate::error::{Error, Result};
use crate::grid::{Grid, COORDINATES};
use crate::rules::Rule;

pub const HEADER: &str = "#Life 1.05";

/// Seed shown at start-up: two small blocks that grow into a busy scene.
pub const DEFAULT_PATTERN: &str = "\
#Life 1.05
#P -13 -3
.*.*
*
.*..*
...***
#P 13 2
**
*";

/// A parsed pattern file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifPattern {
    pub rule: Rule,
    pub cells: Grid,
}

/// Parses a whole document. Nothing is returned unless every line is valid.
pub fn parse(content: &str) -> Result<LifPattern> {
    let mut lines = content.lines().map(str::trim).filter(|line| !line.is_empty());

    match lines.next() {
        None => return Err(Error::UnsupportedFormat("pattern content is empty".into())),
        Some(header) if header != HEADER => {
            return Err(Error::UnsupportedFormat(format!(
                "expected header {HEADER:?}, found {header:?}"
            )));
        }
        Some(_) => {}
    }

    let mut rule = Rule::default();
    let mut cells = Grid::new();
    let (mut origin_x, mut origin_y) = (0i64, 0i64);
    let mut blocks = 0usize;
    let mut block_header = "#P 0 0";

    for line in lines {
        if let Some(directive) = line.strip_prefix('#') {
            if let Some(coordinates) = directive.strip_prefix('P') {
                (origin_x, origin_y) = parse_block_origin(line, coordinates)?;
                block_header = line;
                blocks += 1;
            } else if let Some(notation) = directive.strip_prefix('R') {
                rule = Rule::from_notation(notation);
            }
        } else {
            let out_of_range = || {
                Error::InvalidCellBlock(format!("{block_header} places cells outside the supported plane"))
            };
            for column in parse_block_row(line)? {
                let x = origin_x
                    .checked_add(column)
                    .filter(|x| COORDINATES.contains(x))
                    .ok_or_else(out_of_range)?;
                if !COORDINATES.contains(&origin_y) {
                    return Err(out_of_range());
                }
                cells.set(x, origin_y, true);
            }
            // A row past the end of the range can only hold dead cells.
            origin_y = origin_y.saturating_add(1);
        }
    }

    log::debug!("Parsed {} cell block(s), {} live cells, rule {}", blocks, cells.len(), rule);
    Ok(LifPattern { rule, cells })
}

fn parse_block_origin(line: &str, coordinates: &str) -> Result<(i64, i64)> {
    let invalid = || Error::InvalidCellBlock(line.to_string());
    let mut parts = coordinates.split_whitespace();
    let x = parts.next().and_then(|s| s.parse().ok()).ok_or_else(invalid)?;
    let y = parts.next().and_then(|s| s.parse().ok()).ok_or_else(invalid)?;
    Ok((x, y))
}

/// Columns of the live cells in one block row.
fn parse_block_row(line: &str) -> Result<Vec<i64>> {
    let mut columns = Vec::new();
    for (column, character) in line.chars().enumerate() {
        match character {
            '*' => columns.push(column as i64),
            '.' => {}
            _ => {
                return Err(Error::IllegalCharacter { line: line.to_string(), character });
            }
        }
    }
    Ok(columns)
}
