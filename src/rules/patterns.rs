use super::Pattern;
use crate::grid::{Cell, Grid};

const BLINKER: &[&str] = &["***"];

const TOAD: &[&str] = &[
    ".***",
    "***",
];

const BLOCK: &[&str] = &[
    "**",
    "**",
];

const GLIDER: &[&str] = &[
    ".*",
    "..*",
    "***",
];

const LIGHTWEIGHT_SPACESHIP: &[&str] = &[
    ".****",
    "*...*",
    "....*",
    "*..*",
];

const GOSPER_GLIDER_GUN: &[&str] = &[
    "........................*",
    "......................*.*",
    "............**......**............**",
    "...........*...*....**............**",
    "**........*.....*...**",
    "**........*...*.**....*.*",
    "..........*.....*.......*",
    "...........*...*",
    "............**",
];

impl Pattern {
    pub const ALL: [Pattern; 6] = [
        Pattern::Blinker,
        Pattern::Toad,
        Pattern::Block,
        Pattern::Glider,
        Pattern::LightweightSpaceship,
        Pattern::GosperGliderGun,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Blinker => "Blinker",
            Pattern::Toad => "Toad",
            Pattern::Block => "Block",
            Pattern::Glider => "Glider",
            Pattern::LightweightSpaceship => "Lightweight Spaceship",
            Pattern::GosperGliderGun => "Gosper Glider Gun",
        }
    }

    /// Rows of the pattern, `*` live and `.` dead.
    fn rows(&self) -> &'static [&'static str] {
        match self {
            Pattern::Blinker => BLINKER,
            Pattern::Toad => TOAD,
            Pattern::Block => BLOCK,
            Pattern::Glider => GLIDER,
            Pattern::LightweightSpaceship => LIGHTWEIGHT_SPACESHIP,
            Pattern::GosperGliderGun => GOSPER_GLIDER_GUN,
        }
    }

    /// Live cells with the pattern's top-left corner at (x, y).
    pub fn cells(&self, x: i64, y: i64) -> Vec<Cell> {
        self.rows()
            .iter()
            .zip(y..)
            .flat_map(|(row, cy)| {
                row.bytes()
                    .zip(x..)
                    .filter(|(b, _)| *b == b'*')
                    .map(move |(_, cx)| (cx, cy))
            })
            .collect()
    }

    /// A seed grid holding only this pattern.
    pub fn to_grid(&self, x: i64, y: i64) -> Grid {
        self.cells(x, y).into_iter().collect()
    }
}
