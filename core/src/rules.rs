use serde::{Deserialize, Serialize};

use crate::*;

/// Predicate deciding which cells flash in a level. Every rule is a pure
/// function of the cell and the board side length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    EvenIndex,
    Diagonals,
    PrimeIndex,
    CenterCluster,
    ModularSum,
}

impl Rule {
    pub fn matches(self, cell: Cell, side: Coord) -> bool {
        use Rule::*;
        match self {
            EvenIndex => cell.index % 2 == 0,
            Diagonals => {
                let (row, col) = (u16::from(cell.row), u16::from(cell.col));
                row == col || row + col + 1 == u16::from(side)
            }
            PrimeIndex => is_prime(cell.index),
            CenterCluster => {
                let center = Cell::from_index(cell_count(side) / 2, side);
                cell.manhattan_distance(center) <= 1
            }
            ModularSum => (u16::from(cell.row) + u16::from(cell.col)) % 3 == 0,
        }
    }

    /// Indices of every cell in `grid` matching this rule.
    pub fn target_set(self, grid: &Grid) -> CellSet {
        grid.iter()
            .filter(|&cell| self.matches(cell, grid.side()))
            .map(|cell| cell.index)
            .collect()
    }
}

pub fn is_prime(n: CellIndex) -> bool {
    if n < 2 {
        return false;
    }
    let n = u32::from(n);
    let mut divisor = 2;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Level {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub rule: Rule,
}

impl Level {
    pub fn matches(&self, cell: Cell, side: Coord) -> bool {
        self.rule.matches(cell, side)
    }
}

pub const CANONICAL_LEVELS: [Level; 5] = [
    Level {
        id: 1,
        title: "Even Steps",
        description: "Every cell whose index is even.",
        rule: Rule::EvenIndex,
    },
    Level {
        id: 2,
        title: "Crossed Diagonals",
        description: "Cells on either diagonal of the board.",
        rule: Rule::Diagonals,
    },
    Level {
        id: 3,
        title: "Prime Positions",
        description: "Cells whose index is a prime number.",
        rule: Rule::PrimeIndex,
    },
    Level {
        id: 4,
        title: "Center Cross",
        description: "The center cell and its four direct neighbors.",
        rule: Rule::CenterCluster,
    },
    Level {
        id: 5,
        title: "Triple Sums",
        description: "Cells where row plus column is a multiple of three.",
        rule: Rule::ModularSum,
    },
];

/// Ordered, non-empty list of levels. Order defines progression.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RuleCatalog {
    levels: &'static [Level],
}

impl RuleCatalog {
    /// Returns `None` for an empty slice since a catalog always has an active level.
    pub const fn new(levels: &'static [Level]) -> Option<Self> {
        if levels.is_empty() {
            None
        } else {
            Some(Self { levels })
        }
    }

    pub const fn canonical() -> Self {
        Self {
            levels: &CANONICAL_LEVELS,
        }
    }

    pub const fn len(&self) -> usize {
        self.levels.len()
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn levels(&self) -> &'static [Level] {
        self.levels
    }

    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.levels.len() - 1)
    }

    /// Level at `index`, clamped to the last entry.
    pub fn level(&self, index: usize) -> &'static Level {
        let levels = self.levels;
        &levels[self.clamp_index(index)]
    }

    pub fn next_index(&self, index: usize) -> usize {
        self.clamp_index(index.saturating_add(1))
    }

    pub fn previous_index(&self, index: usize) -> usize {
        self.clamp_index(index.saturating_sub(1))
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::canonical()
    }
}
