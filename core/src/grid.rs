use alloc::vec::Vec;
use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub index: CellIndex,
    pub row: Coord,
    pub col: Coord,
}

impl Cell {
    pub const fn from_index(index: CellIndex, side: Coord) -> Self {
        let side = side as CellIndex;
        Self {
            index,
            row: (index / side) as Coord,
            col: (index % side) as Coord,
        }
    }

    pub const fn manhattan_distance(self, other: Self) -> u16 {
        (self.row.abs_diff(other.row) as u16) + (self.col.abs_diff(other.col) as u16)
    }
}

/// Square board of cells in row-major order. Built once and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    side: Coord,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(side: Coord) -> Self {
        let cells = (0..cell_count(side))
            .map(|index| Cell::from_index(index, side))
            .collect();
        Self { side, cells }
    }

    pub fn side(&self) -> Coord {
        self.side
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, index: CellIndex) -> Option<Cell> {
        self.cells.get(usize::from(index)).copied()
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        usize::from(index) < self.cells.len()
    }

    /// Cell sitting at `floor(N² / 2)`, the middle of an odd-sided board.
    pub fn center(&self) -> Option<Cell> {
        self.get(cell_count(self.side) / 2)
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl Index<CellIndex> for Grid {
    type Output = Cell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.cells[usize::from(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_side_squared_cells_in_row_major_order() {
        for side in 1..=9 {
            let grid = Grid::new(side);
            assert_eq!(grid.len(), usize::from(side) * usize::from(side));

            for (position, cell) in grid.iter().enumerate() {
                assert_eq!(usize::from(cell.index), position);
                assert_eq!(cell.row, (position / usize::from(side)) as Coord);
                assert_eq!(cell.col, (position % usize::from(side)) as Coord);
            }
        }
    }

    #[test]
    fn grid_indexes_and_bounds() {
        let grid = Grid::new(5);

        assert_eq!(grid[7], Cell { index: 7, row: 1, col: 2 });
        assert!(grid.contains(24));
        assert!(!grid.contains(25));
        assert_eq!(grid.get(25), None);
        assert_eq!(grid.center(), Some(Cell { index: 12, row: 2, col: 2 }));
    }

    #[test]
    fn building_twice_yields_equal_grids() {
        assert_eq!(Grid::new(5), Grid::new(5));
        assert_ne!(Grid::new(5), Grid::new(4));
    }

    #[test]
    fn manhattan_distance_counts_orthogonal_steps() {
        let a = Cell::from_index(0, 5);
        let b = Cell::from_index(12, 5);
        assert_eq!(a.manhattan_distance(b), 4);
        assert_eq!(b.manhattan_distance(b), 0);
    }
}
