use alloc::collections::BTreeSet;

/// Single coordinate axis used for the grid side length, rows and columns.
pub type Coord = u8;

/// Linear row-major position of a cell, also used for cell counts.
pub type CellIndex = u16;

/// Milliseconds on the session's virtual clock.
pub type Millis = u64;

/// Ordered set of cell indices.
pub type CellSet = BTreeSet<CellIndex>;

pub const fn cell_count(side: Coord) -> CellIndex {
    let side = side as CellIndex;
    side.saturating_mul(side)
}
