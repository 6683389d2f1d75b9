/// Side length of the bingo grid
pub const GRID_SIZE: usize = 5;

/// Total number of cells on a board
pub const TOTAL_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Row-major index into the 5x5 grid
pub type CellIndex = usize;
