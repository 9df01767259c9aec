use crate::grid::{merges_with, Grid};

/// True when no move in any direction can change `grid`: there is no empty
/// cell and no two horizontally or vertically adjacent tiles can merge.
///
/// Each cell is compared against its right and lower neighbour only, so every
/// adjacent pair is checked once.
pub fn is_terminal(grid: &Grid) -> bool {
    if !grid.is_full() {
        return false;
    }

    let n = grid.size();
    let cells = grid.cells();
    for row in 0..n {
        for col in 0..n {
            let value = cells[row * n + col];
            if col + 1 < n && merges_with(value, cells[row * n + col + 1]) {
                return false;
            }
            if row + 1 < n && merges_with(value, cells[(row + 1) * n + col]) {
                return false;
            }
        }
    }
    true
}
