use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Marker stored in a cell with no tile.
pub const EMPTY: u32 = 0;

/// Largest tile a grid may hold. Two tiles of this value do not merge, so a move
/// can never produce anything larger.
pub const MAX_TILE: u32 = 1 << 30;

/// Canonical board side length.
pub const DEFAULT_SIZE: usize = 4;

/// A cell coordinate, `row` counted from the top and `col` from the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An immutable N×N board of tile values.
///
/// Cells are stored in row-major order (indices `0..size` are row 0, and so
/// on). Empty cells are [`EMPTY`]; every other cell holds a power of two.
/// Engine operations never modify a grid in place: each one returns a new
/// value, so callers can keep old snapshots around for undo.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
}

impl Grid {
    /// Create an empty `size`×`size` grid.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(EngineError::EmptyGrid);
        }
        let len = size.checked_mul(size).ok_or(EngineError::TooLarge(size))?;
        Ok(Grid {
            size,
            cells: vec![EMPTY; len],
        })
    }

    /// Build a grid from rows, refusing ragged input and invalid tiles.
    ///
    /// ```
    /// use tilemerge_core::Grid;
    ///
    /// let grid = Grid::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
    /// assert_eq!(grid.size(), 2);
    /// assert!(Grid::from_rows(vec![vec![3, 0], vec![0, 0]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(EngineError::EmptyGrid);
        }

        let len = size.checked_mul(size).ok_or(EngineError::TooLarge(size))?;
        let mut cells = Vec::with_capacity(len);
        for (row, line) in rows.into_iter().enumerate() {
            if line.len() != size {
                return Err(EngineError::NotSquare {
                    row,
                    len: line.len(),
                    expected: size,
                });
            }
            cells.extend(line);
        }

        let grid = Grid { size, cells };
        grid.validate()?;
        Ok(grid)
    }

    /// Construct without validation. Only the engine calls this, with cells it derived
    /// from an already valid grid.
    pub(crate) fn from_cells(size: usize, cells: Vec<u32>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Grid { size, cells }
    }

    /// Check that every non-empty cell is a power of two in `2..=MAX_TILE`.
    pub fn validate(&self) -> Result<()> {
        for (idx, &value) in self.cells.iter().enumerate() {
            if value != EMPTY && !is_valid_tile(value) {
                return Err(EngineError::InvalidTile {
                    row: idx / self.size,
                    col: idx % self.size,
                    value,
                    max: MAX_TILE,
                });
            }
        }
        Ok(())
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at `pos`, [`EMPTY`] for no tile.
    ///
    /// Panics if `pos` lies outside the grid.
    #[inline]
    pub fn get(&self, pos: Position) -> u32 {
        assert!(
            pos.row < self.size && pos.col < self.size,
            "position {} outside {}x{} grid",
            pos,
            self.size,
            self.size
        );
        self.cells[pos.row * self.size + pos.col]
    }

    /// Row-major view of every cell.
    #[inline]
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// One row, left to right.
    pub fn row(&self, row: usize) -> &[u32] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Iterate over rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.cells.chunks(self.size)
    }

    /// Copy the grid out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<u32>> {
        self.rows().map(<[u32]>::to_vec).collect()
    }

    /// Positions of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == EMPTY)
            .map(|(i, _)| Position::new(i / self.size, i % self.size))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == EMPTY).count()
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&EMPTY)
    }

    /// Number of tiles on the board.
    pub fn tile_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    /// Largest tile value, 0 on an empty grid.
    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// Sum of all tile values. Moves never change it; spawns add to it.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Copy of this grid with `pos` set to `value`.
    pub(crate) fn with_tile(&self, pos: Position, value: u32) -> Grid {
        let mut cells = self.cells.clone();
        cells[pos.row * self.size + pos.col] = value;
        Grid::from_cells(self.size, cells)
    }
}

impl Default for Grid {
    /// An empty 4×4 grid.
    fn default() -> Self {
        Grid {
            size: DEFAULT_SIZE,
            cells: vec![EMPTY; DEFAULT_SIZE * DEFAULT_SIZE],
        }
    }
}

impl TryFrom<Vec<Vec<u32>>> for Grid {
    type Error = EngineError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<u32>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

#[inline]
pub(crate) fn is_valid_tile(value: u32) -> bool {
    value >= 2 && value <= MAX_TILE && value.is_power_of_two()
}

/// Whether two adjacent cells combine: equal tiles below [`MAX_TILE`].
#[inline]
pub(crate) fn merges_with(a: u32, b: u32) -> bool {
    a != EMPTY && a == b && a < MAX_TILE
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {{ size: {} }}", self.size)?;
        for row in self.rows() {
            for &val in row {
                if val == EMPTY {
                    write!(f, "    .")?;
                } else {
                    write!(f, "{:5}", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = format!("+{}", "------+".repeat(self.size));
        writeln!(f, "{border}")?;
        for row in self.rows() {
            write!(f, "|")?;
            for &val in row {
                if val == EMPTY {
                    write!(f, "      |")?;
                } else {
                    write!(f, "{:^6}|", val)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "{border}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(5).unwrap();
        assert_eq!(grid.size(), 5);
        assert_eq!(grid.empty_count(), 25);
        assert_eq!(grid.max_tile(), 0);
        assert!(!grid.is_full());
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(Grid::new(0), Err(EngineError::EmptyGrid));
        assert_eq!(Grid::from_rows(vec![]), Err(EngineError::EmptyGrid));
    }

    #[test]
    fn test_overflowing_size_rejected() {
        assert_eq!(Grid::new(usize::MAX), Err(EngineError::TooLarge(usize::MAX)));
        let side = 1usize << (usize::BITS / 2);
        assert_eq!(Grid::new(side), Err(EngineError::TooLarge(side)));
    }

    #[test]
    fn test_merges_with() {
        assert!(merges_with(2, 2));
        assert!(merges_with(MAX_TILE / 2, MAX_TILE / 2));
        assert!(!merges_with(MAX_TILE, MAX_TILE));
        assert!(!merges_with(EMPTY, EMPTY));
        assert!(!merges_with(2, 4));
    }

    #[test]
    fn test_default_is_four_by_four() {
        let grid = Grid::default();
        assert_eq!(grid, Grid::new(4).unwrap());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Grid::from_rows(vec![vec![0, 0], vec![0]]).unwrap_err();
        assert_eq!(
            err,
            EngineError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_bad_tiles() {
        for bad in [1, 3, 6, 100, 1 << 31] {
            let err = Grid::from_rows(vec![vec![0, bad], vec![0, 0]]).unwrap_err();
            assert_eq!(
                err,
                EngineError::InvalidTile {
                    row: 0,
                    col: 1,
                    value: bad,
                    max: MAX_TILE
                }
            );
        }
        assert!(Grid::from_rows(vec![vec![MAX_TILE, 2], vec![4, 0]]).is_ok());
    }

    #[test]
    fn test_accessors() {
        let grid = Grid::from_rows(vec![
            vec![2, 0, 0, 4],
            vec![0, 8, 0, 0],
            vec![0, 0, 0, 0],
            vec![16, 0, 0, 2],
        ])
        .unwrap();
        assert_eq!(grid.get(Position::new(0, 3)), 4);
        assert_eq!(grid.get(Position::new(3, 0)), 16);
        assert_eq!(grid.row(1), &[0, 8, 0, 0]);
        assert_eq!(grid.tile_count(), 5);
        assert_eq!(grid.empty_count(), 11);
        assert_eq!(grid.max_tile(), 16);
        assert_eq!(grid.tile_sum(), 32);
        assert_eq!(grid.empty_cells()[0], Position::new(0, 1));
        assert_eq!(grid.empty_cells().len(), 11);
    }

    #[test]
    fn test_with_tile_leaves_original_untouched() {
        let grid = Grid::default();
        let next = grid.with_tile(Position::new(2, 1), 2);
        assert_eq!(grid.get(Position::new(2, 1)), EMPTY);
        assert_eq!(next.get(Position::new(2, 1)), 2);
        assert_eq!(next.tile_count(), 1);
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_bounds_panics() {
        Grid::default().get(Position::new(4, 0));
    }

    #[test]
    fn test_rows_round_trip() {
        let rows = vec![vec![2, 4, 8], vec![0, 0, 0], vec![16, 0, 2]];
        let grid = Grid::from_rows(rows.clone()).unwrap();
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn test_display_format() {
        let grid = Grid::from_rows(vec![vec![2, 0], vec![0, 2048]]).unwrap();
        let display = format!("{}", grid);
        assert!(display.starts_with("+------+------+"));
        assert!(display.contains("2048"));
    }

    #[test]
    fn test_debug_format() {
        let grid = Grid::default();
        let debug = format!("{:?}", grid);
        assert!(debug.contains("Grid"));
        assert!(debug.contains("size: 4"));
    }
}
