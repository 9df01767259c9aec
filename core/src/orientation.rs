//! Maps each move direction onto "compact toward index 0 of every row".
//!
//! | direction | normalize                | denormalize              |
//! |-----------|--------------------------|--------------------------|
//! | left      | identity                 | identity                 |
//! | right     | reverse rows             | reverse rows             |
//! | up        | transpose                | transpose                |
//! | down      | transpose, reverse rows  | reverse rows, transpose  |
//!
//! After transposing, row `i` of the normalized grid is column `i` of the
//! original read top to bottom, so index 0 is the top edge (up). Reversing it
//! puts the bottom edge at index 0 (down).

use crate::direction::Direction;
use crate::grid::{Grid, Position};

/// The coordinate transform for one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Identity,
    Reversed,
    Transposed,
    TransposedReversed,
}

impl Orientation {
    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Left => Orientation::Identity,
            Direction::Right => Orientation::Reversed,
            Direction::Up => Orientation::Transposed,
            Direction::Down => Orientation::TransposedReversed,
        }
    }

    /// Rotate `grid` so that moving in this orientation's direction means
    /// collapsing every row toward index 0.
    pub fn normalize(self, grid: &Grid) -> Grid {
        match self {
            Orientation::Identity => grid.clone(),
            Orientation::Reversed => reverse_rows(grid),
            Orientation::Transposed => transpose(grid),
            Orientation::TransposedReversed => reverse_rows(&transpose(grid)),
        }
    }

    /// Inverse of [`Orientation::normalize`].
    pub fn denormalize(self, grid: &Grid) -> Grid {
        match self {
            Orientation::Identity => grid.clone(),
            Orientation::Reversed => reverse_rows(grid),
            Orientation::Transposed => transpose(grid),
            Orientation::TransposedReversed => transpose(&reverse_rows(grid)),
        }
    }

    /// Map a position in the normalized grid back to the original orientation.
    pub fn to_original(self, pos: Position, size: usize) -> Position {
        let last = size - 1;
        match self {
            Orientation::Identity => pos,
            Orientation::Reversed => Position::new(pos.row, last - pos.col),
            Orientation::Transposed => Position::new(pos.col, pos.row),
            Orientation::TransposedReversed => Position::new(last - pos.col, pos.row),
        }
    }
}

/// Normalize `grid` for `direction`.
pub fn normalize(grid: &Grid, direction: Direction) -> Grid {
    Orientation::for_direction(direction).normalize(grid)
}

/// Undo [`normalize`] for the same `direction`.
pub fn denormalize(grid: &Grid, direction: Direction) -> Grid {
    Orientation::for_direction(direction).denormalize(grid)
}

fn reverse_rows(grid: &Grid) -> Grid {
    let cells = grid
        .rows()
        .flat_map(|row| row.iter().rev().copied())
        .collect();
    Grid::from_cells(grid.size(), cells)
}

fn transpose(grid: &Grid) -> Grid {
    let n = grid.size();
    let src = grid.cells();
    let cells = (0..n * n).map(|i| src[(i % n) * n + i / n]).collect();
    Grid::from_cells(n, cells)
}
