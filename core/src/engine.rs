use log::trace;
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::grid::{Grid, Position};
use crate::line::compact_line;
use crate::orientation::Orientation;

/// A tile created by a merge, reported in the caller's orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeEvent {
    pub position: Position,
    /// Value of the new tile.
    pub value: u32,
}

/// Outcome of sliding a grid in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    /// The grid after sliding and merging. Identical to the input when `moved` is false.
    pub grid: Grid,
    /// Whether any cell changed.
    pub moved: bool,
    /// Points earned: the sum of every merged tile's value.
    pub score_delta: u64,
    /// One event per merge, ordered by normalized row then by position along the move.
    pub merges: Vec<MergeEvent>,
}

/// Slide and merge every tile of `grid` toward `direction`. No tile is spawned.
///
/// ```
/// use tilemerge_core::{apply, Direction, Grid};
///
/// let grid = Grid::from_rows(vec![
///     vec![2, 2, 0, 0],
///     vec![0, 0, 0, 0],
///     vec![0, 0, 0, 0],
///     vec![0, 0, 0, 0],
/// ])
/// .unwrap();
/// let result = apply(&grid, Direction::Left);
/// assert!(result.moved);
/// assert_eq!(result.score_delta, 4);
/// assert_eq!(result.grid.row(0), &[4, 0, 0, 0]);
/// ```
pub fn apply(grid: &Grid, direction: Direction) -> MoveResult {
    let size = grid.size();
    let orientation = Orientation::for_direction(direction);
    let normalized = orientation.normalize(grid);

    let mut cells = Vec::with_capacity(size * size);
    let mut moved = false;
    let mut score_delta = 0u64;
    let mut merges = Vec::new();

    for (row, line) in normalized.rows().enumerate() {
        let outcome = compact_line(line);
        moved |= outcome.changed;
        score_delta += outcome.gain;
        merges.extend(outcome.merged.iter().map(|&col| MergeEvent {
            position: orientation.to_original(Position::new(row, col), size),
            value: outcome.cells[col],
        }));
        cells.extend(outcome.cells);
    }

    let grid = if moved {
        orientation.denormalize(&Grid::from_cells(size, cells))
    } else {
        grid.clone()
    };

    trace!(
        "apply {direction}: moved={moved} score_delta={score_delta} merges={}",
        merges.len()
    );

    MoveResult {
        grid,
        moved,
        score_delta,
        merges,
    }
}

/// Whether sliding toward `direction` would change the grid.
pub fn can_move(grid: &Grid, direction: Direction) -> bool {
    let orientation = Orientation::for_direction(direction);
    orientation
        .normalize(grid)
        .rows()
        .any(|line| compact_line(line).changed)
}

/// Legal moves as a boolean array indexed like [`Direction::ALL`]: `[Up, Down, Left, Right]`.
pub fn legal_moves(grid: &Grid) -> [bool; 4] {
    Direction::ALL.map(|dir| can_move(grid, dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<u32>>) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    fn board_a() -> Grid {
        grid(vec![
            vec![2, 2, 0, 0],
            vec![0, 4, 4, 0],
            vec![2, 0, 2, 0],
            vec![8, 8, 8, 8],
        ])
    }

    fn board_b() -> Grid {
        grid(vec![
            vec![2, 0, 2, 8],
            vec![2, 4, 0, 8],
            vec![0, 4, 2, 8],
            vec![0, 0, 0, 8],
        ])
    }

    #[test]
    fn test_move_left() {
        let result = apply(&board_a(), Direction::Left);
        assert_eq!(
            result.grid,
            grid(vec![
                vec![4, 0, 0, 0],
                vec![8, 0, 0, 0],
                vec![4, 0, 0, 0],
                vec![16, 16, 0, 0],
            ])
        );
        assert_eq!(result.score_delta, 4 + 8 + 4 + 32);
        assert!(result.moved);
    }

    #[test]
    fn test_move_right() {
        let result = apply(&board_a(), Direction::Right);
        assert_eq!(
            result.grid,
            grid(vec![
                vec![0, 0, 0, 4],
                vec![0, 0, 0, 8],
                vec![0, 0, 0, 4],
                vec![0, 0, 16, 16],
            ])
        );
        assert_eq!(result.score_delta, 4 + 8 + 4 + 32);
    }

    #[test]
    fn test_move_up() {
        let result = apply(&board_b(), Direction::Up);
        assert_eq!(
            result.grid,
            grid(vec![
                vec![4, 8, 4, 16],
                vec![0, 0, 0, 16],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ])
        );
        assert_eq!(result.score_delta, 4 + 8 + 4 + 32);
    }

    #[test]
    fn test_move_down() {
        let result = apply(&board_b(), Direction::Down);
        assert_eq!(
            result.grid,
            grid(vec![
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 16],
                vec![4, 8, 4, 16],
            ])
        );
        assert_eq!(result.score_delta, 4 + 8 + 4 + 32);
    }

    #[test]
    fn test_merge_events_use_caller_coordinates() {
        let result = apply(&board_b(), Direction::Down);
        let mut merges = result.merges.clone();
        merges.sort_by_key(|m| m.position);
        assert_eq!(
            merges,
            vec![
                MergeEvent {
                    position: Position::new(2, 3),
                    value: 16
                },
                MergeEvent {
                    position: Position::new(3, 0),
                    value: 4
                },
                MergeEvent {
                    position: Position::new(3, 1),
                    value: 8
                },
                MergeEvent {
                    position: Position::new(3, 2),
                    value: 4
                },
                MergeEvent {
                    position: Position::new(3, 3),
                    value: 16
                },
            ]
        );
        for m in &result.merges {
            assert_eq!(result.grid.get(m.position), m.value);
        }
    }

    #[test]
    fn test_merge_events_right() {
        let result = apply(&board_a(), Direction::Right);
        let positions: Vec<Position> = result.merges.iter().map(|m| m.position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(0, 3),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ]
        );
    }

    #[test]
    fn test_no_move_returns_identical_grid() {
        let g = grid(vec![
            vec![2, 0, 0, 0],
            vec![4, 0, 0, 0],
            vec![8, 0, 0, 0],
            vec![16, 0, 0, 0],
        ]);
        let result = apply(&g, Direction::Left);
        assert!(!result.moved);
        assert_eq!(result.score_delta, 0);
        assert!(result.merges.is_empty());
        assert_eq!(result.grid, g);
    }

    #[test]
    fn test_apply_is_deterministic() {
        for dir in Direction::ALL {
            assert_eq!(apply(&board_a(), dir), apply(&board_a(), dir));
        }
    }

    #[test]
    fn test_input_grid_is_not_mutated() {
        let g = board_a();
        let before = g.clone();
        let _ = apply(&g, Direction::Up);
        assert_eq!(g, before);
    }

    #[test]
    fn test_legal_moves() {
        let g = grid(vec![
            vec![2, 0, 0, 0],
            vec![4, 0, 0, 0],
            vec![8, 0, 0, 0],
            vec![16, 0, 0, 0],
        ]);
        // [Up, Down, Left, Right]
        assert_eq!(legal_moves(&g), [false, false, false, true]);
    }

    #[test]
    fn test_can_move_agrees_with_apply() {
        for g in [board_a(), board_b()] {
            for dir in Direction::ALL {
                assert_eq!(can_move(&g, dir), apply(&g, dir).moved);
            }
        }
    }

    #[test]
    fn test_non_default_size() {
        let g = grid(vec![vec![2, 2, 4], vec![0, 0, 0], vec![4, 0, 4]]);
        let result = apply(&g, Direction::Right);
        assert_eq!(
            result.grid,
            grid(vec![vec![0, 4, 4], vec![0, 0, 0], vec![0, 0, 8]])
        );
        assert_eq!(result.score_delta, 12);
    }
}
