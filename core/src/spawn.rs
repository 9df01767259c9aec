use log::trace;
use rand::Rng;

use crate::grid::{Grid, Position};

/// Probability that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f32 = 0.9;

/// Where a tile was spawned and what it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub position: Position,
    pub value: u32,
}

/// Place one tile into a uniformly chosen empty cell.
/// 90% chance of 2, 10% chance of 4. A full grid is returned unchanged.
pub fn spawn<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Grid {
    spawn_tile(grid, rng).0
}

/// Like [`spawn`], also reporting the new tile, or `None` when the grid was full.
///
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use tilemerge_core::{spawn_tile, Grid};
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let (grid, spawned) = spawn_tile(&Grid::default(), &mut rng);
/// let spawned = spawned.unwrap();
/// assert_eq!(grid.get(spawned.position), spawned.value);
/// assert_eq!(grid.tile_count(), 1);
/// ```
pub fn spawn_tile<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> (Grid, Option<Spawned>) {
    let empty_cells = grid.empty_cells();
    if empty_cells.is_empty() {
        return (grid.clone(), None);
    }

    let position = empty_cells[rng.gen_range(0..empty_cells.len())];
    let value = if rng.gen::<f32>() < TWO_PROBABILITY {
        2
    } else {
        4
    };
    trace!("spawn {value} at {position}");

    (grid.with_tile(position, value), Some(Spawned { position, value }))
}
