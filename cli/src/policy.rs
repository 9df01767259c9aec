use clap::ValueEnum;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;
use tilemerge_core::{apply, Direction, Grid};

/// Move order used by the cycle policy and to break greedy ties.
const CYCLE_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Down,
    Direction::Right,
    Direction::Up,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Random valid moves
    #[default]
    Random,
    /// Cycle through actions: Left, Down, Right, Up
    Cycle,
    /// Valid move with the highest immediate score
    Greedy,
}

/// Picks moves for one simulated player.
pub struct Player {
    policy: Policy,
    rng: SmallRng,
    cycle: usize,
}

impl Player {
    /// Action selection draws from its own RNG so it never disturbs tile spawning.
    pub fn new(policy: Policy, seed: u64) -> Self {
        Self {
            policy,
            rng: SmallRng::seed_from_u64(seed),
            cycle: 0,
        }
    }

    /// Choose the next move, or `None` when no move changes the grid.
    pub fn choose(&mut self, grid: &Grid) -> Option<Direction> {
        match self.policy {
            Policy::Random => self.random(grid),
            Policy::Cycle => self.next_in_cycle(grid),
            Policy::Greedy => greedy(grid),
        }
    }

    fn random(&mut self, grid: &Grid) -> Option<Direction> {
        let legal = tilemerge_core::legal_moves(grid);
        let valid: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| legal[d.index()])
            .collect();
        valid.choose(&mut self.rng).copied()
    }

    fn next_in_cycle(&mut self, grid: &Grid) -> Option<Direction> {
        let legal = tilemerge_core::legal_moves(grid);
        // Try actions in cycle order, starting from current position
        for _ in 0..CYCLE_ORDER.len() {
            let action = CYCLE_ORDER[self.cycle % CYCLE_ORDER.len()];
            self.cycle += 1;
            if legal[action.index()] {
                return Some(action);
            }
        }
        None
    }
}

fn greedy(grid: &Grid) -> Option<Direction> {
    let mut best: Option<(Direction, u64)> = None;
    for dir in CYCLE_ORDER {
        let result = apply(grid, dir);
        if !result.moved {
            continue;
        }
        match best {
            Some((_, score)) if score >= result.score_delta => {}
            _ => best = Some((dir, result.score_delta)),
        }
    }
    best.map(|(dir, _)| dir)
}
