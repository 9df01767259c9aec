use std::collections::BTreeMap;
use std::fmt;

/// Final state of one simulated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Episode {
    pub score: u64,
    pub max_tile: u32,
    pub steps: u32,
}

/// Aggregate statistics over a batch of episodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub episodes: usize,
    pub avg_score: f64,
    pub median_score: f64,
    pub min_score: u64,
    pub max_score: u64,
    pub avg_steps: f64,
    pub max_tile_overall: u32,
    /// Max tile reached -> number of episodes that ended with it.
    pub tile_distribution: BTreeMap<u32, u32>,
}

impl Summary {
    /// Summarize `episodes`. Returns `None` for an empty batch.
    pub fn from_episodes(episodes: &[Episode]) -> Option<Self> {
        if episodes.is_empty() {
            return None;
        }
        let n = episodes.len();

        let mut scores: Vec<u64> = episodes.iter().map(|e| e.score).collect();
        scores.sort_unstable();
        let median_score = if n % 2 == 0 {
            (scores[n / 2 - 1] + scores[n / 2]) as f64 / 2.0
        } else {
            scores[n / 2] as f64
        };

        let total_score: u64 = scores.iter().sum();
        let total_steps: u64 = episodes.iter().map(|e| u64::from(e.steps)).sum();

        let mut tile_distribution = BTreeMap::new();
        for e in episodes {
            *tile_distribution.entry(e.max_tile).or_insert(0u32) += 1;
        }

        Some(Summary {
            episodes: n,
            avg_score: total_score as f64 / n as f64,
            median_score,
            min_score: scores[0],
            max_score: scores[n - 1],
            avg_steps: total_steps as f64 / n as f64,
            max_tile_overall: episodes.iter().map(|e| e.max_tile).max().unwrap_or(0),
            tile_distribution,
        })
    }
}

impl fmt::Display for Summary {
    /// Parseable `key=value` lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "avg_score={:.2}", self.avg_score)?;
        writeln!(f, "median_score={:.2}", self.median_score)?;
        writeln!(f, "min_score={}", self.min_score)?;
        writeln!(f, "max_score={}", self.max_score)?;
        writeln!(f, "avg_steps={:.2}", self.avg_steps)?;
        writeln!(f, "max_tile_overall={}", self.max_tile_overall)?;
        let distribution: Vec<String> = self
            .tile_distribution
            .iter()
            .map(|(tile, count)| format!("{tile}:{count}"))
            .collect();
        writeln!(f, "tile_distribution={}", distribution.join(","))
    }
}
