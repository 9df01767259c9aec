use crate::grid::{merges_with, EMPTY};

/// Result of collapsing one line toward index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOutcome {
    /// The collapsed line, same length as the input.
    pub cells: Vec<u32>,
    /// Whether any position differs from the input.
    pub changed: bool,
    /// Sum of the values created by merges.
    pub gain: u64,
    /// Indices in `cells` that hold a freshly merged tile.
    pub merged: Vec<usize>,
}

/// Collapse a line toward index 0.
///
/// Empty cells are dropped, then the remaining tiles are scanned left to
/// right: a tile equal to its right neighbour absorbs it and doubles, and the
/// scan resumes after the pair. A merged tile never merges again in the same
/// pass, so `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]` and `[2, 2, 2]` becomes
/// `[4, 2, 0]`. Tiles at [`MAX_TILE`](crate::MAX_TILE) slide but never merge.
///
/// ```
/// use tilemerge_core::compact_line;
///
/// let out = compact_line(&[2, 0, 2, 2]);
/// assert_eq!(out.cells, vec![4, 2, 0, 0]);
/// assert_eq!(out.gain, 4);
/// assert!(out.changed);
/// ```
pub fn compact_line(line: &[u32]) -> LineOutcome {
    let tiles: Vec<u32> = line.iter().copied().filter(|&v| v != EMPTY).collect();

    let mut cells = Vec::with_capacity(line.len());
    let mut merged = Vec::new();
    let mut gain = 0u64;

    let mut i = 0;
    while i < tiles.len() {
        let value = tiles[i];
        if tiles.get(i + 1).is_some_and(|&next| merges_with(value, next)) {
            let doubled = value * 2;
            merged.push(cells.len());
            cells.push(doubled);
            gain += u64::from(doubled);
            i += 2;
        } else {
            cells.push(value);
            i += 1;
        }
    }
    cells.resize(line.len(), EMPTY);

    let changed = cells.as_slice() != line;
    LineOutcome {
        cells,
        changed,
        gain,
        merged,
    }
}
