use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// How to pick a tile when nothing is provably safe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessStrategy {
    /// Lowest local mine-density estimate, first in column-major order on ties.
    LocalDensity,
    /// Uniformly random unknown tile from a seeded generator.
    RandomUnknown { seed: u64 },
}

impl Default for GuessStrategy {
    fn default() -> Self {
        Self::LocalDensity
    }
}

/// Scores every tile with the highest `(danger - flagged) / unknown` among the danger tiles
/// around it. A zero estimate wins over anything else; tiles no danger tile touches keep `prior`.
pub fn density_scores(grid: &KnowledgeGrid, prior: f32) -> Array2<f32> {
    let mut scores = Array2::from_elem(grid.size().to_nd_index(), prior);

    for pos in iter_coords(grid.size()) {
        let TileState::Danger(danger @ 1..) = grid.tile(pos) else {
            continue;
        };
        let unknown = grid.adj_unknown(pos);
        if unknown.is_empty() {
            continue;
        }

        let remaining = danger.saturating_sub(grid.num_adj_flagged(pos));
        let estimate = f32::from(remaining) / unknown.len() as f32;
        for neighbor in unknown {
            let score = &mut scores[neighbor.to_nd_index()];
            if estimate == 0.0 || (*score != 0.0 && *score < estimate) {
                *score = estimate;
            }
        }
    }

    scores
}

/// First candidate with the lowest score, stopping early on a zero.
pub fn pick_lowest(
    scores: &Array2<f32>,
    candidates: impl IntoIterator<Item = Coord2>,
) -> Option<Coord2> {
    let mut best: Option<(Coord2, f32)> = None;
    for pos in candidates {
        let score = scores[pos.to_nd_index()];
        if score == 0.0 {
            return Some(pos);
        }
        if best.is_none_or(|(_, lowest)| score < lowest) {
            best = Some((pos, score));
        }
    }
    best.map(|(pos, _)| pos)
}

pub fn pick_random<R: Rng>(
    rng: &mut R,
    candidates: impl IntoIterator<Item = Coord2>,
) -> Option<Coord2> {
    let candidates: Vec<Coord2> = candidates.into_iter().collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}
