//! Local combinatorial search around a single anchor tile.
//!
//! Both searches install candidate configurations on the anchor's unknown neighbors through a
//! [`Hypothesis`], keep the ones under which every nearby danger tile can still be satisfied, and
//! report the neighbors whose assignment agrees across all of them.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Safe/mine assignment to a candidate list, `true` meaning safe.
pub type Configuration = SmallVec<[bool; 8]>;

/// Which single exception to the uniform baseline a shallow search moves around.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMode {
    /// Baseline all mines, exactly one candidate safe.
    OneSafe,
    /// Baseline all safe, exactly one candidate a mine.
    OneMine,
}

/// Sizes of safe subsets the exhaustive search enumerates for `m` candidates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubsetRange {
    /// `2..=m-2`. Smaller and larger subsets are covered by the cheaper rules.
    Pruned,
    /// `1..=m-1`. Also covers what shallow search decides.
    Widened,
}

impl SubsetRange {
    pub fn sizes(self, m: usize) -> RangeInclusive<usize> {
        match self {
            Self::Pruned => 2..=m.saturating_sub(2),
            Self::Widened => 1..=m.saturating_sub(1),
        }
    }
}

impl Default for SubsetRange {
    fn default() -> Self {
        Self::Pruned
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deduction {
    pub safe: Neighbors,
    pub mines: Neighbors,
    /// Number of configurations whose validity was checked.
    pub checks: u32,
}

impl Deduction {
    pub fn is_empty(&self) -> bool {
        self.safe.is_empty() && self.mines.is_empty()
    }
}

/// Danger tiles adjacent to any of `candidates`, sorted and deduplicated, without `exclude`.
pub fn validation_tiles(
    grid: &KnowledgeGrid,
    candidates: &[Coord2],
    exclude: Option<Coord2>,
) -> Vec<Coord2> {
    let mut tiles = BTreeSet::new();
    for &pos in candidates {
        tiles.extend(grid.adj_danger(pos));
    }
    if let Some(anchor) = exclude {
        tiles.remove(&anchor);
    }
    tiles.into_iter().collect()
}

/// Whether every validation tile can still reach its count: not over-flagged, and with enough
/// flagged plus unknown neighbors left.
pub fn is_consistent(grid: &KnowledgeGrid, validation: &[Coord2]) -> bool {
    validation.iter().all(|&pos| {
        let Some(danger) = grid.tile(pos).danger() else {
            return true;
        };
        let flagged = grid.num_adj_flagged(pos);
        let unknown = grid.num_adj_unknown(pos);
        flagged <= danger && flagged + unknown >= danger
    })
}

/// Splits the candidates whose assignment agrees across every valid configuration.
pub fn resolve(
    anchor: Coord2,
    candidates: &[Coord2],
    configs: &[Configuration],
) -> Result<(Neighbors, Neighbors)> {
    let Some((first, rest)) = configs.split_first() else {
        return Err(SolverError::EmptyConfigurationSet { anchor });
    };

    let mut safe = Neighbors::new();
    let mut mines = Neighbors::new();
    for (index, &is_safe) in first.iter().enumerate() {
        if rest.iter().all(|config| config[index] == is_safe) {
            if is_safe {
                safe.push(candidates[index]);
            } else {
                mines.push(candidates[index]);
            }
        }
    }
    Ok((safe, mines))
}

/// Tries each of the anchor's unknown neighbors as the single exception described by `mode`.
///
/// Only sound when the anchor's count really is one away from the baseline, which the
/// propagation ladder guarantees before calling this.
pub fn shallow_search(
    grid: &mut KnowledgeGrid,
    anchor: Coord2,
    mode: SearchMode,
) -> Result<Deduction> {
    let candidates = grid.adj_unknown(anchor);
    // the anchor holds by construction
    let validation = validation_tiles(grid, &candidates, Some(anchor));
    let k = candidates.len();
    let one_safe = matches!(mode, SearchMode::OneSafe);

    let mut configs = Vec::new();
    let mut checks = 0;
    {
        let mut hyp = Hypothesis::new(grid, &candidates);
        if one_safe {
            hyp.assume_all_mines();
        } else {
            hyp.assume_all_safe();
        }

        for exception in 0..k {
            if let Some(previous) = exception.checked_sub(1) {
                set_exception(&mut hyp, previous, one_safe, false);
            }
            set_exception(&mut hyp, exception, one_safe, true);

            checks += 1;
            if is_consistent(&hyp, &validation) {
                configs.push(
                    (0..k)
                        .map(|index| (index == exception) == one_safe)
                        .collect::<Configuration>(),
                );
            } else {
                log::trace!("{anchor:?}: exception at {:?} rejected", candidates[exception]);
            }
        }
    }

    let (safe, mines) = resolve(anchor, &candidates, &configs)?;
    Ok(Deduction {
        safe,
        mines,
        checks,
    })
}

fn set_exception(hyp: &mut Hypothesis<'_>, index: usize, one_safe: bool, active: bool) {
    if one_safe == active {
        hyp.assume_safe(index);
    } else {
        hyp.assume_mine(index);
    }
}

/// Enumerates every safe subset of the anchor's unknown neighbors whose size lies in `range`.
///
/// The candidate list never exceeds 8 tiles, so at most 256 configurations are checked.
pub fn semi_shallow_search(
    grid: &mut KnowledgeGrid,
    anchor: Coord2,
    range: SubsetRange,
) -> Result<Deduction> {
    let candidates = grid.adj_unknown(anchor);
    let validation = validation_tiles(grid, &candidates, None);
    let m = candidates.len();
    let sizes = range.sizes(m);

    let mut configs = Vec::new();
    let mut checks = 0;
    {
        let mut hyp = Hypothesis::new(grid, &candidates);
        for mask in 0u16..(1 << m) {
            if !sizes.contains(&(mask.count_ones() as usize)) {
                continue;
            }
            let config: Configuration = (0..m).map(|bit| mask & (1 << bit) != 0).collect();
            hyp.assume(&config);

            checks += 1;
            if is_consistent(&hyp, &validation) {
                configs.push(config);
            }
        }
    }
    log::trace!(
        "{anchor:?}: {} of {checks} configurations valid",
        configs.len()
    );

    let (safe, mines) = resolve(anchor, &candidates, &configs)?;
    Ok(Deduction {
        safe,
        mines,
        checks,
    })
}
