use alloc::collections::BTreeSet;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub guess: GuessStrategy,
    pub subset_range: SubsetRange,
}

/// Running totals over every deduction pass of a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeductionStats {
    pub anchors_examined: usize,
    pub trivial_safe: usize,
    pub trivial_mine: usize,
    pub shallow_searches: usize,
    pub semi_shallow_searches: usize,
    pub empty_configuration_sets: usize,
    pub configuration_checks: usize,
}

/// Which ladder rule matched an anchor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Rule {
    AllSafe,
    AllMines,
    Shallow(SearchMode),
    SemiShallow,
}

impl Rule {
    /// Cheapest rule that applies to a tile showing `danger` with the given neighbor counts.
    fn select(danger: u8, flagged: u8, unknown: u8) -> Self {
        if danger == flagged {
            Self::AllSafe
        } else if danger == flagged + unknown {
            Self::AllMines
        } else if danger.saturating_add(1) == flagged + unknown {
            Self::Shallow(SearchMode::OneSafe)
        } else if danger == flagged + 1 {
            Self::Shallow(SearchMode::OneMine)
        } else {
            Self::SemiShallow
        }
    }
}

/// Deduction engine for one game.
///
/// Feed it percepts with [`Deducer::observe`], run [`Deducer::deduce`], then drain the tiles it
/// proved safe or mined. When both sets are empty, [`Deducer::guess`] picks a tile to risk.
#[derive(Clone, Debug)]
pub struct Deducer {
    board: BoardConfig,
    config: EngineConfig,
    grid: KnowledgeGrid,
    to_examine: BTreeSet<Coord2>,
    safe: BTreeSet<Coord2>,
    mines: BTreeSet<Coord2>,
    revealed: CellCount,
    stats: DeductionStats,
    rng: SmallRng,
}

impl Deducer {
    pub fn new(board: BoardConfig, config: EngineConfig) -> Result<Self> {
        let board = BoardConfig::new(board.size, board.mines)?;
        let seed = match config.guess {
            GuessStrategy::RandomUnknown { seed } => seed,
            GuessStrategy::LocalDensity => 0,
        };
        Ok(Self {
            board,
            config,
            grid: KnowledgeGrid::new(board.size),
            to_examine: BTreeSet::new(),
            safe: BTreeSet::new(),
            mines: BTreeSet::new(),
            revealed: 0,
            stats: DeductionStats::default(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn board(&self) -> BoardConfig {
        self.board
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn grid(&self) -> &KnowledgeGrid {
        &self.grid
    }

    pub fn stats(&self) -> &DeductionStats {
        &self.stats
    }

    /// Records the percept for the tile acted on last and queues the work it unlocks.
    pub fn observe(&mut self, coords: Coord2, percept: Percept) -> Result<RevealOutcome> {
        let outcome = self
            .grid
            .reveal(coords, percept)
            .inspect_err(|err| log::warn!("Ignoring percept: {err}"))?;
        if !outcome.has_update() {
            return Ok(outcome);
        }

        self.safe.remove(&coords);
        self.mines.remove(&coords);

        match percept {
            Percept::Danger(0) => {
                self.revealed += 1;
                self.safe.extend(self.grid.adj_unknown(coords));
            }
            Percept::Danger(_) => {
                self.revealed += 1;
                self.to_examine.insert(coords);
            }
            Percept::Flagged => {}
        }
        // their flagged/unknown counts just changed
        self.to_examine.extend(self.grid.adj_danger(coords));

        Ok(outcome)
    }

    /// Drains the to-examine worklist, growing the safe and mine sets.
    pub fn deduce(&mut self) -> &DeductionStats {
        let queued = self.to_examine.len();
        while let Some(anchor) = self.to_examine.pop_first() {
            self.examine(anchor);
        }
        log::debug!(
            "Deduction pass over {queued} queued tiles: {} safe, {} mines pending",
            self.safe.len(),
            self.mines.len()
        );
        &self.stats
    }

    fn examine(&mut self, anchor: Coord2) {
        let TileState::Danger(danger @ 1..) = self.grid.tile(anchor) else {
            return;
        };
        let flagged = self.grid.num_adj_flagged(anchor);
        let unknown = self.grid.num_adj_unknown(anchor);
        if unknown == 0 {
            return;
        }
        self.stats.anchors_examined += 1;

        let search = match Rule::select(danger, flagged, unknown) {
            Rule::AllSafe => {
                self.stats.trivial_safe += 1;
                let tiles = self.grid.adj_unknown(anchor);
                self.record(anchor, &tiles, &[]);
                return;
            }
            Rule::AllMines => {
                self.stats.trivial_mine += 1;
                let tiles = self.grid.adj_unknown(anchor);
                self.record(anchor, &[], &tiles);
                return;
            }
            Rule::Shallow(mode) => {
                self.stats.shallow_searches += 1;
                shallow_search(&mut self.grid, anchor, mode)
            }
            Rule::SemiShallow => {
                self.stats.semi_shallow_searches += 1;
                semi_shallow_search(&mut self.grid, anchor, self.config.subset_range)
            }
        };

        match search {
            Ok(found) => {
                self.stats.configuration_checks += found.checks as usize;
                self.record(anchor, &found.safe, &found.mines);
            }
            Err(err) => {
                self.stats.empty_configuration_sets += 1;
                log::warn!("{err}, skipping anchor");
            }
        }
    }

    fn record(&mut self, anchor: Coord2, safe: &[Coord2], mines: &[Coord2]) {
        for &pos in safe {
            if self.safe.insert(pos) {
                log::debug!("{anchor:?} proves {pos:?} safe");
            }
        }
        for &pos in mines {
            if self.mines.insert(pos) {
                log::debug!("{anchor:?} proves {pos:?} is a mine");
            }
        }
    }

    pub fn pop_safe(&mut self) -> Option<Coord2> {
        self.safe.pop_first()
    }

    pub fn pop_mine(&mut self) -> Option<Coord2> {
        self.mines.pop_first()
    }

    pub fn safe_tiles(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.safe.iter().copied()
    }

    pub fn mine_tiles(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mines.iter().copied()
    }

    pub fn has_certain_moves(&self) -> bool {
        !(self.safe.is_empty() && self.mines.is_empty())
    }

    /// Picks an unknown tile to uncover without proof. Known mines are never picked.
    pub fn guess(&mut self) -> Option<Coord2> {
        let mines = &self.mines;
        let candidates = self.grid.unknown_tiles().filter(|pos| !mines.contains(pos));
        let picked = match self.config.guess {
            GuessStrategy::LocalDensity => {
                let scores = density_scores(&self.grid, self.board.mine_density());
                pick_lowest(&scores, candidates)
            }
            GuessStrategy::RandomUnknown { .. } => pick_random(&mut self.rng, candidates),
        };
        if let Some(pos) = picked {
            log::debug!("No certain move, guessing {pos:?}");
        }
        picked
    }

    /// Safe tiles that have not been uncovered yet.
    pub fn remaining_safe(&self) -> CellCount {
        self.board.safe_tiles().saturating_sub(self.revealed)
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining_safe() == 0
    }
}
