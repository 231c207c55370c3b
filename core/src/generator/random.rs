use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Generation strategy that can optionally try to make the starting tile zero or at least safe, but other than that is
/// purely random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
    start_tile: StartTile,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2, start_tile: StartTile) -> Self {
        Self {
            seed,
            start,
            start_tile,
        }
    }

    fn reserved_tiles(&self, board: BoardConfig) -> Vec<Coord2> {
        use StartTile::*;

        let zero: Vec<Coord2> = core::iter::once(self.start)
            .chain(iter_neighbors(self.start, board.size))
            .collect();
        let total = usize::from(board.total_tiles());
        let mines = usize::from(board.mines);

        match self.start_tile {
            Random => Vec::new(),
            SimpleSafe | AlwaysZero if mines + 1 > total => {
                log::warn!("Cannot make start tile safe, fallback to random");
                Vec::new()
            }
            SimpleSafe => Vec::from([self.start]),
            AlwaysZero if mines + zero.len() > total => {
                log::warn!("Cannot make start tile zero, fallback to simple safe");
                Vec::from([self.start])
            }
            AlwaysZero => zero,
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, board: BoardConfig) -> MineLayout {
        use rand::prelude::*;

        let mut mines: Array2<bool> = Array2::default(board.size.to_nd_index());

        // optimize for full boards
        if board.mines >= board.total_tiles() {
            mines.fill(true);
            return MineLayout::from_mine_mask(mines);
        }

        let reserved = self.reserved_tiles(board);
        let mut free: Vec<Coord2> = iter_coords(board.size)
            .filter(|pos| !reserved.contains(pos))
            .collect();

        // partial shuffle, the first `count` entries become mines
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let count = usize::from(board.mines).min(free.len());
        for placed in 0..count {
            let pick = rng.random_range(placed..free.len());
            free.swap(placed, pick);
            mines[free[placed].to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mines);
        if layout.mine_count() != board.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                board.mines
            );
        }
        layout
    }
}
