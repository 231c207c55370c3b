use core::ops::Deref;

use crate::*;

/// Scoped overlay of assumed states on a set of unknown tiles.
///
/// While alive it holds the grid exclusively; when dropped, every candidate tile is put back to
/// `Unknown`, on every exit path.
pub struct Hypothesis<'g> {
    grid: &'g mut KnowledgeGrid,
    candidates: &'g [Coord2],
}

impl<'g> Hypothesis<'g> {
    /// All `candidates` must currently be `Unknown` in `grid`.
    pub fn new(grid: &'g mut KnowledgeGrid, candidates: &'g [Coord2]) -> Self {
        debug_assert!(
            candidates.iter().all(|&pos| grid.tile(pos).is_unknown()),
            "hypothesis installed over a resolved tile"
        );
        Self { grid, candidates }
    }

    pub fn candidates(&self) -> &[Coord2] {
        self.candidates
    }

    pub fn assume_safe(&mut self, index: usize) {
        self.grid.put(self.candidates[index], TileState::Danger(0));
    }

    pub fn assume_mine(&mut self, index: usize) {
        self.grid.put(self.candidates[index], TileState::Flagged);
    }

    /// Installs a full configuration, `true` meaning safe.
    pub fn assume(&mut self, config: &[bool]) {
        debug_assert_eq!(config.len(), self.candidates.len());
        for (index, &safe) in config.iter().enumerate() {
            if safe {
                self.assume_safe(index);
            } else {
                self.assume_mine(index);
            }
        }
    }

    pub fn assume_all_safe(&mut self) {
        for index in 0..self.candidates.len() {
            self.assume_safe(index);
        }
    }

    pub fn assume_all_mines(&mut self) {
        for index in 0..self.candidates.len() {
            self.assume_mine(index);
        }
    }
}

impl Deref for Hypothesis<'_> {
    type Target = KnowledgeGrid;

    fn deref(&self) -> &Self::Target {
        self.grid
    }
}

impl Drop for Hypothesis<'_> {
    fn drop(&mut self) {
        for &pos in self.candidates {
            self.grid.put(pos, TileState::Unknown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_restores_candidates() {
        let mut grid = KnowledgeGrid::new((3, 3));
        grid.reveal((1, 1), Percept::Danger(1)).unwrap();
        let before = grid.clone();
        let candidates = grid.adj_unknown((1, 1));

        {
            let mut hyp = Hypothesis::new(&mut grid, &candidates);
            hyp.assume_all_mines();
            hyp.assume_safe(0);
            assert_eq!(hyp.num_adj_flagged((1, 1)), 7);
            assert_eq!(hyp.num_adj_unknown((1, 1)), 0);
        }

        assert_eq!(grid, before);
    }

    #[test]
    fn assume_installs_full_configuration() {
        let mut grid = KnowledgeGrid::new((2, 1));
        let candidates = [(0, 0), (1, 0)];

        let mut hyp = Hypothesis::new(&mut grid, &candidates);
        hyp.assume(&[true, false]);

        assert_eq!(hyp.tile((0, 0)), TileState::Danger(0));
        assert_eq!(hyp.tile((1, 0)), TileState::Flagged);
    }
}
