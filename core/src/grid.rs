use alloc::collections::BTreeSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::DISPLACEMENTS;
use crate::*;

/// Up to 8 neighbor coordinates, kept inline.
pub type Neighbors = SmallVec<[Coord2; 8]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Updated,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Updated)
    }
}

/// Everything the deducer knows about the board.
///
/// Tiles live in an array padded by one ring of [`TileState::Border`] on every side, so a real
/// coordinate `(x, y)` sits at `[x + 1, y + 1]` and neighbor lookups never leave the array.
/// A companion set tracks every real coordinate still `Unknown` according to the percepts
/// received through [`KnowledgeGrid::reveal`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGrid {
    size: Coord2,
    tiles: Array2<TileState>,
    unknown: BTreeSet<Coord2>,
}

impl KnowledgeGrid {
    pub fn new(size: Coord2) -> Self {
        let (width, height) = (usize::from(size.0), usize::from(size.1));
        let tiles = Array2::from_shape_fn([width + 2, height + 2], |(px, py)| {
            if px == 0 || py == 0 || px == width + 1 || py == height + 1 {
                TileState::Border
            } else {
                TileState::Unknown
            }
        });
        Self {
            size,
            tiles,
            unknown: iter_coords(size).collect(),
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.0
    }

    pub fn height(&self) -> Coord {
        self.size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(SolverError::OutOfBounds { coords })
        }
    }

    /// Records a percept for `coords`.
    ///
    /// Repeating the percept a tile already holds is a no-op. A percept that contradicts a
    /// resolved tile is rejected and leaves the grid untouched, as is a count above 8.
    pub fn reveal(&mut self, coords: Coord2, percept: Percept) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let incoming = percept.validate()?.tile_state();

        match self.tile(coords) {
            TileState::Unknown => {
                self.put(coords, incoming);
                self.unknown.remove(&coords);
                Ok(RevealOutcome::Updated)
            }
            existing if existing == incoming => Ok(RevealOutcome::NoChange),
            existing => Err(SolverError::AlreadyResolved {
                coords,
                existing,
                percept: incoming,
            }),
        }
    }

    pub fn state(&self, coords: Coord2) -> Result<TileState> {
        let coords = self.validate_coords(coords)?;
        Ok(self.tile(coords))
    }

    /// Writes a tile directly, bypassing the unknown-set bookkeeping.
    ///
    /// Meant for installing search hypotheses on tiles that are really `Unknown`; whoever
    /// installs one must put `Unknown` back. [`crate::Hypothesis`] does that automatically.
    pub fn set_state(&mut self, coords: Coord2, state: TileState) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        self.put(coords, state);
        Ok(())
    }

    /// Coordinates still unknown, in column-major order.
    pub fn unknown_tiles(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.unknown.iter().copied()
    }

    pub fn unknown_count(&self) -> usize {
        self.unknown.len()
    }

    pub fn is_tracked_unknown(&self, coords: Coord2) -> bool {
        self.unknown.contains(&coords)
    }

    pub fn adj_unknown(&self, coords: Coord2) -> Neighbors {
        self.adj_matching(coords, TileState::is_unknown)
    }

    pub fn adj_flagged(&self, coords: Coord2) -> Neighbors {
        self.adj_matching(coords, TileState::is_flagged)
    }

    /// Neighbors revealed with a positive count.
    pub fn adj_danger(&self, coords: Coord2) -> Neighbors {
        self.adj_matching(coords, TileState::is_danger)
    }

    /// Neighbors revealed with any count, zero included.
    pub fn adj_revealed(&self, coords: Coord2) -> Neighbors {
        self.adj_matching(coords, TileState::is_revealed)
    }

    pub fn num_adj_unknown(&self, coords: Coord2) -> u8 {
        self.count_matching(coords, TileState::is_unknown)
    }

    pub fn num_adj_flagged(&self, coords: Coord2) -> u8 {
        self.count_matching(coords, TileState::is_flagged)
    }

    pub(crate) fn tile(&self, (x, y): Coord2) -> TileState {
        self.tiles[[usize::from(x) + 1, usize::from(y) + 1]]
    }

    pub(crate) fn put(&mut self, (x, y): Coord2, state: TileState) {
        self.tiles[[usize::from(x) + 1, usize::from(y) + 1]] = state;
    }

    fn adj_matching(&self, coords: Coord2, pred: impl Fn(TileState) -> bool) -> Neighbors {
        self.iter_padded_neighbors(coords)
            .filter(|&(_, state)| pred(state))
            .map(|(pos, _)| pos)
            .collect()
    }

    fn count_matching(&self, coords: Coord2, pred: impl Fn(TileState) -> bool) -> u8 {
        let mut count = 0;
        for (_, state) in self.iter_padded_neighbors(coords) {
            if pred(state) {
                count += 1;
            }
        }
        count
    }

    /// Yields `(real coords, state)` for the in-grid neighbors, skipping the border ring.
    fn iter_padded_neighbors(&self, (x, y): Coord2) -> impl Iterator<Item = (Coord2, TileState)> {
        let (px, py) = (usize::from(x) + 1, usize::from(y) + 1);
        DISPLACEMENTS.iter().filter_map(move |&(dx, dy)| {
            let nx = px.wrapping_add_signed(dx);
            let ny = py.wrapping_add_signed(dy);
            match self.tiles[[nx, ny]] {
                TileState::Border => None,
                state => Some((((nx - 1) as Coord, (ny - 1) as Coord), state)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_unknown_inside_a_border() {
        let grid = KnowledgeGrid::new((3, 2));

        assert_eq!(grid.unknown_count(), 6);
        assert_eq!(grid.tiles[[0, 0]], TileState::Border);
        assert_eq!(grid.tiles[[4, 3]], TileState::Border);
        assert_eq!(grid.state((2, 1)), Ok(TileState::Unknown));
        assert_eq!(grid.num_adj_unknown((0, 0)), 3);
    }

    #[test]
    fn reveal_moves_tile_out_of_unknown_set() {
        let mut grid = KnowledgeGrid::new((3, 3));

        assert_eq!(grid.reveal((1, 1), Percept::Danger(2)), Ok(RevealOutcome::Updated));
        assert_eq!(grid.reveal((0, 0), Percept::Flagged), Ok(RevealOutcome::Updated));

        assert_eq!(grid.state((1, 1)), Ok(TileState::Danger(2)));
        assert_eq!(grid.state((0, 0)), Ok(TileState::Flagged));
        assert!(!grid.is_tracked_unknown((1, 1)));
        assert!(!grid.is_tracked_unknown((0, 0)));
        assert_eq!(grid.unknown_count(), 7);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut grid = KnowledgeGrid::new((3, 3));
        grid.reveal((1, 1), Percept::Danger(1)).unwrap();
        let before = grid.clone();

        assert_eq!(grid.reveal((1, 1), Percept::Danger(1)), Ok(RevealOutcome::NoChange));
        assert_eq!(grid, before);
    }

    #[test]
    fn reveal_rejects_contradicting_percept() {
        let mut grid = KnowledgeGrid::new((3, 3));
        grid.reveal((1, 1), Percept::Danger(1)).unwrap();

        assert_eq!(
            grid.reveal((1, 1), Percept::Flagged),
            Err(SolverError::AlreadyResolved {
                coords: (1, 1),
                existing: TileState::Danger(1),
                percept: TileState::Flagged,
            })
        );
        assert_eq!(grid.state((1, 1)), Ok(TileState::Danger(1)));
    }

    #[test]
    fn reveal_rejects_impossible_counts() {
        let mut grid = KnowledgeGrid::new((3, 3));
        let before = grid.clone();

        assert_eq!(
            grid.reveal((1, 1), Percept::Danger(9)),
            Err(SolverError::InvalidPercept { raw: 9 })
        );
        assert_eq!(
            grid.reveal((1, 1), Percept::Danger(255)),
            Err(SolverError::InvalidPercept { raw: 255 })
        );
        assert_eq!(grid, before);
        assert!(grid.is_tracked_unknown((1, 1)));
    }

    #[test]
    fn corner_neighbors_stay_inside_the_grid() {
        let grid = KnowledgeGrid::new((2, 2));

        let visited: Neighbors = grid.iter_padded_neighbors((0, 0)).map(|(pos, _)| pos).collect();
        assert_eq!(visited.as_slice(), [(0, 1), (1, 0), (1, 1)]);
        assert!(
            grid.iter_padded_neighbors((1, 1))
                .all(|(pos, state)| pos.0 < 2 && pos.1 < 2 && state != TileState::Border)
        );
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut grid = KnowledgeGrid::new((2, 2));

        assert_eq!(
            grid.reveal((2, 0), Percept::Danger(0)),
            Err(SolverError::OutOfBounds { coords: (2, 0) })
        );
        assert_eq!(
            grid.state((0, 5)),
            Err(SolverError::OutOfBounds { coords: (0, 5) })
        );
        assert!(grid.set_state((9, 9), TileState::Flagged).is_err());
        assert_eq!(grid.unknown_count(), 4);
    }

    #[test]
    fn neighborhood_queries_split_by_state() {
        let mut grid = KnowledgeGrid::new((3, 3));
        grid.reveal((0, 0), Percept::Danger(0)).unwrap();
        grid.reveal((1, 0), Percept::Danger(1)).unwrap();
        grid.reveal((2, 2), Percept::Flagged).unwrap();

        assert_eq!(grid.adj_danger((1, 1)).as_slice(), [(1, 0)]);
        assert_eq!(grid.adj_revealed((1, 1)).as_slice(), [(0, 0), (1, 0)]);
        assert_eq!(grid.adj_flagged((1, 1)).as_slice(), [(2, 2)]);
        assert_eq!(grid.num_adj_flagged((1, 1)), 1);
        assert_eq!(grid.num_adj_unknown((1, 1)), 5);
        assert_eq!(
            grid.adj_unknown((1, 1)).as_slice(),
            [(0, 1), (0, 2), (1, 2), (2, 0), (2, 1)]
        );
    }

    #[test]
    fn set_state_skips_unknown_bookkeeping() {
        let mut grid = KnowledgeGrid::new((2, 2));
        grid.set_state((0, 0), TileState::Flagged).unwrap();

        assert!(grid.is_tracked_unknown((0, 0)));
        assert_eq!(grid.num_adj_flagged((1, 1)), 1);

        grid.set_state((0, 0), TileState::Unknown).unwrap();
        assert_eq!(grid, KnowledgeGrid::new((2, 2)));
    }
}
