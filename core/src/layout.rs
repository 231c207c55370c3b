use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Ground truth for a board: where the mines actually are.
///
/// The deducer never sees this; it stands in for the environment that answers actions with
/// percepts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(SolverError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (x as Coord, y as Coord)
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        iter_neighbors(coords, self.size())
            .filter(|&pos| self[pos])
            .count() as u8
    }

    /// Percept produced by uncovering `coords`, `None` if a mine goes off.
    pub fn uncover(&self, coords: Coord2) -> Result<Option<Percept>> {
        let size = self.size();
        if coords.0 >= size.0 || coords.1 >= size.1 {
            return Err(SolverError::OutOfBounds { coords });
        }
        Ok((!self[coords]).then(|| Percept::Danger(self.adjacent_mine_count(coords))))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_adjacent_mines() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 0);
        assert_eq!(layout.board_config(), BoardConfig::new_unchecked((3, 3), 2));
    }

    #[test]
    fn uncover_reports_percepts() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        assert_eq!(layout.uncover((1, 1)), Ok(Some(Percept::Danger(1))));
        assert_eq!(layout.uncover((0, 0)), Ok(None));
        assert_eq!(
            layout.uncover((2, 1)),
            Err(SolverError::OutOfBounds { coords: (2, 1) })
        );
    }

    #[test]
    fn rejects_mines_outside_board() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(SolverError::InvalidCoords)
        );
    }
}
