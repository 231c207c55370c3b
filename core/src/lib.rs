#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use guess::*;
pub use hypothesis::*;
pub use layout::*;
pub use search::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod guess;
mod hypothesis;
mod layout;
mod search;
mod tile;
mod types;

/// Board dimensions and the total number of mines on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(SolverError::EmptyBoard);
        }
        let max = mult(size.0, size.1);
        if mines > max {
            return Err(SolverError::TooManyMines { mines, max });
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.mines)
    }

    /// Uniform mine density, the score of a tile nothing is known about.
    pub fn mine_density(&self) -> f32 {
        match self.total_tiles() {
            0 => 0.0,
            total => f32::from(self.mines) / f32::from(total),
        }
    }
}
