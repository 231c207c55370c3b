use thiserror::Error;

use crate::{CellCount, Coord2, TileState};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("Coordinates {coords:?} are outside the grid")]
    OutOfBounds { coords: Coord2 },
    #[error("Tile {coords:?} is already {existing:?}, refusing percept {percept:?}")]
    AlreadyResolved {
        coords: Coord2,
        existing: TileState,
        percept: TileState,
    },
    #[error("No valid configuration around anchor {anchor:?}")]
    EmptyConfigurationSet { anchor: Coord2 },
    #[error("Percept {raw} is not a valid danger count")]
    InvalidPercept { raw: i16 },
    #[error("Board must be at least 1x1")]
    EmptyBoard,
    #[error("Too many mines: {mines} requested but only {max} tiles")]
    TooManyMines { mines: CellCount, max: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
}

pub type Result<T> = core::result::Result<T, SolverError>;
