use serde::{Deserialize, Serialize};

use crate::{Result, SolverError};

/// Knowledge the deducer holds about a single tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Unknown,
    Flagged,
    /// Out-of-grid sentinel, only ever found in the padding ring.
    Border,
    /// Revealed, with the number of mines among its 8 neighbors.
    Danger(u8),
}

impl TileState {
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Danger(_))
    }

    /// Revealed with a positive count, i.e. a tile that constrains its neighbors.
    pub const fn is_danger(self) -> bool {
        matches!(self, Self::Danger(n) if n > 0)
    }

    pub const fn danger(self) -> Option<u8> {
        match self {
            Self::Danger(n) => Some(n),
            _ => None,
        }
    }
}

impl Default for TileState {
    fn default() -> Self {
        Self::Unknown
    }
}

/// What the environment reports back for the tile that was just acted on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Percept {
    Danger(u8),
    Flagged,
}

impl Percept {
    /// Most mines a tile can see.
    pub const MAX_DANGER: u8 = 8;

    /// Decodes the integer protocol: non-negative is a count, negative acknowledges a flag.
    pub fn from_raw(raw: i16) -> Result<Self> {
        match raw {
            n if n < 0 => Ok(Self::Flagged),
            n if n <= i16::from(Self::MAX_DANGER) => Ok(Self::Danger(n as u8)),
            _ => Err(SolverError::InvalidPercept { raw }),
        }
    }

    /// Rejects counts no real tile can show.
    pub fn validate(self) -> Result<Self> {
        match self {
            Self::Danger(n) if n > Self::MAX_DANGER => Err(SolverError::InvalidPercept {
                raw: i16::from(n),
            }),
            percept => Ok(percept),
        }
    }

    pub const fn to_raw(self) -> i16 {
        match self {
            Self::Danger(n) => n as i16,
            Self::Flagged => -1,
        }
    }

    pub const fn tile_state(self) -> TileState {
        match self {
            Self::Danger(n) => TileState::Danger(n),
            Self::Flagged => TileState::Flagged,
        }
    }
}
