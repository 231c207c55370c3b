use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(self, board: BoardConfig) -> MineLayout;
}

/// What the first uncovered tile is guaranteed to be.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StartTile {
    Random,
    SimpleSafe,
    AlwaysZero,
}
