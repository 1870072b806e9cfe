use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy used to seat a session's mines once the first cell is revealed.
pub trait MinePlacer {
    /// Checks up front that this placer can serve `config`.
    fn validate(&self, _config: &GameConfig) -> Result<()> {
        Ok(())
    }

    /// Whether placement waits for the first revealed cell. Non-deferred
    /// placers run as soon as the session is built.
    fn is_deferred(&self) -> bool {
        true
    }

    /// Places `mines` mines on an empty `board`, given the cell the player
    /// opened first if there was one. Returns how many were actually placed.
    fn place(&mut self, board: &mut Board, mines: CellCount, start: Option<Coord2>) -> CellCount;
}

/// How much protection the first revealed cell gets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StartTile {
    /// No protection, the first cell may be a mine.
    Random,
    /// The first cell is never a mine.
    SimpleSafe,
    /// The first cell and all its neighbors are mine-free, so it opens a region.
    #[default]
    AlwaysZero,
}

impl StartTile {
    /// Downgrades the policy until `mines` fit on the board.
    pub fn fit(self, mines: CellCount, total_cells: CellCount, start_area: CellCount) -> Self {
        use StartTile::*;

        match self {
            Random => Random,
            SimpleSafe | AlwaysZero if mines + 1 > total_cells => {
                log::warn!("Cannot make start tile safe, fallback to random");
                Random
            }
            SimpleSafe => SimpleSafe,
            AlwaysZero if mines + start_area > total_cells => {
                log::warn!("Cannot make start tile zero, fallback to simple safe");
                SimpleSafe
            }
            AlwaysZero => AlwaysZero,
        }
    }
}
