use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board width and height must both be at least 1")]
    InvalidDimensions,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Mine layout does not match the configured mine count")]
    MineCountMismatch,
    #[error("Invalid coordinates")]
    InvalidCoords,
}

impl GameError {
    /// Errors that prevent a board or session from being built at all.
    pub const fn is_construction_error(self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions | Self::TooManyMines | Self::MineCountMismatch
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
