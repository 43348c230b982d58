use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Mine count is incompatible with the board size and safe zone")]
    InvalidConfiguration,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
    #[error("Mine placer did not pick the requested number of distinct cells")]
    PlacementMismatch,
}

pub type Result<T> = core::result::Result<T, GameError>;
