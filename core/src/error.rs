use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid side length must be at least 1")]
    InvalidSideLength,
    #[error("Flash interval must be longer than zero")]
    ZeroFlashInterval,
}

pub type Result<T> = core::result::Result<T, GameError>;
