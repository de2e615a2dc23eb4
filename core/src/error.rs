use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid shape does not match the 3x3 board")]
    InvalidShape,
}

pub type Result<T> = core::result::Result<T, GridError>;
