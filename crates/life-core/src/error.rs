//! Error types for the simulation.

use crate::types::Cell;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid coordinate: {cell} is outside the {rows}x{cols} grid")]
    InvalidCoordinate { cell: Cell, rows: i32, cols: i32 },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Render error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
