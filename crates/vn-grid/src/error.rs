//! Grid-subsystem error types.

use thiserror::Error;

use vn_core::Coord;

/// A single cell fetch failed.
///
/// Unloaded terrain is the expected steady state of an infinite world, so
/// this error never escapes a search: callers treat the cell as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("cell {0} is in an unloaded chunk")]
    Unloaded(Coord),

    #[error("cell {0} is outside the world bounds")]
    OutOfWorld(Coord),
}

impl LookupError {
    pub fn coord(self) -> Coord {
        match self {
            LookupError::Unloaded(c) | LookupError::OutOfWorld(c) => c,
        }
    }
}

/// Errors produced while building fixture grids.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
