use std::io;

use thiserror::Error;

/// Configuration problems rejected before a session starts.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SetupError {
    /// The ring must be able to hold a body covering every grid cell.
    #[error("body ring capacity {capacity} does not exceed grid cell count {cells}")]
    CapacityTooSmall { capacity: usize, cells: usize },

    /// The grid must fit the starting body plus at least one fruit cell.
    #[error("grid with {cells} cells cannot hold the starting body and a fruit")]
    GridTooSmall { cells: usize },

    /// The starting body would not fit inside the grid bounds.
    #[error("starting body does not fit inside the grid bounds")]
    StartOutOfBounds,
}

/// Signals that no unoccupied cell is left for fruit placement.
///
/// Not a defect: the body covers the whole board, which ends the session as
/// a win rather than a game over.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("no free cells left on the board")]
pub struct BoardFull;

/// Top-level errors surfaced by the terminal frontend.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("unknown theme {0:?}")]
    UnknownTheme(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::SetupError;

    #[test]
    fn setup_errors_render_useful_messages() {
        let message = SetupError::CapacityTooSmall {
            capacity: 16,
            cells: 630,
        }
        .to_string();

        assert!(message.contains("16"));
        assert!(message.contains("630"));
    }
}
