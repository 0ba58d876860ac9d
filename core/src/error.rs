use thiserror::Error;

use crate::{CellCount, Coord, Coord2, GameConfig};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: a {rows}x{cols} board cannot hold {mines} mines")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    #[error("Coordinates {coords:?} are outside a board of size {size:?}")]
    OutOfBounds { coords: Coord2, size: Coord2 },
    #[error("Generated layout {actual:?} does not match the requested {expected:?}")]
    LayoutMismatch {
        expected: GameConfig,
        actual: GameConfig,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
