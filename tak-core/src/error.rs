//! Error type shared by the rules engine.

use thiserror::Error;

use crate::{Color, Direction, Space};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TakError {
    #[error("space {space} is outside a {size}x{size} board")]
    OutOfBounds { space: Space, size: u8 },

    #[error("moving {direction:?} {steps} square(s) from {space} leaves a {size}x{size} board")]
    PathOffBoard {
        space: Space,
        direction: Direction,
        steps: usize,
        size: u8,
    },

    #[error("unsupported board size {0} (expected 3-8)")]
    UnsupportedSize(u8),

    #[error("drop sequence is empty")]
    EmptyDrops,

    #[error("drop sequence contains a zero count")]
    ZeroDrop,

    #[error("a {size}x{size} board needs {expected} cells, found {found}")]
    CellCount { size: u8, expected: usize, found: usize },

    #[error("no stones to lift at {0}")]
    EmptySource(Space),

    #[error("{color} has no {piece} left in reserve")]
    ReserveExhausted { color: Color, piece: &'static str },
}
