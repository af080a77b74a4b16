//! Tak rules engine: board state, legal-move generation and road/Tak detection.
//!
//! # Coordinates
//!
//! ```text
//! Space { row, file }, both 0-indexed, row-major cell order.
//!
//!   row N-1   . . . .      Up    = row + 1
//!   ...       . . . .      Down  = row - 1
//!   row 0     . . . .      Right = file + 1
//!           file 0 .. N-1  Left  = file - 1
//! ```
//!
//! Rows correspond to PTN rank digits and files to PTN letters, so `c1+`
//! moves from `Space { row: 0, file: 2 }` towards row 1.
//!
//! # Stacks
//!
//! ```text
//! stones[0]          bottom (oldest)
//! stones[height - 1] top (newest, decides color/blocking/road membership)
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

pub mod board;
pub mod drops;
pub mod error;
pub mod flats;
pub mod game;
pub mod movegen;
pub mod roads;
pub mod tak;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use board::{Board, Stack};
pub use drops::{drop_sequences, Drops};
pub use error::TakError;
pub use flats::count_flats;
pub use game::{GameState, Reserves};
pub use movegen::generate_moves;
pub use roads::{check_roads, road_groups, Group};
pub use tak::{block_tak, check_tak, road_threats, TakReport, Threats};

#[cfg(feature = "parallel")]
pub use tak::check_tak_par;

/// Smallest supported board.
pub const MIN_BOARD_SIZE: u8 = 3;
/// Largest supported board (PTN files run a..h).
pub const MAX_BOARD_SIZE: u8 = 8;

/// Player color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors, white first.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Get the other color.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Piece kind.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    Flat,
    /// Standing stone.
    Wall,
    Cap,
}

impl Piece {
    /// Whether a stack topped by this piece can be part of a road.
    #[inline]
    pub fn is_road(self) -> bool {
        self != Piece::Wall
    }

    pub fn name(self) -> &'static str {
        match self {
            Piece::Flat => "flat",
            Piece::Wall => "wall",
            Piece::Cap => "cap",
        }
    }
}

/// A single stone on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Stone {
    pub color: Color,
    pub piece: Piece,
}

impl Stone {
    #[inline]
    pub fn new(color: Color, piece: Piece) -> Stone {
        Stone { color, piece }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.piece.name())
    }
}

/// Movement direction.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Right,
    Left,
}

impl Direction {
    /// Generation order for movements.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Right, Direction::Left];

    /// Unit offset as (row delta, file delta).
    #[inline]
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Right => "right",
            Direction::Left => "left",
        }
    }
}

/// A square on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Space {
    pub row: u8,
    pub file: u8,
}

impl Space {
    #[inline]
    pub fn new(row: u8, file: u8) -> Space {
        Space { row, file }
    }

    /// Whether this space lies on a board of the given size.
    #[inline]
    pub fn is_within(self, size: u8) -> bool {
        self.row < size && self.file < size
    }

    /// The space `steps` squares away in `direction`, or None if that leaves the board.
    pub fn offset(self, direction: Direction, steps: usize, size: u8) -> Option<Space> {
        let (dr, df) = direction.delta();
        let row = self.row as i64 + dr as i64 * steps as i64;
        let file = self.file as i64 + df as i64 * steps as i64;
        if row < 0 || file < 0 || row >= size as i64 || file >= size as i64 {
            return None;
        }
        Some(Space::new(row as u8, file as u8))
    }

    /// Orthogonal neighbours that are on the board.
    pub fn neighbours(self, size: u8) -> impl Iterator<Item = Space> {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.offset(direction, 1, size))
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.file)
    }
}

/// One value per color.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct PerColor<T> {
    pub white: T,
    pub black: T,
}

impl<T> PerColor<T> {
    pub fn new(white: T, black: T) -> PerColor<T> {
        PerColor { white, black }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerColor<U> {
        PerColor {
            white: f(self.white),
            black: f(self.black),
        }
    }
}

impl<T> Index<Color> for PerColor<T> {
    type Output = T;

    fn index(&self, color: Color) -> &T {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

impl<T> IndexMut<Color> for PerColor<T> {
    fn index_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}

/// A single ply.
///
/// Movements carry a validated [`Drops`], so a Movement with an empty or
/// zero-containing drop sequence cannot be built.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Turn {
    /// Place a stone from reserves onto an empty square.
    Place { color: Color, space: Space, piece: Piece },
    /// Lift `drops.picks()` stones from `space` and spread them along `direction`.
    Move {
        color: Color,
        space: Space,
        direction: Direction,
        drops: Drops,
    },
}

impl Turn {
    pub fn place(color: Color, space: Space, piece: Piece) -> Turn {
        Turn::Place { color, space, piece }
    }

    /// Flat placement, the default piece kind.
    pub fn flat(color: Color, space: Space) -> Turn {
        Turn::place(color, space, Piece::Flat)
    }

    pub fn movement(
        color: Color,
        space: Space,
        direction: Direction,
        drops: Vec<u8>,
    ) -> Result<Turn, TakError> {
        Ok(Turn::Move {
            color,
            space,
            direction,
            drops: Drops::new(drops)?,
        })
    }

    #[inline]
    pub fn color(&self) -> Color {
        match self {
            Turn::Place { color, .. } | Turn::Move { color, .. } => *color,
        }
    }

    /// Target square for placements, source square for movements.
    #[inline]
    pub fn space(&self) -> Space {
        match self {
            Turn::Place { space, .. } | Turn::Move { space, .. } => *space,
        }
    }

    #[inline]
    pub fn is_move(&self) -> bool {
        matches!(self, Turn::Move { .. })
    }

    /// Number of stones lifted from the source square (0 for placements).
    pub fn picks(&self) -> usize {
        match self {
            Turn::Place { .. } => 0,
            Turn::Move { drops, .. } => drops.picks(),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Place { color, space, piece } => {
                write!(f, "{} {} {}", color, piece.name(), space)
            }
            Turn::Move {
                color,
                space,
                direction,
                drops,
            } => write!(
                f,
                "{} move {} from {}, move {} dropping: {:?}",
                color,
                drops.picks(),
                space,
                direction.name(),
                drops.as_slice()
            ),
        }
    }
}
