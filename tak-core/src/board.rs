//! Board and stack representation, and move application.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{Color, Piece, Space, Stone, TakError, Turn, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// The stones on one square, bottom first.
#[derive(Clone, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Stack {
    stones: Vec<Stone>,
}

impl Stack {
    pub fn new() -> Stack {
        Stack { stones: Vec::new() }
    }

    pub fn from_stones(stones: Vec<Stone>) -> Stack {
        Stack { stones }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.stones.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn stones(&self) -> &[Stone] {
        &self.stones
    }

    /// The visible stone.
    #[inline]
    pub fn top(&self) -> Option<Stone> {
        self.stones.last().copied()
    }

    /// Controlling color, if any.
    #[inline]
    pub fn top_color(&self) -> Option<Color> {
        self.top().map(|stone| stone.color)
    }

    #[inline]
    pub fn top_piece(&self) -> Option<Piece> {
        self.top().map(|stone| stone.piece)
    }

    /// Push a stone onto the top.
    /// Does NOT validate - callers decide whether stacking is legal.
    #[inline]
    pub fn push(&mut self, stone: Stone) {
        self.stones.push(stone);
    }

    /// Lift the top `count` stones, preserving their order.
    /// Lifts the whole stack if `count` exceeds the height.
    pub fn take(&mut self, count: usize) -> Vec<Stone> {
        let count = count.min(self.stones.len());
        let split = self.stones.len() - count;
        self.stones.split_off(split)
    }

    /// Turn a wall on top into a flat of the same color.
    /// Returns true if a wall was flattened.
    pub fn flatten_top(&mut self) -> bool {
        match self.stones.last_mut() {
            Some(stone) if stone.piece == Piece::Wall => {
                stone.piece = Piece::Flat;
                true
            }
            _ => false,
        }
    }
}

/// An N x N grid of stacks, stored row-major.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    size: u8,
    cells: Vec<Stack>,
}

/// Unchecked serialized form of [`Board`].
#[derive(Deserialize)]
struct BoardData {
    size: u8,
    cells: Vec<Stack>,
}

impl TryFrom<BoardData> for Board {
    type Error = TakError;

    /// Size must be supported and the cell count must be size * size.
    fn try_from(data: BoardData) -> Result<Board, TakError> {
        let mut board = Board::new(data.size)?;
        if data.cells.len() != board.cells.len() {
            return Err(TakError::CellCount {
                size: data.size,
                expected: board.cells.len(),
                found: data.cells.len(),
            });
        }
        board.cells = data.cells;
        Ok(board)
    }
}

impl Board {
    /// Create an empty board. Sizes outside 3..=8 are rejected.
    pub fn new(size: u8) -> Result<Board, TakError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(TakError::UnsupportedSize(size));
        }
        let cells = vec![Stack::new(); size as usize * size as usize];
        Ok(Board { size, cells })
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Number of squares (N * N).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Row-major cell index. Caller must ensure the space is on the board.
    #[inline]
    pub(crate) fn index(&self, space: Space) -> usize {
        debug_assert!(space.is_within(self.size));
        space.row as usize * self.size as usize + space.file as usize
    }

    fn check(&self, space: Space) -> Result<usize, TakError> {
        if space.is_within(self.size) {
            Ok(self.index(space))
        } else {
            Err(TakError::OutOfBounds {
                space,
                size: self.size,
            })
        }
    }

    /// Stack at a space, or None if the space is off the board.
    #[inline]
    pub fn get(&self, space: Space) -> Option<&Stack> {
        if space.is_within(self.size) {
            Some(&self.cells[self.index(space)])
        } else {
            None
        }
    }

    /// Stack at a space; off-board spaces are an error.
    pub fn stack(&self, space: Space) -> Result<&Stack, TakError> {
        let idx = self.check(space)?;
        Ok(&self.cells[idx])
    }

    pub fn stack_mut(&mut self, space: Space) -> Result<&mut Stack, TakError> {
        let idx = self.check(space)?;
        Ok(&mut self.cells[idx])
    }

    /// Iterate over all spaces in row-major order.
    pub fn spaces(&self) -> impl Iterator<Item = Space> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |file| Space::new(row, file)))
    }

    /// Iterate over (space, stack) pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Space, &Stack)> + '_ {
        self.spaces().zip(self.cells.iter())
    }

    /// Total stones on the board.
    pub fn stone_count(&self) -> usize {
        self.cells.iter().map(Stack::height).sum()
    }

    // ========== Move Application ==========

    /// Apply a turn to the board.
    ///
    /// Legality is the move generator's job: placing onto an occupied square
    /// or moving a stack you don't control is applied as given. What is
    /// checked is board shape - every square the turn touches must exist and
    /// a movement must have stones to lift. Those checks happen before any
    /// stone moves, so an `Err` leaves the board untouched.
    ///
    /// Lifting more stones than the source holds lifts the whole stack; the
    /// later drops then receive whatever is left.
    pub fn apply(&mut self, turn: &Turn) -> Result<(), TakError> {
        match turn {
            Turn::Place { color, space, piece } => {
                self.stack_mut(*space)?.push(Stone::new(*color, *piece));
            }
            Turn::Move {
                space,
                direction,
                drops,
                ..
            } => {
                let source = self.check(*space)?;
                let mut path = Vec::with_capacity(drops.len());
                for step in 1..=drops.len() {
                    let dest = space.offset(*direction, step, self.size).ok_or(TakError::PathOffBoard {
                        space: *space,
                        direction: *direction,
                        steps: step,
                        size: self.size,
                    })?;
                    path.push(self.index(dest));
                }

                let height = self.cells[source].height();
                if height == 0 {
                    return Err(TakError::EmptySource(*space));
                }
                let picks = drops.picks();
                if picks > height {
                    warn!("lifting {} stones from {} which holds {}; lifting all", picks, space, height);
                }

                let mut lifted = self.cells[source].take(picks).into_iter();
                for (idx, count) in path.into_iter().zip(drops.iter()) {
                    let stack = &mut self.cells[idx];
                    // Flatten before the new stones cover it
                    stack.flatten_top();
                    stack.stones.extend(lifted.by_ref().take(count as usize));
                }
            }
        }
        Ok(())
    }
}
