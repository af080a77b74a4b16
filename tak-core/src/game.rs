//! Game state: board, reserves and turn history.

use serde::{Deserialize, Serialize};

use crate::{movegen, Board, Color, PerColor, Piece, TakError, Turn, MIN_BOARD_SIZE};

/// Starting flats per board size, 3x3 first.
const FLATS_BY_SIZE: [u8; 6] = [10, 15, 21, 30, 40, 50];
/// Starting capstones per board size, 3x3 first.
const CAPS_BY_SIZE: [u8; 6] = [0, 0, 1, 1, 1, 2];

/// Unplaced stones remaining to one player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Reserves {
    /// Flats, also spent on walls.
    pub flats: u8,
    pub caps: u8,
}

impl Reserves {
    pub fn new(flats: u8, caps: u8) -> Reserves {
        Reserves { flats, caps }
    }

    /// Starting reserves for a board size.
    pub fn for_size(size: u8) -> Result<Reserves, TakError> {
        let idx = size
            .checked_sub(MIN_BOARD_SIZE)
            .map(usize::from)
            .filter(|&idx| idx < FLATS_BY_SIZE.len())
            .ok_or(TakError::UnsupportedSize(size))?;
        Ok(Reserves::new(FLATS_BY_SIZE[idx], CAPS_BY_SIZE[idx]))
    }

    /// Take one stone of the given kind out of reserve.
    fn spend(&mut self, color: Color, piece: Piece) -> Result<(), TakError> {
        let (count, name) = match piece {
            Piece::Cap => (&mut self.caps, "capstones"),
            Piece::Flat | Piece::Wall => (&mut self.flats, "flats"),
        };
        *count = count
            .checked_sub(1)
            .ok_or(TakError::ReserveExhausted { color, piece: name })?;
        Ok(())
    }
}

/// Everything needed to generate and evaluate moves.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    reserves: PerColor<Reserves>,
    history: Vec<Turn>,
}

impl GameState {
    /// Empty board with standard reserves for both players.
    pub fn new(size: u8) -> Result<GameState, TakError> {
        let reserves = Reserves::for_size(size)?;
        Ok(GameState {
            board: Board::new(size)?,
            reserves: PerColor::new(reserves, reserves),
            history: Vec::new(),
        })
    }

    /// Assemble a state from an already populated position.
    pub fn with_board(board: Board, white: Reserves, black: Reserves, history: Vec<Turn>) -> GameState {
        GameState {
            board,
            reserves: PerColor::new(white, black),
            history,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.board.size()
    }

    #[inline]
    pub fn reserves(&self, color: Color) -> Reserves {
        self.reserves[color]
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Number of plies played.
    #[inline]
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Color to move: white on even plies, black on odd.
    #[inline]
    pub fn next_color(&self) -> Color {
        if self.history.len() % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// True during each player's opening ply, when only flats may be placed.
    #[inline]
    pub fn is_first_ply(&self) -> bool {
        self.history.len() < 2
    }

    /// Legal moves for the color to move.
    pub fn legal_moves(&self) -> Vec<Turn> {
        movegen::generate_moves(self, self.next_color())
    }

    /// Whether `turn` is one of [`legal_moves`](Self::legal_moves), so
    /// owned by the side to move.
    pub fn is_legal(&self, turn: &Turn) -> bool {
        self.legal_moves().contains(turn)
    }

    /// Record a turn: spend reserves for placements, update the board, append to history.
    ///
    /// The turn is not checked for legality. Errors (exhausted reserve, squares
    /// off the board, empty source) are reported before anything changes.
    pub fn play(&mut self, turn: Turn) -> Result<(), TakError> {
        let mut reserves = self.reserves;
        if let Turn::Place { color, piece, .. } = &turn {
            reserves[*color].spend(*color, *piece)?;
        }
        self.board.apply(&turn)?;
        self.reserves = reserves;
        self.history.push(turn);
        Ok(())
    }
}
