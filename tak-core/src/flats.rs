//! Flat count, the tiebreak score when the board fills or reserves run out.

use crate::{Board, PerColor, Piece};

/// Number of stacks topped by a flat, per color. Walls and capstones don't count.
pub fn count_flats(board: &Board) -> PerColor<u32> {
    let mut counts = PerColor::new(0, 0);
    for (_, stack) in board.iter() {
        if let Some(top) = stack.top() {
            if top.piece == Piece::Flat {
                counts[top.color] += 1;
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Space, Stone};

    #[test]
    fn test_empty_board() {
        assert_eq!(count_flats(&Board::new(6).unwrap()), PerColor::new(0, 0));
    }

    #[test]
    fn test_only_top_flats_count() {
        let mut board = Board::new(4).unwrap();
        let mut put = |row, file, color, piece| {
            board.stack_mut(Space::new(row, file)).unwrap().push(Stone::new(color, piece));
        };
        put(0, 0, Color::White, Piece::Flat);
        put(0, 1, Color::White, Piece::Wall);
        put(0, 2, Color::White, Piece::Cap);
        put(1, 0, Color::Black, Piece::Flat);
        put(1, 0, Color::White, Piece::Flat);
        put(2, 2, Color::White, Piece::Flat);
        put(2, 2, Color::Black, Piece::Flat);
        put(3, 3, Color::Black, Piece::Flat);

        assert_eq!(count_flats(&board), PerColor::new(2, 2));
    }
}
