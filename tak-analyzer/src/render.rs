//! Plain-text rendering of boards and game summaries.

use std::fmt::Write;

use tak_core::{Board, Color, Piece, Stack, Stone};

use crate::ptn::GameRecord;

fn stone_text(stone: &Stone) -> String {
    let prefix = match stone.piece {
        Piece::Flat => "",
        Piece::Wall => "S",
        Piece::Cap => "C",
    };
    let color = match stone.color {
        Color::White => "w",
        Color::Black => "b",
    };
    format!("{}{}", prefix, color)
}

fn stack_text(stack: &Stack) -> String {
    if stack.is_empty() {
        return ".".to_string();
    }
    stack.stones().iter().map(stone_text).collect()
}

/// One line per row, highest row first; stacks read bottom to top.
///
/// ```text
/// [.|.|.]
/// [.|Sb|.]
/// [wb|.|Cw]
/// ```
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    let spaces: Vec<_> = board.spaces().collect();
    for row in spaces.chunks(board.size() as usize).rev() {
        let cells: Vec<String> = row
            .iter()
            .filter_map(|&space| board.get(space))
            .map(stack_text)
            .collect();
        let _ = writeln!(out, "[{}]", cells.join("|"));
    }
    out
}

/// One-line header for a game: players, size, date and result.
pub fn describe_game(record: &GameRecord) -> String {
    let mut out = String::from("Tak game");
    let white = record.white.as_deref().unwrap_or("?");
    let black = record.black.as_deref().unwrap_or("?");
    let _ = write!(out, " - {} (white) vs {} (black)", white, black);
    if let Some(size) = record.size {
        let _ = write!(out, " - {}x{}", size, size);
    }
    if let Some(site) = &record.site {
        let _ = write!(out, " - {}", site);
    }
    if let Some(date) = record.date {
        let _ = write!(out, " on {}", date);
    }
    if let Some(result) = record.result {
        let _ = write!(out, " - {}", result);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tak_core::Space;

    #[test]
    fn test_render_empty() {
        let board = Board::new(3).unwrap();
        assert_eq!(render_board(&board), "[.|.|.]\n[.|.|.]\n[.|.|.]\n");
    }

    #[test]
    fn test_render_rows_top_down() {
        let mut board = Board::new(3).unwrap();
        let a1 = board.stack_mut(Space::new(0, 0)).unwrap();
        a1.push(Stone::new(Color::White, Piece::Flat));
        a1.push(Stone::new(Color::Black, Piece::Flat));
        board
            .stack_mut(Space::new(1, 1))
            .unwrap()
            .push(Stone::new(Color::Black, Piece::Wall));
        board
            .stack_mut(Space::new(0, 2))
            .unwrap()
            .push(Stone::new(Color::White, Piece::Cap));

        assert_eq!(render_board(&board), "[.|.|.]\n[.|Sb|.]\n[wb|.|Cw]\n");
    }

    #[test]
    fn test_describe_game() {
        let record = crate::ptn::parse_game(
            "[Player1 \"alice\"]\n[Player2 \"bob\"]\n[Size \"5\"]\n[Result \"0-R\"]\n",
        )
        .unwrap();
        assert_eq!(
            describe_game(&record),
            "Tak game - alice (white) vs bob (black) - 5x5 - black wins by road"
        );
    }
}
