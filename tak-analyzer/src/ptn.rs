//! PTN (Portable Tak Notation) reader.
//!
//! ```text
//! [Site "PlayTak.com"]
//! [Date "2016.5.11"]
//! [Player1 "alice"]        white
//! [Player2 "bob"]          black
//! [Size "5"]
//! [Result "R-0"]
//!
//! 1. a1 e5                 opening: each side places an opponent flat
//! 2. Cc3 4c1+112           [picks][S|C]<file><row>[+-><][drops]
//! ```
//!
//! Parsing yields the turns in order; [`GameRecord::replay`] plays them
//! into a [`GameState`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;
use thiserror::Error;

use tak_core::{Color, Direction, GameState, Piece, Space, TakError, Turn};

#[derive(Debug, Error)]
pub enum PtnError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<PtnError>,
    },

    #[error("malformed header: {0}")]
    BadHeader(String),

    #[error("malformed date: {0}")]
    BadDate(String),

    #[error("malformed result: {0}")]
    BadResult(String),

    #[error("malformed move number: {0}")]
    BadMoveNumber(String),

    #[error("malformed square in move: {0}")]
    BadSquare(String),

    #[error("unknown direction symbol: {0}")]
    BadDirection(char),

    #[error("malformed move: {0}")]
    BadMove(String),

    #[error("move {text} lifts {picks} stones but drops {dropped}")]
    DropMismatch { text: String, picks: u8, dropped: u32 },

    #[error("moves appear before the Size header")]
    MissingSize,

    #[error("ply {ply} ({turn}): {source}")]
    Replay {
        ply: usize,
        turn: String,
        #[source]
        source: TakError,
    },

    #[error(transparent)]
    Rules(#[from] TakError),
}

/// Calendar date from the Date header.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.year, self.month, self.day)
    }
}

/// How a finished game was won.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WinCondition {
    Road,
    Flat,
    /// Time, resignation or anything else scored as `1`.
    Other,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win { winner: Color, condition: WinCondition },
    Draw,
}

impl GameResult {
    /// Parse a result code such as `R-0`, `0-F`, `1-0` or `1/2-1/2`.
    pub fn parse(text: &str) -> Result<GameResult, PtnError> {
        let bad = || PtnError::BadResult(text.to_string());
        let (white, black) = text.split_once('-').ok_or_else(bad)?;
        if white == "1/2" && black == "1/2" {
            return Ok(GameResult::Draw);
        }
        let (winner, code) = match (white, black) {
            (code, "0") if code != "0" => (Color::White, code),
            ("0", code) if code != "0" => (Color::Black, code),
            _ => return Err(bad()),
        };
        let condition = match code {
            "R" => WinCondition::Road,
            "F" => WinCondition::Flat,
            "1" => WinCondition::Other,
            _ => return Err(bad()),
        };
        Ok(GameResult::Win { winner, condition })
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Draw => f.write_str("draw"),
            GameResult::Win { winner, condition } => {
                let how = match condition {
                    WinCondition::Road => "road",
                    WinCondition::Flat => "flats",
                    WinCondition::Other => "time/resignation",
                };
                write!(f, "{} wins by {}", winner, how)
            }
        }
    }
}

/// A parsed PTN game: headers plus the turns in play order.
#[derive(Clone, Debug, Default, Serialize)]
pub struct GameRecord {
    pub site: Option<String>,
    pub date: Option<Date>,
    /// Player1.
    pub white: Option<String>,
    /// Player2.
    pub black: Option<String>,
    pub size: Option<u8>,
    pub result: Option<GameResult>,
    pub turns: Vec<Turn>,
}

impl GameRecord {
    /// Number of plies recorded.
    pub fn plies(&self) -> usize {
        self.turns.len()
    }

    /// Play the first `plies` turns (all of them if None) from an empty board.
    pub fn replay(&self, plies: Option<usize>) -> Result<GameState, PtnError> {
        let size = self.size.ok_or(PtnError::MissingSize)?;
        let mut state = GameState::new(size)?;
        let limit = plies.unwrap_or(self.turns.len()).min(self.turns.len());
        for (ply, turn) in self.turns[..limit].iter().enumerate() {
            play(&mut state, ply, turn)?;
        }
        Ok(state)
    }

    /// The state before the first turn and after each one.
    pub fn positions(&self) -> Result<Vec<GameState>, PtnError> {
        let size = self.size.ok_or(PtnError::MissingSize)?;
        let mut state = GameState::new(size)?;
        let mut positions = Vec::with_capacity(self.turns.len() + 1);
        positions.push(state.clone());
        for (ply, turn) in self.turns.iter().enumerate() {
            play(&mut state, ply, turn)?;
            positions.push(state.clone());
        }
        Ok(positions)
    }
}

fn play(state: &mut GameState, ply: usize, turn: &Turn) -> Result<(), PtnError> {
    state.play(turn.clone()).map_err(|source| PtnError::Replay {
        ply: ply + 1,
        turn: format_turn(turn),
        source,
    })
}

/// Read and parse a PTN file.
pub fn read_game(path: &Path) -> Result<GameRecord, PtnError> {
    let text = fs::read_to_string(path).map_err(|source| PtnError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_game(&text)
}

/// Parse PTN text.
pub fn parse_game(text: &str) -> Result<GameRecord, PtnError> {
    let mut record = GameRecord::default();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let parsed = if line.starts_with('[') {
            parse_header(&mut record, line)
        } else if line.starts_with(|c: char| c.is_ascii_digit()) {
            parse_turn_line(&mut record, line)
        } else {
            Ok(())
        };
        parsed.map_err(|source| PtnError::Line {
            line: idx + 1,
            source: Box::new(source),
        })?;
    }

    debug!("parsed {} plies on a {:?} board", record.turns.len(), record.size);
    Ok(record)
}

fn parse_header(record: &mut GameRecord, line: &str) -> Result<(), PtnError> {
    let bad = || PtnError::BadHeader(line.to_string());
    let inner = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(bad)?;
    let (key, value) = inner.split_once(char::is_whitespace).ok_or_else(bad)?;
    let value = value.trim().trim_matches('"');

    match key {
        "Site" => record.site = Some(value.to_string()),
        "Date" => record.date = Some(parse_date(value)?),
        "Player1" => record.white = Some(value.to_string()),
        "Player2" => record.black = Some(value.to_string()),
        "Size" => {
            let size: u8 = value.parse().map_err(|_| bad())?;
            // Validates the size against the reserve table
            tak_core::Reserves::for_size(size)?;
            record.size = Some(size);
        }
        "Result" if !value.is_empty() => record.result = Some(GameResult::parse(value)?),
        _ => {}
    }
    Ok(())
}

fn parse_date(value: &str) -> Result<Date, PtnError> {
    let bad = || PtnError::BadDate(value.to_string());
    let mut parts = value.split('.');
    let mut next = || parts.next().ok_or_else(bad);
    let year = next()?.parse().map_err(|_| bad())?;
    let month = next()?.parse().map_err(|_| bad())?;
    let day = next()?.parse().map_err(|_| bad())?;
    Ok(Date { year, month, day })
}

/// `15. c3< Cc3` - white's move then black's, except on move 1 where
/// each side places the other's stone.
fn parse_turn_line(record: &mut GameRecord, line: &str) -> Result<(), PtnError> {
    if record.size.is_none() {
        return Err(PtnError::MissingSize);
    }
    let (number, rest) = line
        .split_once('.')
        .ok_or_else(|| PtnError::BadMoveNumber(line.to_string()))?;
    let number: usize = number
        .trim()
        .parse()
        .map_err(|_| PtnError::BadMoveNumber(line.to_string()))?;

    let colors = if number == 1 {
        [Color::Black, Color::White]
    } else {
        [Color::White, Color::Black]
    };

    let moves = rest
        .split_whitespace()
        .filter(|token| GameResult::parse(token).is_err())
        .take(2);
    for (token, color) in moves.zip(colors) {
        record.turns.push(parse_turn(token, color)?);
    }
    Ok(())
}

/// Parse one move token, e.g. `a1`, `Sb2`, `c3<`, `4c1+112`.
pub fn parse_turn(text: &str, color: Color) -> Result<Turn, PtnError> {
    let token = text.trim_end_matches(['\'', '"', '!', '?']);
    let mut chars = token.chars().peekable();

    let picks = match chars.peek() {
        Some(c) if c.is_ascii_digit() => {
            let digit = c.to_digit(10).unwrap_or(0) as u8;
            chars.next();
            Some(digit)
        }
        _ => None,
    };

    let piece = match chars.peek() {
        Some('C') => Some(Piece::Cap),
        Some('S') => Some(Piece::Wall),
        Some('F') => Some(Piece::Flat),
        _ => None,
    };
    if piece.is_some() {
        chars.next();
    }

    let file = chars
        .next()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| ('a'..='h').contains(c))
        .ok_or_else(|| PtnError::BadSquare(text.to_string()))?;
    let row = chars
        .next()
        .and_then(|c| c.to_digit(10))
        .filter(|&d| (1..=8).contains(&d))
        .ok_or_else(|| PtnError::BadSquare(text.to_string()))?;
    let space = Space::new(row as u8 - 1, file as u8 - b'a');

    let Some(symbol) = chars.next() else {
        if picks.is_some() {
            return Err(PtnError::BadMove(text.to_string()));
        }
        return Ok(Turn::place(color, space, piece.unwrap_or(Piece::Flat)));
    };

    if piece.is_some() {
        return Err(PtnError::BadMove(text.to_string()));
    }
    let direction = parse_direction(symbol)?;

    let mut drops = Vec::new();
    for c in chars {
        let digit = c.to_digit(10).ok_or_else(|| PtnError::BadMove(text.to_string()))?;
        drops.push(digit as u8);
    }
    if drops.is_empty() {
        drops.push(picks.unwrap_or(1));
    }
    if let Some(picks) = picks {
        let dropped: u32 = drops.iter().map(|&d| d as u32).sum();
        if dropped != picks as u32 {
            return Err(PtnError::DropMismatch {
                text: text.to_string(),
                picks,
                dropped,
            });
        }
    }

    Ok(Turn::movement(color, space, direction, drops)?)
}

fn parse_direction(symbol: char) -> Result<Direction, PtnError> {
    match symbol {
        '+' => Ok(Direction::Up),
        '-' => Ok(Direction::Down),
        '>' => Ok(Direction::Right),
        '<' => Ok(Direction::Left),
        other => Err(PtnError::BadDirection(other)),
    }
}

fn direction_symbol(direction: Direction) -> char {
    match direction {
        Direction::Up => '+',
        Direction::Down => '-',
        Direction::Right => '>',
        Direction::Left => '<',
    }
}

/// Square name, e.g. `c3`.
pub fn format_space(space: Space) -> String {
    format!("{}{}", (b'a' + space.file) as char, space.row + 1)
}

/// PTN text for a turn. The color is not part of the notation.
pub fn format_turn(turn: &Turn) -> String {
    match turn {
        Turn::Place { space, piece, .. } => {
            let prefix = match piece {
                Piece::Flat => "",
                Piece::Wall => "S",
                Piece::Cap => "C",
            };
            format!("{}{}", prefix, format_space(*space))
        }
        Turn::Move {
            space,
            direction,
            drops,
            ..
        } => {
            let mut text = String::new();
            if drops.picks() > 1 {
                text.push_str(&drops.picks().to_string());
            }
            text.push_str(&format_space(*space));
            text.push(direction_symbol(*direction));
            if drops.len() > 1 {
                for count in drops.iter() {
                    text.push_str(&count.to_string());
                }
            }
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Turns ==========

    #[test]
    fn test_parse_placements() {
        assert_eq!(
            parse_turn("a1", Color::White).unwrap(),
            Turn::flat(Color::White, Space::new(0, 0))
        );
        assert_eq!(
            parse_turn("Sb2", Color::Black).unwrap(),
            Turn::place(Color::Black, Space::new(1, 1), Piece::Wall)
        );
        assert_eq!(
            parse_turn("Ce5", Color::White).unwrap(),
            Turn::place(Color::White, Space::new(4, 4), Piece::Cap)
        );
    }

    #[test]
    fn test_parse_movements() {
        assert_eq!(
            parse_turn("c3<", Color::White).unwrap(),
            Turn::movement(Color::White, Space::new(2, 2), Direction::Left, vec![1]).unwrap()
        );
        assert_eq!(
            parse_turn("3d2-", Color::Black).unwrap(),
            Turn::movement(Color::Black, Space::new(1, 3), Direction::Down, vec![3]).unwrap()
        );
        assert_eq!(
            parse_turn("4c1+112", Color::White).unwrap(),
            Turn::movement(Color::White, Space::new(0, 2), Direction::Up, vec![1, 1, 2]).unwrap()
        );
    }

    #[test]
    fn test_parse_strips_annotations() {
        assert_eq!(
            parse_turn("a3'", Color::White).unwrap(),
            Turn::flat(Color::White, Space::new(2, 0))
        );
        assert!(parse_turn("2b2>11!?", Color::White).is_ok());
    }

    #[test]
    fn test_parse_rejects_bad_moves() {
        assert!(matches!(parse_turn("z1", Color::White), Err(PtnError::BadSquare(_))));
        assert!(matches!(parse_turn("a9", Color::White), Err(PtnError::BadSquare(_))));
        assert!(matches!(parse_turn("a1*", Color::White), Err(PtnError::BadDirection('*'))));
        assert!(matches!(
            parse_turn("3a1>11", Color::White),
            Err(PtnError::DropMismatch { picks: 3, dropped: 2, .. })
        ));
        assert!(matches!(parse_turn("Sa1>", Color::White), Err(PtnError::BadMove(_))));
        assert!(matches!(
            parse_turn("2a1>20", Color::White),
            Err(PtnError::Rules(TakError::ZeroDrop))
        ));
    }

    #[test]
    fn test_format_turns() {
        for text in ["a1", "Sb2", "Ce5", "c3<", "3d2-", "4c1+112", "2h8>11"] {
            let turn = parse_turn(text, Color::White).unwrap();
            assert_eq!(format_turn(&turn), text);
        }
    }

    // ========== Headers ==========

    #[test]
    fn test_results() {
        assert_eq!(
            GameResult::parse("R-0").unwrap(),
            GameResult::Win {
                winner: Color::White,
                condition: WinCondition::Road
            }
        );
        assert_eq!(
            GameResult::parse("0-F").unwrap(),
            GameResult::Win {
                winner: Color::Black,
                condition: WinCondition::Flat
            }
        );
        assert_eq!(
            GameResult::parse("1-0").unwrap(),
            GameResult::Win {
                winner: Color::White,
                condition: WinCondition::Other
            }
        );
        assert_eq!(GameResult::parse("1/2-1/2").unwrap(), GameResult::Draw);
        assert!(GameResult::parse("0-0").is_err());
        assert!(GameResult::parse("c3").is_err());
    }

    #[test]
    fn test_headers() {
        let text = "[Site \"PlayTak.com\"]\n[Date \"2016.5.11\"]\n[Player1 \"alice\"]\n[Player2 \"bob\"]\n[Size \"6\"]\n[Result \"\"]\n";
        let record = parse_game(text).unwrap();
        assert_eq!(record.site.as_deref(), Some("PlayTak.com"));
        assert_eq!(
            record.date,
            Some(Date {
                year: 2016,
                month: 5,
                day: 11
            })
        );
        assert_eq!(record.white.as_deref(), Some("alice"));
        assert_eq!(record.black.as_deref(), Some("bob"));
        assert_eq!(record.size, Some(6));
        assert_eq!(record.result, None);
    }

    #[test]
    fn test_unsupported_size() {
        let err = parse_game("[Size \"9\"]\n").unwrap_err();
        assert!(matches!(
            err,
            PtnError::Line { line: 1, ref source } if matches!(**source, PtnError::Rules(TakError::UnsupportedSize(9)))
        ));
    }

    #[test]
    fn test_moves_before_size() {
        let err = parse_game("1. a1 e5\n").unwrap_err();
        assert!(matches!(
            err,
            PtnError::Line { line: 1, ref source } if matches!(**source, PtnError::MissingSize)
        ));
    }

    // ========== Move lines ==========

    #[test]
    fn test_opening_colors() {
        let record = parse_game("[Size \"5\"]\n1. a1 e5\n2. c3 d4\n").unwrap();
        let colors: Vec<Color> = record.turns.iter().map(Turn::color).collect();
        assert_eq!(colors, vec![Color::Black, Color::White, Color::White, Color::Black]);
    }

    #[test]
    fn test_trailing_result_token() {
        let record = parse_game("[Size \"3\"]\n1. a1 c3\n2. b1 R-0\n").unwrap();
        assert_eq!(record.plies(), 3);
    }

    #[test]
    fn test_replay_opening_spends_opponent_reserves() {
        let record = parse_game("[Size \"5\"]\n1. a1 e5\n").unwrap();
        let state = record.replay(None).unwrap();
        let a1 = state.board().stack(Space::new(0, 0)).unwrap();
        assert_eq!(a1.top_color(), Some(Color::Black));
        assert_eq!(state.reserves(Color::Black).flats, 20);
        assert_eq!(state.reserves(Color::White).flats, 20);
        assert!(!state.is_first_ply());
    }

    #[test]
    fn test_replay_reports_ply() {
        // Third ply lifts from the empty b2
        let record = parse_game("[Size \"3\"]\n1. a1 c3\n2. b2+ a1\n").unwrap();
        let err = record.replay(None).unwrap_err();
        assert!(matches!(err, PtnError::Replay { ply: 3, .. }));
    }
}
