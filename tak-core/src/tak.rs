//! Tak detection: one-ply search for road-completing moves.
//!
//! Every candidate move is played on its own clone of the board, so the
//! state being analysed is never modified.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{check_roads, generate_moves, Board, Color, GameState, PerColor, TakError, Turn};

/// Road-completing moves for one (mover, target) pair.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Threats {
    /// True if at least one move creates a road for the target color.
    pub road: bool,
    /// The moves that do, in generation order.
    pub turns: Vec<Turn>,
}

impl Threats {
    fn push(&mut self, turn: Turn) {
        self.road = true;
        self.turns.push(turn);
    }
}

/// Threats indexed by mover color, then by the color whose road is completed.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct TakReport {
    pub movers: PerColor<PerColor<Threats>>,
}

impl TakReport {
    /// Moves by `mover` that would complete a road for `target`.
    pub fn threats(&self, mover: Color, target: Color) -> &Threats {
        &self.movers[mover][target]
    }

    /// Whether `mover` has any move completing a road for `target`.
    pub fn is_tak(&self, mover: Color, target: Color) -> bool {
        self.movers[mover][target].road
    }

    fn record(&mut self, mover: Color, turn: &Turn, roads: PerColor<bool>) {
        for target in Color::ALL {
            if roads[target] {
                trace!("{} completes a {} road", turn, target);
                self.movers[mover][target].push(turn.clone());
            }
        }
    }
}

/// Play `turn` on a private copy of `board` and report the resulting roads.
fn simulate(board: &Board, turn: &Turn) -> Result<PerColor<bool>, TakError> {
    let mut scratch = board.clone();
    scratch.apply(turn)?;
    Ok(check_roads(&scratch))
}

/// For each mover color, every legal move that would leave either color with a road.
pub fn check_tak(state: &GameState) -> Result<TakReport, TakError> {
    let mut report = TakReport::default();

    for mover in Color::ALL {
        let turns = generate_moves(state, mover);
        for turn in &turns {
            let roads = simulate(state.board(), turn)?;
            report.record(mover, turn, roads);
        }
        debug!(
            "check_tak: {} examined {} moves ({} white roads, {} black roads)",
            mover,
            turns.len(),
            report.threats(mover, Color::White).turns.len(),
            report.threats(mover, Color::Black).turns.len()
        );
    }

    Ok(report)
}

/// Same result as [`check_tak`], with the simulations spread over rayon's pool.
#[cfg(feature = "parallel")]
pub fn check_tak_par(state: &GameState) -> Result<TakReport, TakError> {
    use rayon::prelude::*;

    let mut report = TakReport::default();

    for mover in Color::ALL {
        let turns = generate_moves(state, mover);
        let outcomes: Vec<PerColor<bool>> = turns
            .par_iter()
            .map(|turn| simulate(state.board(), turn))
            .collect::<Result<_, _>>()?;
        for (turn, roads) in turns.iter().zip(outcomes) {
            report.record(mover, turn, roads);
        }
        debug!("check_tak_par: {} examined {} moves", mover, turns.len());
    }

    Ok(report)
}

/// Moves by `mover` that would complete a road for `target`.
pub fn road_threats(state: &GameState, mover: Color, target: Color) -> Result<Vec<Turn>, TakError> {
    let mut threats = Vec::new();
    for turn in generate_moves(state, mover) {
        if simulate(state.board(), &turn)?[target] {
            threats.push(turn);
        }
    }
    Ok(threats)
}

/// Moves by `mover` that leave the opponent without a road-completing reply.
///
/// Empty when the opponent has no threat to begin with. A move that hands
/// the opponent a road outright never counts as a block; one that
/// completes `mover`'s own road does.
pub fn block_tak(state: &GameState, mover: Color) -> Result<Vec<Turn>, TakError> {
    let opponent = mover.opponent();
    if road_threats(state, opponent, opponent)?.is_empty() {
        return Ok(Vec::new());
    }

    let mut blocks = Vec::new();
    for turn in generate_moves(state, mover) {
        let mut next = state.clone();
        next.play(turn.clone())?;

        let roads = check_roads(next.board());
        if roads[opponent] {
            continue;
        }
        if roads[mover] || road_threats(&next, opponent, opponent)?.is_empty() {
            blocks.push(turn);
        }
    }
    debug!("block_tak: {} has {} blocking moves", mover, blocks.len());
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, Piece, Reserves, Space, Stone};

    fn put(board: &mut Board, row: u8, file: u8, color: Color, piece: Piece) {
        board.stack_mut(Space::new(row, file)).unwrap().push(Stone::new(color, piece));
    }

    fn midgame(board: Board) -> GameState {
        let reserves = Reserves::for_size(board.size()).unwrap();
        let opening = vec![
            Turn::flat(Color::Black, Space::new(0, 0)),
            Turn::flat(Color::White, Space::new(0, 0)),
        ];
        GameState::with_board(board, reserves, reserves, opening)
    }

    /// White flats on row 2, files 0..4 of a 5x5 board: one placement from a road.
    fn almost_road() -> GameState {
        let mut board = Board::new(5).unwrap();
        for file in 0..4 {
            put(&mut board, 2, file, Color::White, Piece::Flat);
        }
        midgame(board)
    }

    #[test]
    fn test_empty_board_no_tak() {
        let game = GameState::new(5).unwrap();
        let report = check_tak(&game).unwrap();
        for mover in Color::ALL {
            for target in Color::ALL {
                assert!(!report.is_tak(mover, target));
                assert!(report.threats(mover, target).turns.is_empty());
            }
        }
    }

    #[test]
    fn test_detects_placement_threat() {
        let game = almost_road();
        let before = game.clone();
        let report = check_tak(&game).unwrap();

        assert!(report.is_tak(Color::White, Color::White));
        let winning = Turn::flat(Color::White, Space::new(2, 4));
        assert!(report.threats(Color::White, Color::White).turns.contains(&winning));
        // A wall on the last square doesn't make a road
        let wall = Turn::place(Color::White, Space::new(2, 4), Piece::Wall);
        assert!(!report.threats(Color::White, Color::White).turns.contains(&wall));

        // Black has nothing on the board, so no road of its own in reach
        assert!(!report.is_tak(Color::Black, Color::Black));
        assert!(!report.is_tak(Color::Black, Color::White));

        // Nothing was applied to the real state
        assert_eq!(game, before);
        assert!(!check_roads(game.board()).white);
    }

    #[test]
    fn test_movement_threat() {
        // White road on row 0 except file 2; a white flat above at (1, 2) can drop into the gap.
        let mut board = Board::new(5).unwrap();
        for file in [0, 1, 3, 4] {
            put(&mut board, 0, file, Color::White, Piece::Flat);
        }
        put(&mut board, 1, 2, Color::White, Piece::Flat);
        let game = midgame(board);
        let report = check_tak(&game).unwrap();
        let slide = Turn::movement(Color::White, Space::new(1, 2), Direction::Down, vec![1]).unwrap();
        assert!(report.threats(Color::White, Color::White).turns.contains(&slide));
    }

    #[test]
    fn test_opponent_move_can_complete_road() {
        // Black stack topped by a black flat covering a white flat in the gap.
        let mut board = Board::new(3).unwrap();
        put(&mut board, 1, 0, Color::White, Piece::Flat);
        put(&mut board, 1, 1, Color::White, Piece::Flat);
        put(&mut board, 1, 1, Color::Black, Piece::Flat);
        put(&mut board, 1, 2, Color::White, Piece::Flat);
        let game = midgame(board);
        let report = check_tak(&game).unwrap();
        // Black moving its flat off (1, 1) uncovers white's road
        assert!(report.is_tak(Color::Black, Color::White));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut board = Board::new(5).unwrap();
        for file in 0..4 {
            put(&mut board, 2, file, Color::White, Piece::Flat);
        }
        put(&mut board, 3, 3, Color::Black, Piece::Flat);
        put(&mut board, 3, 3, Color::Black, Piece::Cap);
        put(&mut board, 0, 4, Color::Black, Piece::Wall);
        let game = midgame(board);
        assert_eq!(check_tak(&game).unwrap(), check_tak_par(&game).unwrap());
    }

    #[test]
    fn test_road_threats() {
        let game = almost_road();
        let threats = road_threats(&game, Color::White, Color::White).unwrap();
        // Flat or capstone on the last square; a wall is not a road stone
        assert_eq!(
            threats,
            vec![
                Turn::flat(Color::White, Space::new(2, 4)),
                Turn::place(Color::White, Space::new(2, 4), Piece::Cap),
            ]
        );
    }

    #[test]
    fn test_block_tak() {
        let game = almost_road();
        let blocks = block_tak(&game, Color::Black).unwrap();
        assert!(!blocks.is_empty());
        // Occupying the road square blocks
        assert!(blocks.contains(&Turn::flat(Color::Black, Space::new(2, 4))));
        assert!(blocks.contains(&Turn::place(Color::Black, Space::new(2, 4), Piece::Wall)));
        // Placing anywhere else does not
        assert!(!blocks.contains(&Turn::flat(Color::Black, Space::new(0, 0))));
        assert!(blocks.iter().all(|t| t.space() == Space::new(2, 4)));
    }

    #[test]
    fn test_block_tak_without_threat() {
        let game = GameState::new(5).unwrap();
        assert!(block_tak(&game, Color::Black).unwrap().is_empty());
    }
}
