//! Legal move generation.
//!
//! Moves come out in a fixed order: squares row-major; on an empty square
//! flat, wall, cap placements; on a controlled stack by lift count, then
//! direction (up, down, right, left), then distance, then drop sequence
//! in lexicographic order.

use crate::{drop_sequences, Board, Color, Direction, Drops, GameState, Piece, Reserves, Space, Stack, Turn};

/// All legal turns for `color` in the given state, for one ply.
///
/// `color` need not be the side to move; Tak detection asks for both.
pub fn generate_moves(state: &GameState, color: Color) -> Vec<Turn> {
    moves_for(state.board(), state.reserves(color), state.is_first_ply(), color)
}

/// Move generation over explicit inputs.
pub fn moves_for(board: &Board, reserves: Reserves, first_ply: bool, color: Color) -> Vec<Turn> {
    let mut turns = Vec::new();

    for (space, stack) in board.iter() {
        if stack.is_empty() {
            push_placements(&mut turns, space, reserves, first_ply, color);
        } else if stack.top_color() == Some(color) && !first_ply {
            push_movements(&mut turns, board, space, stack, color);
        }
    }

    turns
}

fn push_placements(turns: &mut Vec<Turn>, space: Space, reserves: Reserves, first_ply: bool, color: Color) {
    if reserves.flats > 0 {
        turns.push(Turn::place(color, space, Piece::Flat));
        if !first_ply {
            turns.push(Turn::place(color, space, Piece::Wall));
        }
    }
    if reserves.caps > 0 && !first_ply {
        turns.push(Turn::place(color, space, Piece::Cap));
    }
}

fn push_movements(turns: &mut Vec<Turn>, board: &Board, from: Space, stack: &Stack, color: Color) {
    let size = board.size();
    let carrying_cap = stack.top_piece() == Some(Piece::Cap);
    // Carry limit is the board size
    let max_picks = stack.height().min(size as usize) as u8;

    let movement = |direction: Direction, drops: Vec<u8>| Turn::Move {
        color,
        space: from,
        direction,
        drops: Drops::from_generated(drops),
    };

    for picks in 1..=max_picks {
        for direction in Direction::ALL {
            for distance in 1..=picks {
                let Some(dest) = from.offset(direction, distance as usize, size) else {
                    break;
                };
                let Some(target) = board.get(dest) else {
                    break;
                };

                match target.top_piece() {
                    Some(Piece::Cap) => break,
                    Some(Piece::Wall) => {
                        if !carrying_cap {
                            break;
                        }
                        if distance == 1 {
                            // Only a lone capstone can flatten an adjacent wall
                            if picks == 1 {
                                turns.push(movement(direction, vec![1]));
                            }
                        } else {
                            // The capstone lands on the wall by itself
                            for mut drops in drop_sequences(picks - 1, distance - 1) {
                                drops.push(1);
                                turns.push(movement(direction, drops));
                            }
                        }
                        break;
                    }
                    _ => {
                        for drops in drop_sequences(picks, distance) {
                            turns.push(movement(direction, drops));
                        }
                    }
                }
            }
        }
    }
}
