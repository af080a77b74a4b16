//! Move-tree enumeration (perft) from a position.
//!
//! Iterative DFS with an explicit frame stack, so deep searches don't
//! recurse. Positions where either color has a road are terminal.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::info;
use serde::Serialize;

use tak_core::{check_roads, GameState, TakError, Turn};

/// Stack frame for iterative DFS.
struct Frame {
    state: GameState,
    /// All legal moves from this position
    moves: Vec<Turn>,
    /// Index of next move to explore
    next: usize,
}

impl Frame {
    fn new(state: GameState) -> Frame {
        let moves = state.legal_moves();
        Frame { state, moves, next: 0 }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub struct PerftCounts {
    /// Positions reached, not counting the root
    pub nodes: u64,
    /// Positions at the depth limit
    pub leaves: u64,
    /// Terminal positions with a road for either color
    pub roads: u64,
    /// Terminal positions with no legal move
    pub stalled: u64,
    /// Set when the search stopped early
    pub interrupted: bool,
}

/// Count the move tree below `root` to `depth` plies.
///
/// `running` is polled between nodes; clearing it stops the search and
/// returns the partial counts with `interrupted` set.
pub fn perft(
    root: &GameState,
    depth: usize,
    running: &AtomicBool,
    log_every: Duration,
) -> Result<PerftCounts, TakError> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        return Ok(counts);
    }

    let start = Instant::now();
    let mut last_log = start;
    let mut stack = vec![Frame::new(root.clone())];

    while let Some(frame) = stack.last_mut() {
        if !running.load(Ordering::SeqCst) {
            counts.interrupted = true;
            break;
        }

        if last_log.elapsed() >= log_every {
            let secs = start.elapsed().as_secs_f64();
            info!(
                "nodes={} leaves={} roads={} depth={} rate={:.0}/s",
                counts.nodes,
                counts.leaves,
                counts.roads,
                stack.len(),
                counts.nodes as f64 / secs.max(f64::EPSILON)
            );
            last_log = Instant::now();
            continue;
        }

        let Some(turn) = frame.moves.get(frame.next).cloned() else {
            stack.pop();
            continue;
        };
        frame.next += 1;

        let mut child = frame.state.clone();
        child.play(turn)?;
        counts.nodes += 1;

        let roads = check_roads(child.board());
        if roads.white || roads.black {
            counts.roads += 1;
            continue;
        }
        if stack.len() == depth {
            counts.leaves += 1;
            continue;
        }

        let child = Frame::new(child);
        if child.moves.is_empty() {
            counts.stalled += 1;
            continue;
        }
        stack.push(child);
    }

    Ok(counts)
}
