//! Road detection.
//!
//! Stacks topped by a flat or capstone of one color form groups through
//! orthogonal adjacency. A group touching two opposite edges is a road.

use serde::{Deserialize, Serialize};

use crate::{Board, Color, PerColor, Space};

/// A connected set of same-colored road stacks.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Group {
    pub color: Color,
    /// Members in discovery order.
    pub spaces: Vec<Space>,
}

impl Group {
    /// Whether the group spans row 0 to row N-1, or file 0 to file N-1.
    pub fn is_road(&self, size: u8) -> bool {
        let last = size - 1;
        let on_row = |edge: u8| self.spaces.iter().any(|s| s.row == edge);
        let on_file = |edge: u8| self.spaces.iter().any(|s| s.file == edge);
        (on_row(0) && on_row(last)) || (on_file(0) && on_file(last))
    }
}

/// Color of the stack at `space` if it can carry a road.
#[inline]
fn road_color(board: &Board, space: Space) -> Option<Color> {
    let top = board.get(space)?.top()?;
    top.piece.is_road().then_some(top.color)
}

/// Partition all road stacks into connected groups.
///
/// Every road stack belongs to exactly one group.
pub fn road_groups(board: &Board) -> Vec<Group> {
    let size = board.size();
    let mut used = vec![false; board.cell_count()];
    let mut groups = Vec::new();

    for seed in board.spaces() {
        if used[board.index(seed)] {
            continue;
        }
        let Some(color) = road_color(board, seed) else {
            continue;
        };

        let mut members = Vec::new();
        let mut pending = vec![seed];
        used[board.index(seed)] = true;

        while let Some(space) = pending.pop() {
            members.push(space);
            for next in space.neighbours(size) {
                let idx = board.index(next);
                if !used[idx] && road_color(board, next) == Some(color) {
                    used[idx] = true;
                    pending.push(next);
                }
            }
        }

        groups.push(Group { color, spaces: members });
    }

    groups
}

/// Which colors currently have a road. Both may.
pub fn check_roads(board: &Board) -> PerColor<bool> {
    let mut roads = PerColor::new(false, false);
    for group in road_groups(board) {
        if group.is_road(board.size()) {
            roads[group.color] = true;
        }
    }
    roads
}
