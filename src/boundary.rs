//! Boundary tracking: the four ordered tile sequences forming the map edges.
//!
//! Each edge of the generated region keeps its tiles in a double-ended line,
//! left-to-right for the horizontal edges and top-to-bottom for the vertical
//! ones. Layer extension pops from the front, rebuilds the line and splices
//! corner tiles into the two perpendicular edges.

use std::collections::VecDeque;

use crate::tile::TileId;

/// One of the four map edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    Left,
    Up,
    Right,
    Down,
}

impl Edge {
    /// Fixed extension pass order.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Up, Edge::Right, Edge::Down];

    pub(crate) fn index(self) -> usize {
        match self {
            Edge::Left => 0,
            Edge::Up => 1,
            Edge::Right => 2,
            Edge::Down => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Edge::Left => "left",
            Edge::Up => "up",
            Edge::Right => "right",
            Edge::Down => "down",
        }
    }
}

/// Which edges an extension request covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeMask {
    pub left: bool,
    pub up: bool,
    pub right: bool,
    pub down: bool,
}

impl EdgeMask {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            left: true,
            up: true,
            right: true,
            down: true,
        }
    }

    pub fn get(self, edge: Edge) -> bool {
        match edge {
            Edge::Left => self.left,
            Edge::Up => self.up,
            Edge::Right => self.right,
            Edge::Down => self.down,
        }
    }

    pub fn set(&mut self, edge: Edge, value: bool) {
        match edge {
            Edge::Left => self.left = value,
            Edge::Up => self.up = value,
            Edge::Right => self.right = value,
            Edge::Down => self.down = value,
        }
    }

    pub fn any(self) -> bool {
        self.left || self.up || self.right || self.down
    }
}

/// An ordered line of boundary tiles with O(1) append/prepend and an O(1)
/// midpoint probe.
///
/// The midpoint index is not recomputed from the length; it drifts with a
/// counter (+1 per append or front pop, -1 per prepend) and is shifted one
/// step whenever the counter reaches ±2. The midpoint tile is only a
/// representative probe for "is this edge still near the viewport", so the
/// one-element lag this tracking allows is harmless.
#[derive(Clone, Debug, Default)]
pub struct BoundaryLine {
    tiles: VecDeque<TileId>,
    middle: usize,
    drift: i8,
}

impl BoundaryLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tile(id: TileId) -> Self {
        let mut line = Self::new();
        line.push_back(id);
        line
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Add a tile to the end of the line.
    pub fn push_back(&mut self, id: TileId) {
        if self.tiles.is_empty() {
            self.tiles.push_back(id);
            self.middle = 0;
            self.drift = 0;
        } else {
            self.tiles.push_back(id);
            self.drift += 1;
            self.rebalance();
        }
    }

    /// Add a tile to the start of the line.
    pub fn push_front(&mut self, id: TileId) {
        if self.tiles.is_empty() {
            self.tiles.push_front(id);
            self.middle = 0;
            self.drift = 0;
        } else {
            self.tiles.push_front(id);
            // Every existing index shifted right by one.
            self.middle += 1;
            self.drift -= 1;
            self.rebalance();
        }
    }

    /// Remove and return the first tile of the line.
    pub fn pop_front(&mut self) -> Option<TileId> {
        let id = self.tiles.pop_front()?;
        self.middle = self.middle.saturating_sub(1);
        self.drift += 1;
        self.rebalance();
        Some(id)
    }

    fn rebalance(&mut self) {
        if self.drift == 2 {
            self.drift = 0;
            if self.middle + 1 < self.tiles.len() {
                self.middle += 1;
            }
        } else if self.drift == -2 {
            self.drift = 0;
            self.middle = self.middle.saturating_sub(1);
        }
    }

    /// The tile at the tracked midpoint of the line.
    pub fn middle(&self) -> Option<TileId> {
        self.tiles.get(self.middle.min(self.tiles.len().saturating_sub(1))).copied()
    }

    pub fn front(&self) -> Option<TileId> {
        self.tiles.front().copied()
    }

    pub fn back(&self) -> Option<TileId> {
        self.tiles.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().copied()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(line: &BoundaryLine) -> Vec<u32> {
        line.iter().map(|id| id.0).collect()
    }

    #[test]
    fn test_push_back_keeps_order_and_midpoint() {
        let mut line = BoundaryLine::new();
        for i in 0..5 {
            line.push_back(TileId(i));
        }
        assert_eq!(ids(&line), vec![0, 1, 2, 3, 4]);
        // Pure appends put the midpoint at (len - 1) / 2.
        assert_eq!(line.middle(), Some(TileId(2)));
    }

    #[test]
    fn test_push_front_lags_midpoint_by_at_most_one() {
        let mut line = BoundaryLine::new();
        for i in 0..3 {
            line.push_back(TileId(i));
        }
        assert_eq!(line.middle(), Some(TileId(1)));

        // A single prepend leaves the midpoint tile in place.
        line.push_front(TileId(9));
        assert_eq!(ids(&line), vec![9, 0, 1, 2]);
        assert_eq!(line.middle(), Some(TileId(1)));

        // A second prepend shifts it one step toward the front.
        line.push_front(TileId(8));
        assert_eq!(line.middle(), Some(TileId(0)));
    }

    #[test]
    fn test_pop_front_advances_midpoint() {
        let mut line = BoundaryLine::new();
        for i in 0..5 {
            line.push_back(TileId(i));
        }
        assert_eq!(line.middle(), Some(TileId(2)));

        assert_eq!(line.pop_front(), Some(TileId(0)));
        assert_eq!(line.middle(), Some(TileId(2)));

        assert_eq!(line.pop_front(), Some(TileId(1)));
        assert_eq!(line.middle(), Some(TileId(3)));
    }

    #[test]
    fn test_middle_stays_near_centre_under_mixed_ops() {
        let mut line = BoundaryLine::new();
        line.push_back(TileId(0));
        for i in 1..50 {
            if i % 3 == 0 {
                line.push_front(TileId(i));
            } else {
                line.push_back(TileId(i));
            }
            let mid_pos = line
                .iter()
                .position(|id| Some(id) == line.middle())
                .unwrap();
            let ideal = (line.len() - 1) / 2;
            assert!(
                mid_pos.abs_diff(ideal) <= 1,
                "midpoint index {} too far from ideal {} at len {}",
                mid_pos,
                ideal,
                line.len()
            );
        }
    }

    #[test]
    fn test_empty_line() {
        let mut line = BoundaryLine::new();
        assert!(line.is_empty());
        assert_eq!(line.middle(), None);
        assert_eq!(line.pop_front(), None);

        line.push_back(TileId(7));
        assert_eq!(line.middle(), Some(TileId(7)));
        assert_eq!(line.front(), line.back());
    }

    #[test]
    fn test_edge_mask() {
        let mut mask = EdgeMask::none();
        assert!(!mask.any());
        mask.set(Edge::Up, true);
        assert!(mask.any());
        assert!(mask.get(Edge::Up));
        assert!(!mask.get(Edge::Down));
        assert!(EdgeMask::all().get(Edge::Left));
    }
}
