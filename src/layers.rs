//! Lazy map growth: adding one staircase layer of tiles along an edge.
//!
//! Each extension walks the current boundary line of an edge, creates one
//! fresh tile per boundary tile plus the corner cases, wires every fresh
//! tile to all of its already existing neighbours and installs the fresh
//! tiles as the new boundary. The first and last fresh tiles are corner
//! tiles and get spliced into the two perpendicular boundary lines, which is
//! what keeps repeated extensions of different edges consistent.
//!
//! Boundary lines are ordered: left and right top-to-bottom, up and down
//! west-to-east. The chaining invariants the `expect`s below rely on follow
//! from that order and from every previous extension having done its corner
//! splicing.

use crate::boundary::{BoundaryLine, Edge, EdgeMask};
use crate::grid::HexGrid;
use crate::hex::Side;
use crate::relax::smooth_altitudes;
use crate::rivers::{pick_sources, trace_rivers};
use crate::tile::TileId;
use crate::viewport::Viewport;

impl HexGrid {
    /// Grow the map by one layer along the given edge.
    pub fn extend_edge(&mut self, edge: Edge) {
        match edge {
            Edge::Left => self.extend_left(),
            Edge::Up => self.extend_up(),
            Edge::Right => self.extend_right(),
            Edge::Down => self.extend_down(),
        }
    }

    fn extend_left(&mut self) {
        let mut old = std::mem::take(&mut self.boundary[Edge::Left.index()]);
        let top = match old.pop_front() {
            Some(id) => id,
            None => return,
        };
        let mark = self.tile(top).visit_mark;
        let mut line = BoundaryLine::new();

        let first = self.alloc_neighbour(top, Side::W, mark);
        self.bind(top, first, Side::W);
        if let Some(below) = self.tile(top).neighbour(Side::Sw) {
            self.bind(below, first, Side::Nw);
        }
        line.push_back(first);
        let mut last = first;

        while let Some(t) = old.pop_front() {
            let fresh = self.alloc_neighbour(t, Side::W, mark);
            self.bind(t, fresh, Side::W);
            let above = self
                .tile(t)
                .neighbour(Side::Nw)
                .expect("left boundary is chained through north-west neighbours");
            self.bind(above, fresh, Side::Sw);
            if let Some(far) = self.tile(above).neighbour(Side::W) {
                if far != fresh {
                    self.bind(far, fresh, Side::Se);
                }
            }
            if let Some(below) = self.tile(t).neighbour(Side::Sw) {
                self.bind(below, fresh, Side::Nw);
            }
            line.push_back(fresh);
            last = fresh;
        }

        self.boundary[Edge::Left.index()] = line;
        self.boundary[Edge::Up.index()].push_front(first);
        self.boundary[Edge::Down.index()].push_front(last);
    }

    fn extend_right(&mut self) {
        let mut old = std::mem::take(&mut self.boundary[Edge::Right.index()]);
        let top = match old.pop_front() {
            Some(id) => id,
            None => return,
        };
        let mark = self.tile(top).visit_mark;
        let mut line = BoundaryLine::new();

        let first = self.alloc_neighbour(top, Side::E, mark);
        self.bind(top, first, Side::E);
        if let Some(below) = self.tile(top).neighbour(Side::Se) {
            self.bind(below, first, Side::Ne);
        }
        line.push_back(first);
        let mut last = first;

        while let Some(t) = old.pop_front() {
            let fresh = self.alloc_neighbour(t, Side::E, mark);
            self.bind(t, fresh, Side::E);
            let above = self
                .tile(t)
                .neighbour(Side::Ne)
                .expect("right boundary is chained through north-east neighbours");
            self.bind(above, fresh, Side::Se);
            if let Some(far) = self.tile(above).neighbour(Side::E) {
                if far != fresh {
                    self.bind(far, fresh, Side::Sw);
                }
            }
            if let Some(below) = self.tile(t).neighbour(Side::Se) {
                self.bind(below, fresh, Side::Ne);
            }
            line.push_back(fresh);
            last = fresh;
        }

        self.boundary[Edge::Right.index()] = line;
        self.boundary[Edge::Up.index()].push_back(first);
        self.boundary[Edge::Down.index()].push_back(last);
    }

    fn extend_up(&mut self) {
        let mut old = std::mem::take(&mut self.boundary[Edge::Up.index()]);
        let leftmost = match old.pop_front() {
            Some(id) => id,
            None => return,
        };
        let mark = self.tile(leftmost).visit_mark;
        let mut line = BoundaryLine::new();
        let mut first = None;
        let mut last = None;

        // The staircase only has room for a tile north-west of the west
        // corner when the corner pokes out below (its south-west slot is
        // occupied).
        if self.tile(leftmost).neighbour(Side::Sw).is_some() {
            let fresh = self.alloc_neighbour(leftmost, Side::Nw, mark);
            self.bind(leftmost, fresh, Side::Nw);
            line.push_back(fresh);
            first = Some(fresh);
            last = Some(fresh);
        }

        let mut rightmost = leftmost;
        while let Some(t) = old.pop_front() {
            let fresh = self.alloc_neighbour(t, Side::Nw, mark);
            self.bind(t, fresh, Side::Nw);
            let west = self
                .tile(t)
                .neighbour(Side::W)
                .expect("upper boundary is chained west to east");
            self.bind(west, fresh, Side::Ne);
            if let Some(far) = self.tile(west).neighbour(Side::Nw) {
                if far != fresh {
                    self.bind(far, fresh, Side::E);
                }
            }
            line.push_back(fresh);
            first.get_or_insert(fresh);
            last = Some(fresh);
            rightmost = t;
        }

        // Mirror corner case on the east end.
        if self.tile(rightmost).neighbour(Side::Se).is_some() {
            let fresh = self.alloc_neighbour(rightmost, Side::Ne, mark);
            self.bind(rightmost, fresh, Side::Ne);
            let west = self
                .tile(rightmost)
                .neighbour(Side::Nw)
                .expect("east corner of the upper boundary has a fresh north-west neighbour");
            self.bind(west, fresh, Side::E);
            line.push_back(fresh);
            first.get_or_insert(fresh);
            last = Some(fresh);
        }

        self.boundary[Edge::Up.index()] = line;
        if let Some(first) = first {
            self.boundary[Edge::Left.index()].push_front(first);
        }
        if let Some(last) = last {
            self.boundary[Edge::Right.index()].push_front(last);
        }
    }

    fn extend_down(&mut self) {
        let mut old = std::mem::take(&mut self.boundary[Edge::Down.index()]);
        let leftmost = match old.pop_front() {
            Some(id) => id,
            None => return,
        };
        let mark = self.tile(leftmost).visit_mark;
        let mut line = BoundaryLine::new();
        let mut first = None;
        let mut last = None;

        if self.tile(leftmost).neighbour(Side::Nw).is_some() {
            let fresh = self.alloc_neighbour(leftmost, Side::Sw, mark);
            self.bind(leftmost, fresh, Side::Sw);
            line.push_back(fresh);
            first = Some(fresh);
            last = Some(fresh);
        }

        let mut rightmost = leftmost;
        while let Some(t) = old.pop_front() {
            let fresh = self.alloc_neighbour(t, Side::Sw, mark);
            self.bind(t, fresh, Side::Sw);
            let west = self
                .tile(t)
                .neighbour(Side::W)
                .expect("lower boundary is chained west to east");
            self.bind(west, fresh, Side::Se);
            if let Some(far) = self.tile(west).neighbour(Side::Sw) {
                if far != fresh {
                    self.bind(far, fresh, Side::E);
                }
            }
            line.push_back(fresh);
            first.get_or_insert(fresh);
            last = Some(fresh);
            rightmost = t;
        }

        if self.tile(rightmost).neighbour(Side::Ne).is_some() {
            let fresh = self.alloc_neighbour(rightmost, Side::Se, mark);
            self.bind(rightmost, fresh, Side::Se);
            let west = self
                .tile(rightmost)
                .neighbour(Side::Sw)
                .expect("east corner of the lower boundary has a fresh south-west neighbour");
            self.bind(west, fresh, Side::E);
            line.push_back(fresh);
            first.get_or_insert(fresh);
            last = Some(fresh);
        }

        self.boundary[Edge::Down.index()] = line;
        if let Some(first) = first {
            self.boundary[Edge::Left.index()].push_back(first);
        }
        if let Some(last) = last {
            self.boundary[Edge::Right.index()].push_back(last);
        }
    }

    /// Which edges still have their boundary midpoint on screen, meaning the
    /// map has not yet outgrown the viewport in that direction.
    pub fn edges_to_extend<V: Viewport>(&self, viewport: &V) -> EdgeMask {
        let mut mask = EdgeMask::none();
        for edge in Edge::ALL {
            if let Some(mid) = self.boundary[edge.index()].middle() {
                if viewport.is_tile_on_screen(self.tile(mid)) {
                    mask.set(edge, true);
                }
            }
        }
        mask
    }

    /// Grow the map until every boundary midpoint has left the viewport,
    /// then smooth and trace rivers over the whole graph. This is the
    /// initial generation pass for a fresh map.
    pub fn generate_graph<V: Viewport>(&mut self, viewport: &V) {
        for edge in Edge::ALL {
            loop {
                let on_screen = match self.boundary[edge.index()].middle() {
                    Some(mid) => viewport.is_tile_on_screen(self.tile(mid)),
                    None => false,
                };
                if !on_screen {
                    break;
                }
                self.extend_edge(edge);
            }
        }

        let tiles: Vec<TileId> = self.tile_iter(false).collect();
        smooth_altitudes(self, &tiles);
        let sources = pick_sources(self, &tiles);
        trace_rivers(self, sources);
    }

    /// Grow `chunk_size` layers along every masked edge, then smooth and
    /// seed rivers over just the fresh tiles. Existing terrain keeps its
    /// altitudes; new rivers may still flow out of the fresh band into
    /// not-yet-rendered older tiles.
    ///
    /// Returns the fresh tiles in creation order.
    pub fn generate_new_layers(&mut self, mask: EdgeMask, chunk_size: usize) -> Vec<TileId> {
        let mut new_tiles = Vec::new();
        for edge in Edge::ALL {
            if !mask.get(edge) {
                continue;
            }
            for _ in 0..chunk_size.max(1) {
                self.extend_edge(edge);
                new_tiles.extend(self.boundary[edge.index()].iter());
            }
        }

        smooth_altitudes(self, &new_tiles);
        let sources = pick_sources(self, &new_tiles);
        trace_rivers(self, sources);
        new_tiles
    }
}
