//! Map tiles: one hexagonal cell of terrain plus its neighbour links.

use crate::hex::Side;
use crate::rivers::RiverPiece;

/// Stable arena index of a tile inside a [`crate::grid::HexGrid`].
///
/// Tiles are shared between all their neighbours, so they are addressed by
/// index rather than owned references; the grid arena never frees a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

impl TileId {
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One hexagonal map tile.
///
/// `altitude` lives in [-1, 1]; negative altitude is ocean. Altitude starts
/// as a ±1 coin flip at creation and is smoothed afterwards by the sandpile
/// relaxation.
#[derive(Clone, Debug)]
pub struct Tile {
    /// Plane x coordinate of the tile centre (mutated on scroll).
    pub x: f64,
    /// Plane y coordinate of the tile centre (mutated on scroll).
    pub y: f64,
    /// Terrain altitude in [-1, 1]; negative means ocean.
    pub altitude: f64,
    /// Set when a traced river gets boxed in on this tile.
    pub is_lake: bool,
    /// River pieces threading through or terminating in this tile, in the
    /// order they were traced.
    pub rivers: Vec<RiverPiece>,
    neighbours: [Option<TileId>; 6],
    /// Traversal phase marker; flipped per full graph walk.
    pub(crate) visit_mark: bool,
    is_rendered: bool,
    was_ever_rendered: bool,
}

impl Tile {
    pub(crate) fn new(x: f64, y: f64, altitude: f64, visit_mark: bool) -> Self {
        Self {
            x,
            y,
            altitude,
            is_lake: false,
            rivers: Vec::new(),
            neighbours: [None; 6],
            visit_mark,
            is_rendered: false,
            was_ever_rendered: false,
        }
    }

    /// The neighbour on the given side, if one has been created.
    pub fn neighbour(&self, side: Side) -> Option<TileId> {
        self.neighbours[side.index()]
    }

    pub(crate) fn set_neighbour(&mut self, side: Side, id: TileId) {
        debug_assert!(
            self.neighbours[side.index()].is_none(),
            "neighbour slot {} already bound",
            side.name(),
        );
        self.neighbours[side.index()] = Some(id);
    }

    /// The occupied neighbour slots in stable side order (w, nw, ne, e, se, sw).
    pub fn existing_neighbours(&self) -> impl Iterator<Item = (Side, TileId)> + '_ {
        Side::ALL
            .iter()
            .filter_map(|&side| self.neighbour(side).map(|id| (side, id)))
    }

    pub fn neighbour_count(&self) -> usize {
        self.neighbours.iter().filter(|n| n.is_some()).count()
    }

    /// Negative altitude is ocean; rivers stop when they reach it.
    pub fn is_ocean(&self) -> bool {
        self.altitude < 0.0
    }

    /// Whether the tile is currently drawn by the viewport.
    pub fn is_rendered(&self) -> bool {
        self.is_rendered
    }

    /// Whether the tile has ever been drawn. Once rendered, a tile's terrain
    /// is considered final and rivers will not route through it.
    pub fn was_ever_rendered(&self) -> bool {
        self.was_ever_rendered
    }

    /// Mark the tile as drawn.
    pub(crate) fn activate(&mut self) {
        self.is_rendered = true;
        self.was_ever_rendered = true;
    }

    /// Mark the tile as no longer drawn.
    pub(crate) fn deactivate(&mut self) {
        self.is_rendered = false;
    }
}
