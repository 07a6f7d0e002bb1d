//! Hexagon geometry: compass sides and the coordinate offsets between
//! neighbouring tiles.
//!
//! Tiles are pointy-top hexagons. A tile's six neighbours sit on the compass
//! sides w, nw, ne, e, se, sw; horizontal offsets are multiples of 0.866
//! (cos 30°) times the side length and vertical offsets are multiples of
//! 1.5 / 0.75 times the side length.

/// Horizontal half-width of a unit hexagon (cos 30°).
pub const COS_30: f64 = 0.866;

/// One of the six compass sides of a hex tile.
///
/// The declaration order (w, nw, ne, e, se, sw) is the stable enumeration
/// order used everywhere a side list is walked; nothing relies on it for
/// correctness, only for reproducing random draws exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    W,
    Nw,
    Ne,
    E,
    Se,
    Sw,
}

impl Side {
    /// All sides in stable enumeration order.
    pub const ALL: [Side; 6] = [Side::W, Side::Nw, Side::Ne, Side::E, Side::Se, Side::Sw];

    /// Slot index of this side in a tile's neighbour array.
    pub fn index(self) -> usize {
        match self {
            Side::W => 0,
            Side::Nw => 1,
            Side::Ne => 2,
            Side::E => 3,
            Side::Se => 4,
            Side::Sw => 5,
        }
    }

    /// The side a neighbour sees this tile on: w↔e, nw↔se, ne↔sw.
    pub fn opposite(self) -> Side {
        match self {
            Side::W => Side::E,
            Side::Nw => Side::Se,
            Side::Ne => Side::Sw,
            Side::E => Side::W,
            Side::Se => Side::Nw,
            Side::Sw => Side::Ne,
        }
    }

    /// Centre-to-centre offset of the neighbour on this side, in units of
    /// the tile side length.
    pub fn delta(self) -> (f64, f64) {
        match self {
            Side::W => (-2.0 * COS_30, 0.0),
            Side::Nw => (-COS_30, -1.5),
            Side::Ne => (COS_30, -1.5),
            Side::E => (2.0 * COS_30, 0.0),
            Side::Se => (COS_30, 1.5),
            Side::Sw => (-COS_30, 1.5),
        }
    }

    /// Midpoint of this side's hexagon edge relative to the tile centre, in
    /// units of the tile side length. River pieces are plotted between edge
    /// midpoints and tile centres.
    pub fn edge_midpoint(self) -> (f64, f64) {
        match self {
            Side::W => (-COS_30, 0.0),
            Side::Nw => (-0.5 * COS_30, -0.75),
            Side::Ne => (0.5 * COS_30, -0.75),
            Side::E => (COS_30, 0.0),
            Side::Se => (0.5 * COS_30, 0.75),
            Side::Sw => (-0.5 * COS_30, 0.75),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::W => "w",
            Side::Nw => "nw",
            Side::Ne => "ne",
            Side::E => "e",
            Side::Se => "se",
            Side::Sw => "sw",
        }
    }
}
