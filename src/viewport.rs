//! Viewport abstraction: the window the generator grows the map to fill.
//!
//! The grid itself never knows about screens; it only asks whether a tile is
//! visible. Anything that can answer that drives generation, which keeps the
//! growth logic testable without a terminal attached.

use crate::tile::Tile;

/// A view onto the tile plane.
pub trait Viewport {
    /// Whether the tile's centre falls inside the view, with a one
    /// side-length margin so partially visible hexes count as on screen.
    fn is_tile_on_screen(&self, tile: &Tile) -> bool;

    /// Plane coordinates of the view centre.
    fn centre(&self) -> (f64, f64);
}

/// An axis-aligned rectangle of the tile plane.
#[derive(Clone, Copy, Debug)]
pub struct ScreenRect {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    margin: f64,
}

impl ScreenRect {
    /// A `width` by `height` view with its origin at the plane origin, as a
    /// canvas would address it.
    pub fn new(width: f64, height: f64, side_length: f64) -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width,
            max_y: height,
            margin: side_length,
        }
    }

    /// A `width` by `height` view centred on `(cx, cy)`.
    pub fn centred(cx: f64, cy: f64, width: f64, height: f64, side_length: f64) -> Self {
        Self {
            min_x: cx - width / 2.0,
            min_y: cy - height / 2.0,
            max_x: cx + width / 2.0,
            max_y: cy + height / 2.0,
            margin: side_length,
        }
    }
}

impl Viewport for ScreenRect {
    fn is_tile_on_screen(&self, tile: &Tile) -> bool {
        tile.x >= self.min_x - self.margin
            && tile.x <= self.max_x + self.margin
            && tile.y >= self.min_y - self.margin
            && tile.y <= self.max_y + self.margin
    }

    fn centre(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile_at(x: f64, y: f64) -> Tile {
        Tile::new(x, y, 0.5, false)
    }

    #[test]
    fn test_margin_extends_visibility_one_side_length() {
        let view = ScreenRect::new(100.0, 80.0, 10.0);
        assert!(view.is_tile_on_screen(&tile_at(50.0, 40.0)));
        assert!(view.is_tile_on_screen(&tile_at(-10.0, 0.0)));
        assert!(view.is_tile_on_screen(&tile_at(110.0, 90.0)));
        assert!(!view.is_tile_on_screen(&tile_at(-10.1, 0.0)));
        assert!(!view.is_tile_on_screen(&tile_at(50.0, 90.1)));
    }

    #[test]
    fn test_centred_rect() {
        let view = ScreenRect::centred(5.0, -3.0, 20.0, 10.0, 1.0);
        assert_eq!(view.centre(), (5.0, -3.0));
        assert!(view.is_tile_on_screen(&tile_at(5.0, -3.0)));
        assert!(!view.is_tile_on_screen(&tile_at(5.0, 4.0)));
    }
}
