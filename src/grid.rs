//! The hex map: a lazily grown graph of tiles rooted at a centre tile.
//!
//! Tiles live in an arena and reference each other through [`TileId`]
//! indices, which keeps the six mutual neighbour links cycle-free to borrow
//! and cheap to assert on. Nothing is ever freed; the arena is the natural
//! seam for future eviction of tiles far from the centre, but that is out of
//! scope here.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::boundary::{BoundaryLine, Edge};
use crate::hex::Side;
use crate::params::MapParams;
use crate::seeds::MapSeeds;
use crate::tile::{Tile, TileId};
use crate::viewport::Viewport;

/// The tiles newly shown and newly hidden by a visibility refresh.
#[derive(Clone, Debug, Default)]
pub struct RenderDiff {
    pub shown: Vec<TileId>,
    pub hidden: Vec<TileId>,
}

/// The infinite hexagonal tile map.
pub struct HexGrid {
    pub(crate) tiles: Vec<Tile>,
    centre: TileId,
    pub(crate) boundary: [BoundaryLine; 4],
    pub(crate) params: MapParams,
    pub(crate) terrain_rng: ChaCha8Rng,
    pub(crate) river_rng: ChaCha8Rng,
}

impl HexGrid {
    /// Create a one-tile map whose centre tile sits at the given plane
    /// coordinates (normally the viewport centre). All four boundary edges
    /// start out as that single tile.
    pub fn new(centre_x: f64, centre_y: f64, params: MapParams, seeds: &MapSeeds) -> Self {
        let mut terrain_rng = ChaCha8Rng::seed_from_u64(seeds.terrain);
        let river_rng = ChaCha8Rng::seed_from_u64(seeds.rivers);

        let altitude = coin_flip_altitude(&mut terrain_rng);
        let centre = TileId(0);
        let tiles = vec![Tile::new(centre_x, centre_y, altitude, false)];
        let boundary = [
            BoundaryLine::from_tile(centre),
            BoundaryLine::from_tile(centre),
            BoundaryLine::from_tile(centre),
            BoundaryLine::from_tile(centre),
        ];

        Self {
            tiles,
            centre,
            boundary,
            params,
            terrain_rng,
            river_rng,
        }
    }

    pub fn params(&self) -> &MapParams {
        &self.params
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile(&self, id: TileId) -> &Tile {
        &self.tiles[id.idx()]
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> &mut Tile {
        &mut self.tiles[id.idx()]
    }

    /// The tile currently nearest the viewport centre; root of every
    /// traversal.
    pub fn centre_tile(&self) -> TileId {
        self.centre
    }

    /// All tile ids in creation order. Unlike [`HexGrid::tile_iter`] this
    /// does not touch traversal state.
    pub fn tile_ids(&self) -> Vec<TileId> {
        (0..self.tiles.len() as u32).map(TileId).collect()
    }

    pub fn boundary(&self, edge: Edge) -> &BoundaryLine {
        &self.boundary[edge.index()]
    }

    /// Create an unbound tile positioned on `side` of `from`, with a fresh
    /// ±1 coin-flip altitude. `visit_mark` must carry the phase of the
    /// surrounding tiles so an in-progress traversal convention stays
    /// consistent.
    pub(crate) fn alloc_neighbour(&mut self, from: TileId, side: Side, visit_mark: bool) -> TileId {
        let (dx, dy) = side.delta();
        let x = self.tile(from).x + dx * self.params.side_length;
        let y = self.tile(from).y + dy * self.params.side_length;
        let altitude = coin_flip_altitude(&mut self.terrain_rng);

        let id = TileId(self.tiles.len() as u32);
        self.tiles.push(Tile::new(x, y, altitude, visit_mark));
        id
    }

    /// Bind `b` onto `a`'s `side`, and `a` onto the opposite side of `b`.
    /// Binding over an occupied slot is an invariant breach and asserts in
    /// debug builds.
    pub(crate) fn bind(&mut self, a: TileId, b: TileId, side: Side) {
        self.tile_mut(a).set_neighbour(side, b);
        self.tile_mut(b).set_neighbour(side.opposite(), a);
    }

    /// Walk every tile reachable from the centre tile, yielding each exactly
    /// once. With `active_only` set, only rendered tiles are yielded and the
    /// walk only crosses rendered tiles, so reachability is through the
    /// currently drawn region.
    ///
    /// The walk flips each visited tile's phase marker instead of keeping a
    /// visited set, so two walks must not run interleaved on the same grid;
    /// the `&mut self` borrow enforces that. An active-only walk leaves the
    /// tiles it skipped out of phase, so a later walk only covers the region
    /// the previous one reached; full walks happen during generation,
    /// active-only walks afterwards over a stable rendered set.
    pub fn tile_iter(&mut self, active_only: bool) -> TileWalk<'_> {
        let old_mark = self.tile(self.centre).visit_mark;
        self.tile_mut(self.centre).visit_mark = !old_mark;
        let stack = vec![self.centre];
        TileWalk {
            grid: self,
            stack,
            old_mark,
            active_only,
        }
    }

    /// Re-anchor the centre tile after a scroll: if any neighbour of the
    /// current centre is strictly closer to `(x, y)`, it takes over. A
    /// single hop suffices because scroll steps are well under one tile
    /// width.
    pub fn update_centre_tile(&mut self, x: f64, y: f64) {
        let dist = |tile: &Tile| (tile.x - x).powi(2) + (tile.y - y).powi(2);

        let mut best = self.centre;
        let mut best_dist = dist(self.tile(best));
        let neighbours: Vec<TileId> = self
            .tile(self.centre)
            .existing_neighbours()
            .map(|(_, id)| id)
            .collect();
        for id in neighbours {
            let d = dist(self.tile(id));
            if d < best_dist {
                best = id;
                best_dist = d;
            }
        }
        self.centre = best;
    }

    /// Shift the whole map by a plane-coordinate delta (the viewport stays
    /// fixed; the world moves under it). River plot coordinates are caches
    /// of tile positions and shift along.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        for tile in &mut self.tiles {
            tile.x += dx;
            tile.y += dy;
            for piece in &mut tile.rivers {
                match piece {
                    crate::rivers::RiverPiece::Vertex(v) => {
                        v.start_point.0 += dx;
                        v.start_point.1 += dy;
                        v.end_point.0 += dx;
                        v.end_point.1 += dy;
                    }
                    crate::rivers::RiverPiece::Segment(s) => {
                        s.start_point.0 += dx;
                        s.start_point.1 += dy;
                        s.mid_point.0 += dx;
                        s.mid_point.1 += dy;
                        s.end_point.0 += dx;
                        s.end_point.1 += dy;
                    }
                }
            }
        }
    }

    /// Mark a tile as drawn by the viewport.
    pub fn activate_tile(&mut self, id: TileId) {
        self.tile_mut(id).activate();
    }

    /// Mark a tile as no longer drawn.
    pub fn deactivate_tile(&mut self, id: TileId) {
        self.tile_mut(id).deactivate();
    }

    /// Compare every tile's visibility against its rendered flag, toggle the
    /// flags through the activation hooks, and report the transitions so the
    /// renderer can draw and erase exactly the right tiles.
    pub fn refresh_visibility<V: Viewport>(&mut self, viewport: &V) -> RenderDiff {
        let mut diff = RenderDiff::default();
        for idx in 0..self.tiles.len() {
            let id = TileId(idx as u32);
            let on_screen = viewport.is_tile_on_screen(&self.tiles[idx]);
            if on_screen && !self.tiles[idx].is_rendered() {
                self.tiles[idx].activate();
                diff.shown.push(id);
            } else if !on_screen && self.tiles[idx].is_rendered() {
                self.tiles[idx].deactivate();
                diff.hidden.push(id);
            }
        }
        diff
    }
}

fn coin_flip_altitude(rng: &mut ChaCha8Rng) -> f64 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// Depth-first walk over the tile graph. See [`HexGrid::tile_iter`].
pub struct TileWalk<'a> {
    grid: &'a mut HexGrid,
    stack: Vec<TileId>,
    old_mark: bool,
    active_only: bool,
}

impl Iterator for TileWalk<'_> {
    type Item = TileId;

    fn next(&mut self) -> Option<TileId> {
        let tile_id = self.stack.pop()?;
        for side in Side::ALL {
            if let Some(next) = self.grid.tile(tile_id).neighbour(side) {
                let tile = self.grid.tile(next);
                if tile.visit_mark == self.old_mark && (tile.is_rendered() || !self.active_only) {
                    self.grid.tile_mut(next).visit_mark = !self.old_mark;
                    self.stack.push(next);
                }
            }
        }
        Some(tile_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ring_grid() -> HexGrid {
        let mut grid = HexGrid::new(0.0, 0.0, MapParams::default(), &MapSeeds::from_master(11));
        for edge in Edge::ALL {
            grid.extend_edge(edge);
        }
        grid
    }

    fn assert_bindings_mutual(grid: &HexGrid) {
        for id in grid.tile_ids() {
            for (side, other) in grid.tile(id).existing_neighbours() {
                assert_eq!(
                    grid.tile(other).neighbour(side.opposite()),
                    Some(id),
                    "tile {:?} side {} not mirrored by {:?}",
                    id,
                    side.name(),
                    other,
                );
            }
        }
    }

    #[test]
    fn test_bind_is_bidirectional() {
        let grid = ring_grid();
        assert_bindings_mutual(&grid);
    }

    #[test]
    fn test_walk_visits_every_tile_once() {
        let mut grid = ring_grid();
        let total = grid.tile_count();

        let first: Vec<TileId> = grid.tile_iter(false).collect();
        assert_eq!(first.len(), total);
        assert_eq!(first.iter().collect::<HashSet<_>>().len(), total);

        // The phase marker flipped; a second full walk still works.
        let second: Vec<TileId> = grid.tile_iter(false).collect();
        assert_eq!(second.len(), total);
    }

    #[test]
    fn test_active_only_walk_yields_just_the_root_when_nothing_is_rendered() {
        let mut grid = ring_grid();
        let centre = grid.centre_tile();
        let walked: Vec<TileId> = grid.tile_iter(true).collect();
        assert_eq!(walked, vec![centre]);
    }

    #[test]
    fn test_active_only_walk_covers_the_rendered_region() {
        let mut grid = ring_grid();
        let centre = grid.centre_tile();
        let west = grid.tile(centre).neighbour(Side::W).unwrap();
        grid.activate_tile(centre);
        grid.activate_tile(west);

        let walked: HashSet<TileId> = grid.tile_iter(true).collect();
        assert_eq!(walked, HashSet::from([centre, west]));

        // Repeated walks over the same rendered set stay consistent.
        let again: HashSet<TileId> = grid.tile_iter(true).collect();
        assert_eq!(again, walked);
    }

    #[test]
    fn test_update_centre_tile_moves_one_hop() {
        let mut grid = ring_grid();
        let centre = grid.centre_tile();
        let east = grid.tile(centre).neighbour(Side::E).unwrap();

        // Target sits on the east neighbour's centre.
        let (ex, ey) = (grid.tile(east).x, grid.tile(east).y);
        grid.update_centre_tile(ex, ey);
        assert_eq!(grid.centre_tile(), east);

        // Target on the current centre: no move.
        grid.update_centre_tile(ex, ey);
        assert_eq!(grid.centre_tile(), east);
    }

    #[test]
    fn test_scroll_shifts_all_coordinates() {
        let mut grid = ring_grid();
        let before: Vec<(f64, f64)> = grid
            .tile_ids()
            .into_iter()
            .map(|id| (grid.tile(id).x, grid.tile(id).y))
            .collect();

        grid.scroll_by(10.0, -4.0);
        for (id, (x, y)) in grid.tile_ids().into_iter().zip(before) {
            assert!((grid.tile(id).x - (x + 10.0)).abs() < 1e-12);
            assert!((grid.tile(id).y - (y - 4.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_refresh_visibility_reports_transitions() {
        use crate::viewport::ScreenRect;

        let mut grid = ring_grid();
        let side = grid.params().side_length;

        // A viewport that only covers the centre tile (margin included).
        let tight = ScreenRect::centred(0.0, 0.0, 1.0, 1.0, side);
        let diff = grid.refresh_visibility(&tight);
        assert!(diff.shown.contains(&grid.centre_tile()));
        assert!(diff.hidden.is_empty());
        let shown_before = diff.shown.len();

        // Widening the viewport shows the rest of the ring.
        let wide = ScreenRect::centred(0.0, 0.0, 10.0 * side, 10.0 * side, side);
        let diff = grid.refresh_visibility(&wide);
        assert_eq!(diff.shown.len(), grid.tile_count() - shown_before);

        // Shrinking it again hides those tiles.
        let diff = grid.refresh_visibility(&tight);
        assert_eq!(diff.hidden.len(), grid.tile_count() - shown_before);
        assert!(diff.shown.is_empty());
    }

    #[test]
    fn test_new_grid_altitude_is_coin_flip() {
        let grid = HexGrid::new(0.0, 0.0, MapParams::default(), &MapSeeds::from_master(1));
        let altitude = grid.tile(grid.centre_tile()).altitude;
        assert!(altitude == 1.0 || altitude == -1.0);
    }
}
