//! Sandpile altitude smoothing.
//!
//! Freshly created tiles start with a ±1 coin-flip altitude. Blending each
//! tile toward the mean of its neighbours for a few passes turns that noise
//! into continuous-looking terrain; a tiny random perturbation keeps flat
//! regions from becoming perfectly uniform.

use rand::Rng;

use crate::grid::HexGrid;
use crate::tile::TileId;

/// Run the configured number of smoothing passes over `tiles`.
///
/// Each pass walks the list in insertion order and replaces a tile's
/// altitude with `(altitude + w * mean) / (1 + w)` where `mean` is the
/// average altitude of its existing neighbours. Neighbours read their
/// current value, so updates made earlier in the same pass are visible
/// (Gauss–Seidel, not double-buffered); the pass order is part of the
/// reproducible output.
///
/// The perturbation `altitude + jitter * U(-1, 1)` is applied only when the
/// result stays inside [-1, 1]; out-of-range draws are rejected rather than
/// clamped, so the altitude bound holds without ever clipping. Tiles with no
/// neighbours are left untouched.
pub fn smooth_altitudes(grid: &mut HexGrid, tiles: &[TileId]) {
    let params = grid.params.relax;

    for _ in 0..params.passes {
        for &id in tiles {
            let neighbours: Vec<TileId> =
                grid.tile(id).existing_neighbours().map(|(_, n)| n).collect();
            if neighbours.is_empty() {
                continue;
            }

            let mean: f64 = neighbours
                .iter()
                .map(|&n| grid.tile(n).altitude)
                .sum::<f64>()
                / neighbours.len() as f64;

            let blended = (grid.tile(id).altitude + params.neighbour_weight * mean)
                / (1.0 + params.neighbour_weight);
            grid.tile_mut(id).altitude = blended;

            let shifted = blended + params.jitter * grid.terrain_rng.gen_range(-1.0..1.0);
            if (-1.0..=1.0).contains(&shifted) {
                grid.tile_mut(id).altitude = shifted;
            }
        }
    }
}
