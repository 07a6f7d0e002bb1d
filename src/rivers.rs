//! River network generation: randomized flow tracing across the altitude
//! field.
//!
//! Rivers grow from randomly chosen source tiles and walk down the altitude
//! gradient one tile at a time, picking uniformly among all equal-or-lower
//! open neighbours. A branch ends when it reaches the ocean, merges into a
//! tile that already carries a river, or gets boxed in by higher terrain and
//! declares the tile a lake.

use rand::Rng;

use crate::grid::HexGrid;
use crate::hex::Side;
use crate::tile::{Tile, TileId};

/// A terminal river piece: a spring, or the endpoint of a branch merging
/// into an existing river. Drawn from the tile centre to one edge midpoint.
#[derive(Clone, Debug)]
pub struct RiverVertex {
    /// True for springs, false for merge endpoints.
    pub is_start: bool,
    /// The side the water leaves (or, for merges, arrives) through.
    pub end_side: Side,
    /// Plot coordinates: tile centre.
    pub start_point: (f64, f64),
    /// Plot coordinates: midpoint of `end_side`.
    pub end_point: (f64, f64),
}

/// A through piece: the river enters on one side and leaves on another,
/// kinking at the tile centre.
#[derive(Clone, Debug)]
pub struct RiverSegment {
    pub start_side: Side,
    pub end_side: Side,
    pub start_point: (f64, f64),
    pub mid_point: (f64, f64),
    pub end_point: (f64, f64),
}

/// One hex-cell's worth of a river path.
#[derive(Clone, Debug)]
pub enum RiverPiece {
    Vertex(RiverVertex),
    Segment(RiverSegment),
}

impl RiverPiece {
    /// The side through which the flow exits this tile.
    pub fn end_side(&self) -> Side {
        match self {
            RiverPiece::Vertex(v) => v.end_side,
            RiverPiece::Segment(s) => s.end_side,
        }
    }

    pub fn is_spring(&self) -> bool {
        matches!(self, RiverPiece::Vertex(v) if v.is_start)
    }
}

/// A river piece whose exit side has not been chosen yet. Work items on the
/// tracing stack pair one of these with the tile it will land in.
#[derive(Clone, Copy, Debug)]
pub enum PendingPiece {
    /// A fresh spring (or an arbitrary-termination vertex).
    Source { is_start: bool },
    /// A continuation entering through `start_side`.
    Through { start_side: Side },
}

impl PendingPiece {
    /// Fix the exit side and compute plot coordinates from the tile centre
    /// and the side midpoints.
    fn finalize(self, tile: &Tile, side_length: f64, end_side: Side) -> RiverPiece {
        let centre = (tile.x, tile.y);
        let edge = |side: Side| {
            let (mx, my) = side.edge_midpoint();
            (tile.x + mx * side_length, tile.y + my * side_length)
        };
        match self {
            PendingPiece::Source { is_start } => RiverPiece::Vertex(RiverVertex {
                is_start,
                end_side,
                start_point: centre,
                end_point: edge(end_side),
            }),
            PendingPiece::Through { start_side } => RiverPiece::Segment(RiverSegment {
                start_side,
                end_side,
                start_point: edge(start_side),
                mid_point: centre,
                end_point: edge(end_side),
            }),
        }
    }
}

/// Decide which of `tiles` spawn river sources.
///
/// A tile passes when a uniform draw in [0, 1) falls below
/// `river_source_rate * altitude`. The draw is never negative, so tiles at
/// or below sea level can never pass; land sources get more likely with
/// altitude. The comparison is kept exactly as-is rather than being split
/// into an explicit land check.
pub fn pick_sources(grid: &mut HexGrid, tiles: &[TileId]) -> Vec<(TileId, PendingPiece)> {
    let rate = grid.params.river_source_rate;
    let mut sources = Vec::new();
    for &id in tiles {
        let bound = rate * grid.tile(id).altitude;
        if grid.river_rng.gen::<f64>() < bound {
            sources.push((id, PendingPiece::Source { is_start: true }));
        }
    }
    sources
}

/// Trace every pending river on `stack` until all branches have terminated.
///
/// Each work item is popped, given a random downhill exit among its open
/// neighbours, and either continued into the next tile, merged into an
/// existing river there, stopped at the ocean, or turned into a lake when no
/// open equal-or-lower neighbour exists. Open means the neighbour's terrain
/// has never been rendered; flow never re-routes finalized ground.
pub fn trace_rivers(grid: &mut HexGrid, mut stack: Vec<(TileId, PendingPiece)>) {
    let side_length = grid.params.side_length;

    while let Some((tile_id, pending)) = stack.pop() {
        let altitude = grid.tile(tile_id).altitude;
        let candidates: Vec<Side> = Side::ALL
            .iter()
            .copied()
            .filter(|&side| match grid.tile(tile_id).neighbour(side) {
                Some(next) => {
                    let next_tile = grid.tile(next);
                    !next_tile.was_ever_rendered() && altitude >= next_tile.altitude
                }
                None => false,
            })
            .collect();

        if candidates.is_empty() {
            // Local altitude minimum: the flow pools here.
            let end_side = match pending {
                PendingPiece::Through { start_side } => start_side.opposite(),
                PendingPiece::Source { .. } => Side::ALL[grid.river_rng.gen_range(0..Side::ALL.len())],
            };
            let piece = pending.finalize(grid.tile(tile_id), side_length, end_side);
            let tile = grid.tile_mut(tile_id);
            tile.is_lake = true;
            tile.rivers.push(piece);
            continue;
        }

        let direction = candidates[grid.river_rng.gen_range(0..candidates.len())];
        let piece = pending.finalize(grid.tile(tile_id), side_length, direction);
        grid.tile_mut(tile_id).rivers.push(piece);

        let next_id = grid
            .tile(tile_id)
            .neighbour(direction)
            .expect("chosen flow direction has a neighbour");

        // Negative altitude is the ocean: the exit edge already represents
        // entry to the sea, so the branch simply stops.
        if grid.tile(next_id).altitude >= 0.0 {
            if !grid.tile(next_id).rivers.is_empty() {
                // Merge into the river already crossing the next tile.
                let vertex = PendingPiece::Source { is_start: false }.finalize(
                    grid.tile(next_id),
                    side_length,
                    direction.opposite(),
                );
                grid.tile_mut(next_id).rivers.push(vertex);
            } else {
                stack.push((
                    next_id,
                    PendingPiece::Through {
                        start_side: direction.opposite(),
                    },
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MapParams;
    use crate::seeds::MapSeeds;

    fn ring_grid() -> HexGrid {
        let mut grid = HexGrid::new(0.0, 0.0, MapParams::default(), &MapSeeds::from_master(7));
        grid.extend_edge(crate::boundary::Edge::Left);
        grid.extend_edge(crate::boundary::Edge::Up);
        grid.extend_edge(crate::boundary::Edge::Right);
        grid.extend_edge(crate::boundary::Edge::Down);
        grid
    }

    fn set_all_altitudes(grid: &mut HexGrid, altitude: f64) {
        for id in grid.tile_ids() {
            grid.tile_mut(id).altitude = altitude;
        }
    }

    #[test]
    fn test_ocean_tiles_never_spawn_sources() {
        let mut grid = ring_grid();
        set_all_altitudes(&mut grid, -0.8);
        let tiles = grid.tile_ids();

        // Lots of draws; the bound is negative, a uniform draw never passes.
        for _ in 0..200 {
            assert!(pick_sources(&mut grid, &tiles).is_empty());
        }
    }

    #[test]
    fn test_high_land_spawns_sources_eventually() {
        let mut grid = ring_grid();
        set_all_altitudes(&mut grid, 1.0);
        let tiles = grid.tile_ids();

        let mut spawned = 0;
        for _ in 0..200 {
            spawned += pick_sources(&mut grid, &tiles).len();
        }
        // 7 tiles * 200 rounds * 0.1 rate: expectation 140.
        assert!(spawned > 0, "rate 0.1 at altitude 1.0 never fired");
    }

    #[test]
    fn test_boxed_in_source_becomes_lake() {
        let mut grid = ring_grid();
        let centre = grid.centre_tile();
        set_all_altitudes(&mut grid, 0.9);
        grid.tile_mut(centre).altitude = 0.1;

        trace_rivers(&mut grid, vec![(centre, PendingPiece::Source { is_start: true })]);

        assert!(grid.tile(centre).is_lake);
        assert_eq!(grid.tile(centre).rivers.len(), 1);
        assert!(grid.tile(centre).rivers[0].is_spring());
        // Nothing flowed outward.
        for (_, id) in grid.tile(centre).existing_neighbours().collect::<Vec<_>>() {
            assert!(grid.tile(id).rivers.is_empty());
            assert!(!grid.tile(id).is_lake);
        }
    }

    #[test]
    fn test_flow_stops_at_ocean() {
        let mut grid = ring_grid();
        let centre = grid.centre_tile();
        set_all_altitudes(&mut grid, -0.5);
        grid.tile_mut(centre).altitude = 0.8;

        trace_rivers(&mut grid, vec![(centre, PendingPiece::Source { is_start: true })]);

        // The spring is plotted on the source tile; every neighbour is ocean
        // and receives no piece.
        assert_eq!(grid.tile(centre).rivers.len(), 1);
        assert!(!grid.tile(centre).is_lake);
        for (_, id) in grid.tile(centre).existing_neighbours().collect::<Vec<_>>() {
            assert!(grid.tile(id).rivers.is_empty());
        }
    }

    #[test]
    fn test_merge_attaches_vertex_to_existing_river() {
        let mut grid = ring_grid();
        let centre = grid.centre_tile();
        set_all_altitudes(&mut grid, 0.5);
        grid.tile_mut(centre).altitude = 0.2;

        // Give the centre a river already, then trace a new branch from a
        // neighbour whose only downhill option is the centre.
        trace_rivers(&mut grid, vec![(centre, PendingPiece::Source { is_start: true })]);
        let before = grid.tile(centre).rivers.len();
        assert!(before >= 1);

        let west = grid.tile(centre).neighbour(Side::W).unwrap();
        // Every neighbour of `west` except the centre is raised above it.
        for (_, id) in grid.tile(west).existing_neighbours().collect::<Vec<_>>() {
            if id != centre {
                grid.tile_mut(id).altitude = 0.95;
            }
        }
        grid.tile_mut(west).altitude = 0.5;
        trace_rivers(&mut grid, vec![(west, PendingPiece::Source { is_start: true })]);

        // The new branch exits west toward the centre and merges there.
        assert_eq!(grid.tile(west).rivers.len(), 1);
        assert_eq!(grid.tile(west).rivers[0].end_side(), Side::E);
        assert_eq!(grid.tile(centre).rivers.len(), before + 1);
        match grid.tile(centre).rivers.last().unwrap() {
            RiverPiece::Vertex(v) => {
                assert!(!v.is_start);
                assert_eq!(v.end_side, Side::W);
            }
            RiverPiece::Segment(_) => panic!("merge must attach a vertex"),
        }
    }

    #[test]
    fn test_rivers_avoid_rendered_terrain() {
        let mut grid = ring_grid();
        let centre = grid.centre_tile();
        set_all_altitudes(&mut grid, 0.1);
        grid.tile_mut(centre).altitude = 0.9;

        // Finalize every neighbour: no open direction remains.
        for (_, id) in grid.tile(centre).existing_neighbours().collect::<Vec<_>>() {
            grid.activate_tile(id);
        }
        trace_rivers(&mut grid, vec![(centre, PendingPiece::Source { is_start: true })]);
        assert!(grid.tile(centre).is_lake);
    }

    #[test]
    fn test_every_branch_terminates() {
        // A bigger map with mixed altitudes; tracing must drain the stack
        // without revisiting tiles unboundedly.
        let mut grid = HexGrid::new(0.0, 0.0, MapParams::default(), &MapSeeds::from_master(99));
        for _ in 0..6 {
            for edge in crate::boundary::Edge::ALL {
                grid.extend_edge(edge);
            }
        }
        let tiles = grid.tile_ids();
        let sources = pick_sources(&mut grid, &tiles);
        trace_rivers(&mut grid, sources);

        for id in grid.tile_ids() {
            let tile = grid.tile(id);
            for piece in &tile.rivers {
                if let RiverPiece::Segment(s) = piece {
                    // A through piece must have been continued or terminated
                    // downstream: its exit neighbour exists.
                    assert!(tile.neighbour(s.end_side).is_some());
                }
            }
        }
    }
}
