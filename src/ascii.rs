//! ASCII rendering and export of generated maps.
//!
//! Tile centres sit on a lattice of half-column steps (`COS_30 * side`) and
//! row steps (`1.5 * side`), so every tile snaps onto a character cell;
//! odd rows naturally land on odd columns, which reproduces the hex stagger
//! in plain text.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::grid::HexGrid;
use crate::hex::COS_30;
use crate::seeds::MapSeeds;

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AsciiMode {
    /// Show altitude gradient, with water features overlaid
    Altitude,
    /// Show only water: ocean, rivers, lakes
    Water,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Altitude => "Altitude",
            AsciiMode::Water => "Water",
        }
    }

    pub fn all() -> &'static [AsciiMode] {
        &[AsciiMode::Altitude, AsciiMode::Water]
    }
}

/// Get ASCII character for altitude (11-level gradient over [-1, 1])
pub fn altitude_char(altitude: f64) -> char {
    const CHARS: &[char] = &['~', '.', '-', '=', '+', '*', '#', '%', '^', 'A', 'M'];
    let normalized = ((altitude + 1.0) / 2.0).clamp(0.0, 1.0);
    let idx = (normalized * (CHARS.len() - 1) as f64) as usize;
    CHARS[idx.min(CHARS.len() - 1)]
}

fn tile_char(grid: &HexGrid, id: crate::tile::TileId, mode: AsciiMode) -> char {
    let tile = grid.tile(id);
    match mode {
        AsciiMode::Altitude => {
            if tile.is_lake {
                'o'
            } else if !tile.rivers.is_empty() && !tile.is_ocean() {
                '+'
            } else {
                altitude_char(tile.altitude)
            }
        }
        AsciiMode::Water => {
            if tile.is_lake {
                'O'
            } else if !tile.rivers.is_empty() {
                '+'
            } else if tile.is_ocean() {
                '~'
            } else {
                '.'
            }
        }
    }
}

/// Render the whole map to an ASCII string, one character per tile.
pub fn render_ascii_map(grid: &HexGrid, mode: AsciiMode) -> String {
    let ids = grid.tile_ids();
    let col_step = COS_30 * grid.params().side_length;
    let row_step = 1.5 * grid.params().side_length;

    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for &id in &ids {
        let tile = grid.tile(id);
        min_x = min_x.min(tile.x);
        min_y = min_y.min(tile.y);
        max_x = max_x.max(tile.x);
        max_y = max_y.max(tile.y);
    }

    let cols = ((max_x - min_x) / col_step).round() as usize + 1;
    let rows = ((max_y - min_y) / row_step).round() as usize + 1;
    let mut cells = vec![vec![' '; cols]; rows];

    for &id in &ids {
        let tile = grid.tile(id);
        let col = ((tile.x - min_x) / col_step).round() as usize;
        let row = ((tile.y - min_y) / row_step).round() as usize;
        cells[row][col] = tile_char(grid, id, mode);
    }

    let mut result = String::with_capacity((cols + 1) * rows);
    for row in cells {
        result.extend(row);
        result.push('\n');
    }
    result
}

/// Print ASCII map to stdout
pub fn print_ascii_map(grid: &HexGrid, mode: AsciiMode) {
    print!("{}", render_ascii_map(grid, mode));
}

/// Generate altitude legend
pub fn altitude_legend() -> String {
    "=== ALTITUDE LEGEND ===\n\
     Ocean floor → High peaks:\n\
     ~ . - = + * # % ^ A M\n\
     (-1.0)          (+1.0)\n\
     Overlays: + river   o lake\n"
        .to_string()
}

/// Export the map and its statistics to an ASCII file
pub fn export_map_file(grid: &HexGrid, seeds: &MapSeeds, path: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    let ids = grid.tile_ids();
    let total = ids.len();

    writeln!(file, "=== HEX MAP FILE ===")?;
    writeln!(file, "Seed: {}", seeds.master)?;
    writeln!(file, "Tiles: {}", total)?;
    writeln!(file, "Side length: {}", grid.params().side_length)?;
    writeln!(file, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file)?;

    writeln!(file, "=== MAP (Altitude View) ===")?;
    write!(file, "{}", render_ascii_map(grid, AsciiMode::Altitude))?;
    writeln!(file)?;
    write!(file, "{}", altitude_legend())?;
    writeln!(file)?;

    writeln!(file, "=== MAP (Water View) ===")?;
    write!(file, "{}", render_ascii_map(grid, AsciiMode::Water))?;
    writeln!(file)?;

    writeln!(file, "=== STATISTICS ===")?;
    let land = ids.iter().filter(|&&id| !grid.tile(id).is_ocean()).count();
    let water = total - land;
    let lakes = ids.iter().filter(|&&id| grid.tile(id).is_lake).count();
    let river_tiles = ids
        .iter()
        .filter(|&&id| !grid.tile(id).rivers.is_empty())
        .count();
    writeln!(file, "Total tiles: {}", total)?;
    writeln!(file, "Land: {} ({:.1}%)", land, 100.0 * land as f64 / total as f64)?;
    writeln!(file, "Ocean: {} ({:.1}%)", water, 100.0 * water as f64 / total as f64)?;
    writeln!(file, "River tiles: {}  Lakes: {}", river_tiles, lakes)?;

    let mut min_a = f64::MAX;
    let mut max_a = f64::MIN;
    let mut sum_a = 0.0;
    for &id in &ids {
        let a = grid.tile(id).altitude;
        min_a = min_a.min(a);
        max_a = max_a.max(a);
        sum_a += a;
    }
    writeln!(
        file,
        "Altitude: min {:.3}  max {:.3}  mean {:.3}",
        min_a,
        max_a,
        sum_a / total as f64
    )?;

    Ok(())
}
