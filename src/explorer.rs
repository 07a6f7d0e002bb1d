//! Terminal map explorer using ratatui.
//!
//! Roguelike-style interface over the infinite map: arrow keys pan the
//! world, and the grid grows new layers whenever a boundary drifts into
//! view. The viewport stays pinned at the plane origin; panning scrolls the
//! world underneath it.

use std::error::Error;
use std::io::stdout;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::ascii::{altitude_char, export_map_file, AsciiMode};
use crate::grid::HexGrid;
use crate::hex::COS_30;
use crate::params::MapParams;
use crate::seeds::MapSeeds;
use crate::viewport::{ScreenRect, Viewport as _};

/// Terminal color for a tile in altitude view.
fn altitude_color(altitude: f64) -> Color {
    if altitude < 0.0 {
        Color::Blue
    } else if altitude < 0.2 {
        Color::Green
    } else if altitude < 0.5 {
        Color::Yellow
    } else if altitude < 0.8 {
        Color::DarkGray
    } else {
        Color::White
    }
}

/// Explorer state
struct Explorer {
    grid: HexGrid,
    seeds: MapSeeds,
    params: MapParams,
    mode: AsciiMode,
    message: Option<String>,
}

impl Explorer {
    fn new(params: MapParams, seeds: MapSeeds) -> Self {
        let grid = HexGrid::new(0.0, 0.0, params, &seeds);
        Explorer {
            grid,
            seeds,
            params,
            mode: AsciiMode::Altitude,
            message: None,
        }
    }

    /// Scroll the world under the fixed viewport and re-anchor the centre
    /// tile. New layers are grown lazily before the next frame.
    fn pan(&mut self, dx: f64, dy: f64) {
        self.grid.scroll_by(dx, dy);
        self.grid.update_centre_tile(0.0, 0.0);
    }

    fn next_mode(&mut self) {
        let modes = AsciiMode::all();
        let at = modes.iter().position(|&m| m == self.mode).unwrap_or(0);
        self.mode = modes[(at + 1) % modes.len()];
        self.message = Some(format!("View: {}", self.mode.name()));
    }

    /// Throw the map away and start over with a fresh random seed.
    fn regenerate(&mut self) {
        self.seeds = MapSeeds::default();
        self.grid = HexGrid::new(0.0, 0.0, self.params, &self.seeds);
        self.message = Some(format!("New map, seed {}", self.seeds.master));
    }

    fn export(&mut self) {
        let path = format!("hexmap_{}.txt", self.seeds.master);
        self.message = Some(match export_map_file(&self.grid, &self.seeds, &path) {
            Ok(()) => format!("Exported to {}", path),
            Err(e) => format!("Export failed: {}", e),
        });
    }

    /// Grow the map until no boundary midpoint is visible, then sync the
    /// rendered flags with the view.
    fn cover(&mut self, view: &ScreenRect) {
        loop {
            let mask = self.grid.edges_to_extend(view);
            if !mask.any() {
                break;
            }
            self.grid.generate_new_layers(mask, self.params.chunk_size);
        }
        self.grid.refresh_visibility(view);
    }
}

/// Run the explorer
pub fn run_explorer(params: MapParams, seeds: MapSeeds) -> Result<(), Box<dyn Error>> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let mut explorer = Explorer::new(params, seeds);
    let col_step = COS_30 * explorer.params.side_length;
    let row_step = 1.5 * explorer.params.side_length;
    let pan_step = explorer.params.side_length;

    loop {
        // Make sure the generated region covers the terminal before drawing.
        let size = terminal.size()?;
        let cols = size.width.max(1) as usize;
        let rows = size.height.saturating_sub(1).max(1) as usize;
        let view = ScreenRect::centred(
            0.0,
            0.0,
            cols as f64 * col_step,
            rows as f64 * row_step,
            explorer.params.side_length,
        );
        explorer.cover(&view);

        // Render
        terminal.draw(|f| {
            let area = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(area);

            let map_area = chunks[0];
            let mut cells =
                vec![vec![(' ', Color::Reset); map_area.width as usize]; map_area.height as usize];
            let min_x = -(map_area.width as f64) * col_step / 2.0;
            let min_y = -(map_area.height as f64) * row_step / 2.0;

            for id in explorer.grid.tile_ids() {
                let tile = explorer.grid.tile(id);
                if !view.is_tile_on_screen(tile) {
                    continue;
                }
                let col = ((tile.x - min_x) / col_step).round() as isize;
                let row = ((tile.y - min_y) / row_step).round() as isize;
                if col < 0
                    || row < 0
                    || col >= map_area.width as isize
                    || row >= map_area.height as isize
                {
                    continue;
                }
                let cell = match explorer.mode {
                    AsciiMode::Altitude => {
                        if tile.is_lake {
                            ('o', Color::Cyan)
                        } else if !tile.rivers.is_empty() && !tile.is_ocean() {
                            ('+', Color::Cyan)
                        } else {
                            (altitude_char(tile.altitude), altitude_color(tile.altitude))
                        }
                    }
                    AsciiMode::Water => {
                        if tile.is_lake {
                            ('O', Color::Cyan)
                        } else if !tile.rivers.is_empty() {
                            ('+', Color::Cyan)
                        } else if tile.is_ocean() {
                            ('~', Color::Blue)
                        } else {
                            ('.', Color::DarkGray)
                        }
                    }
                };
                cells[row as usize][col as usize] = cell;
            }

            let lines: Vec<Line> = cells
                .into_iter()
                .map(|row| {
                    Line::from(
                        row.into_iter()
                            .map(|(ch, color)| {
                                Span::styled(ch.to_string(), Style::default().fg(color))
                            })
                            .collect::<Vec<Span>>(),
                    )
                })
                .collect();
            f.render_widget(Paragraph::new(lines), map_area);

            let centre = explorer.grid.centre_tile();
            let status = match &explorer.message {
                Some(msg) => format!(" {}", msg),
                None => format!(
                    " seed {} | tiles {} | altitude {:+.2} | [{}] | arrows pan, m mode, e export, r reseed, q quit",
                    explorer.seeds.master,
                    explorer.grid.tile_count(),
                    explorer.grid.tile(centre).altitude,
                    explorer.mode.name(),
                ),
            };
            f.render_widget(
                Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White)),
                chunks[1],
            );
        })?;

        explorer.message = None;

        // Handle input
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    // Panning left moves the world east under the view.
                    KeyCode::Left => explorer.pan(pan_step, 0.0),
                    KeyCode::Right => explorer.pan(-pan_step, 0.0),
                    KeyCode::Up => explorer.pan(0.0, pan_step),
                    KeyCode::Down => explorer.pan(0.0, -pan_step),
                    KeyCode::Char('m') | KeyCode::Tab => explorer.next_mode(),
                    KeyCode::Char('e') => explorer.export(),
                    KeyCode::Char('r') => explorer.regenerate(),
                    _ => {}
                }
            }
        }
    }

    // Cleanup
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
