use clap::Parser;

use hexmapper::ascii::{self, AsciiMode};
use hexmapper::explorer::run_explorer;
use hexmapper::grid::HexGrid;
use hexmapper::params::MapParams;
use hexmapper::seeds::MapSeeds;
use hexmapper::viewport::ScreenRect;

#[derive(Parser, Debug)]
#[command(name = "hexmapper")]
#[command(about = "Generate infinite hexagonal terrain maps with rivers")]
struct Args {
    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Width of the generated view in plane units
    #[arg(short = 'W', long, default_value = "800")]
    width: f64,

    /// Height of the generated view in plane units
    #[arg(short = 'H', long, default_value = "600")]
    height: f64,

    /// Hex side length in plane units
    #[arg(long, default_value = "25")]
    side_length: f64,

    /// Boundary layers generated per extension request
    #[arg(long, default_value = "1")]
    chunk_size: usize,

    /// Launch the interactive terminal explorer
    #[arg(short, long)]
    explore: bool,

    /// Export the map to an ASCII file instead of printing it
    #[arg(long)]
    export: Option<String>,

    /// Print the water view instead of the altitude view
    #[arg(long)]
    water: bool,
}

fn main() {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let seeds = MapSeeds::from_master(seed);
    let mut params = MapParams::default();
    params.side_length = args.side_length;
    params.chunk_size = args.chunk_size;

    if args.explore {
        if let Err(e) = run_explorer(params, seeds) {
            eprintln!("Explorer error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    println!("Generating map with seed: {}", seed);
    let mut grid = HexGrid::new(0.0, 0.0, params, &seeds);
    let view = ScreenRect::centred(0.0, 0.0, args.width, args.height, params.side_length);
    grid.generate_graph(&view);
    println!("Generated {} tiles", grid.tile_count());

    let mode = if args.water {
        AsciiMode::Water
    } else {
        AsciiMode::Altitude
    };

    match args.export {
        Some(path) => match ascii::export_map_file(&grid, &seeds, &path) {
            Ok(()) => println!("Exported map to {}", path),
            Err(e) => {
                eprintln!("Export failed: {}", e);
                std::process::exit(1);
            }
        },
        None => ascii::print_ascii_map(&grid, mode),
    }
}
