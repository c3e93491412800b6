//! CLI for maze generation

use clap::Parser;
use corridor_maze::{render, GridMaze};

/// Maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Canvas width, in the same units as the cell size
    #[arg(long, default_value_t = 190)]
    canvas_width: usize,

    /// Canvas height, in the same units as the cell size
    #[arg(long, default_value_t = 150)]
    canvas_height: usize,

    /// Side length of a maze cell
    #[arg(short, long, default_value_t = 10)]
    cell_size: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    let args = Args::parse();

    let maze = GridMaze::generate(
        args.canvas_width,
        args.canvas_height,
        args.cell_size,
        args.seed,
    )?;
    println!("{}", render::frame(&maze, None));
    Ok(())
}
