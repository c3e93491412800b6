//! CLI for running through a generated maze

use anyhow::Context;
use clap::Parser;
use corridor_maze::{input, render, GridMaze, Session};

/// Run through a randomly generated maze
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Canvas width, in the same units as the cell size
    #[arg(long, default_value_t = 300)]
    canvas_width: usize,

    /// Canvas height, in the same units as the cell size
    #[arg(long, default_value_t = 300)]
    canvas_height: usize,

    /// Side length of a maze cell
    #[arg(short, long, default_value_t = 10)]
    cell_size: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Direction commands, e.g. `down right up` or `dru`
    #[arg(short, long)]
    moves: Option<String>,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    /// Display the run on the terminal
    #[arg(short, long)]
    playback: bool,

    /// Playback frame length in milliseconds
    #[arg(short, long, default_value_t = 100)]
    frame_length: usize,
}

/// Generate maze, run the commands, print output
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
    let Some(moves) = args.moves else {
        println!("{}", render::frame(&maze, Some(maze.entrance())));
        return Ok(());
    };
    let script = input::parse_script(&moves).context("Could not read moves")?;

    let mut session = Session::new(&maze);
    let report = session.run_script(&script, args.max_ticks);

    if args.playback {
        render::playback(&maze, &report.trail, args.frame_length);
    } else {
        println!("{}", render::frame(&maze, report.trail.last().copied()));
    }
    report.print_report();
    Ok(())
}
