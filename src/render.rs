//! Terminal presentation of a maze and its runner

use std::thread;
use std::time::Duration;

use itertools::Itertools;

use crate::grid::GridMaze;
use crate::Point;

pub const S_HERO: char = '🏃';
pub const S_GOAL: char = '❎';
pub const S_VALID: char = '🟩';
pub const S_WALL: char = '🟫';

/// Emoji squares for the maze, with the exit marked
pub fn squares(maze: &GridMaze) -> Vec<Vec<char>> {
    let mut squares: Vec<Vec<char>> = maze
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| if cell.is_open() { S_VALID } else { S_WALL })
                .collect()
        })
        .collect();
    let exit = maze.exit();
    squares[exit.y][exit.x] = S_GOAL;
    squares
}

/// Maze as text, with the runner drawn at `runner` if given
pub fn frame(maze: &GridMaze, runner: Option<Point>) -> String {
    let mut squares = squares(maze);
    if let Some(cell) = runner {
        if let Some(square) = squares.get_mut(cell.y).and_then(|row| row.get_mut(cell.x)) {
            *square = S_HERO;
        }
    }
    to_string(&squares)
}

fn to_string(squares: &[Vec<char>]) -> String {
    squares.iter().map(|row| row.iter().join("")).join("\n")
}

/// Frames of the runner moving along `trail`, one per cell
pub fn playback_frames(maze: &GridMaze, trail: &[Point]) -> Vec<String> {
    let background = squares(maze);
    let mut squares = background.clone();
    let Some(start) = trail.first() else {
        return vec![to_string(&squares)];
    };
    squares[start.y][start.x] = S_HERO;
    let mut frames = vec![to_string(&squares)];

    for swap in trail.windows(2) {
        squares[swap[0].y][swap[0].x] = background[swap[0].y][swap[0].x];
        squares[swap[1].y][swap[1].x] = S_HERO;
        frames.push(to_string(&squares));
    }
    frames
}

/// Play the runner's trail back on the terminal
///
/// ## Arguments
/// - `maze`: Maze that was run.
/// - `trail`: Cells the runner passed, in order.
/// - `step_ms`: Time step for each frame, milliseconds.
pub fn playback(maze: &GridMaze, trail: &[Point], step_ms: usize) {
    for (i, frame) in playback_frames(maze, trail).into_iter().enumerate() {
        if i > 0 {
            thread::sleep(Duration::from_millis(step_ms as u64));
        }
        print!("\x1B[2J\x1B[1;1H");
        println!("{}", frame);
    }
}
