//! Run through a randomly generated maze
//!
//! A [GridMaze] is carved once from a grid of cells into a perfect maze
//! (exactly one path between any two rooms). An [Agent] then runs along
//! its corridors, turning only where a side corridor opens, until it
//! leaves through the exit on the right edge.
//!
//! # Examples
//! ```
//! use corridor_maze::{Agent, Direction, GridMaze};
//!
//! let maze = GridMaze::generate(150, 150, 10, Some(3)).unwrap();
//! assert_eq!((maze.width(), maze.height()), (15, 15));
//!
//! let mut agent = Agent::new(&maze);
//! agent.turn(Direction::Down);
//! for _ in 0..100 {
//!     agent.update();
//! }
//! let cell = agent.cell();
//! assert!(maze.is_open(cell.y, cell.x));
//! ```
//!
//! Driving the agent with a command script:
//! ```
//! use corridor_maze::{input, GridMaze, Session};
//!
//! let maze = GridMaze::generate(300, 200, 10, Some(11)).unwrap();
//! let script = input::parse_script("down right up").unwrap();
//! let mut session = Session::new(&maze);
//! let report = session.run_script(&script, 10_000);
//! report.print_report();
//! ```

pub mod agent;
pub mod grid;
pub mod input;
pub mod maze_generator;
pub mod random;
pub mod render;
pub mod session;

pub use agent::Agent;
pub use grid::{Cell, GridMaze, SizeError};
pub use session::{EndingCondition, RunReport, Session};

/// Location in the maze, `y` is the row and `x` the column
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Point {
    pub y: usize,
    pub x: usize,
}

impl Point {
    pub fn new(y: usize, x: usize) -> Self {
        Self { y, x }
    }

    /// Neighbouring point `distance` cells towards `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    pub fn step(&self, direction: Direction, distance: usize) -> Option<Point> {
        let (dy, dx) = direction.delta();
        let y = self.y.checked_add_signed(dy * distance as isize)?;
        let x = self.x.checked_add_signed(dx * distance as isize)?;
        Some(Point { y, x })
    }
}

/// Travel direction of the agent, also the four runtime commands
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Left,
        Direction::Down,
    ];

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Unit step as `(dy, dx)`
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }

    /// `1.0` towards growing coordinates (right, down), `-1.0` otherwise
    pub fn sign(self) -> f64 {
        match self {
            Direction::Right | Direction::Down => 1.0,
            Direction::Left | Direction::Up => -1.0,
        }
    }
}
