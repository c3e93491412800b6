//! Corridor-bound runner

use log::debug;

use crate::grid::GridMaze;
use crate::{Direction, Point};

/// Runner moving through a [GridMaze].
///
/// Position is continuous, in canvas units, but the runner only ever
/// travels along one axis. Turns snap it back onto the cell lattice.
pub struct Agent<'a> {
    maze: &'a GridMaze,
    /// Horizontal position in canvas units
    x: f64,
    /// Vertical position in canvas units
    y: f64,
    /// Canvas units per tick
    speed: f64,
    /// Current travel direction; velocity is `speed` along it
    heading: Direction,
    /// Last requested turn that has not been executed yet
    pending: Option<Direction>,
    win: bool,
}

impl<'a> Agent<'a> {
    /// Place a runner in the maze entrance, heading right.
    pub fn new(maze: &'a GridMaze) -> Self {
        let entrance = maze.entrance();
        let size = maze.cell_size() as f64;
        Self {
            maze,
            x: entrance.x as f64 * size,
            y: entrance.y as f64 * size,
            speed: Self::speed_for(maze.cell_size()),
            heading: Direction::Right,
            pending: None,
            win: false,
        }
    }

    /// Speed tier for a cell size; smaller cells move slower.
    pub fn speed_for(cell_size: usize) -> f64 {
        if cell_size < 8 {
            0.5
        } else if cell_size < 15 {
            1.0
        } else {
            1.5
        }
    }

    /// `(x, y)` in canvas units
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Side length of the runner in canvas units
    pub fn size(&self) -> f64 {
        self.maze.cell_size() as f64
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// `(vx, vy)`, exactly one of them is non-zero
    pub fn velocity(&self) -> (f64, f64) {
        let v = self.speed * self.heading.sign();
        if self.heading.is_horizontal() {
            (v, 0.0)
        } else {
            (0.0, v)
        }
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Buffered turn, retried on every tick
    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Whether the runner has reached the exit. Never resets.
    pub fn has_won(&self) -> bool {
        self.win
    }

    /// Cell containing the top-left corner of the runner
    pub fn cell(&self) -> Point {
        Point {
            y: self.grid_coordinate(self.y).floor() as usize,
            x: self.grid_coordinate(self.x).floor() as usize,
        }
    }

    /// Cell the runner is leaving when travelling towards `direction`.
    ///
    /// The coordinate along `direction` is rounded against the travel
    /// direction, the other one is floored.
    pub fn trailing_cell(&self, direction: Direction) -> Point {
        self.rounded_cell(direction, direction.sign() < 0.0)
    }

    /// Cell the runner is entering when travelling towards `direction`.
    ///
    /// Equals [Self::trailing_cell] while aligned with the grid. Collision
    /// checks go through [Self::trailing_cell]; this one is for
    /// presentation, e.g. highlighting the cell being entered.
    pub fn leading_cell(&self, direction: Direction) -> Point {
        self.rounded_cell(direction, direction.sign() > 0.0)
    }

    fn rounded_cell(&self, direction: Direction, ceil: bool) -> Point {
        let round = |value: f64| {
            let value = self.grid_coordinate(value);
            if ceil {
                value.ceil() as usize
            } else {
                value.floor() as usize
            }
        };
        let mut cell = self.cell();
        if direction.is_horizontal() {
            cell.x = round(self.x);
        } else {
            cell.y = round(self.y);
        }
        cell
    }

    fn grid_coordinate(&self, value: f64) -> f64 {
        value / self.maze.cell_size() as f64
    }

    pub fn turn_left(&mut self) {
        self.turn(Direction::Left)
    }

    pub fn turn_right(&mut self) {
        self.turn(Direction::Right)
    }

    pub fn turn_up(&mut self) {
        self.turn(Direction::Up)
    }

    pub fn turn_down(&mut self) {
        self.turn(Direction::Down)
    }

    /// Request a turn towards `direction`.
    ///
    /// The request replaces any buffered one and is executed right away
    /// when possible, otherwise on the first tick it becomes possible.
    pub fn turn(&mut self, direction: Direction) {
        self.pending = Some(direction);
        self.try_turn(direction);
    }

    /// Execute a turn onto the other axis if the side cell is open.
    fn try_turn(&mut self, direction: Direction) -> bool {
        if direction.is_horizontal() == self.heading.is_horizontal() {
            return false;
        }
        let from = self.trailing_cell(self.heading);
        let open = from
            .step(direction, 1)
            .is_some_and(|target| self.maze.is_open(target.y, target.x));
        if !open {
            return false;
        }

        let size = self.maze.cell_size() as f64;
        if direction.is_horizontal() {
            self.y = from.y as f64 * size;
        } else {
            self.x = from.x as f64 * size;
        }
        debug!(
            "Turned {:?} -> {:?} at ({}, {})",
            self.heading, direction, from.y, from.x
        );
        self.heading = direction;
        self.pending = None;
        true
    }

    /// Open cell beyond the trailing cell, if there is one.
    fn advance_target(&self) -> Option<Point> {
        self.trailing_cell(self.heading)
            .step(self.heading, 1)
            .filter(|next| self.maze.is_open(next.y, next.x))
    }

    /// Advance one tick.
    ///
    /// A buffered turn is attempted first. Moving into a wall leaves the
    /// runner where it is. Does nothing once the exit has been reached.
    pub fn update(&mut self) {
        if self.win {
            return;
        }
        if let Some(direction) = self.pending {
            self.turn(direction);
        }

        if let Some(target) = self.advance_target() {
            // Moving left or up, a step may not carry the runner past the
            // near edge of the cell it is entering
            let size = self.maze.cell_size() as f64;
            let (vx, vy) = self.velocity();
            match self.heading {
                Direction::Left => self.x = (self.x + vx).max(target.x as f64 * size),
                Direction::Up => self.y = (self.y + vy).max(target.y as f64 * size),
                Direction::Right | Direction::Down => {
                    self.x += vx;
                    self.y += vy;
                }
            }
        }

        if self.cell() == self.maze.exit() {
            self.win = true;
        }
    }
}
