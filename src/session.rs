//! Game loop driving an [Agent] through a [GridMaze]

use log::{debug, info};

use crate::agent::Agent;
use crate::grid::GridMaze;
use crate::{Direction, Point};

/// One run through a maze.
///
/// Ticks and commands are refused once the runner has reached the exit.
pub struct Session<'a> {
    agent: Agent<'a>,
    /// Ticks since the start
    ticks: u64,
    /// Cells the runner has been in, in order
    trail: Vec<Point>,
}

/// Result of a scripted run
pub struct RunReport {
    /// Cells the runner passed, including start and end
    pub trail: Vec<Point>,
    /// Ticks since the session started
    pub ticks: u64,
    /// How the run ended
    pub ending_condition: EndingCondition,
}

/// How a scripted run ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EndingCondition {
    /// Runner reached the exit
    Exit,
    /// Runner stopped and its buffered command can never execute
    Stalled,
    /// Tick limit reached first
    TickLimit,
}

impl<'a> Session<'a> {
    pub fn new(maze: &'a GridMaze) -> Self {
        let agent = Agent::new(maze);
        let trail = vec![agent.cell()];
        Self {
            agent,
            ticks: 0,
            trail,
        }
    }

    pub fn agent(&self) -> &Agent<'a> {
        &self.agent
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn trail(&self) -> &[Point] {
        &self.trail
    }

    pub fn is_finished(&self) -> bool {
        self.agent.has_won()
    }

    /// Pass a direction command to the runner.
    ///
    /// Returns `false` if the session has already finished.
    pub fn command(&mut self, direction: Direction) -> bool {
        if self.is_finished() {
            return false;
        }
        self.agent.turn(direction);
        self.record();
        true
    }

    /// Advance the runner by one tick.
    ///
    /// Returns `false` if the session has already finished.
    pub fn tick(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.agent.update();
        self.ticks += 1;
        self.record();

        if self.agent.has_won() {
            info!("Maze completed in {} ticks", self.ticks);
        }
        true
    }

    fn record(&mut self) {
        let cell = self.agent.cell();
        if self.trail.last() != Some(&cell) {
            self.trail.push(cell);
        }
    }

    /// Run a sequence of direction commands.
    ///
    /// Each command is issued once the previous one has been executed and
    /// the runner has left the corner where it turned. After the last
    /// command the runner keeps going until it reaches the exit or stops
    /// for good. `max_ticks` counts from the start of the session.
    pub fn run_script(&mut self, script: &[Direction], max_ticks: u64) -> RunReport {
        let ending_condition = self.drive(script, max_ticks);
        debug!(
            "Script of {} commands ended with {:?} after {} ticks",
            script.len(),
            ending_condition,
            self.ticks
        );
        RunReport {
            trail: self.trail.clone(),
            ticks: self.ticks,
            ending_condition,
        }
    }

    fn drive(&mut self, script: &[Direction], max_ticks: u64) -> EndingCondition {
        for &direction in script {
            self.command(direction);
            while self.agent.pending().is_some() {
                if let Some(ending) = self.checked_tick(max_ticks) {
                    return ending;
                }
            }

            let corner = self.agent.trailing_cell(self.agent.heading());
            while self.agent.trailing_cell(self.agent.heading()) == corner {
                if let Some(ending) = self.checked_tick(max_ticks) {
                    return ending;
                }
            }
        }

        loop {
            if let Some(ending) = self.checked_tick(max_ticks) {
                return ending;
            }
        }
    }

    /// Tick once, unless the run is over.
    ///
    /// A tick that changes nothing is a fixed point: every following tick
    /// would be identical, so the run has stalled.
    fn checked_tick(&mut self, max_ticks: u64) -> Option<EndingCondition> {
        if self.is_finished() {
            return Some(EndingCondition::Exit);
        }
        if self.ticks >= max_ticks {
            return Some(EndingCondition::TickLimit);
        }

        let state = |agent: &Agent| (agent.position(), agent.heading(), agent.pending());
        let before = state(&self.agent);
        self.tick();

        if self.is_finished() {
            Some(EndingCondition::Exit)
        } else if state(&self.agent) == before {
            Some(EndingCondition::Stalled)
        } else {
            None
        }
    }
}

impl RunReport {
    /// Print report
    pub fn print_report(&self) {
        match self.ending_condition {
            EndingCondition::Exit => println!(
                "Maze completed in {} ticks, through {} cells.",
                self.ticks,
                self.trail.len()
            ),
            EndingCondition::Stalled => {
                let cell = self.trail.last().copied().unwrap_or(Point::new(1, 0));
                println!(
                    "The runner got stuck at row {}, column {} after {} ticks.",
                    cell.y, cell.x, self.ticks
                )
            }
            EndingCondition::TickLimit => {
                println!("The runner did not get out in {} ticks.", self.ticks)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::agent::Agent;
    use crate::grid::GridMaze;
    use crate::random::ScriptedRandom;
    use crate::session::{EndingCondition, Session};
    use crate::{Direction, Point};

    const CORNER: &str = "
🟫🟫🟫🟫🟫🟫🟫
🟩🟩🟩🟩🟩🟫🟫
🟫🟫🟫🟩🟫🟫🟫
🟫🟫🟫🟩🟩🟩🟩
🟫🟫🟫🟫🟫🟫🟫";

    fn direction_between(a: Point, b: Point) -> Direction {
        Direction::ALL
            .into_iter()
            .find(|d| a.step(*d, 1) == Some(b))
            .unwrap()
    }

    /// Turns along the only path from entrance to exit: each corner cell
    /// with the direction to take there
    fn corners(maze: &GridMaze) -> (Direction, Vec<(Point, Direction)>) {
        let (graph, nodes) = maze.passage_graph();
        let entrance = maze.entrance();
        let exit = maze.exit();
        let goal = nodes[exit.y][exit.x].unwrap();
        let (_, path) = petgraph::algo::astar(
            &graph,
            nodes[entrance.y][entrance.x].unwrap(),
            |n| n == goal,
            |_| 1,
            |_| 0,
        )
        .unwrap();
        let cells: Vec<Point> = path
            .into_iter()
            .map(|n| {
                let (y, x) = graph[n];
                Point { y, x }
            })
            .collect();

        let first = direction_between(cells[0], cells[1]);
        let turns = cells
            .windows(3)
            .filter_map(|w| {
                let incoming = direction_between(w[0], w[1]);
                let outgoing = direction_between(w[1], w[2]);
                (incoming != outgoing).then_some((w[1], outgoing))
            })
            .collect();
        (first, turns)
    }

    #[test]
    fn follows_the_maze_path_to_the_exit() {
        let mut random = ScriptedRandom::new(vec![3, 1, 4, 1, 5, 9, 2, 6]);
        let maze = GridMaze::new(15, 15, 1, &mut random).unwrap();
        assert_eq!((maze.width(), maze.height()), (15, 15));

        let (first, turns) = corners(&maze);
        assert_eq!(first, Direction::Right);
        let mut turns = turns.into_iter().peekable();

        let mut agent = Agent::new(&maze);
        let mut won_on = None;
        for tick in 1..=10_000 {
            if let Some(&(corner, direction)) = turns.peek() {
                if agent.trailing_cell(agent.heading()) == corner {
                    agent.turn(direction);
                    assert_eq!(agent.heading(), direction);
                    turns.next();
                }
            }

            let cell_before = agent.cell();
            agent.update();

            let cell = agent.cell();
            assert!(maze.is_open(cell.y, cell.x), "runner on wall at {:?}", cell);
            let (vx, vy) = agent.velocity();
            assert!((vx == 0.0) != (vy == 0.0));

            if agent.has_won() {
                assert_ne!(cell_before, maze.exit());
                won_on = Some(tick);
                break;
            }
        }

        assert!(won_on.is_some());
        assert!(turns.next().is_none());
        assert_eq!(agent.cell(), Point { y: 13, x: 14 });

        agent.update();
        assert!(agent.has_won());
        assert_eq!(agent.cell(), Point { y: 13, x: 14 });
    }

    #[test]
    fn script_reaches_exit() {
        let maze = GridMaze::from_emojis(CORNER, 1);
        let mut session = Session::new(&maze);
        let report = session.run_script(&[Direction::Down, Direction::Right], 1000);

        assert_eq!(report.ending_condition, EndingCondition::Exit);
        assert_eq!(report.ticks, 16);
        assert_eq!(
            report.trail,
            vec![
                Point::new(1, 0),
                Point::new(1, 1),
                Point::new(1, 2),
                Point::new(1, 3),
                Point::new(2, 3),
                Point::new(3, 3),
                Point::new(3, 4),
                Point::new(3, 5),
                Point::new(3, 6),
            ]
        );
        assert!(session.is_finished());
    }

    #[test]
    fn finished_session_refuses_input() {
        let maze = GridMaze::from_emojis(CORNER, 1);
        let mut session = Session::new(&maze);
        session.run_script(&[Direction::Down, Direction::Right], 1000);

        assert!(!session.tick());
        assert!(!session.command(Direction::Left));
        assert_eq!(session.ticks(), 16);
        assert!(session.agent().has_won());
    }

    #[test]
    fn impossible_command_stalls() {
        let maze = GridMaze::from_emojis(CORNER, 1);
        let mut session = Session::new(&maze);
        let report = session.run_script(&[Direction::Up], 1000);

        assert_eq!(report.ending_condition, EndingCondition::Stalled);
        assert_eq!(report.ticks, 9);
        assert_eq!(report.trail.last(), Some(&Point::new(1, 4)));
        assert_eq!(session.agent().pending(), Some(Direction::Up));
    }

    #[test]
    fn empty_script_runs_until_blocked() {
        let maze = GridMaze::from_emojis(CORNER, 1);
        let mut session = Session::new(&maze);
        let report = session.run_script(&[], 1000);

        assert_eq!(report.ending_condition, EndingCondition::Stalled);
        assert_eq!(session.agent().position(), (4.0, 1.0));
    }

    #[test]
    fn tick_limit() {
        let maze = GridMaze::from_emojis(CORNER, 1);
        let mut session = Session::new(&maze);
        let report = session.run_script(&[Direction::Up], 3);

        assert_eq!(report.ending_condition, EndingCondition::TickLimit);
        assert_eq!(report.ticks, 3);
        assert_eq!(session.agent().position(), (1.5, 1.0));
    }

    #[test]
    fn commands_between_ticks_wait_in_the_buffer() {
        let maze = GridMaze::from_emojis(CORNER, 1);
        let mut session = Session::new(&maze);
        assert!(session.command(Direction::Down));
        assert_eq!(session.agent().pending(), Some(Direction::Down));
        for _ in 0..7 {
            assert!(session.tick());
        }
        assert_eq!(session.agent().heading(), Direction::Down);
        assert_eq!(session.agent().pending(), None);
    }
}
