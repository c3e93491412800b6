//! Maze generation

use log::debug;

use crate::grid::Cell;
use crate::random::RandomSource;
use crate::{Direction, Point};

/// Randomized growing-tree (Prim style) maze carver.
///
/// Rooms ("vertices") sit on odd rows and odd columns. The tree starts
/// from a random room and grows by attaching one random frontier room
/// per round through a single opened wall.
pub struct MazeGenerator<R: RandomSource> {
    random: R,
}

impl<R: RandomSource> MazeGenerator<R> {
    pub fn new(random: R) -> Self {
        Self { random }
    }

    /// Carve a perfect maze into `squares`.
    ///
    /// Only interior cells are touched, so the entrance and exit openings
    /// on the border survive. Expects an odd-sized grid; leaves grids
    /// without interior rooms untouched.
    pub fn generate_maze(&mut self, squares: &mut [Vec<Cell>]) {
        let height = squares.len();
        let width = squares.first().map_or(0, |row| row.len());
        if height < 3 || width < 3 {
            return;
        }
        debug_assert!(
            height % 2 == 1 && width % 2 == 1,
            "maze grid must have odd dimensions, got {}x{}",
            width,
            height
        );

        // Walls between rooms, one per wall slot
        for (y, row) in squares.iter_mut().enumerate().take(height - 1).skip(1) {
            for (x, square) in row.iter_mut().enumerate().take(width - 1).skip(1) {
                if (y + x) % 2 == 1 {
                    *square = Cell::Wall;
                }
            }
        }
        for y in (1..height - 1).step_by(2) {
            for x in (1..width - 1).step_by(2) {
                squares[y][x] = Cell::Unvisited;
            }
        }

        let start = Point {
            y: self.random.int_exclusive(0, height / 2) * 2 + 1,
            x: self.random.int_exclusive(0, width / 2) * 2 + 1,
        };
        squares[start.y][start.x] = Cell::Frontier;
        let mut frontier = vec![start];
        let mut links = 0;

        while !frontier.is_empty() {
            let chosen = frontier.remove(self.random.int_exclusive(0, frontier.len()));
            squares[chosen.y][chosen.x] = Cell::Passage;
            if self.link(squares, &chosen, &mut frontier) {
                links += 1;
            }
        }

        debug!(
            "Carved {}x{} maze from room ({}, {}) with {} links",
            width, height, start.y, start.x, links
        );
    }

    /// Attach `chosen` to the maze and queue its unvisited neighbours.
    ///
    /// Of the neighbouring rooms already in the maze, one is picked at
    /// random and the wall between is opened. Returns whether a wall was
    /// opened; only the very first room has nothing to attach to.
    fn link(
        &mut self,
        squares: &mut [Vec<Cell>],
        chosen: &Point,
        frontier: &mut Vec<Point>,
    ) -> bool {
        let height = squares.len();
        let width = squares[0].len();
        let mut candidates = Vec::with_capacity(4);

        for direction in Direction::ALL {
            let Some(neighbour) = chosen.step(direction, 2) else {
                continue;
            };
            let interior =
                (1..height - 1).contains(&neighbour.y) && (1..width - 1).contains(&neighbour.x);
            if !interior {
                continue;
            }
            match squares[neighbour.y][neighbour.x] {
                Cell::Unvisited => {
                    squares[neighbour.y][neighbour.x] = Cell::Frontier;
                    frontier.push(neighbour);
                }
                Cell::Passage => {
                    candidates.push(Point {
                        y: (chosen.y + neighbour.y) / 2,
                        x: (chosen.x + neighbour.x) / 2,
                    });
                }
                Cell::Wall | Cell::Frontier => (),
            }
        }

        if candidates.is_empty() {
            return false;
        }
        let wall = candidates[self.random.int_exclusive(0, candidates.len())];
        squares[wall.y][wall.x] = Cell::Passage;
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Cell;
    use crate::maze_generator::MazeGenerator;
    use crate::random::{ScriptedRandom, SeededRandom};

    fn blank(height: usize, width: usize) -> Vec<Vec<Cell>> {
        (0..height)
            .map(|_| (0..width).map(|_| Cell::Wall).collect())
            .collect()
    }

    #[test]
    fn every_room_is_carved() {
        let mut squares = blank(9, 11);
        MazeGenerator::new(SeededRandom::new(Some(0))).generate_maze(&mut squares);

        for y in (1..8).step_by(2) {
            for x in (1..10).step_by(2) {
                assert_eq!(squares[y][x], Cell::Passage, "room ({y}, {x})");
            }
        }
    }

    #[test]
    fn even_slots_stay_walls() {
        let mut squares = blank(11, 11);
        MazeGenerator::new(SeededRandom::new(Some(5))).generate_maze(&mut squares);

        for y in (0..11).step_by(2) {
            for x in (0..11).step_by(2) {
                assert_eq!(squares[y][x], Cell::Wall, "slot ({y}, {x})");
            }
        }
    }

    #[test]
    fn border_is_untouched() {
        let mut squares = blank(7, 7);
        squares[1][0] = Cell::Passage;
        squares[5][6] = Cell::Passage;
        MazeGenerator::new(SeededRandom::new(Some(9))).generate_maze(&mut squares);

        for (y, row) in squares.iter().enumerate() {
            for (x, square) in row.iter().enumerate() {
                let border = y == 0 || x == 0 || y == 6 || x == 6;
                if !border {
                    continue;
                }
                let expected = if (y, x) == (1, 0) || (y, x) == (5, 6) {
                    Cell::Passage
                } else {
                    Cell::Wall
                };
                assert_eq!(*square, expected, "border ({y}, {x})");
            }
        }
    }

    #[test]
    fn single_room_grid() {
        let mut squares = blank(3, 3);
        MazeGenerator::new(ScriptedRandom::new(vec![])).generate_maze(&mut squares);
        assert_eq!(squares[1][1], Cell::Passage);
    }

    #[test]
    fn degenerate_grid_is_left_alone() {
        let mut squares = blank(1, 5);
        MazeGenerator::new(ScriptedRandom::new(vec![])).generate_maze(&mut squares);
        assert!(squares[0].iter().all(|&c| c == Cell::Wall));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "odd dimensions")]
    fn even_grid_is_refused() {
        let mut squares = blank(4, 7);
        MazeGenerator::new(ScriptedRandom::new(vec![1])).generate_maze(&mut squares);
    }

    #[test]
    fn scripted_draws_build_a_spanning_tree() {
        // First two draws pick row index 2 and column index 1, i.e. room (5, 3)
        let mut squares = blank(7, 7);
        let mut generator = MazeGenerator::new(ScriptedRandom::new(vec![2, 1, 0]));
        generator.generate_maze(&mut squares);

        // 3x3 rooms joined by a spanning tree
        let opened_links = (1..6)
            .flat_map(|y| (1..6).map(move |x| (y, x)))
            .filter(|(y, x)| (y + x) % 2 == 1 && squares[*y][*x] == Cell::Passage)
            .count();
        assert_eq!(opened_links, 8);
    }
}
