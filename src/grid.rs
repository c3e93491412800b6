//! Maze grid

use log::debug;
use thiserror::Error;

use crate::maze_generator::MazeGenerator;
use crate::random::{RandomSource, SeededRandom};
use crate::Point;

/// State of a single grid cell
///
/// `Frontier` and `Unvisited` only exist while the maze is being carved.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Cell {
    /// Impassable
    Wall = 0,
    /// Open corridor
    Passage = 1,
    /// Room next to the growing maze, may be attached this round
    Frontier = 2,
    /// Room not yet reachable from the maze
    Unvisited = 3,
}

impl Cell {
    pub fn is_open(self) -> bool {
        self == Cell::Passage
    }
}

/// Grid geometry cannot hold a reasonable maze
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SizeError {
    #[error("Cell size must be positive")]
    ZeroCellSize,
    #[error(
        "Canvas too small: cell size {cell_size} gives a {width}x{height} grid, \
         at least {min}x{min} is needed"
    )]
    GridTooSmall {
        cell_size: usize,
        width: usize,
        height: usize,
        min: usize,
    },
}

/// Generated maze, immutable after construction
#[derive(Clone, Debug)]
pub struct GridMaze {
    /// Cells, indexed `[row][column]`
    squares: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
    cell_size: usize,
}

impl GridMaze {
    /// Narrowest grid, in cells, that still makes a reasonable maze
    pub const MIN_GRID_WIDTH: usize = 15;

    /// Generate a maze for a canvas of `canvas_width` x `canvas_height`
    /// units, split into square cells of `cell_size` units.
    ///
    /// Grid dimensions are rounded down to odd numbers. Returns
    /// [SizeError] if the grid would be narrower or lower than
    /// [Self::MIN_GRID_WIDTH] cells.
    pub fn new<R: RandomSource>(
        canvas_width: usize,
        canvas_height: usize,
        cell_size: usize,
        random: &mut R,
    ) -> Result<Self, SizeError> {
        let (width, height) = Self::grid_dimensions(canvas_width, canvas_height, cell_size)?;
        let mut squares = Self::lattice(width, height);
        MazeGenerator::new(random).generate_maze(&mut squares);

        debug!("Generated {}x{} maze, cell size {}", width, height, cell_size);
        Ok(Self {
            squares,
            width,
            height,
            cell_size,
        })
    }

    /// Generate a maze from a seeded random source.
    ///
    /// Without a seed, the source is seeded from entropy.
    pub fn generate(
        canvas_width: usize,
        canvas_height: usize,
        cell_size: usize,
        seed: Option<u64>,
    ) -> Result<Self, SizeError> {
        Self::new(
            canvas_width,
            canvas_height,
            cell_size,
            &mut SeededRandom::new(seed),
        )
    }

    /// Cell counts that fit on the canvas, forced odd.
    fn grid_dimensions(
        canvas_width: usize,
        canvas_height: usize,
        cell_size: usize,
    ) -> Result<(usize, usize), SizeError> {
        if cell_size == 0 {
            return Err(SizeError::ZeroCellSize);
        }
        let force_odd = |n: usize| if n % 2 == 0 { n.saturating_sub(1) } else { n };
        let width = force_odd(canvas_width / cell_size);
        let height = force_odd(canvas_height / cell_size);

        if width < Self::MIN_GRID_WIDTH || height < Self::MIN_GRID_WIDTH {
            return Err(SizeError::GridTooSmall {
                cell_size,
                width,
                height,
                min: Self::MIN_GRID_WIDTH,
            });
        }
        Ok((width, height))
    }

    /// Walled border and an open interior, except for the slots at even
    /// row and even column. Entrance and exit are cut into the border.
    fn lattice(width: usize, height: usize) -> Vec<Vec<Cell>> {
        let mut squares: Vec<Vec<Cell>> = (0..height)
            .map(|_| (0..width).map(|_| Cell::Wall).collect())
            .collect();

        for (y, row) in squares.iter_mut().enumerate().take(height - 1).skip(1) {
            for (x, square) in row.iter_mut().enumerate().take(width - 1).skip(1) {
                if y % 2 == 1 || x % 2 == 1 {
                    *square = Cell::Passage;
                }
            }
        }

        squares[1][0] = Cell::Passage;
        squares[height - 2][width - 1] = Cell::Passage;
        squares
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Side length of a cell in canvas units
    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    /// Cell at row `y`, column `x`, or `None` outside the grid
    pub fn cell(&self, y: usize, x: usize) -> Option<Cell> {
        self.squares.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Whether the cell at row `y`, column `x` can be walked on.
    ///
    /// Anything outside the grid is a wall.
    pub fn is_open(&self, y: usize, x: usize) -> bool {
        self.cell(y, x).is_some_and(Cell::is_open)
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.squares.iter().map(|row| row.as_slice())
    }

    /// Opening in the left border
    pub fn entrance(&self) -> Point {
        Point { y: 1, x: 0 }
    }

    /// Opening in the right border
    pub fn exit(&self) -> Point {
        Point {
            y: self.height - 2,
            x: self.width - 1,
        }
    }
}

#[cfg(test)]
impl GridMaze {
    /// Fixed layout from rows of wall and passage emojis.
    ///
    /// Skips size validation so that small corridors can be exercised.
    pub(crate) fn from_emojis(emojis: &str, cell_size: usize) -> Self {
        let squares: Vec<Vec<Cell>> = emojis
            .trim()
            .split('\n')
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        crate::render::S_VALID => Cell::Passage,
                        crate::render::S_WALL => Cell::Wall,
                        val => panic!("Unexpected character `{}`", val),
                    })
                    .collect()
            })
            .collect();
        Self {
            width: squares[0].len(),
            height: squares.len(),
            squares,
            cell_size,
        }
    }

    /// Graph of passage cells, edges between orthogonal neighbours.
    ///
    /// Node weights are the `(y, x)` coordinates.
    pub(crate) fn passage_graph(
        &self,
    ) -> (
        petgraph::Graph<(usize, usize), (), petgraph::Undirected>,
        Vec<Vec<Option<petgraph::graph::NodeIndex>>>,
    ) {
        let mut graph = petgraph::Graph::new_undirected();
        let mut nodes: Vec<Vec<Option<petgraph::graph::NodeIndex>>> =
            vec![vec![None; self.width]; self.height];

        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_open(y, x) {
                    nodes[y][x] = Some(graph.add_node((y, x)));
                }
            }
        }
        for y in 0..self.height {
            for x in 0..self.width {
                let Some(node_a) = nodes[y][x] else { continue };
                for (y1, x1) in [(y + 1, x), (y, x + 1)] {
                    let neighbour = nodes.get(y1).and_then(|row| row.get(x1)).copied();
                    if let Some(Some(node_b)) = neighbour {
                        graph.add_edge(node_a, node_b, ());
                    }
                }
            }
        }
        (graph, nodes)
    }
}
