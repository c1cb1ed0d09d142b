use log::{debug, info};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::layout::{Layout, Point};
use crate::observers::MazeObserver;
use crate::pathing::{self, SearchOutcome};
use crate::units::{ColumnsCount, Height, RowsCount, Width};

/// Everything needed to build one maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    pub origin: Point,
    pub columns: ColumnsCount,
    pub rows: RowsCount,
    pub cell_width: Width,
    pub cell_height: Height,
    /// `None` seeds the generator from system entropy.
    pub seed: Option<u64>,
}

impl MazeConfig {
    pub fn layout(&self) -> Layout {
        Layout::new(self.origin, self.cell_width, self.cell_height)
    }
}

impl Default for MazeConfig {
    fn default() -> MazeConfig {
        MazeConfig {
            origin: Point::default(),
            columns: ColumnsCount(10),
            rows: RowsCount(10),
            cell_width: Width(20),
            cell_height: Height(20),
            seed: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct MazeConfigBuilder {
    config: MazeConfig,
}

impl MazeConfigBuilder {
    pub fn new() -> MazeConfigBuilder {
        MazeConfigBuilder::default()
    }
    pub fn origin(mut self, origin: Point) -> MazeConfigBuilder {
        self.config.origin = origin;
        self
    }
    pub fn columns(mut self, columns: usize) -> MazeConfigBuilder {
        self.config.columns = ColumnsCount(columns);
        self
    }
    pub fn rows(mut self, rows: usize) -> MazeConfigBuilder {
        self.config.rows = RowsCount(rows);
        self
    }
    pub fn cell_width(mut self, pixels: u32) -> MazeConfigBuilder {
        self.config.cell_width = Width(pixels);
        self
    }
    pub fn cell_height(mut self, pixels: u32) -> MazeConfigBuilder {
        self.config.cell_height = Height(pixels);
        self
    }
    pub fn cell_pixels(self, pixels: u32) -> MazeConfigBuilder {
        self.cell_width(pixels).cell_height(pixels)
    }
    pub fn seed(mut self, seed: Option<u64>) -> MazeConfigBuilder {
        self.config.seed = seed;
        self
    }
    pub fn build(self) -> MazeConfig {
        self.config
    }
}

/// A generated maze together with whoever is watching it.
///
/// Construction does the whole generation cycle. Solving may then be repeated any number of times,
/// each run reports its moves to the observer again.
pub struct Maze<O: MazeObserver> {
    grid: Grid,
    layout: Layout,
    observer: O,
}

impl<O: MazeObserver> Maze<O> {
    /// Carve with a `SmallRng` seeded from `config.seed`, or from system entropy without one.
    pub fn new(config: &MazeConfig, observer: O) -> Result<Maze<O>> {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Maze::with_rng(config, rng, observer)
    }

    /// Carve with the given randomness, `config.seed` is ignored.
    pub fn with_rng<R: Rng>(config: &MazeConfig, mut rng: R, mut observer: O) -> Result<Maze<O>> {
        let mut grid = Grid::new(config.columns, config.rows)?;

        for coord in grid.iter() {
            if let Some(cell) = grid.cell(coord) {
                observer.draw_cell_walls(coord, cell);
            }
        }
        observer.animate();

        generators::generate(&mut grid, &mut rng, &mut observer);
        info!("built {:?} maze, {} passages",
              (config.columns.0, config.rows.0),
              grid.passages_count().0);

        Ok(Maze {
            grid,
            layout: config.layout(),
            observer,
        })
    }

    /// Find a route from the entrance to the exit.
    pub fn solve(&mut self) -> bool {
        self.solve_with_trace().found
    }

    pub fn solve_with_trace(&mut self) -> SearchOutcome {
        let (entrance, exit) = (self.grid.entrance(), self.grid.exit());
        let outcome = pathing::depth_first_search(&mut self.grid, entrance, exit, &mut self.observer);
        debug!("solve found: {}, path cells: {}, backtracks: {}",
               outcome.found,
               outcome.path.len(),
               outcome.backtracks_count());
        outcome
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_parts(self) -> (Grid, O) {
        (self.grid, self.observer)
    }
}
