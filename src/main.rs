use docopt::Docopt;
use error_chain::bail;
use log::{info, warn};
use maze_solver::{
    cells::GridCoordinate,
    grid::Grid,
    grid_displays::{CoordinateSmallVec, GridDisplay, PathDisplay, StartEndPointsDisplay, TextRender},
    layout::Point,
    maze::{Maze, MazeConfig, MazeConfigBuilder},
    observers::{MazeObserver, NullObserver},
    pathing::{self, SearchOutcome},
    renderers::{CanvasObserver, ImageCanvas},
};
use serde::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    time::Duration,
};

const USAGE: &str = "Maze Solver

Generates a random perfect maze, opens an entrance on the left of the top left cell and an exit on
the right of the bottom right cell, then searches for the way through.

Usage:
    maze_solver -h | --help
    maze_solver [--columns=<c>] [--rows=<r>] [--seed=<s>] [--text-out=<path>] [--show-path | --show-distances] [--image-out=<path> --cell-pixels=<n> --origin-x=<x> --origin-y=<y> --frame-delay=<ms>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --columns=<c>          Number of cells across the maze [default: 10].
    --rows=<r>             Number of cells down the maze [default: 10].
    --seed=<s>             Seed for the maze generator. Without one every run gives a different maze.
    --text-out=<path>      Output file path for a textual rendering of the maze. Printed to stdout if no image is requested.
    --show-path            Mark the route found from the entrance to the exit in the text rendering.
    --show-distances       Show the step count from the entrance to every cell in the text rendering (hexadecimal).
    --image-out=<path>     Output file path for an image of the maze and the search. Always PNG format.
    --cell-pixels=<n>      Pixel length of one cell wall in the image [default: 20].
    --origin-x=<x>         Pixel x offset of the maze in the image [default: 0].
    --origin-y=<y>         Pixel y offset of the maze in the image [default: 0].
    --frame-delay=<ms>     Pause after each drawing step, in milliseconds [default: 0].
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_columns: usize,
    flag_rows: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_show_path: bool,
    flag_show_distances: bool,
    flag_image_out: String,
    flag_cell_pixels: u32,
    flag_origin_x: i32,
    flag_origin_y: i32,
    flag_frame_delay: u64,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::maze_solver::errors::Error, ::maze_solver::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let config = MazeConfigBuilder::new()
        .columns(args.flag_columns)
        .rows(args.flag_rows)
        .seed(args.flag_seed)
        .cell_pixels(args.flag_cell_pixels)
        .origin(Point::new(args.flag_origin_x, args.flag_origin_y))
        .build();

    let do_image_render = !args.flag_image_out.is_empty();
    let do_text_render = !args.flag_text_out.is_empty() || !do_image_render;

    let (maze_grid, outcome) = if do_image_render {
        let layout = config.layout();
        let (width, height) = layout.canvas_size(config.columns, config.rows)
            .chain_err(|| "Maze is too large to draw as an image")?;
        let observer = CanvasObserver::new(ImageCanvas::new(width, height), layout)
            .with_frame_delay(Duration::from_millis(args.flag_frame_delay));

        let (maze_grid, observer, outcome) = generate_and_solve(&config, observer)?;
        observer.into_canvas()
            .save(&args.flag_image_out)
            .chain_err(|| format!("Failed to write maze image to {}", args.flag_image_out))?;
        (maze_grid, outcome)
    } else {
        let (maze_grid, _, outcome) = generate_and_solve(&config, NullObserver)?;
        (maze_grid, outcome)
    };

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    if do_text_render {

        let text = maze_text(&maze_grid, &args, &outcome)?;

        if args.flag_text_out.is_empty() {
            println!("{}", text);
        } else {
            write_text_to_file(&text, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if !outcome.found {
        bail!("No route from the entrance to the exit");
    }
    Ok(())
}

fn generate_and_solve<O: MazeObserver>(config: &MazeConfig,
                                       observer: O)
                                       -> Result<(Grid, O, SearchOutcome)> {
    let mut maze = Maze::new(config, observer)
        .chain_err(|| "Failed to generate the maze")?;

    let outcome = maze.solve_with_trace();
    if outcome.found {
        info!("route of {} cells found after {} moves",
              outcome.path.len(),
              outcome.moves.len());
    } else {
        warn!("no route found after {} moves", outcome.moves.len());
    }

    let (maze_grid, observer) = maze.into_parts();
    Ok((maze_grid, observer, outcome))
}

/// Decide what the text rendering shows in each cell:
/// - the step count from the entrance to every cell
/// - the route the search found
/// - otherwise just the entrance and exit markers
fn maze_text(maze_grid: &Grid, maze_args: &MazeArgs, outcome: &SearchOutcome) -> Result<String> {

    let grid_display: Box<dyn GridDisplay> = if maze_args.flag_show_distances {

        let distances = pathing::Distances::for_grid(maze_grid, maze_grid.entrance())
            .ok_or("Maze entrance is not on the grid.")?;
        Box::new(distances)

    } else if maze_args.flag_show_path && outcome.found {

        Box::new(PathDisplay::new(&outcome.path))

    } else {

        Box::new(StartEndPointsDisplay::new(as_coordinate_smallvec(maze_grid.entrance()),
                                            as_coordinate_smallvec(maze_grid.exit())))
    };

    Ok(format!("{}", TextRender::new(maze_grid, Some(grid_display.as_ref()))))
}

fn as_coordinate_smallvec(coord: GridCoordinate) -> CoordinateSmallVec {
    [coord].iter().cloned().collect::<CoordinateSmallVec>()
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.size();
    let edges_count = maze_grid.passages_count().0;
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze_grid.passages() {
        let index_a = maze_grid
            .grid_coordinate_to_index(src)
            .ok_or("Passage from a cell outside the grid")?;
        let index_b = maze_grid
            .grid_coordinate_to_index(dst)
            .ok_or("Passage to a cell outside the grid")?;
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
