use std::path::Path;
use std::thread;
use std::time::Duration;

use image::{Rgb, RgbImage};
use log::debug;

use crate::cells::{Cell, Direction, GridCoordinate};
use crate::errors::*;
use crate::grid::Grid;
use crate::layout::{Layout, Line, Point};
use crate::observers::MazeObserver;
use crate::units::{Height, Width};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }
}

pub const WALL_COLOUR: Colour = Colour::rgb(0, 0, 0);
/// Absent walls are painted over in the background colour.
pub const BACKGROUND_COLOUR: Colour = Colour::rgb(0xd9, 0xd9, 0xd9);
pub const MOVE_COLOUR: Colour = Colour::rgb(0xff, 0, 0);
pub const UNDO_COLOUR: Colour = Colour::rgb(0x80, 0x80, 0x80);

const OPENING_INSET: i32 = 2;

fn inset(line: &Line, by: i32) -> Line {
    let shrink = |a: i32, b: i32| {
        if (i64::from(b) - i64::from(a)).abs() <= 2 * i64::from(by) {
            (a, b)
        } else if a < b {
            (a + by, b - by)
        } else {
            (a - by, b + by)
        }
    };
    let (x1, x2) = shrink(line.start.x, line.end.x);
    let (y1, y2) = shrink(line.start.y, line.end.y);
    Line::new(Point::new(x1, y1), Point::new(x2, y2))
}

/// A drawing surface that accepts coloured line segments.
pub trait Canvas {
    fn draw_line(&mut self, line: &Line, colour: Colour);

    /// Make everything drawn so far visible.
    fn present(&mut self) {}
}

impl<'a, C: Canvas + ?Sized> Canvas for &'a mut C {
    fn draw_line(&mut self, line: &Line, colour: Colour) {
        (**self).draw_line(line, colour)
    }

    fn present(&mut self) {
        (**self).present()
    }
}

/// Draws what a maze observer is told onto a canvas: walls as present or absent segments, search
/// steps as segments between cell centres. `animate` presents the canvas and then waits
/// `frame_delay` so the construction and search can be watched.
#[derive(Debug)]
pub struct CanvasObserver<C: Canvas> {
    canvas: C,
    layout: Layout,
    frame_delay: Duration,
}

impl<C: Canvas> CanvasObserver<C> {
    pub fn new(canvas: C, layout: Layout) -> CanvasObserver<C> {
        CanvasObserver {
            canvas,
            layout,
            frame_delay: Duration::from_millis(0),
        }
    }

    pub fn with_frame_delay(mut self, frame_delay: Duration) -> CanvasObserver<C> {
        self.frame_delay = frame_delay;
        self
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }
}

impl<C: Canvas> MazeObserver for CanvasObserver<C> {
    fn draw_cell_walls(&mut self, coord: GridCoordinate, cell: &Cell) {
        let bounds = self.layout.cell_bounds(coord);
        for side in Direction::ALL.iter() {
            let wall = bounds.wall_line(*side);
            if cell.has_wall(*side) {
                self.canvas.draw_line(&wall, WALL_COLOUR);
            } else {
                // Stop short of the corners, they may belong to walls of neighbouring cells.
                self.canvas.draw_line(&inset(&wall, OPENING_INSET), BACKGROUND_COLOUR);
            }
        }
    }

    fn draw_move(&mut self, from: GridCoordinate, to: GridCoordinate, undo: bool) {
        let colour = if undo { UNDO_COLOUR } else { MOVE_COLOUR };
        let line = Line::new(self.layout.centre(from), self.layout.centre(to));
        self.canvas.draw_line(&line, colour);
    }

    fn animate(&mut self) {
        self.canvas.present();
        if self.frame_delay > Duration::from_millis(0) {
            thread::sleep(self.frame_delay);
        }
    }
}

/// Draw a finished maze in one go, optionally with a solution path over the top.
pub fn render_maze<C: Canvas>(grid: &Grid,
                              layout: &Layout,
                              canvas: &mut C,
                              path: Option<&[GridCoordinate]>) {
    let mut observer = CanvasObserver::new(canvas, *layout);
    for coord in grid.iter() {
        if let Some(cell) = grid.cell(coord) {
            observer.draw_cell_walls(coord, cell);
        }
    }
    if let Some(path) = path {
        for step in path.windows(2) {
            observer.draw_move(step[0], step[1], false);
        }
    }
    observer.animate();
}

/// An in memory RGB image canvas, saved as PNG.
#[derive(Debug, Clone)]
pub struct ImageCanvas {
    image: RgbImage,
    line_width: u32,
}

impl ImageCanvas {
    pub fn new(width: Width, height: Height) -> ImageCanvas {
        let background = Rgb([BACKGROUND_COLOUR.r, BACKGROUND_COLOUR.g, BACKGROUND_COLOUR.b]);
        ImageCanvas {
            image: RgbImage::from_pixel(width.0, height.0, background),
            line_width: 2,
        }
    }

    pub fn with_line_width(mut self, line_width: u32) -> ImageCanvas {
        self.line_width = line_width.max(1);
        self
    }

    pub fn width(&self) -> Width {
        Width(self.image.width())
    }

    pub fn height(&self) -> Height {
        Height(self.image.height())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if x < self.image.width() && y < self.image.height() {
            let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
            Some(Colour::rgb(r, g, b))
        } else {
            None
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.image.save(path.as_ref())?;
        debug!("saved {}x{} maze image to {}",
               self.image.width(),
               self.image.height(),
               path.as_ref().display());
        Ok(())
    }

    fn plot(&mut self, point: Point, colour: Colour) {
        for dx in 0..self.line_width as i32 {
            for dy in 0..self.line_width as i32 {
                let (x, y) = (point.x.saturating_add(dx), point.y.saturating_add(dy));
                if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height() {
                    self.image.put_pixel(x as u32, y as u32, Rgb([colour.r, colour.g, colour.b]));
                }
            }
        }
    }
}

impl Canvas for ImageCanvas {
    // Bresenham, each plotted point widened to a line_width square.
    fn draw_line(&mut self, line: &Line, colour: Colour) {
        let (mut x, mut y) = (line.start.x, line.start.y);
        let (x_end, y_end) = (line.end.x, line.end.y);
        let dx = (i64::from(x_end) - i64::from(x)).abs();
        let dy = -(i64::from(y_end) - i64::from(y)).abs();
        let step_x = if x < x_end { 1 } else { -1 };
        let step_y = if y < y_end { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.plot(Point::new(x, y), colour);
            if x == x_end && y == y_end {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }
    }
}
