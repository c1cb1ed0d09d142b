use std::convert::TryFrom;

use error_chain::bail;

use crate::cells::{Direction, GridCoordinate};
use crate::errors::*;
use crate::units::{ColumnsCount, Height, RowsCount, Width};

// Three bytes per RGB pixel.
const BYTES_PER_PIXEL: u64 = 3;

fn clamp_to_i32(value: i64) -> i32 {
    value.max(i64::from(i32::MIN)).min(i64::from(i32::MAX)) as i32
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Line {
        Line { start, end }
    }
}

/// Pixel rectangle of one cell, corners normalised so that `x1 <= x2` and `y1 <= y2`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellBounds {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl CellBounds {
    pub fn from_corners(a: Point, b: Point) -> CellBounds {
        CellBounds {
            x1: a.x.min(b.x),
            y1: a.y.min(b.y),
            x2: a.x.max(b.x),
            y2: a.y.max(b.y),
        }
    }

    /// Where path segments between cells are anchored. Rounds towards the top left corner.
    pub fn centre(&self) -> Point {
        let halfway = |a: i32, b: i32| (i64::from(a) + (i64::from(b) - i64::from(a)) / 2) as i32;
        Point::new(halfway(self.x1, self.x2), halfway(self.y1, self.y2))
    }

    /// The segment a wall on the given side is drawn along.
    pub fn wall_line(&self, side: Direction) -> Line {
        let (x1, y1, x2, y2) = (self.x1, self.y1, self.x2, self.y2);
        match side {
            Direction::Left => Line::new(Point::new(x1, y1), Point::new(x1, y2)),
            Direction::Right => Line::new(Point::new(x2, y1), Point::new(x2, y2)),
            Direction::Down => Line::new(Point::new(x1, y2), Point::new(x2, y2)),
            Direction::Up => Line::new(Point::new(x1, y1), Point::new(x2, y1)),
        }
    }
}

/// Maps grid coordinates into pixel space: the grid's top left corner sits at `origin` and every
/// cell is `cell_width x cell_height` pixels. The maze algorithms never look at any of this.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Layout {
    pub origin: Point,
    pub cell_width: Width,
    pub cell_height: Height,
}

impl Layout {
    pub fn new(origin: Point, cell_width: Width, cell_height: Height) -> Layout {
        Layout {
            origin,
            cell_width,
            cell_height,
        }
    }

    /// Pixels outside the `i32` range are clamped to it. A layout whose `canvas_size` is `Ok` never
    /// needs clamping for coordinates on its grid.
    pub fn cell_bounds(&self, coord: GridCoordinate) -> CellBounds {
        let (w, h) = (i64::from(self.cell_width.0), i64::from(self.cell_height.0));
        let x1 = i64::from(self.origin.x).saturating_add(i64::from(coord.x).saturating_mul(w));
        let y1 = i64::from(self.origin.y).saturating_add(i64::from(coord.y).saturating_mul(h));
        CellBounds::from_corners(Point::new(clamp_to_i32(x1), clamp_to_i32(y1)),
                                 Point::new(clamp_to_i32(x1.saturating_add(w)),
                                            clamp_to_i32(y1.saturating_add(h))))
    }

    #[inline]
    pub fn centre(&self, coord: GridCoordinate) -> Point {
        self.cell_bounds(coord).centre()
    }

    /// Pixels needed to show the whole grid, origin offset included, plus a one pixel margin so
    /// the right and bottom boundary walls land inside the canvas.
    ///
    /// Fails with `CanvasTooLarge` when either extent leaves the `i32` pixel range or the pixel
    /// buffer would not be addressable.
    pub fn canvas_size(&self, columns: ColumnsCount, rows: RowsCount) -> Result<(Width, Height)> {
        let too_large = || ErrorKind::CanvasTooLarge(columns.0,
                                                     rows.0,
                                                     self.cell_width.0,
                                                     self.cell_height.0);
        let extent = |origin: i32, count: usize, cell: u32| -> Option<u32> {
            let cells = i32::try_from(count).ok()?
                .checked_mul(i32::try_from(cell).ok()?)?;
            let pixels = origin.max(0).checked_add(cells)?.checked_add(1)?;
            u32::try_from(pixels).ok()
        };

        let width = extent(self.origin.x, columns.0, self.cell_width.0).ok_or_else(too_large)?;
        let height = extent(self.origin.y, rows.0, self.cell_height.0).ok_or_else(too_large)?;

        let buffer_bytes = u64::from(width) * u64::from(height) * BYTES_PER_PIXEL;
        if usize::try_from(buffer_bytes).map_or(true, |bytes| bytes > isize::MAX as usize) {
            bail!(too_large());
        }
        Ok((Width(width), Height(height)))
    }
}

impl Default for Layout {
    fn default() -> Layout {
        Layout::new(Point::default(), Width(20), Height(20))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn corners_are_normalised() {
        let bounds = CellBounds::from_corners(Point::new(30, 5), Point::new(10, 25));
        assert_eq!(bounds, CellBounds { x1: 10, y1: 5, x2: 30, y2: 25 });
    }

    #[test]
    fn centre_rounds_down() {
        let bounds = CellBounds::from_corners(Point::new(0, 0), Point::new(5, 7));
        assert_eq!(bounds.centre(), Point::new(2, 3));
        let even = CellBounds::from_corners(Point::new(20, 40), Point::new(40, 60));
        assert_eq!(even.centre(), Point::new(30, 50));
    }

    #[test]
    fn cells_are_placed_from_the_origin() {
        let layout = Layout::new(Point::new(50, 10), Width(20), Height(10));
        assert_eq!(layout.cell_bounds(GridCoordinate::new(0, 0)),
                   CellBounds { x1: 50, y1: 10, x2: 70, y2: 20 });
        assert_eq!(layout.cell_bounds(GridCoordinate::new(2, 3)),
                   CellBounds { x1: 90, y1: 40, x2: 110, y2: 50 });
        assert_eq!(layout.centre(GridCoordinate::new(2, 3)), Point::new(100, 45));
    }

    #[test]
    fn wall_lines() {
        let bounds = CellBounds { x1: 0, y1: 0, x2: 10, y2: 10 };
        assert_eq!(bounds.wall_line(Direction::Left), Line::new(Point::new(0, 0), Point::new(0, 10)));
        assert_eq!(bounds.wall_line(Direction::Right), Line::new(Point::new(10, 0), Point::new(10, 10)));
        assert_eq!(bounds.wall_line(Direction::Up), Line::new(Point::new(0, 0), Point::new(10, 0)));
        assert_eq!(bounds.wall_line(Direction::Down), Line::new(Point::new(0, 10), Point::new(10, 10)));
    }

    #[test]
    fn canvas_fits_the_grid() {
        let layout = Layout::new(Point::new(5, 5), Width(10), Height(10));
        assert_eq!(layout.canvas_size(ColumnsCount(3), RowsCount(2)).unwrap(), (Width(36), Height(26)));
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let layout = Layout::new(Point::new(0, 0), Width(20000), Height(20));
        match layout.canvas_size(ColumnsCount(300_000), RowsCount(1)) {
            Err(Error(ErrorKind::CanvasTooLarge(columns, rows, w, h), _)) => {
                assert_eq!((columns, rows, w, h), (300_000, 1, 20000, 20))
            }
            other => panic!("expected a canvas too large error, got {:?}", other),
        }

        let tall = Layout::new(Point::new(i32::MAX - 10, 0), Width(10), Height(10));
        assert!(tall.canvas_size(ColumnsCount(1), RowsCount(1)).is_err());
        assert!(Layout::default().canvas_size(ColumnsCount(usize::MAX), RowsCount(1)).is_err());
    }

    #[test]
    fn far_cells_clamp_instead_of_overflowing() {
        let layout = Layout::new(Point::new(0, 0), Width(20000), Height(20));
        let bounds = layout.cell_bounds(GridCoordinate::new(200_000, 0));
        assert_eq!((bounds.x1, bounds.x2), (i32::MAX, i32::MAX));
        assert_eq!((bounds.y1, bounds.y2), (0, 20));
        assert_eq!(bounds.centre(), Point::new(i32::MAX, 10));

        let wide = CellBounds { x1: i32::MIN, y1: 0, x2: i32::MAX, y2: 0 };
        assert_eq!(wide.centre(), Point::new(-1, 0));
    }
}
