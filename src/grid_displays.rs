use std::fmt;

use fnv::FnvHashSet;
use smallvec::SmallVec;

use crate::cells::{Direction, GridCoordinate};
use crate::grid::Grid;
use crate::pathing::Distances;

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

impl GridDisplay for Distances {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}
impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}
impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}
impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}
impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {

        let contains_coordinate =
            |coordinates: &CoordinateSmallVec| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            String::from(" S ")

        } else if contains_coordinate(&self.end_coordinates) {

            String::from(" E ")

        } else {
            String::from("   ")
        }
    }
}

/// A grid paired with what to show inside its cells, ready for `Display`.
pub struct TextRender<'a> {
    grid: &'a Grid,
    grid_display: Option<&'a dyn GridDisplay>,
}

impl<'a> TextRender<'a> {
    pub fn new(grid: &'a Grid, grid_display: Option<&'a dyn GridDisplay>) -> TextRender<'a> {
        TextRender { grid, grid_display }
    }

    // The wall along the top edge of cell (column, row); row may be one past the last row.
    fn horizontal_wall(&self, column: u32, row: u32) -> bool {
        let above = row.checked_sub(1)
            .and_then(|r| self.grid.cell(GridCoordinate::new(column, r)))
            .map_or(false, |cell| cell.has_wall(Direction::Down));
        let below = self.grid
            .cell(GridCoordinate::new(column, row))
            .map_or(false, |cell| cell.has_wall(Direction::Up));
        above || below
    }

    // The wall along the left edge of cell (column, row); column may be one past the last column.
    fn vertical_wall(&self, column: u32, row: u32) -> bool {
        let left = column.checked_sub(1)
            .and_then(|c| self.grid.cell(GridCoordinate::new(c, row)))
            .map_or(false, |cell| cell.has_wall(Direction::Right));
        let right = self.grid
            .cell(GridCoordinate::new(column, row))
            .map_or(false, |cell| cell.has_wall(Direction::Left));
        left || right
    }

    fn junction(&self, x: u32, y: u32, columns: u32, rows: u32) -> &'static str {
        const WALL_L: &str = "╴";
        const WALL_R: &str = "╶";
        const WALL_U: &str = "╵";
        const WALL_D: &str = "╷";
        const WALL_LR: &str = "─";
        const WALL_UD: &str = "│";
        const WALL_LD: &str = "┐";
        const WALL_RU: &str = "└";
        const WALL_LU: &str = "┘";
        const WALL_RD: &str = "┌";
        const WALL_LRU: &str = "┴";
        const WALL_LRD: &str = "┬";
        const WALL_LRUD: &str = "┼";
        const WALL_RUD: &str = "├";
        const WALL_LUD: &str = "┤";

        let show_left_section = x > 0 && self.horizontal_wall(x - 1, y);
        let show_right_section = x < columns && self.horizontal_wall(x, y);
        let show_up_section = y > 0 && self.vertical_wall(x, y - 1);
        let show_down_section = y < rows && self.vertical_wall(x, y);

        match (show_left_section, show_right_section, show_up_section, show_down_section) {
            (true, true, true, true) => WALL_LRUD,
            (true, true, true, false) => WALL_LRU,
            (true, true, false, true) => WALL_LRD,
            (true, false, true, true) => WALL_LUD,
            (false, true, true, true) => WALL_RUD,
            (true, true, false, false) => WALL_LR,
            (false, false, true, true) => WALL_UD,
            (false, true, true, false) => WALL_RU,
            (true, false, false, true) => WALL_LD,
            (true, false, true, false) => WALL_LU,
            (false, true, false, true) => WALL_RD,
            (true, false, false, false) => WALL_L,
            (false, true, false, false) => WALL_R,
            (false, false, true, false) => WALL_U,
            (false, false, false, true) => WALL_D,
            _ => " ",
        }
    }
}

impl<'a> fmt::Display for TextRender<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_LR_3: &str = "───";
        const WALL_UD: &str = "│";
        let default_cell_body = String::from("   ");

        let columns = self.grid.columns().0 as u32;
        let rows = self.grid.rows().0 as u32;
        let mut output = String::new();

        // Each text row pair is the line of junctions and horizontal walls above a grid row, then the
        // row itself: vertical walls interleaved with cell bodies. One more junction line closes the bottom.
        for y in 0..=rows {
            for x in 0..=columns {
                output.push_str(self.junction(x, y, columns, rows));
                if x < columns {
                    output.push_str(if self.horizontal_wall(x, y) { WALL_LR_3 } else { "   " });
                }
            }
            output.push('\n');

            if y == rows {
                break;
            }
            for x in 0..=columns {
                output.push_str(if self.vertical_wall(x, y) { WALL_UD } else { " " });
                if x < columns {
                    let coord = GridCoordinate::new(x, y);
                    match self.grid_display {
                        Some(displayer) => output.push_str(displayer.render_cell_body(coord).as_str()),
                        None => output.push_str(default_cell_body.as_str()),
                    }
                }
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", TextRender::new(self, None))
    }
}
