use std::convert::From;
use std::fmt;

use crate::units::{ColumnIndex, RowIndex};

/// A (column, row) position on the grid. `x` is the column, `y` is the row.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        GridCoordinate::new(col as u32, row as u32)
    }

    #[inline]
    pub fn column(&self) -> ColumnIndex {
        ColumnIndex(self.x as usize)
    }

    #[inline]
    pub fn row(&self) -> RowIndex {
        RowIndex(self.y as usize)
    }

    /// The coordinate one step away in `dir`, if it is representable.
    /// Says nothing about whether it lies inside any particular grid.
    pub fn offset(&self, dir: Direction) -> Option<GridCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            Direction::Right => x.checked_add(1).map(|x| GridCoordinate { x, y }),
            Direction::Left => x.checked_sub(1).map(|x| GridCoordinate { x, y }),
            Direction::Down => y.checked_add(1).map(|y| GridCoordinate { x, y }),
            Direction::Up => y.checked_sub(1).map(|y| GridCoordinate { x, y }),
        }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// Every traversal enumerates neighbours in this order, which is what makes a seeded
    /// generation or a search reproducible.
    pub const ALL: [Direction; 4] = [Direction::Right, Direction::Left, Direction::Down, Direction::Up];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
        }
    }
}

pub const TOP_WALL_BIT: u8 = 1;
pub const RIGHT_WALL_BIT: u8 = 2;
pub const BOTTOM_WALL_BIT: u8 = 4;
pub const LEFT_WALL_BIT: u8 = 8;

/// A single grid square: four walls plus traversal bookkeeping.
///
/// Generation and searching keep separate marks. `carved` records membership of the spanning tree
/// while it is being built, `explored` is stamped with the epoch of the search that reached the cell,
/// so a later search never sees the marks of an earlier one.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    carved: bool,
    explored: u32,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            top: true,
            bottom: true,
            left: true,
            right: true,
            carved: false,
            explored: 0,
        }
    }
}

impl Cell {
    #[inline]
    pub fn has_wall(&self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.top,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    #[inline]
    pub fn set_wall(&mut self, dir: Direction, present: bool) {
        match dir {
            Direction::Up => self.top = present,
            Direction::Down => self.bottom = present,
            Direction::Left => self.left = present,
            Direction::Right => self.right = present,
        }
    }

    /// Walls packed as bits: top 1, right 2, bottom 4, left 8.
    pub fn wall_mask(&self) -> u8 {
        let mut mask = 0;
        if self.top {
            mask |= TOP_WALL_BIT;
        }
        if self.right {
            mask |= RIGHT_WALL_BIT;
        }
        if self.bottom {
            mask |= BOTTOM_WALL_BIT;
        }
        if self.left {
            mask |= LEFT_WALL_BIT;
        }
        mask
    }

    pub fn walls_count(&self) -> usize {
        self.wall_mask().count_ones() as usize
    }

    #[inline]
    pub fn is_carved(&self) -> bool {
        self.carved
    }

    #[inline]
    pub(crate) fn set_carved(&mut self, carved: bool) {
        self.carved = carved;
    }

    #[inline]
    pub(crate) fn explored_epoch(&self) -> u32 {
        self.explored
    }

    #[inline]
    pub(crate) fn stamp_explored(&mut self, epoch: u32) {
        self.explored = epoch;
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn new_cell_is_fully_walled_and_unmarked() {
        let cell = Cell::default();
        for dir in Direction::ALL.iter() {
            assert!(cell.has_wall(*dir));
        }
        assert_eq!(cell.wall_mask(), 15);
        assert_eq!(cell.walls_count(), 4);
        assert!(!cell.is_carved());
        assert_eq!(cell.explored_epoch(), 0);
    }

    #[test]
    fn set_wall_only_touches_one_side() {
        let mut cell = Cell::default();
        cell.set_wall(Direction::Left, false);
        assert!(!cell.left);
        assert!(cell.top && cell.bottom && cell.right);
        assert_eq!(cell.wall_mask(), TOP_WALL_BIT | RIGHT_WALL_BIT | BOTTOM_WALL_BIT);

        cell.set_wall(Direction::Down, false);
        assert!(!cell.has_wall(Direction::Down));
        assert_eq!(cell.walls_count(), 2);

        cell.set_wall(Direction::Left, true);
        assert!(cell.has_wall(Direction::Left));
    }

    #[test]
    fn opposite_directions() {
        for dir in Direction::ALL.iter() {
            assert_ne!(dir.opposite(), *dir);
            assert_eq!(dir.opposite().opposite(), *dir);
        }
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
    }

    #[test]
    fn coordinate_offsets() {
        let gc = |x, y| GridCoordinate::new(x, y);
        assert_eq!(gc(0, 0).offset(Direction::Left), None);
        assert_eq!(gc(0, 0).offset(Direction::Up), None);
        assert_eq!(gc(0, 0).offset(Direction::Right), Some(gc(1, 0)));
        assert_eq!(gc(0, 0).offset(Direction::Down), Some(gc(0, 1)));
        assert_eq!(gc(3, 4).offset(Direction::Left), Some(gc(2, 4)));
        assert_eq!(gc(3, 4).offset(Direction::Up), Some(gc(3, 3)));
        assert_eq!(gc(u32::MAX, 0).offset(Direction::Right), None);
    }

    #[test]
    fn coordinate_from_indices() {
        let coord = GridCoordinate::from_row_column_indices(ColumnIndex(2), RowIndex(7));
        assert_eq!(coord, GridCoordinate::from((2, 7)));
        assert_eq!(coord.column(), ColumnIndex(2));
        assert_eq!(coord.row(), RowIndex(7));
        assert_eq!(format!("{}", coord), "(2, 7)");
    }
}
