use std::fmt;

use error_chain::bail;
use itertools::iproduct;
use petgraph::algo;
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cell, Direction, GridCoordinate};
use crate::errors::*;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

pub type NeighbourSmallVec = SmallVec<[(Direction, GridCoordinate); 4]>;

/// A `columns x rows` rectangle of cells stored in row-major order.
///
/// Every cell starts with all four walls. The only wall mutations are `carve_passage`, which always
/// opens both sides of an adjacency together, and `break_entrance_and_exit`.
#[derive(Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    columns: ColumnsCount,
    rows: RowsCount,
    search_epoch: u32,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: columns: {:?}, rows: {:?}, passages: {}",
               self.columns,
               self.rows,
               self.passages_count().0)
    }
}

impl Grid {
    /// Allocate a fully walled grid.
    ///
    /// Fails with `InvalidDimension` if either count is zero, or if the grid cannot be addressed with
    /// `u32` coordinates.
    pub fn new(columns: ColumnsCount, rows: RowsCount) -> Result<Grid> {
        let (ColumnsCount(cols), RowsCount(rows_count)) = (columns, rows);

        let addressable = cols <= u32::MAX as usize && rows_count <= u32::MAX as usize;
        let cells_count = cols.checked_mul(rows_count);
        match cells_count {
            Some(n) if n > 0 && addressable => Ok(Grid {
                cells: vec![Cell::default(); n],
                columns,
                rows,
                search_epoch: 0,
            }),
            _ => bail!(ErrorKind::InvalidDimension(cols, rows_count)),
        }
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.size()), EdgesCount(self.size() - 1))
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.columns.0 && (coord.y as usize) < self.rows.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.columns.0 + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    #[inline]
    fn cell_mut(&mut self, coord: GridCoordinate) -> Option<&mut Cell> {
        match self.grid_coordinate_to_index(coord) {
            Some(index) => Some(&mut self.cells[index]),
            None => None,
        }
    }

    /// The adjacent coordinate in `direction`, or None when that would leave the grid.
    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: Direction)
                                  -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        coord.offset(direction).filter(|neighbour| self.is_valid_coordinate(*neighbour))
    }

    /// In-bounds neighbours in `Direction::ALL` order, walls not considered.
    pub fn neighbours(&self, coord: GridCoordinate) -> NeighbourSmallVec {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir).map(|n| (*dir, n)))
            .collect()
    }

    /// Neighbours reachable through an open passage, in `Direction::ALL` order.
    pub fn links(&self, coord: GridCoordinate) -> NeighbourSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|&(dir, _)| self.is_open(coord, dir))
            .collect()
    }

    /// Remove the wall on `coord`'s `direction` side together with the facing wall of the neighbour.
    /// Returns the neighbour, or None (and changes nothing) if there is no neighbour that way.
    pub fn carve_passage(&mut self,
                         coord: GridCoordinate,
                         direction: Direction)
                         -> Option<GridCoordinate> {
        let neighbour = self.neighbour_at_direction(coord, direction)?;
        if let Some(cell) = self.cell_mut(coord) {
            cell.set_wall(direction, false);
        }
        if let Some(cell) = self.cell_mut(neighbour) {
            cell.set_wall(direction.opposite(), false);
        }
        Some(neighbour)
    }

    /// Is movement from `coord` towards `direction` stopped by a wall or the grid edge?
    ///
    /// A wall reported by either of the two cells counts as present.
    pub fn is_blocked(&self, coord: GridCoordinate, direction: Direction) -> bool {
        match (self.cell(coord), self.neighbour_at_direction(coord, direction)) {
            (Some(cell), Some(neighbour)) => {
                cell.has_wall(direction) ||
                self.cell(neighbour).map_or(true, |n| n.has_wall(direction.opposite()))
            }
            _ => true,
        }
    }

    #[inline]
    pub fn is_open(&self, coord: GridCoordinate, direction: Direction) -> bool {
        !self.is_blocked(coord, direction)
    }

    pub fn is_carved(&self, coord: GridCoordinate) -> bool {
        self.cell(coord).map_or(false, Cell::is_carved)
    }

    pub(crate) fn mark_carved(&mut self, coord: GridCoordinate) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.set_carved(true);
        }
    }

    /// Forget which cells a generation run visited.
    pub fn reset_carve_marks(&mut self) {
        for cell in &mut self.cells {
            cell.set_carved(false);
        }
    }

    /// Start a new search, returning the epoch its exploration marks are stamped with.
    /// Marks left by earlier searches are stale as soon as this returns.
    pub fn begin_search(&mut self) -> u32 {
        self.search_epoch = self.search_epoch.wrapping_add(1);
        if self.search_epoch == 0 {
            for cell in &mut self.cells {
                cell.stamp_explored(0);
            }
            self.search_epoch = 1;
        }
        self.search_epoch
    }

    pub fn mark_explored(&mut self, coord: GridCoordinate, epoch: u32) {
        if let Some(cell) = self.cell_mut(coord) {
            cell.stamp_explored(epoch);
        }
    }

    pub fn is_explored(&self, coord: GridCoordinate, epoch: u32) -> bool {
        self.cell(coord).map_or(false, |cell| cell.explored_epoch() == epoch)
    }

    /// The top left cell.
    #[inline]
    pub fn entrance(&self) -> GridCoordinate {
        GridCoordinate::new(0, 0)
    }

    /// The bottom right cell.
    #[inline]
    pub fn exit(&self) -> GridCoordinate {
        GridCoordinate::new((self.columns.0 - 1) as u32, (self.rows.0 - 1) as u32)
    }

    /// Open the outer left wall of the entrance and the outer right wall of the exit.
    pub fn break_entrance_and_exit(&mut self) {
        let (entrance, exit) = (self.entrance(), self.exit());
        if let Some(cell) = self.cell_mut(entrance) {
            cell.set_wall(Direction::Left, false);
        }
        if let Some(cell) = self.cell_mut(exit) {
            cell.set_wall(Direction::Right, false);
        }
    }

    /// Row-major iteration over every coordinate.
    pub fn iter(&self) -> impl Iterator<Item = GridCoordinate> {
        iproduct!(0..self.rows.0 as u32, 0..self.columns.0 as u32).map(|(y, x)| GridCoordinate::new(x, y))
    }

    /// Every open adjacency, each reported once from its left or upper cell.
    pub fn passages(&self) -> Vec<(GridCoordinate, GridCoordinate)> {
        let mut passages = Vec::with_capacity(self.size());
        for coord in self.iter() {
            for dir in &[Direction::Right, Direction::Down] {
                if self.is_open(coord, *dir) {
                    if let Some(neighbour) = self.neighbour_at_direction(coord, *dir) {
                        passages.push((coord, neighbour));
                    }
                }
            }
        }
        passages
    }

    pub fn passages_count(&self) -> EdgesCount {
        EdgesCount(self.passages().len())
    }

    /// The grid as an undirected graph: one node per cell in row-major order, one edge per passage.
    pub fn passage_graph(&self) -> UnGraph<GridCoordinate, ()> {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = UnGraph::with_capacity(nodes, edges);
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.passages() {
            if let (Some(a_index), Some(b_index)) =
                (self.grid_coordinate_to_index(a), self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    /// Connected, acyclic and spanning: exactly one route between any two cells.
    pub fn is_perfect_maze(&self) -> bool {
        let graph = self.passage_graph();
        graph.edge_count() == self.size() - 1 && algo::connected_components(&graph) == 1
    }

    /// Do all adjacent pairs agree about the wall between them?
    pub fn walls_are_symmetric(&self) -> bool {
        self.iter().all(|coord| {
            [Direction::Right, Direction::Down].iter().all(|dir| {
                match (self.cell(coord), self.neighbour_at_direction(coord, *dir)) {
                    (Some(cell), Some(neighbour)) => {
                        self.cell(neighbour)
                            .map_or(false, |n| n.has_wall(dir.opposite()) == cell.has_wall(*dir))
                    }
                    _ => true,
                }
            })
        })
    }
}
