use fnv::FnvHashMap;
use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::cells::{Direction, GridCoordinate};
use crate::grid::Grid;
use crate::observers::MazeObserver;

/// One step drawn by the depth first search. `undo` marks the retraction of an earlier step
/// that led into a dead end.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct PathMove {
    pub from: GridCoordinate,
    pub to: GridCoordinate,
    pub undo: bool,
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct SearchOutcome {
    pub found: bool,
    /// Start to end inclusive when found, otherwise empty.
    pub path: Vec<GridCoordinate>,
    /// Every tentative step and retraction, in the order they happened.
    pub moves: Vec<PathMove>,
}

impl SearchOutcome {
    fn not_found(moves: Vec<PathMove>) -> SearchOutcome {
        SearchOutcome {
            found: false,
            path: vec![],
            moves,
        }
    }

    pub fn forward_moves(&self) -> impl Iterator<Item = &PathMove> {
        self.moves.iter().filter(|m| !m.undo)
    }

    pub fn backtracks_count(&self) -> usize {
        self.moves.iter().filter(|m| m.undo).count()
    }
}

#[derive(Debug, Copy, Clone)]
struct SearchFrame {
    coord: GridCoordinate,
    next_direction: usize,
}

/// Is there a route from `start` to `end` that does not pass through any wall?
pub fn solve<O: MazeObserver>(grid: &mut Grid,
                              start: GridCoordinate,
                              end: GridCoordinate,
                              observer: &mut O)
                              -> bool {
    depth_first_search(grid, start, end, observer).found
}

/// Depth first search with backtracking from `start` to `end`.
///
/// Directions are tried in `Direction::ALL` order and the search stops at the first route found.
/// A cell is explored at most once per search: when a branch dead ends its cells stay explored, so
/// they are never entered again through some other parent. The only trace of a retraction is the
/// undo move reported to the observer.
///
/// Exploration marks are stamped with a fresh search epoch, so the grid needs no reset between
/// searches and the walls are never touched. Coordinates outside the grid find nothing.
pub fn depth_first_search<O: MazeObserver>(grid: &mut Grid,
                                           start: GridCoordinate,
                                           end: GridCoordinate,
                                           observer: &mut O)
                                           -> SearchOutcome {
    if !grid.is_valid_coordinate(start) || !grid.is_valid_coordinate(end) {
        warn!("search from {} to {} leaves the grid", start, end);
        return SearchOutcome::not_found(vec![]);
    }

    let epoch = grid.begin_search();
    grid.mark_explored(start, epoch);
    observer.animate();

    if start == end {
        return SearchOutcome {
            found: true,
            path: vec![start],
            moves: vec![],
        };
    }

    let mut moves = vec![];
    let mut stack = vec![SearchFrame {
                             coord: start,
                             next_direction: 0,
                         }];

    while let Some(frame) = stack.last_mut() {

        let current = frame.coord;
        let mut next_step = None;
        while frame.next_direction < Direction::ALL.len() {
            let direction = Direction::ALL[frame.next_direction];
            frame.next_direction += 1;

            if let Some(neighbour) = grid.neighbour_at_direction(current, direction) {
                if !grid.is_explored(neighbour, epoch) && grid.is_open(current, direction) {
                    next_step = Some(neighbour);
                    break;
                }
            }
        }

        match next_step {
            Some(next) => {
                trace!("move {} to {}", current, next);
                moves.push(PathMove {
                    from: current,
                    to: next,
                    undo: false,
                });
                observer.draw_move(current, next, false);
                grid.mark_explored(next, epoch);
                observer.animate();

                stack.push(SearchFrame {
                    coord: next,
                    next_direction: 0,
                });

                if next == end {
                    let path = stack.iter().map(|f| f.coord).collect::<Vec<_>>();
                    debug!("found a {} cell path after {} moves", path.len(), moves.len());
                    return SearchOutcome {
                        found: true,
                        path,
                        moves,
                    };
                }
            }
            None => {
                let _ = stack.pop();
                if let Some(parent) = stack.last() {
                    trace!("undo {} to {}", parent.coord, current);
                    moves.push(PathMove {
                        from: parent.coord,
                        to: current,
                        undo: true,
                    });
                    observer.draw_move(parent.coord, current, true);
                    observer.animate();
                }
            }
        }
    }

    debug!("no path from {} to {} after {} moves", start, end, moves.len());
    SearchOutcome::not_found(moves)
}

/// Step counts from a start cell to every cell reachable from it, a breadth first flood fill.
#[derive(Debug, Clone)]
pub struct Distances {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    pub fn for_grid(grid: &Grid, start_coordinate: GridCoordinate) -> Option<Distances> {

        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = 0;
        let mut distances =
            FnvHashMap::with_capacity_and_hasher(grid.size(), Default::default());
        distances.insert(start_coordinate, 0);

        // Every step is one more than the previous cell, so the first time a cell is reached is
        // also its shortest distance. The map doubles as the visited set.
        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell = distances[cell_coord];
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                for &(_, link_coordinate) in grid.links(*cell_coord).iter() {
                    if !distances.contains_key(&link_coordinate) {
                        distances.insert(link_coordinate, distance_to_cell + 1);
                        new_frontier.push(link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate,
            distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }

    pub fn furthest_points_on_grid(&self) -> SmallVec<[GridCoordinate; 8]> {
        let mut furthest = self.distances
            .iter()
            .filter(|&(_, distance)| *distance == self.max_distance)
            .map(|(coord, _)| *coord)
            .collect::<SmallVec<[GridCoordinate; 8]>>();
        furthest.sort();
        furthest
    }
}

/// Walk back downhill from `end_point` to the start of `distances_from_start`.
/// None if the end point cannot be reached.
pub fn shortest_path(grid: &Grid,
                     distances_from_start: &Distances,
                     end_point: GridCoordinate)
                     -> Option<Vec<GridCoordinate>> {

    let mut current_distance = distances_from_start.distance_from_start_to(end_point)?;
    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {
        let closer = grid.links(current_coord)
            .iter()
            .filter_map(|&(_, link)| {
                distances_from_start.distance_from_start_to(link).map(|d| (link, d))
            })
            .min_by_key(|&(_, d)| d);

        match closer {
            Some((closer_coord, closer_distance)) if closer_distance < current_distance => {
                current_coord = closer_coord;
                current_distance = closer_distance;
                path.push(current_coord);
            }
            // The distances were computed for some other grid.
            _ => return None,
        }
    }

    path.reverse();
    Some(path)
}
