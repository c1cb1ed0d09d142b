use crate::cells::{Cell, GridCoordinate};

/// Receives notifications while a maze is built and searched.
///
/// Every method has a no-op default and nothing is returned, so an observer can watch but never
/// steer the algorithms.
pub trait MazeObserver {
    /// The walls of the cell at `coord` changed, or the cell is being shown for the first time.
    fn draw_cell_walls(&mut self, _coord: GridCoordinate, _cell: &Cell) {}

    /// The search stepped from `from` to `to`, or retracted that step when `undo` is set.
    fn draw_move(&mut self, _from: GridCoordinate, _to: GridCoordinate, _undo: bool) {}

    /// Called after each visible mutation; a chance to present a frame and pace the animation.
    fn animate(&mut self) {}
}

#[derive(Debug, Default, Copy, Clone)]
pub struct NullObserver;

impl MazeObserver for NullObserver {}

impl<'a, O: MazeObserver + ?Sized> MazeObserver for &'a mut O {
    fn draw_cell_walls(&mut self, coord: GridCoordinate, cell: &Cell) {
        (**self).draw_cell_walls(coord, cell)
    }

    fn draw_move(&mut self, from: GridCoordinate, to: GridCoordinate, undo: bool) {
        (**self).draw_move(from, to, undo)
    }

    fn animate(&mut self) {
        (**self).animate()
    }
}

/// Event log observer, handy for asserting on what an algorithm reported.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub events: Vec<ObservedEvent>,
}

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ObservedEvent {
    Walls(GridCoordinate, u8),
    Move { from: GridCoordinate, to: GridCoordinate, undo: bool },
    Frame,
}

impl RecordingObserver {
    pub fn new() -> RecordingObserver {
        RecordingObserver::default()
    }

    pub fn moves(&self) -> Vec<(GridCoordinate, GridCoordinate, bool)> {
        self.events
            .iter()
            .filter_map(|event| match *event {
                ObservedEvent::Move { from, to, undo } => Some((from, to, undo)),
                _ => None,
            })
            .collect()
    }

    pub fn frames(&self) -> usize {
        self.events.iter().filter(|e| **e == ObservedEvent::Frame).count()
    }
}

impl MazeObserver for RecordingObserver {
    fn draw_cell_walls(&mut self, coord: GridCoordinate, cell: &Cell) {
        self.events.push(ObservedEvent::Walls(coord, cell.wall_mask()));
    }

    fn draw_move(&mut self, from: GridCoordinate, to: GridCoordinate, undo: bool) {
        self.events.push(ObservedEvent::Move { from, to, undo });
    }

    fn animate(&mut self) {
        self.events.push(ObservedEvent::Frame);
    }
}
