//! **maze_solver** generates random perfect mazes with a recursive backtracker and finds a way
//! through them with a depth first search, optionally drawing every step as it happens.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod layout;
pub mod maze;
pub mod observers;
pub mod pathing;
pub mod renderers;
pub mod units;
