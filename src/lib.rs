//! gridlife - incremental Game of Life engine.
//!
//! This crate simulates a two-dimensional binary cellular automaton and
//! renders its evolution incrementally: each generation step yields a delta of
//! exactly the cells that changed, and only those cells are painted.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: Configuration and seeding for simulations
//! - `engine`: Grid state, the update rule, and change deltas
//! - `runtime`: The threaded command/event loop and frame-paced scheduler
//!
//! # Example
//!
//! Driving the engine directly, single-threaded:
//!
//! ```rust
//! use gridlife::{Grid, Seed};
//!
//! // A blinker on a 5x5 grid.
//! let seed = Seed::from_indexes(vec![11, 12, 13]);
//! let mut grid = Grid::new(5, 5, &seed).unwrap();
//!
//! // One generation; the delta lists exactly the cells that changed,
//! // ascending by index.
//! let delta = grid.advance();
//! assert_eq!(delta.indexes(), &[7, 11, 13, 17]);
//! ```
//!
//! Threaded playback goes through [`Controller`], which owns the engine
//! thread and exchanges [`Command`]s and [`Event`]s with it over channels:
//!
//! ```rust,no_run
//! use gridlife::{Controller, EngineConfig, Event, RendererSink, Seed};
//!
//! struct NullSink;
//! impl RendererSink for NullSink {
//!     fn fill_cell(&mut self, _x: u32, _y: u32, _size: u32) {}
//!     fn clear_cell(&mut self, _x: u32, _y: u32, _size: u32) {}
//! }
//!
//! let controller = Controller::spawn(EngineConfig::default()).unwrap();
//! let seed = Seed::random(64, 16 * 16).unwrap();
//! controller.initialize(seed, Box::new(NullSink), 16, 16).unwrap();
//!
//! assert_eq!(controller.events().recv().unwrap(), Event::Initialized);
//! ```

pub mod engine;
pub mod runtime;
pub mod schema;

// Re-export commonly used types
pub use engine::{CellState, Delta, Grid};
pub use runtime::{
    Command, CommandError, Controller, ControllerError, Event, RendererSink, StateError,
};
pub use schema::{ConfigError, EngineConfig, Seed, ValidationError};
