//! Runtime module - the threaded command/event loop around the engine.
//!
//! Two single-threaded contexts communicate exclusively over ordered mpsc
//! channels: the [`Controller`] lives on the caller's thread, the engine loop
//! owns the [`Session`] on its own thread. The scheduler module documents the
//! pacing model.

mod controller;
mod protocol;
mod scheduler;
mod session;

pub use controller::{Controller, ControllerError};
pub use protocol::{Command, CommandError, Event, RendererSink, StateError};
pub use session::Session;
