//! Command/event protocol between the controller and the engine thread.

use std::fmt::{self, Debug, Formatter};

use crate::schema::{Seed, ValidationError};

/// Destination for per-cell paint operations.
///
/// The engine maps a changed cell to a square pixel block and asks the sink to
/// fill it (transition to alive) or clear it (transition to dead). Only cells
/// present in a delta are ever touched; full-surface redraws never happen
/// after initialization. Ownership of the sink moves into the engine thread
/// with the Initialize command, hence the `Send` bound.
pub trait RendererSink: Send {
    /// Fill the block whose top-left pixel is `(x, y)` with the accent color.
    fn fill_cell(&mut self, x: u32, y: u32, size: u32);

    /// Clear the same block back to the background.
    fn clear_cell(&mut self, x: u32, y: u32, size: u32);
}

/// Intent sent from the controller to the engine thread.
///
/// Commands are delivered and applied in send order.
pub enum Command {
    /// Build the session and start playing. Duplicate initializes are silent
    /// no-ops.
    Initialize {
        seed: Seed,
        surface: Box<dyn RendererSink>,
        width: u32,
        height: u32,
    },
    /// Resume continuous play. No-op while already playing.
    Start,
    /// Halt continuous play at the next frame check. No-op while paused.
    Pause,
    /// Exactly one generation step, then paused.
    Step,
    /// Flip the cell under the given surface-space pixel coordinates, then one
    /// generation step, then paused.
    ToggleCell { x: u32, y: u32 },
}

impl Debug for Command {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Command::Initialize {
                seed,
                width,
                height,
                ..
            } => formatter
                .debug_struct("Initialize")
                .field("seed_len", &seed.len())
                .field("width", width)
                .field("height", height)
                .finish_non_exhaustive(),
            Command::Start => write!(formatter, "Start"),
            Command::Pause => write!(formatter, "Pause"),
            Command::Step => write!(formatter, "Step"),
            Command::ToggleCell { x, y } => formatter
                .debug_struct("ToggleCell")
                .field("x", x)
                .field("y", y)
                .finish(),
        }
    }
}

/// Notification sent from the engine thread back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Emitted exactly once, after a successful Initialize.
    Initialized,
    /// Emitted once per executed generation step, whatever triggered it.
    Tick,
}

/// A command arrived in a lifecycle state that cannot serve it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("`{command}` command received before initialization")]
    NotInitialized { command: &'static str },
}

/// Why the engine rejected a command. Terminal to that command only; the
/// engine keeps running and its session state is untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    State(#[from] StateError),
}
