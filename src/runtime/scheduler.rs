//! Frame-paced engine loop.
//!
//! The engine thread owns all mutable simulation state and alternates between
//! two waits: blocked on the command channel while idle or paused, and a
//! frame-interval timeout while playing. Frame timeouts stand in for the
//! host's frame-presentation callback; an actual generation step only runs
//! when the step throttle has elapsed, which bounds the step rate
//! independently of the wake-up rate.
//!
//! Commands are applied strictly in send order, and always ahead of the frame
//! check that follows them, so a pause observed before a due step takes effect
//! before that step runs.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::engine::Grid;
use crate::schema::EngineConfig;

use super::protocol::{Command, CommandError, Event, StateError};
use super::session::Session;

/// Minimum-interval gate between executed steps.
///
/// An explicit value the session owns and tests can drive with synthetic
/// clocks.
#[derive(Debug)]
pub(crate) struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether enough time has passed since the last marked step. Always true
    /// before the first step.
    pub(crate) fn ready(&self, now: Instant) -> bool {
        self.last
            .is_none_or(|last| now.duration_since(last) >= self.interval)
    }

    pub(crate) fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

/// Engine thread body. Runs until the command sender is dropped.
pub(crate) fn run(commands: Receiver<Command>, events: Sender<Event>, config: EngineConfig) {
    let frame_interval = config.frame_interval();
    let mut session: Option<Session> = None;

    debug!("engine loop started");

    loop {
        let playing = session.as_ref().is_some_and(|session| session.is_playing());

        let command = if playing {
            match commands.recv_timeout(frame_interval) {
                Ok(command) => Some(command),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match commands.recv() {
                Ok(command) => Some(command),
                Err(_) => break,
            }
        };

        match command {
            Some(command) => {
                if let Err(error) = handle_command(&mut session, command, &events, &config) {
                    warn!("command rejected: {error}");
                }
            }
            None => {
                // Frame boundary during continuous play.
                if let Some(session) = session.as_mut()
                    && session.frame(Instant::now())
                    && events.send(Event::Tick).is_err()
                {
                    break;
                }
            }
        }
    }

    debug!("engine loop stopped");
}

/// Apply one command to the engine state.
///
/// Errors are terminal to the command alone: the session, if any, is left
/// untouched and the loop keeps serving.
pub(crate) fn handle_command(
    session: &mut Option<Session>,
    command: Command,
    events: &Sender<Event>,
    config: &EngineConfig,
) -> Result<(), CommandError> {
    match command {
        Command::Initialize {
            seed,
            surface,
            width,
            height,
        } => {
            if session.is_some() {
                debug!("duplicate initialize ignored");
                return Ok(());
            }

            let grid = Grid::new(width, height, &seed)?;
            debug!(
                "session initialized: {width}x{height}, {} cells alive",
                seed.len()
            );
            *session = Some(Session::new(grid, surface, config));
            let _ = events.send(Event::Initialized);
            Ok(())
        }
        Command::Start => {
            let session = ready(session, "start")?;
            session.resume();
            Ok(())
        }
        Command::Pause => {
            let session = ready(session, "pause")?;
            session.pause();
            Ok(())
        }
        Command::Step => {
            let session = ready(session, "step")?;
            session.step(Instant::now());
            session.pause();
            let _ = events.send(Event::Tick);
            Ok(())
        }
        Command::ToggleCell { x, y } => {
            let session = ready(session, "toggle-cell")?;
            session.toggle_cell(x, y);
            session.step(Instant::now());
            session.pause();
            let _ = events.send(Event::Tick);
            Ok(())
        }
    }
}

fn ready<'a>(
    session: &'a mut Option<Session>,
    command: &'static str,
) -> Result<&'a mut Session, StateError> {
    session
        .as_mut()
        .ok_or(StateError::NotInitialized { command })
}
