//! Controller-side handle to the engine thread.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use log::debug;

use crate::schema::{ConfigError, EngineConfig, Seed};

use super::protocol::{Command, Event, RendererSink};
use super::scheduler;

/// Spawns the engine thread and serializes intents into [`Command`]s.
///
/// The two mpsc channels are the only connection between the threads: commands
/// flow in, events flow out, both in order, and no memory is shared. Bulk
/// payloads (the seed, the boxed sink) move into the engine thread with the
/// Initialize command and must not be touched by the controller afterwards —
/// ownership transfer makes that a compile-time guarantee.
pub struct Controller {
    commands: Sender<Command>,
    events: Receiver<Event>,
    engine: JoinHandle<()>,
}

impl Controller {
    /// Validate the config and spawn the engine thread.
    pub fn spawn(config: EngineConfig) -> Result<Self, ControllerError> {
        config.validate()?;

        let (command_tx, command_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let engine = thread::Builder::new()
            .name("gridlife-engine".into())
            .spawn(move || scheduler::run(command_rx, event_tx, config))?;

        debug!("engine thread spawned");

        Ok(Self {
            commands: command_tx,
            events: event_rx,
            engine,
        })
    }

    /// Hand the initial universe and the drawing sink to the engine.
    pub fn initialize(
        &self,
        seed: Seed,
        surface: Box<dyn RendererSink>,
        width: u32,
        height: u32,
    ) -> Result<(), ControllerError> {
        self.send(Command::Initialize {
            seed,
            surface,
            width,
            height,
        })
    }

    /// Resume continuous play.
    pub fn start(&self) -> Result<(), ControllerError> {
        self.send(Command::Start)
    }

    /// Halt continuous play.
    pub fn pause(&self) -> Result<(), ControllerError> {
        self.send(Command::Pause)
    }

    /// Advance exactly one generation.
    pub fn step(&self) -> Result<(), ControllerError> {
        self.send(Command::Step)
    }

    /// Flip the cell under the surface-space pixel coordinates `(x, y)`.
    pub fn toggle_cell(&self, x: u32, y: u32) -> Result<(), ControllerError> {
        self.send(Command::ToggleCell { x, y })
    }

    /// Receiver for [`Event`]s published by the engine.
    pub fn events(&self) -> &Receiver<Event> {
        &self.events
    }

    /// Close the command channel and wait for the engine thread to finish.
    pub fn shutdown(self) {
        let Controller {
            commands,
            events,
            engine,
        } = self;

        // Dropping the sender is the loop's stop signal.
        drop(commands);
        drop(events);

        if engine.join().is_err() {
            debug!("engine thread panicked during shutdown");
        }
    }

    fn send(&self, command: Command) -> Result<(), ControllerError> {
        self.commands
            .send(command)
            .map_err(|_| ControllerError::EngineGone)
    }
}

/// Controller-side failures.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn the engine thread")]
    Spawn(#[from] io::Error),
    #[error("the engine thread is gone")]
    EngineGone,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::runtime::testing::RecordingSink;

    use super::*;

    const WAIT: Duration = Duration::from_secs(5);
    const QUIET: Duration = Duration::from_millis(200);

    /// Short intervals so continuous play produces ticks quickly.
    fn test_config() -> EngineConfig {
        EngineConfig {
            cell_size: 8,
            step_interval_ms: 5,
            frame_interval_ms: 1,
        }
    }

    fn drain_until_quiet(controller: &Controller) {
        while controller.events().recv_timeout(QUIET).is_ok() {}
    }

    #[test]
    fn test_initialize_starts_continuous_play() {
        let controller = Controller::spawn(test_config()).unwrap();
        let sink = RecordingSink::default();
        let paint_log = sink.clone();

        controller
            .initialize(Seed::from_indexes(vec![11, 12, 13]), Box::new(sink), 5, 5)
            .unwrap();

        assert_eq!(
            controller.events().recv_timeout(WAIT).unwrap(),
            Event::Initialized
        );
        assert_eq!(controller.events().recv_timeout(WAIT).unwrap(), Event::Tick);
        assert_eq!(controller.events().recv_timeout(WAIT).unwrap(), Event::Tick);
        assert!(
            !paint_log.taken().is_empty(),
            "the sink received paint operations"
        );

        controller.shutdown();
    }

    #[test]
    fn test_rejected_commands_leave_the_engine_usable() {
        let controller = Controller::spawn(test_config()).unwrap();

        // All rejected engine-side with a StateError; sending still succeeds.
        controller.step().unwrap();
        controller.start().unwrap();
        controller.toggle_cell(0, 0).unwrap();
        assert!(controller.events().recv_timeout(QUIET).is_err());

        controller
            .initialize(
                Seed::from_indexes(vec![0]),
                Box::new(RecordingSink::default()),
                4,
                4,
            )
            .unwrap();
        assert_eq!(
            controller.events().recv_timeout(WAIT).unwrap(),
            Event::Initialized
        );

        controller.shutdown();
    }

    #[test]
    fn test_pause_quiesces_then_step_and_toggle_tick_once() {
        let controller = Controller::spawn(test_config()).unwrap();
        controller
            .initialize(
                Seed::from_indexes(vec![6, 7, 11, 12]),
                Box::new(RecordingSink::default()),
                5,
                5,
            )
            .unwrap();
        assert_eq!(
            controller.events().recv_timeout(WAIT).unwrap(),
            Event::Initialized
        );

        // Ticks already in flight drain off after the pause is applied.
        controller.pause().unwrap();
        drain_until_quiet(&controller);

        controller.step().unwrap();
        assert_eq!(controller.events().recv_timeout(WAIT).unwrap(), Event::Tick);
        assert!(
            controller.events().recv_timeout(QUIET).is_err(),
            "step leaves the engine paused"
        );

        controller.toggle_cell(0, 0).unwrap();
        assert_eq!(controller.events().recv_timeout(WAIT).unwrap(), Event::Tick);
        assert!(controller.events().recv_timeout(QUIET).is_err());

        controller.shutdown();
    }

    #[test]
    fn test_start_resumes_after_pause() {
        let controller = Controller::spawn(test_config()).unwrap();
        controller
            .initialize(
                Seed::from_indexes(vec![11, 12, 13]),
                Box::new(RecordingSink::default()),
                5,
                5,
            )
            .unwrap();
        assert_eq!(
            controller.events().recv_timeout(WAIT).unwrap(),
            Event::Initialized
        );

        controller.pause().unwrap();
        drain_until_quiet(&controller);

        controller.start().unwrap();
        assert_eq!(controller.events().recv_timeout(WAIT).unwrap(), Event::Tick);

        controller.shutdown();
    }

    #[test]
    fn test_spawn_rejects_an_invalid_config() {
        let config = EngineConfig {
            cell_size: 0,
            ..Default::default()
        };

        assert!(matches!(
            Controller::spawn(config),
            Err(ControllerError::Config(_))
        ));
    }
}
