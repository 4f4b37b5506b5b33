//! Engine-side simulation session.

use std::time::Instant;

use log::debug;

use crate::engine::{CellState, Grid};
use crate::schema::EngineConfig;

use super::protocol::RendererSink;
use super::scheduler::Throttle;

/// Everything the engine thread owns for one running simulation: the grid, the
/// drawing sink, and playback state.
///
/// Created once per engine thread on a successful Initialize and mutated only
/// by commands processed on that thread. Re-entrancy is impossible because a
/// single logical step runs at a time; the `playing` flag is the cooperative
/// cancellation point checked at frame boundaries.
pub struct Session {
    grid: Grid,
    surface: Box<dyn RendererSink>,
    cell_size: u32,
    throttle: Throttle,
    playing: bool,
}

impl Session {
    /// Bundle a freshly built grid with its drawing sink. Sessions start
    /// playing.
    pub fn new(grid: Grid, surface: Box<dyn RendererSink>, config: &EngineConfig) -> Self {
        Self {
            grid,
            surface,
            cell_size: config.cell_size,
            throttle: Throttle::new(config.step_interval()),
            playing: true,
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Resume continuous play. Idempotent.
    pub fn resume(&mut self) {
        self.playing = true;
    }

    /// Halt continuous play, observed at the next frame check. Idempotent; a
    /// step already executing always completes.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    #[cfg(test)]
    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Flip the cell under the surface-space pixel coordinates `(x, y)`.
    ///
    /// The flip surfaces through the next step's delta, together with one rule
    /// evaluation. Coordinates beyond the grid are ignored.
    pub fn toggle_cell(&mut self, x: u32, y: u32) {
        let column = x / self.cell_size;
        let row = y / self.cell_size;
        if column >= self.grid.width() || row >= self.grid.height() {
            debug!("toggle at pixel ({x}, {y}) lands outside the grid, ignoring");
            return;
        }

        self.grid.toggle(row * self.grid.width() + column);
    }

    /// Run exactly one generation and paint its delta onto the sink.
    ///
    /// The delta view borrows the grid's scratch buffers, so it is fully
    /// consumed here before any further mutation can happen.
    pub fn step(&mut self, now: Instant) {
        let width = self.grid.width();
        let cell_size = self.cell_size;

        let delta = self.grid.advance();
        for (index, state) in delta.iter() {
            let x = (index % width) * cell_size;
            let y = (index / width) * cell_size;
            match state {
                CellState::Alive => self.surface.fill_cell(x, y, cell_size),
                CellState::Dead => self.surface.clear_cell(x, y, cell_size),
            }
        }

        self.throttle.mark(now);
    }

    /// Frame-boundary check during continuous play.
    ///
    /// Steps only when playing and the throttle interval has elapsed since the
    /// last executed step; otherwise the frame passes without work. Returns
    /// whether a step ran.
    pub fn frame(&mut self, now: Instant) -> bool {
        if !self.playing || !self.throttle.ready(now) {
            return false;
        }

        self.step(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::runtime::testing::{PaintOp, RecordingSink};
    use crate::schema::Seed;

    use super::*;

    fn test_config() -> EngineConfig {
        EngineConfig {
            cell_size: 8,
            step_interval_ms: 80,
            frame_interval_ms: 16,
        }
    }

    fn blinker_session() -> (Session, RecordingSink) {
        let grid = Grid::new(5, 5, &Seed::from_indexes(vec![11, 12, 13])).unwrap();
        let sink = RecordingSink::default();
        let session = Session::new(grid, Box::new(sink.clone()), &test_config());
        (session, sink)
    }

    #[test]
    fn test_step_paints_exactly_the_delta_blocks() {
        let (mut session, sink) = blinker_session();

        session.step(Instant::now());

        // Index 7 -> (2, 1), 11 -> (1, 2), 13 -> (3, 2), 17 -> (2, 3), all
        // scaled by the 8 px cell size, in ascending index order.
        assert_eq!(
            sink.taken(),
            vec![
                PaintOp::Fill { x: 16, y: 8, size: 8 },
                PaintOp::Clear { x: 8, y: 16, size: 8 },
                PaintOp::Clear { x: 24, y: 16, size: 8 },
                PaintOp::Fill { x: 16, y: 24, size: 8 },
            ]
        );
    }

    #[test]
    fn test_step_on_a_still_life_paints_nothing() {
        let grid = Grid::new(5, 5, &Seed::from_indexes(vec![6, 7, 11, 12])).unwrap();
        let sink = RecordingSink::default();
        let mut session = Session::new(grid, Box::new(sink.clone()), &test_config());

        session.step(Instant::now());

        assert!(sink.taken().is_empty());
    }

    #[test]
    fn test_toggle_cell_maps_pixel_coordinates() {
        let (mut session, _sink) = blinker_session();

        // Pixel (17, 9) sits in column 2, row 1 -> index 7.
        session.toggle_cell(17, 9);

        assert_eq!(session.grid().alive_indexes(), vec![7, 11, 12, 13]);
    }

    #[test]
    fn test_toggle_cell_outside_the_grid_is_ignored() {
        let (mut session, _sink) = blinker_session();

        session.toggle_cell(5 * 8, 0);
        session.toggle_cell(0, 5 * 8);

        assert_eq!(session.grid().alive_indexes(), vec![11, 12, 13]);
    }

    #[test]
    fn test_frame_respects_the_step_throttle() {
        let (mut session, _sink) = blinker_session();
        let start = Instant::now();

        // First frame steps immediately; there is no previous step to wait on.
        assert!(session.frame(start));

        // Within the 80 ms window nothing happens.
        assert!(!session.frame(start + Duration::from_millis(10)));
        assert!(!session.frame(start + Duration::from_millis(79)));

        // Once the window has elapsed the next frame steps.
        assert!(session.frame(start + Duration::from_millis(80)));
    }

    #[test]
    fn test_frame_is_inert_while_paused() {
        let (mut session, sink) = blinker_session();

        session.pause();
        assert!(!session.is_playing());
        assert!(!session.frame(Instant::now()));
        assert!(sink.taken().is_empty());

        session.resume();
        assert!(session.is_playing());
        assert!(session.frame(Instant::now()));
    }

    #[test]
    fn test_consecutive_steps_reuse_the_scratch_buffers() {
        let (mut session, sink) = blinker_session();

        session.step(Instant::now());
        let first = sink.taken();
        session.step(Instant::now());
        let second = sink.taken();

        assert_eq!(first.len(), 4);
        assert_eq!(second.len(), 4);
        assert_ne!(first, second);
    }
}
