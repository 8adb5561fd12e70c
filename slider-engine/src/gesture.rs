//! Swipe detection along the track axis.

use tracing::debug;

use crate::config::{Direction, EngineConfig};
use crate::input::Point;
use crate::navigation::Step;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    Idle,
    /// Coordinates are projected onto the track axis.
    Tracking { start: f32, current: f32 },
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    phase: GesturePhase,
    direction: Direction,
    threshold_px: f32,
}

impl GestureRecognizer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            phase: GesturePhase::Idle,
            direction: config.direction,
            threshold_px: config.swipe_threshold_px,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, GesturePhase::Tracking { .. })
    }

    /// Begin tracking. A gesture already in progress is abandoned without
    /// navigating; returns true when that happened.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        let abandoned = self.is_tracking();
        if abandoned {
            debug!("second pointer down, abandoning tracked gesture");
        }
        let coord = self.project(point);
        self.phase = GesturePhase::Tracking {
            start: coord,
            current: coord,
        };
        abandoned
    }

    pub fn pointer_move(&mut self, point: Point) {
        let coord = self.project(point);
        if let GesturePhase::Tracking { current, .. } = &mut self.phase {
            *current = coord;
        }
    }

    /// Finish the gesture and classify it. Travel towards the negative axis
    /// (finger moving left/up) means `Next`.
    pub fn pointer_up(&mut self, point: Point) -> Option<Step> {
        let GesturePhase::Tracking { start, .. } = self.phase else {
            return None;
        };
        self.phase = GesturePhase::Idle;

        let delta = start - self.project(point);
        if delta == 0.0 || delta.abs() < self.threshold_px {
            debug!(delta, threshold = self.threshold_px, "gesture below swipe threshold");
            return None;
        }

        let step = if delta > 0.0 { Step::Next } else { Step::Prev };
        debug!(delta, ?step, "swipe recognized");
        Some(step)
    }

    pub fn cancel(&mut self) {
        self.phase = GesturePhase::Idle;
    }

    fn project(&self, point: Point) -> f32 {
        match self.direction {
            Direction::Horizontal => point.x,
            Direction::Vertical => point.y,
        }
    }
}
