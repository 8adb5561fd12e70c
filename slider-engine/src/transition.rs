//! Transition lock and the single write path for the current index.

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::{Direction, Easing, EngineConfig};
use crate::error::SlideRejection;

/// Track translation, in percent of one slide, along the configured axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackOffset {
    pub direction: Direction,
    pub percent: f32,
}

impl TrackOffset {
    /// Offset that brings slide `index` into view.
    pub fn for_index(direction: Direction, index: usize) -> Self {
        Self {
            direction,
            // `0.0 - x` keeps slide 0 at +0.0 rather than -0.0.
            percent: 0.0 - index as f32 * 100.0,
        }
    }

    fn interpolate(self, to: TrackOffset, progress: f32) -> Self {
        Self {
            direction: self.direction,
            percent: self.percent + (to.percent - self.percent) * progress,
        }
    }
}

impl fmt::Display for TrackOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Horizontal => write!(f, "translateX({}%)", self.percent),
            Direction::Vertical => write!(f, "translateY({}%)", self.percent),
        }
    }
}

/// Lock state. A transition holds the lock from acceptance until its
/// completion deadline is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Transitioning {
        from: usize,
        target: usize,
        started_at: Instant,
        completes_at: Instant,
    },
}

/// A transition that was accepted and should be presented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPlan {
    pub from: TrackOffset,
    pub to: TrackOffset,
    pub duration: Duration,
    pub easing: Easing,
}

#[derive(Debug, Clone)]
pub struct TransitionController {
    current_index: usize,
    slide_count: usize,
    phase: TransitionPhase,
    direction: Direction,
    duration: Duration,
    easing: Easing,
}

impl TransitionController {
    pub fn new(slide_count: usize, config: &EngineConfig) -> Self {
        Self {
            current_index: 0,
            slide_count,
            phase: TransitionPhase::Idle,
            direction: config.direction,
            duration: config.transition_duration(),
            easing: config.easing,
        }
    }

    #[inline]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, TransitionPhase::Transitioning { .. })
    }

    pub fn completes_at(&self) -> Option<Instant> {
        match self.phase {
            TransitionPhase::Idle => None,
            TransitionPhase::Transitioning { completes_at, .. } => {
                Some(completes_at)
            }
        }
    }

    /// Accept or refuse a move to `target`. Refusals leave every field
    /// untouched.
    pub fn begin(
        &mut self,
        target: usize,
        now: Instant,
    ) -> Result<TransitionPlan, SlideRejection> {
        if let TransitionPhase::Transitioning { target: busy, .. } = self.phase {
            return Err(SlideRejection::Busy { target: busy });
        }
        if target >= self.slide_count {
            return Err(SlideRejection::OutOfRange {
                index: target,
                count: self.slide_count,
            });
        }
        if target == self.current_index {
            return Err(SlideRejection::AlreadyCurrent { index: target });
        }

        self.phase = TransitionPhase::Transitioning {
            from: self.current_index,
            target,
            started_at: now,
            completes_at: now + self.duration,
        };

        Ok(TransitionPlan {
            from: TrackOffset::for_index(self.direction, self.current_index),
            to: TrackOffset::for_index(self.direction, target),
            duration: self.duration,
            easing: self.easing,
        })
    }

    /// Commit the in-flight transition if its deadline has passed. The lock
    /// is released before the new index is returned, so nothing the caller
    /// does afterwards can leave it held.
    pub fn complete_due(&mut self, now: Instant) -> Option<usize> {
        match self.phase {
            TransitionPhase::Transitioning {
                target,
                completes_at,
                ..
            } if completes_at <= now => {
                self.phase = TransitionPhase::Idle;
                self.current_index = target;
                Some(target)
            }
            _ => None,
        }
    }

    /// Eased track position at `now`, for surfaces that drive frames
    /// themselves.
    pub fn offset_at(&self, now: Instant) -> TrackOffset {
        match self.phase {
            TransitionPhase::Idle => {
                TrackOffset::for_index(self.direction, self.current_index)
            }
            TransitionPhase::Transitioning {
                from,
                target,
                started_at,
                ..
            } => {
                let elapsed = now.saturating_duration_since(started_at);
                let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32())
                    .clamp(0.0, 1.0);
                TrackOffset::for_index(self.direction, from).interpolate(
                    TrackOffset::for_index(self.direction, target),
                    self.easing.apply(t),
                )
            }
        }
    }

    /// Drop any in-flight transition and start over at slide 0 with a new
    /// slide count.
    pub fn reset(&mut self, slide_count: usize) {
        self.phase = TransitionPhase::Idle;
        self.current_index = 0;
        self.slide_count = slide_count;
    }
}
