//! Carousel/slider engine.
//!
//! Holds an ordered set of slides and moves between them in response to
//! navigation buttons, pagination clicks, swipe gestures and an autoplay
//! timer. Every source funnels into one transition lock, so at most one
//! transition is ever in flight; requests that arrive while it is busy are
//! dropped rather than queued. Indicators (pagination dots, prev/next
//! disabled flags) are re-projected after every committed transition.
//!
//! [`CarouselEngine`] is the synchronous core, driven by explicit instants.
//! [`runtime::spawn`] runs it on a tokio task with real timers.

#![allow(missing_docs)]

pub mod autoplay;
pub mod config;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod indicators;
pub mod input;
pub mod navigation;
pub mod runtime;
pub mod slides;
pub mod styles;
pub mod surface;
pub mod transition;

pub use autoplay::AutoplayStatus;
pub use config::{
    AutoplayInteraction, Direction, Easing, EngineConfig, SliderVariant,
};
pub use engine::{CarouselEngine, EngineBuilder, EngineState};
pub use error::{EngineError, Result, SlideRejection};
pub use indicators::{IndicatorState, NavigationButtons};
pub use input::{EngineInput, Point, PointerEvent};
pub use runtime::SliderHandle;
pub use slides::Slide;
pub use surface::{NullSurface, SliderSurface};
pub use transition::{TrackOffset, TransitionPlan};

pub use tokio::time::Instant;
