//! The slider engine: composes the slide store, transition lock, autoplay
//! timer, gesture recognizer and indicator projection behind one input
//! surface.
//!
//! The engine is synchronous and clock-agnostic. Every operation takes the
//! current [`Instant`] and first processes any transition completion or
//! autoplay tick that fell due before it, in deadline order. Callers that
//! want real timers wrap the engine with [`crate::runtime::spawn`]; callers
//! that want deterministic replay (tests, the simulator) feed it virtual
//! instants directly.

use serde::Serialize;
use std::fmt;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::autoplay::{AutoplayScheduler, AutoplayStatus};
use crate::config::{AutoplayInteraction, EngineConfig};
use crate::error::EngineError;
use crate::gesture::GestureRecognizer;
use crate::indicators::IndicatorState;
use crate::input::{EngineInput, PointerEvent};
use crate::navigation::{NavigationSource, Step, step_target};
use crate::slides::{Slide, SlideStore};
use crate::styles;
use crate::surface::{NullSurface, SliderSurface};
use crate::transition::{TrackOffset, TransitionController};

pub type InitHook<T> = Box<dyn FnOnce(&CarouselEngine<T>) + Send>;
pub type ChangeHook<T> = Box<dyn FnMut(usize, &Slide<T>) + Send>;

/// Point-in-time view of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineState {
    pub current_index: usize,
    pub slide_count: usize,
    pub is_animating: bool,
    /// Autoplay timer armed right now.
    pub autoplay_active: bool,
    pub autoplay: AutoplayStatus,
    pub hovered: bool,
}

pub struct EngineBuilder<T> {
    config: EngineConfig,
    surface: Box<dyn SliderSurface<T>>,
    on_init: Option<InitHook<T>>,
    on_change: Option<ChangeHook<T>>,
}

impl<T> fmt::Debug for EngineBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineBuilder")
            .field("config", &self.config)
            .field("on_init", &self.on_init.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

impl<T> EngineBuilder<T> {
    pub fn surface(mut self, surface: impl SliderSurface<T> + 'static) -> Self {
        self.surface = Box::new(surface);
        self
    }

    /// Runs once, after the first mount, with the fully built engine.
    pub fn on_init(
        mut self,
        hook: impl FnOnce(&CarouselEngine<T>) + Send + 'static,
    ) -> Self {
        self.on_init = Some(Box::new(hook));
        self
    }

    /// Runs after every committed transition.
    pub fn on_change(
        mut self,
        hook: impl FnMut(usize, &Slide<T>) + Send + 'static,
    ) -> Self {
        self.on_change = Some(Box::new(hook));
        self
    }

    /// Validate, mount and (if configured) start autoplay at `now`.
    pub fn build(
        self,
        contents: impl IntoIterator<Item = T>,
        now: Instant,
    ) -> Result<CarouselEngine<T>, EngineError> {
        self.config.validate()?;
        let slides = SlideStore::new(contents)?;

        let mut engine = CarouselEngine {
            transition: TransitionController::new(slides.len(), &self.config),
            autoplay: AutoplayScheduler::new(self.config.autoplay_interval()),
            gesture: GestureRecognizer::new(&self.config),
            hovered: false,
            mounted: false,
            surface: self.surface,
            on_change: self.on_change,
            slides,
            config: self.config,
        };

        engine.mount();
        if engine.config.autoplay {
            engine.autoplay.start(now);
        }

        if let Some(hook) = self.on_init {
            hook(&engine);
        }
        Ok(engine)
    }
}

pub struct CarouselEngine<T> {
    config: EngineConfig,
    slides: SlideStore<T>,
    transition: TransitionController,
    autoplay: AutoplayScheduler,
    gesture: GestureRecognizer,
    hovered: bool,
    mounted: bool,
    surface: Box<dyn SliderSurface<T>>,
    on_change: Option<ChangeHook<T>>,
}

impl<T> fmt::Debug for CarouselEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselEngine")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("gesture", &self.gesture.phase())
            .finish_non_exhaustive()
    }
}

impl<T> CarouselEngine<T> {
    pub fn builder(config: EngineConfig) -> EngineBuilder<T> {
        EngineBuilder {
            config,
            surface: Box::new(NullSurface),
            on_init: None,
            on_change: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn slides(&self) -> &[Slide<T>] {
        self.slides.as_slice()
    }

    pub fn current_index(&self) -> usize {
        self.transition.current_index()
    }

    pub fn current_slide(&self) -> Option<&Slide<T>> {
        self.slides.get(self.transition.current_index())
    }

    pub fn state(&self) -> EngineState {
        EngineState {
            current_index: self.transition.current_index(),
            slide_count: self.slides.len(),
            is_animating: self.transition.is_animating(),
            autoplay_active: self.autoplay.is_active(),
            autoplay: self.autoplay.status(),
            hovered: self.hovered,
        }
    }

    pub fn indicators(&self) -> IndicatorState {
        IndicatorState::project(
            self.transition.current_index(),
            self.slides.len(),
            &self.config,
        )
    }

    /// Eased track position at `now`. Does not process due events.
    pub fn track_offset(&self, now: Instant) -> TrackOffset {
        self.transition.offset_at(now)
    }

    /// Earliest pending timed event (transition completion or autoplay
    /// tick), if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.transition.completes_at(), self.autoplay.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Process every timed event due at or before `now`, in deadline order.
    /// A completion and a tick due at the same instant commit first, so the
    /// tick sees an idle lock.
    pub fn advance_to(&mut self, now: Instant) {
        loop {
            let commit_at = self.transition.completes_at().filter(|t| *t <= now);
            let tick_at = self.autoplay.deadline().filter(|t| *t <= now);

            match (commit_at, tick_at) {
                (None, None) => break,
                (Some(commit), Some(tick)) if tick < commit => {
                    self.autoplay_tick(tick)
                }
                (Some(commit), _) => self.commit(commit),
                (None, Some(tick)) => self.autoplay_tick(tick),
            }
        }
    }

    pub fn next(&mut self, now: Instant) -> bool {
        self.advance_to(now);
        self.navigate(Step::Next, NavigationSource::Button, now)
    }

    pub fn prev(&mut self, now: Instant) -> bool {
        self.advance_to(now);
        self.navigate(Step::Prev, NavigationSource::Button, now)
    }

    /// Request a transition to `index`. Returns whether it was accepted;
    /// refusals (busy, same slide, out of range) change nothing.
    pub fn slide_to(&mut self, index: usize, now: Instant) -> bool {
        self.advance_to(now);
        self.request(index, NavigationSource::Programmatic, now)
    }

    pub fn pagination_click(&mut self, index: usize, now: Instant) -> bool {
        self.advance_to(now);
        self.request(index, NavigationSource::Pagination, now)
    }

    /// Turn autoplay on. The interval starts at `now`; if the pointer is
    /// over the slider the timer stays paused until it leaves.
    pub fn play(&mut self, now: Instant) {
        self.advance_to(now);
        self.autoplay.start(now);
        if self.hovered {
            self.autoplay.pause();
        }
    }

    /// Turn autoplay off. Unlike hover, leaving the slider does not bring
    /// it back.
    pub fn pause(&mut self, now: Instant) {
        self.advance_to(now);
        self.autoplay.stop();
    }

    pub fn pointer_enter(&mut self, now: Instant) {
        self.advance_to(now);
        self.hovered = true;
        self.autoplay.pause();
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        self.advance_to(now);
        self.hovered = false;
        self.autoplay.resume(now);
    }

    /// Feed one pointer sample. Returns true if it completed a swipe whose
    /// navigation was accepted.
    pub fn pointer(&mut self, event: PointerEvent, now: Instant) -> bool {
        self.advance_to(now);
        match event {
            PointerEvent::Down(point) => {
                self.gesture.pointer_down(point);
                false
            }
            PointerEvent::Move(point) => {
                self.gesture.pointer_move(point);
                false
            }
            PointerEvent::Up(point) => match self.gesture.pointer_up(point) {
                Some(step) => {
                    self.navigate(step, NavigationSource::Gesture, now)
                }
                None => false,
            },
            PointerEvent::Cancel => {
                self.gesture.cancel();
                false
            }
        }
    }

    /// Apply one input. Returns true when it started a transition.
    pub fn dispatch(&mut self, input: EngineInput, now: Instant) -> bool {
        match input {
            EngineInput::Next => self.next(now),
            EngineInput::Prev => self.prev(now),
            EngineInput::SlideTo(index) => self.slide_to(index, now),
            EngineInput::PaginationClick(index) => {
                self.pagination_click(index, now)
            }
            EngineInput::Play => {
                self.play(now);
                false
            }
            EngineInput::Pause => {
                self.pause(now);
                false
            }
            EngineInput::PointerEnter => {
                self.pointer_enter(now);
                false
            }
            EngineInput::PointerLeave => {
                self.pointer_leave(now);
                false
            }
            EngineInput::Pointer(event) => self.pointer(event, now),
        }
    }

    /// Replace every slide. Resets to slide 0, drops any in-flight
    /// transition and gesture, remounts the surface, and restarts a running
    /// autoplay interval. An empty list is refused and leaves the engine as
    /// it was.
    pub fn update_items(
        &mut self,
        contents: impl IntoIterator<Item = T>,
        now: Instant,
    ) -> Result<(), EngineError> {
        self.advance_to(now);
        let slides = SlideStore::new(contents)?;

        self.slides = slides;
        self.transition.reset(self.slides.len());
        self.gesture.cancel();
        self.autoplay.restart(now);
        self.mount();
        Ok(())
    }

    /// Stop timers, drop gesture tracking and detach the surface. Dropping
    /// the engine does the same.
    pub fn destroy(mut self) {
        self.teardown();
    }

    fn navigate(
        &mut self,
        step: Step,
        source: NavigationSource,
        now: Instant,
    ) -> bool {
        let current = self.transition.current_index();
        let target = step_target(
            step,
            current,
            self.slides.len(),
            self.config.loop_slides,
        );
        self.request(target, source, now)
    }

    fn request(
        &mut self,
        target: usize,
        source: NavigationSource,
        now: Instant,
    ) -> bool {
        match self.transition.begin(target, now) {
            Ok(plan) => {
                debug!(target_index = target, ?source, "transition started");
                self.surface.animate_track(&plan);
                if source.is_user() {
                    self.apply_interaction_policy(now);
                }
                true
            }
            Err(reason) => {
                debug!(target_index = target, ?source, %reason, "slide request rejected");
                false
            }
        }
    }

    fn apply_interaction_policy(&mut self, now: Instant) {
        match self.config.on_interaction {
            AutoplayInteraction::Continue => {}
            AutoplayInteraction::Restart => self.autoplay.restart(now),
            AutoplayInteraction::Stop => self.autoplay.stop(),
        }
    }

    fn commit(&mut self, at: Instant) {
        // The controller releases the lock before returning the index, so
        // a panicking observer below cannot leave it held.
        let Some(index) = self.transition.complete_due(at) else {
            return;
        };
        debug!(index, "transition committed");

        let indicators = self.indicators();
        self.surface.render_indicators(&indicators);

        if let (Some(hook), Some(slide)) =
            (self.on_change.as_mut(), self.slides.get(index))
        {
            hook(index, slide);
        }
    }

    fn autoplay_tick(&mut self, at: Instant) {
        if self.autoplay.fire_due(at).is_some() {
            self.navigate(Step::Next, NavigationSource::Autoplay, at);
        }
    }

    fn mount(&mut self) {
        let variant = self.config.variant;
        if styles::ensure_installed(variant) {
            self.surface.install_styles(variant);
        }

        let indicators = self.indicators();
        self.surface.mount(self.slides.as_slice(), &indicators);
        self.mounted = true;
        info!(
            variant = variant.as_str(),
            slides = self.slides.len(),
            "slider mounted"
        );
    }

    fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.autoplay.stop();
        self.gesture.cancel();
        self.surface.unmount();
        self.mounted = false;
        info!(variant = self.config.variant.as_str(), "slider destroyed");
    }
}

impl<T> Drop for CarouselEngine<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn engine(config: EngineConfig, count: usize, t0: Instant) -> CarouselEngine<usize> {
        CarouselEngine::builder(config)
            .build(0..count, t0)
            .expect("valid engine")
    }

    #[test]
    fn invalid_config_fails_at_build() {
        let config = EngineConfig {
            autoplay_interval_ms: 0,
            ..EngineConfig::default()
        };
        let err = CarouselEngine::builder(config)
            .build(0..3, Instant::now())
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
    }

    #[test]
    fn empty_slide_list_fails_at_build() {
        let err = CarouselEngine::<u8>::builder(EngineConfig::default())
            .build(Vec::new(), Instant::now())
            .unwrap_err();
        assert_eq!(err, EngineError::NoSlides);
    }

    #[test]
    fn calls_inside_transition_window_are_dropped() {
        let t0 = Instant::now();
        let mut e = engine(EngineConfig::default(), 5, t0);

        assert!(e.slide_to(3, t0));
        assert!(!e.slide_to(4, t0));
        e.advance_to(t0 + ms(300));
        assert_eq!(e.current_index(), 3);
        assert!(!e.state().is_animating);
    }

    #[test]
    fn commit_and_tick_at_same_instant_commit_first() {
        let t0 = Instant::now();
        let config = EngineConfig {
            loop_slides: true,
            autoplay: true,
            autoplay_interval_ms: 300,
            transition_duration_ms: 300,
            ..EngineConfig::default()
        };
        let mut e = engine(config, 3, t0);

        // Tick at 300 starts 0 -> 1; commit at 600 coincides with the
        // second tick, which must then be accepted.
        e.advance_to(t0 + ms(600));
        assert_eq!(e.current_index(), 1);
        assert!(e.state().is_animating);
        e.advance_to(t0 + ms(900));
        assert_eq!(e.current_index(), 2);
    }

    #[test]
    fn on_change_sees_committed_slide() {
        let t0 = Instant::now();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut e = CarouselEngine::builder(EngineConfig::default())
            .on_change(move |index, slide: &Slide<&'static str>| {
                sink.lock().unwrap().push((index, slide.content));
            })
            .build(["a", "b", "c"], t0)
            .unwrap();

        e.next(t0);
        assert!(seen.lock().unwrap().is_empty());
        e.advance_to(t0 + ms(300));
        assert_eq!(*seen.lock().unwrap(), vec![(1, "b")]);
    }

    #[test]
    fn on_init_runs_once_with_initial_state() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let config = EngineConfig {
            autoplay: true,
            ..EngineConfig::default()
        };
        let _engine = CarouselEngine::builder(config)
            .on_init(move |engine: &CarouselEngine<u32>| {
                *sink.lock().unwrap() = Some(engine.state());
            })
            .build([1, 2], Instant::now())
            .unwrap();

        let state = seen.lock().unwrap().expect("hook ran");
        assert_eq!(state.current_index, 0);
        assert_eq!(state.slide_count, 2);
        assert!(state.autoplay_active);
    }

    #[test]
    fn stop_policy_ends_autoplay_on_user_navigation() {
        let t0 = Instant::now();
        let config = EngineConfig {
            autoplay: true,
            on_interaction: AutoplayInteraction::Stop,
            ..EngineConfig::default()
        };
        let mut e = engine(config, 4, t0);

        assert!(e.next(t0 + ms(100)));
        assert_eq!(e.state().autoplay, AutoplayStatus::Stopped);
    }

    #[test]
    fn restart_policy_pushes_next_tick_back() {
        let t0 = Instant::now();
        let config = EngineConfig {
            autoplay: true,
            autoplay_interval_ms: 1000,
            on_interaction: AutoplayInteraction::Restart,
            ..EngineConfig::default()
        };
        let mut e = engine(config, 4, t0);

        assert!(e.next(t0 + ms(800)));
        assert_eq!(e.next_deadline(), Some(t0 + ms(1100)));
        e.advance_to(t0 + ms(1500));
        // Committed at 1100; the autoplay tick is now due at 1800.
        assert_eq!(e.current_index(), 1);
        assert_eq!(e.next_deadline(), Some(t0 + ms(1800)));
    }

    #[test]
    fn rejected_update_keeps_existing_slides() {
        let t0 = Instant::now();
        let mut e = engine(EngineConfig::default(), 3, t0);
        e.next(t0);
        e.advance_to(t0 + ms(300));

        assert_eq!(e.update_items(Vec::new(), t0 + ms(400)), Err(EngineError::NoSlides));
        assert_eq!(e.current_index(), 1);
        assert_eq!(e.slides().len(), 3);
    }

    #[test]
    fn dispatch_routes_inputs() {
        let t0 = Instant::now();
        let mut e = engine(EngineConfig::default(), 3, t0);

        assert!(e.dispatch(EngineInput::PaginationClick(2), t0));
        assert!(!e.dispatch(EngineInput::Play, t0 + ms(10)));
        assert!(e.state().autoplay_active);
        e.dispatch(EngineInput::PointerEnter, t0 + ms(20));
        assert!(!e.state().autoplay_active);
        e.dispatch(EngineInput::Pause, t0 + ms(30));
        e.dispatch(EngineInput::PointerLeave, t0 + ms(40));
        assert_eq!(e.state().autoplay, AutoplayStatus::Stopped);
        e.advance_to(t0 + ms(300));
        assert_eq!(e.current_index(), 2);
    }
}
