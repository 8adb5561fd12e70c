//! Presentation collaborator. The engine never touches markup; it tells a
//! surface what to show and the surface owns the elements.

use crate::config::SliderVariant;
use crate::indicators::IndicatorState;
use crate::slides::Slide;
use crate::transition::TransitionPlan;

pub trait SliderSurface<T>: Send {
    /// Called at most once per variant per process, before the first mount
    /// of that variant.
    fn install_styles(&mut self, _variant: SliderVariant) {}

    /// Build the track (one wrapper per slide) and the indicator sub-trees.
    /// Called again after `update_items`.
    fn mount(&mut self, slides: &[Slide<T>], indicators: &IndicatorState);

    /// Start the fixed-duration track animation for an accepted transition.
    fn animate_track(&mut self, plan: &TransitionPlan);

    fn render_indicators(&mut self, indicators: &IndicatorState);

    /// Detach everything the surface attached.
    fn unmount(&mut self);
}

/// Surface for headless engines.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl<T> SliderSurface<T> for NullSurface {
    fn mount(&mut self, _slides: &[Slide<T>], _indicators: &IndicatorState) {}

    fn animate_track(&mut self, _plan: &TransitionPlan) {}

    fn render_indicators(&mut self, _indicators: &IndicatorState) {}

    fn unmount(&mut self) {}
}
