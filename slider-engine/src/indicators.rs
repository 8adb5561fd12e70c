//! Pagination dots and navigation-button state, derived from the engine's
//! committed index. Nothing here is stored between renders.

use serde::Serialize;

use crate::config::EngineConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndicatorState {
    /// One entry per slide, `true` for the active dot. Empty when pagination
    /// is hidden.
    pub dots: Vec<bool>,
    /// `None` when navigation buttons are hidden.
    pub navigation: Option<NavigationButtons>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationButtons {
    pub prev_disabled: bool,
    pub next_disabled: bool,
}

impl IndicatorState {
    pub fn project(index: usize, count: usize, config: &EngineConfig) -> Self {
        let dots = if config.show_pagination {
            (0..count).map(|dot| dot == index).collect()
        } else {
            Vec::new()
        };

        let navigation = config.show_navigation.then(|| NavigationButtons {
            prev_disabled: !config.loop_slides && index == 0,
            next_disabled: !config.loop_slides && index + 1 >= count,
        });

        Self { dots, navigation }
    }

    pub fn active_dot(&self) -> Option<usize> {
        self.dots.iter().position(|active| *active)
    }
}
