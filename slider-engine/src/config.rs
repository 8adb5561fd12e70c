//! Slider configuration: presets for the two slider variants, validation,
//! and loading from TOML/JSON documents.

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, time::Duration};

use crate::error::EngineError;

/// Axis the track moves along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

/// Which slider flavour a configuration was built for. Each variant owns
/// one entry in the process-wide style registry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SliderVariant {
    #[default]
    Generic,
    Productivity,
}

impl SliderVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            SliderVariant::Generic => "generic",
            SliderVariant::Productivity => "productivity",
        }
    }
}

/// Timing curve applied to the fixed-duration track transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map linear progress `t` in `[0, 1]` onto the curve (quadratic).
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
        }
    }
}

/// What a user-initiated navigation does to a running autoplay timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoplayInteraction {
    /// Leave the timer alone.
    #[default]
    Continue,
    /// Restart the interval from zero.
    Restart,
    /// Stop autoplay until `play()` is called again.
    Stop,
}

/// Static configuration for a slider instance. Immutable once an engine is
/// built; reconfiguring means building a new engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub variant: SliderVariant,
    pub direction: Direction,
    /// Wrap `next()` past the last slide and `prev()` past the first.
    #[serde(rename = "loop")]
    pub loop_slides: bool,
    /// Start autoplay as soon as the engine is built.
    pub autoplay: bool,
    pub autoplay_interval_ms: u64,
    /// Minimum pointer travel along the track axis that counts as a swipe.
    pub swipe_threshold_px: f32,
    pub transition_duration_ms: u64,
    pub easing: Easing,
    pub show_pagination: bool,
    pub show_navigation: bool,
    pub on_interaction: AutoplayInteraction,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::generic_defaults()
    }
}

impl EngineConfig {
    /// Plain content slider: finite, manual navigation.
    pub const fn generic_defaults() -> Self {
        Self {
            variant: SliderVariant::Generic,
            direction: Direction::Horizontal,
            loop_slides: false,
            autoplay: false,
            autoplay_interval_ms: 3_000,
            swipe_threshold_px: 50.0,
            transition_duration_ms: 300,
            easing: Easing::EaseOut,
            show_pagination: true,
            show_navigation: true,
            on_interaction: AutoplayInteraction::Continue,
        }
    }

    /// Showcase slider for product tiles: loops and autoplays, and a manual
    /// navigation restarts the autoplay interval.
    pub const fn productivity_defaults() -> Self {
        Self {
            variant: SliderVariant::Productivity,
            direction: Direction::Horizontal,
            loop_slides: true,
            autoplay: true,
            autoplay_interval_ms: 5_000,
            swipe_threshold_px: 50.0,
            transition_duration_ms: 500,
            easing: Easing::EaseInOut,
            show_pagination: true,
            show_navigation: true,
            on_interaction: AutoplayInteraction::Restart,
        }
    }

    pub fn autoplay_interval(&self) -> Duration {
        Duration::from_millis(self.autoplay_interval_ms)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.autoplay_interval_ms == 0 {
            return Err(EngineError::InvalidConfig {
                field: "autoplay_interval_ms",
                reason: "must be greater than zero",
            });
        }
        if !self.swipe_threshold_px.is_finite() {
            return Err(EngineError::InvalidConfig {
                field: "swipe_threshold_px",
                reason: "must be a finite number",
            });
        }
        if self.swipe_threshold_px < 0.0 {
            return Err(EngineError::InvalidConfig {
                field: "swipe_threshold_px",
                reason: "must not be negative",
            });
        }
        if self.transition_duration_ms == 0 {
            return Err(EngineError::InvalidConfig {
                field: "transition_duration_ms",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    /// Load and validate a configuration file. `.json` and `.toml` pick
    /// their parser; anything else is sniffed.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read slider config from {}", path.display())
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents).with_context(|| {
                format!("invalid slider config {}", path.display())
            })?,
            Some("toml") => toml::from_str(&contents).map_err(|err| {
                anyhow!("invalid slider config {}: {}", path.display(), err)
            })?,
            _ => Self::parse_unvalidated(
                &contents,
                &path.display().to_string(),
            )?,
        };

        config.validate().with_context(|| {
            format!("rejected slider config {}", path.display())
        })?;
        Ok(config)
    }

    /// Parse a TOML or JSON document and validate it.
    pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<Self> {
        let config = Self::parse_unvalidated(contents, origin)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_unvalidated(contents: &str, origin: &str) -> anyhow::Result<Self> {
        // Try TOML first, then JSON for convenience.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse slider config {}: toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }
}
