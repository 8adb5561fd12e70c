//! Input events accepted by the engine. Every source (buttons, pagination,
//! pointer, hover) is expressed as an [`EngineInput`] and processed in
//! arrival order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pointer/touch samples. Mouse drags and touches share one stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineInput {
    /// Navigation button.
    Next,
    /// Navigation button.
    Prev,
    /// Programmatic jump.
    SlideTo(usize),
    /// Pagination dot click.
    PaginationClick(usize),
    Play,
    Pause,
    PointerEnter,
    PointerLeave,
    Pointer(PointerEvent),
}
