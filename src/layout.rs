//! Window sizing for the presentation layer.
//!
//! The mode is owned by the caller and passed into every call, so there is
//! no process-wide "minimized" flag to keep in sync.

use serde::{Deserialize, Serialize};

const EXPANDED_WIDTH: u32 = 700;
const EXPANDED_HEIGHT: u32 = 450;
const MINIMIZED_WIDTH: u32 = 200;
const MINIMIZED_MIN_HEIGHT: u32 = 100;
const MINIMIZED_MAX_HEIGHT: u32 = 600;

/// Height of one instance tile in minimized mode
const TILE_HEIGHT: u32 = 80;
/// Top and bottom padding around the tiles
const TILE_PADDING: u32 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindowMode {
    #[default]
    Expanded,
    Minimized,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }
}

/// Everything the window shell needs to apply a mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WindowGeometry {
    pub mode: WindowMode,
    pub size: Size,
    pub resizable: bool,
    pub min_size: Size,
    pub max_size: Size,
}

/// Geometry for switching into `mode`
pub fn toggle_window_size(mode: WindowMode) -> WindowGeometry {
    match mode {
        WindowMode::Expanded => WindowGeometry {
            mode,
            size: Size::new(EXPANDED_WIDTH, EXPANDED_HEIGHT),
            resizable: true,
            min_size: Size::new(400, 200),
            max_size: Size::new(2000, 1200),
        },
        WindowMode::Minimized => WindowGeometry {
            mode,
            size: Size::new(MINIMIZED_WIDTH, MINIMIZED_MIN_HEIGHT),
            resizable: false,
            min_size: Size::new(MINIMIZED_WIDTH, MINIMIZED_MIN_HEIGHT),
            // Allow vertical growth as instances appear
            max_size: Size::new(MINIMIZED_WIDTH, MINIMIZED_MAX_HEIGHT),
        },
    }
}

/// Size that fits `instance_count` tiles. Only minimized windows follow their
/// content; an expanded window keeps whatever size the user gave it.
pub fn update_window_height(mode: WindowMode, instance_count: usize) -> Option<Size> {
    if mode != WindowMode::Minimized {
        return None;
    }

    let count = u32::try_from(instance_count).unwrap_or(u32::MAX);
    let content = count.saturating_mul(TILE_HEIGHT).saturating_add(TILE_PADDING);

    Some(Size {
        width: MINIMIZED_WIDTH,
        height: content.max(MINIMIZED_MIN_HEIGHT),
    })
}
