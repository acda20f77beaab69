use std::time::Duration;

use crate::constants;
use crate::desktop::OverlayKind;
use crate::geometry::Size;

/// Response to clicking the dock item of the already-focused open window.
/// Historical variants disagreed; this stays an explicit policy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReclickBehavior {
    /// Leave the window as it is.
    #[default]
    None,
    /// Close the window (the dock item turns into a restore control).
    Minimize,
}

/// Unified knobs for the interaction core.
///
/// Defaults are the desktop-pixel values from [`crate::constants`]; the
/// terminal front-end swaps in cell-scale values via [`DesktopConfig::terminal_cells`].
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    /// Pointer travel before an armed press becomes a drag.
    pub drag_threshold: i32,
    /// How far a window may be dragged past the left edge.
    pub partial_offscreen_allowance: i32,
    pub min_visible_width: i32,
    pub min_visible_height: i32,
    pub top_bar_height: i32,
    pub dock_height: i32,
    /// Margin kept from the edges when centering a first-open window.
    pub center_margin: i32,
    /// Upward nudge applied to centered placement.
    pub center_bias: i32,
    /// Bounding box used when clamping the context menu into the viewport.
    pub context_menu_size: Size,
    /// Delay between logical close and interaction detach.
    pub finalize_delay: Duration,
    pub reclick_behavior: ReclickBehavior,
    /// Overlays this desktop actually offers; requests for anything else
    /// are inert.
    pub overlays: Vec<OverlayKind>,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            drag_threshold: constants::DRAG_THRESHOLD,
            partial_offscreen_allowance: constants::PARTIAL_OFFSCREEN_ALLOWANCE,
            min_visible_width: constants::MIN_VISIBLE_WIDTH,
            min_visible_height: constants::MIN_VISIBLE_HEIGHT,
            top_bar_height: constants::TOP_BAR_HEIGHT,
            dock_height: constants::DOCK_HEIGHT,
            center_margin: constants::CENTER_MARGIN,
            center_bias: constants::CENTER_BIAS,
            context_menu_size: Size::new(180, 120),
            finalize_delay: constants::FINALIZE_DELAY,
            reclick_behavior: ReclickBehavior::default(),
            overlays: OverlayKind::ALL.to_vec(),
        }
    }
}

impl DesktopConfig {
    /// Cell-scale preset for terminal surfaces, where one "pixel" is one
    /// character cell.
    pub fn terminal_cells() -> Self {
        Self {
            drag_threshold: 1,
            partial_offscreen_allowance: 12,
            min_visible_width: 8,
            min_visible_height: 2,
            top_bar_height: 1,
            dock_height: 1,
            center_margin: 2,
            center_bias: 1,
            context_menu_size: Size::new(22, 6),
            ..Self::default()
        }
    }
}
