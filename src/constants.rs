//! Shared crate-wide defaults.
//!
//! Historical builds of the desktop disagreed on drag thresholds, clamp
//! margins, and placement offsets; these are the unified defaults, all
//! overridable through [`crate::config::DesktopConfig`].

use std::time::Duration;

/// Pointer travel (Chebyshev distance) before an armed press becomes a drag.
/// Keeps plain clicks from nudging windows.
pub const DRAG_THRESHOLD: i32 = 4;

/// How far a window may be dragged past the left viewport edge.
pub const PARTIAL_OFFSCREEN_ALLOWANCE: i32 = 200;

/// Minimum horizontal sliver that must stay inside the viewport so the
/// header remains grabbable.
pub const MIN_VISIBLE_WIDTH: i32 = 100;

/// Minimum vertical sliver that must stay above the dock.
pub const MIN_VISIBLE_HEIGHT: i32 = 40;

/// Height of the reserved top bar; windows cannot be dragged underneath it.
pub const TOP_BAR_HEIGHT: i32 = 32;

/// Height of the reserved dock strip at the bottom of the viewport.
pub const DOCK_HEIGHT: i32 = 64;

/// Margin kept from the viewport edges when centering a first-open window.
pub const CENTER_MARGIN: i32 = 20;

/// Upward nudge applied to centered placement to balance the top bar.
pub const CENTER_BIAS: i32 = 40;

/// Delay between logical close and interaction detach, matching the
/// presentation layer's exit transition.
pub const FINALIZE_DELAY: Duration = Duration::from_millis(150);

/// Starting z counter; focused windows always take the next value.
pub const Z_COUNTER_BASE: u64 = 100;
