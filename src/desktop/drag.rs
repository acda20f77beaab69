//! Header-drag session state and the clamp that keeps windows reachable.

use crate::config::DesktopConfig;
use crate::geometry::{Point, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DragPhase {
    /// Header pressed; waiting to see whether this is a click or a drag.
    Armed,
    /// Threshold crossed; pointer moves translate the window.
    Dragging,
}

/// One in-flight header interaction. At most one session exists at a time;
/// a press while a session is live is rejected, not queued.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DragSession<W> {
    pub(crate) id: W,
    /// Pointer position at the initial press, for threshold measurement.
    pub(crate) pressed_at: Point,
    /// Pointer offset from the window origin, kept constant while dragging.
    pub(crate) grab_offset: Point,
    pub(crate) phase: DragPhase,
}

/// Chebyshev distance: a drag starts once either axis travels far enough.
pub(crate) fn travel(from: Point, to: Point) -> i32 {
    (to.x - from.x).abs().max((to.y - from.y).abs())
}

/// Clamps a dragged origin so part of the window always stays grabbable:
/// limited overhang on the left, a minimum sliver on the right, never under
/// the top bar, never below the dock.
pub(crate) fn clamp_dragged_origin(
    origin: Point,
    viewport: Viewport,
    config: &DesktopConfig,
) -> Point {
    let vw = viewport.width as i32;
    let vh = viewport.height as i32;
    let x = origin
        .x
        .min(vw - config.min_visible_width)
        .max(-config.partial_offscreen_allowance);
    let y = origin
        .y
        .min(vh - config.dock_height - config.min_visible_height)
        .max(config.top_bar_height);
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DesktopConfig {
        DesktopConfig::default()
    }

    #[test]
    fn travel_is_per_axis_maximum() {
        assert_eq!(travel(Point::new(50, 50), Point::new(53, 51)), 3);
        assert_eq!(travel(Point::new(50, 50), Point::new(48, 57)), 7);
    }

    #[test]
    fn clamp_passes_interior_positions_through() {
        let origin = clamp_dragged_origin(Point::new(300, 200), Viewport::new(1000, 800), &config());
        assert_eq!(origin, Point::new(300, 200));
    }

    #[test]
    fn clamp_limits_left_overhang() {
        let origin = clamp_dragged_origin(Point::new(-999, 200), Viewport::new(1000, 800), &config());
        assert_eq!(origin.x, -200);
    }

    #[test]
    fn clamp_keeps_a_right_sliver_visible() {
        let origin = clamp_dragged_origin(Point::new(5000, 200), Viewport::new(1000, 800), &config());
        assert_eq!(origin.x, 900);
    }

    #[test]
    fn clamp_respects_top_bar_and_dock() {
        let config = config();
        let viewport = Viewport::new(1000, 800);
        let high = clamp_dragged_origin(Point::new(300, -50), viewport, &config);
        assert_eq!(high.y, config.top_bar_height);
        let low = clamp_dragged_origin(Point::new(300, 5000), viewport, &config);
        assert_eq!(low.y, 800 - config.dock_height - config.min_visible_height);
    }
}
