//! Buffer-safe drawing helpers.
//!
//! Window rectangles routinely drift partially outside the terminal (that
//! is the point of partial-offscreen dragging), so every draw call here
//! clips against the target area instead of trusting the caller.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::geometry::WinRect;

/// Intersection of `rect` with `bounds`, or `None` when nothing is visible.
pub fn clip_rect(rect: Rect, bounds: Rect) -> Option<Rect> {
    let clipped = rect.intersection(bounds);
    if clipped.width == 0 || clipped.height == 0 {
        None
    } else {
        Some(clipped)
    }
}

/// Converts a signed window rect into the buffer's unsigned space, clipping
/// away any part that hangs off the left or top edge.
pub fn visible_rect(rect: WinRect, bounds: Rect) -> Option<Rect> {
    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = rect.x + rect.width as i32;
    let y1 = rect.y + rect.height as i32;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    let visible = Rect {
        x: x0 as u16,
        y: y0 as u16,
        width: (x1 - x0) as u16,
        height: (y1 - y0) as u16,
    };
    clip_rect(visible, bounds)
}

pub fn fill_rect(buf: &mut Buffer, rect: Rect, style: Style) {
    let Some(rect) = clip_rect(rect, *buf.area()) else {
        return;
    };
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(" ").set_style(style);
            }
        }
    }
}

/// Writes `text` at (x, y), truncated to `max_width` cells and clipped to
/// the buffer.
pub fn set_string_clipped(buf: &mut Buffer, x: u16, y: u16, text: &str, max_width: u16, style: Style) {
    if y >= buf.area().bottom() || x >= buf.area().right() {
        return;
    }
    let width = max_width.min(buf.area().right() - x);
    buf.set_stringn(x, y, text, width as usize, style);
}
