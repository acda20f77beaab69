use ratatui::style::Color;

use crate::wallpaper::Wallpaper;

// Centralized theme colors. Keep these as small helpers so the render
// paths never hard-code a Color inline.

pub fn desktop_bg(wallpaper: Wallpaper) -> Color {
    match wallpaper {
        Wallpaper::Ubuntu => Color::Rgb(72, 18, 52),
        Wallpaper::Aubergine => Color::Rgb(46, 20, 55),
        Wallpaper::Midnight => Color::Rgb(12, 16, 36),
        Wallpaper::Sand => Color::Rgb(110, 88, 56),
    }
}

pub fn accent() -> Color {
    Color::Rgb(233, 84, 32)
}

// Top bar
pub fn bar_bg() -> Color {
    Color::Black
}
pub fn bar_fg() -> Color {
    Color::White
}
pub fn bar_active_bg() -> Color {
    Color::DarkGray
}

// Dock
pub fn dock_bg() -> Color {
    Color::Black
}
pub fn dock_fg() -> Color {
    Color::Gray
}
pub fn dock_open_fg() -> Color {
    Color::White
}
pub fn dock_focused_bg() -> Color {
    Color::DarkGray
}

// Window chrome
pub fn header_bg_focused() -> Color {
    accent()
}
pub fn header_bg_unfocused() -> Color {
    Color::DarkGray
}
pub fn header_fg() -> Color {
    Color::White
}
pub fn body_bg() -> Color {
    Color::Rgb(28, 28, 32)
}
pub fn body_fg() -> Color {
    Color::Gray
}
pub fn close_fg() -> Color {
    Color::Red
}

// Overlays
pub fn overlay_bg() -> Color {
    Color::Rgb(20, 20, 24)
}
pub fn overlay_fg() -> Color {
    Color::White
}
pub fn overlay_dim_fg() -> Color {
    Color::DarkGray
}
pub fn overlay_highlight_bg() -> Color {
    accent()
}
