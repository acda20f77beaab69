//! A desktop-shell interaction core with a terminal front-end.
//!
//! The crate splits into two layers:
//! - the core ([`desktop`], [`config`], [`geometry`], [`store`]): window
//!   lifecycle, focus and z-order, header drags, overlay exclusion, and the
//!   dock projection, all surface-agnostic and fully deterministic;
//! - the terminal front-end ([`shell`], [`drivers`], [`event_loop`],
//!   [`ui`], [`theme`]): a crossterm/ratatui presentation of that core.

pub mod clock;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod event_loop;
pub mod geometry;
pub mod keybindings;
pub mod launcher;
pub mod shell;
pub mod store;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod wallpaper;
