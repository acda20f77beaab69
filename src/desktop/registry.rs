//! Per-window lifecycle bookkeeping.

use std::time::Instant;

use crate::geometry::{Size, WinRect};

/// State the desktop keeps for one registered window.
///
/// Geometry is `None` until the window has been opened at least once; after
/// that it survives closes so a reopened window can land where it was left.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WindowRecord {
    pub(crate) is_open: bool,
    pub(crate) geometry: Option<WinRect>,
    pub(crate) z_index: u64,
    pub(crate) default_size: Size,
    /// Set while the window is between its logical close and the detach of
    /// its interaction state.
    pub(crate) finalize_deadline: Option<Instant>,
}

impl WindowRecord {
    pub(crate) fn new(default_size: Size) -> Self {
        Self {
            is_open: false,
            geometry: None,
            z_index: 0,
            default_size,
            finalize_deadline: None,
        }
    }

    /// Whether the window may receive focus, drags, and clicks.
    pub(crate) fn accepts_interaction(&self) -> bool {
        self.is_open && self.finalize_deadline.is_none()
    }
}
