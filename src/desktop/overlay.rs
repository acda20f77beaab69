//! Overlay coordination: at most one transient surface is open at a time.

use std::fmt;
use std::str::FromStr;

use crate::geometry::{Point, Size, Viewport};

/// The transient surfaces the desktop can present over the windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Activities,
    SystemMenu,
    Calendar,
    ContextMenu,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 4] = [
        OverlayKind::Activities,
        OverlayKind::SystemMenu,
        OverlayKind::Calendar,
        OverlayKind::ContextMenu,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OverlayKind::Activities => "activities",
            OverlayKind::SystemMenu => "system-menu",
            OverlayKind::Calendar => "calendar",
            OverlayKind::ContextMenu => "context-menu",
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOverlay(pub String);

impl fmt::Display for UnknownOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown overlay {:?}", self.0)
    }
}

impl std::error::Error for UnknownOverlay {}

impl FromStr for OverlayKind {
    type Err = UnknownOverlay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OverlayKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownOverlay(s.to_string()))
    }
}

/// Which overlay is currently presented, if any. The context menu carries
/// its clamped anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    None,
    Activities,
    SystemMenu,
    Calendar,
    ContextMenu(Point),
}

impl OverlayState {
    pub fn kind(self) -> Option<OverlayKind> {
        match self {
            OverlayState::None => None,
            OverlayState::Activities => Some(OverlayKind::Activities),
            OverlayState::SystemMenu => Some(OverlayKind::SystemMenu),
            OverlayState::Calendar => Some(OverlayKind::Calendar),
            OverlayState::ContextMenu(_) => Some(OverlayKind::ContextMenu),
        }
    }

    pub fn is_open(self) -> bool {
        !matches!(self, OverlayState::None)
    }
}

/// Places the context menu at the pointer, flipping to the other side of it
/// when the menu would leave the viewport, then clamping into bounds.
pub(crate) fn place_context_menu(anchor: Point, menu: Size, viewport: Viewport) -> Point {
    let vw = viewport.width as i32;
    let vh = viewport.height as i32;
    let mw = menu.width as i32;
    let mh = menu.height as i32;

    let mut x = anchor.x;
    if x + mw > vw {
        x = anchor.x - mw;
    }
    let mut y = anchor.y;
    if y + mh > vh {
        y = anchor.y - mh;
    }

    Point::new(x.min(vw - mw).max(0), y.min(vh - mh).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_known_names_only() {
        assert_eq!("calendar".parse(), Ok(OverlayKind::Calendar));
        assert_eq!("system-menu".parse(), Ok(OverlayKind::SystemMenu));
        assert!("taskbar".parse::<OverlayKind>().is_err());
    }

    #[test]
    fn context_menu_stays_put_when_it_fits() {
        let placed = place_context_menu(
            Point::new(100, 100),
            Size::new(180, 120),
            Viewport::new(1000, 800),
        );
        assert_eq!(placed, Point::new(100, 100));
    }

    #[test]
    fn context_menu_flips_left_near_right_edge() {
        let placed = place_context_menu(
            Point::new(950, 100),
            Size::new(180, 120),
            Viewport::new(1000, 800),
        );
        assert_eq!(placed, Point::new(770, 100));
    }

    #[test]
    fn context_menu_flips_up_near_bottom_edge() {
        let placed = place_context_menu(
            Point::new(100, 780),
            Size::new(180, 120),
            Viewport::new(1000, 800),
        );
        assert_eq!(placed, Point::new(100, 660));
    }

    #[test]
    fn context_menu_clamps_when_flip_still_overflows() {
        // Pointer in the top-left corner of a viewport smaller than the
        // flipped placement would need.
        let placed = place_context_menu(
            Point::new(0, 0),
            Size::new(180, 120),
            Viewport::new(150, 100),
        );
        assert_eq!(placed, Point::new(0, 0));
    }
}
