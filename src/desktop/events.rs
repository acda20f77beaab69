use super::overlay::OverlayState;

/// Typed notifications emitted by the core after each state transition.
///
/// The host drains these with [`super::Desktop::take_events`] and applies
/// them to its surfaces; the core never touches a visual object directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopEvent<W> {
    WindowOpened { id: W },
    WindowClosed { id: W },
    /// The deferred second phase of a close: interaction has been detached.
    WindowFinalized { id: W },
    FocusChanged { id: Option<W> },
    OverlayChanged { overlay: OverlayState },
    DragMoved { id: W, x: i32, y: i32 },
}
