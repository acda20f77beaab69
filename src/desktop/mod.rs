//! The interaction core of the desktop: window lifecycle, focus and
//! z-order, header drags, overlay exclusion, and the dock projection.
//!
//! [`Desktop`] owns all authoritative state and never touches a surface;
//! hosts feed it pointer and key input, poll [`Desktop::tick`], and drain
//! [`Desktop::take_events`] to update whatever they render with.

mod dock;
mod drag;
mod events;
mod focus;
mod overlay;
mod registry;

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

pub use dock::DockState;
pub use events::DesktopEvent;
pub use overlay::{OverlayKind, OverlayState, UnknownOverlay};

use drag::{DragPhase, DragSession};
use focus::FocusState;
use registry::WindowRecord;

use crate::config::{DesktopConfig, ReclickBehavior};
use crate::geometry::{centered_origin, Point, Size, Viewport, ViewportProvider, WinRect};
use crate::store::{DesktopStore, SavedPosition};

pub struct Desktop<W> {
    config: DesktopConfig,
    viewport: Box<dyn ViewportProvider>,
    store: Box<dyn DesktopStore>,
    windows: BTreeMap<W, WindowRecord>,
    focus: FocusState<W>,
    drag: Option<DragSession<W>>,
    overlay: OverlayState,
    events: Vec<DesktopEvent<W>>,
}

impl<W> Desktop<W>
where
    W: Copy + Ord + fmt::Display,
{
    pub fn new(
        config: DesktopConfig,
        viewport: Box<dyn ViewportProvider>,
        store: Box<dyn DesktopStore>,
    ) -> Self {
        Self {
            config,
            viewport,
            store,
            windows: BTreeMap::new(),
            focus: FocusState::new(),
            drag: None,
            overlay: OverlayState::None,
            events: Vec::new(),
        }
    }

    /// Declares a window the desktop can open. Registering twice is a no-op;
    /// the original default size wins.
    pub fn register(&mut self, id: W, default_size: Size) {
        self.windows
            .entry(id)
            .or_insert_with(|| WindowRecord::new(default_size));
    }

    /// Opens `id` (or re-raises it if already open). First-ever opens are
    /// centered; later opens land at the last stored position. Opening a
    /// window that is mid-finalize revives it in place. Any open overlay is
    /// dismissed.
    pub fn open(&mut self, id: W) {
        if !self.windows.contains_key(&id) {
            tracing::warn!(window_id = %id, "open requested for unregistered window");
            return;
        }
        self.close_overlay();
        let Some(record) = self.windows.get_mut(&id) else {
            return;
        };
        record.finalize_deadline = None;
        if !record.is_open {
            record.is_open = true;
            let size = record.default_size;
            let origin = match self.store.get(&id.to_string()) {
                Some(saved) => Point::new(saved.x, saved.y),
                None => centered_origin(
                    size,
                    self.viewport.bounds(),
                    self.config.center_margin,
                    self.config.center_bias,
                ),
            };
            record.geometry = Some(WinRect::from_parts(origin, size));
            tracing::debug!(window_id = %id, x = origin.x, y = origin.y, "window opened");
            self.events.push(DesktopEvent::WindowOpened { id });
        }
        self.focus_window(id);
    }

    /// First phase of a close: the window leaves the registry's open set and
    /// the dock immediately, its position is committed, and a deadline is
    /// set after which [`Desktop::tick`] detaches interaction for good.
    pub fn close(&mut self, id: W) {
        let Some(record) = self.windows.get_mut(&id) else {
            return;
        };
        if !record.is_open {
            return;
        }
        record.is_open = false;
        record.finalize_deadline = Some(Instant::now() + self.config.finalize_delay);
        if let Some(origin) = record.geometry.map(|g| g.origin()) {
            self.store
                .set(&id.to_string(), SavedPosition { x: origin.x, y: origin.y });
        }
        if self.drag.as_ref().is_some_and(|session| session.id == id) {
            self.drag = None;
        }
        tracing::debug!(window_id = %id, "window closed");
        self.events.push(DesktopEvent::WindowClosed { id });
        if self.focus.clear_if(id) {
            self.events.push(DesktopEvent::FocusChanged { id: None });
        }
    }

    /// Closes the focused window, if any.
    pub fn close_active(&mut self) {
        if let Some(id) = self.focus.focused() {
            self.close(id);
        }
    }

    /// Drives deferred close finalization. Call with the current time from
    /// the host loop; windows whose deadline has passed emit
    /// [`DesktopEvent::WindowFinalized`].
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        let due: Vec<W> = self
            .windows
            .iter()
            .filter(|(_, record)| record.finalize_deadline.is_some_and(|at| at <= now))
            .map(|(id, _)| *id)
            .collect();
        for id in due {
            if let Some(record) = self.windows.get_mut(&id) {
                record.finalize_deadline = None;
                tracing::debug!(window_id = %id, "window finalized");
                self.events.push(DesktopEvent::WindowFinalized { id });
            }
        }
    }

    /// Raises `id` to the front and marks it focused. Refocusing the same
    /// window still bumps the z counter. Closed or finalizing windows do
    /// not take focus.
    pub fn focus_window(&mut self, id: W) {
        let Some(record) = self.windows.get_mut(&id) else {
            return;
        };
        if !record.accepts_interaction() {
            return;
        }
        record.z_index = self.focus.raise(id);
        self.events.push(DesktopEvent::FocusChanged { id: Some(id) });
    }

    /// A press on the header of `id`: focuses it and arms a drag session.
    /// While a session is in flight, presses on other headers are rejected
    /// rather than queued.
    pub fn begin_arm(&mut self, id: W, pointer: Point) {
        if self.drag.is_some() {
            tracing::debug!(window_id = %id, "drag session in flight, press rejected");
            return;
        }
        let Some(record) = self.windows.get(&id) else {
            return;
        };
        if !record.accepts_interaction() {
            return;
        }
        let Some(geometry) = record.geometry else {
            return;
        };
        self.focus_window(id);
        self.drag = Some(DragSession {
            id,
            pressed_at: pointer,
            grab_offset: Point::new(pointer.x - geometry.x, pointer.y - geometry.y),
            phase: DragPhase::Armed,
        });
    }

    /// Pointer motion while a session is armed or dragging. An armed session
    /// becomes a drag once travel exceeds the configured threshold; the same
    /// motion already moves the window.
    pub fn pointer_move(&mut self, pointer: Point) {
        let Some(session) = self.drag.as_mut() else {
            return;
        };
        if session.phase == DragPhase::Armed {
            if drag::travel(session.pressed_at, pointer) <= self.config.drag_threshold {
                return;
            }
            session.phase = DragPhase::Dragging;
        }
        let (id, grab) = (session.id, session.grab_offset);
        let origin = drag::clamp_dragged_origin(
            Point::new(pointer.x - grab.x, pointer.y - grab.y),
            self.viewport.bounds(),
            &self.config,
        );
        if let Some(record) = self.windows.get_mut(&id)
            && let Some(geometry) = record.geometry.as_mut()
        {
            geometry.x = origin.x;
            geometry.y = origin.y;
            self.events.push(DesktopEvent::DragMoved {
                id,
                x: origin.x,
                y: origin.y,
            });
        }
    }

    /// Pointer release. A session that never crossed the threshold was a
    /// plain click and changes nothing further; a drag commits the final
    /// position to the store.
    pub fn pointer_up(&mut self) {
        let Some(session) = self.drag.take() else {
            return;
        };
        if session.phase != DragPhase::Dragging {
            return;
        }
        let origin = self
            .windows
            .get(&session.id)
            .and_then(|record| record.geometry)
            .map(|g| g.origin());
        if let Some(origin) = origin {
            self.store.set(
                &session.id.to_string(),
                SavedPosition { x: origin.x, y: origin.y },
            );
            tracing::debug!(window_id = %session.id, x = origin.x, y = origin.y, "drag committed");
        }
    }

    /// A click on the dock item for `id`. Closed windows open; open but
    /// unfocused windows come to the front; the focused window's response is
    /// the configured re-click policy.
    pub fn dock_click(&mut self, id: W) {
        match self.dock_state_of(id) {
            DockState::Closed | DockState::OpenUnfocused => self.open(id),
            DockState::OpenFocused => match self.config.reclick_behavior {
                ReclickBehavior::None => self.open(id),
                ReclickBehavior::Minimize => self.close(id),
            },
        }
    }

    /// Toggles one of the named overlays. Opening an overlay dismisses
    /// whichever other overlay was showing; overlays the config does not
    /// offer are ignored.
    pub fn toggle_overlay(&mut self, kind: OverlayKind) {
        if self.overlay.kind() == Some(kind) {
            self.close_overlay();
        } else {
            self.show_overlay(kind, Point::default());
        }
    }

    /// Opens an overlay regardless of current state, replacing whichever
    /// one was showing. The context menu anchors at the viewport origin;
    /// use [`Desktop::open_context_menu`] to anchor it at the pointer.
    pub fn open_overlay(&mut self, kind: OverlayKind) {
        self.show_overlay(kind, Point::default());
    }

    /// Presents the context menu at `anchor`, flipped and clamped to stay
    /// inside the viewport.
    pub fn open_context_menu(&mut self, anchor: Point) {
        self.show_overlay(OverlayKind::ContextMenu, anchor);
    }

    fn show_overlay(&mut self, kind: OverlayKind, anchor: Point) {
        if !self.config.overlays.contains(&kind) {
            tracing::debug!(overlay = %kind, "overlay not offered, request ignored");
            return;
        }
        let next = match kind {
            OverlayKind::Activities => OverlayState::Activities,
            OverlayKind::SystemMenu => OverlayState::SystemMenu,
            OverlayKind::Calendar => OverlayState::Calendar,
            OverlayKind::ContextMenu => OverlayState::ContextMenu(overlay::place_context_menu(
                anchor,
                self.config.context_menu_size,
                self.viewport.bounds(),
            )),
        };
        if self.overlay != next {
            self.overlay = next;
            self.events.push(DesktopEvent::OverlayChanged { overlay: next });
        }
    }

    pub fn close_overlay(&mut self) {
        if self.overlay.is_open() {
            self.overlay = OverlayState::None;
            self.events.push(DesktopEvent::OverlayChanged {
                overlay: OverlayState::None,
            });
        }
    }

    /// Escape: dismiss the open overlay if there is one, otherwise close the
    /// focused window.
    pub fn handle_escape(&mut self) {
        if self.overlay.is_open() {
            self.close_overlay();
        } else {
            self.close_active();
        }
    }

    pub fn is_open(&self, id: W) -> bool {
        self.windows.get(&id).is_some_and(|record| record.is_open)
    }

    /// True between a close and its finalize tick, while the exit
    /// presentation is still on screen.
    pub fn is_finalizing(&self, id: W) -> bool {
        self.windows
            .get(&id)
            .is_some_and(|record| !record.is_open && record.finalize_deadline.is_some())
    }

    pub fn is_focused(&self, id: W) -> bool {
        self.focus.focused() == Some(id)
    }

    pub fn focused(&self) -> Option<W> {
        self.focus.focused()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag
            .as_ref()
            .is_some_and(|session| session.phase == DragPhase::Dragging)
    }

    /// Last known geometry, present once the window has been opened at least
    /// once. Still returned for closed windows so exit presentation can use
    /// it.
    pub fn geometry_of(&self, id: W) -> Option<WinRect> {
        self.windows.get(&id).and_then(|record| record.geometry)
    }

    pub fn z_index_of(&self, id: W) -> Option<u64> {
        self.windows.get(&id).map(|record| record.z_index)
    }

    pub fn dock_state_of(&self, id: W) -> DockState {
        let record = self.windows.get(&id);
        dock::project(
            record.is_some_and(|r| r.is_open),
            self.is_focused(id),
        )
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    /// Open windows back to front, the order a painter wants.
    pub fn render_order(&self) -> Vec<W> {
        let mut ids: Vec<(u64, W)> = self
            .windows
            .iter()
            .filter(|(_, record)| record.is_open || record.finalize_deadline.is_some())
            .map(|(id, record)| (record.z_index, *id))
            .collect();
        ids.sort_by_key(|(z, _)| *z);
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn registered(&self) -> Vec<W> {
        self.windows.keys().copied().collect()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.bounds()
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    /// The backing store, for preference reads and writes that live outside
    /// the window lifecycle (wallpaper choice and the like).
    pub fn store(&self) -> &dyn DesktopStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn DesktopStore {
        self.store.as_mut()
    }

    /// Drains the transition notifications accumulated since the last call.
    pub fn take_events(&mut self) -> Vec<DesktopEvent<W>> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FixedViewport;
    use crate::store::MemoryStore;
    use std::time::Duration;

    fn desktop() -> Desktop<&'static str> {
        let mut desk = Desktop::new(
            DesktopConfig::default(),
            Box::new(FixedViewport(Viewport::new(1000, 800))),
            Box::new(MemoryStore::new()),
        );
        desk.register("about", Size::new(400, 300));
        desk.register("projects", Size::new(400, 300));
        desk
    }

    #[test]
    fn first_open_centers_and_focuses() {
        let mut desk = desktop();
        desk.open("about");
        let geometry = desk.geometry_of("about").unwrap();
        assert_eq!((geometry.x, geometry.y), (300, 210));
        assert!(desk.is_focused("about"));
        assert_eq!(desk.dock_state_of("about"), DockState::OpenFocused);
    }

    #[test]
    fn reopen_keeps_geometry_and_rebumps_z() {
        let mut desk = desktop();
        desk.open("about");
        let z_first = desk.z_index_of("about").unwrap();
        desk.open("projects");
        desk.open("about");
        let geometry = desk.geometry_of("about").unwrap();
        assert_eq!((geometry.x, geometry.y), (300, 210));
        assert!(desk.z_index_of("about").unwrap() > z_first);
    }

    #[test]
    fn close_is_two_phase() {
        let mut desk = desktop();
        desk.open("about");
        desk.close("about");
        assert!(!desk.is_open("about"));
        assert!(desk.is_finalizing("about"));
        desk.tick_at(Instant::now() + Duration::from_millis(200));
        assert!(!desk.is_finalizing("about"));
        let events = desk.take_events();
        assert!(events.contains(&DesktopEvent::WindowFinalized { id: "about" }));
    }

    #[test]
    fn reopen_during_finalize_revives_in_place() {
        let mut desk = desktop();
        desk.open("about");
        desk.close("about");
        desk.open("about");
        assert!(desk.is_open("about"));
        assert!(!desk.is_finalizing("about"));
        desk.take_events();
        desk.tick_at(Instant::now() + Duration::from_secs(1));
        assert!(desk.take_events().is_empty());
    }

    #[test]
    fn close_of_unopened_window_is_a_no_op() {
        let mut desk = desktop();
        desk.close("about");
        assert!(desk.take_events().is_empty());
    }

    #[test]
    fn unregistered_open_is_ignored() {
        let mut desk = desktop();
        desk.open("terminal");
        assert!(!desk.is_open("terminal"));
        assert!(desk.take_events().is_empty());
    }

    #[test]
    fn overlays_are_mutually_exclusive() {
        let mut desk = desktop();
        desk.toggle_overlay(OverlayKind::Activities);
        assert_eq!(desk.overlay(), OverlayState::Activities);
        desk.toggle_overlay(OverlayKind::Calendar);
        assert_eq!(desk.overlay(), OverlayState::Calendar);
        desk.toggle_overlay(OverlayKind::Calendar);
        assert_eq!(desk.overlay(), OverlayState::None);
    }

    #[test]
    fn opening_a_window_dismisses_the_overlay() {
        let mut desk = desktop();
        desk.toggle_overlay(OverlayKind::SystemMenu);
        desk.open("about");
        assert_eq!(desk.overlay(), OverlayState::None);
    }

    #[test]
    fn unoffered_overlay_is_inert() {
        let mut desk = Desktop::new(
            DesktopConfig {
                overlays: vec![OverlayKind::Activities],
                ..DesktopConfig::default()
            },
            Box::new(FixedViewport(Viewport::new(1000, 800))),
            Box::new(MemoryStore::new()),
        );
        desk.register("about", Size::new(400, 300));
        desk.toggle_overlay(OverlayKind::Calendar);
        assert_eq!(desk.overlay(), OverlayState::None);
        assert!(desk.take_events().is_empty());
    }

    #[test]
    fn escape_prefers_overlay_over_window() {
        let mut desk = desktop();
        desk.open("about");
        desk.toggle_overlay(OverlayKind::Calendar);
        desk.handle_escape();
        assert_eq!(desk.overlay(), OverlayState::None);
        assert!(desk.is_open("about"));
        desk.handle_escape();
        assert!(!desk.is_open("about"));
        desk.handle_escape();
    }

    #[test]
    fn dock_reclick_policy_minimize_closes() {
        let mut desk = Desktop::new(
            DesktopConfig {
                reclick_behavior: ReclickBehavior::Minimize,
                ..DesktopConfig::default()
            },
            Box::new(FixedViewport(Viewport::new(1000, 800))),
            Box::new(MemoryStore::new()),
        );
        desk.register("about", Size::new(400, 300));
        desk.dock_click("about");
        assert!(desk.is_open("about"));
        desk.dock_click("about");
        assert!(!desk.is_open("about"));
    }

    #[test]
    fn render_order_tracks_raises() {
        let mut desk = desktop();
        desk.open("about");
        desk.open("projects");
        assert_eq!(desk.render_order(), vec!["about", "projects"]);
        desk.focus_window("about");
        assert_eq!(desk.render_order(), vec!["projects", "about"]);
    }
}
