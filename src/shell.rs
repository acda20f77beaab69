//! Terminal presentation of the desktop: top bar, dock, window chrome, and
//! the four overlays, plus the routing of raw input into the core.
//!
//! The shell re-derives everything it draws from [`Desktop`] each frame and
//! records the rectangles it drew into a hit map; mouse handling on the next
//! event walks that map. Nothing here is authoritative.

use chrono::{DateTime, Local};
use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::clock;
use crate::desktop::{Desktop, DockState, OverlayKind, OverlayState};
use crate::geometry::Point;
use crate::keybindings::{Action, KeyBindings};
use crate::launcher::{AppEntry, Launcher};
use crate::theme;
use crate::ui;
use crate::wallpaper::Wallpaper;

pub enum ShellReaction {
    Continue,
    Quit,
}

/// Rectangles drawn last frame, consulted by mouse handling. Window entries
/// are kept front-to-back so the topmost window wins overlapping hits.
struct HitMap<W> {
    bar_activities: Rect,
    bar_clock: Rect,
    bar_system: Rect,
    dock_items: Vec<(Rect, W)>,
    windows: Vec<WindowHits<W>>,
    overlay: Option<Rect>,
    launcher_rows: Vec<(Rect, W)>,
    context_rows: Vec<(Rect, W)>,
    swatches: Vec<(Rect, Wallpaper)>,
    quit_row: Option<Rect>,
}

struct WindowHits<W> {
    id: W,
    full: Rect,
    header: Rect,
    close: Rect,
}

impl<W> Default for HitMap<W> {
    fn default() -> Self {
        Self {
            bar_activities: Rect::default(),
            bar_clock: Rect::default(),
            bar_system: Rect::default(),
            dock_items: Vec::new(),
            windows: Vec::new(),
            overlay: None,
            launcher_rows: Vec::new(),
            context_rows: Vec::new(),
            swatches: Vec::new(),
            quit_row: None,
        }
    }
}

fn hit(rect: Rect, point: Point) -> bool {
    point.x >= 0
        && point.y >= 0
        && rect.contains(ratatui::layout::Position {
            x: point.x as u16,
            y: point.y as u16,
        })
}

pub struct Shell<W> {
    apps: Vec<AppEntry<W>>,
    launcher: Launcher<W>,
    bindings: KeyBindings,
    wallpaper: Wallpaper,
    hits: HitMap<W>,
}

impl<W> Shell<W>
where
    W: Copy + Ord + std::fmt::Display,
{
    pub fn new(apps: Vec<AppEntry<W>>, bindings: KeyBindings, wallpaper: Wallpaper) -> Self {
        Self {
            launcher: Launcher::new(apps.clone()),
            apps,
            bindings,
            wallpaper,
            hits: HitMap::default(),
        }
    }

    pub fn wallpaper(&self) -> Wallpaper {
        self.wallpaper
    }

    fn label_of(&self, id: W) -> String {
        self.apps
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.label.to_string())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn render(&mut self, buf: &mut Buffer, desktop: &Desktop<W>, now: DateTime<Local>) {
        self.hits = HitMap::default();
        let area = *buf.area();
        ui::fill_rect(buf, area, Style::default().bg(theme::desktop_bg(self.wallpaper)));

        self.render_windows(buf, desktop);
        self.render_top_bar(buf, desktop, now);
        self.render_dock(buf, desktop);
        self.render_overlay(buf, desktop, now);
    }

    fn render_top_bar(&mut self, buf: &mut Buffer, desktop: &Desktop<W>, now: DateTime<Local>) {
        let area = *buf.area();
        if area.height == 0 {
            return;
        }
        let bar = Rect::new(0, 0, area.width, 1);
        ui::fill_rect(buf, bar, Style::default().bg(theme::bar_bg()).fg(theme::bar_fg()));

        let overlay = desktop.overlay();
        let button = |active: bool| {
            let mut style = Style::default().fg(theme::bar_fg());
            style = if active {
                style.bg(theme::bar_active_bg()).add_modifier(Modifier::BOLD)
            } else {
                style.bg(theme::bar_bg())
            };
            style
        };

        let activities = " Activities ";
        ui::set_string_clipped(
            buf,
            1,
            0,
            activities,
            activities.len() as u16,
            button(overlay == OverlayState::Activities),
        );
        self.hits.bar_activities = Rect::new(1, 0, activities.len() as u16, 1);

        let clock_label = format!(" {} ", clock::clock_text(&now));
        let clock_w = clock_label.len() as u16;
        let clock_x = area.width.saturating_sub(clock_w) / 2;
        ui::set_string_clipped(
            buf,
            clock_x,
            0,
            &clock_label,
            clock_w,
            button(overlay == OverlayState::Calendar),
        );
        self.hits.bar_clock = Rect::new(clock_x, 0, clock_w, 1);

        let system = " Menu ";
        let system_w = system.len() as u16;
        let system_x = area.width.saturating_sub(system_w + 1);
        ui::set_string_clipped(
            buf,
            system_x,
            0,
            system,
            system_w,
            button(overlay == OverlayState::SystemMenu),
        );
        self.hits.bar_system = Rect::new(system_x, 0, system_w, 1);
    }

    fn render_dock(&mut self, buf: &mut Buffer, desktop: &Desktop<W>) {
        let area = *buf.area();
        if area.height < 2 {
            return;
        }
        let row = area.height - 1;
        let dock = Rect::new(0, row, area.width, 1);
        ui::fill_rect(buf, dock, Style::default().bg(theme::dock_bg()).fg(theme::dock_fg()));

        let mut x = 1u16;
        for entry in self.apps.clone() {
            let state = desktop.dock_state_of(entry.id);
            let marker = if state.is_open() { "*" } else { " " };
            let label = format!(" {}{} ", self.label_of(entry.id), marker);
            let width = label.len() as u16;
            if x + width >= area.width {
                break;
            }
            let mut style = Style::default().bg(theme::dock_bg()).fg(theme::dock_fg());
            match state {
                DockState::Closed => {}
                DockState::OpenUnfocused => {
                    style = style.fg(theme::dock_open_fg());
                }
                DockState::OpenFocused => {
                    style = style
                        .fg(theme::dock_open_fg())
                        .bg(theme::dock_focused_bg())
                        .add_modifier(Modifier::BOLD);
                }
            }
            ui::set_string_clipped(buf, x, row, &label, width, style);
            self.hits.dock_items.push((Rect::new(x, row, width, 1), entry.id));
            x += width + 1;
        }
    }

    fn render_windows(&mut self, buf: &mut Buffer, desktop: &Desktop<W>) {
        let area = *buf.area();
        for id in desktop.render_order() {
            let Some(geometry) = desktop.geometry_of(id) else {
                continue;
            };
            let Some(visible) = ui::visible_rect(geometry, area) else {
                continue;
            };
            let finalizing = desktop.is_finalizing(id);
            let focused = desktop.is_focused(id);

            let body_style = if finalizing {
                Style::default().bg(theme::body_bg()).fg(theme::overlay_dim_fg())
            } else {
                Style::default().bg(theme::body_bg()).fg(theme::body_fg())
            };
            ui::fill_rect(buf, visible, body_style);

            // Header is the window's top row; it may be clipped away when
            // the window hangs past an edge.
            let mut header = Rect::default();
            let mut close = Rect::default();
            if geometry.y >= 0 && (geometry.y as u16) < area.height {
                let header_bg = if focused && !finalizing {
                    theme::header_bg_focused()
                } else {
                    theme::header_bg_unfocused()
                };
                header = Rect::new(visible.x, geometry.y as u16, visible.width, 1);
                ui::fill_rect(buf, header, Style::default().bg(header_bg));
                let title = format!(" {} ", self.label_of(id));
                ui::set_string_clipped(
                    buf,
                    header.x,
                    header.y,
                    &title,
                    header.width,
                    Style::default().bg(header_bg).fg(theme::header_fg()),
                );
                if header.width >= 3 {
                    close = Rect::new(header.right() - 3, header.y, 3, 1);
                    ui::set_string_clipped(
                        buf,
                        close.x,
                        close.y,
                        " x ",
                        3,
                        Style::default().bg(header_bg).fg(theme::close_fg()),
                    );
                }
            }

            if finalizing {
                // Exit presentation only; no hit targets.
                continue;
            }
            self.hits.windows.insert(
                0,
                WindowHits {
                    id,
                    full: visible,
                    header,
                    close,
                },
            );
        }
    }

    fn render_overlay(&mut self, buf: &mut Buffer, desktop: &Desktop<W>, now: DateTime<Local>) {
        match desktop.overlay() {
            OverlayState::None => {}
            OverlayState::Activities => self.render_activities(buf, desktop),
            OverlayState::SystemMenu => self.render_system_menu(buf),
            OverlayState::Calendar => self.render_calendar(buf, now),
            OverlayState::ContextMenu(anchor) => self.render_context_menu(buf, desktop, anchor),
        }
    }

    fn panel(&mut self, buf: &mut Buffer, rect: Rect) -> Rect {
        let rect = ui::clip_rect(rect, *buf.area()).unwrap_or_default();
        ui::fill_rect(
            buf,
            rect,
            Style::default().bg(theme::overlay_bg()).fg(theme::overlay_fg()),
        );
        self.hits.overlay = Some(rect);
        rect
    }

    fn render_activities(&mut self, buf: &mut Buffer, desktop: &Desktop<W>) {
        let area = *buf.area();
        let width = 36.min(area.width);
        let height = (self.apps.len() as u16 + 4).min(area.height.saturating_sub(2));
        let rect = Rect::new(
            area.width.saturating_sub(width) / 2,
            2.min(area.height.saturating_sub(height)),
            width,
            height,
        );
        let rect = self.panel(buf, rect);
        if rect.height < 2 {
            return;
        }

        let query = format!(" Search: {}_", self.launcher.query());
        ui::set_string_clipped(
            buf,
            rect.x + 1,
            rect.y + 1,
            &query,
            rect.width.saturating_sub(2),
            Style::default()
                .bg(theme::overlay_bg())
                .fg(theme::overlay_fg())
                .add_modifier(Modifier::BOLD),
        );

        let mut row = rect.y + 3;
        for entry in self.launcher.matches() {
            if row >= rect.bottom() {
                break;
            }
            let open = desktop.is_open(entry.id);
            let label = format!("  {}{}", entry.label, if open { " *" } else { "" });
            ui::set_string_clipped(
                buf,
                rect.x + 1,
                row,
                &label,
                rect.width.saturating_sub(2),
                Style::default().bg(theme::overlay_bg()).fg(theme::overlay_fg()),
            );
            self.hits
                .launcher_rows
                .push((Rect::new(rect.x, row, rect.width, 1), entry.id));
            row += 1;
        }
    }

    fn render_system_menu(&mut self, buf: &mut Buffer) {
        let area = *buf.area();
        let width = 22.min(area.width);
        let height = (Wallpaper::ALL.len() as u16 + 4).min(area.height.saturating_sub(1));
        let rect = Rect::new(area.width.saturating_sub(width + 1), 1, width, height);
        let rect = self.panel(buf, rect);
        if rect.height < 2 {
            return;
        }

        ui::set_string_clipped(
            buf,
            rect.x + 1,
            rect.y + 1,
            "Wallpaper",
            rect.width.saturating_sub(2),
            Style::default()
                .bg(theme::overlay_bg())
                .fg(theme::overlay_dim_fg()),
        );
        let mut row = rect.y + 2;
        for wp in Wallpaper::ALL {
            if row >= rect.bottom() {
                return;
            }
            let marker = if wp == self.wallpaper { ">" } else { " " };
            let label = format!(" {} {}", marker, wp.slug());
            ui::set_string_clipped(
                buf,
                rect.x + 1,
                row,
                &label,
                rect.width.saturating_sub(2),
                Style::default().bg(theme::overlay_bg()).fg(theme::overlay_fg()),
            );
            self.hits.swatches.push((Rect::new(rect.x, row, rect.width, 1), wp));
            row += 1;
        }
        if row < rect.bottom() {
            ui::set_string_clipped(
                buf,
                rect.x + 1,
                row,
                "   Quit",
                rect.width.saturating_sub(2),
                Style::default().bg(theme::overlay_bg()).fg(theme::close_fg()),
            );
            self.hits.quit_row = Some(Rect::new(rect.x, row, rect.width, 1));
        }
    }

    fn render_calendar(&mut self, buf: &mut Buffer, now: DateTime<Local>) {
        let area = *buf.area();
        let width = 30.min(area.width);
        let height = 10.min(area.height.saturating_sub(1));
        let rect = Rect::new(area.width.saturating_sub(width) / 2, 1, width, height);
        let rect = self.panel(buf, rect);
        if rect.height < 3 {
            return;
        }

        let today = now.date_naive();
        ui::set_string_clipped(
            buf,
            rect.x + 1,
            rect.y + 1,
            &clock::month_title(today),
            rect.width.saturating_sub(2),
            Style::default()
                .bg(theme::overlay_bg())
                .fg(theme::overlay_fg())
                .add_modifier(Modifier::BOLD),
        );
        ui::set_string_clipped(
            buf,
            rect.x + 1,
            rect.y + 2,
            "Su Mo Tu We Th Fr Sa",
            rect.width.saturating_sub(2),
            Style::default()
                .bg(theme::overlay_bg())
                .fg(theme::overlay_dim_fg()),
        );
        for (i, cell) in clock::month_grid(today).iter().enumerate() {
            let col = (i % 7) as u16;
            let row = (i / 7) as u16;
            let y = rect.y + 3 + row;
            if y >= rect.bottom() {
                break;
            }
            let mut style = Style::default().bg(theme::overlay_bg()).fg(if cell.in_month {
                theme::overlay_fg()
            } else {
                theme::overlay_dim_fg()
            });
            if cell.is_today {
                style = style.bg(theme::overlay_highlight_bg()).add_modifier(Modifier::BOLD);
            }
            ui::set_string_clipped(
                buf,
                rect.x + 1 + col * 3,
                y,
                &format!("{:>2}", cell.day),
                2,
                style,
            );
        }
    }

    fn render_context_menu(&mut self, buf: &mut Buffer, desktop: &Desktop<W>, anchor: Point) {
        let size = desktop.config().context_menu_size;
        let rect = Rect::new(
            anchor.x.max(0) as u16,
            anchor.y.max(0) as u16,
            size.width,
            size.height,
        );
        let rect = self.panel(buf, rect);

        let mut row = rect.y + 1;
        for entry in self.apps.clone() {
            if row >= rect.bottom() {
                break;
            }
            let label = format!(" Open {}", entry.label);
            ui::set_string_clipped(
                buf,
                rect.x + 1,
                row,
                &label,
                rect.width.saturating_sub(2),
                Style::default().bg(theme::overlay_bg()).fg(theme::overlay_fg()),
            );
            self.hits
                .context_rows
                .push((Rect::new(rect.x, row, rect.width, 1), entry.id));
            row += 1;
        }
    }

    pub fn handle_event(&mut self, desktop: &mut Desktop<W>, event: &Event) -> ShellReaction {
        match event {
            Event::Key(key) => self.handle_key(desktop, key),
            Event::Mouse(mouse) => self.handle_mouse(desktop, mouse),
            _ => ShellReaction::Continue,
        }
    }

    fn handle_key(
        &mut self,
        desktop: &mut Desktop<W>,
        key: &crossterm::event::KeyEvent,
    ) -> ShellReaction {
        if let Some(action) = self.bindings.action_for(key) {
            match action {
                Action::Quit => return ShellReaction::Quit,
                Action::Escape => desktop.handle_escape(),
                Action::ToggleActivities => self.toggle_activities(desktop),
                Action::ToggleSystemMenu => desktop.toggle_overlay(OverlayKind::SystemMenu),
                Action::ToggleCalendar => desktop.toggle_overlay(OverlayKind::Calendar),
                Action::CloseWindow => desktop.close_active(),
            }
            return ShellReaction::Continue;
        }

        // Unbound keys feed the activities search while it is open.
        if desktop.overlay() == OverlayState::Activities {
            match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.launcher.push_char(c);
                }
                KeyCode::Backspace => self.launcher.pop_char(),
                KeyCode::Enter => {
                    if let Some(entry) = self.launcher.matches().first().copied() {
                        desktop.open(entry.id);
                    }
                }
                _ => {}
            }
        }
        ShellReaction::Continue
    }

    fn handle_mouse(
        &mut self,
        desktop: &mut Desktop<W>,
        mouse: &crossterm::event::MouseEvent,
    ) -> ShellReaction {
        let point = Point::new(mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.left_down(desktop, point),
            MouseEventKind::Down(MouseButton::Right) => {
                if self.window_under(point).is_none() && point.y > 0 {
                    desktop.open_context_menu(point);
                }
                ShellReaction::Continue
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                desktop.pointer_move(point);
                ShellReaction::Continue
            }
            MouseEventKind::Up(MouseButton::Left) => {
                desktop.pointer_up();
                ShellReaction::Continue
            }
            _ => ShellReaction::Continue,
        }
    }

    fn window_under(&self, point: Point) -> Option<&WindowHits<W>> {
        self.hits.windows.iter().find(|w| hit(w.full, point))
    }

    fn left_down(&mut self, desktop: &mut Desktop<W>, point: Point) -> ShellReaction {
        // Trigger controls keep their toggle semantics even while their
        // overlay is open; everything else outside the overlay dismisses it.
        if hit(self.hits.bar_activities, point) {
            self.toggle_activities(desktop);
            return ShellReaction::Continue;
        }
        if hit(self.hits.bar_clock, point) {
            desktop.toggle_overlay(OverlayKind::Calendar);
            return ShellReaction::Continue;
        }
        if hit(self.hits.bar_system, point) {
            desktop.toggle_overlay(OverlayKind::SystemMenu);
            return ShellReaction::Continue;
        }
        if desktop.overlay().is_open() {
            if self.hits.overlay.is_some_and(|rect| hit(rect, point)) {
                return self.overlay_click(desktop, point);
            }
            desktop.close_overlay();
        }
        for (rect, id) in self.hits.dock_items.clone() {
            if hit(rect, point) {
                desktop.dock_click(id);
                return ShellReaction::Continue;
            }
        }
        if let Some(window) = self.window_under(point) {
            let (id, header, close) = (window.id, window.header, window.close);
            if hit(close, point) {
                desktop.close(id);
            } else if hit(header, point) {
                desktop.begin_arm(id, point);
            } else {
                desktop.focus_window(id);
            }
        }
        ShellReaction::Continue
    }

    fn overlay_click(&mut self, desktop: &mut Desktop<W>, point: Point) -> ShellReaction {
        for (rect, id) in self.hits.launcher_rows.clone() {
            if hit(rect, point) {
                desktop.open(id);
                return ShellReaction::Continue;
            }
        }
        for (rect, id) in self.hits.context_rows.clone() {
            if hit(rect, point) {
                desktop.open(id);
                return ShellReaction::Continue;
            }
        }
        for (rect, wp) in self.hits.swatches.clone() {
            if hit(rect, point) {
                self.wallpaper = wp;
                wp.save(desktop.store_mut());
                tracing::debug!(wallpaper = %wp, "wallpaper changed");
                return ShellReaction::Continue;
            }
        }
        if self.hits.quit_row.is_some_and(|rect| hit(rect, point)) {
            return ShellReaction::Quit;
        }
        ShellReaction::Continue
    }

    fn toggle_activities(&mut self, desktop: &mut Desktop<W>) {
        // The search query starts fresh every time the overlay opens.
        if desktop.overlay() != OverlayState::Activities {
            self.launcher.clear();
        }
        desktop.toggle_overlay(OverlayKind::Activities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DesktopConfig;
    use crate::geometry::{FixedViewport, Size, Viewport};
    use crate::store::MemoryStore;
    use chrono::TimeZone;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn fixture() -> (Shell<&'static str>, Desktop<&'static str>) {
        let mut desktop = Desktop::new(
            DesktopConfig::terminal_cells(),
            Box::new(FixedViewport(Viewport::new(80, 24))),
            Box::new(MemoryStore::new()),
        );
        desktop.register("about", Size::new(30, 8));
        desktop.register("projects", Size::new(30, 8));
        let shell = Shell::new(
            vec![
                AppEntry { id: "about", label: "About" },
                AppEntry { id: "projects", label: "Projects" },
            ],
            KeyBindings::default(),
            Wallpaper::Ubuntu,
        );
        (shell, desktop)
    }

    fn render(shell: &mut Shell<&'static str>, desktop: &Desktop<&'static str>) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, 80, 24));
        let now = Local.with_ymd_and_hms(2026, 8, 24, 13, 45, 0).unwrap();
        shell.render(&mut buf, desktop, now);
        buf
    }

    fn left_down(col: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn dock_click_opens_window() {
        let (mut shell, mut desktop) = fixture();
        render(&mut shell, &desktop);
        let (rect, id) = shell.hits.dock_items[0];
        assert_eq!(id, "about");
        shell.handle_event(&mut desktop, &left_down(rect.x, rect.y));
        assert!(desktop.is_open("about"));
    }

    #[test]
    fn header_press_arms_then_drag_moves() {
        let (mut shell, mut desktop) = fixture();
        desktop.open("about");
        render(&mut shell, &desktop);
        let header = shell.hits.windows[0].header;
        shell.handle_event(&mut desktop, &left_down(header.x, header.y));
        let drag = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: header.x + 10,
            row: header.y + 4,
            modifiers: KeyModifiers::NONE,
        });
        shell.handle_event(&mut desktop, &drag);
        assert!(desktop.is_dragging());
        let geometry = desktop.geometry_of("about").unwrap();
        assert_eq!(geometry.y, header.y as i32 + 4);
    }

    #[test]
    fn close_button_closes_the_window() {
        let (mut shell, mut desktop) = fixture();
        desktop.open("about");
        render(&mut shell, &desktop);
        let close = shell.hits.windows[0].close;
        shell.handle_event(&mut desktop, &left_down(close.x + 1, close.y));
        assert!(!desktop.is_open("about"));
    }

    #[test]
    fn click_outside_overlay_dismisses_it() {
        let (mut shell, mut desktop) = fixture();
        desktop.toggle_overlay(OverlayKind::Calendar);
        render(&mut shell, &desktop);
        shell.handle_event(&mut desktop, &left_down(2, 20));
        assert_eq!(desktop.overlay(), OverlayState::None);
    }

    #[test]
    fn typing_filters_then_enter_launches() {
        let (mut shell, mut desktop) = fixture();
        shell.toggle_activities(&mut desktop);
        for c in "proj".chars() {
            shell.handle_event(
                &mut desktop,
                &Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)),
            );
        }
        shell.handle_event(
            &mut desktop,
            &Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)),
        );
        assert!(desktop.is_open("projects"));
        // Opening a window dismisses the overlay.
        assert_eq!(desktop.overlay(), OverlayState::None);
    }

    #[test]
    fn right_click_on_background_opens_context_menu() {
        let (mut shell, mut desktop) = fixture();
        render(&mut shell, &desktop);
        let right = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Right),
            column: 40,
            row: 12,
            modifiers: KeyModifiers::NONE,
        });
        shell.handle_event(&mut desktop, &right);
        assert!(matches!(desktop.overlay(), OverlayState::ContextMenu(_)));
    }
}
