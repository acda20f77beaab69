use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    /// Escape: dismiss the open overlay, else close the focused window.
    Escape,
    ToggleActivities,
    ToggleSystemMenu,
    ToggleCalendar,
    CloseWindow,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::Escape => "Dismiss overlay / close window (Esc)",
            Action::ToggleActivities => "Toggle activities",
            Action::ToggleSystemMenu => "Toggle system menu",
            Action::ToggleCalendar => "Toggle calendar",
            Action::CloseWindow => "Close focused window",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self {
            map: HashMap::new(),
        };
        kb.add(
            Quit,
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        kb.add(Escape, KeyCombo::new(KeyCode::Esc, KeyModifiers::NONE));
        kb.add(
            ToggleActivities,
            KeyCombo::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
        );
        kb.add(
            ToggleSystemMenu,
            KeyCombo::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
        );
        kb.add(
            ToggleCalendar,
            KeyCombo::new(KeyCode::Char('t'), KeyModifiers::CONTROL),
        );
        kb.add(
            CloseWindow,
            KeyCombo::new(KeyCode::Char('w'), KeyModifiers::CONTROL),
        );
        kb
    }
}

impl KeyBindings {
    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    /// First action whose combos match `key`.
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        self.map.iter().find_map(|(action, combos)| {
            combos
                .iter()
                .any(|combo| combo.matches(key))
                .then_some(*action)
        })
    }

    pub fn combos_for(&self, action: Action) -> &[KeyCombo] {
        self.map.get(&action).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn defaults_resolve_quit_and_escape() {
        let kb = KeyBindings::default();
        assert_eq!(
            kb.action_for(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            kb.action_for(&key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::Escape)
        );
        assert_eq!(kb.action_for(&key(KeyCode::Char('q'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn combo_display_lists_modifiers_first() {
        let combo = KeyCombo::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(combo.display(), "Ctrl+A");
    }
}
