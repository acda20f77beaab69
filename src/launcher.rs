//! The activities launcher: an app catalog with a live search filter.

/// One launchable entry shown in the activities overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppEntry<W> {
    pub id: W,
    pub label: &'static str,
}

/// Search state for the activities overlay. The query resets every time the
/// overlay opens.
#[derive(Debug, Clone, Default)]
pub struct Launcher<W> {
    entries: Vec<AppEntry<W>>,
    query: String,
}

impl<W: Copy> Launcher<W> {
    pub fn new(entries: Vec<AppEntry<W>>) -> Self {
        Self {
            entries,
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Entries whose label contains the query, case-insensitively. An empty
    /// query matches everything.
    pub fn matches(&self) -> Vec<AppEntry<W>> {
        let needle = self.query.to_lowercase();
        self.entries
            .iter()
            .filter(|entry| entry.label.to_lowercase().contains(&needle))
            .copied()
            .collect()
    }

    /// The single match, if the filter has narrowed the catalog down to one.
    /// Used to launch straight from the keyboard.
    pub fn sole_match(&self) -> Option<AppEntry<W>> {
        let matches = self.matches();
        match matches.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}
