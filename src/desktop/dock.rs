//! Dock projection: the dock never holds state of its own, it is re-derived
//! from the registry and focus on every query.

/// Presentation state of one dock item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockState {
    Closed,
    OpenUnfocused,
    OpenFocused,
}

impl DockState {
    pub fn is_open(self) -> bool {
        !matches!(self, DockState::Closed)
    }
}

pub(crate) fn project(is_open: bool, is_focused: bool) -> DockState {
    match (is_open, is_focused) {
        (false, _) => DockState::Closed,
        (true, false) => DockState::OpenUnfocused,
        (true, true) => DockState::OpenFocused,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_covers_all_combinations() {
        assert_eq!(project(false, false), DockState::Closed);
        // Focus on a closed window cannot happen, but the projection still
        // degrades to Closed rather than lying about openness.
        assert_eq!(project(false, true), DockState::Closed);
        assert_eq!(project(true, false), DockState::OpenUnfocused);
        assert_eq!(project(true, true), DockState::OpenFocused);
    }
}
