//! Focus and z-order. Raising is a counter bump, never a reshuffle: the
//! window with the highest z value is frontmost, and stale values below it
//! are harmless.

use crate::constants::Z_COUNTER_BASE;

#[derive(Debug, Clone, Copy)]
pub(crate) struct FocusState<W> {
    focused: Option<W>,
    z_counter: u64,
}

impl<W: Copy + PartialEq> FocusState<W> {
    pub(crate) fn new() -> Self {
        Self {
            focused: None,
            z_counter: Z_COUNTER_BASE,
        }
    }

    pub(crate) fn focused(&self) -> Option<W> {
        self.focused
    }

    /// Marks `id` focused and returns the z value that raises it above every
    /// previously raised window. Refocusing the same window still bumps.
    pub(crate) fn raise(&mut self, id: W) -> u64 {
        self.z_counter += 1;
        self.focused = Some(id);
        self.z_counter
    }

    pub(crate) fn clear_if(&mut self, id: W) -> bool {
        if self.focused == Some(id) {
            self.focused = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_is_strictly_monotonic() {
        let mut focus = FocusState::new();
        let a = focus.raise("a");
        let b = focus.raise("b");
        let a2 = focus.raise("a");
        assert!(a > Z_COUNTER_BASE);
        assert!(b > a);
        assert!(a2 > b);
        assert_eq!(focus.focused, Some("a"));
    }

    #[test]
    fn clear_if_only_drops_the_named_window() {
        let mut focus = FocusState::new();
        focus.raise("a");
        assert!(!focus.clear_if("b"));
        assert_eq!(focus.focused, Some("a"));
        assert!(focus.clear_if("a"));
        assert_eq!(focus.focused, None);
    }
}
