//! Wallpaper choice, persisted as a preference slug.

use std::fmt;
use std::str::FromStr;

use crate::store::PrefStore;

const PREF_KEY: &str = "wallpaper";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wallpaper {
    #[default]
    Ubuntu,
    Aubergine,
    Midnight,
    Sand,
}

impl Wallpaper {
    pub const ALL: [Wallpaper; 4] = [
        Wallpaper::Ubuntu,
        Wallpaper::Aubergine,
        Wallpaper::Midnight,
        Wallpaper::Sand,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Wallpaper::Ubuntu => "ubuntu",
            Wallpaper::Aubergine => "aubergine",
            Wallpaper::Midnight => "midnight",
            Wallpaper::Sand => "sand",
        }
    }

    /// Loads the saved choice; absent or unrecognized slugs fall back to the
    /// default.
    pub fn load(store: &dyn PrefStore) -> Self {
        store
            .get_pref(PREF_KEY)
            .and_then(|slug| slug.parse().ok())
            .unwrap_or_default()
    }

    pub fn save(self, store: &mut dyn PrefStore) {
        store.set_pref(PREF_KEY, self.slug());
    }
}

impl fmt::Display for Wallpaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWallpaper(pub String);

impl fmt::Display for UnknownWallpaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown wallpaper {:?}", self.0)
    }
}

impl std::error::Error for UnknownWallpaper {}

impl FromStr for Wallpaper {
    type Err = UnknownWallpaper;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Wallpaper::ALL
            .into_iter()
            .find(|wp| wp.slug() == s)
            .ok_or_else(|| UnknownWallpaper(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn missing_pref_falls_back_to_default() {
        let store = MemoryStore::new();
        assert_eq!(Wallpaper::load(&store), Wallpaper::Ubuntu);
    }

    #[test]
    fn saved_choice_round_trips() {
        let mut store = MemoryStore::new();
        Wallpaper::Aubergine.save(&mut store);
        assert_eq!(Wallpaper::load(&store), Wallpaper::Aubergine);
    }

    #[test]
    fn unrecognized_slug_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set_pref("wallpaper", "lava-lamp");
        assert_eq!(Wallpaper::load(&store), Wallpaper::Ubuntu);
    }
}
