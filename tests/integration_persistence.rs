use std::time::{Duration, Instant};

use desk_shell::config::DesktopConfig;
use desk_shell::desktop::Desktop;
use desk_shell::geometry::{FixedViewport, Point, Size, Viewport};
use desk_shell::store::{JsonFileStore, PrefStore, SavedPosition};
use desk_shell::wallpaper::Wallpaper;

fn desktop_with(store: JsonFileStore) -> Desktop<&'static str> {
    let mut desk = Desktop::new(
        DesktopConfig::default(),
        Box::new(FixedViewport(Viewport::new(1000, 800))),
        Box::new(store),
    );
    desk.register("about", Size::new(400, 300));
    desk.register("projects", Size::new(400, 300));
    desk
}

#[test]
fn dragged_position_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("positions.json");

    {
        let mut desk = desktop_with(JsonFileStore::open(&path));
        desk.open("about");
        desk.begin_arm("about", Point::new(300, 210));
        desk.pointer_move(Point::new(10, 40));
        desk.pointer_up();
    }

    let mut desk = desktop_with(JsonFileStore::open(&path));
    desk.open("about");
    let geometry = desk.geometry_of("about").unwrap();
    assert_eq!((geometry.x, geometry.y), (10, 40));
}

#[test]
fn close_commits_the_position_too() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("positions.json");

    {
        let mut desk = desktop_with(JsonFileStore::open(&path));
        desk.open("projects");
        desk.begin_arm("projects", Point::new(300, 210));
        desk.pointer_move(Point::new(150, 100));
        desk.close("projects");
        desk.tick_at(Instant::now() + Duration::from_secs(1));
    }

    let store = JsonFileStore::open(&path);
    use desk_shell::store::PositionStore;
    assert_eq!(store.get("projects"), Some(SavedPosition { x: 150, y: 100 }));
}

#[test]
fn windows_persist_independently() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("positions.json");

    {
        let mut desk = desktop_with(JsonFileStore::open(&path));
        desk.open("about");
        desk.begin_arm("about", Point::new(300, 210));
        desk.pointer_move(Point::new(50, 50));
        desk.pointer_up();
        desk.open("projects");
    }

    let mut desk = desktop_with(JsonFileStore::open(&path));
    desk.open("about");
    desk.open("projects");
    assert_eq!(desk.geometry_of("about").unwrap().x, 50);
    // Projects was never dragged or closed, so it centers again.
    assert_eq!(desk.geometry_of("projects").unwrap().x, 300);
}

#[test]
fn wallpaper_pref_shares_the_store_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("positions.json");

    {
        let mut store = JsonFileStore::open(&path);
        Wallpaper::Midnight.save(&mut store);
    }

    let desk = desktop_with(JsonFileStore::open(&path));
    assert_eq!(Wallpaper::load(desk.store()), Wallpaper::Midnight);
    assert!(desk.store().get_pref("missing-key").is_none());
}
