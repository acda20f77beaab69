//! Drives the interaction core as fast as it will go, with no terminal
//! attached, to measure command throughput.

use std::time::{Duration, Instant};

use clap::Parser;

use desk_shell::config::DesktopConfig;
use desk_shell::desktop::{Desktop, OverlayKind};
use desk_shell::geometry::{FixedViewport, Point, Size, Viewport};
use desk_shell::store::MemoryStore;

#[derive(Parser, Debug)]
#[command(
    name = "shell-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Headless throughput benchmark for the desktop interaction core"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// Number of registered windows to cycle through.
    #[arg(short = 'w', long = "windows", value_name = "N", default_value_t = 8)]
    windows: u32,
}

impl BenchCli {
    fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_seconds)
    }
}

struct BenchStats {
    started: Instant,
    commands: u64,
    events: u64,
    drag_moves: u64,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            commands: 0,
            events: 0,
            drag_moves: 0,
        }
    }

    fn report(&self) -> String {
        let elapsed = self.started.elapsed().as_secs_f64();
        let per_second = if elapsed > 0.0 {
            self.commands as f64 / elapsed
        } else {
            0.0
        };
        indoc::formatdoc!(
            r#"
            Desktop core bench finished.
            Duration: {elapsed:.2}s
            Commands: {commands} (~{per_second:.0}/s)
            Drag moves: {drags} | Events drained: {events}
            "#,
            elapsed = elapsed,
            commands = self.commands,
            per_second = per_second,
            drags = self.drag_moves,
            events = self.events,
        )
    }
}

fn main() {
    let cli = BenchCli::parse();

    let mut desktop: Desktop<u32> = Desktop::new(
        DesktopConfig::default(),
        Box::new(FixedViewport(Viewport::new(1920, 1080))),
        Box::new(MemoryStore::new()),
    );
    for id in 0..cli.windows {
        desktop.register(id, Size::new(420, 300));
    }

    let mut stats = BenchStats::new();
    let deadline = Instant::now() + cli.duration();
    let mut round: u32 = 0;

    while Instant::now() < deadline {
        let id = round % cli.windows;

        // Lifecycle storm: open, refocus under contention, close, revive.
        desktop.open(id);
        desktop.open((id + 1) % cli.windows);
        desktop.focus_window(id);
        desktop.close(id);
        desktop.open(id);
        stats.commands += 5;

        // Drag storm: arm on the header and sweep the pointer across the
        // viewport, including past the clamped edges.
        if let Some(geometry) = desktop.geometry_of(id) {
            let grab = Point::new(geometry.x + 10, geometry.y);
            desktop.begin_arm(id, grab);
            for step in 0..32 {
                let x = grab.x - 600 + step * 80;
                desktop.pointer_move(Point::new(x, grab.y + step));
                stats.drag_moves += 1;
            }
            desktop.pointer_up();
            stats.commands += 34;
        }

        // Overlay churn.
        desktop.toggle_overlay(OverlayKind::Activities);
        desktop.toggle_overlay(OverlayKind::Calendar);
        desktop.open_context_menu(Point::new(1900, 1060));
        desktop.close_overlay();
        stats.commands += 4;

        desktop.tick();
        stats.events += desktop.take_events().len() as u64;
        round = round.wrapping_add(1);
    }

    print!("{}", stats.report());
}
