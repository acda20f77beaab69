use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use desk_shell::config::{DesktopConfig, ReclickBehavior};
use desk_shell::desktop::Desktop;
use desk_shell::drivers::InputDriver;
use desk_shell::drivers::console::ConsoleInputDriver;
use desk_shell::event_loop::{ControlFlow, EventLoop};
use desk_shell::geometry::{Size, Viewport, ViewportProvider};
use desk_shell::keybindings::KeyBindings;
use desk_shell::launcher::AppEntry;
use desk_shell::shell::{Shell, ShellReaction};
use desk_shell::store::JsonFileStore;
use desk_shell::tracing_sub;
use desk_shell::wallpaper::Wallpaper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum AppId {
    About,
    Projects,
    Contact,
    Settings,
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            AppId::About => "about",
            AppId::Projects => "projects",
            AppId::Contact => "contact",
            AppId::Settings => "settings",
        };
        f.write_str(slug)
    }
}

const APPS: [(AppId, &str); 4] = [
    (AppId::About, "About"),
    (AppId::Projects, "Projects"),
    (AppId::Contact, "Contact"),
    (AppId::Settings, "Settings"),
];

/// The terminal reports its size through crossterm; fall back to a classic
/// 80x24 when the query fails (e.g. no tty in tests).
struct ConsoleViewport;

impl ViewportProvider for ConsoleViewport {
    fn bounds(&self) -> Viewport {
        match terminal::size() {
            Ok((width, height)) => Viewport::new(width, height),
            Err(_) => Viewport::new(80, 24),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "desk-shell",
    version = env!("CARGO_PKG_VERSION"),
    about = "A desktop shell that runs in the terminal"
)]
struct Cli {
    /// JSON file for window positions and preferences.
    #[arg(long, value_name = "FILE", default_value = "desk-shell.json")]
    store: PathBuf,

    /// Write diagnostics to this file instead of discarding them.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Pointer travel in cells before a header press becomes a drag.
    #[arg(long, value_name = "CELLS")]
    drag_threshold: Option<i32>,

    /// Delay between closing a window and detaching it, in milliseconds.
    #[arg(long, value_name = "MS")]
    finalize_ms: Option<u64>,

    /// Clicking the dock item of the focused window closes it.
    #[arg(long)]
    reclick_minimizes: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        tracing_sub::init_to_file(path)?;
    }

    let mut config = DesktopConfig::terminal_cells();
    if let Some(threshold) = cli.drag_threshold {
        config.drag_threshold = threshold;
    }
    if let Some(ms) = cli.finalize_ms {
        config.finalize_delay = Duration::from_millis(ms);
    }
    if cli.reclick_minimizes {
        config.reclick_behavior = ReclickBehavior::Minimize;
    }

    let store = JsonFileStore::open(&cli.store);
    let wallpaper = Wallpaper::load(&store);
    let mut desktop = Desktop::new(config, Box::new(ConsoleViewport), Box::new(store));
    for (id, _) in APPS {
        desktop.register(id, Size::new(42, 12));
    }
    let apps = APPS
        .into_iter()
        .map(|(id, label)| AppEntry { id, label })
        .collect();
    let mut shell = Shell::new(apps, KeyBindings::default(), wallpaper);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut driver = ConsoleInputDriver::new();
    driver.set_mouse_capture(true)?;

    let result = run(&mut terminal, driver, &mut desktop, &mut shell);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        event::DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    driver: ConsoleInputDriver,
    desktop: &mut Desktop<AppId>,
    shell: &mut Shell<AppId>,
) -> io::Result<()> {
    let mut event_loop = EventLoop::new(driver, Duration::from_millis(16));
    event_loop.run(|_driver, event| {
        match event {
            None => {
                desktop.tick();
                for event in desktop.take_events() {
                    tracing::debug!(?event, "desktop event");
                }
                terminal.draw(|frame| {
                    let buf = frame.buffer_mut();
                    shell.render(buf, desktop, Local::now());
                })?;
            }
            Some(event) => {
                if let Event::Resize(width, height) = event {
                    tracing::debug!(width, height, "terminal resized");
                }
                if let ShellReaction::Quit = shell.handle_event(desktop, &event) {
                    return Ok(ControlFlow::Quit);
                }
            }
        }
        Ok(ControlFlow::Continue)
    })
}
