use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

/// Initialize the tracing subscriber writing to `path`. The alternate screen
/// owns stdout/stderr while the shell runs, so diagnostics go to a file.
/// Safe to call multiple times; subsequent calls are no-ops for the global
/// subscriber.
pub fn init_to_file(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
    Ok(())
}

/// Stderr fallback for headless tools that never enter the alternate screen.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
