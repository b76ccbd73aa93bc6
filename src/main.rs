// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere in the demo except `host`, which owns
// the Win32 window it enforces a minimum size on.  Each unsafe block there
// MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that log output is visible.
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(windows)]
mod host;

use std::path::PathBuf;

use minsize::config::{self, Settings};
use tracing::{info, warn};

/// Settings from the path given as the first argument, else from the
/// default location, else defaults.
fn load_settings() -> Settings {
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        match config::load_from(&path) {
            Ok(settings) => return settings,
            Err(e) => warn!(event = "demo.settings_unreadable", path = %path.display(), error = %e),
        }
    }
    config::load().unwrap_or_default()
}

#[cfg(windows)]
fn main() {
    minsize::logging::init_logging();
    let settings = load_settings();
    info!(event = "demo.started", ?settings);

    if let Err(e) = host::run(&settings) {
        // Startup failed before or during the message loop.
        // Show a modal error dialog — the only safe output path in a GUI app.
        host::show_error_dialog(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
fn main() {
    minsize::logging::init_logging();
    let settings = load_settings();
    info!(event = "demo.started", ?settings);

    match settings.apply() {
        Ok(activation) => {
            info!(event = "demo.finished", ?activation, os = std::env::consts::OS);
            minsize::reset();
        }
        Err(e) => {
            eprintln!("minsize-demo: {e}");
            std::process::exit(1);
        }
    }
}
