// ── Settings persistence ──────────────────────────────────────────────────────
//
// Reads and writes `%APPDATA%\Minsize\settings.json`.
// No `unsafe` — pure safe Rust + serde_json.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::interceptor::{Activation, Environment, Interceptor};
use crate::platform::WindowSystem;

// ── On-disk types ─────────────────────────────────────────────────────────────

/// Root of the JSON settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub version: u32,
    /// Minimum client-track width in pixels (96-DPI pixels if `dpi_aware`).
    pub min_width: i32,
    pub min_height: i32,
    #[serde(default)]
    pub environment: Environment,
    /// Treat the size as 96-DPI logical pixels and scale it to the window.
    #[serde(default)]
    pub dpi_aware: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            min_width: DEFAULT_MIN_WIDTH,
            min_height: DEFAULT_MIN_HEIGHT,
            environment: Environment::Standalone,
            dpi_aware: false,
        }
    }
}

// ── Format version ────────────────────────────────────────────────────────────

const SETTINGS_VERSION: u32 = 1;

const DEFAULT_MIN_WIDTH: i32 = 640;
const DEFAULT_MIN_HEIGHT: i32 = 480;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the path to the settings file: `%APPDATA%\Minsize\settings.json`.
///
/// Returns `None` if the `APPDATA` environment variable is not set.
pub fn settings_path() -> Option<PathBuf> {
    let appdata = std::env::var_os("APPDATA")?;
    let mut p = PathBuf::from(appdata);
    p.push("Minsize");
    p.push("settings.json");
    Some(p)
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write `settings` to `path`, creating parent directories as needed.
pub fn save_to(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, settings)?;
    Ok(())
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Read and parse the settings file at `path`.
///
/// Unlike [`load`], every failure is reported.  A file with an unrecognised
/// version parses fine here; callers decide what to do with it.
pub fn load_from(path: &Path) -> Result<Settings> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Read the settings file from its default location.
///
/// Returns `None` on any error: file missing, JSON parse failure, or an
/// unrecognised version number.  The caller falls back to defaults.
pub fn load() -> Option<Settings> {
    let path = settings_path()?;
    let settings = match load_from(&path) {
        Ok(s) => s,
        Err(e) => {
            debug!(event = "config.load_failed", path = %path.display(), error = %e);
            return None;
        }
    };
    if settings.version != SETTINGS_VERSION {
        debug!(event = "config.version_mismatch", found = settings.version);
        return None;
    }
    Some(settings)
}

// ── Apply ─────────────────────────────────────────────────────────────────────

impl Settings {
    /// Configure the process-wide interceptor from these settings.
    pub fn apply(&self) -> Result<Activation> {
        crate::service::set_environment(self.environment)?;
        crate::service::set_minimum_size(self.min_width, self.min_height)
    }

    /// Configure a specific interceptor from these settings.
    pub fn apply_to<S: WindowSystem>(&self, interceptor: &mut Interceptor<S>) -> Result<Activation> {
        interceptor.set_environment(self.environment);
        interceptor.set_minimum_size(self.min_width, self.min_height)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MinSizeError;
    use crate::interceptor::SkipReason;
    use crate::platform::fake::FakeWindowSystem;

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            min_width: 1024,
            min_height: 768,
            environment: Environment::Hosted,
            dpi_aware: true,
            ..Settings::default()
        };

        save_to(&path, &settings).expect("save");
        let loaded = load_from(&path).expect("load");

        assert_eq!(loaded, settings);
    }

    /// Files written before `environment` and `dpi_aware` existed must still
    /// parse, with standalone/unscaled defaults.
    #[test]
    fn optional_fields_default_when_absent() {
        let json = r#"{"version":1,"min_width":300,"min_height":200}"#;
        let s: Settings = serde_json::from_str(json).expect("deserialize old format");
        assert_eq!(s.environment, Environment::Standalone);
        assert!(!s.dpi_aware);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_from(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, MinSizeError::Io(_)));
    }

    #[test]
    fn garbage_is_a_json_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(&path, b"{ not json").expect("write");

        let err = load_from(&path).unwrap_err();
        assert!(matches!(err, MinSizeError::Json(_)));
    }

    #[test]
    fn apply_to_installs_with_configured_size() {
        let sys = FakeWindowSystem::with_main_window();
        let mut interceptor = Interceptor::new(sys, Environment::Standalone);
        let settings = Settings {
            min_width: 800,
            min_height: 600,
            ..Settings::default()
        };

        assert_eq!(settings.apply_to(&mut interceptor).unwrap(), Activation::Installed);
        assert_eq!(interceptor.minimum_size(), (800, 600));
    }

    #[test]
    fn apply_to_hosted_disables() {
        let sys = FakeWindowSystem::with_main_window();
        let mut interceptor = Interceptor::new(sys, Environment::Standalone);
        interceptor.set_minimum_size(10, 10).unwrap();
        let settings = Settings {
            environment: Environment::Hosted,
            ..Settings::default()
        };

        assert_eq!(
            settings.apply_to(&mut interceptor).unwrap(),
            Activation::Skipped(SkipReason::HostedEnvironment)
        );
        assert!(!interceptor.is_enabled());
    }

    #[test]
    fn negative_configured_size_is_rejected() {
        let sys = FakeWindowSystem::with_main_window();
        let mut interceptor = Interceptor::new(sys, Environment::Standalone);
        let settings = Settings {
            min_width: -1,
            ..Settings::default()
        };

        assert!(matches!(
            settings.apply_to(&mut interceptor),
            Err(MinSizeError::InvalidArgument { width: -1, .. })
        ));
    }
}
