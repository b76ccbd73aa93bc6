// ── Minimum-size interceptor ──────────────────────────────────────────────────
//
// The state machine behind `set_minimum_size` / `reset`.  It is generic over
// the window system so the same code drives Win32 in production and the fake
// window system in tests.  All methods run on the UI thread that owns the
// window; nothing here locks.

#![allow(unsafe_code)]

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{MinSizeError, Result};
use crate::hook::WndProcHook;
use crate::minmax::{self, Point, WM_GETMINMAXINFO};
use crate::platform::{ProcAddress, WindowHandle, WindowMessage, WindowSystem};

// ── Public types ──────────────────────────────────────────────────────────────

/// Where the host application is running.
///
/// Inside an editor or other development tool the "main window" resolves to
/// the tool's own window, so interception is switched off entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// A deployed build that owns its main window.
    #[default]
    Standalone,
    /// Hosted inside a development tool; interception is disabled.
    Hosted,
}

/// Outcome of [`Interceptor::set_minimum_size`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The hook was installed by this call.
    Installed,
    /// The hook was already installed; only the size changed.
    Updated,
    /// Nothing was installed.
    Skipped(SkipReason),
}

/// Why an enable attempt did not install the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    HostedEnvironment,
    /// No main window could be resolved.
    NoWindow,
    /// The OS refused the procedure swap.
    InstallFailed { code: u32 },
}

/// Everything the installed window procedure needs to route one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchTable {
    pub previous: ProcAddress,
    pub min_track_size: Point,
}

// ── Interceptor ───────────────────────────────────────────────────────────────

/// Enforces a minimum track size on one window by subclassing its procedure.
///
/// Enabled exactly while a [`WndProcHook`] is held.
pub struct Interceptor<S: WindowSystem> {
    system: S,
    environment: Environment,
    min_size: Point,
    hook: Option<WndProcHook<S>>,
}

impl<S: WindowSystem> Interceptor<S> {
    pub fn new(system: S, environment: Environment) -> Self {
        Self {
            system,
            environment,
            min_size: Point::default(),
            hook: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.hook.is_some()
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The stored minimum size as `(width, height)`.
    pub fn minimum_size(&self) -> (i32, i32) {
        (self.min_size.x, self.min_size.y)
    }

    /// The intercepted window, while enabled.
    pub fn window(&self) -> Option<WindowHandle> {
        self.hook.as_ref().map(WndProcHook::window)
    }

    /// The procedure messages are forwarded to, while enabled.
    pub fn previous_proc(&self) -> Option<ProcAddress> {
        self.hook.as_ref().map(WndProcHook::previous)
    }

    /// Our installed procedure, while enabled.
    pub fn current_proc(&self) -> Option<ProcAddress> {
        self.hook.as_ref().map(WndProcHook::current)
    }

    pub fn dispatch_table(&self) -> Option<DispatchTable> {
        self.hook.as_ref().map(|hook| DispatchTable {
            previous: hook.previous(),
            min_track_size: self.min_size,
        })
    }

    /// Store a new minimum size and make sure the hook is installed.
    ///
    /// Fails with [`MinSizeError::InvalidArgument`] if either component is
    /// negative; nothing is stored in that case.  While already enabled the
    /// new size applies from the next `WM_GETMINMAXINFO` on.
    pub fn set_minimum_size(&mut self, width: i32, height: i32) -> Result<Activation> {
        if width < 0 || height < 0 {
            return Err(MinSizeError::InvalidArgument { width, height });
        }

        if self.environment == Environment::Hosted {
            debug!(event = "interceptor.skipped", reason = "hosted");
            return Ok(Activation::Skipped(SkipReason::HostedEnvironment));
        }

        self.min_size = Point::new(width, height);

        if self.is_enabled() {
            self.system.publish_dispatch_table(self.dispatch_table());
            debug!(event = "interceptor.size_updated", width, height);
            return Ok(Activation::Updated);
        }

        Ok(self.enable())
    }

    fn enable(&mut self) -> Activation {
        let Some(window) = self.system.main_window() else {
            debug!(event = "interceptor.skipped", reason = "no_window");
            return Activation::Skipped(SkipReason::NoWindow);
        };

        match WndProcHook::install(self.system.clone(), window) {
            Ok(hook) => {
                self.hook = Some(hook);
                self.system.publish_dispatch_table(self.dispatch_table());
                Activation::Installed
            }
            Err(e) => {
                warn!(event = "interceptor.install_failed", window = window.as_raw(), error = %e);
                let code = match e {
                    MinSizeError::Win32 { code, .. } => code,
                    _ => 0,
                };
                Activation::Skipped(SkipReason::InstallFailed { code })
            }
        }
    }

    /// Restore the original window procedure and zero all state.
    ///
    /// A no-op when not enabled.
    pub fn disable(&mut self) {
        let Some(hook) = self.hook.take() else {
            return;
        };

        let window = hook.window();
        if let Err(e) = hook.restore() {
            // Typically the window is already destroyed; there is nothing
            // left to restore into.
            warn!(event = "interceptor.restore_failed", window = window.as_raw(), error = %e);
        }
        self.system.publish_dispatch_table(None);
        self.min_size = Point::default();
    }

    /// Switch environments.  Moving to [`Environment::Hosted`] disables.
    pub fn set_environment(&mut self, environment: Environment) {
        if environment == Environment::Hosted {
            self.disable();
        }
        self.environment = environment;
    }

    /// Route one message exactly as the installed procedure would.
    ///
    /// # Safety
    ///
    /// See [`dispatch`].
    pub unsafe fn dispatch(&self, msg: &WindowMessage) -> isize {
        // SAFETY: forwarded caller contract.
        unsafe { dispatch(&self.system, self.dispatch_table(), msg) }
    }
}

// ── Window procedure body ─────────────────────────────────────────────────────

/// Route one message delivered to the intercepted window.
///
/// `WM_GETMINMAXINFO` gets its min-track size overwritten and goes to the
/// default procedure; everything else goes, untouched, to the previous
/// procedure.  Without a table (the hook is gone) every message gets default
/// handling.  A payload that cannot be accessed is passed on unmodified.
///
/// # Safety
///
/// For `WM_GETMINMAXINFO`, a non-null aligned `msg.lparam` must point to a
/// writable [`MinMaxInfo`](crate::minmax::MinMaxInfo) for the whole call.
pub unsafe fn dispatch<S: WindowSystem>(
    system: &S,
    table: Option<DispatchTable>,
    msg: &WindowMessage,
) -> isize {
    let Some(table) = table else {
        return system.default_window_proc(msg);
    };

    if msg.id != WM_GETMINMAXINFO {
        return system.call_window_proc(table.previous, msg);
    }

    // SAFETY: the caller guarantees lparam validity for WM_GETMINMAXINFO.
    if !unsafe { minmax::override_min_track_size(msg.lparam, table.min_track_size) } {
        debug!(event = "interceptor.payload_skipped", lparam = msg.lparam);
    }
    system.default_window_proc(msg)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
