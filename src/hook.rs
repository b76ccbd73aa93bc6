// ── Window-procedure hook guard ───────────────────────────────────────────────
//
// Installing a hook swaps our procedure into the window's WNDPROC slot and
// returns a guard.  Releasing the guard (explicitly or on drop) swaps the
// previous procedure back.  A guard that outlives the window's owner module
// would leave a dangling WNDPROC, so restoration is never skipped.

use tracing::{info, warn};

use crate::error::{MinSizeError, Result};
use crate::platform::{ProcAddress, WindowHandle, WindowSystem};

/// An installed window-procedure replacement.
///
/// While the guard lives, `window`'s procedure is `current`, and `previous`
/// is the procedure every non-intercepted message is forwarded to.
#[derive(Debug)]
pub struct WndProcHook<S: WindowSystem> {
    system: S,
    window: WindowHandle,
    previous: ProcAddress,
    current: ProcAddress,
    restored: bool,
}

impl<S: WindowSystem> WndProcHook<S> {
    /// Replace `window`'s procedure with the system's interceptor procedure.
    pub fn install(system: S, window: WindowHandle) -> Result<Self> {
        let current = system.interceptor_proc();
        let previous = system.swap_window_proc(window, current)?;

        if previous == current {
            // Someone leaked a guard for this window.  Forwarding to
            // ourselves would recurse forever; leave the slot as it was.
            warn!(
                event = "hook.already_installed",
                window = window.as_raw(),
                proc = current.as_raw()
            );
            return Err(MinSizeError::AlreadyHooked);
        }

        info!(
            event = "hook.installed",
            window = window.as_raw(),
            previous = previous.as_raw(),
            current = current.as_raw()
        );

        Ok(Self {
            system,
            window,
            previous,
            current,
            restored: false,
        })
    }

    pub fn window(&self) -> WindowHandle {
        self.window
    }

    /// The procedure that was installed before us.
    pub fn previous(&self) -> ProcAddress {
        self.previous
    }

    /// Our own procedure, as installed.
    pub fn current(&self) -> ProcAddress {
        self.current
    }

    /// Put the previous procedure back.
    pub fn restore(mut self) -> Result<()> {
        self.restore_in_place()
    }

    fn restore_in_place(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        let replaced = self.system.swap_window_proc(self.window, self.previous)?;
        if replaced != self.current {
            // Another subclass was chained on top of ours.  The window is
            // still put back the way we found it.
            warn!(
                event = "hook.foreign_proc_replaced",
                window = self.window.as_raw(),
                foreign = replaced.as_raw()
            );
        }

        info!(
            event = "hook.restored",
            window = self.window.as_raw(),
            proc = self.previous.as_raw()
        );
        Ok(())
    }
}

impl<S: WindowSystem> Drop for WndProcHook<S> {
    fn drop(&mut self) {
        if let Err(e) = self.restore_in_place() {
            warn!(event = "hook.restore_failed", window = self.window.as_raw(), error = %e);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::{FakeWindowSystem, HOST_PROC, MAIN_WINDOW};

    #[test]
    fn install_swaps_in_interceptor_and_remembers_previous() {
        let sys = FakeWindowSystem::with_main_window();
        let hook = WndProcHook::install(sys.clone(), MAIN_WINDOW).expect("install");

        assert_eq!(hook.previous(), HOST_PROC);
        assert_eq!(hook.current(), sys.interceptor_proc());
        assert_eq!(sys.proc_of(MAIN_WINDOW), Some(sys.interceptor_proc()));
    }

    #[test]
    fn explicit_restore_puts_previous_back() {
        let sys = FakeWindowSystem::with_main_window();
        let hook = WndProcHook::install(sys.clone(), MAIN_WINDOW).expect("install");

        hook.restore().expect("restore");

        assert_eq!(sys.proc_of(MAIN_WINDOW), Some(HOST_PROC));
        assert_eq!(sys.swap_count(), 2);
    }

    #[test]
    fn drop_restores_exactly_once() {
        let sys = FakeWindowSystem::with_main_window();
        {
            let _hook = WndProcHook::install(sys.clone(), MAIN_WINDOW).expect("install");
        }
        assert_eq!(sys.proc_of(MAIN_WINDOW), Some(HOST_PROC));
        assert_eq!(sys.swap_count(), 2);
    }

    #[test]
    fn installing_over_ourselves_is_refused() {
        let sys = FakeWindowSystem::with_main_window();
        let first = WndProcHook::install(sys.clone(), MAIN_WINDOW).expect("install");

        let second = WndProcHook::install(sys.clone(), MAIN_WINDOW);

        assert!(matches!(second, Err(MinSizeError::AlreadyHooked)));
        // The refused install must not have disturbed the live hook.
        assert_eq!(sys.proc_of(MAIN_WINDOW), Some(sys.interceptor_proc()));
        drop(first);
        assert_eq!(sys.proc_of(MAIN_WINDOW), Some(HOST_PROC));
    }

    #[test]
    fn foreign_subclass_on_top_is_still_unwound() {
        let sys = FakeWindowSystem::with_main_window();
        let hook = WndProcHook::install(sys.clone(), MAIN_WINDOW).expect("install");
        let foreign = ProcAddress::from_raw(0x7777).expect("non-null");
        sys.force_proc(MAIN_WINDOW, foreign);

        hook.restore().expect("restore");

        assert_eq!(sys.proc_of(MAIN_WINDOW), Some(HOST_PROC));
    }
}
