// ── Non-Win32 platforms ───────────────────────────────────────────────────────
//
// There is no window-procedure table to patch here.  Every query reports "no
// window", so the interceptor skips enabling and never reaches the other
// methods.

use std::num::NonZeroIsize;

use tracing::debug;

use super::{ProcAddress, WindowHandle, WindowMessage, WindowSystem};
use crate::error::{MinSizeError, Result};
use crate::interceptor::DispatchTable;

/// Window system for platforms without Win32 message passing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedWindowSystem;

impl WindowSystem for UnsupportedWindowSystem {
    fn main_window(&self) -> Option<WindowHandle> {
        debug!(event = "platform.unsupported", os = std::env::consts::OS);
        None
    }

    fn interceptor_proc(&self) -> ProcAddress {
        // Never installed: `main_window` is always `None`.
        ProcAddress(NonZeroIsize::MAX)
    }

    fn swap_window_proc(&self, _window: WindowHandle, _proc: ProcAddress) -> Result<ProcAddress> {
        Err(MinSizeError::Win32 {
            function: "swap_window_proc",
            code: 0,
        })
    }

    fn call_window_proc(&self, _proc: ProcAddress, _msg: &WindowMessage) -> isize {
        0
    }

    fn default_window_proc(&self, _msg: &WindowMessage) -> isize {
        0
    }

    fn publish_dispatch_table(&self, _table: Option<DispatchTable>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_resolves_a_window() {
        assert_eq!(UnsupportedWindowSystem.main_window(), None);
    }
}
