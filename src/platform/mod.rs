// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the contract the interceptor consumes from the OS.  No
// `unsafe` lives here; all Win32 FFI is confined to the `win32` sub-module and
// never leaks outward.  Off Windows, `unsupported` stands in and reports that
// there is no window to intercept.

use std::num::NonZeroIsize;

use crate::error::Result;
use crate::interceptor::DispatchTable;

#[cfg(windows)]
pub mod win32;

#[cfg(not(windows))]
pub mod unsupported;

#[cfg(test)]
pub(crate) mod fake;

/// The window system of the platform this crate was built for.
#[cfg(windows)]
pub type NativeWindowSystem = win32::Win32WindowSystem;

/// The window system of the platform this crate was built for.
#[cfg(not(windows))]
pub type NativeWindowSystem = unsupported::UnsupportedWindowSystem;

// ── Handles ───────────────────────────────────────────────────────────────────

/// Opaque, non-null reference to an OS window (`HWND`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(NonZeroIsize);

impl WindowHandle {
    /// `None` for the null handle.
    pub fn from_raw(raw: isize) -> Option<Self> {
        NonZeroIsize::new(raw).map(Self)
    }

    pub fn as_raw(self) -> isize {
        self.0.get()
    }
}

/// Non-null address of a window procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcAddress(NonZeroIsize);

impl ProcAddress {
    /// `None` for the null address.
    pub fn from_raw(raw: isize) -> Option<Self> {
        NonZeroIsize::new(raw).map(Self)
    }

    pub fn as_raw(self) -> isize {
        self.0.get()
    }
}

/// One message as delivered to a window procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMessage {
    /// Raw `HWND`; may be anything the sender chose.
    pub window: isize,
    pub id: u32,
    pub wparam: usize,
    pub lparam: isize,
}

// ── OS contract ───────────────────────────────────────────────────────────────

/// Everything the interceptor needs from the windowing system.
///
/// Implementations are cheap handles (`Clone`) so that a [`WndProcHook`]
/// guard can carry its own copy for restoration.
///
/// [`WndProcHook`]: crate::hook::WndProcHook
pub trait WindowSystem: Clone {
    /// The process's main application window, if one can be resolved.
    fn main_window(&self) -> Option<WindowHandle>;

    /// Address of this crate's replacement window procedure.
    fn interceptor_proc(&self) -> ProcAddress;

    /// Atomically install `proc` as the window procedure of `window` and
    /// return the address it replaced.
    fn swap_window_proc(&self, window: WindowHandle, proc: ProcAddress) -> Result<ProcAddress>;

    /// Invoke `proc` synchronously with the message's arguments.
    fn call_window_proc(&self, proc: ProcAddress, msg: &WindowMessage) -> isize;

    /// The OS default handling for `msg`.
    fn default_window_proc(&self, msg: &WindowMessage) -> isize;

    /// Hand the routing data to the installed procedure.  `None` once the
    /// hook is gone.
    fn publish_dispatch_table(&self, table: Option<DispatchTable>);
}
