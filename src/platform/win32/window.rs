// ── user32 window system ──────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Resolve the main window (the active window of the calling UI thread).
//   • Swap the GWLP_WNDPROC slot, 32- and 64-bit.
//   • Forward to a previous procedure via CallWindowProcW.
//   • Default handling via DefWindowProcW.

#![allow(unsafe_code)]

use std::ffi::c_void;

use tracing::debug;
use windows::Win32::{
    Foundation::{GetLastError, SetLastError, HWND, LPARAM, WIN32_ERROR, WPARAM},
    System::Threading::GetCurrentThreadId,
    UI::{
        Input::KeyboardAndMouse::GetActiveWindow,
        WindowsAndMessaging::{
            CallWindowProcW, DefWindowProcW, GetWindowThreadProcessId, GWLP_WNDPROC, WNDPROC,
        },
    },
};

use super::subclass;
use crate::error::{MinSizeError, Result};
use crate::interceptor::DispatchTable;
use crate::platform::{ProcAddress, WindowHandle, WindowMessage, WindowSystem};

#[cfg(target_pointer_width = "64")]
const SET_WINDOW_PROC: &str = "SetWindowLongPtrW";
#[cfg(target_pointer_width = "32")]
const SET_WINDOW_PROC: &str = "SetWindowLongW";

/// [`WindowSystem`] backed by user32.
///
/// Zero-sized: all state the installed procedure needs lives in the UI
/// thread's dispatch table (see `subclass`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32WindowSystem;

impl WindowSystem for Win32WindowSystem {
    fn main_window(&self) -> Option<WindowHandle> {
        // SAFETY: GetActiveWindow has no preconditions; it returns null when
        // the calling thread has no active window.
        let hwnd = unsafe { GetActiveWindow() };
        if hwnd.0.is_null() {
            return None;
        }

        // The replacement procedure reads a thread-local table, so only a
        // window owned by this thread may be subclassed from here.
        // SAFETY: hwnd is non-null; a stale handle makes the call return 0.
        let owner = unsafe { GetWindowThreadProcessId(hwnd, None) };
        // SAFETY: GetCurrentThreadId has no preconditions.
        let me = unsafe { GetCurrentThreadId() };
        if owner != me {
            debug!(event = "win32.window_not_owned", hwnd = hwnd.0 as isize, owner, me);
            return None;
        }

        WindowHandle::from_raw(hwnd.0 as isize)
    }

    fn interceptor_proc(&self) -> ProcAddress {
        subclass::proc_address()
    }

    fn swap_window_proc(&self, window: WindowHandle, proc: ProcAddress) -> Result<ProcAddress> {
        let hwnd = to_hwnd(window.as_raw());

        // A zero return is ambiguous until the last-error slot is cleared.
        // SAFETY: SetLastError only writes thread-local state.
        unsafe { SetLastError(WIN32_ERROR(0)) };

        // SAFETY: proc is the address of a `WNDPROC`-compatible function that
        // stays loaded for the life of the process; hwnd is owned by this
        // thread (checked in `main_window`).
        let previous = unsafe { set_window_proc(hwnd, proc.as_raw()) };

        ProcAddress::from_raw(previous).ok_or_else(|| last_error(SET_WINDOW_PROC))
    }

    fn call_window_proc(&self, proc: ProcAddress, msg: &WindowMessage) -> isize {
        // SAFETY: ProcAddress is non-null and came out of the GWLP_WNDPROC
        // slot, so it is either a real WNDPROC or a user32 A/W thunk handle;
        // CallWindowProcW accepts both.  Option<fn> has the size of a pointer.
        let previous = unsafe { std::mem::transmute::<isize, WNDPROC>(proc.as_raw()) };

        // SAFETY: arguments are forwarded verbatim from the OS delivery.
        unsafe {
            CallWindowProcW(
                previous,
                to_hwnd(msg.window),
                msg.id,
                WPARAM(msg.wparam),
                LPARAM(msg.lparam),
            )
        }
        .0
    }

    fn default_window_proc(&self, msg: &WindowMessage) -> isize {
        // SAFETY: arguments are forwarded verbatim from the OS delivery.
        unsafe {
            DefWindowProcW(
                to_hwnd(msg.window),
                msg.id,
                WPARAM(msg.wparam),
                LPARAM(msg.lparam),
            )
        }
        .0
    }

    fn publish_dispatch_table(&self, table: Option<DispatchTable>) {
        subclass::publish(table);
    }
}

fn to_hwnd(raw: isize) -> HWND {
    HWND(raw as *mut c_void)
}

#[cfg(target_pointer_width = "64")]
unsafe fn set_window_proc(hwnd: HWND, proc: isize) -> isize {
    use windows::Win32::UI::WindowsAndMessaging::SetWindowLongPtrW;
    // SAFETY: forwarded caller contract.
    unsafe { SetWindowLongPtrW(hwnd, GWLP_WNDPROC, proc) }
}

#[cfg(target_pointer_width = "32")]
unsafe fn set_window_proc(hwnd: HWND, proc: isize) -> isize {
    use windows::Win32::UI::WindowsAndMessaging::SetWindowLongW;
    // SAFETY: forwarded caller contract.  On 32-bit targets isize is i32.
    unsafe { SetWindowLongW(hwnd, GWLP_WNDPROC, proc as i32) as isize }
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Capture the current Win32 last-error code and wrap it in a `MinSizeError`.
///
/// Call immediately after a Win32 function that signals failure — `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
pub(crate) fn last_error(function: &'static str) -> MinSizeError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    // It is always safe to call and never fails.
    let code = unsafe { GetLastError() };
    MinSizeError::Win32 {
        function,
        code: code.0,
    }
}
