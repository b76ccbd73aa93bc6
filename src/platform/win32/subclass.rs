// ── Replacement window procedure ──────────────────────────────────────────────
//
// `intercept_proc` is what sits in the window's GWLP_WNDPROC slot while the
// interceptor is enabled.  It has no context pointer, so it reads its routing
// data from a thread-local table that `Win32WindowSystem` keeps current.  The
// table is a plain `Cell` copy: no borrow is held while a message is
// forwarded, so a forwarded handler may call back into `set_minimum_size` or
// `reset` freely.

#![allow(unsafe_code)]

use std::cell::Cell;
use std::num::NonZeroIsize;

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};

use super::Win32WindowSystem;
use crate::interceptor::{self, DispatchTable};
use crate::platform::{ProcAddress, WindowMessage};

thread_local! {
    static DISPATCH: Cell<Option<DispatchTable>> = const { Cell::new(None) };
}

/// Replace this thread's routing table.
pub(super) fn publish(table: Option<DispatchTable>) {
    // During thread teardown the slot may already be gone; the hook is being
    // restored in that case and nothing will read it again.
    let _ = DISPATCH.try_with(|slot| slot.set(table));
}

pub(super) fn proc_address() -> ProcAddress {
    let raw = intercept_proc as unsafe extern "system" fn(HWND, u32, WPARAM, LPARAM) -> LRESULT
        as isize;
    match NonZeroIsize::new(raw) {
        Some(addr) => ProcAddress(addr),
        None => unreachable!("function pointers are never null"),
    }
}

// SAFETY: intercept_proc is only ever installed through GWLP_WNDPROC, so
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call, including the MINMAXINFO behind lparam for
// WM_GETMINMAXINFO.
unsafe extern "system" fn intercept_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let message = WindowMessage {
        window: hwnd.0 as isize,
        id: msg,
        wparam: wparam.0,
        lparam: lparam.0,
    };
    let table = DISPATCH.try_with(Cell::get).ok().flatten();

    // SAFETY: see the function-level comment.
    LRESULT(unsafe { interceptor::dispatch(&Win32WindowSystem, table, &message) })
}
