#![allow(unsafe_code)]

use std::ffi::c_void;

use windows::Win32::{
    Foundation::HWND,
    UI::HiDpi::{
        GetDpiForSystem, GetDpiForWindow, SetProcessDpiAwarenessContext,
        DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2,
    },
};

use crate::platform::WindowHandle;

pub const BASE_DPI: u32 = 96;

/// Scale a pixel value defined at 96 DPI to `dpi`, saturating at `i32::MAX`.
pub fn scale(px: i32, dpi: u32) -> i32 {
    let scaled = i64::from(px) * i64::from(dpi) / i64::from(BASE_DPI);
    i32::try_from(scaled).unwrap_or(if scaled < 0 { i32::MIN } else { i32::MAX })
}

/// Opt into Per-Monitor v2 DPI awareness.
/// MUST be called before any window is created on the calling thread.
pub fn init() {
    // SAFETY: Must precede all window creation; single call at process start.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Return the DPI for `window`. Falls back to BASE_DPI (96) on failure.
pub fn for_window(window: WindowHandle) -> u32 {
    // SAFETY: a stale handle makes GetDpiForWindow return 0, handled below.
    let v = unsafe { GetDpiForWindow(HWND(window.as_raw() as *mut c_void)) };
    if v == 0 {
        BASE_DPI
    } else {
        v
    }
}

/// Return the primary-monitor system DPI. Used before window creation.
pub fn system() -> u32 {
    // SAFETY: GetDpiForSystem takes no parameters and always succeeds on Win10+.
    let v = unsafe { GetDpiForSystem() };
    if v == 0 {
        BASE_DPI
    } else {
        v
    }
}
