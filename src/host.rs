// Demo host: one top-level window with the configured minimum size enforced.
// The window's own procedure only handles shutdown; sizing is left to minsize.

#![allow(unsafe_code)]

use windows::{
    core::{w, Error as WinError, PCWSTR},
    Win32::{
        Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM},
        Graphics::Gdi::{GetStockObject, HBRUSH, WHITE_BRUSH},
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
            LoadCursorW, MessageBoxW, PostQuitMessage, RegisterClassExW, SetForegroundWindow,
            ShowWindow, TranslateMessage, CW_USEDEFAULT, HMENU, IDC_ARROW, MB_ICONERROR, MB_OK,
            MSG, SW_SHOW, WINDOW_EX_STYLE, WM_CLOSE, WM_DESTROY, WNDCLASSEXW,
            WS_OVERLAPPEDWINDOW,
        },
    },
};

use minsize::{
    config::Settings,
    platform::{win32::dpi, WindowHandle},
    Activation, Result,
};
use tracing::{info, warn};

const CLASS_NAME: PCWSTR = w!("MinsizeDemoWindow");

/// Initial client size at 96 DPI.
const INITIAL_SIZE: (i32, i32) = (960, 640);

pub(crate) fn run(settings: &Settings) -> Result<()> {
    dpi::init();
    let hwnd = open_window()?;
    enforce_minimum(hwnd, settings)?;
    pump_messages()
}

pub(crate) fn show_error_dialog(message: &str) {
    let text: Vec<u16> = message.encode_utf16().chain(Some(0)).collect();
    // SAFETY: `text` is NUL-terminated and outlives the call.
    unsafe {
        let _ = MessageBoxW(
            HWND::default(),
            PCWSTR(text.as_ptr()),
            w!("minsize demo"),
            MB_OK | MB_ICONERROR,
        );
    }
}

/// Register the class, create the window and bring it to the foreground so
/// `GetActiveWindow` resolves to it.
fn open_window() -> Result<HWND> {
    // SAFETY: plain Win32 calls; every pointer argument is a static literal or
    // a fully initialised local.
    unsafe {
        let instance = HINSTANCE(GetModuleHandleW(None)?.0);
        let class = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            lpfnWndProc: Some(wnd_proc),
            hInstance: instance,
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH(GetStockObject(WHITE_BRUSH).0),
            lpszClassName: CLASS_NAME,
            ..Default::default()
        };
        if RegisterClassExW(&class) == 0 {
            return Err(WinError::from_win32().into());
        }

        let system_dpi = dpi::system();
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE(0),
            CLASS_NAME,
            w!("minsize demo: try shrinking me"),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            dpi::scale(INITIAL_SIZE.0, system_dpi),
            dpi::scale(INITIAL_SIZE.1, system_dpi),
            HWND::default(),
            HMENU::default(),
            instance,
            None,
        )?;
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = SetForegroundWindow(hwnd);
        Ok(hwnd)
    }
}

fn enforce_minimum(hwnd: HWND, settings: &Settings) -> Result<()> {
    let mut effective = settings.clone();
    let window = WindowHandle::from_raw(hwnd.0 as isize);
    if let Some(window) = window.filter(|_| settings.dpi_aware) {
        let dpi = dpi::for_window(window);
        effective.min_width = dpi::scale(settings.min_width, dpi);
        effective.min_height = dpi::scale(settings.min_height, dpi);
    }

    match effective.apply()? {
        Activation::Skipped(reason) => warn!(event = "host.minimum_not_enforced", ?reason),
        activation => info!(
            event = "host.minimum_enforced",
            ?activation,
            width = effective.min_width,
            height = effective.min_height
        ),
    }
    Ok(())
}

fn pump_messages() -> Result<()> {
    let mut msg = MSG::default();
    loop {
        // SAFETY: `msg` is a valid out-pointer for the whole loop.
        match unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) }.0 {
            -1 => return Err(WinError::from_win32().into()),
            0 => return Ok(()),
            _ => unsafe {
                let _ = TranslateMessage(&msg);
                let _ = DispatchMessageW(&msg);
            },
        }
    }
}

unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CLOSE => {
            // Unhook while the window still exists.
            minsize::reset();
            let _ = DestroyWindow(hwnd);
            LRESULT(0)
        }
        WM_DESTROY => {
            PostQuitMessage(0);
            LRESULT(0)
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
