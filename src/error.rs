// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in minsize return `error::Result<T>`.  The window
// procedure itself never returns errors: anything that goes wrong there is a
// pass-through, not a failure (see `interceptor::dispatch`).

/// Every error that minsize can produce.
#[derive(Debug, thiserror::Error)]
pub enum MinSizeError {
    /// A minimum-size component was negative.
    #[error("any component of min size cannot be less than 0 (got {width}x{height})")]
    InvalidArgument { width: i32, height: i32 },

    /// Another UI thread currently has the hook installed.
    #[error("the window interceptor is owned by another thread")]
    WrongThread,

    /// The interceptor was re-entered while it was being reconfigured.
    #[error("the window interceptor is busy")]
    Busy,

    /// The window's procedure is already ours; wrapping it again would loop.
    #[error("the window procedure is already intercepted")]
    AlreadyHooked,

    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// A standard I/O error while reading or writing settings.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON for [`crate::config::Settings`].
    #[error("settings parse error: {0}")]
    Json(#[from] serde_json::Error),
}

// Convert a windows-crate error (HRESULT) directly into a MinSizeError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for MinSizeError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        // Win32 errors appear as 0x8007xxxx HRESULTs.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MinSizeError>;
