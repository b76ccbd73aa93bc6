// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – Win32 / WinAPI FFI
//   • `minmax`          – the WM_GETMINMAXINFO payload at a raw address
//   • `interceptor`     – `dispatch`, which hands that address to `minmax`
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! Enforce a minimum resizable-window size on the process's main window.
//!
//! On Win32 the main window's procedure is subclassed: `WM_GETMINMAXINFO`
//! gets its min-track size rewritten, every other message is forwarded
//! untouched, and [`reset`] puts the original procedure back.  Elsewhere every
//! call validates its arguments and reports that there is no window to
//! intercept.
//!
//! ```no_run
//! match minsize::set_minimum_size(800, 600)? {
//!     minsize::Activation::Installed | minsize::Activation::Updated => {}
//!     minsize::Activation::Skipped(reason) => eprintln!("not enforced: {reason:?}"),
//! }
//! // … before the window goes away:
//! minsize::reset();
//! # Ok::<(), minsize::MinSizeError>(())
//! ```

pub mod config;
pub mod error;
pub mod hook;
pub mod interceptor;
pub mod logging;
pub mod minmax;
pub mod platform;

mod service;

pub use error::{MinSizeError, Result};
pub use interceptor::{Activation, Environment, Interceptor, SkipReason};
pub use service::{reset, set_environment, set_minimum_size, status, Status};
