// ── Win32 platform implementation ─────────────────────────────────────────────
//
// This is one of exactly two places in the codebase where `unsafe` code is
// permitted (the other is `minmax`, which owns the payload reinterpretation).
// Every `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub mod dpi; // per-monitor DPI v2 helpers
mod subclass; // the replacement WNDPROC and its routing table
mod window; // WindowSystem over user32

pub use window::Win32WindowSystem;
