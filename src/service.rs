// ── Process-wide interceptor ──────────────────────────────────────────────────
//
// One interceptor per process.  It lives in the local storage of the UI thread
// that configures it: the window procedure runs on the window's owning thread,
// and so must every reconfiguration.  A thread holds the process-wide claim
// only while its hook is installed; reads and no-op resets never claim, and
// the claim is dropped as soon as nothing is installed.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use tracing::debug;

use crate::error::{MinSizeError, Result};
use crate::interceptor::{Activation, Environment, Interceptor};
use crate::platform::NativeWindowSystem;

static OWNER: Claim = Claim::new();
static HOSTED: AtomicBool = AtomicBool::new(false);

thread_local! {
    static SERVICE: RefCell<Option<Interceptor<NativeWindowSystem>>> = const { RefCell::new(None) };
}

/// Snapshot of the process-wide interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub enabled: bool,
    pub min_width: i32,
    pub min_height: i32,
    pub environment: Environment,
}

// ── Thread claim ──────────────────────────────────────────────────────────────

/// Which thread, if any, currently has a hook installed.
struct Claim {
    holder: Mutex<Option<ThreadId>>,
}

impl Claim {
    const fn new() -> Self {
        Self {
            holder: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the claim for `me`, or keep it if `me` already holds it.
    fn acquire(&self, me: ThreadId) -> Result<()> {
        let mut holder = self.lock();
        match *holder {
            Some(other) if other != me => Err(MinSizeError::WrongThread),
            _ => {
                *holder = Some(me);
                Ok(())
            }
        }
    }

    /// Drop the claim if `me` holds it.
    fn release(&self, me: ThreadId) {
        let mut holder = self.lock();
        if *holder == Some(me) {
            *holder = None;
        }
    }

    fn is_held_by(&self, me: ThreadId) -> bool {
        *self.lock() == Some(me)
    }

    fn is_held_elsewhere(&self, me: ThreadId) -> bool {
        matches!(*self.lock(), Some(other) if other != me)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn environment() -> Environment {
    if HOSTED.load(Ordering::Acquire) {
        Environment::Hosted
    } else {
        Environment::Standalone
    }
}

/// Run `f` on this thread's interceptor, creating it on first use.
fn with_local<T>(f: impl FnOnce(&mut Interceptor<NativeWindowSystem>) -> T) -> Result<T> {
    SERVICE.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| MinSizeError::Busy)?;
        let interceptor = slot.get_or_insert_with(|| {
            Interceptor::new(NativeWindowSystem::default(), environment())
        });
        Ok(f(interceptor))
    })
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Enforce a minimum track size on the process's main window.
///
/// The first successful call installs the hook; later calls only change the
/// size.  Must be called from the UI thread that owns the window.  Fails with
/// [`MinSizeError::WrongThread`] while another thread has a hook installed.
pub fn set_minimum_size(width: i32, height: i32) -> Result<Activation> {
    let me = thread::current().id();
    OWNER.acquire(me)?;

    // `Busy` means a call on this same thread is still running; it settles
    // the claim when it returns.
    let (activation, enabled) = with_local(|interceptor| {
        interceptor.set_environment(environment());
        let activation = interceptor.set_minimum_size(width, height);
        (activation, interceptor.is_enabled())
    })?;

    if !enabled {
        OWNER.release(me);
    }
    activation
}

/// Restore the window's original procedure and forget the stored size.
///
/// A no-op when nothing is installed, including when called from a thread
/// other than the one that installed the hook.
pub fn reset() {
    let me = thread::current().id();
    if !OWNER.is_held_by(me) {
        debug!(event = "service.reset_ignored", reason = "not_installed_here");
        return;
    }

    match with_local(Interceptor::disable) {
        Ok(()) => OWNER.release(me),
        Err(e) => debug!(event = "service.reset_ignored", error = %e),
    }
}

/// Tell the interceptor where the host is running.
///
/// [`Environment::Hosted`] disables interception, restoring the window first
/// if this thread had it enabled.
pub fn set_environment(environment: Environment) -> Result<()> {
    let me = thread::current().id();
    if OWNER.is_held_elsewhere(me) {
        return Err(MinSizeError::WrongThread);
    }

    HOSTED.store(environment == Environment::Hosted, Ordering::Release);
    if environment == Environment::Hosted {
        reset();
    }
    Ok(())
}

/// Read the interceptor's state as seen from the calling thread.
///
/// Never claims the interceptor.  A thread that never configured it sees a
/// disabled, zero-sized status.
pub fn status() -> Result<Status> {
    let me = thread::current().id();
    if OWNER.is_held_elsewhere(me) {
        return Err(MinSizeError::WrongThread);
    }

    let (enabled, (min_width, min_height)) = SERVICE.with(|cell| {
        let slot = cell.try_borrow().map_err(|_| MinSizeError::Busy)?;
        Ok::<_, MinSizeError>(
            slot.as_ref()
                .map(|i| (i.is_enabled(), i.minimum_size()))
                .unwrap_or((false, (0, 0))),
        )
    })?;

    Ok(Status {
        enabled,
        min_width,
        min_height,
        environment: environment(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
