// In-memory window system for tests.  Records every call the interceptor makes
// so tests can assert on the exact handler chain.

use std::cell::RefCell;
use std::collections::HashMap;
use std::num::NonZeroIsize;
use std::rc::Rc;

use super::{ProcAddress, WindowHandle, WindowMessage, WindowSystem};
use crate::error::{MinSizeError, Result};
use crate::interceptor::DispatchTable;

const fn nz(raw: isize) -> NonZeroIsize {
    match NonZeroIsize::new(raw) {
        Some(v) => v,
        None => panic!("zero"),
    }
}

pub(crate) const MAIN_WINDOW: WindowHandle = WindowHandle(nz(0x1000));
pub(crate) const HOST_PROC: ProcAddress = ProcAddress(nz(0x4000));
pub(crate) const INTERCEPTOR_PROC: ProcAddress = ProcAddress(nz(0x9000));

const ERROR_INVALID_WINDOW_HANDLE: u32 = 1400;

#[derive(Default)]
struct FakeState {
    main_window: Option<WindowHandle>,
    procs: HashMap<WindowHandle, ProcAddress>,
    swaps: usize,
    fail_next_swap: Option<u32>,
    forwarded: Vec<(ProcAddress, WindowMessage)>,
    defaulted: Vec<WindowMessage>,
    published: Vec<Option<DispatchTable>>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeWindowSystem {
    state: Rc<RefCell<FakeState>>,
}

impl FakeWindowSystem {
    /// A system with no resolvable main window.
    pub(crate) fn headless() -> Self {
        Self::default()
    }

    /// A system whose main window runs `HOST_PROC`.
    pub(crate) fn with_main_window() -> Self {
        let sys = Self::default();
        {
            let mut s = sys.state.borrow_mut();
            s.main_window = Some(MAIN_WINDOW);
            s.procs.insert(MAIN_WINDOW, HOST_PROC);
        }
        sys
    }

    pub(crate) fn proc_of(&self, window: WindowHandle) -> Option<ProcAddress> {
        self.state.borrow().procs.get(&window).copied()
    }

    /// Overwrite a window's procedure behind the interceptor's back.
    pub(crate) fn force_proc(&self, window: WindowHandle, proc: ProcAddress) {
        self.state.borrow_mut().procs.insert(window, proc);
    }

    pub(crate) fn fail_next_swap(&self, code: u32) {
        self.state.borrow_mut().fail_next_swap = Some(code);
    }

    pub(crate) fn swap_count(&self) -> usize {
        self.state.borrow().swaps
    }

    pub(crate) fn forwarded(&self) -> Vec<(ProcAddress, WindowMessage)> {
        self.state.borrow().forwarded.clone()
    }

    pub(crate) fn defaulted(&self) -> Vec<WindowMessage> {
        self.state.borrow().defaulted.clone()
    }

    pub(crate) fn last_published(&self) -> Option<Option<DispatchTable>> {
        self.state.borrow().published.last().copied()
    }

    /// What a procedure at `proc` answers to `msg`; every argument matters.
    pub(crate) fn expected_result(proc: ProcAddress, msg: &WindowMessage) -> isize {
        proc.as_raw() ^ msg.window ^ msg.id as isize ^ msg.wparam as isize ^ msg.lparam
    }

    pub(crate) fn expected_default(msg: &WindowMessage) -> isize {
        !(msg.id as isize)
    }
}

impl WindowSystem for FakeWindowSystem {
    fn main_window(&self) -> Option<WindowHandle> {
        self.state.borrow().main_window
    }

    fn interceptor_proc(&self) -> ProcAddress {
        INTERCEPTOR_PROC
    }

    fn swap_window_proc(&self, window: WindowHandle, proc: ProcAddress) -> Result<ProcAddress> {
        let mut s = self.state.borrow_mut();
        if let Some(code) = s.fail_next_swap.take() {
            return Err(MinSizeError::Win32 {
                function: "SetWindowLongPtrW",
                code,
            });
        }
        let slot = s.procs.get_mut(&window).ok_or(MinSizeError::Win32 {
            function: "SetWindowLongPtrW",
            code: ERROR_INVALID_WINDOW_HANDLE,
        })?;
        let previous = std::mem::replace(slot, proc);
        s.swaps += 1;
        Ok(previous)
    }

    fn call_window_proc(&self, proc: ProcAddress, msg: &WindowMessage) -> isize {
        self.state.borrow_mut().forwarded.push((proc, *msg));
        Self::expected_result(proc, msg)
    }

    fn default_window_proc(&self, msg: &WindowMessage) -> isize {
        self.state.borrow_mut().defaulted.push(*msg);
        Self::expected_default(msg)
    }

    fn publish_dispatch_table(&self, table: Option<DispatchTable>) {
        self.state.borrow_mut().published.push(table);
    }
}
