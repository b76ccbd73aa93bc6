// ── WM_GETMINMAXINFO payload ──────────────────────────────────────────────────
//
// The message's LPARAM is the address of a caller-owned MINMAXINFO.  This is
// the only place in the crate that reads or writes memory at a raw address;
// everything else goes through `MinMaxInfo::read_from` / `write_to`.

#![allow(unsafe_code)]

use std::mem::{align_of, size_of};

/// Message identifier of the size-negotiation message (`WM_GETMINMAXINFO`).
pub const WM_GETMINMAXINFO: u32 = 0x0024;

/// A 2D integer point, layout-compatible with Win32 `POINT`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Layout-compatible mirror of Win32 `MINMAXINFO`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinMaxInfo {
    pub reserved: Point,
    pub max_size: Point,
    pub max_position: Point,
    /// The only field minsize ever writes.
    pub min_track_size: Point,
    pub max_track_size: Point,
}

// Five POINTs, no padding.
const _: () = assert!(size_of::<MinMaxInfo>() == 5 * size_of::<Point>());
const _: () = assert!(size_of::<MinMaxInfo>() == 40);

impl MinMaxInfo {
    /// Copy of `self` with `min_track_size` replaced; every other field kept.
    pub fn with_min_track_size(self, size: Point) -> Self {
        Self {
            min_track_size: size,
            ..self
        }
    }

    /// Read a payload from the address carried in a message's LPARAM.
    ///
    /// Returns `None` for a null or misaligned address.
    ///
    /// # Safety
    ///
    /// A non-null, aligned `addr` must point to a live, readable
    /// `MinMaxInfo` for the duration of the call.  For `WM_GETMINMAXINFO`
    /// the OS guarantees this for the lifetime of the message.
    pub unsafe fn read_from(addr: isize) -> Option<Self> {
        let ptr = addr_to_ptr(addr)?;
        // SAFETY: non-null and aligned (checked above); validity of the
        // pointee is the caller's contract.
        Some(unsafe { ptr.read() })
    }

    /// Write `self` back to the address carried in a message's LPARAM.
    ///
    /// Returns `false`, without touching memory, for a null or misaligned
    /// address.
    ///
    /// # Safety
    ///
    /// A non-null, aligned `addr` must point to a live, writable
    /// `MinMaxInfo` that nothing else is accessing during the call.
    pub unsafe fn write_to(self, addr: isize) -> bool {
        let Some(ptr) = addr_to_ptr(addr) else {
            return false;
        };
        // SAFETY: non-null and aligned (checked above); exclusive access to a
        // writable pointee is the caller's contract.
        unsafe { ptr.write(self) };
        true
    }
}

/// Overwrite only the min-track-size field of the payload at `addr`.
///
/// Returns `false` if the payload could not be accessed; memory is untouched
/// in that case.
///
/// # Safety
///
/// Same contract as [`MinMaxInfo::read_from`] and [`MinMaxInfo::write_to`].
pub(crate) unsafe fn override_min_track_size(addr: isize, size: Point) -> bool {
    // SAFETY: the caller guarantees `addr` is either unreadable (rejected by
    // `read_from`) or a live MINMAXINFO owned by the current message.
    match unsafe { MinMaxInfo::read_from(addr) } {
        // SAFETY: same address and contract; `read_from` just succeeded on it,
        // so it is non-null, aligned and readable.
        Some(info) => unsafe { info.with_min_track_size(size).write_to(addr) },
        None => false,
    }
}

fn addr_to_ptr(addr: isize) -> Option<*mut MinMaxInfo> {
    if addr == 0 || addr as usize % align_of::<MinMaxInfo>() != 0 {
        return None;
    }
    Some(addr as *mut MinMaxInfo)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MinMaxInfo {
        MinMaxInfo {
            reserved: Point::new(1, 2),
            max_size: Point::new(1920, 1080),
            max_position: Point::new(-8, -8),
            min_track_size: Point::new(136, 39),
            max_track_size: Point::new(3840, 2160),
        }
    }

    #[test]
    fn override_touches_only_min_track_size() {
        let mut info = sample();
        let addr = &mut info as *mut MinMaxInfo as isize;

        // SAFETY: addr points to a live local MinMaxInfo.
        let ok = unsafe { override_min_track_size(addr, Point::new(640, 480)) };

        assert!(ok);
        assert_eq!(info.min_track_size, Point::new(640, 480));
        assert_eq!(info.with_min_track_size(Point::new(136, 39)), sample());
    }

    #[test]
    fn override_reads_back_what_it_wrote() {
        let mut info = sample();
        let addr = &mut info as *mut MinMaxInfo as isize;

        // SAFETY: addr points to a live local MinMaxInfo for both calls.
        unsafe {
            assert!(override_min_track_size(addr, Point::new(800, 600)));
            assert!(override_min_track_size(addr, Point::new(320, 200)));
            assert_eq!(
                MinMaxInfo::read_from(addr).expect("aligned, non-null"),
                sample().with_min_track_size(Point::new(320, 200))
            );
        }
    }

    #[test]
    fn null_address_is_rejected() {
        // SAFETY: null is rejected before any access.
        unsafe {
            assert_eq!(MinMaxInfo::read_from(0), None);
            assert!(!sample().write_to(0));
            assert!(!override_min_track_size(0, Point::new(1, 1)));
        }
    }

    #[test]
    fn misaligned_address_is_rejected_without_writing() {
        let mut buf = [0u8; 48];
        let base = buf.as_mut_ptr() as isize;
        let misaligned = if base % 4 == 0 { base + 1 } else { base };

        // SAFETY: misaligned addresses are rejected before any access.
        let ok = unsafe { override_min_track_size(misaligned, Point::new(9, 9)) };

        assert!(!ok);
        assert!(buf.iter().all(|b| *b == 0));
    }

    #[cfg(windows)]
    #[test]
    fn layout_matches_win32_minmaxinfo() {
        use windows::Win32::UI::WindowsAndMessaging::MINMAXINFO;
        assert_eq!(size_of::<MinMaxInfo>(), size_of::<MINMAXINFO>());
        assert_eq!(align_of::<MinMaxInfo>(), align_of::<MINMAXINFO>());
        assert_eq!(
            std::mem::offset_of!(MinMaxInfo, min_track_size),
            std::mem::offset_of!(MINMAXINFO, ptMinTrackSize)
        );
    }
}
