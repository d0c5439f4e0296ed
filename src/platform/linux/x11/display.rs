//! Xlib display connection and modifier mask queries.

use crate::display::{DisplayConnection, FakeInput, Window};
use crate::error::{Error, Result};
use std::ffi::CString;
use std::os::raw::{c_int, c_uint};
use std::ptr::null;
use std::sync::{Mutex, MutexGuard};
use x11::xlib;
use x11::xtest;

use super::simulate::fake_key_event;

pub(super) const FALSE: c_int = 0;

/// Held while the scoped error handler is installed.
static TRAP: Mutex<()> = Mutex::new(());

/// First error code seen per display (keyed by `Display` address) while
/// the handler is installed.
static CAPTURED: Mutex<Vec<(usize, u8)>> = Mutex::new(Vec::new());

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn record(display: usize, code: u8) {
    let mut captured = lock(&CAPTURED);
    if !captured.iter().any(|(d, _)| *d == display) {
        captured.push((display, code));
    }
}

fn take(display: usize) -> u8 {
    let mut captured = lock(&CAPTURED);
    match captured.iter().position(|(d, _)| *d == display) {
        Some(i) => captured.swap_remove(i).1,
        None => 0,
    }
}

unsafe extern "C" fn record_error(
    display: *mut xlib::Display,
    event: *mut xlib::XErrorEvent,
) -> c_int {
    // SAFETY: Xlib hands the handler a valid event for the duration of the call.
    if let Some(event) = unsafe { event.as_ref() } {
        record(display as usize, event.error_code);
    }
    0
}

/// Run `f` with protocol errors captured instead of terminating the process.
///
/// Returns `f`'s value and the error code reported for `display` (0 when
/// none). The Xlib error handler is process-wide, so installing it, running
/// `f`, syncing and restoring it happen under one lock.
pub(super) fn checked<T>(display: *mut xlib::Display, f: impl FnOnce() -> T) -> (T, u8) {
    let _trap = lock(&TRAP);
    let key = display as usize;
    unsafe {
        xlib::XSync(display, FALSE);
        let previous = xlib::XSetErrorHandler(Some(record_error));
        take(key);
        let value = f();
        xlib::XSync(display, FALSE);
        xlib::XSetErrorHandler(previous);
        (value, take(key))
    }
}

/// A blocking Xlib connection with the XTest extension available.
///
/// Usually opened once by the daemon and lent to the reconciler.
pub struct XlibDisplay {
    display: *mut xlib::Display,
    root: xlib::Window,
}

impl XlibDisplay {
    /// Open the display named by `$DISPLAY`.
    pub fn open() -> Result<Self> {
        Self::open_named(None)
    }

    /// Open a specific display, e.g. `":0"`.
    pub fn open_named(name: Option<&str>) -> Result<Self> {
        let name = name
            .map(CString::new)
            .transpose()
            .map_err(|_| Error::Platform("display name contains a NUL byte".into()))?;
        let display = unsafe { xlib::XOpenDisplay(name.as_ref().map_or(null(), |n| n.as_ptr())) };
        if display.is_null() {
            return Err(Error::Platform("XOpenDisplay failed".into()));
        }

        let (mut event_base, mut error_base, mut major, mut minor) = (0, 0, 0, 0);
        let has_xtest = unsafe {
            xtest::XTestQueryExtension(
                display,
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        };
        if has_xtest == FALSE {
            unsafe { xlib::XCloseDisplay(display) };
            return Err(Error::NotSupported("XTEST extension is not available".into()));
        }
        log::debug!("XTEST {major}.{minor}");

        let root = unsafe { xlib::XDefaultRootWindow(display) };
        Ok(Self { display, root })
    }

    pub(super) fn as_ptr(&self) -> *mut xlib::Display {
        self.display
    }
}

impl Drop for XlibDisplay {
    fn drop(&mut self) {
        unsafe { xlib::XCloseDisplay(self.display) };
    }
}

impl DisplayConnection for XlibDisplay {
    fn root_window(&self) -> Window {
        self.root as Window
    }

    fn query_pointer_mask(&self, root: Window) -> Result<u32> {
        let mut root_return: xlib::Window = 0;
        let mut child_return: xlib::Window = 0;
        let (mut root_x, mut root_y, mut win_x, mut win_y): (c_int, c_int, c_int, c_int) =
            (0, 0, 0, 0);
        let mut mask: c_uint = 0;

        let (status, error_code) = checked(self.display, || unsafe {
            xlib::XQueryPointer(
                self.display,
                root as xlib::Window,
                &mut root_return,
                &mut child_return,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        });

        if error_code != 0 {
            return Err(Error::Probe(format!(
                "XQueryPointer failed with error code {error_code}"
            )));
        }
        if status == FALSE {
            // Pointer is on another screen; the mask is still valid.
            log::debug!("pointer is not on the queried root window");
        }
        Ok(mask as u32)
    }

    fn send_fake_input(&self, input: FakeInput) -> Result<()> {
        fake_key_event(self.display, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn error_event(code: u8) -> xlib::XErrorEvent {
        // SAFETY: XErrorEvent is a plain C struct; all-zero is a valid value.
        let mut event: xlib::XErrorEvent = unsafe { std::mem::zeroed() };
        event.error_code = code;
        event
    }

    #[test]
    fn test_errors_are_kept_per_display() {
        let first = 0x1000 as *mut xlib::Display;
        let second = 0x2000 as *mut xlib::Display;
        let mut bad_value = error_event(2);
        let mut bad_match = error_event(8);
        let mut bad_access = error_event(10);

        unsafe {
            record_error(first, &mut bad_value);
            record_error(second, &mut bad_match);
            // Only the first error per display is kept.
            record_error(first, &mut bad_access);
        }

        assert_eq!(take(second as usize), 8);
        assert_eq!(take(first as usize), 2);
        assert_eq!(take(first as usize), 0);
    }

    #[test]
    fn test_concurrent_captures_do_not_mix() {
        let handles: Vec<_> = (1u8..=8)
            .map(|code| {
                thread::spawn(move || {
                    let key = 0x10_0000 + usize::from(code) * 0x100;
                    for _ in 0..200 {
                        record(key, code);
                        assert_eq!(take(key), code);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
