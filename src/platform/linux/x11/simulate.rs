//! X11 key event simulation using XTest.

use crate::display::{FakeEventType, FakeInput};
use crate::error::{Error, Result};
use std::os::raw::{c_int, c_uint, c_ulong};
use x11::xlib;
use x11::xtest;

use super::display::{FALSE, checked};

const TRUE: c_int = 1;

/// Send one fake key event and wait for the server to process it.
///
/// XTest delivers key events through the core keyboard, so they reach the
/// root window the pointer is on; `input.root` is not sent on the wire.
/// `input.time` is the XTest delay, and `CurrentTime` means no delay.
pub(super) fn fake_key_event(display: *mut xlib::Display, input: FakeInput) -> Result<()> {
    let is_press = match input.event {
        FakeEventType::KeyPress => TRUE,
        FakeEventType::KeyRelease => FALSE,
    };

    let (status, error_code) = checked(display, || unsafe {
        xtest::XTestFakeKeyEvent(
            display,
            c_uint::from(input.code.get()),
            is_press,
            input.time as c_ulong,
        )
    });

    if status == 0 {
        Err(Error::Platform("XTestFakeKeyEvent failed".into()))
    } else if error_code != 0 {
        Err(Error::Platform(format!(
            "XTestFakeKeyEvent rejected with error code {error_code}"
        )))
    } else {
        Ok(())
    }
}
