//! Keyboard mapping snapshot from the X server.

use super::display::XlibDisplay;
use crate::error::{Error, Result};
use crate::keysym::{KeyboardMapping, NO_SYMBOL};
use std::os::raw::c_int;
use x11::xlib;

impl XlibDisplay {
    /// Read the current keycode → keysym table.
    ///
    /// The snapshot goes stale when the layout changes; take a new one
    /// after a `MappingNotify`.
    pub fn keyboard_mapping(&self) -> Result<KeyboardMapping> {
        let display = self.as_ptr();
        let (mut min, mut max): (c_int, c_int) = (0, 0);
        unsafe { xlib::XDisplayKeycodes(display, &mut min, &mut max) };

        let count = max - min + 1;
        if !(8..=255).contains(&min) || count <= 0 {
            return Err(Error::Platform(format!(
                "invalid keycode range {min}..={max}"
            )));
        }

        let mut per_keycode: c_int = 0;
        let syms = unsafe {
            xlib::XGetKeyboardMapping(display, min as xlib::KeyCode, count, &mut per_keycode)
        };
        if syms.is_null() {
            return Err(Error::Platform("XGetKeyboardMapping failed".into()));
        }

        let len = (count * per_keycode.max(0)) as usize;
        let keysyms = unsafe { std::slice::from_raw_parts(syms, len) }
            .iter()
            .map(|&sym| u32::try_from(sym).unwrap_or(NO_SYMBOL))
            .collect();
        unsafe { xlib::XFree(syms.cast()) };

        log::debug!("loaded keyboard mapping: {count} keycodes x {per_keycode} keysyms");
        Ok(KeyboardMapping::new(
            min as u8,
            per_keycode.max(0) as usize,
            keysyms,
        ))
    }
}
