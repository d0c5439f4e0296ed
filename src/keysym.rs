//! Keycode resolution from keysym names.
//!
//! A [`KeySymbolTable`] answers "which physical key produces this keysym".
//! [`KeyboardMapping`] is the in-memory table built from an X keyboard
//! mapping: for every keycode from `min_keycode` upward it holds
//! `keysyms_per_keycode` keysyms, laid out flat exactly like a
//! `GetKeyboardMapping` reply.

use crate::error::{Error, Result};
use std::fmt;

/// No keysym bound at this slot.
pub const NO_SYMBOL: u32 = 0;

/// Keysym values for the lock keys, from `keysymdef.h`.
pub const XK_SCROLL_LOCK: u32 = 0xff14;
pub const XK_NUM_LOCK: u32 = 0xff7f;
pub const XK_CAPS_LOCK: u32 = 0xffe5;
pub const XK_SHIFT_LOCK: u32 = 0xffe6;

const KEYSYM_NAMES: &[(&str, u32)] = &[
    ("Scroll_Lock", XK_SCROLL_LOCK),
    ("Num_Lock", XK_NUM_LOCK),
    ("Caps_Lock", XK_CAPS_LOCK),
    ("Shift_Lock", XK_SHIFT_LOCK),
];

/// Look up a keysym value by its `keysymdef.h` name.
pub fn keysym_from_name(name: &str) -> Option<u32> {
    KEYSYM_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, sym)| *sym)
}

/// A physical X keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(u8);

impl KeyCode {
    /// Lowest keycode the core protocol allows.
    pub const MIN: u8 = 8;

    pub const fn new(code: u8) -> Self {
        KeyCode(code)
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<KeyCode> for u8 {
    fn from(code: KeyCode) -> Self {
        code.0
    }
}

/// A keyboard symbol table.
pub trait KeySymbolTable {
    /// First keycode bound to the keysym called `name`.
    fn first_keycode_for(&self, name: &str) -> Result<KeyCode>;
}

impl<T: KeySymbolTable + ?Sized> KeySymbolTable for &T {
    fn first_keycode_for(&self, name: &str) -> Result<KeyCode> {
        (**self).first_keycode_for(name)
    }
}

/// Resolve the keycode for a logical key name.
///
/// Fails with [`Error::Resolve`] when nothing in the mapping produces the
/// keysym.
pub fn resolve_key_code<T: KeySymbolTable + ?Sized>(table: &T, name: &str) -> Result<KeyCode> {
    table.first_keycode_for(name)
}

/// Keyboard mapping snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardMapping {
    min_keycode: u8,
    keysyms_per_keycode: usize,
    keysyms: Vec<u32>,
}

impl KeyboardMapping {
    /// Build a mapping from a flat keysym list.
    ///
    /// Trailing keysyms that do not fill a whole keycode row are ignored.
    /// Rows for keycodes below [`KeyCode::MIN`] are dropped.
    pub fn new(min_keycode: u8, keysyms_per_keycode: usize, mut keysyms: Vec<u32>) -> Self {
        if min_keycode < KeyCode::MIN {
            let skipped = usize::from(KeyCode::MIN - min_keycode) * keysyms_per_keycode;
            keysyms.drain(..skipped.min(keysyms.len()));
        }
        Self {
            min_keycode: min_keycode.max(KeyCode::MIN),
            keysyms_per_keycode,
            keysyms,
        }
    }

    pub fn min_keycode(&self) -> u8 {
        self.min_keycode
    }

    /// Number of keycodes covered by this mapping.
    pub fn len(&self) -> usize {
        if self.keysyms_per_keycode == 0 {
            0
        } else {
            self.keysyms.len() / self.keysyms_per_keycode
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keysyms bound to `code`, or an empty slice when out of range.
    pub fn keysyms(&self, code: KeyCode) -> &[u32] {
        let Some(row) = code.get().checked_sub(self.min_keycode) else {
            return &[];
        };
        let row = row as usize;
        if row >= self.len() {
            return &[];
        }
        let start = row * self.keysyms_per_keycode;
        &self.keysyms[start..start + self.keysyms_per_keycode]
    }

    /// All keycodes producing `keysym`, lowest first.
    pub fn keycodes_for(&self, keysym: u32) -> impl Iterator<Item = KeyCode> + '_ {
        let per = self.keysyms_per_keycode;
        let min = self.min_keycode as usize;
        let rows = if per == 0 { &[][..] } else { &self.keysyms[..] };
        rows.chunks_exact(per.max(1))
            .enumerate()
            .filter(move |(_, row)| keysym != NO_SYMBOL && row.contains(&keysym))
            .filter_map(move |(i, _)| u8::try_from(min + i).ok())
            .map(KeyCode::new)
    }
}

impl KeySymbolTable for KeyboardMapping {
    fn first_keycode_for(&self, name: &str) -> Result<KeyCode> {
        keysym_from_name(name)
            .and_then(|sym| self.keycodes_for(sym).next())
            .ok_or_else(|| Error::Resolve {
                name: name.to_string(),
            })
    }
}
