//! Lock kinds, lock states and the modifier masks that carry them.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Core X protocol modifier masks (KeyButMask)
/// Lock modifier mask (Caps Lock).
pub const MASK_LOCK: u32 = 1 << 1;
/// Mod2 mask (usually Num Lock).
pub const MASK_MOD2: u32 = 1 << 4;

/// Bit of the compositor LED word that reports Num Lock.
pub const LED_NUM_LOCK: i32 = 0x1;

/// A keyboard lock modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LockKind {
    NumLock,
    CapsLock,
}

impl LockKind {
    /// Both kinds, in the order settings are applied.
    pub const ALL: [LockKind; 2] = [LockKind::NumLock, LockKind::CapsLock];

    /// Modifier mask bit reported by `QueryPointer` for this kind.
    pub fn modifier_mask(self) -> u32 {
        match self {
            LockKind::NumLock => MASK_MOD2,
            LockKind::CapsLock => MASK_LOCK,
        }
    }

    /// Keysym name of the key that toggles this lock.
    pub fn keysym_name(self) -> &'static str {
        match self {
            LockKind::NumLock => "Num_Lock",
            LockKind::CapsLock => "Caps_Lock",
        }
    }
}

impl fmt::Display for LockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockKind::NumLock => f.write_str("Num Lock"),
            LockKind::CapsLock => f.write_str("Caps Lock"),
        }
    }
}

/// State of a lock modifier.
///
/// `Unknown` only ever describes a failed probe. It is rejected as a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LockState {
    Off,
    On,
    #[default]
    Unknown,
}

impl LockState {
    /// Decode the state of `kind` from a modifier mask.
    pub fn from_mask(kind: LockKind, mask: u32) -> Self {
        Self::from(mask & kind.modifier_mask() != 0)
    }

    /// Decode Num Lock from a compositor LED word.
    pub fn from_leds(leds: i32) -> Self {
        Self::from(leds & LED_NUM_LOCK != 0)
    }

    /// Whether this state may be used as a reconciliation target.
    #[inline]
    pub fn is_known(self) -> bool {
        matches!(self, LockState::Off | LockState::On)
    }

    /// The opposite known state. `Unknown` stays `Unknown`.
    pub fn toggled(self) -> Self {
        match self {
            LockState::Off => LockState::On,
            LockState::On => LockState::Off,
            LockState::Unknown => LockState::Unknown,
        }
    }
}

impl From<bool> for LockState {
    fn from(on: bool) -> Self {
        if on { LockState::On } else { LockState::Off }
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockState::Off => f.write_str("off"),
            LockState::On => f.write_str("on"),
            LockState::Unknown => f.write_str("unknown"),
        }
    }
}
