//! Compositor-side keyboard interface for Wayland sessions.

use crate::error::Result;

/// Code the compositor's key simulation understands as Num Lock.
pub const NUM_LOCK_SIMULATION_CODE: i32 = 69;

/// Keyboard LED and key simulation calls exposed by the session compositor.
///
/// Implementations issue blocking session-bus calls. No timeout is added
/// beyond what the transport enforces.
pub trait CompositorKeyboard {
    /// Current keyboard LED word. Bit 0 is Num Lock.
    fn get_leds(&self) -> Result<i32>;

    /// Simulate one key event with a compositor-specific code.
    fn simulate_key(&self, code: i32) -> Result<()>;
}

impl<T: CompositorKeyboard + ?Sized> CompositorKeyboard for &T {
    fn get_leds(&self) -> Result<i32> {
        (**self).get_leds()
    }

    fn simulate_key(&self, code: i32) -> Result<()> {
        (**self).simulate_key(code)
    }
}
