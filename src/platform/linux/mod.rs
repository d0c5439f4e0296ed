//! Linux platform implementation.
//!
//! Provides one adapter per backend:
//! - **X11**: `XlibDisplay` queries the modifier mask and injects keys
//!   through XTest; it also loads the keyboard mapping.
//! - **Compositor**: `KWinKeyboard` talks to KWin over the session bus.
//!
//! ## Feature Flags
//!
//! - `x11` (default): Xlib/XTest adapter
//! - `compositor` (default): session-bus adapter (zbus)

#[cfg(feature = "x11")]
mod x11;
#[cfg(feature = "x11")]
pub use self::x11::XlibDisplay;

#[cfg(feature = "compositor")]
mod kwin;
#[cfg(feature = "compositor")]
pub use self::kwin::{CompositorEndpoints, KWinKeyboard};
