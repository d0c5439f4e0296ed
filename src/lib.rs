//! # locksync
//!
//! Keeps the keyboard's Num Lock and Caps Lock in a requested state on
//! desktop sessions running either a plain X server or a Wayland compositor.
//!
//! ## Features
//!
//! - Reads lock state from the X modifier mask or the compositor's LEDs
//! - Flips a lock with exactly one synthetic press/release (or one
//!   compositor key simulation), and only when it differs from the target
//! - Picks the backend per call from the session type
//! - All collaborators are traits, so the state machine runs against fakes
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(all(target_os = "linux", feature = "x11"))]
//! # fn main() -> locksync::Result<()> {
//! use locksync::{LockKind, LockReconciler, LockState, LogObserver, XlibDisplay};
//!
//! let display = XlibDisplay::open()?;
//! let mapping = display.keyboard_mapping()?;
//! let observer = LogObserver;
//!
//! let reconciler = LockReconciler::new(&display, &mapping).with_observer(&observer);
//! reconciler.reconcile(LockKind::NumLock, LockState::On)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(target_os = "linux", feature = "x11")))]
//! # fn main() {}
//! ```
//!
//! ## Backends
//!
//! A non-empty `WAYLAND_DISPLAY` selects the compositor backend for Num
//! Lock: the reconciler waits a settling delay, asks the compositor for its
//! LED word and, on mismatch, asks it to simulate key code 69. Caps Lock
//! has no compositor path and always goes through the X connection.

pub mod backend;
pub mod compositor;
pub mod config;
pub mod display;
pub mod error;
pub mod keysym;
pub mod lock;
pub mod observer;
pub mod probe;
pub mod reconcile;
pub mod synth;

mod platform;

#[cfg(test)]
mod testing;

// Re-exports
pub use backend::{Backend, LockBackend, ProcessEnvironment, SessionEnvironment};
pub use compositor::{CompositorKeyboard, NUM_LOCK_SIMULATION_CODE};
pub use config::{DEFAULT_SETTLE_DELAY, ReconcilerConfig};
pub use display::{DisplayConnection, FakeEventType, FakeInput, Window};
pub use error::{Error, ErrorKind, KeyPhase, Result};
pub use keysym::{KeyCode, KeySymbolTable, KeyboardMapping, resolve_key_code};
pub use lock::{LockKind, LockState};
pub use observer::{LogObserver, NoopObserver, ReconcileObserver};
pub use probe::{probe, probe_or_unknown};
pub use reconcile::{LockReconciler, LockTargets, Outcome};
pub use synth::press_release;

// Platform adapters
#[cfg(all(target_os = "linux", feature = "compositor"))]
pub use platform::{CompositorEndpoints, KWinKeyboard};
#[cfg(all(target_os = "linux", feature = "x11"))]
pub use platform::XlibDisplay;
