//! Backend selection and the per-backend probe/toggle strategies.
//!
//! A desktop session runs either on a plain X server or under a Wayland
//! compositor. The two expose lock state through different channels:
//!
//! - **Legacy**: the X modifier mask and XTest fake input.
//! - **Compositor**: the compositor's LED query and key simulation over the
//!   session bus.
//!
//! The backend is chosen per call from the session-type signal. It is never
//! cached, and a compositor failure never falls back to the legacy path.

use crate::compositor::CompositorKeyboard;
use crate::display::DisplayConnection;
use crate::error::{Error, Result};
use crate::keysym::{KeySymbolTable, resolve_key_code};
use crate::lock::{LockKind, LockState};
use crate::{probe, synth};
use std::fmt;
use std::thread::sleep;
use std::time::Duration;

/// Environment variable whose presence marks a compositor session.
pub const SESSION_DISPLAY_VAR: &str = "WAYLAND_DISPLAY";

/// Which channel lock state is read and changed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Legacy,
    Compositor,
}

impl Backend {
    /// Pick the backend from the session display signal.
    ///
    /// Only a non-empty value selects the compositor.
    pub fn select(session_display: Option<&str>) -> Self {
        match session_display {
            Some(value) if !value.is_empty() => Backend::Compositor,
            _ => Backend::Legacy,
        }
    }

    /// Pick the backend from an environment source.
    pub fn detect<E: SessionEnvironment + ?Sized>(env: &E) -> Self {
        Self::select(env.session_display().as_deref())
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Legacy => f.write_str("legacy"),
            Backend::Compositor => f.write_str("compositor"),
        }
    }
}

/// Source of the session-type signal.
pub trait SessionEnvironment {
    /// Value of the compositor session display indicator, if set.
    fn session_display(&self) -> Option<String>;
}

/// Implement SessionEnvironment for closures.
impl<F> SessionEnvironment for F
where
    F: Fn() -> Option<String>,
{
    fn session_display(&self) -> Option<String> {
        self()
    }
}

/// Reads the signal from the process environment on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl SessionEnvironment for ProcessEnvironment {
    fn session_display(&self) -> Option<String> {
        std::env::var_os(SESSION_DISPLAY_VAR).map(|v| v.to_string_lossy().into_owned())
    }
}

/// Probe and toggle capability of one backend.
pub trait LockBackend {
    fn backend(&self) -> Backend;

    /// Current state of `kind`. Never `Unknown` on success.
    fn probe_state(&self, kind: LockKind) -> Result<LockState>;

    /// Flip `kind` once.
    fn toggle(&self, kind: LockKind) -> Result<()>;
}

/// X modifier mask + fake key press/release.
pub struct LegacyBackend<'a> {
    display: &'a dyn DisplayConnection,
    symbols: &'a dyn KeySymbolTable,
}

impl<'a> LegacyBackend<'a> {
    pub fn new(display: &'a dyn DisplayConnection, symbols: &'a dyn KeySymbolTable) -> Self {
        Self { display, symbols }
    }
}

impl LockBackend for LegacyBackend<'_> {
    fn backend(&self) -> Backend {
        Backend::Legacy
    }

    fn probe_state(&self, kind: LockKind) -> Result<LockState> {
        probe::probe(self.display, kind)
    }

    fn toggle(&self, kind: LockKind) -> Result<()> {
        let code = resolve_key_code(self.symbols, kind.keysym_name())?;
        log::debug!("{} keycode is {code}", kind.keysym_name());
        synth::press_release(self.display, code)
    }
}

/// Compositor LED query + compositor key simulation.
///
/// Only Num Lock is reachable this way.
pub struct CompositorBackend<'a> {
    compositor: &'a dyn CompositorKeyboard,
    settle_delay: Duration,
    simulation_code: i32,
}

impl<'a> CompositorBackend<'a> {
    pub fn new(
        compositor: &'a dyn CompositorKeyboard,
        settle_delay: Duration,
        simulation_code: i32,
    ) -> Self {
        Self {
            compositor,
            settle_delay,
            simulation_code,
        }
    }

    fn require_num_lock(kind: LockKind) -> Result<()> {
        match kind {
            LockKind::NumLock => Ok(()),
            LockKind::CapsLock => Err(Error::NotSupported(format!(
                "{kind} has no compositor path"
            ))),
        }
    }
}

impl LockBackend for CompositorBackend<'_> {
    fn backend(&self) -> Backend {
        Backend::Compositor
    }

    fn probe_state(&self, kind: LockKind) -> Result<LockState> {
        Self::require_num_lock(kind)?;
        if !self.settle_delay.is_zero() {
            sleep(self.settle_delay);
        }
        probe::compositor_num_lock(self.compositor)
    }

    fn toggle(&self, kind: LockKind) -> Result<()> {
        Self::require_num_lock(kind)?;
        self.compositor.simulate_key(self.simulation_code)
    }
}
