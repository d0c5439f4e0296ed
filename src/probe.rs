//! Read-only lock state queries.

use crate::compositor::CompositorKeyboard;
use crate::display::DisplayConnection;
use crate::error::Result;
use crate::lock::{LockKind, LockState};

/// Query the state of `kind` from the root window's modifier mask.
///
/// Never returns `LockState::Unknown` on success; a failed query is an
/// [`Error::Probe`](crate::Error::Probe).
pub fn probe<D: DisplayConnection + ?Sized>(display: &D, kind: LockKind) -> Result<LockState> {
    let root = display.root_window();
    let mask = display.query_pointer_mask(root)?;
    log::debug!("query pointer mask {mask:#06x} for {kind}");
    Ok(LockState::from_mask(kind, mask))
}

/// Like [`probe`], but reports a failed query as `LockState::Unknown`.
pub fn probe_or_unknown<D: DisplayConnection + ?Sized>(display: &D, kind: LockKind) -> LockState {
    probe(display, kind).unwrap_or(LockState::Unknown)
}

/// Query Num Lock from the compositor's LED word.
pub fn compositor_num_lock<C: CompositorKeyboard + ?Sized>(compositor: &C) -> Result<LockState> {
    let leds = compositor.get_leds()?;
    log::debug!("compositor leds {leds:#x}");
    Ok(LockState::from_leds(leds))
}
