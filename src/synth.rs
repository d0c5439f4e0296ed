//! Synthetic key press/release through the display's fake-input facility.

use crate::display::{DisplayConnection, FakeEventType, FakeInput};
use crate::error::{Error, KeyPhase, Result};
use crate::keysym::KeyCode;

/// Press and release `code` on the root window.
///
/// Each half is checked on its own. A failed press returns immediately and
/// the release is never sent, which leaves the lock state indeterminate
/// until the caller probes again.
pub fn press_release<D: DisplayConnection + ?Sized>(display: &D, code: KeyCode) -> Result<()> {
    let root = display.root_window();

    display
        .send_fake_input(FakeInput::key(FakeEventType::KeyPress, code, root))
        .map_err(|e| synthesis_error(code, KeyPhase::Press, e))?;

    display
        .send_fake_input(FakeInput::key(FakeEventType::KeyRelease, code, root))
        .map_err(|e| synthesis_error(code, KeyPhase::Release, e))?;

    Ok(())
}

fn synthesis_error(code: KeyCode, phase: KeyPhase, cause: Error) -> Error {
    log::debug!("fake key {phase} for keycode {code} rejected: {cause}");
    Error::Synthesis {
        code,
        phase,
        reason: cause.to_string(),
    }
}
