//! Display-server connection used by the legacy backend.

use crate::error::Result;
use crate::keysym::KeyCode;

/// X window identifier.
pub type Window = u64;

/// `CurrentTime` timestamp.
pub const CURRENT_TIME: u64 = 0;

/// Core protocol event codes accepted by the fake-input request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FakeEventType {
    KeyPress = 2,
    KeyRelease = 3,
}

/// One fake-input request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeInput {
    pub event: FakeEventType,
    pub code: KeyCode,
    pub time: u64,
    pub root: Window,
}

impl FakeInput {
    /// A key event at `CurrentTime` addressed to `root`.
    pub fn key(event: FakeEventType, code: KeyCode, root: Window) -> Self {
        Self {
            event,
            code,
            time: CURRENT_TIME,
            root,
        }
    }
}

/// A connection to the display server.
///
/// The connection is owned by the surrounding daemon; the crate only
/// borrows it. Every call blocks until the server replies.
pub trait DisplayConnection {
    /// Root window of the default screen.
    fn root_window(&self) -> Window;

    /// Key/button modifier mask reported by `QueryPointer` on `root`.
    fn query_pointer_mask(&self, root: Window) -> Result<u32>;

    /// Inject a synthetic event and wait for the server to accept it.
    fn send_fake_input(&self, input: FakeInput) -> Result<()>;
}

impl<T: DisplayConnection + ?Sized> DisplayConnection for &T {
    fn root_window(&self) -> Window {
        (**self).root_window()
    }

    fn query_pointer_mask(&self, root: Window) -> Result<u32> {
        (**self).query_pointer_mask(root)
    }

    fn send_fake_input(&self, input: FakeInput) -> Result<()> {
        (**self).send_fake_input(input)
    }
}
