//! Error types for lock-state synchronization.

use crate::keysym::KeyCode;
use crate::lock::LockKind;
use std::fmt;
use thiserror::Error;

/// Result type alias for locksync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which half of a press/release cycle failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Press,
    Release,
}

impl fmt::Display for KeyPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPhase::Press => f.write_str("press"),
            KeyPhase::Release => f.write_str("release"),
        }
    }
}

/// Errors that can occur while probing or changing lock state.
///
/// Nothing inside the crate retries on any of these; the caller owns the
/// retry policy.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested target was not `Off` or `On`.
    #[error("invalid {0} target state")]
    InvalidTarget(LockKind),

    /// The modifier state could not be queried.
    #[error("failed to query lock state: {0}")]
    Probe(String),

    /// The keysym is not bound to any keycode in the current mapping.
    #[error("no keycode bound to {name}")]
    Resolve {
        /// Keysym name that was looked up.
        name: String,
    },

    /// The display rejected a synthetic key event.
    #[error("failed to synthesize key {phase} for keycode {code}: {reason}")]
    Synthesis {
        /// Keycode the event was addressed with.
        code: KeyCode,
        /// Half of the cycle that failed.
        phase: KeyPhase,
        /// Why the display rejected it.
        reason: String,
    },

    /// A session-bus call failed or returned an unusable reply.
    #[error("remote call failed: {0}")]
    RemoteCall(String),

    /// The adapter cannot work in this environment.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Platform-specific error.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidTarget,
    ProbeFailure,
    ResolveFailure,
    SynthesisFailure,
    RemoteCallFailure,
    Unsupported,
    Platform,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidTarget(_) => ErrorKind::InvalidTarget,
            Error::Probe(_) => ErrorKind::ProbeFailure,
            Error::Resolve { .. } => ErrorKind::ResolveFailure,
            Error::Synthesis { .. } => ErrorKind::SynthesisFailure,
            Error::RemoteCall(_) => ErrorKind::RemoteCallFailure,
            Error::NotSupported(_) => ErrorKind::Unsupported,
            Error::Platform(_) => ErrorKind::Platform,
        }
    }
}

#[cfg(all(target_os = "linux", feature = "compositor"))]
impl From<zbus::Error> for Error {
    fn from(err: zbus::Error) -> Self {
        Error::RemoteCall(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::Synthesis {
            code: KeyCode::new(77),
            phase: KeyPhase::Press,
            reason: "XTestFakeKeyEvent failed".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to synthesize key press for keycode 77: XTestFakeKeyEvent failed"
        );

        let err = Error::Resolve {
            name: "Num_Lock".into(),
        };
        assert_eq!(err.to_string(), "no keycode bound to Num_Lock");
        assert_eq!(
            Error::InvalidTarget(LockKind::CapsLock).to_string(),
            "invalid Caps Lock target state"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            Error::InvalidTarget(LockKind::NumLock).kind(),
            ErrorKind::InvalidTarget
        );
        assert_eq!(Error::Probe("x".into()).kind(), ErrorKind::ProbeFailure);
        assert_eq!(
            Error::RemoteCall("x".into()).kind(),
            ErrorKind::RemoteCallFailure
        );
    }
}
