//! Reconciler configuration.

use crate::compositor::NUM_LOCK_SIMULATION_CODE;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Delay before querying the compositor's LED state.
///
/// The compositor-side daemon reads the LEDs at session start too; waiting
/// lets it settle first.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// Tunables for [`LockReconciler`](crate::LockReconciler).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReconcilerConfig {
    /// Wait before the compositor LED query. Zero disables the wait.
    pub settle_delay: Duration,
    /// Code passed to the compositor key simulation to toggle Num Lock.
    pub num_lock_simulation_code: i32,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            num_lock_simulation_code: NUM_LOCK_SIMULATION_CODE,
        }
    }
}

impl ReconcilerConfig {
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_num_lock_simulation_code(mut self, code: i32) -> Self {
        self.num_lock_simulation_code = code;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReconcilerConfig::default();
        assert_eq!(config.settle_delay, Duration::from_millis(200));
        assert_eq!(config.num_lock_simulation_code, 69);
    }

    #[test]
    fn test_builders() {
        let config = ReconcilerConfig::default()
            .with_settle_delay(Duration::ZERO)
            .with_num_lock_simulation_code(77);
        assert_eq!(config.settle_delay, Duration::ZERO);
        assert_eq!(config.num_lock_simulation_code, 77);
    }
}
