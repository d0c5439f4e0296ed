//! Extension points invoked while reconciling.

use crate::backend::Backend;
use crate::error::Error;
use crate::lock::{LockKind, LockState};

/// Observes a reconciliation without taking part in it.
///
/// All methods default to doing nothing.
pub trait ReconcileObserver {
    /// Called right before the current state is probed.
    fn pre_probe(&self, _kind: LockKind, _backend: Backend) {}

    /// Called after a toggle was issued successfully.
    fn post_toggle(&self, _kind: LockKind, _backend: Backend, _target: LockState) {}

    /// Called once for every failed reconciliation, before it is returned.
    fn on_error(&self, _kind: LockKind, _error: &Error) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ReconcileObserver for NoopObserver {}

/// Observer that reports through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ReconcileObserver for LogObserver {
    fn pre_probe(&self, kind: LockKind, backend: Backend) {
        log::debug!("probing {kind} via {backend} backend");
    }

    fn post_toggle(&self, kind: LockKind, backend: Backend, target: LockState) {
        log::debug!("toggled {kind} {target} via {backend} backend");
    }

    fn on_error(&self, kind: LockKind, error: &Error) {
        log::warn!("failed to set {kind}: {error}");
    }
}
