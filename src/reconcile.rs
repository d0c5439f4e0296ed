//! Lock-state reconciliation.
//!
//! [`LockReconciler::reconcile`] drives one lock toward a target state:
//!
//! 1. reject `Unknown` targets before touching anything,
//! 2. pick the backend for this kind,
//! 3. probe the current state,
//! 4. toggle once if it differs.
//!
//! Caps Lock always goes through the legacy backend. Num Lock follows the
//! session type, so under a compositor it is read from the compositor's
//! LEDs and flipped with the compositor's key simulation.
//!
//! Every call reprobes. Nothing is retried, and concurrent calls for the
//! same kind are not serialized here.

use crate::backend::{
    Backend, CompositorBackend, LegacyBackend, LockBackend, ProcessEnvironment, SessionEnvironment,
};
use crate::compositor::CompositorKeyboard;
use crate::config::ReconcilerConfig;
use crate::display::DisplayConnection;
use crate::error::{Error, Result};
use crate::keysym::KeySymbolTable;
use crate::lock::{LockKind, LockState};
use crate::observer::{NoopObserver, ReconcileObserver};

static PROCESS_ENVIRONMENT: ProcessEnvironment = ProcessEnvironment;
static NOOP_OBSERVER: NoopObserver = NoopObserver;

/// What a successful reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The lock already matched the target.
    Unchanged,
    /// One toggle was issued.
    Toggled,
}

/// Desired lock states from a settings snapshot. `None` leaves a lock alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockTargets {
    pub num_lock: Option<LockState>,
    pub caps_lock: Option<LockState>,
}

impl LockTargets {
    pub fn get(&self, kind: LockKind) -> Option<LockState> {
        match kind {
            LockKind::NumLock => self.num_lock,
            LockKind::CapsLock => self.caps_lock,
        }
    }
}

/// Brings Num Lock and Caps Lock to requested states.
///
/// All collaborators are borrowed; the reconciler never opens or closes a
/// connection.
pub struct LockReconciler<'a> {
    display: &'a dyn DisplayConnection,
    symbols: &'a dyn KeySymbolTable,
    compositor: Option<&'a dyn CompositorKeyboard>,
    session: &'a dyn SessionEnvironment,
    observer: &'a dyn ReconcileObserver,
    config: ReconcilerConfig,
}

impl<'a> LockReconciler<'a> {
    /// Reconciler reading the session type from the process environment,
    /// with no compositor connection and no observer.
    pub fn new(display: &'a dyn DisplayConnection, symbols: &'a dyn KeySymbolTable) -> Self {
        Self {
            display,
            symbols,
            compositor: None,
            session: &PROCESS_ENVIRONMENT,
            observer: &NOOP_OBSERVER,
            config: ReconcilerConfig::default(),
        }
    }

    pub fn with_compositor(mut self, compositor: &'a dyn CompositorKeyboard) -> Self {
        self.compositor = Some(compositor);
        self
    }

    pub fn with_session(mut self, session: &'a dyn SessionEnvironment) -> Self {
        self.session = session;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn ReconcileObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_config(mut self, config: ReconcilerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    /// Backend `kind` would be handled by right now.
    pub fn backend_for(&self, kind: LockKind) -> Backend {
        match kind {
            LockKind::CapsLock => Backend::Legacy,
            LockKind::NumLock => Backend::detect(self.session),
        }
    }

    /// Drive `kind` to `target`.
    ///
    /// `target` must be `Off` or `On`. Performs at most one toggle.
    pub fn reconcile(&self, kind: LockKind, target: LockState) -> Result<Outcome> {
        let result = self.try_reconcile(kind, target);
        if let Err(err) = &result {
            self.observer.on_error(kind, err);
        }
        result
    }

    /// Reconcile every lock named in `targets`, Num Lock first.
    ///
    /// Each lock is handled independently; a failure on one does not stop
    /// the other.
    pub fn apply(&self, targets: &LockTargets) -> Vec<(LockKind, Result<Outcome>)> {
        LockKind::ALL
            .into_iter()
            .filter_map(|kind| targets.get(kind).map(|target| (kind, target)))
            .map(|(kind, target)| (kind, self.reconcile(kind, target)))
            .collect()
    }

    fn try_reconcile(&self, kind: LockKind, target: LockState) -> Result<Outcome> {
        if !target.is_known() {
            return Err(Error::InvalidTarget(kind));
        }

        match self.backend_for(kind) {
            Backend::Legacy => {
                let backend = LegacyBackend::new(self.display, self.symbols);
                self.drive(&backend, kind, target)
            }
            Backend::Compositor => {
                let compositor = self.compositor.ok_or_else(|| {
                    Error::RemoteCall("no compositor session bus connection".into())
                })?;
                let backend = CompositorBackend::new(
                    compositor,
                    self.config.settle_delay,
                    self.config.num_lock_simulation_code,
                );
                self.drive(&backend, kind, target)
            }
        }
    }

    fn drive(
        &self,
        backend: &dyn LockBackend,
        kind: LockKind,
        target: LockState,
    ) -> Result<Outcome> {
        self.observer.pre_probe(kind, backend.backend());
        let current = backend.probe_state(kind)?;
        if current == target {
            return Ok(Outcome::Unchanged);
        }

        backend.toggle(kind)?;
        self.observer.post_toggle(kind, backend.backend(), target);
        Ok(Outcome::Toggled)
    }
}
