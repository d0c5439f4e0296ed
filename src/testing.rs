//! Recording fakes for the collaborator traits.

use crate::backend::Backend;
use crate::compositor::{CompositorKeyboard, NUM_LOCK_SIMULATION_CODE};
use crate::display::{DisplayConnection, FakeEventType, FakeInput, Window};
use crate::error::{Error, Result};
use crate::keysym::{KeyCode, KeySymbolTable, KeyboardMapping, NO_SYMBOL, XK_CAPS_LOCK, XK_NUM_LOCK};
use crate::lock::{LED_NUM_LOCK, LockKind, LockState, MASK_LOCK, MASK_MOD2};
use crate::observer::ReconcileObserver;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub const ROOT: Window = 0x1e3;
pub const CAPS_LOCK_CODE: KeyCode = KeyCode::new(66);
pub const NUM_LOCK_CODE: KeyCode = KeyCode::new(77);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    QueryPointer,
    FakeInput(FakeInput),
    GetLeds,
    SimulateKey(i32),
}

/// Display whose lock bits flip when a bound key completes a press/release.
pub struct FakeDisplay {
    mask: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    fail_query: Cell<bool>,
    fail_event: Cell<Option<FakeEventType>>,
    bindings: RefCell<HashMap<KeyCode, u32>>,
}

impl FakeDisplay {
    pub fn with_mask(mask: u32) -> Self {
        Self {
            mask: Cell::new(mask),
            calls: RefCell::new(Vec::new()),
            fail_query: Cell::new(false),
            fail_event: Cell::new(None),
            bindings: RefCell::new(HashMap::new()),
        }
    }

    /// Display with the standard lock keys bound and both locks in `state`.
    pub fn with_locks(num: LockState, caps: LockState) -> Self {
        let mut mask = 0;
        if num == LockState::On {
            mask |= MASK_MOD2;
        }
        if caps == LockState::On {
            mask |= MASK_LOCK;
        }
        let display = Self::with_mask(mask);
        display.bind(NUM_LOCK_CODE, MASK_MOD2);
        display.bind(CAPS_LOCK_CODE, MASK_LOCK);
        display
    }

    pub fn bind(&self, code: KeyCode, mask: u32) {
        self.bindings.borrow_mut().insert(code, mask);
    }

    pub fn fail_query(&self) {
        self.fail_query.set(true);
    }

    pub fn fail_fake_input(&self, event: FakeEventType) {
        self.fail_event.set(Some(event));
    }

    pub fn mask(&self) -> u32 {
        self.mask.get()
    }

    pub fn state(&self, kind: LockKind) -> LockState {
        LockState::from_mask(kind, self.mask.get())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn fake_inputs(&self) -> Vec<FakeInput> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::FakeInput(input) => Some(*input),
                _ => None,
            })
            .collect()
    }
}

impl DisplayConnection for FakeDisplay {
    fn root_window(&self) -> Window {
        ROOT
    }

    fn query_pointer_mask(&self, root: Window) -> Result<u32> {
        assert_eq!(root, ROOT);
        self.calls.borrow_mut().push(Call::QueryPointer);
        if self.fail_query.get() {
            return Err(Error::Probe("QueryPointer failed".into()));
        }
        Ok(self.mask.get())
    }

    fn send_fake_input(&self, input: FakeInput) -> Result<()> {
        self.calls.borrow_mut().push(Call::FakeInput(input));
        if self.fail_event.get() == Some(input.event) {
            return Err(Error::Platform("BadValue".into()));
        }
        if input.event == FakeEventType::KeyRelease
            && let Some(bit) = self.bindings.borrow().get(&input.code)
        {
            self.mask.set(self.mask.get() ^ bit);
        }
        Ok(())
    }
}

/// Symbol table backed by a [`KeyboardMapping`] that records lookups.
pub struct FakeSymbols {
    mapping: KeyboardMapping,
    lookups: RefCell<Vec<String>>,
}

impl FakeSymbols {
    /// Caps_Lock on 66, Num_Lock on 77.
    pub fn standard() -> Self {
        let mut keysyms = vec![NO_SYMBOL; 248];
        keysyms[usize::from(CAPS_LOCK_CODE.get()) - 8] = XK_CAPS_LOCK;
        keysyms[usize::from(NUM_LOCK_CODE.get()) - 8] = XK_NUM_LOCK;
        Self::from_mapping(KeyboardMapping::new(8, 1, keysyms))
    }

    /// Nothing bound.
    pub fn empty() -> Self {
        Self::from_mapping(KeyboardMapping::new(8, 1, vec![NO_SYMBOL; 248]))
    }

    fn from_mapping(mapping: KeyboardMapping) -> Self {
        Self {
            mapping,
            lookups: RefCell::new(Vec::new()),
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl KeySymbolTable for FakeSymbols {
    fn first_keycode_for(&self, name: &str) -> Result<KeyCode> {
        self.lookups.borrow_mut().push(name.to_string());
        self.mapping.first_keycode_for(name)
    }
}

/// Compositor whose Num Lock LED flips on every simulated Num Lock key.
pub struct FakeCompositor {
    leds: Cell<i32>,
    calls: RefCell<Vec<Call>>,
    fail_get_leds: Cell<bool>,
    fail_simulate: Cell<bool>,
}

impl FakeCompositor {
    pub fn with_leds(leds: i32) -> Self {
        Self {
            leds: Cell::new(leds),
            calls: RefCell::new(Vec::new()),
            fail_get_leds: Cell::new(false),
            fail_simulate: Cell::new(false),
        }
    }

    pub fn fail_get_leds(&self) {
        self.fail_get_leds.set(true);
    }

    pub fn fail_simulate(&self) {
        self.fail_simulate.set(true);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn simulated(&self) -> Vec<i32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::SimulateKey(code) => Some(*code),
                _ => None,
            })
            .collect()
    }
}

impl CompositorKeyboard for FakeCompositor {
    fn get_leds(&self) -> Result<i32> {
        self.calls.borrow_mut().push(Call::GetLeds);
        if self.fail_get_leds.get() {
            return Err(Error::RemoteCall("org.kde.kwin.Xkb.getLeds: no reply".into()));
        }
        Ok(self.leds.get())
    }

    fn simulate_key(&self, code: i32) -> Result<()> {
        self.calls.borrow_mut().push(Call::SimulateKey(code));
        if self.fail_simulate.get() {
            return Err(Error::RemoteCall("WlSimulateKey: access denied".into()));
        }
        if code == NUM_LOCK_SIMULATION_CODE {
            self.leds.set(self.leds.get() ^ LED_NUM_LOCK);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    PreProbe(LockKind, Backend),
    PostToggle(LockKind, Backend, LockState),
    Error(LockKind, String),
}

#[derive(Default)]
pub struct RecordingObserver {
    events: RefCell<Vec<Observed>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Observed> {
        self.events.borrow().clone()
    }
}

impl ReconcileObserver for RecordingObserver {
    fn pre_probe(&self, kind: LockKind, backend: Backend) {
        self.events
            .borrow_mut()
            .push(Observed::PreProbe(kind, backend));
    }

    fn post_toggle(&self, kind: LockKind, backend: Backend, target: LockState) {
        self.events
            .borrow_mut()
            .push(Observed::PostToggle(kind, backend, target));
    }

    fn on_error(&self, kind: LockKind, error: &Error) {
        self.events
            .borrow_mut()
            .push(Observed::Error(kind, error.to_string()));
    }
}
