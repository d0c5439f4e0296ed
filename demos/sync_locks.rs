//! Lock state synchronization example.
//!
//! Run with: cargo run --example sync_locks -- [num|caps] [on|off]
//!
//! WARNING: This will actually toggle your keyboard locks!

use locksync::{
    Backend, KWinKeyboard, LockKind, LockReconciler, LockState, LogObserver, ProcessEnvironment,
    XlibDisplay, probe_or_unknown,
};

fn parse_kind(arg: &str) -> Option<LockKind> {
    match arg {
        "num" => Some(LockKind::NumLock),
        "caps" => Some(LockKind::CapsLock),
        _ => None,
    }
}

fn parse_state(arg: &str) -> Option<LockState> {
    match arg {
        "on" => Some(LockState::On),
        "off" => Some(LockState::Off),
        _ => None,
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (Some(kind), Some(target)) = (
        args.first().and_then(|a| parse_kind(a)),
        args.get(1).and_then(|a| parse_state(a)),
    ) else {
        eprintln!("usage: sync_locks [num|caps] [on|off]");
        std::process::exit(2);
    };

    let display = match XlibDisplay::open() {
        Ok(display) => display,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mapping = match display.keyboard_mapping() {
        Ok(mapping) => mapping,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // Only needed when Num Lock goes through the compositor.
    let bus = if Backend::detect(&ProcessEnvironment) == Backend::Compositor {
        match zbus::blocking::Connection::session() {
            Ok(bus) => Some(KWinKeyboard::new(&bus)),
            Err(e) => {
                eprintln!("Warning: no session bus: {}", e);
                None
            }
        }
    } else {
        None
    };

    let observer = LogObserver;
    let mut reconciler = LockReconciler::new(&display, &mapping).with_observer(&observer);
    if let Some(compositor) = &bus {
        reconciler = reconciler.with_compositor(compositor);
    }

    println!("locksync example");
    println!("================\n");
    println!("{} is {}", kind, probe_or_unknown(&display, kind));
    println!(
        "Setting {} {} via the {} backend...",
        kind,
        target,
        reconciler.backend_for(kind)
    );

    match reconciler.reconcile(kind, target) {
        Ok(outcome) => println!("   Done! ({:?})", outcome),
        Err(e) => {
            eprintln!("   Error: {}", e);
            std::process::exit(1);
        }
    }

    println!("{} is {}", kind, probe_or_unknown(&display, kind));
}
