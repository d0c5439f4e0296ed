//! X11 implementation using Xlib and XTest.

mod display;
mod keymap;
mod simulate;

pub use display::XlibDisplay;
