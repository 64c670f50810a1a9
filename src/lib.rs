//! A CHIP-8 virtual machine with a terminal front end.
//!
//! The machine itself lives in [`interpreter`]: 4K of RAM with the hex
//! font baked into the reserved low pages, sixteen 8-bit registers, a
//! 16-entry call stack, two 60Hz timers, a 64x32 monochrome framebuffer
//! and a 16-key pad. It executes the original 35 instructions and nothing
//! else.
//!
//! The core is clocked from outside:
//!
//! * `step()` runs one fetch-decode-execute cycle; call it at whatever
//!   instruction rate suits the program (the driver in `main` runs 10 per
//!   frame at 60Hz, so ~600/s)
//! * `tick_60hz()` winds the delay and sound timers down and reports the
//!   instant the sound timer expires
//! * `key_event()` pushes key presses and releases in
//!
//! Everything around the core is a replaceable collaborator behind a
//! trait: [`display::Display`] puts the framebuffer on a screen (here, a
//! TUI canvas), [`input::Input`] produces key events (here, crossterm in
//! raw mode), [`sound::Sound`] holds the beep. Fatal machine faults are
//! [`error::Chip8Error`]; the driver stops on the first one.

pub mod display;
pub mod error;
pub mod input;
pub mod interpreter;
pub mod memory;
pub mod sound;
