#![warn(missing_docs)]

//! # tickbar
//!
//! A terminal countdown timer paired with a smoothly animated progress bar,
//! built on [bubbletea-rs](https://github.com/whit3rabbit/bubbletea-rs).
//!
//! The pieces follow the Elm Architecture: each holds its own state, reacts
//! to messages in `update()`, and renders itself in `view()`. All state
//! changes happen on the program's single message loop; timed work is
//! expressed as commands that resolve back into messages.
//!
//! - [`countdown`] — a clock that ticks down once per second and renders as
//!   `MM:SS`.
//! - [`progress`] — a gradient progress bar that eases toward its target
//!   with a spring animation.
//! - [`app`] — wires the two together: a render tick raises the bar's
//!   target as time passes, and the program exits once the bar has visibly
//!   filled.
//! - [`config`] — parses the session length from user input and hands it to
//!   the program.

pub mod app;
pub mod config;
pub mod countdown;
pub mod progress;
