//! Command-line front end: argument parsing and command handling.
mod app;
mod main;

pub use app::*;
pub use main::*;
