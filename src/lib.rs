//! Personal incident log for workplace disciplinary meetings
//!
//! This library keeps meeting notes in a local key-value slot, formats dates
//! and times in French or English, remembers the theme and language
//! preferences, and composes the message asking the union for support.

mod cli;
mod composer;
mod config;
mod datetime;
mod errors;
mod helper;
mod kv;
mod note;
mod platform;
mod preferences;
mod storage;
mod types;

pub mod content;

// Re-export key components
pub use cli::*;
pub use composer::*;
pub use config::*;
pub use datetime::*;
pub use errors::*;
pub use helper::*;
pub use kv::*;
pub use note::*;
pub use platform::*;
pub use preferences::*;
pub use storage::*;
pub use types::*;
