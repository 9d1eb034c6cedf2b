//! Shared types for the meetlog application: the crate `Result` alias and
//! the CLI subcommands.
use clap::Subcommand;

use crate::MeetlogError;

/// A specialized Result type for meetlog operations.
pub type Result<T> = std::result::Result<T, MeetlogError>;

/// Available subcommands for the meetlog application
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a new meeting note
    Add {
        /// Manager who called the meeting
        #[clap(short, long)]
        manager: String,

        /// Subject announced for the meeting
        #[clap(short, long)]
        subject: String,

        /// When the meeting happened, "YYYY-MM-DD HH:MM" local time (default: now)
        #[clap(short, long)]
        at: Option<String>,

        /// What happened
        #[clap(short, long, default_value = "")]
        description: String,

        /// Witnesses or other details
        #[clap(short, long, default_value = "")]
        witnesses: String,
    },

    /// List notes, newest first
    List {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,

        /// Only show note IDs, dates and subjects
        #[clap(short, long)]
        brief: bool,
    },

    /// View a note by ID
    View {
        /// ID of the note to view
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Replace the fields of an existing note
    Edit {
        /// ID of the note to edit
        id: String,

        /// New manager name
        #[clap(short, long)]
        manager: Option<String>,

        /// New subject
        #[clap(short, long)]
        subject: Option<String>,

        /// New meeting date and time, "YYYY-MM-DD HH:MM" local time
        #[clap(short, long)]
        at: Option<String>,

        /// New description
        #[clap(short, long)]
        description: Option<String>,

        /// New witnesses
        #[clap(short, long)]
        witnesses: Option<String>,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: String,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Show or cycle the theme mode (light, dark, system)
    Theme {
        /// Advance to the next mode
        #[clap(short, long)]
        toggle: bool,
    },

    /// Show or change the language
    Language {
        /// Switch between French and English
        #[clap(short, long)]
        toggle: bool,

        /// Set the language explicitly (fr or en)
        #[clap(short, long, conflicts_with = "toggle")]
        set: Option<String>,
    },

    /// Compose a message asking the union for support
    Contact {
        /// Prefill the message from a logged note
        #[clap(short, long)]
        note: Option<String>,

        /// Print a mailto: link instead of the message
        #[clap(short, long)]
        mailto: bool,
    },

    /// Show phrases to use during a meeting
    Phrases,

    /// Show your key rights when called into a meeting
    Emergency,

    /// Show the full guide to your rights in a disciplinary meeting
    Rights,
}
