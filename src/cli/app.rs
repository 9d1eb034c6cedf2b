//! CLI module for the meetlog application
//!
//! This module handles the command-line interface for the note store, the
//! preferences and the guidance content. It is the layer that validates
//! input and asks for confirmation before destructive actions.
use std::{
    io::{stdin, stdout, Write},
    sync::Arc,
};

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone};
use log::{debug, warn};
use tokio::sync::Mutex;

use crate::{
    content, default_message, mailto_url, note_message, preview, validate_draft, Commands,
    Config, DateTimeFormatter, Language, MeetlogError, Note, NoteDraft, NoteStore, Platform,
    PreferenceStore, Result,
};

/// CLI Application handler - processes CLI commands against the stores
pub struct App {
    /// The note store
    notes: Arc<Mutex<NoteStore>>,

    /// Theme and language preferences
    preferences: Arc<Mutex<PreferenceStore>>,

    /// Host signals used to resolve the theme
    platform: Arc<dyn Platform + Send + Sync>,

    /// Application configuration
    config: Config,
}

/// Output of a command that changes state, so callers can tell a no-op from
/// a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Created(String),
    Cancelled,
}

impl App {
    pub fn new(
        notes: Arc<Mutex<NoteStore>>,
        preferences: Arc<Mutex<PreferenceStore>>,
        platform: Arc<dyn Platform + Send + Sync>,
        config: Config,
    ) -> Self {
        Self {
            notes,
            preferences,
            platform,
            config,
        }
    }

    /// Run the CLI application with the given command
    pub async fn run(&self, command: Commands) -> Result<Outcome> {
        match command {
            Commands::Add {
                manager,
                subject,
                at,
                description,
                witnesses,
            } => {
                let moment = parse_moment(at.as_deref())?;
                let draft = NoteDraft {
                    date: moment.clone(),
                    time: moment,
                    manager_name: manager,
                    subject,
                    description,
                    witnesses,
                };
                self.add_note(draft).await
            }

            Commands::List { json, brief } => self.list_notes(json, brief).await,

            Commands::View { id, json } => self.view_note(&id, json).await,

            Commands::Edit {
                id,
                manager,
                subject,
                at,
                description,
                witnesses,
            } => {
                let moment = at.as_deref().map(|at| parse_moment(Some(at))).transpose()?;
                self.edit_note(&id, manager, subject, moment, description, witnesses)
                    .await
            }

            Commands::Delete { id, force } => self.delete_note(&id, force).await,

            Commands::Theme { toggle } => self.handle_theme(toggle).await,

            Commands::Language { toggle, set } => self.handle_language(toggle, set).await,

            Commands::Contact { note, mailto } => self.handle_contact(note, mailto).await,

            Commands::Phrases => {
                let language = self.language().await;
                print_numbered(content::phrases(language));
                Ok(Outcome::Done)
            }

            Commands::Emergency => {
                let language = self.language().await;
                print_numbered(content::emergency_rights(language));
                Ok(Outcome::Done)
            }

            Commands::Rights => {
                let language = self.language().await;
                print_rights(content::rights_title(language), content::rights(language));
                Ok(Outcome::Done)
            }
        }
    }

    /// The language to display in: the config override, else the stored
    /// preference.
    async fn language(&self) -> Language {
        match self.config.language {
            Some(language) => language,
            None => self.preferences.lock().await.language(),
        }
    }

    async fn formatter(&self) -> DateTimeFormatter {
        DateTimeFormatter::new(self.language().await)
    }

    async fn add_note(&self, draft: NoteDraft) -> Result<Outcome> {
        let draft = validate_draft(draft)?;
        let id = self.notes.lock().await.add(draft).await?;
        println!("Note created with ID: {}", id);
        Ok(Outcome::Created(id))
    }

    async fn list_notes(&self, json: bool, brief: bool) -> Result<Outcome> {
        let notes = self.notes.lock().await.list().to_vec();

        if json {
            println!("{}", serde_json::to_string_pretty(&notes)?);
            return Ok(Outcome::Done);
        }

        if notes.is_empty() {
            println!("No notes yet.");
            return Ok(Outcome::Done);
        }

        let formatter = self.formatter().await;
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, note) in notes.iter().enumerate() {
            if brief {
                println!(
                    "{}  {}  {}",
                    note.id,
                    formatter.format_date_str(&note.date),
                    note.subject
                );
                continue;
            }

            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }
            println!(
                "ID: {} | {} {}",
                note.id,
                formatter.format_date_str(&note.date),
                formatter.format_time_str(&note.time)
            );
            println!("Manager: {}", console::style(&note.manager_name).bold());
            println!("Subject: {}", console::style(&note.subject).cyan());

            let summary = preview(&note.description, 100);
            if !summary.is_empty() {
                println!("\n{}", summary);
            }
        }

        println!(
            "\n{} note{}",
            notes.len(),
            if notes.len() == 1 { "" } else { "s" }
        );
        Ok(Outcome::Done)
    }

    async fn view_note(&self, id: &str, json: bool) -> Result<Outcome> {
        let note = self.find_note(id).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&note)?);
        } else {
            println!("{}", note.report(&self.formatter().await));
        }
        Ok(Outcome::Done)
    }

    /// Merges the given fields into the existing note and replaces it as a
    /// whole.
    async fn edit_note(
        &self,
        id: &str,
        manager: Option<String>,
        subject: Option<String>,
        moment: Option<String>,
        description: Option<String>,
        witnesses: Option<String>,
    ) -> Result<Outcome> {
        let existing = self.find_note(id).await?;
        let mut draft = existing.to_draft();

        if let Some(moment) = moment {
            draft.date = moment.clone();
            draft.time = moment;
        }
        if let Some(manager) = manager {
            draft.manager_name = manager;
        }
        if let Some(subject) = subject {
            draft.subject = subject;
        }
        if let Some(description) = description {
            draft.description = description;
        }
        if let Some(witnesses) = witnesses {
            draft.witnesses = witnesses;
        }

        let draft = validate_draft(draft)?;
        if !self.notes.lock().await.update(id, draft).await? {
            return Err(MeetlogError::NoteNotFound { id: id.to_string() });
        }

        println!("Note {} updated.", id);
        Ok(Outcome::Done)
    }

    async fn delete_note(&self, id: &str, force: bool) -> Result<Outcome> {
        // Fetch the note first so the prompt can show what is being deleted
        let note = self.find_note(id).await?;

        if !force {
            let formatter = self.formatter().await;
            println!("You are about to delete the following note:");
            println!("ID:       {}", note.id);
            println!(
                "Date:     {} {}",
                formatter.format_date_str(&note.date),
                formatter.format_time_str(&note.time)
            );
            println!("Manager:  {}", note.manager_name);
            println!("Subject:  {}", note.subject);

            println!("\nThis action cannot be undone!");
            print!("Are you sure you want to delete this note? [y/N]: ");
            stdout().flush()?;

            let mut input = String::new();
            stdin().read_line(&mut input)?;

            let input = input.trim().to_lowercase();
            if input != "y" && input != "yes" {
                println!("Deletion cancelled.");
                return Ok(Outcome::Cancelled);
            }
        }

        self.notes.lock().await.delete(id).await?;
        println!("Note {} has been permanently deleted.", note.id);
        Ok(Outcome::Done)
    }

    async fn handle_theme(&self, toggle: bool) -> Result<Outcome> {
        let mut preferences = self.preferences.lock().await;

        if toggle {
            preferences.toggle_theme().await?;
        }

        let effective = preferences.effective_theme(self.platform.as_ref());
        println!(
            "Theme: {} (showing {:?})",
            preferences.theme_mode(),
            effective
        );
        Ok(Outcome::Done)
    }

    async fn handle_language(&self, toggle: bool, set: Option<String>) -> Result<Outcome> {
        let mut preferences = self.preferences.lock().await;

        if toggle {
            preferences.toggle_language().await?;
        } else if let Some(code) = set {
            preferences.set_language(code.parse()?).await?;
        }

        if let Some(forced) = self.config.language {
            warn!("Configuration forces language '{}'", forced);
        }
        println!("Language: {}", preferences.language());
        Ok(Outcome::Done)
    }

    async fn handle_contact(&self, note_id: Option<String>, mailto: bool) -> Result<Outcome> {
        let language = self.language().await;
        let formatter = DateTimeFormatter::new(language);

        let message = match note_id {
            Some(id) => {
                let mut note = self.find_note(&id).await?;
                note.date = formatter.format_date_str(&note.date);
                note.time = formatter.format_time_str(&note.time);
                note_message(language, &note)
            }
            None => {
                let now = Local::now();
                default_message(
                    language,
                    &formatter.format_date(&now),
                    &formatter.format_time(&now),
                )
            }
        };

        if mailto {
            println!(
                "{}",
                mailto_url(&self.config.contact_email, &self.config.email_subject, &message)
            );
        } else {
            println!("Email: {}", self.config.contact_email);
            println!("Phone: {}", self.config.contact_phone);
            println!("{}", "-".repeat(40));
            println!("{}", message);
        }
        Ok(Outcome::Done)
    }

    async fn find_note(&self, id: &str) -> Result<Note> {
        self.notes
            .lock()
            .await
            .get_by_id(id)
            .cloned()
            .ok_or_else(|| MeetlogError::NoteNotFound { id: id.to_string() })
    }
}

fn print_numbered(lines: &[&str]) {
    for (i, line) in lines.iter().enumerate() {
        println!("{}. {}", i + 1, line);
    }
}

fn print_rights(title: &str, sections: &[content::RightsSection]) {
    println!("{}", console::style(title).bold().underlined());
    for section in sections {
        println!("\n{}", console::style(section.title).bold());
        for paragraph in section.paragraphs {
            println!("{}", paragraph);
        }
        for bullet in section.bullets {
            println!("  - {}", bullet);
        }
    }
}

/// Turns a "YYYY-MM-DD HH:MM" local time (or nothing, meaning now) into the
/// RFC 3339 instant new notes are stored with.
fn parse_moment(input: Option<&str>) -> Result<String> {
    let instant: DateTime<Local> = match input {
        None => Local::now(),
        Some(raw) => {
            let naive = NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M")
                .or_else(|_| NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M"))
                .map_err(|_| MeetlogError::InvalidDateTime {
                    value: raw.to_string(),
                })?;
            Local
                .from_local_datetime(&naive)
                .earliest()
                .ok_or_else(|| MeetlogError::InvalidDateTime {
                    value: raw.to_string(),
                })?
        }
    };

    debug!("Meeting time resolved to {}", instant);
    Ok(instant.to_rfc3339_opts(SecondsFormat::Secs, false))
}
