use log::debug;

use crate::{MeetlogError, NoteDraft, Result};

/// Trims every field of a draft and checks the required ones.
///
/// Manager name and subject must be non-empty once trimmed. Description and
/// witnesses may be empty.
pub fn validate_draft(draft: NoteDraft) -> Result<NoteDraft> {
    let draft = NoteDraft {
        date: draft.date.trim().to_string(),
        time: draft.time.trim().to_string(),
        manager_name: draft.manager_name.trim().to_string(),
        subject: draft.subject.trim().to_string(),
        description: draft.description.trim().to_string(),
        witnesses: draft.witnesses.trim().to_string(),
    };

    if draft.manager_name.is_empty() {
        debug!("Rejected draft without a manager name");
        return Err(MeetlogError::Validation {
            field: "managerName",
        });
    }

    if draft.subject.is_empty() {
        debug!("Rejected draft without a subject");
        return Err(MeetlogError::Validation { field: "subject" });
    }

    Ok(draft)
}

/// First line of a text, cut to `max_len` characters.
pub fn preview(text: &str, max_len: usize) -> String {
    let first_line = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .trim();

    if first_line.chars().count() <= max_len {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_len).collect();
        format!("{}...", cut)
    }
}
