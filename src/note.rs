//! Core data structures for the meetlog application.
//!
//! A [`Note`] is one logged workplace incident. Notes are stored as a JSON
//! array with camelCase field names.
use serde::{Deserialize, Serialize};

use crate::{DateTimeFormatter, Language};

/// Represents a single logged incident
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, a millisecond timestamp rendered as a string
    pub id: String,
    /// Calendar date of the incident, formatted text or an ISO instant
    pub date: String,
    /// Time of day of the incident, formatted text or an ISO instant
    pub time: String,
    pub manager_name: String,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub witnesses: String,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at: i64,
}

/// The user-editable part of a note: everything except `id` and `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub date: String,
    pub time: String,
    pub manager_name: String,
    pub subject: String,
    pub description: String,
    pub witnesses: String,
}

impl Note {
    /// Builds a note from a draft with the given identity.
    pub fn from_draft(id: String, created_at: i64, draft: NoteDraft) -> Self {
        Note {
            id,
            date: draft.date,
            time: draft.time,
            manager_name: draft.manager_name,
            subject: draft.subject,
            description: draft.description,
            witnesses: draft.witnesses,
            created_at,
        }
    }

    /// Replaces every editable field with the draft's values.
    pub fn apply(&mut self, draft: NoteDraft) {
        self.date = draft.date;
        self.time = draft.time;
        self.manager_name = draft.manager_name;
        self.subject = draft.subject;
        self.description = draft.description;
        self.witnesses = draft.witnesses;
    }

    /// Returns the editable fields as a draft.
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            date: self.date.clone(),
            time: self.time.clone(),
            manager_name: self.manager_name.clone(),
            subject: self.subject.clone(),
            description: self.description.clone(),
            witnesses: self.witnesses.clone(),
        }
    }

    /// Renders the whole note as a plain text report, ready to be copied.
    pub fn report(&self, formatter: &DateTimeFormatter) -> String {
        let labels = ReportLabels::for_language(formatter.language());
        let or_na = |value: &str| {
            if value.is_empty() {
                "N/A".to_string()
            } else {
                value.to_string()
            }
        };

        format!(
            "{title}\n\n{date_l}: {date}\n{time_l}: {time}\n{manager_l}: {manager}\n{subject_l}: {subject}\n\n{description_l}:\n{description}\n\n{witnesses_l}:\n{witnesses}",
            title = labels.title,
            date_l = labels.date,
            date = formatter.format_date_str(&self.date),
            time_l = labels.time,
            time = formatter.format_time_str(&self.time),
            manager_l = labels.manager,
            manager = self.manager_name,
            subject_l = labels.subject,
            subject = self.subject,
            description_l = labels.description,
            description = or_na(&self.description),
            witnesses_l = labels.witnesses,
            witnesses = or_na(&self.witnesses),
        )
    }
}

struct ReportLabels {
    title: &'static str,
    date: &'static str,
    time: &'static str,
    manager: &'static str,
    subject: &'static str,
    description: &'static str,
    witnesses: &'static str,
}

impl ReportLabels {
    fn for_language(language: Language) -> Self {
        match language {
            Language::Fr => ReportLabels {
                title: "NOTE DE RENCONTRE",
                date: "Date",
                time: "Heure",
                manager: "Gestionnaire",
                subject: "Sujet",
                description: "Description",
                witnesses: "Témoins",
            },
            Language::En => ReportLabels {
                title: "MEETING NOTE",
                date: "Date",
                time: "Time",
                manager: "Manager",
                subject: "Subject",
                description: "Description",
                witnesses: "Witnesses",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample_note() -> Note {
        Note::from_draft(
            "1700000000000".to_string(),
            1_700_000_000_000,
            NoteDraft {
                date: "2024-03-05".to_string(),
                time: "14:30".to_string(),
                manager_name: "Dupont".to_string(),
                subject: "Retard".to_string(),
                description: String::new(),
                witnesses: "Marie".to_string(),
            },
        )
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(sample_note()).unwrap();

        assert_eq!(json["managerName"], "Dupont");
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert!(json.get("manager_name").is_none());
    }

    #[test]
    fn test_deserializes_record_without_optional_fields() {
        let json = r#"{"id":"1","date":"2024-01-15","time":"09:00","managerName":"A","subject":"B","createdAt":1}"#;
        let note: Note = serde_json::from_str(json).unwrap();

        assert_eq!(note.description, "");
        assert_eq!(note.witnesses, "");
    }

    #[test]
    fn test_apply_replaces_all_editable_fields() {
        let mut note = sample_note();
        let draft = NoteDraft {
            date: "2024-04-01".to_string(),
            time: "08:00".to_string(),
            manager_name: "Martin".to_string(),
            subject: "Absence".to_string(),
            description: "Rencontre courte".to_string(),
            witnesses: String::new(),
        };

        note.apply(draft.clone());

        assert_eq!(note.to_draft(), draft);
        assert_eq!(note.id, "1700000000000");
        assert_eq!(note.created_at, 1_700_000_000_000);
    }

    #[test]
    fn test_report_in_english_marks_empty_fields() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let formatter = DateTimeFormatter::with_offset(Language::En, utc);
        let report = sample_note().report(&formatter);

        assert!(report.starts_with("MEETING NOTE"));
        assert!(report.contains("Date: 3/5/2024"));
        assert!(report.contains("Time: 14:30"));
        assert!(report.contains("Manager: Dupont"));
        assert!(report.contains("Description:\nN/A"));
        assert!(report.contains("Witnesses:\nMarie"));
    }
}
