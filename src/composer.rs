//! Contact message composer.
//!
//! Builds the message a worker sends to the union local, either the generic
//! request or one prefilled from a logged note, and the `mailto:` link that
//! carries it.
use crate::{Language, Note};

/// Default recipient of contact messages.
pub const CONTACT_EMAIL: &str = "10008@ute-sei.org";

/// Phone number shown next to the email address.
pub const CONTACT_PHONE: &str = "(438) 788-0300";

/// Default email subject line.
pub const CONTACT_SUBJECT: &str = "Demande d'accompagnement - Section locale 10008";

/// The generic request, with the meeting date and time filled in.
pub fn default_message(language: Language, date: &str, time: &str) -> String {
    match language {
        Language::Fr => format!(
            "Bonjour,\n\n\
             Je vous écris parce qu'un·e gestionnaire veut me rencontrer / m'a rencontré·e aujourd'hui.\n\n\
             Date : {date}\n\
             Heure : {time}\n\
             Gestionnaire : [nom]\n\
             Sujet annoncé : [sujet]\n\n\
             J'aimerais être accompagné·e par le syndicat ou obtenir des conseils.\n\n\
             Merci."
        ),
        Language::En => format!(
            "Hello,\n\n\
             I am writing because a manager wants to meet with me / met with me today.\n\n\
             Date: {date}\n\
             Time: {time}\n\
             Manager: [name]\n\
             Subject: [subject]\n\n\
             I would like to be accompanied by the union or get advice.\n\n\
             Thank you."
        ),
    }
}

/// A request prefilled from a logged note.
///
/// Empty fields are replaced by placeholders so the message always reads as
/// a complete letter.
pub fn note_message(language: Language, note: &Note) -> String {
    let or = |value: &str, placeholder: &str| {
        if value.trim().is_empty() {
            placeholder.to_string()
        } else {
            value.to_string()
        }
    };

    match language {
        Language::Fr => format!(
            "Bonjour,\n\n\
             Je vous écris parce qu'un·e gestionnaire veut me rencontrer / m'a rencontré·e aujourd'hui.\n\n\
             Date : {}\n\
             Heure : {}\n\
             Gestionnaire : {}\n\
             Sujet annoncé : {}\n\n\
             Ce qui s'est passé :\n{}\n\n\
             Témoins / Autres détails :\n{}\n\n\
             J'aimerais être accompagné·e par le syndicat ou obtenir des conseils.\n\n\
             Merci.",
            note.date,
            note.time,
            or(&note.manager_name, "[nom]"),
            or(&note.subject, "[sujet]"),
            or(&note.description, "(Aucune note)"),
            or(&note.witnesses, "(Aucun)"),
        ),
        Language::En => format!(
            "Hello,\n\n\
             I am writing because a manager wants to meet with me / met with me today.\n\n\
             Date: {}\n\
             Time: {}\n\
             Manager: {}\n\
             Subject: {}\n\n\
             What happened:\n{}\n\n\
             Witnesses / Other details:\n{}\n\n\
             I would like to be accompanied by the union or get advice.\n\n\
             Thank you.",
            note.date,
            note.time,
            or(&note.manager_name, "[name]"),
            or(&note.subject, "[subject]"),
            or(&note.description, "(No note)"),
            or(&note.witnesses, "(None)"),
        ),
    }
}

/// Builds a `mailto:` URL with the subject and body percent-encoded.
pub fn mailto_url(recipient: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(subject),
        urlencoding::encode(body)
    )
}
