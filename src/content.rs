//! Guidance text shown before and during a meeting with a manager.
use crate::Language;

/// Key rights to remember when called into a meeting.
pub fn emergency_rights(language: Language) -> &'static [&'static str] {
    match language {
        Language::Fr => &[
            "Tu as le droit de demander pourquoi on veut te rencontrer.",
            "Tu as le droit d'être accompagné·e par une personne déléguée syndicale.",
            "Tu peux demander de reporter la rencontre pour obtenir de l'accompagnement.",
            "Tu n'es pas obligé·e de signer un document sur-le-champ.",
            "Prends des notes: date, heure, personnes présentes et ce qui a été dit.",
        ],
        Language::En => &[
            "You have the right to ask why they want to meet with you.",
            "You have the right to be accompanied by a union representative.",
            "You can ask to postpone the meeting to get support.",
            "You do not have to sign any document on the spot.",
            "Take notes: date, time, who was present and what was said.",
        ],
    }
}

/// Phrases a worker can say word for word during the meeting.
pub fn phrases(language: Language) -> &'static [&'static str] {
    match language {
        Language::Fr => &[
            "Est-ce que cette rencontre peut mener à une mesure disciplinaire?",
            "Je souhaite être accompagné·e par mon syndicat avant de poursuivre.",
            "Je préfère ne pas répondre avant d'avoir parlé à mon syndicat.",
            "Pouvez-vous me donner une copie de ce document?",
            "Je vais prendre le temps de lire avant de signer quoi que ce soit.",
            "Je prends des notes de notre rencontre.",
        ],
        Language::En => &[
            "Could this meeting lead to disciplinary action?",
            "I would like to be accompanied by my union before we continue.",
            "I prefer not to answer before speaking with my union.",
            "Can you give me a copy of this document?",
            "I will take the time to read it before signing anything.",
            "I am taking notes of our meeting.",
        ],
    }
}

/// One section of the "know your rights" guide.
#[derive(Debug, Clone, Copy)]
pub struct RightsSection {
    pub title: &'static str,
    pub paragraphs: &'static [&'static str],
    pub bullets: &'static [&'static str],
}

/// Heading of the "know your rights" guide.
pub fn rights_title(language: Language) -> &'static str {
    match language {
        Language::Fr => "Tes droits lors d'une rencontre disciplinaire",
        Language::En => "Your rights in a disciplinary meeting",
    }
}

/// The "know your rights" guide: what the meeting is, what the union can
/// do, what to watch for, and who to call.
pub fn rights(language: Language) -> &'static [RightsSection] {
    match language {
        Language::Fr => &[
            RightsSection {
                title: "Qu'est-ce qu'une rencontre disciplinaire?",
                paragraphs: &[
                    "Une rencontre disciplinaire est une rencontre où ton employeur examine ta conduite ou ton rendement et peut décider d'une mesure contre toi.",
                    "Une rencontre présentée comme informelle peut aussi mener à une mesure disciplinaire. Dans le doute, traite-la comme une rencontre disciplinaire.",
                ],
                bullets: &[],
            },
            RightsSection {
                title: "Ton droit à la représentation syndicale",
                paragraphs: &[
                    "Ta convention collective te donne le droit d'être accompagné·e par une personne représentante syndicale. Elle peut:",
                ],
                bullets: &[
                    "t'aider à préparer la rencontre;",
                    "prendre des notes et poser des questions pendant la rencontre;",
                    "s'assurer que la procédure et tes droits sont respectés.",
                ],
            },
            RightsSection {
                title: "Pendant et après la rencontre",
                paragraphs: &[
                    "Tu peux demander une pause pour consulter ta personne représentante à tout moment.",
                    "Note ce qui s'est dit le plus tôt possible après la rencontre et garde une copie de tout document remis.",
                ],
                bullets: &[],
            },
            RightsSection {
                title: "Joindre la section locale",
                paragraphs: &[
                    "N'attends pas la rencontre pour demander de l'aide. Communique avec nous dès que tu es convoqué·e.",
                    "Section locale 10008: 10008@ute-sei.org, (438) 788-0300",
                ],
                bullets: &[],
            },
        ],
        Language::En => &[
            RightsSection {
                title: "What is a disciplinary meeting?",
                paragraphs: &[
                    "A disciplinary meeting is a meeting where your employer looks at your conduct or performance and may decide on a measure against you.",
                    "A meeting presented as informal can still lead to discipline. When in doubt, treat it as a disciplinary meeting.",
                ],
                bullets: &[],
            },
            RightsSection {
                title: "Your right to union representation",
                paragraphs: &[
                    "Your collective agreement gives you the right to be accompanied by a union representative. They can:",
                ],
                bullets: &[
                    "help you prepare for the meeting;",
                    "take notes and ask questions during the meeting;",
                    "make sure the process and your rights are respected.",
                ],
            },
            RightsSection {
                title: "During and after the meeting",
                paragraphs: &[
                    "You can ask for a break to consult your representative at any time.",
                    "Write down what was said as soon as possible after the meeting and keep a copy of any document you are given.",
                ],
                bullets: &[],
            },
            RightsSection {
                title: "Contact the local",
                paragraphs: &[
                    "Do not wait for the meeting to ask for help. Contact us as soon as you are called in.",
                    "Local 10008: 10008@ute-sei.org, (438) 788-0300",
                ],
                bullets: &[],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_carry_the_same_number_of_entries() {
        assert_eq!(
            emergency_rights(Language::Fr).len(),
            emergency_rights(Language::En).len()
        );
        assert_eq!(phrases(Language::Fr).len(), phrases(Language::En).len());
    }

    #[test]
    fn test_rights_sections_line_up_across_languages() {
        let fr = rights(Language::Fr);
        let en = rights(Language::En);

        assert_eq!(fr.len(), 4);
        assert_eq!(fr.len(), en.len());
        for (fr, en) in fr.iter().zip(en) {
            assert_eq!(fr.paragraphs.len(), en.paragraphs.len());
            assert_eq!(fr.bullets.len(), en.bullets.len());
        }
        assert_eq!(en[1].bullets.len(), 3);
    }
}
