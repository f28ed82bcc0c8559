use serde::{Deserialize, Serialize};

/// Gender recorded on the client profile, used only for pronoun selection
/// in the prompt. The intake form offers these two values; absence keeps
/// the prompt pronoun-neutral. Additional genders are a documented
/// limitation of the source system, not silently extended here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The pronoun instruction embedded in the prompt preamble.
    pub fn pronoun_clause(&self) -> &'static str {
        match self {
            Self::Male => {
                "Use he/him/his pronouns consistently when referring to the client."
            }
            Self::Female => {
                "Use she/her/hers pronouns consistently when referring to the client."
            }
        }
    }
}

/// Everything the pipeline needs to produce a session note.
///
/// First name only: last names never leave the client record. All fields
/// are request-scoped; nothing here is shared between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInput {
    pub client_first_name: String,
    pub client_gender: Option<Gender>,
    pub location: String,
    pub duration_minutes: u32,
    pub objectives: Vec<String>,
    pub interventions: Vec<String>,
    pub additional_notes: Option<String>,
    /// Freeform treatment-plan text, parsed fresh on every prompt build.
    pub session_treatment_plan: Option<String>,
}
