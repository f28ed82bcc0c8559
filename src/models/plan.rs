use serde::Serialize;

/// One intervention line from a treatment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanIntervention {
    /// Category before the first `" - "` separator, or `"General"` when
    /// the line carried no separator.
    pub category: String,
    pub description: String,
}

/// Structured view of freeform treatment-plan text.
///
/// Derived fresh from `SessionInput::session_treatment_plan` on every
/// prompt build and discarded after use; never persisted. Any or all of
/// the collections may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedTreatmentPlan {
    pub long_term_goals: Vec<String>,
    pub short_term_goals: Vec<String>,
    pub interventions: Vec<PlanIntervention>,
}

impl ParsedTreatmentPlan {
    pub fn is_empty(&self) -> bool {
        self.long_term_goals.is_empty()
            && self.short_term_goals.is_empty()
            && self.interventions.is_empty()
    }
}
