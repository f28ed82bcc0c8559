//! Note generation and refinement orchestration.
//!
//! validate, build prompt, one provider call, compliance filter. The
//! filter runs on every successful path; raw model output never leaves
//! this module. Persistence belongs to the caller.

use crate::config::NoteGenConfig;
use crate::models::{SectionTemplate, SessionInput};

use super::compliance;
use super::ollama::CompletionProvider;
use super::prompt::{self, NOTE_SYSTEM_PROMPT};
use super::template_store::TemplateStore;
use super::NoteGenError;

/// Request-scoped note pipeline over a completion provider.
///
/// Holds no mutable state; concurrent requests against one instance are
/// fully independent.
pub struct NotePipeline<'a, P: CompletionProvider> {
    provider: &'a P,
    config: NoteGenConfig,
}

impl<'a, P: CompletionProvider> NotePipeline<'a, P> {
    pub fn new(provider: &'a P, config: NoteGenConfig) -> Self {
        Self { provider, config }
    }

    /// Generate a session note.
    ///
    /// Preconditions are checked before any provider call: non-empty
    /// location, positive duration, at least one objective.
    pub fn generate(
        &self,
        session: &SessionInput,
        template: Option<&SectionTemplate>,
    ) -> Result<String, NoteGenError> {
        validate_session(session)?;

        let user_prompt = prompt::build_generation_prompt(session, template);
        tracing::debug!(
            prompt_chars = user_prompt.len(),
            templated = template.is_some(),
            "generation prompt assembled"
        );

        let raw = self.provider.complete(
            NOTE_SYSTEM_PROMPT,
            &user_prompt,
            self.config.generation_temperature,
            self.config.max_tokens,
        )?;
        finish(raw)
    }

    /// Refine an existing note against staff feedback.
    ///
    /// `context` is optional: refinement can lean entirely on the note
    /// text when the session fields are no longer at hand.
    pub fn refine(
        &self,
        current_note: &str,
        feedback: &str,
        context: Option<&SessionInput>,
        template: Option<&SectionTemplate>,
    ) -> Result<String, NoteGenError> {
        if current_note.trim().is_empty() {
            return Err(NoteGenError::Validation(
                "a current note is required for refinement".into(),
            ));
        }
        if feedback.trim().is_empty() {
            return Err(NoteGenError::Validation(
                "feedback is required for refinement".into(),
            ));
        }

        let user_prompt = prompt::build_refinement_prompt(current_note, feedback, context, template);
        tracing::debug!(prompt_chars = user_prompt.len(), "refinement prompt assembled");

        let raw = self.provider.complete(
            NOTE_SYSTEM_PROMPT,
            &user_prompt,
            self.config.refinement_temperature,
            self.config.max_tokens,
        )?;
        finish(raw)
    }

    /// Generate using the currently active admin template, read once.
    pub fn generate_with_store<S: TemplateStore>(
        &self,
        session: &SessionInput,
        store: &S,
    ) -> Result<String, NoteGenError> {
        let template = store.active_template();
        self.generate(session, template.as_ref())
    }

    /// Refine using the currently active admin template, read once.
    pub fn refine_with_store<S: TemplateStore>(
        &self,
        current_note: &str,
        feedback: &str,
        context: Option<&SessionInput>,
        store: &S,
    ) -> Result<String, NoteGenError> {
        let template = store.active_template();
        self.refine(current_note, feedback, context, template.as_ref())
    }
}

fn validate_session(session: &SessionInput) -> Result<(), NoteGenError> {
    if session.location.trim().is_empty() {
        return Err(NoteGenError::Validation("location is required".into()));
    }
    if session.duration_minutes == 0 {
        return Err(NoteGenError::Validation(
            "duration must be a positive number of minutes".into(),
        ));
    }
    if session.objectives.is_empty() {
        return Err(NoteGenError::Validation(
            "at least one objective is required".into(),
        ));
    }
    Ok(())
}

/// An empty completion is unusable content, reported like any other
/// provider failure. Everything else goes through the compliance filter.
fn finish(raw: String) -> Result<String, NoteGenError> {
    if raw.trim().is_empty() {
        return Err(NoteGenError::Provider(
            "provider returned an empty completion".into(),
        ));
    }
    Ok(compliance::apply(&raw))
}
