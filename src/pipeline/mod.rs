pub mod compliance;
pub mod ollama;
pub mod orchestrator;
pub mod prompt;
pub mod template_store;
pub mod treatment_plan;

use thiserror::Error;

/// Errors surfaced by note generation and refinement.
///
/// The compliance filter and treatment plan parser are total functions and
/// never contribute errors. Nothing is retried or suppressed inside the
/// pipeline; every error propagates to the immediate caller.
#[derive(Error, Debug)]
pub enum NoteGenError {
    /// Caller input violated a documented precondition. Raised before any
    /// provider call is attempted; the HTTP layer maps this to a 4xx.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The completion provider call failed or returned unusable content.
    /// Transient and permanent failures are reported identically; the HTTP
    /// layer maps this to a 5xx.
    #[error("completion provider failed: {0}")]
    Provider(String),
}
