//! Note-generation configuration.
//!
//! An explicit struct handed to the pipeline at construction time.
//! Nothing in the pipeline reads ambient process state; the embedding
//! application decides where these values come from (config file,
//! environment, admin settings).

use serde::Deserialize;

/// Default completion model requested from the provider.
pub const DEFAULT_MODEL: &str = "llama3.1:8b";

/// Tuning knobs for note generation and refinement.
///
/// Refinement runs cooler than generation: it is an edit of existing
/// text, not fresh composition, so it favors determinism.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NoteGenConfig {
    /// Completion model name.
    pub model: String,
    /// Sampling temperature for initial note generation.
    pub generation_temperature: f32,
    /// Sampling temperature for note refinement.
    pub refinement_temperature: f32,
    /// Maximum output length in tokens, passed through to the provider.
    pub max_tokens: u32,
}

impl Default for NoteGenConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            generation_temperature: 0.85,
            refinement_temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "peernote=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = NoteGenConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!((config.generation_temperature - 0.85).abs() < f32::EPSILON);
        assert!((config.refinement_temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens, 2000);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: NoteGenConfig =
            serde_json::from_str(r#"{"model": "mistral:7b"}"#).unwrap();
        assert_eq!(config.model, "mistral:7b");
        assert!((config.generation_temperature - 0.85).abs() < f32::EPSILON);
        assert_eq!(config.max_tokens, 2000);
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: NoteGenConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!((config.refinement_temperature - 0.7).abs() < f32::EPSILON);
    }
}
