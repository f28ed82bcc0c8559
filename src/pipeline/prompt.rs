//! Prompt assembly for note generation and refinement.
//!
//! Both operations share one section builder parameterized by a mode tag,
//! so the default six-section layout and the compliance preamble are
//! defined exactly once. The caller-facing functions return the user-turn
//! text; the fixed system-role instruction lives here too and is never
//! taken from caller configuration.

use crate::models::{SectionTemplate, SessionInput};

use super::treatment_plan;

/// System-role instruction sent with every generation and refinement call.
pub const NOTE_SYSTEM_PROMPT: &str = r#"You are a documentation assistant for a peer support program. You write session notes on behalf of peer support specialists.

ABSOLUTE RULES — NO EXCEPTIONS:
1. Use peer-support language only. The staff member is a peer support specialist, never a therapist, counselor, or psychologist.
2. Never use clinical or diagnostic terminology. Peer support is not treatment.
3. Refer to the client by first name only. Never write a last name.
4. Write in a professional, strengths-based, recovery-oriented voice.
5. Describe only what the session details support. Do not invent events, quotes, or outcomes."#;

/// Which operation the prompt is being assembled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    Generate,
    Refine,
}

/// Headings of the fixed default layout used when no admin template with
/// visible sections is active.
pub const DEFAULT_HEADINGS: [&str; 6] = [
    "Location of Meeting",
    "Focus of the Meeting",
    "Session Activities",
    "Peer Support Interventions",
    "Client Response",
    "Plan for Next Session",
];

/// Build the user-turn prompt for initial note generation.
pub fn build_generation_prompt(session: &SessionInput, template: Option<&SectionTemplate>) -> String {
    build_prompt(PromptMode::Generate, Some(session), template, None, None)
}

/// Build the user-turn prompt for refining an existing note.
///
/// The current note is embedded verbatim as the primary input; `context`
/// carries whatever session fields the caller still has (refinement may
/// omit them and lean on the note itself).
pub fn build_refinement_prompt(
    current_note: &str,
    feedback: &str,
    context: Option<&SessionInput>,
    template: Option<&SectionTemplate>,
) -> String {
    build_prompt(
        PromptMode::Refine,
        context,
        template,
        Some(current_note),
        Some(feedback),
    )
}

fn build_prompt(
    mode: PromptMode,
    session: Option<&SessionInput>,
    template: Option<&SectionTemplate>,
    current_note: Option<&str>,
    feedback: Option<&str>,
) -> String {
    let mut prompt = String::new();
    push_preamble(&mut prompt, session);

    if mode == PromptMode::Refine {
        prompt.push_str("CURRENT NOTE (primary input, revise this text):\n");
        prompt.push_str(current_note.unwrap_or_default());
        prompt.push_str("\n\nREQUESTED CHANGE:\n");
        prompt.push_str(feedback.unwrap_or_default());
        prompt.push_str("\n\n");
    }

    let active_template = template.filter(|t| t.has_visible_sections());
    match (mode, active_template) {
        (PromptMode::Generate, Some(t)) => {
            prompt.push_str("Write the note with the following sections:\n\n");
            // Validation guarantees a session on the generate path.
            if let Some(session) = session {
                push_template_sections(&mut prompt, t, session);
            }
            prompt.push_str("\nWrite the complete session note now.");
        }
        (PromptMode::Generate, None) => {
            prompt.push_str("Write the note with the following sections:\n\n");
            if let Some(session) = session {
                push_default_sections(&mut prompt, session);
            }
            prompt.push_str("\nWrite the complete session note now.");
        }
        (PromptMode::Refine, Some(t)) => {
            prompt.push_str("Keep the note organized under these headings, in this order:\n");
            for section in t.visible_ordered() {
                prompt.push_str(&format!("- {}\n", section.heading));
            }
            prompt.push_str(
                "\nRewrite the full note applying only the requested change. \
                 Keep everything else intact.",
            );
        }
        (PromptMode::Refine, None) => {
            prompt.push_str("Keep the existing six-section layout (");
            prompt.push_str(&DEFAULT_HEADINGS.join(", "));
            prompt.push_str(
                ").\n\nRewrite the full note applying only the requested change. \
                 Keep everything else intact.",
            );
        }
    }

    prompt
}

/// Fixed compliance preamble plus session metadata. Fields absent from a
/// partial refinement context are simply omitted.
fn push_preamble(prompt: &mut String, session: Option<&SessionInput>) {
    prompt.push_str("COMPLIANCE REQUIREMENTS:\n");
    prompt.push_str("- Peer-support language only; the staff member is a peer support specialist.\n");
    prompt.push_str("- No clinical or diagnostic terms.\n");
    prompt.push_str("- First names only; never include a last name.\n\n");

    let Some(session) = session else {
        return;
    };

    prompt.push_str("SESSION DETAILS:\n");
    if !session.client_first_name.trim().is_empty() {
        prompt.push_str(&format!("Client: {}\n", session.client_first_name));
    }
    if let Some(gender) = session.client_gender {
        prompt.push_str(gender.pronoun_clause());
        prompt.push('\n');
    }
    if session.duration_minutes > 0 {
        prompt.push_str(&format!("Duration: {} minutes\n", session.duration_minutes));
    }
    if !session.location.trim().is_empty() {
        prompt.push_str(&format!("Location: {}\n", session.location));
        prompt.push_str(location_hint(&session.location));
        prompt.push('\n');
    }
    if !session.objectives.is_empty() {
        prompt.push_str("Objectives for this session:\n");
        for objective in &session.objectives {
            prompt.push_str(&format!("- {objective}\n"));
        }
    }
    if let Some(notes) = &session.additional_notes {
        if !notes.trim().is_empty() {
            prompt.push_str(&format!("Additional context from the specialist: {notes}\n"));
        }
    }
    prompt.push('\n');
}

/// Setting guidance keyed off the location string.
fn location_hint(location: &str) -> &'static str {
    let lower = location.to_lowercase();
    if lower.contains("home") || lower.contains("residence") {
        "The session took place in the client's home environment; describe the setting accordingly."
    } else if lower.contains("office") {
        "The session took place in an office setting; describe the setting accordingly."
    } else {
        "Describe the session setting naturally based on the location given."
    }
}

/// Render the admin template's visible sections, in order, with
/// placeholders resolved. Section body shape: heading, then the resolved
/// instructions in brackets, sections separated by a blank line.
fn push_template_sections(prompt: &mut String, template: &SectionTemplate, session: &SessionInput) {
    let bodies: Vec<String> = template
        .visible_ordered()
        .iter()
        .map(|section| {
            format!(
                "{}\n[{}]",
                section.heading,
                substitute_placeholders(&section.instruction_text, session)
            )
        })
        .collect();
    prompt.push_str(&bodies.join("\n\n"));
    prompt.push('\n');
}

/// Literal `{{placeholder}}` substitution: one pass over a fixed mapping.
/// Placeholders with no mapping entry stay in the text untouched.
fn substitute_placeholders(instruction: &str, session: &SessionInput) -> String {
    let mapping: [(&str, String); 6] = [
        ("{{clientName}}", session.client_first_name.clone()),
        ("{{location}}", session.location.clone()),
        ("{{duration}}", session.duration_minutes.to_string()),
        ("{{objectives}}", session.objectives.join(", ")),
        (
            "{{treatmentPlan}}",
            session.session_treatment_plan.clone().unwrap_or_default(),
        ),
        ("{{selectedInterventions}}", session.interventions.join(", ")),
    ];

    let mut resolved = instruction.to_string();
    for (token, value) in mapping {
        resolved = resolved.replace(token, &value);
    }
    resolved
}

/// The fixed six-section default layout, rendered in the same shape as
/// template sections.
fn push_default_sections(prompt: &mut String, session: &SessionInput) {
    let bodies: Vec<String> = default_sections(session)
        .into_iter()
        .map(|(heading, instruction)| format!("{heading}\n[{instruction}]"))
        .collect();
    prompt.push_str(&bodies.join("\n\n"));
    prompt.push('\n');
}

fn default_sections(session: &SessionInput) -> Vec<(&'static str, String)> {
    let name = session.client_first_name.as_str();
    vec![
        (
            DEFAULT_HEADINGS[0],
            format!(
                "State where the meeting took place: {}. {}",
                session.location,
                location_hint(&session.location)
            ),
        ),
        (
            DEFAULT_HEADINGS[1],
            format!(
                "Summarize what the session focused on, centered on these objectives: {}.",
                session.objectives.join(", ")
            ),
        ),
        (
            DEFAULT_HEADINGS[2],
            format!(
                "Describe what {name} and the peer support specialist did together during the \
                 {}-minute session.",
                session.duration_minutes
            ),
        ),
        (DEFAULT_HEADINGS[3], interventions_instruction(session)),
        (
            DEFAULT_HEADINGS[4],
            format!(
                "Describe how {name} responded and engaged, in strengths-based language."
            ),
        ),
        (
            DEFAULT_HEADINGS[5],
            "State what the client and specialist agreed to focus on next session.".to_string(),
        ),
    ]
}

/// Guidance for the Peer Support Interventions section. Three mutually
/// exclusive variants: explicit interventions supplied, treatment-plan
/// derived, or generic objectives-only.
fn interventions_instruction(session: &SessionInput) -> String {
    if !session.interventions.is_empty() {
        return format!(
            "Describe how the peer support specialist applied these interventions: {}. \
             Keep the description concrete and tied to what happened in the session.",
            session.interventions.join(", ")
        );
    }

    if let Some(plan_text) = &session.session_treatment_plan {
        let plan = treatment_plan::parse(plan_text);
        let mut guidance = String::from(
            "Describe the peer support provided, drawing on the client's treatment plan.",
        );
        if !plan.interventions.is_empty() {
            let listed = plan
                .interventions
                .iter()
                .map(|i| format!("{}: {}", i.category, i.description))
                .collect::<Vec<_>>()
                .join("; ");
            guidance.push_str(&format!(" Planned interventions: {listed}."));
        }
        let goals: Vec<&String> = plan
            .long_term_goals
            .iter()
            .chain(&plan.short_term_goals)
            .collect();
        if !goals.is_empty() {
            let listed = goals
                .iter()
                .map(|g| g.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            guidance.push_str(&format!(" Goals in focus: {listed}."));
        }
        return guidance;
    }

    format!(
        "Describe the peer support provided in service of the session objectives ({}). \
         Use general peer-support approaches such as active listening, shared experience, \
         and encouragement.",
        session.objectives.join(", ")
    )
}
