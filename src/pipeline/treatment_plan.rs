//! Line-oriented parser for freeform treatment-plan text.
//!
//! Plans arrive as unstructured text pasted from the client record. The
//! parser classifies lines into long-term goals, short-term goals, and
//! interventions by marker substrings, and never fails: malformed or empty
//! input yields an empty plan.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ParsedTreatmentPlan, PlanIntervention};

/// Section a line belongs to once a marker has been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    LongTerm,
    ShortTerm,
    Intervention,
}

/// Leading "Long-term Goal 3:" / "Short-term Goals:" prefix.
static GOAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:long|short)[\s-]term\s+goals?\s*\d*\s*:?\s*")
        .expect("goal prefix pattern is valid")
});

/// Leading "Intervention 2:" / "Interventions:" prefix.
static INTERVENTION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*interventions?\s*\d*\s*:?\s*")
        .expect("intervention prefix pattern is valid")
});

/// Text following the first "intervention:" mention, up to a period or
/// line break. Used only by the legacy summary path.
static INTERVENTION_MENTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)intervention:?\s*([^.\n]+)").expect("mention pattern is valid")
});

/// Parse treatment-plan text into goals and interventions.
///
/// A line containing a marker both selects the current section and is
/// parsed for content itself. Lines before the first marker are dropped.
pub fn parse(text: &str) -> ParsedTreatmentPlan {
    let mut plan = ParsedTreatmentPlan::default();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        let lower = line.to_lowercase();
        if lower.contains("long-term goal") {
            current = Some(Section::LongTerm);
        } else if lower.contains("short-term goal") {
            current = Some(Section::ShortTerm);
        } else if lower.contains("intervention") {
            current = Some(Section::Intervention);
        }

        match current {
            Some(Section::LongTerm) => push_goal(&mut plan.long_term_goals, line),
            Some(Section::ShortTerm) => push_goal(&mut plan.short_term_goals, line),
            Some(Section::Intervention) => push_intervention(&mut plan.interventions, line),
            None => {}
        }
    }

    plan
}

fn push_goal(goals: &mut Vec<String>, line: &str) {
    let rest = GOAL_PREFIX.replace(line, "");
    let rest = rest.trim();
    if !rest.is_empty() {
        goals.push(rest.to_string());
    }
}

/// An intervention line with nothing after its marker is dropped silently,
/// never defaulted to a placeholder entry.
fn push_intervention(interventions: &mut Vec<PlanIntervention>, line: &str) {
    let rest = INTERVENTION_PREFIX.replace(line, "");
    let rest = rest.trim();
    if rest.is_empty() {
        return;
    }
    let (category, description) = match rest.split_once(" - ") {
        Some((category, description)) => {
            (category.trim().to_string(), description.trim().to_string())
        }
        None => ("General".to_string(), rest.to_string()),
    };
    interventions.push(PlanIntervention {
        category,
        description,
    });
}

/// Keywords associated with a session objective, used to match plan content
/// against what the session focused on. Unknown objectives fall back to the
/// lowercased objective name itself.
fn objective_keywords(objective: &str) -> Vec<String> {
    const KNOWN: &[(&str, &[&str])] = &[
        (
            "anxiety management",
            &["anxiety", "stress", "calm", "breathing", "grounding"],
        ),
        (
            "depression support",
            &["depression", "mood", "sadness", "motivation"],
        ),
        (
            "substance use recovery",
            &["substance", "sobriety", "relapse", "recovery", "craving"],
        ),
        (
            "social skills",
            &["social", "communication", "relationship", "peer"],
        ),
        (
            "employment readiness",
            &["employment", "job", "work", "resume", "interview"],
        ),
        (
            "housing stability",
            &["housing", "home", "residence", "shelter"],
        ),
        (
            "coping skills",
            &["coping", "skill", "strategy", "self-care"],
        ),
        (
            "community integration",
            &["community", "group", "activity", "engagement"],
        ),
    ];

    let key = objective.trim().to_lowercase();
    for (name, keywords) in KNOWN {
        if *name == key {
            return keywords.iter().map(|k| k.to_string()).collect();
        }
    }
    vec![key]
}

/// Best-effort one-or-two-sentence intervention summary for the legacy
/// prompt path. Never fails and always returns a non-empty sentence.
///
/// Matching runs in priority order: keyword-matched interventions (up to
/// two), any parsed intervention, a raw "intervention:" mention in the
/// text, a keyword-matched goal, and finally a generic sentence built from
/// the objectives.
pub fn extract_intervention_text(plan_text: &str, selected_objectives: &[String]) -> String {
    let plan = parse(plan_text);
    let keywords: Vec<String> = selected_objectives
        .iter()
        .flat_map(|o| objective_keywords(o))
        .collect();

    let mut matched: Vec<&str> = Vec::new();
    for intervention in &plan.interventions {
        let haystack =
            format!("{} {}", intervention.category, intervention.description).to_lowercase();
        if keywords.iter().any(|k| haystack.contains(k.as_str()))
            && !matched.contains(&intervention.description.as_str())
        {
            matched.push(&intervention.description);
            if matched.len() == 2 {
                break;
            }
        }
    }
    if !matched.is_empty() {
        return matched.join(". ");
    }

    if let Some(first) = plan.interventions.first() {
        return first.description.clone();
    }

    if let Some(caps) = INTERVENTION_MENTION.captures(plan_text) {
        let snippet = caps[1].trim();
        if snippet.len() > 10 {
            return snippet.to_string();
        }
    }

    let goal_match = plan
        .long_term_goals
        .iter()
        .chain(&plan.short_term_goals)
        .find(|goal| {
            let lower = goal.to_lowercase();
            keywords.iter().any(|k| lower.contains(k.as_str()))
        });
    if let Some(goal) = goal_match {
        return format!("Client will work towards: {goal}");
    }

    generic_objective_sentence(selected_objectives)
}

fn generic_objective_sentence(objectives: &[String]) -> String {
    if objectives.is_empty() {
        return "Client will work on identified recovery goals during peer support sessions."
            .to_string();
    }
    let joined = objectives
        .iter()
        .map(|o| o.to_lowercase())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Client will work on {joined} during peer support sessions.")
}
