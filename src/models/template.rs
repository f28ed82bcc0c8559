use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One admin-authored section of a note template.
///
/// `instruction_text` may embed `{{clientName}}`, `{{location}}`,
/// `{{duration}}`, `{{objectives}}`, `{{treatmentPlan}}` and
/// `{{selectedInterventions}}` placeholders, substituted at prompt build
/// time. Unknown placeholders pass through as literal text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSection {
    pub name: String,
    pub heading: String,
    pub instruction_text: String,
    pub is_visible: bool,
    pub order: i32,
}

/// Admin-managed note layout.
///
/// The only entity in this crate with a lifecycle beyond a single request:
/// admins edit it, every generation request reads it once. Concurrent edits
/// become visible to subsequent requests only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionTemplate {
    pub id: Uuid,
    pub name: String,
    pub sections: Vec<TemplateSection>,
}

impl SectionTemplate {
    /// Visible sections sorted by `order` ascending.
    ///
    /// The sort is stable: sections with equal `order` keep their authored
    /// relative order.
    pub fn visible_ordered(&self) -> Vec<&TemplateSection> {
        let mut visible: Vec<&TemplateSection> =
            self.sections.iter().filter(|s| s.is_visible).collect();
        visible.sort_by_key(|s| s.order);
        visible
    }

    /// Whether this template contributes any sections to a prompt.
    /// A template with no visible sections falls back to the default layout.
    pub fn has_visible_sections(&self) -> bool {
        self.sections.iter().any(|s| s.is_visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(name: &str, order: i32, visible: bool) -> TemplateSection {
        TemplateSection {
            name: name.to_string(),
            heading: format!("{name} Heading"),
            instruction_text: format!("Instructions for {name}"),
            is_visible: visible,
            order,
        }
    }

    fn template(sections: Vec<TemplateSection>) -> SectionTemplate {
        SectionTemplate {
            id: Uuid::new_v4(),
            name: "Standard note".into(),
            sections,
        }
    }

    #[test]
    fn visible_ordered_sorts_ascending() {
        let t = template(vec![
            section("second", 2, true),
            section("first", 1, true),
        ]);
        let ordered = t.visible_ordered();
        assert_eq!(ordered[0].name, "first");
        assert_eq!(ordered[1].name, "second");
    }

    #[test]
    fn visible_ordered_excludes_hidden_sections() {
        let t = template(vec![
            section("shown", 1, true),
            section("hidden", 0, false),
        ]);
        let ordered = t.visible_ordered();
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].name, "shown");
    }

    #[test]
    fn equal_order_keeps_authored_order() {
        let t = template(vec![
            section("alpha", 5, true),
            section("beta", 5, true),
            section("gamma", 5, true),
        ]);
        let names: Vec<&str> = t.visible_ordered().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn all_hidden_means_no_visible_sections() {
        let t = template(vec![section("only", 1, false)]);
        assert!(!t.has_visible_sections());
        assert!(t.visible_ordered().is_empty());
    }
}
