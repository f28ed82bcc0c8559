//! Access to the admin-managed active section template.

use crate::models::SectionTemplate;

/// Source of the admin-configured note template.
///
/// The pipeline reads the active template once per request; admin edits
/// become visible to subsequent requests only. No transactional isolation
/// is provided or required.
pub trait TemplateStore {
    fn active_template(&self) -> Option<SectionTemplate>;
}

/// Fixed in-memory store for tests and single-process callers.
#[derive(Debug, Default)]
pub struct InMemoryTemplateStore {
    template: Option<SectionTemplate>,
}

impl InMemoryTemplateStore {
    pub fn new(template: Option<SectionTemplate>) -> Self {
        Self { template }
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn active_template(&self) -> Option<SectionTemplate> {
        self.template.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemplateSection;
    use uuid::Uuid;

    #[test]
    fn empty_store_has_no_active_template() {
        assert!(InMemoryTemplateStore::default().active_template().is_none());
    }

    #[test]
    fn store_returns_its_template() {
        let template = SectionTemplate {
            id: Uuid::new_v4(),
            name: "Standard".into(),
            sections: vec![TemplateSection {
                name: "focus".into(),
                heading: "Focus".into(),
                instruction_text: "Summarize the focus".into(),
                is_visible: true,
                order: 1,
            }],
        };
        let store = InMemoryTemplateStore::new(Some(template));
        let active = store.active_template().expect("template present");
        assert_eq!(active.name, "Standard");
        assert_eq!(active.sections.len(), 1);
    }
}
