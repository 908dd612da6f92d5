//! # Built-in Catalogs
//!
//! The fixed lists of selectable models and prompt templates. Both are
//! read-only at runtime; the session holder stores clones of entries.

use serde::{Deserialize, Serialize};

/// A selectable model. Drawn from [`models()`]; never mutated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub description: String,
}

/// Coarse grouping used to pick an icon and color for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Reasoning,
    Fast,
    Analytic,
    Multimodal,
    Other,
}

impl ModelDescriptor {
    fn new(id: &str, name: &str, provider: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            provider: provider.to_string(),
            description: description.to_string(),
        }
    }

    /// Derive the family from well-known id fragments.
    pub fn family(&self) -> ModelFamily {
        if self.id.contains("gpt-4") {
            ModelFamily::Reasoning
        } else if self.id.contains("gpt-3.5") {
            ModelFamily::Fast
        } else if self.id.contains("claude") {
            ModelFamily::Analytic
        } else if self.id.contains("gemini") {
            ModelFamily::Multimodal
        } else {
            ModelFamily::Other
        }
    }
}

/// A reusable starting text for the prompt editor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    pub content: String,
    pub category: String,
}

impl PromptTemplate {
    fn new(id: &str, name: &str, content: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            content: content.to_string(),
            category: category.to_string(),
        }
    }
}

/// The built-in model catalog, in display order.
pub fn models() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new(
            "gpt-4-turbo",
            "GPT-4 Turbo",
            "OpenAI",
            "Most capable model for complex tasks",
        ),
        ModelDescriptor::new(
            "gpt-3.5-turbo",
            "GPT-3.5 Turbo",
            "OpenAI",
            "Fast and efficient for most tasks",
        ),
        ModelDescriptor::new(
            "claude-3-opus",
            "Claude 3 Opus",
            "Anthropic",
            "Excellent for analysis and reasoning",
        ),
        ModelDescriptor::new("gemini-pro", "Gemini Pro", "Google", "Multimodal capabilities"),
    ]
}

/// Look up a catalog model by id.
pub fn find_model(id: &str) -> Option<ModelDescriptor> {
    models().into_iter().find(|m| m.id == id)
}

/// The built-in prompt templates, in display order.
pub fn templates() -> Vec<PromptTemplate> {
    vec![
        PromptTemplate::new(
            "1",
            "Creative Writing",
            "Write a creative story about...",
            "Creative",
        ),
        PromptTemplate::new(
            "2",
            "Code Review",
            "Please review this code and suggest improvements...",
            "Development",
        ),
        PromptTemplate::new(
            "3",
            "Data Analysis",
            "Analyze the following dataset and provide insights...",
            "Analytics",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_catalog_order() {
        let ids: Vec<String> = models().into_iter().map(|m| m.id).collect();
        assert_eq!(
            ids,
            vec!["gpt-4-turbo", "gpt-3.5-turbo", "claude-3-opus", "gemini-pro"]
        );
    }

    #[test]
    fn test_find_model() {
        let model = find_model("claude-3-opus").unwrap();
        assert_eq!(model.provider, "Anthropic");
        assert!(find_model("does-not-exist").is_none());
    }

    #[test]
    fn test_model_family_from_id() {
        let families: Vec<ModelFamily> = models().iter().map(|m| m.family()).collect();
        assert_eq!(
            families,
            vec![
                ModelFamily::Reasoning,
                ModelFamily::Fast,
                ModelFamily::Analytic,
                ModelFamily::Multimodal
            ]
        );

        let custom = ModelDescriptor::new("mistral-large", "Mistral", "Mistral", "");
        assert_eq!(custom.family(), ModelFamily::Other);
    }

    #[test]
    fn test_templates_have_unique_ids() {
        let templates = templates();
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[1].name, "Code Review");
        assert_eq!(templates[2].category, "Analytics");
        let mut ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
