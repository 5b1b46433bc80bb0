//! Prompt templates with `{variable}` substitution.

use std::collections::HashMap;

/// A named prompt template.
///
/// Templates use `{name}` placeholders; [`PromptTemplate::render`] replaces
/// each placeholder with the matching variable. Unknown placeholders are
/// left in place so a malformed call site is visible in the rendered text
/// rather than silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    name: &'static str,
    text: &'static str,
}

impl PromptTemplate {
    /// Creates a new template.
    #[must_use]
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text }
    }

    /// The template's name, used for logging and test scripting.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The raw template text.
    #[must_use]
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Renders the template with the given variables.
    #[must_use]
    pub fn render(&self, vars: &HashMap<String, String>) -> String {
        let mut rendered = self.text.to_string();
        for (key, value) in vars {
            rendered = rendered.replace(&format!("{{{key}}}"), value);
        }
        rendered
    }
}
