//! Prompt templates for Vidask.
//!
//! Prompts can be customized by placing a `rag.toml` file in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub rag: RagPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompt for grounded answer generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    /// Sent as the single user message; `{{context}}` and `{{question}}` are filled in.
    pub user: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            user: r#"You are a helpful assistant.
Answer ONLY from the provided transcript context.
If the context is insufficient, say "I don't know."

Transcript context:
{{context}}

Question:
{{question}}
"#
            .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let rag_path = custom_path.join("rag.toml");
            if rag_path.exists() {
                let content = std::fs::read_to_string(&rag_path)?;
                prompts.rag = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are filled in a single pass, so substituted values are
    /// never expanded again. Unknown placeholders are left as written.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rag_prompt() {
        let prompts = Prompts::default();
        assert!(prompts.rag.user.contains("Answer ONLY from the provided transcript context."));
        assert!(prompts.rag.user.contains(r#"say "I don't know.""#));
        assert!(prompts.rag.user.contains("{{context}}"));
        assert!(prompts.rag.user.contains("{{question}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_substituted_values_are_not_expanded() {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "What does {{context}} mean?".to_string());
        vars.insert("context".to_string(), "Say {{question}} twice.".to_string());

        let template = "Transcript context:\n{{context}}\n\nQuestion:\n{{question}}\n";
        let expected =
            "Transcript context:\nSay {{question}} twice.\n\nQuestion:\nWhat does {{context}} mean?\n";

        // Same output on every render, whatever the map's iteration order.
        for _ in 0..64 {
            assert_eq!(Prompts::render(template, &vars), expected);
            let vars: HashMap<String, String> = vars.clone().into_iter().collect();
            assert_eq!(Prompts::render(template, &vars), expected);
        }
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        let rendered = Prompts::render("Hi {{name}} {{missing}}", &HashMap::from([(
            "name".to_string(),
            "Bo".to_string(),
        )]));
        assert_eq!(rendered, "Hi Bo {{missing}}");
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut custom = HashMap::new();
        custom.insert("persona".to_string(), "a film critic".to_string());
        custom.insert("question".to_string(), "ignored".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "Who sings?".to_string());

        let rendered = prompts.render_with_custom("As {{persona}}: {{question}}", &vars);
        assert_eq!(rendered, "As a film critic: Who sings?");
    }

    #[test]
    fn test_load_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rag.toml"),
            "user = \"Context: {{context}} / Q: {{question}}\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.rag.user, "Context: {{context}} / Q: {{question}}");
    }
}
