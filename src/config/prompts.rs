//! Prompt templates for Speida.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub analyst: AnalystPrompts,
    pub transcript: TranscriptPrompts,
    pub structuring: StructuringPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for website content analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalystPrompts {
    pub website: String,
}

impl Default for AnalystPrompts {
    fn default() -> Self {
        Self {
            website: r#"You are an experienced market analyst. Based on the content of the website below, answer the following question.

Website Content:
{{context}}

Question: {{question}}"#
                .to_string(),
        }
    }
}

/// Prompts for the video transcript conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptPrompts {
    /// The priming turn that supplies the transcript before the question.
    pub priming: String,
}

impl Default for TranscriptPrompts {
    fn default() -> Self {
        Self {
            priming: "Here is the transcript:\n{{transcript}}".to_string(),
        }
    }
}

/// Prompt for markdown structuring of raw tool output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuringPrompts {
    pub template: String,
}

impl Default for StructuringPrompts {
    fn default() -> Self {
        Self {
            template: r#"You are a data processing agent. Your task is to process the following input data and return a well-formatted, structured response in markdown format.

Input Data:
{{input_data}}

Please analyze the content and structure your response with appropriate sections, headings, bullet points, and summaries."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let analyst_path = custom_path.join("analyst.toml");
            if analyst_path.exists() {
                let content = std::fs::read_to_string(&analyst_path)?;
                prompts.analyst = toml::from_str(&content)?;
            }

            let transcript_path = custom_path.join("transcript.toml");
            if transcript_path.exists() {
                let content = std::fs::read_to_string(&transcript_path)?;
                prompts.transcript = toml::from_str(&content)?;
            }

            let structuring_path = custom_path.join("structuring.toml");
            if structuring_path.exists() {
                let content = std::fs::read_to_string(&structuring_path)?;
                prompts.structuring = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
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
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.analyst.website.contains("{{context}}"));
        assert!(prompts.analyst.website.contains("{{question}}"));
        assert!(prompts.structuring.template.contains("{{input_data}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Question: {{question}} about {{topic}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert("question".to_string(), "Why".to_string());
        vars.insert("topic".to_string(), "pricing".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Question: Why about pricing");
    }
}
