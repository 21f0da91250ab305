//! Prompt rendering — embedded Tera templates for each generation call.
//!
//! Templates are baked into the binary at compile time via `include_str!`
//! and rendered from the serializable [`GenerationContext`], so the prompt
//! text only ever sees configuration key NAMES, never values.

use tera::Tera;

use chronicle_core::{GenerateError, GenerationContext};

// ---------------------------------------------------------------------------
// Embedded templates
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    ("commit.tera", include_str!("templates/commit.tera")),
    ("readme.tera", include_str!("templates/readme.tera")),
    ("revise.tera", include_str!("templates/revise.tera")),
];

/// System message for commit-message generation.
pub const COMMIT_SYSTEM: &str = "You write excellent, concise conventional commits.";

/// System message for README drafting and revision.
pub const README_SYSTEM: &str = "You write excellent, practical READMEs for engineering teams.";

// ---------------------------------------------------------------------------
// PromptEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering prompt text.
///
/// Create once with [`PromptEngine::new`] and reuse.
pub struct PromptEngine {
    tera: Tera,
}

impl PromptEngine {
    /// Construct a new [`PromptEngine`] with embedded templates.
    pub fn new() -> Result<Self, GenerateError> {
        let mut tera = Tera::default();
        let items: Vec<(String, String)> = TPLS
            .iter()
            .map(|(name, content)| (name.to_string(), content.to_string()))
            .collect();
        tera.add_raw_templates(items)
            .map_err(|e| GenerateError::Prompt(e.to_string()))?;
        Ok(PromptEngine { tera })
    }

    /// Prompt asking for a Conventional Commit message for `diff`.
    pub fn commit(&self, diff: &str) -> Result<String, GenerateError> {
        let mut tera_ctx = tera::Context::new();
        tera_ctx.insert("diff", diff);
        self.render("commit.tera", &tera_ctx)
    }

    /// Prompt asking for a fresh README draft.
    pub fn readme(&self, ctx: &GenerationContext) -> Result<String, GenerateError> {
        let tera_ctx = context_for(ctx)?;
        self.render("readme.tera", &tera_ctx)
    }

    /// Prompt asking for a revision of `current`.
    pub fn revise(&self, ctx: &GenerationContext, current: &str) -> Result<String, GenerateError> {
        let mut tera_ctx = context_for(ctx)?;
        tera_ctx.insert("current", current);
        self.render("revise.tera", &tera_ctx)
    }

    fn render(&self, name: &str, tera_ctx: &tera::Context) -> Result<String, GenerateError> {
        self.tera
            .render(name, tera_ctx)
            .map_err(|e| GenerateError::Prompt(e.to_string()))
    }
}

fn context_for(ctx: &GenerationContext) -> Result<tera::Context, GenerateError> {
    tera::Context::from_serialize(ctx).map_err(|e| GenerateError::Prompt(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_ctx() -> GenerationContext {
        GenerationContext {
            project_name: "copnow_api".to_string(),
            config_keys: vec![
                "OPENAI_API_KEY".to_string(),
                "SLACK_WEBHOOK_URL".to_string(),
            ],
            manifest: Some("Cargo.toml".to_string()),
            change_summary: Some("feat: add x".to_string()),
        }
    }

    #[test]
    fn engine_new_succeeds() {
        PromptEngine::new().expect("embedded templates must parse");
    }

    #[test]
    fn commit_prompt_embeds_diff() {
        let engine = PromptEngine::new().unwrap();
        let prompt = engine.commit("+added line\n-removed line").unwrap();
        assert!(prompt.contains("+added line"));
        assert!(prompt.contains("Conventional Commit"));
        assert!(prompt.contains("Do NOT include markdown code fences"));
    }

    #[test]
    fn readme_prompt_lists_key_names_only() {
        let engine = PromptEngine::new().unwrap();
        let prompt = engine.readme(&make_ctx()).unwrap();
        assert!(prompt.contains("copnow_api"));
        assert!(prompt.contains("- `OPENAI_API_KEY`"));
        assert!(prompt.contains("- `SLACK_WEBHOOK_URL`"));
        assert!(prompt.contains("Cargo.toml"));
        assert!(prompt.contains("## Features / Changelog"));
    }

    #[test]
    fn readme_prompt_without_keys_says_none() {
        let engine = PromptEngine::new().unwrap();
        let ctx = GenerationContext {
            project_name: "bare".to_string(),
            ..GenerationContext::default()
        };
        let prompt = engine.readme(&ctx).unwrap();
        assert!(prompt.contains("- (none)"));
    }

    #[test]
    fn revise_prompt_embeds_current_document_and_summary() {
        let engine = PromptEngine::new().unwrap();
        let prompt = engine
            .revise(&make_ctx(), "# Existing\n\n## Features / Changelog\n- old\n")
            .unwrap();
        assert!(prompt.contains("# Existing"));
        assert!(prompt.contains("feat: add x"));
        assert!(prompt.contains("Do NOT add a new changelog entry"));
    }
}
