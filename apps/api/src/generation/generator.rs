//! Content generation — builds the tailoring prompt and runs the LLM call.
//!
//! The model returns a `ResumeContent` directly; the JSON contract is
//! enforced by the system prompt and `LlmClient::call_json`. Ordering in
//! the returned lists is the model's relevance ordering and is preserved
//! untouched through rendering.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{GENERATION_PROMPT_TEMPLATE, GENERATION_SYSTEM};
use crate::llm_client::prompts::GROUNDING_INSTRUCTION;
use crate::llm_client::LlmClient;
use crate::models::resume::ResumeContent;

/// Generates tailored resume content for one job description.
pub async fn generate_content(
    llm: &LlmClient,
    job_description: &str,
    background: &str,
) -> Result<ResumeContent, AppError> {
    let job_description = job_description.trim();
    let background = background.trim();

    if job_description.is_empty() {
        return Err(AppError::Validation(
            "job_description must not be empty".to_string(),
        ));
    }
    if background.is_empty() {
        return Err(AppError::Validation(
            "background must not be empty".to_string(),
        ));
    }

    let prompt = build_generation_prompt(job_description, background);

    let content: ResumeContent = llm
        .call_json(&prompt, GENERATION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Content generation call failed: {e}")))?;

    if content.is_empty() {
        return Err(AppError::Llm(
            "Model returned an empty content record".to_string(),
        ));
    }

    info!(
        skills = content.skills.len(),
        positions = content.experience.len(),
        "content generation complete"
    );

    Ok(content)
}

fn build_generation_prompt(job_description: &str, background: &str) -> String {
    GENERATION_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{job_description}", job_description)
        .replace("{background}", background)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
