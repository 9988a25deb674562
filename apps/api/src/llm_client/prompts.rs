// Cross-cutting prompt fragments. Each service that makes LLM calls keeps
// its task prompts in its own prompts.rs and composes these in.

/// Instruction that keeps generated content anchored to the profile.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Every claim must come from the candidate background provided. \
    Do NOT invent employers, titles, dates, degrees, or metrics. \
    Rephrasing and emphasis are allowed; fabrication is not. \
    If the background does not support a claim, omit it.";
