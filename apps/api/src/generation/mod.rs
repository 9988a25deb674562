// Tailored content generation: a single LLM call turns a candidate's raw
// background plus a job description into a structured ResumeContent.
// All model calls go through llm_client — no direct API calls here.

pub mod generator;
pub mod prompts;
