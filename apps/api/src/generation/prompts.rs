// Prompt constants for the content generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for tailored content generation — enforces JSON-only output.
pub const GENERATION_SYSTEM: &str = "You are an expert resume writer. \
    You tailor a candidate's real background to a specific job description, \
    emphasizing the most relevant experience and phrasing achievements with \
    keywords the posting uses. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Generation prompt template.
/// Replace: {grounding_instruction}, {job_description}, {background}
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

Tailor the candidate's background below to the job description and return a
JSON object with this EXACT schema (no extra fields):
{
  "summary": "3-4 sentence professional summary targeted at this role",
  "skills": ["skill 1", "skill 2"],
  "experience": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "period": "2020 - 2023",
      "achievements": [
        "achievement phrased with the posting's vocabulary"
      ]
    }
  ],
  "education": [
    {"degree": "Degree Name", "institution": "Institution", "year": "2019"}
  ]
}

Rules:
- skills: 9 to 12 entries, most relevant to the posting first.
- experience: most relevant positions first, 2 to 4 achievements each.
- Keep dates, employers, titles, and degrees exactly as the background
  states them.
- Order within every list is meaningful and will be preserved verbatim.

JOB DESCRIPTION:
{job_description}

CANDIDATE BACKGROUND:
{background}"#;
