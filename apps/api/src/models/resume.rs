//! Structured resume content — the shared data shapes passed between the
//! generator, the editor round-trip, and the rendering core.
//!
//! Every field defaults to an empty display value. The renderer never fails
//! on absent data; an empty section simply contributes nothing to the page.
//! Ordering of skills, experience entries, education entries and achievement
//! lines is producer order and is never re-sorted downstream.

use serde::{Deserialize, Serialize};

/// Contact details for the person the resume belongs to.
///
/// All fields are optional display strings. An absent field is omitted from
/// the rendered contact line rather than rendered as a blank token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
}

/// One position in the work history, most relevant first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// One degree line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

/// The full structured resume record produced by the content generator and
/// consumed by the rendering core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

impl ResumeContent {
    /// True when no section has any content. The renderer still produces a
    /// valid document (name header and contact line only).
    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty()
            && self.skills.is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Edit-flow text codec
// ────────────────────────────────────────────────────────────────────────────
//
// The editor presents skills as one comma-separated line and achievements as
// newline-separated text. These helpers round-trip that flat encoding back
// into the ordered sequences, trimming blank entries.

/// Joins the ordered skill list into the editor's flat comma-separated form.
pub fn skills_to_text(skills: &[String]) -> String {
    skills.join(", ")
}

/// Parses a comma-separated skills line back into the ordered list.
/// Whitespace around each skill is trimmed; empty tokens are dropped.
pub fn parse_skills(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins achievements into the editor's newline-separated form.
pub fn achievements_to_text(achievements: &[String]) -> String {
    achievements.join("\n")
}

/// Parses newline-separated achievement text back into the ordered list,
/// trimming blank lines.
pub fn parse_achievements(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_round_trip() {
        let skills = vec![
            "Go".to_string(),
            "Rust".to_string(),
            "C++".to_string(),
            "SQL".to_string(),
        ];
        let text = skills_to_text(&skills);
        assert_eq!(parse_skills(&text), skills);
    }

    #[test]
    fn test_parse_skills_trims_and_drops_blanks() {
        assert_eq!(
            parse_skills("  Rust ,, Go ,  , SQL"),
            vec!["Rust", "Go", "SQL"]
        );
    }

    #[test]
    fn test_achievements_round_trip() {
        let achievements = vec!["Shipped X".to_string(), "Led Y".to_string()];
        let text = achievements_to_text(&achievements);
        assert_eq!(parse_achievements(&text), achievements);
    }

    #[test]
    fn test_parse_achievements_drops_blank_lines() {
        assert_eq!(
            parse_achievements("Shipped X\n\n   \nLed Y\n"),
            vec!["Shipped X", "Led Y"]
        );
    }

    #[test]
    fn test_content_deserializes_with_missing_fields() {
        let content: ResumeContent = serde_json::from_str(r#"{"summary": "Engineer."}"#).unwrap();
        assert_eq!(content.summary, "Engineer.");
        assert!(content.skills.is_empty());
        assert!(content.experience.is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(ResumeContent::default().is_empty());
        let content = ResumeContent {
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        assert!(!content.is_empty());
    }
}
