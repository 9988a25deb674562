//! Resume endpoints: generate, regenerate (edit flow), download, preview.
//!
//! Generate runs the LLM tailoring call, renders the PDF, persists it to
//! the document store, and keeps the structured content in an in-memory
//! session so the edit flow can re-render without another model call.
//! Regenerate accepts the editor's flat encodings (comma-separated skills,
//! newline-separated achievements) and re-renders from them.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::generate_content;
use crate::models::resume::{
    parse_achievements, parse_skills, skills_to_text, EducationEntry, ExperienceEntry, PersonInfo,
    ResumeContent,
};
use crate::render::{render, RenderRequest};
use crate::state::{AppState, ResumeSession};

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    pub job_description: String,
    pub background: String,
    #[serde(default)]
    pub person: PersonInfo,
    // Unknown style keys silently resolve to sidebar/blue/helvetica.
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub font: String,
}

/// One experience entry as the editor posts it back: achievements come as
/// one newline-separated text blob.
#[derive(Debug, Deserialize)]
pub struct EditedExperience {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub achievements_text: String,
}

#[derive(Debug, Deserialize)]
pub struct RegenerateRequest {
    #[serde(default)]
    pub summary: String,
    /// Comma-separated.
    #[serde(default)]
    pub skills_text: String,
    #[serde(default)]
    pub experience: Vec<EditedExperience>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    /// Optional style switches; absent keeps the session's current choice.
    pub template: Option<String>,
    pub color: Option<String>,
    pub font: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub resume_id: Uuid,
    pub content: ResumeContent,
    /// Skills in the editor's flat comma-separated form.
    pub skills_text: String,
    pub page_count: usize,
    pub filename: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateResumeRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let content = generate_content(&state.llm, &req.job_description, &req.background).await?;

    let session = render_and_store(
        &state,
        req.person,
        content,
        req.template,
        req.color,
        req.font,
    )
    .await?;

    let resume_id = Uuid::new_v4();
    let response = session_response(resume_id, &session);
    state.insert_session(resume_id, session).await;

    info!(%resume_id, pages = response.page_count, "resume generated");
    Ok(Json(response))
}

/// POST /api/v1/resumes/:id/regenerate
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RegenerateRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let existing = state
        .sessions
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("resume {id}")))?;

    let content = ResumeContent {
        summary: req.summary.trim().to_string(),
        skills: parse_skills(&req.skills_text),
        experience: req
            .experience
            .into_iter()
            .map(|e| ExperienceEntry {
                title: e.title.trim().to_string(),
                company: e.company.trim().to_string(),
                period: e.period.trim().to_string(),
                achievements: parse_achievements(&e.achievements_text),
            })
            .collect(),
        education: req.education,
    };

    let session = render_and_store(
        &state,
        existing.person,
        content,
        req.template.unwrap_or(existing.template),
        req.color.unwrap_or(existing.color),
        req.font.unwrap_or(existing.font),
    )
    .await?;

    let response = session_response(id, &session);
    state.insert_session(id, session).await;

    info!(resume_id = %id, pages = response.page_count, "resume regenerated");
    Ok(Json(response))
}

/// GET /api/v1/resumes/:id/download
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    serve_document(&state, id, "attachment").await
}

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    serve_document(&state, id, "inline").await
}

// ────────────────────────────────────────────────────────────────────────────
// Internals
// ────────────────────────────────────────────────────────────────────────────

/// Renders the content and persists the document, returning the new session
/// record. The whole PDF is buffered before the store sees a single byte.
async fn render_and_store(
    state: &AppState,
    person: PersonInfo,
    content: ResumeContent,
    template: String,
    color: String,
    font: String,
) -> Result<ResumeSession, AppError> {
    let render_req = RenderRequest {
        content: content.clone(),
        person: person.clone(),
        template: template.clone(),
        color: color.clone(),
        font: font.clone(),
    };
    let document = render(&render_req)?;

    let filename = format!(
        "resume_{}_{}.pdf",
        sanitize_name(&person.name),
        Utc::now().format("%Y%m%d_%H%M%S")
    );
    state.store.put(&filename, document.bytes).await?;

    Ok(ResumeSession {
        person,
        content,
        template,
        color,
        font,
        filename,
        page_count: document.page_count,
        created_at: Utc::now(),
    })
}

fn session_response(resume_id: Uuid, session: &ResumeSession) -> ResumeResponse {
    ResumeResponse {
        resume_id,
        content: session.content.clone(),
        skills_text: skills_to_text(&session.content.skills),
        page_count: session.page_count,
        filename: session.filename.clone(),
    }
}

async fn serve_document(state: &AppState, id: Uuid, disposition: &str) -> Result<Response, AppError> {
    let session = state
        .sessions
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("resume {id}")))?;

    let bytes = state
        .store
        .get(&session.filename)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("document for resume {id}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("{disposition}; filename=\"{}\"", session.filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Reduces a display name to a filesystem-safe filename fragment.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('_').to_string();
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
