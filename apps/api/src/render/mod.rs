//! Document rendering core — turns a structured resume record into a styled,
//! paginated PDF using one of four page-template designs.
//!
//! `render` is the sole public entry point. It resolves the style (unknown
//! template/color/font names silently fall back to documented defaults),
//! builds the template's block sequence, flows it across pages, then stamps
//! each finished page with the template's background decoration before
//! assembling the final document. Each call is synchronous, owns its whole
//! document state, and shares nothing with concurrent calls.

pub mod blocks;
pub mod decor;
pub mod flow;
pub mod metrics;
pub mod paginate;
pub mod style;

use std::io::Write;

use bytes::Bytes;
use lopdf::content::Content;
use lopdf::{dictionary, Document, Object, Stream};
use thiserror::Error;
use tracing::debug;

use crate::models::resume::{PersonInfo, ResumeContent};
use crate::render::paginate::Paginator;
use crate::render::style::StyleSpec;

/// US letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

/// The four fixed visual layouts. Controls page decoration, margins, and
/// column structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Accent band along the left edge, row-major 3-column skill grid.
    Sidebar,
    /// Slanted accent banner across the top, inline skills.
    Diagonal,
    /// Translucent background circles, row-major 4-column skill grid.
    Circle,
    /// Full-width section bars, column-major 2-column skills, label-column
    /// experience rows. No page background art.
    Modern,
}

impl TemplateKind {
    /// Maps a template name to its variant. Anything unrecognized renders
    /// as Sidebar — the documented default, never an error.
    pub fn parse(name: &str) -> Self {
        match name {
            "diagonal" => TemplateKind::Diagonal,
            "circle" => TemplateKind::Circle,
            "modern" => TemplateKind::Modern,
            _ => TemplateKind::Sidebar,
        }
    }

    /// Content margins. Each template reserves room for its own background
    /// art: Sidebar widens the left margin past the band, Diagonal drops the
    /// top margin below the banner, Circle keeps modest uniform margins.
    pub fn margins(self) -> PageMargins {
        match self {
            TemplateKind::Sidebar => PageMargins {
                left: 129.6,
                right: 36.0,
                top: 36.0,
                bottom: 36.0,
            },
            TemplateKind::Diagonal => PageMargins {
                left: 43.2,
                right: 43.2,
                top: 129.6,
                bottom: 36.0,
            },
            TemplateKind::Circle => PageMargins {
                left: 50.4,
                right: 50.4,
                top: 43.2,
                bottom: 43.2,
            },
            TemplateKind::Modern => PageMargins {
                left: 36.0,
                right: 36.0,
                top: 28.8,
                bottom: 28.8,
            },
        }
    }

    /// Usable width between the left and right margins.
    pub fn content_width(self) -> f32 {
        let m = self.margins();
        PAGE_WIDTH - m.left - m.right
    }
}

/// Per-template content margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// One render invocation: content plus raw style selectors as received from
/// the request layer. Consumed exactly once.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub content: ResumeContent,
    pub person: PersonInfo,
    pub template: String,
    pub color: String,
    pub font: String,
}

/// A finished document.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Bytes,
    pub page_count: usize,
}

#[derive(Debug, Error)]
pub enum RenderError {
    /// The destination could not be written. The document is buffered fully
    /// in memory before the first byte reaches the sink, so a failed render
    /// never leaves truncated output behind.
    #[error("render target error: {0}")]
    Target(#[from] std::io::Error),

    #[error("pdf assembly error: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// Renders the request into an in-memory PDF.
pub fn render(req: &RenderRequest) -> Result<RenderedDocument, RenderError> {
    let kind = TemplateKind::parse(&req.template);
    let style = StyleSpec::resolve(&req.color, &req.font);

    let block_seq = flow::build_blocks(kind, &style, &req.person, &req.content);

    let mut paginator = Paginator::new(kind, style);
    for block in &block_seq {
        paginator.place(block);
    }
    let pages = paginator.finish();
    let page_count = pages.len();

    let decoration = decor::decoration_ops(kind, &style, &req.person);
    let bytes = assemble_document(pages, decoration, style)?;

    debug!(
        template = ?kind,
        pages = page_count,
        bytes = bytes.len(),
        "render complete"
    );

    Ok(RenderedDocument {
        bytes: Bytes::from(bytes),
        page_count,
    })
}

/// Renders the request and writes the finished document to `dest` in a
/// single pass. Returns the page count.
pub fn render_to<W: Write>(req: &RenderRequest, dest: &mut W) -> Result<usize, RenderError> {
    let doc = render(req)?;
    dest.write_all(&doc.bytes)?;
    dest.flush()?;
    Ok(doc.page_count)
}

/// Assembles the lopdf document: one shared decoration content stream
/// referenced by every page (guaranteeing identical background art), one
/// foreground stream per page, shared font and ExtGState resources.
fn assemble_document(
    pages: Vec<Vec<lopdf::content::Operation>>,
    decoration: Vec<lopdf::content::Operation>,
    style: StyleSpec,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => style.font.regular(),
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => style.font.bold(),
        "Encoding" => "WinAnsiEncoding",
    });

    // Fill-alpha graphics states used by the decoration art.
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
        "ExtGState" => dictionary! {
            "Ga10" => dictionary! { "Type" => "ExtGState", "ca" => 0.10_f32 },
            "Ga15" => dictionary! { "Type" => "ExtGState", "ca" => 0.15_f32 },
            "Ga20" => dictionary! { "Type" => "ExtGState", "ca" => 0.20_f32 },
        },
    });

    let decoration_id = if decoration.is_empty() {
        None
    } else {
        let encoded = Content {
            operations: decoration,
        }
        .encode()?;
        Some(doc.add_object(Stream::new(dictionary! {}, encoded)))
    };

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let encoded = Content { operations }.encode()?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        // Background stream first so foreground text sits above the art.
        let contents: Vec<Object> = match decoration_id {
            Some(decor_id) => vec![decor_id.into(), content_id.into()],
            None => vec![content_id.into()],
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => Object::Array(contents),
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }
        .into(),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{EducationEntry, ExperienceEntry};

    fn sample_content() -> ResumeContent {
        ResumeContent {
            summary: "Engineer.".to_string(),
            skills: ["Go", "Rust", "C++", "SQL"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            experience: vec![ExperienceEntry {
                title: "Dev".to_string(),
                company: "Acme".to_string(),
                period: "2020-2022".to_string(),
                achievements: vec!["Shipped X".to_string(), "Led Y".to_string()],
            }],
            education: vec![EducationEntry {
                degree: "BS CS".to_string(),
                institution: "State U".to_string(),
                year: "2019".to_string(),
            }],
        }
    }

    fn sample_person() -> PersonInfo {
        PersonInfo {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            location: "London".to_string(),
        }
    }

    #[test]
    fn test_template_parse_known_and_unknown() {
        assert_eq!(TemplateKind::parse("sidebar"), TemplateKind::Sidebar);
        assert_eq!(TemplateKind::parse("diagonal"), TemplateKind::Diagonal);
        assert_eq!(TemplateKind::parse("circle"), TemplateKind::Circle);
        assert_eq!(TemplateKind::parse("modern"), TemplateKind::Modern);
        assert_eq!(TemplateKind::parse("brutalist"), TemplateKind::Sidebar);
        assert_eq!(TemplateKind::parse(""), TemplateKind::Sidebar);
    }

    #[test]
    fn test_sidebar_reserves_left_margin_past_band() {
        let m = TemplateKind::Sidebar.margins();
        // The band is 108pt wide; text must start right of it.
        assert!(m.left > 108.0);
    }

    #[test]
    fn test_diagonal_reserves_top_margin_below_banner() {
        let m = TemplateKind::Diagonal.margins();
        // The banner's lowest edge is at y=684, i.e. 108pt from the top.
        assert!(m.top > 108.0);
    }

    #[test]
    fn test_render_empty_content_succeeds_with_one_page() {
        let req = RenderRequest {
            content: ResumeContent::default(),
            person: sample_person(),
            template: "sidebar".to_string(),
            color: "blue".to_string(),
            font: "helvetica".to_string(),
        };
        let doc = render(&req).unwrap();
        assert_eq!(doc.page_count, 1);
        assert!(doc.bytes.starts_with(b"%PDF-1.7"));
    }

    #[test]
    fn test_render_unknown_style_keys_fall_back_silently() {
        let req = RenderRequest {
            content: sample_content(),
            person: sample_person(),
            template: "hologram".to_string(),
            color: "ultraviolet".to_string(),
            font: "wingdings".to_string(),
        };
        let doc = render(&req).unwrap();
        assert!(doc.page_count >= 1);
    }

    #[test]
    fn test_render_circle_teal_times_scenario() {
        let req = RenderRequest {
            content: sample_content(),
            person: sample_person(),
            template: "circle".to_string(),
            color: "teal".to_string(),
            font: "times".to_string(),
        };
        let doc = render(&req).unwrap();
        assert!(doc.page_count >= 1);

        let parsed = Document::load_mem(&doc.bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), doc.page_count);
    }

    #[test]
    fn test_multi_page_decoration_identical_on_every_page() {
        let many_entries: Vec<ExperienceEntry> = (0..30)
            .map(|i| ExperienceEntry {
                title: format!("Engineer {i}"),
                company: "Acme".to_string(),
                period: "2020-2022".to_string(),
                achievements: vec![
                    "Delivered a large migration project across several teams".to_string(),
                    "Reduced infrastructure spend through capacity planning".to_string(),
                    "Mentored junior engineers on operational practices".to_string(),
                ],
            })
            .collect();
        let content = ResumeContent {
            experience: many_entries,
            ..sample_content()
        };
        let req = RenderRequest {
            content,
            person: sample_person(),
            template: "sidebar".to_string(),
            color: "rose".to_string(),
            font: "helvetica".to_string(),
        };
        let doc = render(&req).unwrap();
        assert!(doc.page_count >= 2, "expected overflow to a second page");

        // Every page's Contents array must start with the same shared
        // decoration stream object.
        let parsed = Document::load_mem(&doc.bytes).unwrap();
        let mut decoration_ids = Vec::new();
        for (_, page_id) in parsed.get_pages() {
            let page = parsed.get_object(page_id).unwrap().as_dict().unwrap();
            let contents = page.get(b"Contents").unwrap().as_array().unwrap();
            assert_eq!(contents.len(), 2, "decoration + foreground streams");
            decoration_ids.push(contents[0].as_reference().unwrap());
        }
        assert!(decoration_ids.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_modern_template_has_no_decoration_stream() {
        let req = RenderRequest {
            content: sample_content(),
            person: sample_person(),
            template: "modern".to_string(),
            color: "indigo".to_string(),
            font: "helvetica".to_string(),
        };
        let doc = render(&req).unwrap();
        let parsed = Document::load_mem(&doc.bytes).unwrap();
        for (_, page_id) in parsed.get_pages() {
            let page = parsed.get_object(page_id).unwrap().as_dict().unwrap();
            let contents = page.get(b"Contents").unwrap().as_array().unwrap();
            assert_eq!(contents.len(), 1);
        }
    }

    #[test]
    fn test_render_to_writes_full_document() {
        let req = RenderRequest {
            content: sample_content(),
            person: sample_person(),
            template: "diagonal".to_string(),
            color: "cyan".to_string(),
            font: "courier".to_string(),
        };
        let mut sink = Vec::new();
        let page_count = render_to(&req, &mut sink).unwrap();
        assert!(page_count >= 1);
        assert!(sink.starts_with(b"%PDF-1.7"));
        assert_eq!(sink, render(&req).unwrap().bytes.to_vec());
    }
}
