//! Flow layout engine — turns a resume record into the ordered block
//! sequence a template prescribes.
//!
//! Section order is fixed (header, summary, skills, experience, education)
//! and content order within a section is producer order. Empty sections are
//! skipped entirely, heading included. All geometry here is in points and
//! already template-specific; the paginator applies it verbatim.

use crate::models::resume::{PersonInfo, ResumeContent};
use crate::render::blocks::{Align, Block, Cell, Grid, GridStyle, Paragraph, Rule, TextStyle};
use crate::render::style::{StyleSpec, BODY, INK, META, PANEL, SLATE, SLATE_MUTED, WHITE};
use crate::render::TemplateKind;

/// Builds the full block sequence for one render.
pub fn build_blocks(
    kind: TemplateKind,
    style: &StyleSpec,
    person: &PersonInfo,
    content: &ResumeContent,
) -> Vec<Block> {
    match kind {
        TemplateKind::Sidebar => sidebar_blocks(style, person, content),
        TemplateKind::Diagonal => diagonal_blocks(style, person, content),
        TemplateKind::Circle => circle_blocks(style, person, content),
        TemplateKind::Modern => modern_blocks(style, person, content),
    }
}

/// Joins the non-empty contact fields with the template's separator.
/// A single populated field yields just that field, no separators.
pub fn contact_line(person: &PersonInfo, sep: &str) -> String {
    [&person.email, &person.phone, &person.location]
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Splits skills into rows of `columns` cells, filling left-to-right then
/// top-to-bottom. The last row is padded with blank cells to full width.
pub fn row_major_rows(skills: &[String], columns: usize) -> Vec<Vec<String>> {
    skills
        .chunks(columns)
        .map(|chunk| {
            let mut row: Vec<String> = chunk.to_vec();
            row.resize(columns, String::new());
            row
        })
        .collect()
}

/// Splits skills into two columns read top-to-bottom: the first ceil(n/2)
/// skills fill the left column, the remainder the right. Returned row-wise
/// for the grid, with a blank right cell when the count is odd.
pub fn column_major_rows(skills: &[String]) -> Vec<Vec<String>> {
    let split = skills.len().div_ceil(2);
    (0..split)
        .map(|i| {
            vec![
                skills[i].clone(),
                skills.get(split + i).cloned().unwrap_or_default(),
            ]
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Sidebar
// ────────────────────────────────────────────────────────────────────────────

fn sidebar_blocks(style: &StyleSpec, person: &PersonInfo, content: &ResumeContent) -> Vec<Block> {
    let accent = style.accent;
    let mut blocks = Vec::new();

    if !person.name.trim().is_empty() {
        blocks.push(Block::Paragraph(
            Paragraph::new(
                person.name.trim().to_uppercase(),
                TextStyle::body(24.0, 28.0, INK).bold(),
            )
            .space_after(4.0),
        ));
    }
    let contact = contact_line(person, " \u{2022} ");
    if !contact.is_empty() {
        blocks.push(Block::Paragraph(
            Paragraph::new(contact, TextStyle::body(9.5, 12.0, META)).space_after(14.0),
        ));
    }

    let heading = |text: &str, blocks: &mut Vec<Block>| {
        blocks.push(Block::Paragraph(
            Paragraph::new(text, TextStyle::body(13.0, 16.0, accent).bold())
                .space_before(12.0)
                .space_after(3.0),
        ));
        blocks.push(Block::Rule(Rule {
            width: 72.0,
            thickness: 2.0,
            color: accent,
            space_after: 8.0,
        }));
    };

    if !content.summary.trim().is_empty() {
        heading("PROFESSIONAL PROFILE", &mut blocks);
        blocks.push(Block::Paragraph(
            Paragraph::new(content.summary.trim(), TextStyle::body(10.0, 14.0, BODY))
                .space_after(4.0),
        ));
    }

    if !content.skills.is_empty() {
        heading("EXPERTISE", &mut blocks);
        let cell_style = TextStyle::body(9.5, 12.0, SLATE_MUTED);
        let rows = row_major_rows(&content.skills, 3)
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|skill| {
                        if skill.is_empty() {
                            Cell::empty()
                        } else {
                            Cell::text(skill, cell_style)
                        }
                    })
                    .collect()
            })
            .collect();
        blocks.push(Block::Grid(Grid {
            rows,
            col_widths: vec![148.8, 148.8, 148.8],
            style: GridStyle {
                background: Some(PANEL),
                padding: 4.0,
                ..Default::default()
            },
            indent: 0.0,
            space_after: 4.0,
        }));
    }

    if !content.experience.is_empty() {
        heading("PROFESSIONAL EXPERIENCE", &mut blocks);
        for entry in &content.experience {
            push_experience_entry(&mut blocks, entry, accent, 0.0);
        }
    }

    if !content.education.is_empty() {
        heading("EDUCATION", &mut blocks);
        push_education_lines(&mut blocks, content, Align::Left);
    }

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Diagonal
// ────────────────────────────────────────────────────────────────────────────

// The name lives in the banner art, painted by the page decorator, so the
// flowed content starts with the contact line.
fn diagonal_blocks(style: &StyleSpec, person: &PersonInfo, content: &ResumeContent) -> Vec<Block> {
    let accent = style.accent;
    let mut blocks = Vec::new();

    let contact = contact_line(person, " | ");
    if !contact.is_empty() {
        blocks.push(Block::Paragraph(
            Paragraph::new(contact, TextStyle::body(9.5, 12.0, META)).space_after(10.0),
        ));
    }

    let heading = |text: &str, blocks: &mut Vec<Block>| {
        blocks.push(Block::Paragraph(
            Paragraph::new(
                format!("\u{bb} {text}"),
                TextStyle::body(12.5, 15.0, accent).bold(),
            )
            .space_before(12.0)
            .space_after(6.0),
        ));
    };

    if !content.summary.trim().is_empty() {
        heading("PROFESSIONAL SUMMARY", &mut blocks);
        blocks.push(Block::Paragraph(
            Paragraph::new(content.summary.trim(), TextStyle::body(10.0, 14.0, BODY))
                .space_after(4.0),
        ));
    }

    if !content.skills.is_empty() {
        heading("TECHNICAL SKILLS", &mut blocks);
        // Inline list, no grid.
        blocks.push(Block::Paragraph(
            Paragraph::new(
                content.skills.join(" \u{2022} "),
                TextStyle::body(10.0, 14.0, SLATE_MUTED).bold(),
            )
            .space_after(4.0),
        ));
    }

    if !content.experience.is_empty() {
        heading("EXPERIENCE", &mut blocks);
        // Boxed entries: each position is one grid row with an accent border
        // along its left edge. Page breaks fall between positions.
        let rows = content
            .experience
            .iter()
            .map(|entry| {
                let mut paras = Vec::new();
                if !entry.title.trim().is_empty() {
                    paras.push(Paragraph::new(
                        entry.title.trim(),
                        TextStyle::body(11.0, 14.0, INK).bold(),
                    ));
                }
                let byline = [entry.company.trim(), entry.period.trim()]
                    .iter()
                    .filter(|s| !s.is_empty())
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(" | ");
                if !byline.is_empty() {
                    paras.push(
                        Paragraph::new(byline, TextStyle::body(9.5, 12.0, accent))
                            .space_after(3.0),
                    );
                }
                for achievement in &entry.achievements {
                    if achievement.trim().is_empty() {
                        continue;
                    }
                    paras.push(Paragraph::new(
                        format!("\u{2022} {}", achievement.trim()),
                        TextStyle::body(10.0, 13.0, BODY).indented(10.0, 10.0),
                    ));
                }
                vec![Cell::paras(paras)]
            })
            .collect();
        blocks.push(Block::Grid(Grid {
            rows,
            col_widths: vec![525.6],
            style: GridStyle {
                line_before: Some((2.0, accent)),
                padding: 6.0,
                ..Default::default()
            },
            indent: 0.0,
            space_after: 4.0,
        }));
    }

    if !content.education.is_empty() {
        heading("EDUCATION", &mut blocks);
        push_education_lines(&mut blocks, content, Align::Left);
    }

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Circle
// ────────────────────────────────────────────────────────────────────────────

fn circle_blocks(style: &StyleSpec, person: &PersonInfo, content: &ResumeContent) -> Vec<Block> {
    let accent = style.accent;
    let mut blocks = Vec::new();

    if !person.name.trim().is_empty() {
        blocks.push(Block::Paragraph(
            Paragraph::new(
                person.name.trim().to_uppercase(),
                TextStyle::body(22.0, 26.0, INK).bold().centered(),
            )
            .space_after(4.0),
        ));
    }
    let contact = contact_line(person, " \u{2022} ");
    if !contact.is_empty() {
        blocks.push(Block::Paragraph(
            Paragraph::new(contact, TextStyle::body(9.5, 12.0, META).centered()).space_after(14.0),
        ));
    }

    let heading = |text: &str, blocks: &mut Vec<Block>| {
        blocks.push(Block::Paragraph(
            Paragraph::new(
                format!("\u{2022} {text} \u{2022}"),
                TextStyle::body(12.5, 15.0, accent).bold().centered(),
            )
            .space_before(12.0)
            .space_after(6.0),
        ));
    };

    if !content.summary.trim().is_empty() {
        heading("PROFESSIONAL PROFILE", &mut blocks);
        blocks.push(Block::Paragraph(
            Paragraph::new(
                content.summary.trim(),
                TextStyle::body(10.0, 14.0, BODY).centered(),
            )
            .space_after(4.0),
        ));
    }

    if !content.skills.is_empty() {
        heading("EXPERTISE", &mut blocks);
        let cell_style = TextStyle::body(9.5, 12.0, SLATE_MUTED).centered();
        let rows = row_major_rows(&content.skills, 4)
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|skill| {
                        if skill.is_empty() {
                            Cell::empty()
                        } else {
                            Cell::text(skill, cell_style)
                        }
                    })
                    .collect()
            })
            .collect();
        blocks.push(Block::Grid(Grid {
            rows,
            col_widths: vec![127.8, 127.8, 127.8, 127.8],
            style: GridStyle {
                padding: 3.0,
                ..Default::default()
            },
            indent: 0.0,
            space_after: 4.0,
        }));
    }

    if !content.experience.is_empty() {
        heading("EXPERIENCE", &mut blocks);
        for entry in &content.experience {
            push_experience_entry(&mut blocks, entry, accent, 0.0);
        }
    }

    if !content.education.is_empty() {
        heading("EDUCATION", &mut blocks);
        push_education_lines(&mut blocks, content, Align::Center);
    }

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Modern
// ────────────────────────────────────────────────────────────────────────────

fn modern_blocks(style: &StyleSpec, person: &PersonInfo, content: &ResumeContent) -> Vec<Block> {
    let accent = style.accent;
    let mut blocks = Vec::new();

    if !person.name.trim().is_empty() {
        blocks.push(Block::Paragraph(
            Paragraph::new(person.name.trim(), TextStyle::body(22.0, 26.0, SLATE).bold())
                .space_after(3.0),
        ));
    }
    let contact = contact_line(person, " | ");
    if !contact.is_empty() {
        blocks.push(Block::Paragraph(
            Paragraph::new(contact, TextStyle::body(9.5, 12.0, META)).space_after(12.0),
        ));
    }

    // Full-width accent bar with white label.
    let heading = |text: &str, blocks: &mut Vec<Block>| {
        blocks.push(Block::Spacer(10.0));
        blocks.push(Block::Grid(Grid {
            rows: vec![vec![Cell::text(
                text,
                TextStyle::body(11.5, 14.0, WHITE).bold(),
            )]],
            col_widths: vec![540.0],
            style: GridStyle {
                background: Some(accent),
                padding: 4.0,
                ..Default::default()
            },
            indent: 0.0,
            space_after: 8.0,
        }));
    };

    if !content.summary.trim().is_empty() {
        heading("PROFESSIONAL SUMMARY", &mut blocks);
        blocks.push(Block::Paragraph(
            Paragraph::new(content.summary.trim(), TextStyle::body(10.0, 14.0, BODY))
                .space_after(4.0),
        ));
    }

    if !content.skills.is_empty() {
        heading("SKILLS", &mut blocks);
        let cell_style = TextStyle::body(10.0, 13.0, SLATE_MUTED);
        let rows = column_major_rows(&content.skills)
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|skill| {
                        if skill.is_empty() {
                            Cell::empty()
                        } else {
                            Cell::text(format!("\u{2022} {skill}"), cell_style)
                        }
                    })
                    .collect()
            })
            .collect();
        blocks.push(Block::Grid(Grid {
            rows,
            col_widths: vec![270.0, 270.0],
            style: GridStyle {
                padding: 2.0,
                ..Default::default()
            },
            indent: 0.0,
            space_after: 4.0,
        }));
    }

    if !content.experience.is_empty() {
        heading("WORK HISTORY", &mut blocks);
        // Label column (period, company) beside the detail column. One grid
        // row per entry; page breaks fall between entries.
        let rows = content
            .experience
            .iter()
            .map(|entry| {
                let mut label = Vec::new();
                if !entry.period.trim().is_empty() {
                    label.push(Paragraph::new(
                        entry.period.trim(),
                        TextStyle::body(9.5, 12.0, accent).bold(),
                    ));
                }
                if !entry.company.trim().is_empty() {
                    label.push(Paragraph::new(
                        entry.company.trim(),
                        TextStyle::body(9.5, 12.0, META),
                    ));
                }

                let mut detail = Vec::new();
                if !entry.title.trim().is_empty() {
                    detail.push(
                        Paragraph::new(entry.title.trim(), TextStyle::body(11.0, 14.0, SLATE).bold())
                            .space_after(2.0),
                    );
                }
                for achievement in &entry.achievements {
                    if achievement.trim().is_empty() {
                        continue;
                    }
                    detail.push(Paragraph::new(
                        format!("\u{2022} {}", achievement.trim()),
                        TextStyle::body(10.0, 13.0, BODY).indented(10.0, 10.0),
                    ));
                }
                vec![Cell::paras(label), Cell::paras(detail)]
            })
            .collect();
        blocks.push(Block::Grid(Grid {
            rows,
            col_widths: vec![158.4, 381.6],
            style: GridStyle {
                padding: 4.0,
                ..Default::default()
            },
            indent: 0.0,
            space_after: 4.0,
        }));
    }

    if !content.education.is_empty() {
        heading("EDUCATION", &mut blocks);
        push_education_lines(&mut blocks, content, Align::Left);
    }

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Shared section bodies
// ────────────────────────────────────────────────────────────────────────────

fn push_experience_entry(
    blocks: &mut Vec<Block>,
    entry: &crate::models::resume::ExperienceEntry,
    accent: crate::render::style::Rgb,
    indent: f32,
) {
    if !entry.title.trim().is_empty() {
        blocks.push(Block::Paragraph(
            Paragraph::new(
                entry.title.trim(),
                TextStyle::body(11.0, 14.0, INK).bold().indented(indent, 0.0),
            )
            .space_before(8.0),
        ));
    }
    let byline = [entry.company.trim(), entry.period.trim()]
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" \u{2022} ");
    if !byline.is_empty() {
        blocks.push(Block::Paragraph(
            Paragraph::new(byline, TextStyle::body(9.5, 12.0, accent).indented(indent, 0.0))
                .space_after(3.0),
        ));
    }
    for achievement in &entry.achievements {
        if achievement.trim().is_empty() {
            continue;
        }
        blocks.push(Block::Paragraph(
            Paragraph::new(
                format!("\u{2022} {}", achievement.trim()),
                TextStyle::body(10.0, 13.0, BODY).indented(indent + 10.0, 10.0),
            )
            .space_after(2.0),
        ));
    }
}

fn push_education_lines(blocks: &mut Vec<Block>, content: &ResumeContent, align: Align) {
    for entry in &content.education {
        let line = [entry.degree.trim(), entry.institution.trim(), entry.year.trim()]
            .iter()
            .filter(|s| !s.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if line.is_empty() {
            continue;
        }
        let mut style = TextStyle::body(10.0, 13.0, BODY);
        if align == Align::Center {
            style = style.centered();
        }
        blocks.push(Block::Paragraph(Paragraph::new(line, style).space_after(3.0)));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
