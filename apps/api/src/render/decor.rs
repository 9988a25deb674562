//! Page decoration — the template-specific background art stamped beneath
//! the flowed content of every page.
//!
//! The operations returned here are encoded once into a single shared
//! content stream, so the art is identical on every page of a document by
//! construction. Translucency uses the named ExtGState alpha entries the
//! document resources register (Ga10, Ga15, Ga20).

use lopdf::content::Operation;

use crate::models::resume::PersonInfo;
use crate::render::paginate::encode_win_ansi;
use crate::render::style::{Rgb, StyleSpec};
use crate::render::{TemplateKind, PAGE_HEIGHT, PAGE_WIDTH};

/// Cubic Bézier circle approximation constant.
const BEZIER_K: f32 = 0.552_284_75;

/// Builds the background operations for one template. Modern returns no
/// operations; its pages carry a single foreground stream.
pub fn decoration_ops(kind: TemplateKind, style: &StyleSpec, person: &PersonInfo) -> Vec<Operation> {
    match kind {
        TemplateKind::Sidebar => sidebar_ops(style.accent),
        TemplateKind::Diagonal => diagonal_ops(style, person),
        TemplateKind::Circle => circle_ops(style.accent),
        TemplateKind::Modern => Vec::new(),
    }
}

fn set_fill(ops: &mut Vec<Operation>, color: Rgb) {
    ops.push(Operation::new(
        "rg",
        vec![color.r.into(), color.g.into(), color.b.into()],
    ));
}

fn fill_rect(ops: &mut Vec<Operation>, x: f32, y: f32, w: f32, h: f32) {
    ops.push(Operation::new(
        "re",
        vec![x.into(), y.into(), w.into(), h.into()],
    ));
    ops.push(Operation::new("f", vec![]));
}

/// Appends a filled circle as four Bézier arcs.
fn fill_circle(ops: &mut Vec<Operation>, cx: f32, cy: f32, r: f32) {
    let k = BEZIER_K * r;
    ops.push(Operation::new("m", vec![(cx + r).into(), cy.into()]));
    ops.push(Operation::new(
        "c",
        vec![
            (cx + r).into(),
            (cy + k).into(),
            (cx + k).into(),
            (cy + r).into(),
            cx.into(),
            (cy + r).into(),
        ],
    ));
    ops.push(Operation::new(
        "c",
        vec![
            (cx - k).into(),
            (cy + r).into(),
            (cx - r).into(),
            (cy + k).into(),
            (cx - r).into(),
            cy.into(),
        ],
    ));
    ops.push(Operation::new(
        "c",
        vec![
            (cx - r).into(),
            (cy - k).into(),
            (cx - k).into(),
            (cy - r).into(),
            cx.into(),
            (cy - r).into(),
        ],
    ));
    ops.push(Operation::new(
        "c",
        vec![
            (cx + k).into(),
            (cy - r).into(),
            (cx + r).into(),
            (cy - k).into(),
            (cx + r).into(),
            cy.into(),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
}

/// Solid accent band down the left edge, with a faint rotated white stripe
/// crossing it midway.
fn sidebar_ops(accent: Rgb) -> Vec<Operation> {
    let mut ops = Vec::new();

    ops.push(Operation::new("q", vec![]));
    set_fill(&mut ops, accent);
    fill_rect(&mut ops, 0.0, 0.0, 108.0, PAGE_HEIGHT);
    ops.push(Operation::new("Q", vec![]));

    // 45-degree white stripe at 10% alpha, centered on the band.
    let (c, s) = (0.707_106_78_f32, 0.707_106_78_f32);
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("gs", vec!["Ga10".into()]));
    ops.push(Operation::new(
        "cm",
        vec![
            c.into(),
            s.into(),
            (-s).into(),
            c.into(),
            54.0_f32.into(),
            396.0_f32.into(),
        ],
    ));
    set_fill(&mut ops, crate::render::style::WHITE);
    fill_rect(&mut ops, -144.0, -36.0, 288.0, 72.0);
    ops.push(Operation::new("Q", vec![]));

    ops
}

/// Slanted accent banner across the top of the page, a translucent white
/// disc overlapping its right end, and the candidate's name in white inside
/// the banner. The banner doubles as a running header: the name appears on
/// every page.
fn diagonal_ops(style: &StyleSpec, person: &PersonInfo) -> Vec<Operation> {
    let mut ops = Vec::new();

    ops.push(Operation::new("q", vec![]));
    set_fill(&mut ops, style.accent);
    ops.push(Operation::new("m", vec![0.0_f32.into(), PAGE_HEIGHT.into()]));
    ops.push(Operation::new(
        "l",
        vec![PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    ));
    ops.push(Operation::new("l", vec![PAGE_WIDTH.into(), 684.0_f32.into()]));
    ops.push(Operation::new("l", vec![0.0_f32.into(), 720.0_f32.into()]));
    ops.push(Operation::new("h", vec![]));
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));

    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("gs", vec!["Ga20".into()]));
    set_fill(&mut ops, crate::render::style::WHITE);
    fill_circle(&mut ops, 540.0, 741.6, 57.6);
    ops.push(Operation::new("Q", vec![]));

    let name = person.name.trim().to_uppercase();
    if !name.is_empty() {
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec!["F2".into(), 24.0_f32.into()]));
        set_fill(&mut ops, crate::render::style::WHITE);
        ops.push(Operation::new("Td", vec![43.2_f32.into(), 738.0_f32.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![lopdf::Object::String(
                encode_win_ansi(&name),
                lopdf::StringFormat::Literal,
            )],
        ));
        ops.push(Operation::new("ET", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    ops
}

/// Four translucent accent circles scattered around the page corners.
fn circle_ops(accent: Rgb) -> Vec<Operation> {
    let mut ops = Vec::new();

    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("gs", vec!["Ga10".into()]));
    set_fill(&mut ops, accent);
    fill_circle(&mut ops, 36.0, 756.0, 86.4);
    fill_circle(&mut ops, 561.6, 57.6, 57.6);
    ops.push(Operation::new("Q", vec![]));

    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("gs", vec!["Ga15".into()]));
    set_fill(&mut ops, accent);
    fill_circle(&mut ops, 72.0, 360.0, 28.8);
    fill_circle(&mut ops, 518.4, 504.0, 36.0);
    ops.push(Operation::new("Q", vec![]));

    ops
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::style::resolve_color;

    fn person() -> PersonInfo {
        PersonInfo {
            name: "Ada Lovelace".to_string(),
            ..Default::default()
        }
    }

    fn has_op(ops: &[Operation], operator: &str) -> bool {
        ops.iter().any(|op| op.operator == operator)
    }

    #[test]
    fn test_modern_has_no_decoration() {
        let style = StyleSpec::resolve("blue", "helvetica");
        assert!(decoration_ops(TemplateKind::Modern, &style, &person()).is_empty());
    }

    #[test]
    fn test_sidebar_band_spans_full_height() {
        let style = StyleSpec::resolve("blue", "helvetica");
        let ops = decoration_ops(TemplateKind::Sidebar, &style, &person());
        let band = ops
            .iter()
            .find(|op| op.operator == "re")
            .expect("band rectangle");
        assert_eq!(band.operands[2].as_f32().unwrap(), 108.0);
        assert_eq!(band.operands[3].as_f32().unwrap(), PAGE_HEIGHT);
    }

    #[test]
    fn test_circle_uses_accent_fill_color() {
        let style = StyleSpec::resolve("teal", "helvetica");
        let ops = decoration_ops(TemplateKind::Circle, &style, &person());
        let teal = resolve_color("teal");
        let found = ops.iter().any(|op| {
            op.operator == "rg"
                && (op.operands[0].as_f32().unwrap() - teal.r).abs() < 1e-6
                && (op.operands[1].as_f32().unwrap() - teal.g).abs() < 1e-6
                && (op.operands[2].as_f32().unwrap() - teal.b).abs() < 1e-6
        });
        assert!(found, "expected teal rg operator in decoration");
    }

    #[test]
    fn test_circle_alpha_states() {
        let style = StyleSpec::resolve("teal", "helvetica");
        let ops = decoration_ops(TemplateKind::Circle, &style, &person());
        let gs_names: Vec<String> = ops
            .iter()
            .filter(|op| op.operator == "gs")
            .map(|op| String::from_utf8_lossy(op.operands[0].as_name().unwrap()).into_owned())
            .collect();
        assert_eq!(gs_names, vec!["Ga10", "Ga15"]);
    }

    #[test]
    fn test_diagonal_paints_name_in_banner() {
        let style = StyleSpec::resolve("purple", "helvetica");
        let ops = decoration_ops(TemplateKind::Diagonal, &style, &person());
        let text = ops
            .iter()
            .find(|op| op.operator == "Tj")
            .expect("banner name");
        match &text.operands[0] {
            lopdf::Object::String(bytes, _) => {
                assert_eq!(bytes, b"ADA LOVELACE");
            }
            other => panic!("unexpected Tj operand: {other:?}"),
        }
    }

    #[test]
    fn test_diagonal_without_name_paints_no_text() {
        let style = StyleSpec::resolve("purple", "helvetica");
        let ops = decoration_ops(TemplateKind::Diagonal, &style, &PersonInfo::default());
        assert!(!has_op(&ops, "Tj"));
        assert!(!has_op(&ops, "BT"));
        // The banner art itself is still present.
        assert!(has_op(&ops, "f"));
    }

    #[test]
    fn test_sidebar_balanced_graphics_state() {
        let style = StyleSpec::resolve("rose", "helvetica");
        let ops = decoration_ops(TemplateKind::Sidebar, &style, &person());
        let pushes = ops.iter().filter(|op| op.operator == "q").count();
        let pops = ops.iter().filter(|op| op.operator == "Q").count();
        assert_eq!(pushes, pops);
    }
}
