//! Paginator — flows a block sequence onto letter pages, emitting the
//! foreground content operations for each page.
//!
//! The cursor moves top-down in PDF coordinates (origin bottom-left).
//! Paragraphs split line-by-line across page breaks; grids break between
//! rows, keeping a row atomic unless it is taller than a whole page, in
//! which case it breaks between lines; rules and spacers never straddle a
//! break.
//! Pending inter-block space collapses at the top of a fresh page, so no
//! page starts with leading whitespace.

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

use crate::render::blocks::{Align, Block, Grid, GridStyle, Paragraph, Rule, TextStyle};
use crate::render::metrics::{metrics_for, FontMetricTable};
use crate::render::style::{Rgb, StyleSpec};
use crate::render::{PageMargins, TemplateKind, PAGE_HEIGHT};

/// Encodes text for a WinAnsi-encoded base-14 font. ASCII and Latin-1 pass
/// through; the common typographic punctuation in the 0x80..0x9F window is
/// mapped explicitly; anything else becomes '?'.
pub(crate) fn encode_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u8,
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2026}' => 0x85, // ellipsis
            '\u{20ac}' => 0x80, // euro
            '\u{2122}' => 0x99, // trademark
            _ => b'?',
        })
        .collect()
}

/// One wrapped line ready for emission.
struct Line {
    text: String,
    style: TextStyle,
    /// Vertical advance charged after the line (leading, plus any paragraph
    /// trailing space on its last line).
    advance: f32,
    /// First line of its paragraph; carries the hanging-indent offset.
    first: bool,
}

pub struct Paginator {
    style: StyleSpec,
    margins: PageMargins,
    content_width: f32,
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    /// Top of the next line, in page coordinates.
    y: f32,
    /// Inter-block space owed before the next flowable lands.
    pending_space: f32,
    at_page_top: bool,
}

impl Paginator {
    pub fn new(kind: TemplateKind, style: StyleSpec) -> Self {
        let margins = kind.margins();
        Self {
            style,
            margins,
            content_width: kind.content_width(),
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - margins.top,
            pending_space: 0.0,
            at_page_top: true,
        }
    }

    pub fn place(&mut self, block: &Block) {
        match block {
            Block::Paragraph(p) => self.place_paragraph(p),
            Block::Spacer(h) => self.pending_space = self.pending_space.max(*h),
            Block::Rule(r) => self.place_rule(r),
            Block::Grid(g) => self.place_grid(g),
        }
    }

    /// Closes the current page and returns all pages. A document always has
    /// at least one page, even when nothing was placed.
    pub fn finish(mut self) -> Vec<Vec<Operation>> {
        self.pages.push(std::mem::take(&mut self.current));
        self.pages
    }

    fn metrics(&self) -> &'static FontMetricTable {
        metrics_for(self.style.font)
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = PAGE_HEIGHT - self.margins.top;
        self.pending_space = 0.0;
        self.at_page_top = true;
    }

    /// Settles pending space and breaks the page if the next `height` points
    /// of content cannot fit above the bottom margin. At the top of a page
    /// the pending space is dropped instead of applied.
    fn make_room(&mut self, height: f32) {
        if self.at_page_top {
            self.pending_space = 0.0;
            return;
        }
        if self.y - self.pending_space - height < self.margins.bottom {
            self.new_page();
        } else {
            self.y -= self.pending_space;
            self.pending_space = 0.0;
        }
    }

    // ── Paragraphs ──────────────────────────────────────────────────────

    fn place_paragraph(&mut self, p: &Paragraph) {
        self.pending_space = self.pending_space.max(p.space_before);

        let wrap_width = (self.content_width - p.style.indent).max(1.0);
        let lines = self
            .metrics()
            .wrap(&p.text, p.style.size, p.style.bold, wrap_width);
        if lines.is_empty() {
            self.pending_space = self.pending_space.max(p.space_after);
            return;
        }

        for (i, line) in lines.iter().enumerate() {
            self.make_room(p.style.leading);
            self.emit_line(line, &p.style, self.margins.left, self.content_width, i == 0);
            self.y -= p.style.leading;
            self.at_page_top = false;
        }
        self.pending_space = p.space_after;
    }

    /// Emits one line of text. `origin` is the left edge and `width` the
    /// horizontal extent the line is positioned within.
    fn emit_line(&mut self, text: &str, style: &TextStyle, origin: f32, width: f32, first: bool) {
        let line_width = self.metrics().measure(text, style.size, style.bold);
        let x = match style.align {
            Align::Center => origin + style.indent + (width - style.indent - line_width).max(0.0) / 2.0,
            Align::Left => {
                let hang = if first { style.hang } else { 0.0 };
                origin + (style.indent - hang).max(0.0)
            }
        };
        let baseline = self.y - style.size;
        let font: &str = if style.bold { "F2" } else { "F1" };

        self.current.push(Operation::new("BT", vec![]));
        self.current
            .push(Operation::new("Tf", vec![font.into(), style.size.into()]));
        self.current.push(Operation::new(
            "rg",
            vec![
                style.color.r.into(),
                style.color.g.into(),
                style.color.b.into(),
            ],
        ));
        self.current
            .push(Operation::new("Td", vec![x.into(), baseline.into()]));
        self.current.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        self.current.push(Operation::new("ET", vec![]));
    }

    // ── Rules ───────────────────────────────────────────────────────────

    fn place_rule(&mut self, r: &Rule) {
        self.make_room(r.thickness);
        self.current.push(Operation::new("q", vec![]));
        self.push_fill_color(r.color);
        self.current.push(Operation::new(
            "re",
            vec![
                self.margins.left.into(),
                (self.y - r.thickness).into(),
                r.width.into(),
                r.thickness.into(),
            ],
        ));
        self.current.push(Operation::new("f", vec![]));
        self.current.push(Operation::new("Q", vec![]));
        self.y -= r.thickness;
        self.at_page_top = false;
        self.pending_space = r.space_after;
    }

    fn push_fill_color(&mut self, color: Rgb) {
        self.current.push(Operation::new(
            "rg",
            vec![color.r.into(), color.g.into(), color.b.into()],
        ));
    }

    // ── Grids ───────────────────────────────────────────────────────────

    fn place_grid(&mut self, g: &Grid) {
        let usable = PAGE_HEIGHT - self.margins.top - self.margins.bottom;
        for row in &g.rows {
            let (cell_lines, row_height) = self.layout_row(g, row);
            if row_height <= usable {
                self.make_room(row_height);
                self.emit_row(g, &cell_lines, row_height);
                self.y -= row_height;
                self.at_page_top = false;
            } else {
                self.place_oversized_row(g, cell_lines);
            }
        }
        self.pending_space = self.pending_space.max(g.space_after);
    }

    /// A row taller than one page cannot be kept atomic; it is emitted in
    /// page-height segments breaking between lines, each segment drawn as
    /// its own boxed row, so no line ever lands below the bottom margin.
    fn place_oversized_row(&mut self, g: &Grid, cell_lines: Vec<Vec<Line>>) {
        // Start on a fresh page so segments fill whole pages.
        self.make_room(PAGE_HEIGHT - self.margins.top - self.margins.bottom);
        let mut cells = cell_lines;
        loop {
            let budget = self.y - self.margins.bottom;
            let (head, head_height, tail) = Self::take_segment(&g.style, cells, budget);
            self.emit_row(g, &head, head_height);
            self.y -= head_height;
            self.at_page_top = false;
            if tail.iter().all(|c| c.is_empty()) {
                break;
            }
            self.new_page();
            cells = tail;
        }
    }

    /// Splits cell lines into the segment that fits within `budget` points
    /// and the remainder. At least one line per non-empty cell is always
    /// taken, so progress is guaranteed.
    fn take_segment(
        style: &GridStyle,
        cells: Vec<Vec<Line>>,
        budget: f32,
    ) -> (Vec<Vec<Line>>, f32, Vec<Vec<Line>>) {
        let inner = budget - 2.0 * style.padding;
        let mut head = Vec::with_capacity(cells.len());
        let mut tail = Vec::with_capacity(cells.len());
        let mut tallest = 0.0_f32;

        for lines in cells {
            let mut height = 0.0_f32;
            let mut head_lines = Vec::new();
            let mut tail_lines = Vec::new();
            for line in lines {
                let fits = height + line.advance <= inner || head_lines.is_empty();
                if fits && tail_lines.is_empty() {
                    height += line.advance;
                    head_lines.push(line);
                } else {
                    tail_lines.push(line);
                }
            }
            tallest = tallest.max(height);
            head.push(head_lines);
            tail.push(tail_lines);
        }
        (head, tallest + 2.0 * style.padding, tail)
    }

    /// Wraps every cell of a row and returns the wrapped lines plus the row
    /// height (tallest cell plus vertical padding).
    fn layout_row(&self, g: &Grid, row: &[crate::render::blocks::Cell]) -> (Vec<Vec<Line>>, f32) {
        let metrics = self.metrics();
        let mut cell_lines = Vec::with_capacity(row.len());
        let mut tallest = 0.0_f32;

        for (cell, col_width) in row.iter().zip(&g.col_widths) {
            let avail = (col_width - 2.0 * g.style.padding).max(1.0);
            let mut lines = Vec::new();
            let mut height = 0.0_f32;
            for para in &cell.paras {
                let wrap_width = (avail - para.style.indent).max(1.0);
                let wrapped = metrics.wrap(&para.text, para.style.size, para.style.bold, wrap_width);
                let last = wrapped.len().saturating_sub(1);
                for (i, text) in wrapped.into_iter().enumerate() {
                    let advance = para.style.leading + if i == last { para.space_after } else { 0.0 };
                    height += advance;
                    lines.push(Line {
                        text,
                        style: para.style,
                        advance,
                        first: i == 0,
                    });
                }
            }
            tallest = tallest.max(height);
            cell_lines.push(lines);
        }
        (cell_lines, tallest + 2.0 * g.style.padding)
    }

    fn emit_row(&mut self, g: &Grid, cell_lines: &[Vec<Line>], row_height: f32) {
        let x0 = self.margins.left + g.indent;
        let row_top = self.y;
        let row_bottom = row_top - row_height;
        let total_width = g.total_width();

        if let Some(bg) = g.style.background {
            self.current.push(Operation::new("q", vec![]));
            self.push_fill_color(bg);
            self.current.push(Operation::new(
                "re",
                vec![
                    x0.into(),
                    row_bottom.into(),
                    total_width.into(),
                    row_height.into(),
                ],
            ));
            self.current.push(Operation::new("f", vec![]));
            self.current.push(Operation::new("Q", vec![]));
        }

        if let Some((line_width, color)) = g.style.box_lines {
            self.current.push(Operation::new("q", vec![]));
            self.current.push(Operation::new(
                "RG",
                vec![color.r.into(), color.g.into(), color.b.into()],
            ));
            self.current
                .push(Operation::new("w", vec![line_width.into()]));
            let mut cell_x = x0;
            for col_width in &g.col_widths {
                self.current.push(Operation::new(
                    "re",
                    vec![
                        cell_x.into(),
                        row_bottom.into(),
                        (*col_width).into(),
                        row_height.into(),
                    ],
                ));
                self.current.push(Operation::new("S", vec![]));
                cell_x += col_width;
            }
            self.current.push(Operation::new("Q", vec![]));
        }

        if let Some((line_width, color)) = g.style.line_before {
            self.current.push(Operation::new("q", vec![]));
            self.current.push(Operation::new(
                "RG",
                vec![color.r.into(), color.g.into(), color.b.into()],
            ));
            self.current
                .push(Operation::new("w", vec![line_width.into()]));
            self.current
                .push(Operation::new("m", vec![x0.into(), row_top.into()]));
            self.current
                .push(Operation::new("l", vec![x0.into(), row_bottom.into()]));
            self.current.push(Operation::new("S", vec![]));
            self.current.push(Operation::new("Q", vec![]));
        }

        let mut cell_x = x0;
        for (lines, col_width) in cell_lines.iter().zip(&g.col_widths) {
            let avail = (col_width - 2.0 * g.style.padding).max(1.0);
            let mut cursor = row_top - g.style.padding;
            for line in lines {
                let saved = self.y;
                self.y = cursor;
                self.emit_line(
                    &line.text,
                    &line.style,
                    cell_x + g.style.padding,
                    avail,
                    line.first,
                );
                self.y = saved;
                cursor -= line.advance;
            }
            cell_x += col_width;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::blocks::{Cell, GridStyle};
    use crate::render::style::{BODY, INK};

    fn paginator() -> Paginator {
        Paginator::new(
            TemplateKind::Sidebar,
            StyleSpec::resolve("blue", "helvetica"),
        )
    }

    fn body_para(text: &str) -> Block {
        Block::Paragraph(Paragraph::new(text, TextStyle::body(10.0, 14.0, BODY)))
    }

    fn td_positions(ops: &[Operation]) -> Vec<(f32, f32)> {
        ops.iter()
            .filter(|op| op.operator == "Td")
            .map(|op| {
                (
                    op.operands[0].as_f32().unwrap(),
                    op.operands[1].as_f32().unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_encode_win_ansi_mappings() {
        assert_eq!(encode_win_ansi("abc"), b"abc");
        assert_eq!(encode_win_ansi("\u{2022}"), vec![0x95]);
        assert_eq!(encode_win_ansi("\u{bb}"), vec![0xbb]);
        assert_eq!(encode_win_ansi("\u{2013}"), vec![0x96]);
        // Unmappable glyphs degrade to '?', never drop.
        assert_eq!(encode_win_ansi("\u{2713}"), b"?");
    }

    #[test]
    fn test_empty_document_is_one_page() {
        let pages = paginator().finish();
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_single_paragraph_single_page() {
        let mut p = paginator();
        p.place(&body_para("Hello"));
        let pages = p.finish();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].iter().filter(|o| o.operator == "Tj").count(), 1);
    }

    #[test]
    fn test_first_line_starts_below_top_margin() {
        let mut p = paginator();
        p.place(&body_para("Hello"));
        let pages = p.finish();
        let (x, baseline) = td_positions(&pages[0])[0];
        let margins = TemplateKind::Sidebar.margins();
        assert_eq!(x, margins.left);
        assert_eq!(baseline, PAGE_HEIGHT - margins.top - 10.0);
    }

    #[test]
    fn test_overflow_breaks_to_new_page() {
        let mut p = paginator();
        // Sidebar usable height is 720pt; at 14pt leading, 52 lines per page.
        for i in 0..60 {
            p.place(&body_para(&format!("Line {i}")));
        }
        let pages = p.finish();
        assert_eq!(pages.len(), 2);
        assert!(!pages[1].is_empty());
    }

    #[test]
    fn test_every_overflow_page_has_content() {
        let mut p = paginator();
        for i in 0..200 {
            p.place(&body_para(&format!("Line {i}")));
        }
        let pages = p.finish();
        assert!(pages.len() >= 3);
        for page in &pages {
            assert!(page.iter().any(|o| o.operator == "Tj"));
        }
    }

    #[test]
    fn test_long_paragraph_splits_line_by_line() {
        let mut p = paginator();
        let long = "word ".repeat(2000);
        p.place(&body_para(&long));
        let pages = p.finish();
        assert!(pages.len() >= 2);
        // Both sides of the break carry lines of the same paragraph.
        assert!(pages[0].iter().any(|o| o.operator == "Tj"));
        assert!(pages[1].iter().any(|o| o.operator == "Tj"));
    }

    #[test]
    fn test_pending_space_dropped_at_page_top() {
        let mut p = paginator();
        // Exactly fills page one: 51 lines at 14pt in 720pt of usable height.
        for i in 0..51 {
            p.place(&body_para(&format!("Line {i}")));
        }
        // Large inter-block space right at the page boundary.
        p.place(&Block::Spacer(100.0));
        p.place(&body_para("After break"));
        let pages = p.finish();
        assert_eq!(pages.len(), 2);
        let (_, baseline) = td_positions(&pages[1])[0];
        let margins = TemplateKind::Sidebar.margins();
        // The new page starts at the top margin, not 100pt down.
        assert_eq!(baseline, PAGE_HEIGHT - margins.top - 10.0);
    }

    #[test]
    fn test_centered_line_is_offset_right() {
        let mut p = Paginator::new(
            TemplateKind::Circle,
            StyleSpec::resolve("blue", "helvetica"),
        );
        p.place(&Block::Paragraph(Paragraph::new(
            "Hi",
            TextStyle::body(10.0, 14.0, INK).centered(),
        )));
        let pages = p.finish();
        let (x, _) = td_positions(&pages[0])[0];
        let margins = TemplateKind::Circle.margins();
        assert!(x > margins.left + 200.0);
    }

    #[test]
    fn test_hanging_indent_outdents_first_line_only() {
        let mut p = paginator();
        let long = "alpha ".repeat(120);
        p.place(&Block::Paragraph(Paragraph::new(
            format!("\u{2022} {long}"),
            TextStyle::body(10.0, 13.0, BODY).indented(10.0, 10.0),
        )));
        let pages = p.finish();
        let xs: Vec<f32> = td_positions(&pages[0]).iter().map(|&(x, _)| x).collect();
        assert!(xs.len() > 1);
        let margins = TemplateKind::Sidebar.margins();
        assert_eq!(xs[0], margins.left);
        assert!(xs[1..].iter().all(|&x| x == margins.left + 10.0));
    }

    #[test]
    fn test_rule_emits_filled_rect() {
        let mut p = paginator();
        p.place(&Block::Rule(Rule {
            width: 72.0,
            thickness: 2.0,
            color: INK,
            space_after: 8.0,
        }));
        let pages = p.finish();
        let rect = pages[0].iter().find(|o| o.operator == "re").unwrap();
        assert_eq!(rect.operands[2].as_f32().unwrap(), 72.0);
        assert_eq!(rect.operands[3].as_f32().unwrap(), 2.0);
    }

    #[test]
    fn test_grid_row_never_splits_across_pages() {
        let mut p = paginator();
        // Fill the page so only ~20pt remain.
        for i in 0..50 {
            p.place(&body_para(&format!("Line {i}")));
        }
        // A row three lines tall cannot fit in the remainder.
        let row = vec![Cell::paras(vec![
            Paragraph::new("one", TextStyle::body(10.0, 13.0, BODY)),
            Paragraph::new("two", TextStyle::body(10.0, 13.0, BODY)),
            Paragraph::new("three", TextStyle::body(10.0, 13.0, BODY)),
        ])];
        p.place(&Block::Grid(Grid {
            rows: vec![row],
            col_widths: vec![148.8],
            style: GridStyle::default(),
            indent: 0.0,
            space_after: 0.0,
        }));
        let pages = p.finish();
        assert_eq!(pages.len(), 2);
        // All three grid lines landed on page two.
        assert_eq!(pages[1].iter().filter(|o| o.operator == "Tj").count(), 3);
    }

    #[test]
    fn test_grid_row_taller_than_page_splits_between_lines() {
        // A boxed one-column row with 80 bullet lines is taller than any
        // page; it must continue onto further pages instead of running
        // past the bottom margin.
        let mut p = Paginator::new(
            TemplateKind::Diagonal,
            StyleSpec::resolve("blue", "helvetica"),
        );
        let paras: Vec<Paragraph> = (0..80)
            .map(|i| {
                Paragraph::new(
                    format!("\u{2022} Achievement {i}"),
                    TextStyle::body(10.0, 13.5, BODY).indented(10.0, 10.0),
                )
            })
            .collect();
        p.place(&Block::Grid(Grid {
            rows: vec![vec![Cell::paras(paras)]],
            col_widths: vec![525.6],
            style: GridStyle {
                line_before: Some((2.0, INK)),
                padding: 6.0,
                ..Default::default()
            },
            indent: 0.0,
            space_after: 0.0,
        }));
        let pages = p.finish();
        assert!(pages.len() >= 2);
        let margins = TemplateKind::Diagonal.margins();
        let mut total_lines = 0;
        for page in &pages {
            let positions = td_positions(page);
            assert!(!positions.is_empty());
            for &(_, baseline) in &positions {
                assert!(baseline >= margins.bottom);
                assert!(baseline <= PAGE_HEIGHT - margins.top);
            }
            total_lines += positions.len();
        }
        assert_eq!(total_lines, 80);
    }

    #[test]
    fn test_grid_cells_land_in_their_columns() {
        let mut p = paginator();
        let style = TextStyle::body(9.5, 12.0, BODY);
        p.place(&Block::Grid(Grid {
            rows: vec![vec![
                Cell::text("left", style),
                Cell::text("mid", style),
                Cell::text("right", style),
            ]],
            col_widths: vec![148.8, 148.8, 148.8],
            style: GridStyle {
                padding: 4.0,
                ..Default::default()
            },
            indent: 0.0,
            space_after: 0.0,
        }));
        let pages = p.finish();
        let xs: Vec<f32> = td_positions(&pages[0]).iter().map(|&(x, _)| x).collect();
        let left = TemplateKind::Sidebar.margins().left;
        let expected = [left + 4.0, left + 148.8 + 4.0, left + 2.0 * 148.8 + 4.0];
        assert_eq!(xs.len(), 3);
        for (x, want) in xs.iter().zip(expected) {
            assert!((x - want).abs() < 1e-3);
        }
    }

    #[test]
    fn test_grid_background_covers_row() {
        let mut p = paginator();
        let style = TextStyle::body(9.5, 12.0, BODY);
        p.place(&Block::Grid(Grid {
            rows: vec![vec![Cell::text("a", style), Cell::text("b", style)]],
            col_widths: vec![148.8, 148.8],
            style: GridStyle {
                background: Some(INK),
                padding: 4.0,
                ..Default::default()
            },
            indent: 0.0,
            space_after: 0.0,
        }));
        let pages = p.finish();
        let rect = pages[0].iter().find(|o| o.operator == "re").unwrap();
        assert_eq!(rect.operands[2].as_f32().unwrap(), 297.6);
        // One line at 12pt leading plus 4pt padding on both sides.
        assert_eq!(rect.operands[3].as_f32().unwrap(), 20.0);
    }
}
