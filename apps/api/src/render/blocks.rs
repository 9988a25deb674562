//! Layout blocks — the units of flowed content produced by the flow engine
//! and consumed by the paginator.
//!
//! A block describes WHAT goes on the page (text, spacing, rules, grids) and
//! its styling metadata; the paginator decides WHERE it lands and when a
//! page break occurs. Blocks are template-agnostic: all template-specific
//! geometry is baked in by the flow engine when it builds the sequence.

use crate::render::style::Rgb;

/// Horizontal alignment of a paragraph within its available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Text styling applied to a whole paragraph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    /// Baseline-to-baseline distance. Also the height charged per line.
    pub leading: f32,
    pub bold: bool,
    pub color: Rgb,
    pub align: Align,
    /// Left indent of the paragraph body, in points.
    pub indent: f32,
    /// Hanging indent: the first line starts this many points to the LEFT
    /// of `indent` (bullet style). Zero for plain paragraphs.
    pub hang: f32,
}

impl TextStyle {
    pub fn body(size: f32, leading: f32, color: Rgb) -> Self {
        Self {
            size,
            leading,
            bold: false,
            color,
            align: Align::Left,
            indent: 0.0,
            hang: 0.0,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn indented(mut self, indent: f32, hang: f32) -> Self {
        self.indent = indent;
        self.hang = hang;
        self
    }
}

/// One flowed paragraph. Splits across pages line-by-line when it overflows.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub style: TextStyle,
    pub space_before: f32,
    pub space_after: f32,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    pub fn space_before(mut self, pts: f32) -> Self {
        self.space_before = pts;
        self
    }

    pub fn space_after(mut self, pts: f32) -> Self {
        self.space_after = pts;
        self
    }
}

/// A short horizontal accent rule (heading underline).
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub width: f32,
    pub thickness: f32,
    pub color: Rgb,
    pub space_after: f32,
}

/// One cell of a grid row: a stack of paragraphs flowed top-to-bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub paras: Vec<Paragraph>,
}

impl Cell {
    pub fn text(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            paras: vec![Paragraph::new(text, style)],
        }
    }

    pub fn paras(paras: Vec<Paragraph>) -> Self {
        Self { paras }
    }

    pub fn empty() -> Self {
        Self { paras: Vec::new() }
    }
}

/// Visual styling of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GridStyle {
    /// Fill behind every cell.
    pub background: Option<Rgb>,
    /// Outer box plus inner column/row separators: (line width, color).
    pub box_lines: Option<(f32, Rgb)>,
    /// Accent border along the left edge only: (line width, color).
    pub line_before: Option<(f32, Rgb)>,
    /// Uniform padding inside each cell.
    pub padding: f32,
}

/// A table/grid of uniform-width rows. Page breaks occur between rows;
/// a single row is atomic.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<Cell>>,
    pub col_widths: Vec<f32>,
    pub style: GridStyle,
    /// Horizontal offset from the left margin (used to center narrow grids).
    pub indent: f32,
    pub space_after: f32,
}

impl Grid {
    pub fn total_width(&self) -> f32 {
        self.col_widths.iter().sum()
    }
}

/// One unit of flowed content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Spacer(f32),
    Rule(Rule),
    Grid(Grid),
}
