//! `<Style>` elements.
//!
//! A style is either declared at the top level with an `id` and referenced by
//! placemarks through `<styleUrl>`, or declared anonymously inside a single
//! placemark. Only the stroke and fill parts of `<LineStyle>` and
//! `<PolyStyle>` are kept.

use crate::accumulator::Accumulator;
use crate::color::Rgba;
use serde::Serialize;

/// A finished style.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Style {
    /// The `id` attribute; `None` for anonymous placemark styles.
    pub identifier: Option<String>,

    /// `<LineStyle><color>`.
    pub stroke_color: Option<Rgba>,

    /// `<PolyStyle><color>`.
    pub fill_color: Option<Rgba>,

    /// `<width>`, zero when absent or unparseable.
    pub stroke_width: f64,

    /// `<fill>`.
    pub fill: bool,

    /// `<outline>`.
    pub outline: bool,
}

impl Style {
    /// The attributes a renderer applies to a path drawn with this style.
    pub fn attributes(&self) -> StyleAttributes {
        StyleAttributes {
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            line_width: self.stroke_width,
        }
    }
}

/// Stroke and fill attributes applied to a drawable overlay.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct StyleAttributes {
    pub stroke_color: Option<Rgba>,
    pub fill_color: Option<Rgba>,
    pub line_width: f64,
}

/// Which sub-style element is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleSection {
    #[default]
    None,
    LineStyle,
    PolyStyle,
}

/// Which leaf element is open. Leaves nest inside a [`StyleSection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleField {
    #[default]
    None,
    Color,
    Width,
    Fill,
    Outline,
}

/// Accumulates one `<Style>` element.
#[derive(Debug, Default)]
pub struct StyleBuilder {
    style: Style,
    section: StyleSection,
    field: StyleField,
    text: Accumulator,
}

impl StyleBuilder {
    pub fn new(identifier: Option<String>) -> Self {
        Self {
            style: Style {
                identifier,
                ..Style::default()
            },
            ..Self::default()
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.style.identifier.as_deref()
    }

    pub fn section(&self) -> StyleSection {
        self.section
    }

    pub fn field(&self) -> StyleField {
        self.field
    }

    /// True while a `<color>`, `<width>`, `<fill>` or `<outline>` is open.
    pub fn can_accumulate(&self) -> bool {
        self.field != StyleField::None
    }

    pub fn add_text(&mut self, text: &str) {
        if self.can_accumulate() {
            self.text.push(text);
        }
    }

    pub fn begin_line_style(&mut self) {
        self.section = StyleSection::LineStyle;
    }

    pub fn end_line_style(&mut self) {
        if self.section == StyleSection::LineStyle {
            self.section = StyleSection::None;
        }
    }

    pub fn begin_poly_style(&mut self) {
        self.section = StyleSection::PolyStyle;
    }

    pub fn end_poly_style(&mut self) {
        if self.section == StyleSection::PolyStyle {
            self.section = StyleSection::None;
        }
    }

    pub fn begin_color(&mut self) {
        self.field = StyleField::Color;
    }

    /// A color inside `<LineStyle>` is the stroke color, inside `<PolyStyle>`
    /// the fill color. Colors of other sub-styles are ignored.
    pub fn end_color(&mut self) {
        self.field = StyleField::None;
        let color = Rgba::from_kml_hex(self.text.as_str());
        match self.section {
            StyleSection::LineStyle => self.style.stroke_color = Some(color),
            StyleSection::PolyStyle => self.style.fill_color = Some(color),
            StyleSection::None => {}
        }
        self.text.clear();
    }

    pub fn begin_width(&mut self) {
        self.field = StyleField::Width;
    }

    pub fn end_width(&mut self) {
        self.field = StyleField::None;
        self.style.stroke_width = parse_width(self.text.as_str());
        self.text.clear();
    }

    pub fn begin_fill(&mut self) {
        self.field = StyleField::Fill;
    }

    pub fn end_fill(&mut self) {
        self.field = StyleField::None;
        self.style.fill = parse_bool(self.text.as_str());
        self.text.clear();
    }

    pub fn begin_outline(&mut self) {
        self.field = StyleField::Outline;
    }

    pub fn end_outline(&mut self) {
        self.field = StyleField::None;
        self.style.outline = parse_bool(self.text.as_str());
        self.text.clear();
    }

    pub fn finish(self) -> Style {
        self.style
    }
}

fn parse_width(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|width| width.is_finite())
        .unwrap_or(0.0)
}

fn parse_bool(text: &str) -> bool {
    let text = text.trim();
    text == "1" || text.eq_ignore_ascii_case("true")
}
