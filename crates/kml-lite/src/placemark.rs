//! `<Placemark>` elements.

use crate::accumulator::Accumulator;
use crate::geometry::{Geometry, GeometryBuilder, GeometryKind};
use crate::shape::{AnnotationView, OverlayRenderer, Shape, ShapeHandle};
use crate::style::{Style, StyleAttributes, StyleBuilder};
use serde::Serialize;
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

/// Where a placemark's style came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "origin", content = "style", rename_all = "lowercase")]
pub enum PlacemarkStyle {
    /// An anonymous `<Style>` declared inside the placemark.
    Inline(Arc<Style>),

    /// A top-level style attached through `<styleUrl>`.
    Shared(Arc<Style>),
}

impl PlacemarkStyle {
    pub fn style(&self) -> &Arc<Style> {
        match self {
            PlacemarkStyle::Inline(style) | PlacemarkStyle::Shared(style) => style,
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, PlacemarkStyle::Shared(_))
    }
}

impl Deref for PlacemarkStyle {
    type Target = Style;

    fn deref(&self) -> &Style {
        self.style()
    }
}

/// A finished placemark.
///
/// The drawable views are built on first access and cached, so every call
/// hands out the same [`Arc`]. A clone starts with empty caches and vends
/// handles of its own.
#[derive(Debug, Default, Serialize)]
pub struct Placemark {
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,

    /// Raw `<styleUrl>` text, e.g. `#red-line`.
    pub style_url: Option<String>,

    style: Option<PlacemarkStyle>,

    pub geometry: Option<Geometry>,

    #[serde(skip)]
    shape: OnceLock<Option<ShapeHandle>>,

    #[serde(skip)]
    overlay_renderer: OnceLock<Option<Arc<OverlayRenderer>>>,

    #[serde(skip)]
    annotation_view: OnceLock<Option<Arc<AnnotationView>>>,
}

impl Clone for Placemark {
    fn clone(&self) -> Self {
        Self {
            identifier: self.identifier.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            style_url: self.style_url.clone(),
            style: self.style.clone(),
            geometry: self.geometry.clone(),
            shape: OnceLock::new(),
            overlay_renderer: OnceLock::new(),
            annotation_view: OnceLock::new(),
        }
    }
}

impl Placemark {
    pub fn placemark_style(&self) -> Option<&PlacemarkStyle> {
        self.style.as_ref()
    }

    pub fn style(&self) -> Option<&Arc<Style>> {
        self.style.as_ref().map(PlacemarkStyle::style)
    }

    pub fn style_attributes(&self) -> Option<StyleAttributes> {
        self.style().map(|style| style.attributes())
    }

    pub(crate) fn has_style(&self) -> bool {
        self.style.is_some()
    }

    pub(crate) fn attach_shared_style(&mut self, style: Arc<Style>) {
        self.style = Some(PlacemarkStyle::Shared(style));
        // A renderer built before resolution carries stale attributes.
        self.overlay_renderer = OnceLock::new();
    }

    /// The drawable for this placemark's geometry, titled with its name.
    pub fn shape(&self) -> Option<ShapeHandle> {
        self.shape
            .get_or_init(|| {
                let geometry = self.geometry.as_ref()?;
                Shape::from_geometry(geometry, self.name.clone()).map(Arc::new)
            })
            .clone()
    }

    /// True if `shape` is the handle this placemark vended.
    pub fn owns(&self, shape: &ShapeHandle) -> bool {
        self.shape().is_some_and(|own| Arc::ptr_eq(&own, shape))
    }

    /// The shape, if it is a polyline or polygon.
    pub fn overlay(&self) -> Option<ShapeHandle> {
        self.shape().filter(|shape| shape.is_overlay())
    }

    /// The shape, if it is a point annotation.
    pub fn annotation(&self) -> Option<ShapeHandle> {
        self.shape().filter(|shape| shape.is_annotation())
    }

    /// A renderer for the overlay with this placemark's style applied.
    /// Unstyled overlays get default attributes.
    pub fn overlay_renderer(&self) -> Option<Arc<OverlayRenderer>> {
        self.overlay_renderer
            .get_or_init(|| {
                let overlay = self.overlay()?;
                Some(Arc::new(OverlayRenderer {
                    overlay,
                    attributes: self.style_attributes().unwrap_or_default(),
                }))
            })
            .clone()
    }

    pub fn annotation_view(&self) -> Option<Arc<AnnotationView>> {
        self.annotation_view
            .get_or_init(|| {
                let annotation = self.annotation()?;
                Some(Arc::new(AnnotationView::pin(annotation)))
            })
            .clone()
    }
}

/// The child of a placemark that is currently receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacemarkSection {
    #[default]
    Idle,
    Name,
    Description,
    StyleUrl,
    Style,
    Geometry,
}

/// Accumulates one `<Placemark>` element.
///
/// At most one child is open at a time and text goes to that child only.
/// A child start seen while another child is open is ignored.
#[derive(Debug, Default)]
pub struct PlacemarkBuilder {
    placemark: Placemark,
    section: PlacemarkSection,
    style: Option<StyleBuilder>,
    geometry: Option<GeometryBuilder>,
    text: Accumulator,
    trim_text: bool,
}

impl PlacemarkBuilder {
    pub fn new(identifier: Option<String>, trim_text: bool) -> Self {
        Self {
            placemark: Placemark {
                identifier,
                ..Placemark::default()
            },
            trim_text,
            ..Self::default()
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.placemark.identifier.as_deref()
    }

    pub fn section(&self) -> PlacemarkSection {
        self.section
    }

    pub fn can_accumulate(&self) -> bool {
        match self.section {
            PlacemarkSection::Idle => false,
            PlacemarkSection::Name
            | PlacemarkSection::Description
            | PlacemarkSection::StyleUrl => true,
            PlacemarkSection::Style => self.style.iter().any(StyleBuilder::can_accumulate),
            PlacemarkSection::Geometry => self.geometry.iter().any(GeometryBuilder::can_accumulate),
        }
    }

    pub fn add_text(&mut self, text: &str) {
        match self.section {
            PlacemarkSection::Idle => {}
            PlacemarkSection::Name
            | PlacemarkSection::Description
            | PlacemarkSection::StyleUrl => self.text.push(text),
            PlacemarkSection::Style => {
                if let Some(style) = self.style.as_mut() {
                    style.add_text(text);
                }
            }
            PlacemarkSection::Geometry => {
                if let Some(geometry) = self.geometry.as_mut() {
                    geometry.add_text(text);
                }
            }
        }
    }

    fn open(&mut self, section: PlacemarkSection) -> bool {
        if self.section != PlacemarkSection::Idle {
            return false;
        }
        self.section = section;
        self.text.clear();
        true
    }

    fn close_text(&mut self, section: PlacemarkSection) -> Option<String> {
        if self.section != section {
            return None;
        }
        self.section = PlacemarkSection::Idle;
        Some(self.text.take_text(self.trim_text))
    }

    pub fn begin_name(&mut self) {
        self.open(PlacemarkSection::Name);
    }

    pub fn end_name(&mut self) {
        if let Some(name) = self.close_text(PlacemarkSection::Name) {
            self.placemark.name = Some(name);
        }
    }

    pub fn begin_description(&mut self) {
        self.open(PlacemarkSection::Description);
    }

    pub fn end_description(&mut self) {
        if let Some(description) = self.close_text(PlacemarkSection::Description) {
            self.placemark.description = Some(description);
        }
    }

    pub fn begin_style_url(&mut self) {
        self.open(PlacemarkSection::StyleUrl);
    }

    pub fn end_style_url(&mut self) {
        if let Some(style_url) = self.close_text(PlacemarkSection::StyleUrl) {
            self.placemark.style_url = Some(style_url);
        }
    }

    /// Start the placemark's own `<Style>`.
    pub fn begin_style(&mut self, identifier: Option<String>) {
        if self.open(PlacemarkSection::Style) {
            self.style = Some(StyleBuilder::new(identifier));
        }
    }

    pub fn end_style(&mut self) {
        if self.section != PlacemarkSection::Style {
            return;
        }
        self.section = PlacemarkSection::Idle;
        if let Some(style) = self.style.take() {
            self.placemark.style = Some(PlacemarkStyle::Inline(Arc::new(style.finish())));
        }
    }

    /// True while the placemark's `<Style>` is open.
    pub fn has_style_in_progress(&self) -> bool {
        self.section == PlacemarkSection::Style
    }

    pub fn style_in_progress_mut(&mut self) -> Option<&mut StyleBuilder> {
        if self.section == PlacemarkSection::Style {
            self.style.as_mut()
        } else {
            None
        }
    }

    /// True once a geometry element has closed inside this placemark.
    pub fn has_geometry(&self) -> bool {
        self.placemark.geometry.is_some()
    }

    /// Start a geometry element. Names other than `Point`, `LineString` and
    /// `Polygon` are ignored.
    pub fn begin_geometry(&mut self, name: &str, identifier: Option<String>) {
        let Some(kind) = GeometryKind::from_element_name(name) else {
            return;
        };
        if self.open(PlacemarkSection::Geometry) {
            self.geometry = Some(GeometryBuilder::new(kind, identifier));
        }
    }

    /// Close the open geometry if `name` matches its element. A later
    /// geometry replaces an earlier one.
    pub fn end_geometry(&mut self, name: &str) {
        if self.section != PlacemarkSection::Geometry {
            return;
        }
        let Some(kind) = GeometryKind::from_element_name(name) else {
            return;
        };
        if self.geometry.as_ref().map(GeometryBuilder::kind) != Some(kind) {
            return;
        }
        self.section = PlacemarkSection::Idle;
        self.placemark.geometry = self.geometry.take().map(GeometryBuilder::finish);
    }

    pub fn geometry_mut(&mut self) -> Option<&mut GeometryBuilder> {
        if self.section == PlacemarkSection::Geometry {
            self.geometry.as_mut()
        } else {
            None
        }
    }

    /// Children still open when the placemark closes are dropped.
    pub fn finish(self) -> Placemark {
        self.placemark
    }
}
