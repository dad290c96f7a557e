//! The parsed document graph.

use crate::diagnostic::Diagnostic;
use crate::geometry::Geometry;
use crate::placemark::{Placemark, PlacemarkStyle};
use crate::shape::{AnnotationView, Bounds, OverlayRenderer, ShapeHandle};
use crate::style::{Style, StyleAttributes};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Everything a parse produced: the top-level styles by id, the placemarks
/// in document order, and the diagnostics raised along the way.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    styles: BTreeMap<String, Arc<Style>>,
    placemarks: Vec<Placemark>,
    diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub(crate) fn new(
        styles: BTreeMap<String, Arc<Style>>,
        placemarks: Vec<Placemark>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            styles,
            placemarks,
            diagnostics,
        }
    }

    pub fn placemarks(&self) -> &[Placemark] {
        &self.placemarks
    }

    pub fn styles(&self) -> &BTreeMap<String, Arc<Style>> {
        &self.styles
    }

    /// Look up a top-level style by id (without the leading `#`).
    pub fn style(&self, identifier: &str) -> Option<&Arc<Style>> {
        self.styles.get(identifier)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Attach top-level styles to the placemarks that reference them.
    ///
    /// Placemarks that already carry a style are left alone, as are
    /// references that do not start with `#` or name no known style.
    /// Returns how many placemarks gained a style; running it again is a
    /// no-op returning zero.
    pub fn resolve_styles(&mut self) -> usize {
        let mut resolved = 0;
        for placemark in &mut self.placemarks {
            if placemark.has_style() {
                continue;
            }
            let reference = placemark.style_url.as_deref();
            let Some(identifier) = reference.and_then(|url| url.strip_prefix('#')) else {
                continue;
            };
            match self.styles.get(identifier) {
                Some(style) => {
                    placemark.attach_shared_style(Arc::clone(style));
                    resolved += 1;
                }
                None => {
                    tracing::debug!(
                        style_url = placemark.style_url.as_deref(),
                        "style reference does not resolve"
                    );
                }
            }
        }
        resolved
    }

    /// Shapes of the line and polygon placemarks, in document order.
    pub fn overlays(&self) -> Vec<ShapeHandle> {
        self.placemarks
            .iter()
            .filter_map(Placemark::overlay)
            .collect()
    }

    /// Shapes of the point placemarks, in document order.
    pub fn annotations(&self) -> Vec<ShapeHandle> {
        self.placemarks
            .iter()
            .filter_map(Placemark::annotation)
            .collect()
    }

    /// Find the placemark a shape handle was vended by.
    ///
    /// Handles are compared by identity. A shape equal in value to one of
    /// ours, but built elsewhere, has no owner.
    pub fn lookup_owner(&self, shape: &ShapeHandle) -> Option<&Placemark> {
        self.placemarks
            .iter()
            .find(|placemark| placemark.owns(shape))
    }

    /// The path attributes that apply to `placemark`: its own style, or
    /// failing that the top-level style its `styleUrl` names.
    pub fn resolved_style(&self, placemark: &Placemark) -> Option<StyleAttributes> {
        placemark.style_attributes().or_else(|| {
            let identifier = placemark.style_url.as_deref()?.strip_prefix('#')?;
            self.style(identifier).map(|style| style.attributes())
        })
    }

    /// The renderer for an overlay handle obtained from [`Document::overlays`].
    pub fn renderer_for_overlay(&self, overlay: &ShapeHandle) -> Option<Arc<OverlayRenderer>> {
        self.lookup_owner(overlay)?.overlay_renderer()
    }

    /// The pin view for an annotation handle obtained from [`Document::annotations`].
    pub fn view_for_annotation(&self, annotation: &ShapeHandle) -> Option<Arc<AnnotationView>> {
        self.lookup_owner(annotation)?.annotation_view()
    }

    /// The rectangle covering every overlay and annotation.
    pub fn bounds(&self) -> Option<Bounds> {
        self.placemarks
            .iter()
            .filter_map(|placemark| placemark.shape()?.bounds())
            .reduce(Bounds::union)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "placemarks: {}", self.placemarks.len())?;
        let identifiers: Vec<&str> = self.styles.keys().map(String::as_str).collect();
        if identifiers.is_empty() {
            writeln!(f, "styles: 0")?;
        } else {
            let names = identifiers.join(", ");
            writeln!(f, "styles: {} ({})", identifiers.len(), names)?;
        }
        for placemark in &self.placemarks {
            writeln!(
                f,
                "- {}: {}, {}",
                placemark.name.as_deref().unwrap_or("(unnamed)"),
                GeometrySummary(placemark.geometry.as_ref()),
                StyleSummary(placemark),
            )?;
        }
        if !self.diagnostics.is_empty() {
            writeln!(f, "diagnostics: {}", self.diagnostics.len())?;
            for diagnostic in &self.diagnostics {
                writeln!(f, "  {}", diagnostic)?;
            }
        }
        Ok(())
    }
}

struct GeometrySummary<'a>(Option<&'a Geometry>);

impl fmt::Display for GeometrySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            None => write!(f, "no geometry"),
            Some(Geometry::Point(point)) => match point.coordinate {
                Some(at) => write!(f, "Point ({}, {})", at.latitude, at.longitude),
                None => write!(f, "Point (no coordinate)"),
            },
            Some(Geometry::LineString(line)) => {
                write!(f, "LineString ({} points)", line.coordinates.len())
            }
            Some(Geometry::Polygon(polygon)) => {
                let points = polygon.exterior().len();
                let holes = polygon.inner_ring_count();
                write!(f, "Polygon ({} points, {} holes)", points, holes)
            }
        }
    }
}

struct StyleSummary<'a>(&'a Placemark);

impl fmt::Display for StyleSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let placemark = self.0;
        match (placemark.placemark_style(), placemark.style_url.as_deref()) {
            (Some(PlacemarkStyle::Inline(_)), _) => write!(f, "inline style"),
            (Some(PlacemarkStyle::Shared(style)), _) => {
                let identifier = style.identifier.as_deref().unwrap_or_default();
                write!(f, "style #{}", identifier)
            }
            (None, Some(url)) => write!(f, "unresolved {}", url),
            (None, None) => write!(f, "unstyled"),
        }
    }
}
