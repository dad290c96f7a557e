//! Routing of start/end/text events to the element builders.
//!
//! The dispatcher owns all mutable parse state: the top-level style table,
//! the placemarks closed so far, at most one open placemark and at most one
//! open top-level style. It is fed one event at a time in document order and
//! turns into a [`Document`] with [`Dispatcher::finish`].

use crate::diagnostic::{Diagnostic, codes};
use crate::document::Document;
use crate::geometry::GeometryBuilder;
use crate::options::ParseOptions;
use crate::placemark::{Placemark, PlacemarkBuilder, PlacemarkSection};
use crate::style::{Style, StyleBuilder};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Elements the dispatcher reacts to. Everything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementName {
    Style,
    LineStyle,
    PolyStyle,
    Color,
    Width,
    Fill,
    Outline,
    Placemark,
    Name,
    Description,
    StyleUrl,
    Point,
    LineString,
    Polygon,
    Coordinates,
    OuterBoundaryIs,
    InnerBoundaryIs,
    LinearRing,
}

impl ElementName {
    const ALL: [(&'static str, ElementName); 18] = [
        ("Style", ElementName::Style),
        ("LineStyle", ElementName::LineStyle),
        ("PolyStyle", ElementName::PolyStyle),
        ("color", ElementName::Color),
        ("width", ElementName::Width),
        ("fill", ElementName::Fill),
        ("outline", ElementName::Outline),
        ("Placemark", ElementName::Placemark),
        ("name", ElementName::Name),
        ("description", ElementName::Description),
        ("styleUrl", ElementName::StyleUrl),
        ("Point", ElementName::Point),
        ("LineString", ElementName::LineString),
        ("Polygon", ElementName::Polygon),
        ("coordinates", ElementName::Coordinates),
        ("outerBoundaryIs", ElementName::OuterBoundaryIs),
        ("innerBoundaryIs", ElementName::InnerBoundaryIs),
        ("LinearRing", ElementName::LinearRing),
    ];

    /// Match a possibly prefixed element name, ignoring ASCII case.
    fn parse(name: &str) -> Option<Self> {
        let local = local_name(name);
        Self::ALL
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(local))
            .map(|(_, element)| *element)
    }

    fn as_str(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(_, element)| *element == self)
            .map_or("", |(name, _)| *name)
    }
}

fn local_name(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

/// `<Element id="x">`, or `<Element>` without an id.
fn open_tag(element: &str, identifier: Option<&str>) -> String {
    match identifier {
        Some(identifier) => format!("<{} id=\"{}\">", element, identifier),
        None => format!("<{}>", element),
    }
}

/// Push-driven KML state machine.
#[derive(Debug, Default)]
pub struct Dispatcher {
    options: ParseOptions,
    styles: BTreeMap<String, Arc<Style>>,
    placemarks: Vec<Placemark>,
    placemark: Option<PlacemarkBuilder>,
    style: Option<StyleBuilder>,
    diagnostics: Vec<Diagnostic>,
    position: Option<u64>,
}

impl Dispatcher {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Record the byte offset of the event about to be dispatched, so
    /// diagnostics can point at it.
    pub fn set_position(&mut self, position: u64) {
        self.position = Some(position);
    }

    /// Handle an element start. Only the `id` attribute is looked at.
    pub fn on_start<I, K, V>(&mut self, name: &str, attributes: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let Some(element) = ElementName::parse(name) else {
            return;
        };
        let identifier = attributes
            .into_iter()
            .find(|(key, _)| local_name(key.as_ref()) == "id")
            .map(|(_, value)| value.as_ref().to_string());

        match element {
            ElementName::Style => self.begin_style(identifier),
            ElementName::Placemark => self.begin_placemark(identifier),
            ElementName::LineStyle
            | ElementName::PolyStyle
            | ElementName::Color
            | ElementName::Width
            | ElementName::Fill
            | ElementName::Outline => {
                if let Some(style) = self.current_style() {
                    match element {
                        ElementName::LineStyle => style.begin_line_style(),
                        ElementName::PolyStyle => style.begin_poly_style(),
                        ElementName::Color => style.begin_color(),
                        ElementName::Width => style.begin_width(),
                        ElementName::Fill => style.begin_fill(),
                        _ => style.begin_outline(),
                    }
                }
            }
            ElementName::Name | ElementName::Description | ElementName::StyleUrl => {
                if let Some(placemark) = self.placemark.as_mut() {
                    match element {
                        ElementName::Name => placemark.begin_name(),
                        ElementName::Description => placemark.begin_description(),
                        _ => placemark.begin_style_url(),
                    }
                }
            }
            ElementName::Point | ElementName::LineString | ElementName::Polygon => {
                self.begin_geometry(element, identifier);
            }
            ElementName::Coordinates
            | ElementName::OuterBoundaryIs
            | ElementName::InnerBoundaryIs
            | ElementName::LinearRing => {
                if let Some(geometry) = self.current_geometry() {
                    match element {
                        ElementName::Coordinates => geometry.begin_coordinates(),
                        ElementName::OuterBoundaryIs => geometry.begin_outer_boundary(),
                        ElementName::InnerBoundaryIs => geometry.begin_inner_boundary(),
                        _ => geometry.begin_linear_ring(),
                    }
                }
            }
        }
    }

    /// Handle an element end.
    pub fn on_end(&mut self, name: &str) {
        let Some(element) = ElementName::parse(name) else {
            return;
        };

        match element {
            ElementName::Style => self.end_style(),
            ElementName::Placemark => self.end_placemark(),
            ElementName::LineStyle
            | ElementName::PolyStyle
            | ElementName::Color
            | ElementName::Width
            | ElementName::Fill
            | ElementName::Outline => {
                if let Some(style) = self.current_style() {
                    match element {
                        ElementName::LineStyle => style.end_line_style(),
                        ElementName::PolyStyle => style.end_poly_style(),
                        ElementName::Color => style.end_color(),
                        ElementName::Width => style.end_width(),
                        ElementName::Fill => style.end_fill(),
                        _ => style.end_outline(),
                    }
                }
            }
            ElementName::Name | ElementName::Description | ElementName::StyleUrl => {
                if let Some(placemark) = self.placemark.as_mut() {
                    match element {
                        ElementName::Name => placemark.end_name(),
                        ElementName::Description => placemark.end_description(),
                        _ => placemark.end_style_url(),
                    }
                }
            }
            ElementName::Point | ElementName::LineString | ElementName::Polygon => {
                if let Some(placemark) = self.placemark.as_mut() {
                    placemark.end_geometry(element.as_str());
                }
            }
            ElementName::Coordinates
            | ElementName::OuterBoundaryIs
            | ElementName::InnerBoundaryIs
            | ElementName::LinearRing => {
                if let Some(geometry) = self.current_geometry() {
                    match element {
                        ElementName::Coordinates => geometry.end_coordinates(),
                        ElementName::OuterBoundaryIs => geometry.end_outer_boundary(),
                        ElementName::InnerBoundaryIs => geometry.end_inner_boundary(),
                        _ => geometry.end_linear_ring(),
                    }
                }
            }
        }
    }

    /// Handle a chunk of character data. Chunks of one element are
    /// concatenated in the order they arrive.
    pub fn on_text(&mut self, text: &str) {
        if let Some(placemark) = self.placemark.as_mut() {
            placemark.add_text(text);
        } else if let Some(style) = self.style.as_mut() {
            style.add_text(text);
        }
    }

    /// End of input: report anything left open, resolve style references
    /// and hand over the document.
    pub fn finish(mut self) -> Document {
        let mut unclosed = Vec::new();
        if let Some(placemark) = self.placemark.take() {
            unclosed.push(open_tag("Placemark", placemark.identifier()));
        }
        if let Some(style) = self.style.take() {
            unclosed.push(open_tag("Style", style.identifier()));
        }
        for tag in unclosed {
            self.report(
                Diagnostic::warning(codes::UNEXPECTED_EOF, "Unexpected End of Input")
                    .problem(format!("{} was never closed and was dropped", tag)),
            );
        }

        let mut document = Document::new(self.styles, self.placemarks, self.diagnostics);
        let resolved = document.resolve_styles();
        tracing::debug!(
            placemarks = document.placemarks().len(),
            styles = document.styles().len(),
            resolved,
            "finished KML document"
        );
        document
    }

    /// The style that style-family events apply to: the open placemark's
    /// own style while it is open, otherwise the open top-level style.
    fn current_style(&mut self) -> Option<&mut StyleBuilder> {
        match self.placemark.as_mut() {
            Some(placemark) if placemark.has_style_in_progress() => {
                placemark.style_in_progress_mut()
            }
            _ => self.style.as_mut(),
        }
    }

    fn current_geometry(&mut self) -> Option<&mut GeometryBuilder> {
        self.placemark.as_mut()?.geometry_mut()
    }

    fn begin_style(&mut self, identifier: Option<String>) {
        if let Some(placemark) = self.placemark.as_mut() {
            placemark.begin_style(identifier);
            return;
        }
        match identifier {
            Some(identifier) => self.style = Some(StyleBuilder::new(Some(identifier))),
            None => {
                self.style = None;
                self.report(
                    Diagnostic::warning(codes::ORPHAN_STYLE, "Orphan Style Discarded")
                        .problem("<Style> without an id outside a <Placemark> is unreachable"),
                );
            }
        }
    }

    fn end_style(&mut self) {
        if let Some(placemark) = self.placemark.as_mut() {
            if placemark.has_style_in_progress() {
                placemark.end_style();
                return;
            }
        }
        let Some(builder) = self.style.take() else {
            return;
        };
        let style = builder.finish();
        let Some(identifier) = style.identifier.clone() else {
            return;
        };
        tracing::debug!(id = %identifier, "top-level style defined");
        let style = Arc::new(style);
        if self.styles.insert(identifier.clone(), style).is_some() {
            let tag = open_tag("Style", Some(identifier.as_str()));
            self.report(
                Diagnostic::info(codes::STYLE_REDEFINED, "Style Redefined")
                    .problem(format!("a later {} replaces the earlier one", tag)),
            );
        }
    }

    fn begin_placemark(&mut self, identifier: Option<String>) {
        let placemark = PlacemarkBuilder::new(identifier, self.options.trim_text);
        if let Some(open) = self.placemark.replace(placemark) {
            let tag = open_tag("Placemark", open.identifier());
            self.report(
                Diagnostic::warning(codes::NESTED_PLACEMARK, "Nested Placemark")
                    .problem(format!("{} was still open and was dropped", tag)),
            );
        }
    }

    fn end_placemark(&mut self) {
        if let Some(placemark) = self.placemark.take() {
            self.placemarks.push(placemark.finish());
        }
    }

    fn begin_geometry(&mut self, element: ElementName, identifier: Option<String>) {
        let Some(placemark) = self.placemark.as_mut() else {
            tracing::debug!(element = element.as_str(), "geometry outside a placemark");
            return;
        };
        let replacing = placemark.section() == PlacemarkSection::Idle && placemark.has_geometry();
        placemark.begin_geometry(element.as_str(), identifier);
        if replacing {
            let problem = format!(
                "a later <{}> replaces the placemark's earlier geometry",
                element.as_str()
            );
            self.report(
                Diagnostic::info(codes::GEOMETRY_REPLACED, "Geometry Replaced")
                    .problem(problem),
            );
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        let diagnostic = diagnostic.at(self.position);
        let (code, offset) = (diagnostic.code, diagnostic.offset);
        if diagnostic.is_warning() {
            tracing::warn!(code, offset, "{}", diagnostic.title);
        } else {
            tracing::debug!(code, offset, "{}", diagnostic.title);
        }
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::diagnostic::DiagnosticKind;
    use crate::geometry::{Geometry, GeometryKind};

    const NO_ATTRIBUTES: [(&str, &str); 0] = [];

    fn start(dispatcher: &mut Dispatcher, name: &str) {
        dispatcher.on_start(name, NO_ATTRIBUTES);
    }

    fn start_with_id(dispatcher: &mut Dispatcher, name: &str, id: &str) {
        dispatcher.on_start(name, [("id", id)]);
    }

    fn leaf(dispatcher: &mut Dispatcher, name: &str, text: &str) {
        start(dispatcher, name);
        dispatcher.on_text(text);
        dispatcher.on_end(name);
    }

    fn line(dispatcher: &mut Dispatcher, coordinates: &str) {
        start(dispatcher, "LineString");
        leaf(dispatcher, "coordinates", coordinates);
        dispatcher.on_end("LineString");
    }

    #[test]
    fn test_element_names_are_case_insensitive_and_unprefixed() {
        let parse = ElementName::parse;
        assert_eq!(parse("Placemark"), Some(ElementName::Placemark));
        assert_eq!(parse("placemark"), Some(ElementName::Placemark));
        assert_eq!(parse("kml:styleUrl"), Some(ElementName::StyleUrl));
        assert_eq!(parse("STYLEURL"), Some(ElementName::StyleUrl));
        assert_eq!(parse("ExtendedData"), None);
        assert_eq!(parse("Document"), None);
        assert_eq!(ElementName::LinearRing.as_str(), "LinearRing");
    }

    #[test]
    fn test_top_level_style_is_resolved() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start_with_id(&mut dispatcher, "Style", "red");
        start(&mut dispatcher, "LineStyle");
        leaf(&mut dispatcher, "color", "ff0000ff");
        leaf(&mut dispatcher, "width", "3");
        dispatcher.on_end("LineStyle");
        dispatcher.on_end("Style");

        start(&mut dispatcher, "Placemark");
        leaf(&mut dispatcher, "styleUrl", "#red");
        line(&mut dispatcher, "-122.1,37.1 -122.2,37.2");
        dispatcher.on_end("Placemark");

        let document = dispatcher.finish();
        assert!(document.diagnostics().is_empty());
        let placemark = &document.placemarks()[0];
        let style = placemark.placemark_style().unwrap();
        assert!(style.is_shared());
        assert_eq!(style.stroke_color, Some(Rgba::from_kml_hex("ff0000ff")));
        assert_eq!(style.stroke_width, 3.0);
    }

    #[test]
    fn test_style_inside_placemark_is_inline() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start(&mut dispatcher, "Placemark");
        start(&mut dispatcher, "Style");
        start(&mut dispatcher, "PolyStyle");
        leaf(&mut dispatcher, "color", "7f00ff00");
        leaf(&mut dispatcher, "fill", "1");
        leaf(&mut dispatcher, "outline", "0");
        dispatcher.on_end("PolyStyle");
        dispatcher.on_end("Style");
        dispatcher.on_end("Placemark");

        let document = dispatcher.finish();
        assert!(document.styles().is_empty());
        let style = document.placemarks()[0].placemark_style().unwrap();
        assert!(!style.is_shared());
        assert_eq!(style.fill_color, Some(Rgba::from_kml_hex("7f00ff00")));
        assert!(style.fill);
        assert!(!style.outline);
    }

    #[test]
    fn test_inline_style_wins_over_reference() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start_with_id(&mut dispatcher, "Style", "shared");
        dispatcher.on_end("Style");
        start(&mut dispatcher, "Placemark");
        leaf(&mut dispatcher, "styleUrl", "#shared");
        start(&mut dispatcher, "Style");
        dispatcher.on_end("Style");
        dispatcher.on_end("Placemark");

        let document = dispatcher.finish();
        let style = document.placemarks()[0].placemark_style().unwrap();
        assert!(!style.is_shared());
    }

    #[test]
    fn test_inline_style_keeps_its_id_out_of_the_table() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start(&mut dispatcher, "Placemark");
        start_with_id(&mut dispatcher, "Style", "x");
        dispatcher.on_end("Style");
        dispatcher.on_end("Placemark");

        let document = dispatcher.finish();
        assert!(document.style("x").is_none());
        let style = document.placemarks()[0].style().unwrap();
        assert_eq!(style.identifier.as_deref(), Some("x"));
    }

    #[test]
    fn test_orphan_style_is_discarded_with_warning() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        dispatcher.set_position(7);
        start(&mut dispatcher, "Style");
        start(&mut dispatcher, "LineStyle");
        leaf(&mut dispatcher, "width", "9");
        dispatcher.on_end("LineStyle");
        dispatcher.on_end("Style");

        let document = dispatcher.finish();
        assert!(document.styles().is_empty());
        let diagnostics = document.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, codes::ORPHAN_STYLE);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::Warning);
        assert_eq!(diagnostics[0].offset, Some(7));
    }

    #[test]
    fn test_redefined_style_last_wins() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        for width in ["1", "2"] {
            start_with_id(&mut dispatcher, "Style", "s");
            start(&mut dispatcher, "LineStyle");
            leaf(&mut dispatcher, "width", width);
            dispatcher.on_end("LineStyle");
            dispatcher.on_end("Style");
        }
        let document = dispatcher.finish();
        assert_eq!(document.style("s").unwrap().stroke_width, 2.0);
        assert_eq!(document.diagnostics()[0].code, codes::STYLE_REDEFINED);
        assert!(!document.diagnostics()[0].is_warning());
    }

    #[test]
    fn test_nested_placemark_drops_the_open_one() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start_with_id(&mut dispatcher, "Placemark", "outer");
        leaf(&mut dispatcher, "name", "Outer");
        start_with_id(&mut dispatcher, "Placemark", "inner");
        leaf(&mut dispatcher, "name", "Inner");
        dispatcher.on_end("Placemark");
        dispatcher.on_end("Placemark");

        let document = dispatcher.finish();
        assert_eq!(document.placemarks().len(), 1);
        assert_eq!(document.placemarks()[0].name.as_deref(), Some("Inner"));
        assert_eq!(document.diagnostics()[0].code, codes::NESTED_PLACEMARK);
        let problem = document.diagnostics()[0].problem.as_deref().unwrap();
        assert!(problem.starts_with("<Placemark id=\"outer\">"));
    }

    #[test]
    fn test_unclosed_elements_at_end_of_input() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start_with_id(&mut dispatcher, "Style", "s");
        dispatcher.on_end("Style");
        start(&mut dispatcher, "Placemark");
        leaf(&mut dispatcher, "styleUrl", "#s");
        dispatcher.on_end("Placemark");
        start(&mut dispatcher, "Placemark");
        leaf(&mut dispatcher, "name", "Half");

        let document = dispatcher.finish();
        assert_eq!(document.placemarks().len(), 1);
        assert!(document.placemarks()[0].style().is_some());
        assert_eq!(document.diagnostics().len(), 1);
        assert_eq!(document.diagnostics()[0].code, codes::UNEXPECTED_EOF);
    }

    #[test]
    fn test_second_geometry_replaces_first() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start(&mut dispatcher, "Placemark");
        start(&mut dispatcher, "Point");
        leaf(&mut dispatcher, "coordinates", "-122.0,37.0");
        dispatcher.on_end("Point");
        line(&mut dispatcher, "-122.1,37.1 -122.2,37.2");
        dispatcher.on_end("Placemark");

        let document = dispatcher.finish();
        let geometry = document.placemarks()[0].geometry.as_ref().unwrap();
        assert_eq!(geometry.kind(), GeometryKind::LineString);
        assert_eq!(document.diagnostics()[0].code, codes::GEOMETRY_REPLACED);
    }

    #[test]
    fn test_polygon_rings_in_document_order() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start(&mut dispatcher, "Placemark");
        start_with_id(&mut dispatcher, "Polygon", "poly");
        for (boundary, ring) in [
            ("outerBoundaryIs", "0,0 10,0 10,10 0,10 0,0"),
            ("innerBoundaryIs", "1,1 2,1 2,2 1,1"),
            ("innerBoundaryIs", "5,5 6,5 6,6 5,5"),
        ] {
            start(&mut dispatcher, boundary);
            start(&mut dispatcher, "LinearRing");
            leaf(&mut dispatcher, "coordinates", ring);
            dispatcher.on_end("LinearRing");
            dispatcher.on_end(boundary);
        }
        dispatcher.on_end("Polygon");
        dispatcher.on_end("Placemark");

        let document = dispatcher.finish();
        let Some(Geometry::Polygon(polygon)) = document.placemarks()[0].geometry.as_ref() else {
            panic!("expected a polygon");
        };
        assert_eq!(polygon.identifier.as_deref(), Some("poly"));
        assert_eq!(polygon.exterior().len(), 5);
        let interiors = polygon.interiors();
        assert_eq!(interiors.len(), 2);
        assert_eq!(interiors[0][0].longitude, 1.0);
        assert_eq!(interiors[1][0].longitude, 5.0);
    }

    #[test]
    fn test_text_split_across_chunks() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start(&mut dispatcher, "Placemark");
        start(&mut dispatcher, "name");
        dispatcher.on_text("Golden ");
        dispatcher.on_text("Gate");
        dispatcher.on_end("name");
        start(&mut dispatcher, "LineString");
        start(&mut dispatcher, "coordinates");
        dispatcher.on_text("-122.47,37.80 -122.4");
        dispatcher.on_text("8,37.83");
        dispatcher.on_end("coordinates");
        dispatcher.on_end("LineString");
        dispatcher.on_end("Placemark");

        let document = dispatcher.finish();
        let placemark = &document.placemarks()[0];
        assert_eq!(placemark.name.as_deref(), Some("Golden Gate"));
        let Some(Geometry::LineString(line)) = placemark.geometry.as_ref() else {
            panic!("expected a line");
        };
        assert_eq!(line.coordinates.len(), 2);
        assert_eq!(line.coordinates[1].longitude, -122.48);
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start(&mut dispatcher, "Document");
        start(&mut dispatcher, "Placemark");
        start(&mut dispatcher, "ExtendedData");
        dispatcher.on_text("ignored");
        dispatcher.on_end("ExtendedData");
        start(&mut dispatcher, "MultiGeometry");
        start(&mut dispatcher, "coordinates");
        dispatcher.on_text("-122.0,37.0");
        dispatcher.on_end("coordinates");
        dispatcher.on_end("MultiGeometry");
        dispatcher.on_end("Placemark");
        dispatcher.on_end("Document");

        let document = dispatcher.finish();
        assert_eq!(document.placemarks().len(), 1);
        assert!(document.placemarks()[0].geometry.is_none());
        assert!(document.diagnostics().is_empty());
    }

    #[test]
    fn test_stray_events_outside_any_element() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        dispatcher.on_text("loose text");
        leaf(&mut dispatcher, "color", "ff0000ff");
        leaf(&mut dispatcher, "name", "nobody");
        line(&mut dispatcher, "-122.0,37.0");
        dispatcher.on_end("Placemark");
        dispatcher.on_end("Style");

        let document = dispatcher.finish();
        assert!(document.placemarks().is_empty());
        assert!(document.styles().is_empty());
    }

    #[test]
    fn test_geometry_id_attribute() {
        let mut dispatcher = Dispatcher::new(ParseOptions::default());
        start_with_id(&mut dispatcher, "Placemark", "pm");
        dispatcher.on_start("Point", [("kml:id", "pt"), ("extrude", "1")]);
        leaf(&mut dispatcher, "coordinates", "-122.0,37.0");
        dispatcher.on_end("Point");
        dispatcher.on_end("Placemark");

        let document = dispatcher.finish();
        let placemark = &document.placemarks()[0];
        assert_eq!(placemark.identifier.as_deref(), Some("pm"));
        let geometry = placemark.geometry.as_ref().unwrap();
        assert_eq!(geometry.identifier(), Some("pt"));
    }
}
