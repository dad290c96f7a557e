//! `<Point>`, `<LineString>` and `<Polygon>` geometries.

use crate::accumulator::Accumulator;
use crate::coordinates::{Coordinate, decode_coordinates};
use serde::Serialize;

/// The shape payload of a placemark.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
}

/// The three geometry element types that are understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl GeometryKind {
    /// Match an element name case-insensitively.
    pub fn from_element_name(name: &str) -> Option<Self> {
        [
            ("Point", GeometryKind::Point),
            ("LineString", GeometryKind::LineString),
            ("Polygon", GeometryKind::Polygon),
        ]
        .into_iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, kind)| kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub identifier: Option<String>,

    /// `None` unless `<coordinates>` held exactly one valid tuple.
    pub coordinate: Option<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineString {
    pub identifier: Option<String>,
    pub coordinates: Vec<Coordinate>,
}

/// A polygon keeps its rings as raw coordinate text and decodes them on
/// demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub identifier: Option<String>,
    outer_ring: String,
    inner_rings: Vec<String>,
}

impl Polygon {
    pub fn new(
        identifier: Option<String>,
        outer_ring: impl Into<String>,
        inner_rings: Vec<String>,
    ) -> Self {
        Self {
            identifier,
            outer_ring: outer_ring.into(),
            inner_rings,
        }
    }

    pub fn outer_ring_text(&self) -> &str {
        &self.outer_ring
    }

    pub fn inner_ring_texts(&self) -> &[String] {
        &self.inner_rings
    }

    pub fn inner_ring_count(&self) -> usize {
        self.inner_rings.len()
    }

    /// Decode the outer boundary.
    pub fn exterior(&self) -> Vec<Coordinate> {
        decode_coordinates(&self.outer_ring)
    }

    /// Decode the holes, in document order.
    pub fn interiors(&self) -> Vec<Vec<Coordinate>> {
        self.inner_rings
            .iter()
            .map(|ring| decode_coordinates(ring))
            .collect()
    }
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        match self {
            Geometry::Point(point) => point.identifier.as_deref(),
            Geometry::LineString(line) => line.identifier.as_deref(),
            Geometry::Polygon(polygon) => polygon.identifier.as_deref(),
        }
    }

    /// Lines and polygons are drawn as overlays; points as annotations.
    pub fn is_overlay(&self) -> bool {
        !matches!(self, Geometry::Point(_))
    }
}

/// Which polygon boundary is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    #[default]
    None,
    Outer,
    Inner,
}

#[derive(Debug)]
enum Payload {
    Point(Option<Coordinate>),
    LineString(Vec<Coordinate>),
    Polygon(PolygonRings),
}

#[derive(Debug, Default)]
struct PolygonRings {
    boundary: Boundary,
    in_linear_ring: bool,
    outer_ring: String,
    inner_rings: Vec<String>,
}

/// Accumulates one geometry element.
///
/// The coordinate text of points and lines is decoded when `<coordinates>`
/// closes. A polygon's text is held until its `<LinearRing>` closes and then
/// filed as the outer ring or appended as a new inner ring, depending on the
/// boundary that is open at that moment.
#[derive(Debug)]
pub struct GeometryBuilder {
    identifier: Option<String>,
    in_coordinates: bool,
    text: Accumulator,
    payload: Payload,
}

impl GeometryBuilder {
    pub fn new(kind: GeometryKind, identifier: Option<String>) -> Self {
        let payload = match kind {
            GeometryKind::Point => Payload::Point(None),
            GeometryKind::LineString => Payload::LineString(Vec::new()),
            GeometryKind::Polygon => Payload::Polygon(PolygonRings::default()),
        };
        Self {
            identifier,
            in_coordinates: false,
            text: Accumulator::default(),
            payload,
        }
    }

    pub fn kind(&self) -> GeometryKind {
        match self.payload {
            Payload::Point(_) => GeometryKind::Point,
            Payload::LineString(_) => GeometryKind::LineString,
            Payload::Polygon(_) => GeometryKind::Polygon,
        }
    }

    pub fn in_coordinates(&self) -> bool {
        self.in_coordinates
    }

    /// The open polygon boundary; always [`Boundary::None`] for points and lines.
    pub fn boundary(&self) -> Boundary {
        match &self.payload {
            Payload::Polygon(rings) => rings.boundary,
            _ => Boundary::None,
        }
    }

    pub fn can_accumulate(&self) -> bool {
        match &self.payload {
            Payload::Polygon(rings) => rings.in_linear_ring && self.in_coordinates,
            _ => self.in_coordinates,
        }
    }

    pub fn add_text(&mut self, text: &str) {
        if self.can_accumulate() {
            self.text.push(text);
        }
    }

    pub fn begin_coordinates(&mut self) {
        self.in_coordinates = true;
    }

    pub fn end_coordinates(&mut self) {
        self.in_coordinates = false;
        match &mut self.payload {
            Payload::Point(point) => {
                *point = match decode_coordinates(self.text.as_str()).as_slice() {
                    [coordinate] => Some(*coordinate),
                    _ => None,
                };
                self.text.clear();
            }
            Payload::LineString(points) => {
                *points = decode_coordinates(self.text.as_str());
                self.text.clear();
            }
            // The ring text is filed when the ring closes.
            Payload::Polygon(_) => {}
        }
    }

    pub fn begin_outer_boundary(&mut self) {
        if let Payload::Polygon(rings) = &mut self.payload {
            rings.boundary = Boundary::Outer;
        }
    }

    pub fn end_outer_boundary(&mut self) {
        self.file_pending_ring();
        if let Payload::Polygon(rings) = &mut self.payload {
            rings.boundary = Boundary::None;
        }
    }

    pub fn begin_inner_boundary(&mut self) {
        if let Payload::Polygon(rings) = &mut self.payload {
            rings.boundary = Boundary::Inner;
        }
    }

    pub fn end_inner_boundary(&mut self) {
        self.file_pending_ring();
        if let Payload::Polygon(rings) = &mut self.payload {
            rings.boundary = Boundary::None;
        }
    }

    pub fn begin_linear_ring(&mut self) {
        if let Payload::Polygon(rings) = &mut self.payload {
            rings.in_linear_ring = true;
        }
    }

    pub fn end_linear_ring(&mut self) {
        if let Payload::Polygon(rings) = &mut self.payload {
            rings.in_linear_ring = false;
            let ring = self.text.take();
            file_ring(rings, ring);
        }
    }

    /// Text left over when a boundary closes without its ring having closed.
    fn file_pending_ring(&mut self) {
        if self.text.is_empty() {
            return;
        }
        if let Payload::Polygon(rings) = &mut self.payload {
            let ring = self.text.take();
            file_ring(rings, ring);
        }
    }

    pub fn finish(self) -> Geometry {
        let identifier = self.identifier;
        match self.payload {
            Payload::Point(coordinate) => Geometry::Point(Point {
                identifier,
                coordinate,
            }),
            Payload::LineString(coordinates) => Geometry::LineString(LineString {
                identifier,
                coordinates,
            }),
            Payload::Polygon(rings) => {
                Geometry::Polygon(Polygon::new(identifier, rings.outer_ring, rings.inner_rings))
            }
        }
    }
}

fn file_ring(rings: &mut PolygonRings, ring: String) {
    match rings.boundary {
        Boundary::Outer => rings.outer_ring = ring,
        Boundary::Inner => rings.inner_rings.push(ring),
        Boundary::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinates(builder: &mut GeometryBuilder, text: &str) {
        builder.begin_coordinates();
        builder.add_text(text);
        builder.end_coordinates();
    }

    fn ring(builder: &mut GeometryBuilder, outer: bool, text: &str) {
        if outer {
            builder.begin_outer_boundary();
        } else {
            builder.begin_inner_boundary();
        }
        builder.begin_linear_ring();
        coordinates(builder, text);
        builder.end_linear_ring();
        if outer {
            builder.end_outer_boundary();
        } else {
            builder.end_inner_boundary();
        }
    }

    #[test]
    fn test_kind_from_element_name_ignores_case() {
        let parse = GeometryKind::from_element_name;
        assert_eq!(parse("point"), Some(GeometryKind::Point));
        assert_eq!(parse("LINESTRING"), Some(GeometryKind::LineString));
        assert_eq!(parse("Polygon"), Some(GeometryKind::Polygon));
        assert_eq!(parse("MultiGeometry"), None);
    }

    #[test]
    fn test_point_with_one_tuple() {
        let mut builder = GeometryBuilder::new(GeometryKind::Point, Some("p".to_string()));
        coordinates(&mut builder, "-122.08,37.42,0");
        match builder.finish() {
            Geometry::Point(point) => {
                assert_eq!(point.identifier.as_deref(), Some("p"));
                let coordinate = point.coordinate.unwrap();
                assert_eq!(coordinate.longitude, -122.08);
                assert_eq!(coordinate.latitude, 37.42);
            }
            other => panic!("expected a point, got {:?}", other),
        }
    }

    #[test]
    fn test_point_with_two_tuples_is_unusable() {
        let mut builder = GeometryBuilder::new(GeometryKind::Point, None);
        coordinates(&mut builder, "1,2 3,4");
        let expected = Point {
            identifier: None,
            coordinate: None,
        };
        assert_eq!(builder.finish(), Geometry::Point(expected));
    }

    #[test]
    fn test_line_string_keeps_order() {
        let mut builder = GeometryBuilder::new(GeometryKind::LineString, None);
        builder.begin_coordinates();
        builder.add_text("-122.1,37.1 ");
        builder.add_text("-122.2,37.2");
        builder.end_coordinates();
        match builder.finish() {
            Geometry::LineString(line) => {
                assert_eq!(
                    line.coordinates,
                    vec![Coordinate::new(37.1, -122.1), Coordinate::new(37.2, -122.2)]
                );
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn test_text_outside_coordinates_is_ignored() {
        let mut builder = GeometryBuilder::new(GeometryKind::LineString, None);
        builder.add_text("1,2");
        coordinates(&mut builder, "3,4");
        match builder.finish() {
            Geometry::LineString(line) => {
                assert_eq!(line.coordinates, vec![Coordinate::new(4.0, 3.0)])
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_rings_in_document_order() {
        let mut builder = GeometryBuilder::new(GeometryKind::Polygon, None);
        ring(&mut builder, true, "0,0 10,0 10,10 0,10 0,0");
        ring(&mut builder, false, "1,1 2,1 2,2 1,1");
        ring(&mut builder, false, "5,5 6,5 6,6 5,5");

        match builder.finish() {
            Geometry::Polygon(polygon) => {
                assert_eq!(polygon.exterior().len(), 5);
                assert_eq!(polygon.inner_ring_count(), 2);
                assert_eq!(
                    polygon.inner_ring_texts(),
                    ["1,1 2,1 2,2 1,1", "5,5 6,5 6,6 5,5"]
                );
                let interiors = polygon.interiors();
                assert_eq!(interiors[0][0], Coordinate::new(1.0, 1.0));
                assert_eq!(interiors[1][0], Coordinate::new(5.0, 5.0));
            }
            other => panic!("expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_coordinates_need_a_linear_ring() {
        let mut builder = GeometryBuilder::new(GeometryKind::Polygon, None);
        builder.begin_outer_boundary();
        builder.begin_coordinates();
        assert!(builder.in_coordinates());
        assert!(!builder.can_accumulate());
        builder.add_text("0,0 1,1");
        builder.end_coordinates();
        assert!(!builder.in_coordinates());
        builder.end_outer_boundary();

        match builder.finish() {
            Geometry::Polygon(polygon) => assert_eq!(polygon.outer_ring_text(), ""),
            other => panic!("expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_inner_boundary_without_ring_adds_no_hole() {
        let mut builder = GeometryBuilder::new(GeometryKind::Polygon, None);
        ring(&mut builder, true, "0,0 1,0 1,1 0,0");
        builder.begin_inner_boundary();
        builder.end_inner_boundary();

        match builder.finish() {
            Geometry::Polygon(polygon) => assert_eq!(polygon.inner_ring_count(), 0),
            other => panic!("expected a polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_boundary_state() {
        let mut builder = GeometryBuilder::new(GeometryKind::Polygon, None);
        builder.begin_inner_boundary();
        assert_eq!(builder.boundary(), Boundary::Inner);
        builder.end_inner_boundary();
        assert_eq!(builder.boundary(), Boundary::None);

        // Boundaries mean nothing to a line.
        let mut line = GeometryBuilder::new(GeometryKind::LineString, None);
        line.begin_outer_boundary();
        assert_eq!(line.boundary(), Boundary::None);
    }
}
