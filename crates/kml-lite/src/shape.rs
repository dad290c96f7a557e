//! Drawable descriptions handed to a map renderer.
//!
//! A [`Shape`] is built from a placemark's geometry the first time it is
//! asked for and then shared through a [`ShapeHandle`]. Renderers hand the
//! handle back to look up the owning placemark, and that lookup compares
//! handles by pointer, so the memoized `Arc` is what gives a shape its
//! identity.

use crate::coordinates::Coordinate;
use crate::geometry::Geometry;
use crate::style::StyleAttributes;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Shared, identity-comparable reference to a [`Shape`].
pub type ShapeHandle = Arc<Shape>;

/// A placemark geometry decoded into drawable form.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A point annotation (pin).
    Annotation {
        title: Option<String>,
        coordinate: Coordinate,
    },

    /// An open path overlay.
    Polyline {
        title: Option<String>,
        coordinates: Vec<Coordinate>,
    },

    /// A filled area overlay with optional holes.
    Polygon {
        title: Option<String>,
        exterior: Vec<Coordinate>,
        interiors: Vec<Vec<Coordinate>>,
    },
}

impl Shape {
    /// Build the drawable for `geometry`, titled with the placemark name.
    ///
    /// Returns `None` when the geometry has no usable coordinates: a point
    /// without exactly one valid tuple, an empty line, or a polygon whose
    /// outer ring decoded to nothing.
    pub fn from_geometry(geometry: &Geometry, title: Option<String>) -> Option<Shape> {
        match geometry {
            Geometry::Point(point) => point
                .coordinate
                .map(|coordinate| Shape::Annotation { title, coordinate }),
            Geometry::LineString(line) => {
                if line.coordinates.is_empty() {
                    return None;
                }
                Some(Shape::Polyline {
                    title,
                    coordinates: line.coordinates.clone(),
                })
            }
            Geometry::Polygon(polygon) => {
                let exterior = polygon.exterior();
                if exterior.is_empty() {
                    return None;
                }
                Some(Shape::Polygon {
                    title,
                    exterior,
                    interiors: polygon.interiors(),
                })
            }
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Shape::Annotation { title, .. }
            | Shape::Polyline { title, .. }
            | Shape::Polygon { title, .. } => title.as_deref(),
        }
    }

    /// Polylines and polygons are overlays; annotations are not.
    pub fn is_overlay(&self) -> bool {
        !self.is_annotation()
    }

    pub fn is_annotation(&self) -> bool {
        matches!(self, Shape::Annotation { .. })
    }

    /// The rectangle covering the shape. Holes lie inside the exterior and
    /// do not widen it.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Shape::Annotation { coordinate, .. } => Some(Bounds::from_coordinate(coordinate)),
            Shape::Polyline { coordinates, .. } => Bounds::from_coordinates(coordinates),
            Shape::Polygon { exterior, .. } => Bounds::from_coordinates(exterior),
        }
    }
}

/// Latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl Bounds {
    /// The degenerate rectangle holding a single coordinate.
    pub fn from_coordinate(coordinate: &Coordinate) -> Self {
        Self {
            min_latitude: coordinate.latitude,
            min_longitude: coordinate.longitude,
            max_latitude: coordinate.latitude,
            max_longitude: coordinate.longitude,
        }
    }

    /// The smallest rectangle holding every coordinate, or `None` for none.
    pub fn from_coordinates<'a>(
        coordinates: impl IntoIterator<Item = &'a Coordinate>,
    ) -> Option<Self> {
        coordinates.into_iter().fold(None, |bounds, coordinate| {
            Some(match bounds {
                None => Bounds::from_coordinate(coordinate),
                Some(bounds) => bounds.union(Bounds::from_coordinate(coordinate)),
            })
        })
    }

    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            min_latitude: self.min_latitude.min(other.min_latitude),
            min_longitude: self.min_longitude.min(other.min_longitude),
            max_latitude: self.max_latitude.max(other.max_latitude),
            max_longitude: self.max_longitude.max(other.max_longitude),
        }
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&coordinate.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&coordinate.longitude)
    }
}

/// `min_lat,min_lon .. max_lat,max_lon`
impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} .. {},{}",
            self.min_latitude, self.min_longitude, self.max_latitude, self.max_longitude
        )
    }
}

/// A path renderer for an overlay with the placemark's style applied.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRenderer {
    pub overlay: ShapeHandle,
    pub attributes: StyleAttributes,
}

/// The pin view vended for a point annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationView {
    pub annotation: ShapeHandle,
    pub can_show_callout: bool,
    pub animates_drop: bool,
}

impl AnnotationView {
    pub fn pin(annotation: ShapeHandle) -> Self {
        Self {
            annotation,
            can_show_callout: true,
            animates_drop: true,
        }
    }
}
