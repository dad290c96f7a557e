//! Streaming reader for a small subset of KML.
//!
//! This crate turns `<Style>`, `<Placemark>`, `<Point>`, `<LineString>` and
//! `<Polygon>` elements into a [`Document`]: top-level styles keyed by id and
//! placemarks in document order, each with its geometry and resolved style.
//! The document then vends drawable [`Shape`]s for a map renderer.
//!
//! # Overview
//!
//! The main types are:
//! - [`Dispatcher`]: the push-driven state machine, fed start/end/text events
//! - [`Document`]: the finished graph, with [`Document::overlays`],
//!   [`Document::annotations`] and [`Document::lookup_owner`]
//! - [`Placemark`], [`Style`], [`Geometry`]: the parsed elements
//! - [`Diagnostic`]: non-fatal problems found while parsing
//!
//! # Example
//!
//! ```rust
//! use kml_lite::parse_str;
//!
//! let document = parse_str(r##"<kml><Document>
//!   <Style id="red-line">
//!     <LineStyle><color>ff0000ff</color><width>3</width></LineStyle>
//!   </Style>
//!   <Placemark>
//!     <name>Trail</name>
//!     <styleUrl>#red-line</styleUrl>
//!     <LineString><coordinates>-122.1,37.1 -122.2,37.2</coordinates></LineString>
//!   </Placemark>
//! </Document></kml>"##).unwrap();
//!
//! let overlays = document.overlays();
//! assert_eq!(overlays.len(), 1);
//!
//! let renderer = document.renderer_for_overlay(&overlays[0]).unwrap();
//! assert_eq!(renderer.attributes.line_width, 3.0);
//! ```
//!
//! # Permissive parsing
//!
//! Only malformed XML and I/O failures are errors. Unknown elements are
//! skipped, coordinate tuples that do not scan are dropped, unparseable
//! numbers become zero and style references that name no style are left
//! unresolved. Content that is discarded outright is reported through
//! [`Document::diagnostics`].

mod accumulator;
pub mod color;
pub mod coordinates;
pub mod diagnostic;
pub mod dispatcher;
pub mod document;
pub mod error;
pub mod geometry;
pub mod options;
pub mod placemark;
pub mod reader;
pub mod shape;
pub mod style;

// Re-export main types
pub use color::Rgba;
pub use coordinates::{Coordinate, decode_coordinates};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use dispatcher::Dispatcher;
pub use document::Document;
pub use error::{Error, Result};
pub use geometry::{Geometry, GeometryKind, LineString, Point, Polygon};
pub use options::ParseOptions;
pub use placemark::{Placemark, PlacemarkStyle};
pub use reader::{
    parse_file, parse_file_with_options, parse_reader, parse_reader_with_options, parse_str,
    parse_str_with_options,
};
pub use shape::{AnnotationView, Bounds, OverlayRenderer, Shape, ShapeHandle};
pub use style::{Style, StyleAttributes};
