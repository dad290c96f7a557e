//! Bounds command implementation

use std::fmt::Write;

use anyhow::Result;
use kml_lite::Document;

use super::{InputArgs, load_document};

pub fn execute(args: &InputArgs) -> Result<()> {
    let document = load_document(args)?;
    print!("{}", render(&document));
    Ok(())
}

/// One line per placemark that has a shape, then the rectangle covering all
/// of them.
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    for placemark in document.placemarks() {
        let Some(bounds) = placemark.shape().and_then(|shape| shape.bounds()) else {
            continue;
        };
        let name = placemark.name.as_deref().unwrap_or("(unnamed)");
        let _ = writeln!(out, "{}: {}", name, bounds);
    }
    match document.bounds() {
        Some(bounds) => {
            let _ = writeln!(out, "all: {}", bounds);
        }
        None => out.push_str("no shapes\n"),
    }
    out
}
