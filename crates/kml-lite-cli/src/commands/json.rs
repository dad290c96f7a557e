//! JSON command implementation

use anyhow::{Context, Result};
use kml_lite::Document;

use super::{InputArgs, load_document};

pub fn execute(args: &InputArgs, compact: bool) -> Result<()> {
    let document = load_document(args)?;
    println!("{}", render(&document, compact)?);
    Ok(())
}

pub fn render(document: &Document, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(document)
    } else {
        serde_json::to_string_pretty(document)
    };
    json.context("Failed to serialize document")
}
