//! Command implementations for the kml-lite CLI
//!
//! Each command loads the input through [`load_document`] and prints a
//! rendering of the result to stdout.

pub mod bounds;
pub mod json;
pub mod summary;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kml_lite::{Document, ParseOptions};

/// Arguments shared by every command
#[derive(Debug, clap::Args)]
pub struct InputArgs {
    /// KML file to read
    pub file: PathBuf,

    /// TOML file with parse options (trim-text, check-end-names)
    #[arg(long, value_name = "TOML")]
    pub config: Option<PathBuf>,
}

/// Read parse options from `path`, or the defaults when there is none.
pub fn load_options(path: Option<&Path>) -> Result<ParseOptions> {
    let Some(path) = path else {
        return Ok(ParseOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

pub fn load_document(args: &InputArgs) -> Result<Document> {
    let options = load_options(args.config.as_deref())?;
    let document = kml_lite::parse_file_with_options(&args.file, &options)
        .with_context(|| format!("Failed to parse {}", args.file.display()))?;
    for diagnostic in document.diagnostics() {
        tracing::debug!("{}", diagnostic);
    }
    Ok(document)
}

#[cfg(test)]
pub(crate) const SAMPLE: &str = r##"<kml xmlns="http://www.opengis.net/kml/2.2"><Document>
  <Style id="red">
    <LineStyle><color>ff0000ff</color><width>3</width></LineStyle>
  </Style>
  <Placemark>
    <name>Trail</name>
    <styleUrl>#red</styleUrl>
    <LineString><coordinates>-122.1,37.1 -122.2,37.2</coordinates></LineString>
  </Placemark>
  <Placemark>
    <name>Home</name>
    <Point><coordinates>-122.4,37.8</coordinates></Point>
  </Placemark>
</Document></kml>"##;
