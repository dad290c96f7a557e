//! quick-xml driven front end that feeds a [`Dispatcher`].

use crate::{Dispatcher, Document, Error, ParseOptions, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, BytesText, Event};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse a KML document held in memory.
///
/// # Example
///
/// ```rust
/// use kml_lite::parse_str;
///
/// let document = parse_str(r#"<kml><Placemark><name>Home</name></Placemark></kml>"#).unwrap();
/// assert_eq!(document.placemarks()[0].name.as_deref(), Some("Home"));
/// ```
///
/// # Errors
///
/// Returns an error if the input is not well-formed XML.
pub fn parse_str(content: &str) -> Result<Document> {
    parse_str_with_options(content, &ParseOptions::default())
}

pub fn parse_str_with_options(content: &str, options: &ParseOptions) -> Result<Document> {
    parse_reader_with_options(content.as_bytes(), options)
}

/// Parse a KML document from any buffered source.
///
/// # Errors
///
/// Returns an error if reading fails or the input is not well-formed XML.
pub fn parse_reader<R: BufRead>(source: R) -> Result<Document> {
    parse_reader_with_options(source, &ParseOptions::default())
}

pub fn parse_reader_with_options<R: BufRead>(
    source: R,
    options: &ParseOptions,
) -> Result<Document> {
    let mut reader = Reader::from_reader(source);
    let config = reader.config_mut();
    // Text chunks are concatenated, so trimming them would glue coordinate tuples.
    config.trim_text_start = false;
    config.trim_text_end = false;
    config.check_end_names = options.check_end_names;

    let mut dispatcher = Dispatcher::new(options.clone());
    let mut buf = Vec::new();

    loop {
        let event_start = reader.buffer_position();
        dispatcher.set_position(event_start);

        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                handle_start(&mut dispatcher, &e, event_start)?;
            }
            Ok(Event::End(e)) => {
                dispatcher.on_end(&element_name(e.name().as_ref()));
            }
            Ok(Event::Empty(e)) => {
                handle_start(&mut dispatcher, &e, event_start)?;
                dispatcher.on_end(&element_name(e.name().as_ref()));
            }
            Ok(Event::Text(e)) => {
                handle_text(&mut dispatcher, &e, event_start)?;
            }
            Ok(Event::CData(e)) => {
                dispatcher.on_text(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::Eof) => break,
            // Comments, processing instructions, declarations and DOCTYPE
            Ok(_) => {}
            Err(err) => return Err(Error::from_xml(err, reader.error_position())),
        }
        buf.clear();
    }

    Ok(dispatcher.finish())
}

/// Parse a KML file.
///
/// # Errors
///
/// Returns [`Error::Open`] if the file cannot be opened, otherwise as
/// [`parse_reader`].
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, &ParseOptions::default())
}

pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> Result<Document> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "parsing KML file");
    parse_reader_with_options(BufReader::new(file), options)
}

fn element_name(name: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(name)
}

fn handle_start(dispatcher: &mut Dispatcher, e: &BytesStart<'_>, event_start: u64) -> Result<()> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::XmlSyntax {
            message: format!("Invalid attribute: {}", err),
            position: event_start,
        })?;
        let value = attr.unescape_value().map_err(|err| Error::XmlSyntax {
            message: format!("Invalid attribute value: {}", err),
            position: event_start,
        })?;
        let key = element_name(attr.key.as_ref()).into_owned();
        attributes.push((key, value.into_owned()));
    }
    dispatcher.on_start(&element_name(e.name().as_ref()), attributes);
    Ok(())
}

fn handle_text(dispatcher: &mut Dispatcher, e: &BytesText<'_>, event_start: u64) -> Result<()> {
    let text = e.unescape().map_err(|err| Error::XmlSyntax {
        message: format!("Invalid text content: {}", err),
        position: event_start,
    })?;
    dispatcher.on_text(&text);
    Ok(())
}
