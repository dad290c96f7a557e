//! Summary command implementation

use anyhow::Result;
use kml_lite::Document;

use super::{InputArgs, load_document};

pub fn execute(args: &InputArgs) -> Result<()> {
    let document = load_document(args)?;
    print!("{}", render(&document));
    Ok(())
}

pub fn render(document: &Document) -> String {
    document.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::SAMPLE;

    #[test]
    fn test_render_summary() {
        let document = kml_lite::parse_str(SAMPLE).unwrap();
        insta::assert_snapshot!(render(&document).trim_end(), @r"
        placemarks: 2
        styles: 1 (red)
        - Trail: LineString (2 points), style #red
        - Home: Point (37.8, -122.4), unstyled
        ");
    }

    #[test]
    fn test_render_summary_with_diagnostics() {
        let document = kml_lite::parse_str("<kml><Style><LineStyle/></Style></kml>").unwrap();
        insta::assert_snapshot!(render(&document).trim_end(), @r"
        placemarks: 0
        styles: 0
        diagnostics: 1
          warning[K-1-1]: Orphan Style Discarded: <Style> without an id outside a <Placemark> is unreachable (at byte 5)
        ");
    }
}
