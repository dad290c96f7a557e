//! Decoding of KML coordinate lists.
//!
//! A KML coordinate list is a whitespace separated sequence of
//! `longitude,latitude[,altitude]` tuples. Decoding is deliberately lenient:
//! a tuple that cannot be scanned, or that falls outside the valid range of
//! geographic coordinates, is dropped and the rest of the list survives.

use serde::Serialize;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,

    /// Altitude in meters, when the tuple carried a third field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl Coordinate {
    /// Create a coordinate without altitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    /// True if latitude is within [-90, 90] and longitude within [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Decode a KML coordinate list into the valid coordinates it contains.
///
/// # Example
///
/// ```rust
/// use kml_lite::decode_coordinates;
///
/// let coords = decode_coordinates("181,45 -122.4,37.8");
/// assert_eq!(coords.len(), 1);
/// assert_eq!(coords[0].latitude, 37.8);
/// assert_eq!(coords[0].longitude, -122.4);
/// ```
pub fn decode_coordinates(text: &str) -> Vec<Coordinate> {
    text.split_whitespace().filter_map(decode_tuple).collect()
}

fn decode_tuple(tuple: &str) -> Option<Coordinate> {
    let mut fields = FieldScanner { rest: tuple };
    let longitude = fields.next_field()?;
    let latitude = fields.next_field()?;
    let altitude = fields.next_field();

    let coordinate = Coordinate {
        latitude,
        longitude,
        altitude,
    };
    coordinate.is_valid().then_some(coordinate)
}

/// Scans numeric fields out of one tuple, skipping `,` separators.
struct FieldScanner<'a> {
    rest: &'a str,
}

impl FieldScanner<'_> {
    fn next_field(&mut self) -> Option<f64> {
        let text = self.rest.trim_start_matches(',');
        let len = numeric_prefix_len(text.as_bytes());
        if len == 0 {
            self.rest = text;
            return None;
        }
        self.rest = &text[len..];
        text[..len].parse().ok()
    }
}

/// Length of the longest prefix of `bytes` shaped like a decimal number:
/// `[+-]digits[.digits][(e|E)[+-]digits]`, with at least one mantissa digit.
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer_digits = digits_from(end);
    end += integer_digits;

    let mut mantissa_digits = integer_digits;
    if bytes.get(end) == Some(&b'.') {
        let fraction_digits = digits_from(end + 1);
        if fraction_digits > 0 {
            end += 1 + fraction_digits;
            mantissa_digits += fraction_digits;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let exponent_digits = digits_from(exponent);
        if exponent_digits > 0 {
            end = exponent + exponent_digits;
        }
    }

    end
}
