//! Parse configuration.

use serde::{Deserialize, Serialize};

/// Options controlling how a KML document is read.
///
/// Deserializable so hosts can keep them in a config file:
///
/// ```toml
/// trim-text = false
/// check-end-names = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    /// Trim surrounding whitespace from `<name>`, `<description>` and
    /// `<styleUrl>` text.
    pub trim_text: bool,

    /// Reject documents whose end tags do not match their start tags.
    pub check_end_names: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            trim_text: true,
            check_end_names: true,
        }
    }
}
