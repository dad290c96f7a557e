//! Non-fatal diagnostics collected while parsing.
//!
//! Parsing is permissive: content that cannot be used is skipped rather than
//! aborting the parse. Some of those decisions lose data the author clearly
//! meant to keep (a top-level style nobody can reference, a placemark that
//! never closed), so they are recorded as diagnostics on the resulting
//! [`Document`](crate::Document) in addition to being logged.

use serde::Serialize;
use std::fmt;

/// Diagnostic codes. Every code names one situation the dispatcher reports.
pub mod codes {
    /// A `<Style>` outside any placemark has no `id` and was discarded.
    pub const ORPHAN_STYLE: &str = "K-1-1";
    /// A `<Placemark>` opened while another was still open; the open one was dropped.
    pub const NESTED_PLACEMARK: &str = "K-1-2";
    /// The input ended while a placemark or style was still open.
    pub const UNEXPECTED_EOF: &str = "K-1-3";
    /// A second top-level style with the same `id` replaced the first.
    pub const STYLE_REDEFINED: &str = "K-1-4";
    /// A placemark declared more than one geometry; the last one was kept.
    pub const GEOMETRY_REPLACED: &str = "K-1-5";
}

/// How much attention a diagnostic deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// Content was discarded.
    Warning,
    /// Content was superseded by later content, as the format allows.
    Info,
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    /// One of the [`codes`].
    pub code: &'static str,

    /// Short title, e.g. "Orphan Style Discarded".
    pub title: String,

    /// Longer description of what happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,

    /// Byte offset of the event that triggered the diagnostic, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl Diagnostic {
    /// Start a warning diagnostic.
    pub fn warning(code: &'static str, title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, code, title)
    }

    /// Start an informational diagnostic.
    pub fn info(code: &'static str, title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Info, code, title)
    }

    fn new(kind: DiagnosticKind, code: &'static str, title: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            title: title.into(),
            problem: None,
            offset: None,
        }
    }

    /// Attach a description of the problem.
    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.problem = Some(problem.into());
        self
    }

    /// Attach the byte offset the problem was found at.
    pub fn at(mut self, offset: Option<u64>) -> Self {
        self.offset = offset;
        self
    }

    pub fn is_warning(&self) -> bool {
        self.kind == DiagnosticKind::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DiagnosticKind::Warning => "warning",
            DiagnosticKind::Info => "info",
        };
        write!(f, "{}[{}]: {}", kind, self.code, self.title)?;
        if let Some(problem) = &self.problem {
            write!(f, ": {}", problem)?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (at byte {})", offset)?;
        }
        Ok(())
    }
}
