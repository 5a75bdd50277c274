//! Error types for the engine.
//!
//! The engine itself never performs I/O, so the only failures it reports are
//! documents that do not parse and reference themes that lack the expected
//! shape. Absent roles, semantic names and alpha keys are not errors; the
//! rules that depend on them are skipped.

use std::fmt;

use thiserror::Error;

/// The kind of document that failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Palette,
    AlphaConfig,
    Template,
    Reference,
    Theme,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentKind::Palette => "palette",
            DocumentKind::AlphaConfig => "alpha config",
            DocumentKind::Template => "style template",
            DocumentKind::Reference => "reference theme",
            DocumentKind::Theme => "theme",
        };
        f.write_str(name)
    }
}

/// Errors produced while loading documents into the engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The document is not valid structured data.
    #[error("failed to parse {document} document: {source}")]
    Parse {
        document: DocumentKind,
        #[source]
        source: serde_json::Error,
    },

    /// A theme document does not carry `themes[0].style`.
    #[error("invalid theme: {0}")]
    InvalidTheme(&'static str),
}

impl Error {
    pub(crate) fn parse(document: DocumentKind) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Error::Parse { document, source }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_document() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::Parse {
            document: DocumentKind::AlphaConfig,
            source,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to parse alpha config document"));
    }

    #[test]
    fn test_invalid_theme_display() {
        let err = Error::InvalidTheme("missing style map");
        assert_eq!(err.to_string(), "invalid theme: missing style map");
    }
}
