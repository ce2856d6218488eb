//! Structured error types for the pagegrid layout engine.
//!
//! Almost nothing in a layout pass is fatal: a dashboard must always render
//! something, so malformed panels are skipped rather than reported. The
//! variants below cover the few real error sources: JSON input, page
//! geometry configuration, and the panel filter pattern.

use thiserror::Error;

/// The unified error type returned by the public layout API.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// JSON input failed to parse as a valid layout request.
    #[error("failed to parse layout request: {source}{hint}")]
    Parse {
        source: serde_json::Error,
        hint: String,
    },

    /// The page math assumes positive dimensions; bad configuration is
    /// rejected before any panel is placed.
    #[error("invalid page geometry: {0}")]
    Geometry(String),

    /// The panel title filter is not a valid regular expression.
    #[error("invalid panel filter: {0}")]
    Filter(#[from] regex::Error),
}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "\n  Hint: check for trailing commas, missing quotes, or unescaped characters."
            }
            serde_json::error::Category::Data => {
                "\n  Hint: the JSON is valid but does not match the layout request schema. Check field names and types."
            }
            serde_json::error::Category::Eof => {
                "\n  Hint: unexpected end of input. Is the JSON truncated?"
            }
            serde_json::error::Category::Io => "",
        };
        LayoutError::Parse {
            source: e,
            hint: hint.to_string(),
        }
    }
}
