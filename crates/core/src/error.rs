//! Error types for the promptsmith domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Catalog problems are the only fatal class: they surface while the
//! catalog is loaded, never while a request is being served.

use thiserror::Error;

/// Load-time catalog errors. Any of these refuses engine initialisation.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate technique id '{0}'")]
    DuplicateTechnique(String),

    #[error("technique id cannot be empty (technique #{index})")]
    EmptyTechniqueId { index: usize },

    #[error("intent boost for '{intent}' references unknown technique '{technique}'")]
    UnknownBoostTarget { intent: String, technique: String },

    #[error("technique '{technique}' has an invalid complexity score range [{min}, {max}]")]
    InvalidScoreRange {
        technique: String,
        min: f64,
        max: f64,
    },

    #[error("invalid selection rule: {0}")]
    InvalidRule(String),

    #[error("invalid word count ranges: {0}")]
    InvalidWordCountRanges(String),

    #[error("invalid {name} pattern: {detail}")]
    InvalidPattern { name: String, detail: String },

    #[error("catalog file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(serde_json::Error),
}
