//! # promptsmith core
//!
//! Domain types, the technique catalog model and error definitions for the
//! promptsmith technique selection engine. This crate has no knowledge of
//! how techniques are ranked; it defines the data every other crate works
//! against.
//!
//! ## Lifecycle
//!
//! A [`Catalog`] is parsed and validated once at process startup. After
//! that it is treated as immutable: requests and responses are ephemeral
//! values created per call.

pub mod catalog;
pub mod condition;
pub mod error;
pub mod request;
pub mod rules;
pub mod technique;

// Re-export key types at crate root for ergonomics
pub use catalog::{Catalog, CatalogSummary};
pub use condition::{ConditionSet, ScoreRange};
pub use error::CatalogError;
pub use request::{
    ClassificationResult, Complexity, SelectedTechnique, SelectionRequest, SelectionResponse,
};
pub use rules::{ComplexityFactors, PackingStrategy, SelectionRules, WordCountRange};
pub use technique::{ComplexityLevel, Technique, TechniqueConditions};
