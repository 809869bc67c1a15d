//! Technique selection engine.
//!
//! Given request text plus a classified intent and complexity, decides which
//! prompt-engineering techniques to apply, in what order, with what
//! confidence, and why.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────┐   ┌──────────┐   ┌───────────────┐
//! │  Complexity  │──▶│ Matcher  │──▶│ Priority │──▶│ Compatibility │
//! │  Estimator   │   │          │   │ (boosts) │   │   (packing)   │
//! └──────────────┘   └──────────┘   └──────────┘   └───────┬───────┘
//!                                                          │
//!                                          ┌───────────────┴──────┐
//!                                          │ Confidence+Reasoning │
//!                                          └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use promptsmith_core::{ComplexityLevel, SelectionRequest};
//! use promptsmith_selector::TechniqueSelector;
//!
//! let selector = TechniqueSelector::builtin().unwrap();
//! let response = selector.select(
//!     &SelectionRequest::new("Work through this step by step")
//!         .with_intent("problem_solving")
//!         .with_level(ComplexityLevel::Complex),
//! );
//! assert_eq!(response.primary.as_deref(), Some("chain_of_thought"));
//! ```

mod compatibility;
mod complexity;
mod confidence;
mod engine;
mod handle;
mod matcher;
mod priority;
mod reasoning;

pub use compatibility::{Conflict, EXHAUSTIVE_LIMIT, Resolution};
pub use complexity::{ComplexityBasis, ComplexityEstimate, ComplexityEstimator, ComplexitySignal};
pub use engine::TechniqueSelector;
pub use handle::SelectorHandle;
pub use matcher::MatchReason;
