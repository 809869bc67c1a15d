//! The technique selector.
//!
//! Composes the pipeline stages in order:
//!
//! ```text
//! estimate -> match -> rank (boosts) -> pack (compatibility) -> confidence -> reasoning
//! ```
//!
//! The selector owns an immutable catalog. `select` takes `&self`, performs
//! no I/O and never fails, so one instance can serve any number of threads.

use crate::compatibility;
use crate::complexity::ComplexityEstimator;
use crate::confidence::confidence;
use crate::matcher::{self, MatchContext};
use crate::priority;
use crate::reasoning::{self, ReasoningInput};
use promptsmith_core::{
    Catalog, CatalogError, SelectedTechnique, SelectionRequest, SelectionResponse,
};
use tracing::{debug, info};

#[derive(Debug)]
pub struct TechniqueSelector {
    catalog: Catalog,
    estimator: ComplexityEstimator,
}

impl TechniqueSelector {
    /// Validate the catalog and build a selector. This is the only fallible step.
    pub fn new(catalog: Catalog) -> Result<Self, CatalogError> {
        catalog.validate()?;
        let estimator = ComplexityEstimator::new(&catalog.complexity_factors)?;
        info!(
            techniques = catalog.techniques.len(),
            enabled = catalog.enabled_count(),
            max_techniques = catalog.selection_rules.max_techniques,
            "Technique selector initialised"
        );
        Ok(Self { catalog, estimator })
    }

    /// Selector over the built-in catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(Catalog::builtin()?)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Choose techniques for a request. An empty selection is a normal result.
    pub fn select(&self, request: &SelectionRequest) -> SelectionResponse {
        let rules = &self.catalog.selection_rules;
        let intent = request.intent();

        let estimate = self.estimator.estimate(&request.text, &request.complexity);
        let ctx = MatchContext::new(
            &request.text,
            intent,
            request.complexity.effective_level(),
            !request.complexity.is_unspecified(),
            estimate.score,
        );

        let matches = matcher::match_all(&self.catalog.techniques, &ctx);
        let matched = matches.len();
        let ranked = priority::rank(matches, rules, intent);
        let resolution = compatibility::resolve(&ranked, rules);

        let techniques: Vec<SelectedTechnique> = resolution
            .selected
            .iter()
            .map(|&i| {
                let candidate = &ranked[i];
                SelectedTechnique {
                    id: candidate.technique.id.clone(),
                    score: candidate.score,
                    template: candidate.technique.template.clone(),
                }
            })
            .collect();

        let winner = resolution.selected.first().map(|&i| &ranked[i]);
        let confidence = confidence(winner, matched, self.catalog.enabled_count(), rules);

        let reasoning = reasoning::explain(&ReasoningInput {
            intent,
            estimate: &estimate,
            ranked: &ranked,
            resolution: &resolution,
            max_techniques: rules.max_techniques,
        });

        debug!(
            intent = ?intent,
            complexity = estimate.score,
            matched,
            selected = techniques.len(),
            conflicts = resolution.conflicts.len(),
            confidence,
            "Selection complete"
        );

        SelectionResponse {
            primary: techniques.first().map(|t| t.id.clone()),
            techniques,
            confidence,
            meets_min_confidence: confidence >= rules.min_confidence,
            complexity_score: estimate.score,
            reasoning,
        }
    }
}
