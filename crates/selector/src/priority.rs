//! Priority resolution: intent boosts and deterministic ranking.

use crate::matcher::{MatchReason, TechniqueMatch};
use promptsmith_core::{SelectionRules, Technique};
use std::cmp::Ordering;

/// A matched technique with its boosted score.
#[derive(Debug, Clone)]
pub struct RankedCandidate<'a> {
    pub index: usize,
    pub technique: &'a Technique,
    pub reasons: Vec<MatchReason>,
    pub boost: i64,
    pub score: i64,
}

impl RankedCandidate<'_> {
    pub fn id(&self) -> &str {
        &self.technique.id
    }
}

/// Apply intent boosts and sort: score descending, then catalog order,
/// then id.
pub fn rank<'a>(
    matches: Vec<TechniqueMatch<'a>>,
    rules: &SelectionRules,
    intent: Option<&str>,
) -> Vec<RankedCandidate<'a>> {
    let mut ranked: Vec<RankedCandidate<'a>> = matches
        .into_iter()
        .map(|m| {
            let boost = rules
                .boost_for(intent, &m.technique.id)
                .map_or(0, i64::from);
            let score = m.base_score() + boost;
            RankedCandidate {
                index: m.index,
                technique: m.technique,
                reasons: m.reasons,
                boost,
                score,
            }
        })
        .collect();
    ranked.sort_by(compare);
    ranked
}

fn compare(a: &RankedCandidate<'_>, b: &RankedCandidate<'_>) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.index.cmp(&b.index))
        .then_with(|| a.id().cmp(b.id()))
}
