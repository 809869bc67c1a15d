//! Confidence scoring.
//!
//! ```text
//! confidence = 0.7 * clamp(top_score / score_ceiling, 0, 1)
//!            + 0.3 * matched / enabled techniques
//!            + 0.05 when the winner received a positive intent boost
//! ```
//!
//! clamped to `[0, 1]`. An empty selection has zero confidence.

use crate::priority::RankedCandidate;
use promptsmith_core::SelectionRules;

const TOP_SCORE_WEIGHT: f64 = 0.7;
const COVERAGE_WEIGHT: f64 = 0.3;
const BOOST_BONUS: f64 = 0.05;

pub fn confidence(
    winner: Option<&RankedCandidate<'_>>,
    matched: usize,
    enabled: usize,
    rules: &SelectionRules,
) -> f64 {
    let Some(winner) = winner else {
        return 0.0;
    };

    let top = (winner.score as f64 / rules.score_ceiling).clamp(0.0, 1.0);
    let coverage = if enabled == 0 {
        0.0
    } else {
        (matched as f64 / enabled as f64).min(1.0)
    };
    let bonus = if winner.boost > 0 { BOOST_BONUS } else { 0.0 };

    let value = TOP_SCORE_WEIGHT * top + COVERAGE_WEIGHT * coverage + bonus;
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
