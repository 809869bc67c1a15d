//! Compatibility resolution.
//!
//! Packs the ranked candidates into the final bounded set so that no two
//! chosen techniques share an incompatible combination. The default
//! strategy is greedy over the ranking; the exhaustive strategy searches
//! every conflict-free subset up to the limit for the best summed score
//! and is only used for small candidate lists.

use crate::priority::RankedCandidate;
use promptsmith_core::{PackingStrategy, SelectionRules};
use tracing::warn;

/// Above this many candidates exhaustive packing falls back to greedy.
pub const EXHAUSTIVE_LIMIT: usize = 16;

/// A candidate dropped because it conflicts with a chosen technique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Position of the dropped candidate in the ranking.
    pub dropped: usize,
    /// Position of the chosen candidate it conflicts with.
    pub blocked_by: usize,
}

/// Indices into the ranking, in ranking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub selected: Vec<usize>,
    pub conflicts: Vec<Conflict>,
    /// Matched candidates left out only because of the size limit.
    pub omitted: usize,
    /// Matched candidates with room to spare that exhaustive packing left
    /// out because they would lower the summed score.
    pub unprofitable: usize,
}

pub fn resolve(candidates: &[RankedCandidate<'_>], rules: &SelectionRules) -> Resolution {
    let selected = match rules.packing {
        PackingStrategy::Greedy => greedy(candidates, rules),
        PackingStrategy::Exhaustive if candidates.len() <= EXHAUSTIVE_LIMIT => {
            exhaustive(candidates, rules)
        }
        PackingStrategy::Exhaustive => {
            warn!(
                candidates = candidates.len(),
                limit = EXHAUSTIVE_LIMIT,
                "Too many candidates for exhaustive packing, using greedy"
            );
            greedy(candidates, rules)
        }
    };

    let mut conflicts = Vec::new();
    let mut omitted = 0;
    let mut unprofitable = 0;
    let full = selected.len() >= rules.max_techniques;
    for dropped in (0..candidates.len()).filter(|i| !selected.contains(i)) {
        let blocker = selected
            .iter()
            .copied()
            .find(|&s| rules.conflicts(candidates[s].id(), candidates[dropped].id()));
        match blocker {
            Some(blocked_by) => conflicts.push(Conflict {
                dropped,
                blocked_by,
            }),
            None if full => omitted += 1,
            None => unprofitable += 1,
        }
    }

    Resolution {
        selected,
        conflicts,
        omitted,
        unprofitable,
    }
}

fn compatible_with(
    candidates: &[RankedCandidate<'_>],
    chosen: &[usize],
    next: usize,
    rules: &SelectionRules,
) -> bool {
    chosen
        .iter()
        .all(|&c| !rules.conflicts(candidates[c].id(), candidates[next].id()))
}

fn greedy(candidates: &[RankedCandidate<'_>], rules: &SelectionRules) -> Vec<usize> {
    let mut chosen = Vec::with_capacity(rules.max_techniques);
    for i in 0..candidates.len() {
        if chosen.len() >= rules.max_techniques {
            break;
        }
        if compatible_with(candidates, &chosen, i, rules) {
            chosen.push(i);
        }
    }
    chosen
}

struct Search<'r, 'a> {
    candidates: &'r [RankedCandidate<'a>],
    rules: &'r SelectionRules,
    best: Vec<usize>,
    best_score: i64,
}

impl Search<'_, '_> {
    /// Better means a higher sum, then more techniques, then earlier ranks.
    fn consider(&mut self, chosen: &[usize], score: i64) {
        let better = score > self.best_score
            || (score == self.best_score
                && (chosen.len() > self.best.len()
                    || (chosen.len() == self.best.len() && chosen < self.best.as_slice())));
        if better {
            self.best = chosen.to_vec();
            self.best_score = score;
        }
    }

    fn walk(&mut self, start: usize, chosen: &mut Vec<usize>, score: i64) {
        self.consider(chosen, score);
        if chosen.len() >= self.rules.max_techniques {
            return;
        }
        for next in start..self.candidates.len() {
            if compatible_with(self.candidates, chosen, next, self.rules) {
                chosen.push(next);
                self.walk(next + 1, chosen, score + self.candidates[next].score);
                chosen.pop();
            }
        }
    }
}

fn exhaustive(candidates: &[RankedCandidate<'_>], rules: &SelectionRules) -> Vec<usize> {
    let mut search = Search {
        candidates,
        rules,
        best: Vec::new(),
        best_score: i64::MIN,
    };
    search.walk(0, &mut Vec::new(), 0);
    search.best
}
