//! Rule composition for candidate ranking.

use super::types::{ByCost, Candidate, CandidateRule};

/// Strategy for breaking ties when every rule produces equal keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreaker {
    /// Lexical order of reviewer names.
    ByName,

    /// Reviewer order in the preference table.
    ByPosition,
}

/// Ranks candidates by applying rules in sequence.
///
/// A later rule is consulted only when every earlier rule ties; the
/// tie-breaker settles whatever remains, so the order is total and
/// reproducible.
///
/// # Examples
///
/// ```
/// use u_assign::ranking::{Candidate, Ranker};
///
/// let candidates = vec![
///     Candidate { reviewer: "Bob", position: 0, score: 2, cost: 2 },
///     Candidate { reviewer: "Alice", position: 1, score: 2, cost: 2 },
///     Candidate { reviewer: "Carol", position: 2, score: 1, cost: 1 },
/// ];
///
/// let ranked = Ranker::standard().rank(candidates);
/// let names: Vec<&str> = ranked.iter().map(|c| c.reviewer).collect();
/// assert_eq!(names, vec!["Carol", "Alice", "Bob"]);
/// ```
pub struct Ranker {
    rules: Vec<Box<dyn CandidateRule>>,
    tie_breaker: TieBreaker,
}

impl Ranker {
    /// Creates a ranker with no rules that orders by reviewer name.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::ByName,
        }
    }

    /// Cost ascending, then reviewer name.
    pub fn standard() -> Self {
        Self::new().with_rule(ByCost)
    }

    /// Sets the tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tb: TieBreaker) -> Self {
        self.tie_breaker = tb;
        self
    }

    /// Appends a rule.
    pub fn with_rule<R: CandidateRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Returns the number of rules in this ranker.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the names of all rules in order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    fn keys(&self, candidate: &Candidate<'_>) -> Vec<i64> {
        self.rules.iter().map(|r| r.key(candidate)).collect()
    }

    /// Returns indices into `candidates`, best first.
    pub fn sort_indices(&self, candidates: &[Candidate<'_>]) -> Vec<usize> {
        let keys: Vec<Vec<i64>> = candidates.iter().map(|c| self.keys(c)).collect();
        let mut indices: Vec<usize> = (0..candidates.len()).collect();

        indices.sort_by(|&a, &b| {
            keys[a].cmp(&keys[b]).then_with(|| {
                let (ca, cb) = (&candidates[a], &candidates[b]);
                match self.tie_breaker {
                    TieBreaker::ByName => ca
                        .reviewer
                        .cmp(cb.reviewer)
                        .then(ca.position.cmp(&cb.position)),
                    TieBreaker::ByPosition => ca.position.cmp(&cb.position),
                }
            })
        });

        indices
    }

    /// Sorts candidates, best first.
    pub fn rank<'a>(&self, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>> {
        self.sort_indices(&candidates)
            .into_iter()
            .map(|i| candidates[i])
            .collect()
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Ranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ranker")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
