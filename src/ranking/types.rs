//! Candidate type and rule trait.

/// A reviewer being considered for one proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Reviewer name.
    pub reviewer: &'a str,
    /// Reviewer position in the preference table.
    pub position: usize,
    /// Preference score for the proposal.
    pub score: u32,
    /// Cost derived from the score.
    pub cost: u32,
}

/// A ranking rule that maps a candidate to an ordering key.
///
/// **Lower keys rank first.** Keys must depend only on the candidate, not
/// on reviewer load, so proposals can be ranked independently before any
/// load is committed.
///
/// # Examples
///
/// ```
/// use u_assign::ranking::{Candidate, CandidateRule};
///
/// // Prefer reviewers who ranked the proposal explicitly over the
/// // missing sentinel, regardless of cost.
/// struct ExplicitFirst { missing: u32 }
///
/// impl CandidateRule for ExplicitFirst {
///     fn name(&self) -> &str { "ExplicitFirst" }
///     fn key(&self, c: &Candidate<'_>) -> i64 {
///         i64::from(c.score == self.missing)
///     }
/// }
/// ```
pub trait CandidateRule: Send + Sync {
    /// Returns the name of this rule.
    fn name(&self) -> &str;

    /// Computes the ordering key for a candidate.
    fn key(&self, candidate: &Candidate<'_>) -> i64;
}

/// Orders candidates by ascending cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByCost;

impl CandidateRule for ByCost {
    fn name(&self) -> &str {
        "ByCost"
    }

    fn key(&self, candidate: &Candidate<'_>) -> i64 {
        i64::from(candidate.cost)
    }
}
