//! Per-reviewer load accounting for one assignment run.

use std::collections::BTreeMap;

use crate::error::{AssignError, Result};

/// Tracks how many proposals each reviewer has taken and enforces a cap.
///
/// A tracker lives for one run. It is passed to the engine explicitly, so
/// tests can seed it with prior loads and exercise a single proposal in
/// isolation.
///
/// # Examples
///
/// ```
/// use u_assign::load::LoadTracker;
///
/// let mut tracker = LoadTracker::new(1);
/// assert!(tracker.can_accept("Alice"));
/// tracker.record("Alice");
/// assert!(!tracker.can_accept("Alice"));
/// assert_eq!(tracker.load("Alice"), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadTracker {
    max_load: usize,
    loads: BTreeMap<String, usize>,
}

impl LoadTracker {
    /// Creates an empty tracker with an explicit cap.
    pub fn new(max_load: usize) -> Self {
        Self {
            max_load,
            loads: BTreeMap::new(),
        }
    }

    /// Creates a tracker with the balanced cap for a run:
    /// `ceil(reviewers_per_proposal * proposal_count / reviewer_count)`.
    pub fn for_run(
        reviewers_per_proposal: usize,
        proposal_count: usize,
        reviewer_count: usize,
    ) -> Result<Self> {
        Ok(Self::new(max_load(
            reviewers_per_proposal,
            proposal_count,
            reviewer_count,
        )?))
    }

    /// Seeds a reviewer's current load.
    pub fn with_load(mut self, reviewer: impl Into<String>, load: usize) -> Self {
        self.loads.insert(reviewer.into(), load);
        self
    }

    pub fn max_load(&self) -> usize {
        self.max_load
    }

    /// Returns true while the reviewer is strictly below the cap.
    pub fn can_accept(&self, reviewer: &str) -> bool {
        self.load(reviewer) < self.max_load
    }

    /// Counts one more assignment for the reviewer.
    pub fn record(&mut self, reviewer: &str) {
        match self.loads.get_mut(reviewer) {
            Some(n) => *n += 1,
            None => {
                self.loads.insert(reviewer.to_string(), 1);
            }
        }
    }

    /// Current load of a reviewer; zero if never recorded.
    pub fn load(&self, reviewer: &str) -> usize {
        self.loads.get(reviewer).copied().unwrap_or(0)
    }

    /// Recorded loads, ordered by reviewer name.
    pub fn loads(&self) -> impl Iterator<Item = (&str, usize)> {
        self.loads.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Smallest per-reviewer cap that lets every proposal be filled under
/// perfectly balanced load.
pub fn max_load(
    reviewers_per_proposal: usize,
    proposal_count: usize,
    reviewer_count: usize,
) -> Result<usize> {
    if reviewer_count == 0 {
        return Err(AssignError::invalid("no reviewers supplied"));
    }
    let slots = reviewers_per_proposal
        .checked_mul(proposal_count)
        .ok_or_else(|| AssignError::invalid("requested reviewer slots overflow"))?;
    Ok(slots.div_ceil(reviewer_count))
}
