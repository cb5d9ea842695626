//! Assignment run configuration.

use crate::cost::{CostModel, FORBIDDEN_COST};
use crate::error::{AssignError, Result};
use crate::preference::PreferenceTable;

/// Configuration parameters for an assignment run.
///
/// # Examples
///
/// ```
/// use u_assign::engine::AssignConfig;
///
/// let config = AssignConfig::default()
///     .with_reviewers_per_proposal(2)
///     .with_forbidden_cost(500);
/// assert_eq!(config.reviewers_per_proposal, 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignConfig {
    /// Reviewer slots to fill on every proposal. Must be at least 1.
    pub reviewers_per_proposal: usize,
    /// Cost given to conflict-of-interest pairs. Must exceed every
    /// legitimate score.
    pub forbidden_cost: u32,
    /// Rank proposals on the rayon pool before committing them in order.
    ///
    /// Only takes effect with the `parallel` feature; the result is the
    /// same either way.
    pub parallel: bool,
}

impl Default for AssignConfig {
    fn default() -> Self {
        Self {
            reviewers_per_proposal: 3,
            forbidden_cost: FORBIDDEN_COST,
            parallel: false,
        }
    }
}

impl AssignConfig {
    /// Sets the number of reviewers requested per proposal.
    pub fn with_reviewers_per_proposal(mut self, n: usize) -> Self {
        self.reviewers_per_proposal = n;
        self
    }

    /// Sets the conflict-of-interest cost sentinel.
    pub fn with_forbidden_cost(mut self, cost: u32) -> Self {
        self.forbidden_cost = cost;
        self
    }

    /// Enables or disables parallel ranking.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The cost model implied by this configuration.
    pub fn cost_model(&self) -> CostModel {
        CostModel::new(self.forbidden_cost)
    }

    /// Validates the configuration on its own.
    pub fn validate(&self) -> Result<()> {
        if self.reviewers_per_proposal < 1 {
            return Err(AssignError::invalid(
                "reviewers_per_proposal must be at least 1",
            ));
        }
        if self.forbidden_cost == 0 {
            return Err(AssignError::invalid("forbidden_cost must be positive"));
        }
        Ok(())
    }

    /// Validates the configuration against the table it will run on.
    pub fn validate_for(&self, table: &PreferenceTable) -> Result<()> {
        self.validate()?;
        if table.reviewer_count() == 0 {
            return Err(AssignError::invalid("no reviewers supplied"));
        }
        if table.proposal_count() == 0 {
            return Err(AssignError::invalid("no proposals supplied"));
        }
        if self.forbidden_cost <= table.missing_score() {
            return Err(AssignError::invalid(format!(
                "forbidden_cost {} must exceed the largest score {}",
                self.forbidden_cost,
                table.missing_score()
            )));
        }
        Ok(())
    }
}
