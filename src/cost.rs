//! Preference-to-cost mapping.

use crate::preference::COI_SCORE;

/// Cost assigned to conflict-of-interest pairs.
///
/// Strictly greater than any legitimate score, so forbidden reviewers
/// always rank last.
pub const FORBIDDEN_COST: u32 = 1000;

/// Maps preference scores to assignment costs.
///
/// Lower cost means more preferred. A COI score maps to the forbidden
/// cost; any other score is its own cost.
///
/// # Examples
///
/// ```
/// use u_assign::cost::{CostModel, FORBIDDEN_COST};
///
/// let model = CostModel::default();
/// assert_eq!(model.cost(0), FORBIDDEN_COST);
/// assert_eq!(model.cost(3), 3);
/// assert!(model.is_forbidden(model.cost(0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    forbidden_cost: u32,
}

impl CostModel {
    pub fn new(forbidden_cost: u32) -> Self {
        Self { forbidden_cost }
    }

    /// Cost of a preference score.
    pub fn cost(&self, score: u32) -> u32 {
        if score == COI_SCORE {
            self.forbidden_cost
        } else {
            score
        }
    }

    /// Returns true if `cost` is the forbidden sentinel.
    pub fn is_forbidden(&self, cost: u32) -> bool {
        cost == self.forbidden_cost
    }

    pub fn forbidden_cost(&self) -> u32 {
        self.forbidden_cost
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(FORBIDDEN_COST)
    }
}
