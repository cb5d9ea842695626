//! Error taxonomy for table construction and assignment runs.
//!
//! Every variant is structural and fatal: a run that hits one produces no
//! table, assignment, or result. Short proposals are not errors; see
//! [`Shortfall`](crate::engine::Shortfall).

/// Errors raised while building a preference table or starting a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignError {
    /// A reviewer input does not cover the canonical proposal set.
    #[error(
        "reviewer '{reviewer}' does not cover the canonical proposal set \
         (missing: {missing:?}, unexpected: {unexpected:?})"
    )]
    ProposalSetMismatch {
        /// Reviewer whose input was rejected.
        reviewer: String,
        /// Canonical proposal ids absent from the input, in canonical order.
        missing: Vec<String>,
        /// Proposal ids in the input that are not canonical, in input order.
        unexpected: Vec<String>,
    },

    /// Run parameters or input shape cannot produce an assignment.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two inputs share one reviewer name.
    #[error("reviewer '{reviewer}' supplied more than one preference table")]
    DuplicateReviewer { reviewer: String },

    /// One input lists the same proposal id twice.
    #[error("reviewer '{reviewer}' lists proposal '{proposal_id}' more than once")]
    DuplicateProposal {
        reviewer: String,
        proposal_id: String,
    },
}

impl AssignError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        AssignError::InvalidConfiguration(message.into())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AssignError>;
