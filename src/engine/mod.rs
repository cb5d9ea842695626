//! Greedy reviewer assignment.
//!
//! Walks proposals in the preference table's canonical order and fills each
//! one with the cheapest reviewers that are neither conflicted nor at the
//! load cap. The result is reproducible but not globally optimal: the
//! processing order and the name tie-break are part of the output
//! contract.
//!
//! Proposals that cannot be filled are reported as [`Shortfall`]s rather
//! than failing the run.

mod config;
mod runner;
mod types;

pub use config::AssignConfig;
pub use runner::{AssignRun, AssignRunner};
pub use types::{Assignment, ProposalAssignment, ReviewerLoad, Shortfall};
