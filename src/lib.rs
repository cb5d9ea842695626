//! Preference-driven reviewer-to-proposal assignment.
//!
//! Given one preference sheet per reviewer and a number of reviewers
//! required per proposal, produces an assignment that:
//!
//! - **Never assigns a conflict of interest**: a score of `0` maps to a
//!   forbidden cost and the pair is skipped regardless of load.
//! - **Balances workload**: no reviewer takes more than
//!   `ceil(reviewers_per_proposal * proposals / reviewers)` proposals.
//! - **Is reproducible**: proposals are processed in a fixed order and ties
//!   are broken by reviewer name.
//!
//! The assignment is greedy, not globally optimal. Proposals that cannot be
//! filled are reported, not rejected.
//!
//! # Modules
//!
//! - [`preference`]: Merges reviewer sheets into a rectangular table.
//! - [`cost`]: Maps scores to assignment costs.
//! - [`load`]: Per-reviewer load cap.
//! - [`ranking`]: Composable candidate ordering.
//! - [`engine`]: The greedy assignment loop.
//! - [`result`]: Per-proposal records with COI annotations.
//! - [`pipeline`]: One-call build, assign, and derive.
//!
//! # Architecture
//!
//! The crate is pure computation: it reads no files and keeps no state
//! between runs. Spreadsheet ingestion and export belong to consumers.

pub mod cost;
pub mod engine;
pub mod error;
pub mod load;
pub mod pipeline;
pub mod preference;
pub mod ranking;
pub mod result;

pub use error::{AssignError, Result};
