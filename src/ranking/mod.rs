//! Candidate ranking.
//!
//! Orders the reviewers considered for a proposal. Rules are applied in
//! sequence; later rules act as tie-breakers when earlier rules cannot
//! differentiate, and a final [`TieBreaker`] makes the order total.
//!
//! The engine's contract ranks by cost ascending, then reviewer name
//! ([`Ranker::standard`]). Extra rules may be composed in front of or
//! behind [`ByCost`], but they only ever reorder candidates: conflict and
//! load checks happen afterwards, in the engine.
//!
//! # References
//!
//! Dispatching rule composition: Pinedo (2016), "Scheduling: Theory,
//! Algorithms, and Systems"

mod engine;
mod types;

pub use engine::{Ranker, TieBreaker};
pub use types::{ByCost, Candidate, CandidateRule};
