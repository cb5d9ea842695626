//! Greedy assignment loop.
//!
//! # Algorithm
//!
//! 1. Compute `max_load = ceil(reviewers_per_proposal * proposals / reviewers)`
//! 2. For each proposal, in canonical order:
//!    a. Cost every reviewer through the cost model
//!    b. Rank by cost ascending, then reviewer name
//!    c. Walk the ranking, skipping forbidden reviewers and reviewers at
//!       the load cap
//!    d. Take the first `reviewers_per_proposal` survivors, recording each
//!       in the load tracker immediately
//! 3. Report proposals left short
//!
//! Earlier proposals get first pick of lightly loaded reviewers, so the
//! processing order is part of the result. Ranking (a, b) never reads
//! load, which lets the `parallel` feature rank every proposal up front
//! and commit (c, d) sequentially with identical output.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::AssignConfig;
use super::types::{Assignment, ReviewerLoad, Shortfall};
use crate::cost::CostModel;
use crate::error::Result;
use crate::load::LoadTracker;
use crate::preference::PreferenceTable;
use crate::ranking::{Candidate, Ranker};

/// Outcome of an assignment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignRun {
    /// Reviewers per proposal, in canonical proposal order.
    pub assignment: Assignment,
    /// Load cap applied during the run.
    pub max_load: usize,
    /// Final load of every reviewer, in table order.
    pub loads: Vec<ReviewerLoad>,
    /// Proposals filled below the requested count.
    pub shortfalls: Vec<Shortfall>,
}

impl AssignRun {
    /// Returns true if every proposal received the requested count.
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }
}

/// Assignment engine.
pub struct AssignRunner;

impl AssignRunner {
    /// Assigns `reviewers_per_proposal` reviewers to every proposal with
    /// the default cost model.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_assign::engine::AssignRunner;
    /// use u_assign::preference::{PreferenceTable, ReviewerInput};
    ///
    /// let table = PreferenceTable::build(vec![
    ///     ReviewerInput::new("Alice").with_score("P1", 1).with_score("P2", 0).with_score("P3", 2),
    ///     ReviewerInput::new("Bob").with_score("P1", 2).with_score("P2", 1).with_score("P3", 1),
    /// ])
    /// .unwrap();
    ///
    /// let assignment = AssignRunner::assign(&table, 1).unwrap();
    /// assert_eq!(assignment.get("P1").unwrap(), &["Alice".to_string()]);
    /// assert_eq!(assignment.get("P2").unwrap(), &["Bob".to_string()]);
    /// assert_eq!(assignment.get("P3").unwrap(), &["Bob".to_string()]);
    /// ```
    pub fn assign(table: &PreferenceTable, reviewers_per_proposal: usize) -> Result<Assignment> {
        let config = AssignConfig::default().with_reviewers_per_proposal(reviewers_per_proposal);
        Ok(Self::run(table, &config)?.assignment)
    }

    /// Runs the engine with the standard ranking.
    pub fn run(table: &PreferenceTable, config: &AssignConfig) -> Result<AssignRun> {
        Self::run_with_ranker(table, config, &Ranker::standard())
    }

    /// Runs the engine with a caller-supplied ranking.
    pub fn run_with_ranker(
        table: &PreferenceTable,
        config: &AssignConfig,
        ranker: &Ranker,
    ) -> Result<AssignRun> {
        config.validate_for(table)?;

        let requested = config.reviewers_per_proposal;
        let model = config.cost_model();
        let mut tracker =
            LoadTracker::for_run(requested, table.proposal_count(), table.reviewer_count())?;

        tracing::info!(
            target: "assign",
            proposals = table.proposal_count(),
            reviewers = table.reviewer_count(),
            requested,
            max_load = tracker.max_load(),
            "assignment_started"
        );

        let ranked = rank_all(table, model, ranker, config.parallel);

        let mut assignment = Assignment::new();
        for (proposal, candidates) in table.proposals().iter().zip(&ranked) {
            let assigned = commit(candidates, requested, model, &mut tracker);
            log_fill(&proposal.proposal_id, &assigned, requested);
            assignment.push(proposal.proposal_id.clone(), assigned);
        }

        let shortfalls = assignment.shortfalls(requested);
        let loads = table
            .reviewers()
            .iter()
            .map(|name| ReviewerLoad {
                reviewer_name: name.clone(),
                load: tracker.load(name),
            })
            .collect();

        tracing::info!(
            target: "assign",
            proposals = assignment.len(),
            short = shortfalls.len(),
            "assignment_finished"
        );

        Ok(AssignRun {
            assignment,
            max_load: tracker.max_load(),
            loads,
            shortfalls,
        })
    }

    /// Fills a single proposal against a caller-owned tracker.
    ///
    /// The tracker is updated in place, so calling this for each proposal
    /// in canonical order reproduces [`AssignRunner::run`]. Configuration
    /// is not validated here.
    ///
    /// # Panics
    /// Panics if `proposal` is out of bounds for the table.
    pub fn fill_proposal(
        table: &PreferenceTable,
        proposal: usize,
        config: &AssignConfig,
        ranker: &Ranker,
        tracker: &mut LoadTracker,
    ) -> Vec<String> {
        let model = config.cost_model();
        let candidates = rank_proposal(table, proposal, model, ranker);
        commit(
            &candidates,
            config.reviewers_per_proposal,
            model,
            tracker,
        )
    }
}

fn rank_proposal<'t>(
    table: &'t PreferenceTable,
    proposal: usize,
    model: CostModel,
    ranker: &Ranker,
) -> Vec<Candidate<'t>> {
    let candidates = table
        .reviewers()
        .iter()
        .zip(table.row(proposal))
        .enumerate()
        .map(|(position, (name, &score))| Candidate {
            reviewer: name.as_str(),
            position,
            score,
            cost: model.cost(score),
        })
        .collect();
    ranker.rank(candidates)
}

#[cfg(feature = "parallel")]
fn rank_all<'t>(
    table: &'t PreferenceTable,
    model: CostModel,
    ranker: &Ranker,
    parallel: bool,
) -> Vec<Vec<Candidate<'t>>> {
    if parallel {
        (0..table.proposal_count())
            .into_par_iter()
            .map(|p| rank_proposal(table, p, model, ranker))
            .collect()
    } else {
        (0..table.proposal_count())
            .map(|p| rank_proposal(table, p, model, ranker))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn rank_all<'t>(
    table: &'t PreferenceTable,
    model: CostModel,
    ranker: &Ranker,
    _parallel: bool,
) -> Vec<Vec<Candidate<'t>>> {
    (0..table.proposal_count())
        .map(|p| rank_proposal(table, p, model, ranker))
        .collect()
}

/// Takes the first `requested` ranked candidates that are neither
/// forbidden nor at the load cap.
fn commit(
    ranked: &[Candidate<'_>],
    requested: usize,
    model: CostModel,
    tracker: &mut LoadTracker,
) -> Vec<String> {
    let mut assigned = Vec::with_capacity(requested);
    for candidate in ranked {
        if assigned.len() == requested {
            break;
        }
        if model.is_forbidden(candidate.cost) || !tracker.can_accept(candidate.reviewer) {
            continue;
        }
        tracker.record(candidate.reviewer);
        assigned.push(candidate.reviewer.to_string());
    }
    assigned
}

fn log_fill(proposal_id: &str, assigned: &[String], requested: usize) {
    if assigned.len() < requested {
        tracing::warn!(
            target: "assign",
            proposal = %proposal_id,
            assigned = assigned.len(),
            requested,
            "proposal_short"
        );
    } else {
        tracing::debug!(
            target: "assign",
            proposal = %proposal_id,
            reviewers = ?assigned,
            "proposal_filled"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssignError;
    use crate::preference::{RawScore, ReviewerInput};
    use crate::ranking::{CandidateRule, TieBreaker};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Builds a table from `(reviewer, [(proposal, score)])`.
    fn table(sheets: &[(&str, &[(&str, i64)])]) -> PreferenceTable {
        let inputs = sheets.iter().map(|(name, rows)| {
            rows.iter()
                .fold(ReviewerInput::new(*name), |input, (p, s)| input.with_score(*p, *s))
        });
        PreferenceTable::build(inputs.collect::<Vec<_>>()).unwrap()
    }

    fn alice_bob() -> PreferenceTable {
        table(&[
            ("Alice", &[("P1", 1), ("P2", 0), ("P3", 2)]),
            ("Bob", &[("P1", 2), ("P2", 1), ("P3", 1)]),
        ])
    }

    #[test]
    fn test_two_reviewer_scenario() {
        let config = AssignConfig::default().with_reviewers_per_proposal(1);
        let run = AssignRunner::run(&alice_bob(), &config).unwrap();

        assert_eq!(run.max_load, 2);
        assert_eq!(run.assignment.get("P1").unwrap(), names(&["Alice"]));
        assert_eq!(run.assignment.get("P2").unwrap(), names(&["Bob"]));
        assert_eq!(run.assignment.get("P3").unwrap(), names(&["Bob"]));
        assert_eq!(
            run.loads,
            vec![
                ReviewerLoad {
                    reviewer_name: "Alice".into(),
                    load: 1
                },
                ReviewerLoad {
                    reviewer_name: "Bob".into(),
                    load: 2
                },
            ]
        );
        assert!(run.is_complete());
    }

    #[test]
    fn test_coi_never_assigned_even_when_short() {
        // Both reviewers conflict with P2; it stays empty.
        let t = table(&[
            ("Alice", &[("P1", 1), ("P2", 0)]),
            ("Bob", &[("P1", 2), ("P2", 0)]),
        ]);
        let config = AssignConfig::default().with_reviewers_per_proposal(1);
        let run = AssignRunner::run(&t, &config).unwrap();

        assert!(run.assignment.get("P2").unwrap().is_empty());
        assert_eq!(
            run.shortfalls,
            vec![Shortfall {
                proposal_id: "P2".into(),
                requested: 1,
                assigned: 0
            }]
        );
        assert!(!run.is_complete());
    }

    #[test]
    fn test_load_cap_forces_second_choice() {
        // Everyone prefers Alice; cap = ceil(1*3/3) = 1.
        let t = table(&[
            ("Alice", &[("P1", 1), ("P2", 1), ("P3", 1)]),
            ("Bob", &[("P1", 2), ("P2", 2), ("P3", 2)]),
            ("Carol", &[("P1", 3), ("P2", 3), ("P3", 3)]),
        ]);
        let run = AssignRunner::run(&t, &AssignConfig::default().with_reviewers_per_proposal(1))
            .unwrap();

        assert_eq!(run.max_load, 1);
        assert_eq!(run.assignment.get("P1").unwrap(), names(&["Alice"]));
        assert_eq!(run.assignment.get("P2").unwrap(), names(&["Bob"]));
        assert_eq!(run.assignment.get("P3").unwrap(), names(&["Carol"]));
    }

    #[test]
    fn test_short_list_when_capacity_exhausted() {
        // cap = ceil(2*2/3) = 2; Carol conflicts with everything.
        let t = table(&[
            ("Alice", &[("P1", 1), ("P2", 1)]),
            ("Bob", &[("P1", 2), ("P2", 2)]),
            ("Carol", &[("P1", 0), ("P2", 0)]),
        ]);
        let run = AssignRunner::run(&t, &AssignConfig::default().with_reviewers_per_proposal(3))
            .unwrap();

        assert_eq!(run.max_load, 2);
        assert_eq!(run.assignment.get("P1").unwrap(), names(&["Alice", "Bob"]));
        assert_eq!(run.assignment.get("P2").unwrap(), names(&["Alice", "Bob"]));
        assert_eq!(run.shortfalls.len(), 2);
        assert_eq!(run.shortfalls[0].missing(), 1);
    }

    #[test]
    fn test_ties_broken_by_name() {
        let t = table(&[
            ("Zoe", &[("P1", 2)]),
            ("Adam", &[("P1", 2)]),
            ("Mia", &[("P1", 2)]),
        ]);
        let run = AssignRunner::run(&t, &AssignConfig::default().with_reviewers_per_proposal(2))
            .unwrap();
        assert_eq!(run.assignment.get("P1").unwrap(), names(&["Adam", "Mia"]));
    }

    #[test]
    fn test_missing_scores_rank_behind_explicit() {
        let t = PreferenceTable::build(vec![
            ReviewerInput::new("Alice").with_score("P1", RawScore::Empty),
            ReviewerInput::new("Bob").with_score("P1", 9),
        ])
        .unwrap();
        let assignment = AssignRunner::assign(&t, 1).unwrap();
        assert_eq!(assignment.get("P1").unwrap(), names(&["Bob"]));
    }

    #[test]
    fn test_proposal_order_follows_first_input() {
        let t = table(&[
            ("Alice", &[("P3", 1), ("P1", 1), ("P2", 1)]),
            ("Bob", &[("P1", 2), ("P2", 2), ("P3", 2)]),
        ]);
        let run = AssignRunner::run(&t, &AssignConfig::default().with_reviewers_per_proposal(1))
            .unwrap();
        let ids: Vec<&str> = run
            .assignment
            .iter()
            .map(|e| e.proposal_id.as_str())
            .collect();
        assert_eq!(ids, vec!["P3", "P1", "P2"]);
        // cap = 2: Alice takes P3 and P1, Bob gets P2.
        assert_eq!(run.assignment.get("P2").unwrap(), names(&["Bob"]));
    }

    #[test]
    fn test_invalid_reviewers_per_proposal() {
        let err = AssignRunner::assign(&alice_bob(), 0).unwrap_err();
        assert!(matches!(err, AssignError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_run_is_deterministic() {
        let t = table(&[
            ("Alice", &[("P1", 3), ("P2", 3), ("P3", 1), ("P4", 0)]),
            ("Bob", &[("P1", 3), ("P2", 3), ("P3", 1), ("P4", 2)]),
            ("Carol", &[("P1", 3), ("P2", 1), ("P3", 0), ("P4", 2)]),
        ]);
        let config = AssignConfig::default().with_reviewers_per_proposal(2);
        let a = AssignRunner::run(&t, &config).unwrap();
        let b = AssignRunner::run(&t, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_flag_matches_sequential() {
        let t = table(&[
            ("Alice", &[("P1", 3), ("P2", 3), ("P3", 1), ("P4", 0)]),
            ("Bob", &[("P1", 3), ("P2", 3), ("P3", 1), ("P4", 2)]),
            ("Carol", &[("P1", 3), ("P2", 1), ("P3", 0), ("P4", 2)]),
        ]);
        let config = AssignConfig::default().with_reviewers_per_proposal(2);
        let seq = AssignRunner::run(&t, &config).unwrap();
        let par = AssignRunner::run(&t, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_fill_proposal_with_seeded_tracker() {
        let t = alice_bob();
        let config = AssignConfig::default().with_reviewers_per_proposal(1);
        let ranker = Ranker::standard();

        // Alice already at cap: P1 falls to Bob.
        let mut tracker = LoadTracker::new(2).with_load("Alice", 2);
        let assigned = AssignRunner::fill_proposal(&t, 0, &config, &ranker, &mut tracker);
        assert_eq!(assigned, names(&["Bob"]));
        assert_eq!(tracker.load("Bob"), 1);

        // Bob at cap and Alice conflicted: P2 stays empty.
        let mut tracker = LoadTracker::new(2).with_load("Bob", 2);
        let assigned = AssignRunner::fill_proposal(&t, 1, &config, &ranker, &mut tracker);
        assert!(assigned.is_empty());
        assert_eq!(tracker.load("Alice"), 0);
    }

    #[test]
    fn test_fill_proposal_sequence_matches_run() {
        let t = alice_bob();
        let config = AssignConfig::default().with_reviewers_per_proposal(1);
        let ranker = Ranker::standard();
        let mut tracker = LoadTracker::for_run(1, 3, 2).unwrap();
        let manual: Vec<Vec<String>> = (0..t.proposal_count())
            .map(|p| AssignRunner::fill_proposal(&t, p, &config, &ranker, &mut tracker))
            .collect();
        let run = AssignRunner::run(&t, &config).unwrap();
        let from_run: Vec<Vec<String>> = run.assignment.iter().map(|e| e.reviewers.clone()).collect();
        assert_eq!(manual, from_run);
    }

    struct PreferBob;
    impl CandidateRule for PreferBob {
        fn name(&self) -> &str {
            "PreferBob"
        }
        fn key(&self, c: &Candidate<'_>) -> i64 {
            i64::from(c.reviewer != "Bob")
        }
    }

    #[test]
    fn test_custom_ranker_cannot_bypass_coi() {
        let ranker = Ranker::new()
            .with_rule(PreferBob)
            .with_tie_breaker(TieBreaker::ByPosition);
        let t = table(&[
            ("Alice", &[("P1", 1)]),
            ("Bob", &[("P1", 0)]),
        ]);
        let config = AssignConfig::default().with_reviewers_per_proposal(1);
        let run = AssignRunner::run_with_ranker(&t, &config, &ranker).unwrap();
        assert_eq!(run.assignment.get("P1").unwrap(), names(&["Alice"]));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::preference::{ReviewerInput, COI_SCORE};
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Random score matrices: `scores[r][p]` in `0..=10`.
    fn matrix() -> impl Strategy<Value = (Vec<Vec<i64>>, usize)> {
        (1usize..6, 1usize..8).prop_flat_map(|(reviewers, proposals)| {
            (
                prop::collection::vec(prop::collection::vec(0i64..=10, proposals), reviewers),
                1usize..4,
            )
        })
    }

    fn build(scores: &[Vec<i64>]) -> PreferenceTable {
        let inputs: Vec<ReviewerInput> = scores
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .fold(ReviewerInput::new(format!("R{r}")), |input, (p, &s)| {
                        input.with_score(format!("P{p}"), s)
                    })
            })
            .collect();
        PreferenceTable::build(inputs).unwrap()
    }

    proptest! {
        #[test]
        fn prop_assignment_invariants((scores, per) in matrix()) {
            let table = build(&scores);
            let config = AssignConfig::default().with_reviewers_per_proposal(per);
            let run = AssignRunner::run(&table, &config).unwrap();

            prop_assert_eq!(run.assignment.len(), table.proposal_count());
            for (p, entry) in run.assignment.iter().enumerate() {
                prop_assert!(entry.reviewers.len() <= per);

                let unique: HashSet<&String> = entry.reviewers.iter().collect();
                prop_assert_eq!(unique.len(), entry.reviewers.len());

                for name in &entry.reviewers {
                    let r = table.reviewer_position(name).unwrap();
                    prop_assert_ne!(table.score_at(p, r), COI_SCORE);
                }
            }
            for load in &run.loads {
                prop_assert!(load.load <= run.max_load);
                prop_assert_eq!(load.load, run.assignment.load_of(&load.reviewer_name));
            }
        }

        #[test]
        fn prop_short_lists_are_justified((scores, per) in matrix()) {
            // A short proposal has no unassigned reviewer that is both
            // conflict-free and under the final cap.
            let table = build(&scores);
            let config = AssignConfig::default().with_reviewers_per_proposal(per);
            let run = AssignRunner::run(&table, &config).unwrap();

            for short in &run.shortfalls {
                let p = table.proposal_position(&short.proposal_id).unwrap();
                let assigned = run.assignment.get(&short.proposal_id).unwrap();
                for (r, name) in table.reviewers().iter().enumerate() {
                    if assigned.contains(name) || table.score_at(p, r) == COI_SCORE {
                        continue;
                    }
                    prop_assert_eq!(run.assignment.load_of(name), run.max_load);
                }
            }
        }

        #[test]
        fn prop_rerun_is_identical((scores, per) in matrix()) {
            let table = build(&scores);
            let config = AssignConfig::default().with_reviewers_per_proposal(per);
            let a = AssignRunner::run(&table, &config).unwrap();
            let b = AssignRunner::run(&table, &config.clone().with_parallel(true)).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
