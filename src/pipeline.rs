//! End-to-end entry point: reviewer sheets in, report out.

use crate::engine::{AssignConfig, AssignRunner, Assignment, ReviewerLoad, Shortfall};
use crate::error::Result;
use crate::preference::{CoercedCell, PreferenceTable, ReviewerInput};
use crate::result::AssignmentResult;

/// Everything a presentation or export layer needs from one run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    pub assignment: Assignment,
    pub result: AssignmentResult,
    pub max_load: usize,
    pub loads: Vec<ReviewerLoad>,
    pub shortfalls: Vec<Shortfall>,
    /// Cells whose raw value was coerced to the missing score.
    pub coerced_cells: Vec<CoercedCell>,
}

/// Builds the preference table, runs the engine, and derives the result.
///
/// Structural problems (proposal set mismatch, bad configuration) abort
/// before any assignment work and produce no report.
///
/// # Examples
///
/// ```
/// use u_assign::engine::AssignConfig;
/// use u_assign::pipeline::assign_reviewers;
/// use u_assign::preference::ReviewerInput;
///
/// let report = assign_reviewers(
///     vec![
///         ReviewerInput::new("Alice").with_score("P1", 1).with_score("P2", 0),
///         ReviewerInput::new("Bob").with_score("P1", 2).with_score("P2", 1),
///     ],
///     &AssignConfig::default().with_reviewers_per_proposal(1),
/// )
/// .unwrap();
///
/// assert_eq!(report.max_load, 1);
/// assert!(report.shortfalls.is_empty());
/// ```
pub fn assign_reviewers(
    inputs: impl IntoIterator<Item = ReviewerInput>,
    config: &AssignConfig,
) -> Result<Report> {
    config.validate()?;
    let table = PreferenceTable::build(inputs)?;
    let run = AssignRunner::run(&table, config)?;
    let result = AssignmentResult::derive(&table, &run.assignment);

    Ok(Report {
        assignment: run.assignment,
        result,
        max_load: run.max_load,
        loads: run.loads,
        shortfalls: run.shortfalls,
        coerced_cells: table.coerced_cells(),
    })
}
