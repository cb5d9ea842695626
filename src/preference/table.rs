//! Merged preference table.

use std::collections::{HashMap, HashSet};

use super::score::{ParsedScore, RawScore, COI_SCORE, MISSING_SCORE};
use crate::error::{AssignError, Result};

/// One row of a reviewer's preference sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProposalRow {
    pub proposal_id: String,
    pub raw_score: RawScore,
    pub pi_last_name: String,
    pub institution: String,
}

impl ProposalRow {
    /// Creates a row with blank metadata.
    pub fn new(proposal_id: impl Into<String>, raw_score: impl Into<RawScore>) -> Self {
        Self {
            proposal_id: proposal_id.into(),
            raw_score: raw_score.into(),
            pi_last_name: String::new(),
            institution: String::new(),
        }
    }

    /// Sets the PI last name.
    pub fn with_pi(mut self, pi_last_name: impl Into<String>) -> Self {
        self.pi_last_name = pi_last_name.into();
        self
    }

    /// Sets the institution.
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = institution.into();
        self
    }
}

/// A single reviewer's preference sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReviewerInput {
    pub reviewer_name: String,
    pub rows: Vec<ProposalRow>,
}

impl ReviewerInput {
    pub fn new(reviewer_name: impl Into<String>) -> Self {
        Self {
            reviewer_name: reviewer_name.into(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn with_row(mut self, row: ProposalRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Appends a row with blank metadata.
    pub fn with_score(self, proposal_id: impl Into<String>, raw: impl Into<RawScore>) -> Self {
        self.with_row(ProposalRow::new(proposal_id, raw))
    }
}

/// Proposal metadata fixed by the first reviewer input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proposal {
    pub proposal_id: String,
    pub pi_last_name: String,
    pub institution: String,
}

/// A cell whose raw value was replaced by the missing sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoercedCell {
    pub proposal_id: String,
    pub reviewer_name: String,
}

/// Rectangular mapping of (proposal, reviewer) to preference score.
///
/// Proposals keep the order of the first reviewer input (the canonical
/// order used by the assignment engine). Reviewers keep input order.
/// Every proposal has a score for every reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceTable {
    proposals: Vec<Proposal>,
    reviewers: Vec<String>,
    proposal_index: HashMap<String, usize>,
    reviewer_index: HashMap<String, usize>,
    /// `scores[p][r]`.
    scores: Vec<Vec<u32>>,
    missing_score: u32,
    coerced: Vec<(usize, usize)>,
}

impl PreferenceTable {
    /// Builds a table with the default missing sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_assign::preference::{PreferenceTable, ReviewerInput};
    ///
    /// let table = PreferenceTable::build(vec![
    ///     ReviewerInput::new("Alice").with_score("P1", 1).with_score("P2", 0),
    ///     ReviewerInput::new("Bob").with_score("P2", 3).with_score("P1", "n/a"),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.score("P1", "Bob"), Some(10));
    /// assert_eq!(table.proposal_count(), 2);
    /// ```
    pub fn build(inputs: impl IntoIterator<Item = ReviewerInput>) -> Result<Self> {
        Self::build_with_missing(inputs, MISSING_SCORE)
    }

    /// Builds a table, substituting `missing_score` for unusable cells.
    ///
    /// Fails without returning a partial table if any input disagrees
    /// with the first one on the proposal set.
    pub fn build_with_missing(
        inputs: impl IntoIterator<Item = ReviewerInput>,
        missing_score: u32,
    ) -> Result<Self> {
        if missing_score == COI_SCORE {
            return Err(AssignError::invalid(
                "missing score must differ from the conflict-of-interest score",
            ));
        }

        let mut table = PreferenceTable {
            proposals: Vec::new(),
            reviewers: Vec::new(),
            proposal_index: HashMap::new(),
            reviewer_index: HashMap::new(),
            scores: Vec::new(),
            missing_score,
            coerced: Vec::new(),
        };

        for input in inputs {
            table.merge(input)?;
        }

        if table.reviewers.is_empty() {
            return Err(AssignError::invalid("no reviewer inputs supplied"));
        }

        tracing::info!(
            target: "assign",
            proposals = table.proposals.len(),
            reviewers = table.reviewers.len(),
            coerced = table.coerced.len(),
            "preference_table_built"
        );
        Ok(table)
    }

    fn merge(&mut self, input: ReviewerInput) -> Result<()> {
        let reviewer = input.reviewer_name.trim().to_string();
        if reviewer.is_empty() {
            return Err(AssignError::invalid("reviewer name is blank"));
        }
        if self.reviewer_index.contains_key(&reviewer) {
            return Err(AssignError::DuplicateReviewer { reviewer });
        }

        let first = self.reviewers.is_empty();
        let mut seen: HashSet<String> = HashSet::with_capacity(input.rows.len());
        let mut unexpected = Vec::new();
        let mut column: Vec<(usize, ParsedScore)> = Vec::with_capacity(input.rows.len());
        let mut canonical_rows = Vec::new();

        for row in input.rows {
            let proposal_id = row.proposal_id.trim().to_string();
            if proposal_id.is_empty() {
                return Err(AssignError::invalid(format!(
                    "reviewer '{reviewer}' has a row with a blank proposal id"
                )));
            }
            if !seen.insert(proposal_id.clone()) {
                return Err(AssignError::DuplicateProposal {
                    reviewer,
                    proposal_id,
                });
            }
            let parsed = ParsedScore::parse(&row.raw_score, self.missing_score);

            if first {
                column.push((canonical_rows.len(), parsed));
                canonical_rows.push(Proposal {
                    proposal_id,
                    pi_last_name: row.pi_last_name.trim().to_string(),
                    institution: row.institution.trim().to_string(),
                });
            } else {
                match self.proposal_index.get(&proposal_id) {
                    Some(&p) => column.push((p, parsed)),
                    None => unexpected.push(proposal_id),
                }
            }
        }

        if first {
            if canonical_rows.is_empty() {
                return Err(AssignError::invalid(format!(
                    "reviewer '{reviewer}' lists no proposals"
                )));
            }
            for (p, proposal) in canonical_rows.into_iter().enumerate() {
                self.proposal_index.insert(proposal.proposal_id.clone(), p);
                self.proposals.push(proposal);
                self.scores.push(Vec::new());
            }
        } else {
            let missing: Vec<String> = self
                .proposals
                .iter()
                .filter(|p| !seen.contains(&p.proposal_id))
                .map(|p| p.proposal_id.clone())
                .collect();
            if !missing.is_empty() || !unexpected.is_empty() {
                return Err(AssignError::ProposalSetMismatch {
                    reviewer,
                    missing,
                    unexpected,
                });
            }
        }

        // Column is complete: each canonical proposal appears exactly once.
        let r = self.reviewers.len();
        let mut resolved = vec![self.missing_score; self.proposals.len()];
        for (p, parsed) in column {
            if parsed.is_missing() {
                tracing::warn!(
                    target: "assign",
                    reviewer = %reviewer,
                    proposal = %self.proposals[p].proposal_id,
                    "score_coerced_to_missing"
                );
                self.coerced.push((p, r));
            }
            resolved[p] = parsed.resolve(self.missing_score);
        }
        for (p, score) in resolved.into_iter().enumerate() {
            self.scores[p].push(score);
        }
        self.reviewer_index.insert(reviewer.clone(), r);
        self.reviewers.push(reviewer);
        Ok(())
    }

    /// Proposals in canonical order.
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Reviewer names in input order.
    pub fn reviewers(&self) -> &[String] {
        &self.reviewers
    }

    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    pub fn reviewer_count(&self) -> usize {
        self.reviewers.len()
    }

    /// The sentinel used for coerced cells.
    pub fn missing_score(&self) -> u32 {
        self.missing_score
    }

    /// Looks up a proposal by id.
    pub fn proposal(&self, proposal_id: &str) -> Option<&Proposal> {
        self.proposal_index
            .get(proposal_id)
            .map(|&p| &self.proposals[p])
    }

    /// Position of a proposal in canonical order.
    pub fn proposal_position(&self, proposal_id: &str) -> Option<usize> {
        self.proposal_index.get(proposal_id).copied()
    }

    /// Position of a reviewer in input order.
    pub fn reviewer_position(&self, reviewer_name: &str) -> Option<usize> {
        self.reviewer_index.get(reviewer_name).copied()
    }

    /// Score of `reviewer_name` for `proposal_id`.
    pub fn score(&self, proposal_id: &str, reviewer_name: &str) -> Option<u32> {
        let p = self.proposal_position(proposal_id)?;
        let r = self.reviewer_position(reviewer_name)?;
        Some(self.scores[p][r])
    }

    /// Score by positions.
    ///
    /// # Panics
    /// Panics if either position is out of bounds.
    pub fn score_at(&self, proposal: usize, reviewer: usize) -> u32 {
        self.scores[proposal][reviewer]
    }

    /// Scores of every reviewer for one proposal, in reviewer order.
    ///
    /// # Panics
    /// Panics if `proposal` is out of bounds.
    pub fn row(&self, proposal: usize) -> &[u32] {
        &self.scores[proposal]
    }

    /// Reviewers declaring a conflict of interest with a proposal,
    /// in reviewer order.
    pub fn coi_reviewers(&self, proposal: usize) -> Vec<&str> {
        self.scores[proposal]
            .iter()
            .zip(&self.reviewers)
            .filter(|(s, _)| **s == COI_SCORE)
            .map(|(_, name)| name.as_str())
            .collect()
    }

    /// Cells whose raw value was blank or malformed, in merge order.
    pub fn coerced_cells(&self) -> Vec<CoercedCell> {
        self.coerced
            .iter()
            .map(|&(p, r)| CoercedCell {
                proposal_id: self.proposals[p].proposal_id.clone(),
                reviewer_name: self.reviewers[r].clone(),
            })
            .collect()
    }

    /// Renders the merged matrix: a header row, then one row per
    /// proposal with its metadata and one score per reviewer.
    pub fn matrix_rows(&self) -> Vec<Vec<String>> {
        let mut header = vec![
            "Proposal".to_string(),
            "PI".to_string(),
            "Institution".to_string(),
        ];
        header.extend(self.reviewers.iter().cloned());

        let mut rows = Vec::with_capacity(self.proposals.len() + 1);
        rows.push(header);
        for (proposal, scores) in self.proposals.iter().zip(&self.scores) {
            let mut row = vec![
                proposal.proposal_id.clone(),
                proposal.pi_last_name.clone(),
                proposal.institution.clone(),
            ];
            row.extend(scores.iter().map(u32::to_string));
            rows.push(row);
        }
        rows
    }
}
