//! Presentation-ready view of an assignment.

use crate::engine::{Assignment, Shortfall};
use crate::preference::PreferenceTable;

/// One proposal with its metadata, assigned reviewers, and declared
/// conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProposalRecord {
    pub proposal_id: String,
    pub pi_last_name: String,
    pub institution: String,
    /// Assigned reviewers, best-ranked first.
    pub assigned_reviewers: Vec<String>,
    /// Every reviewer who scored this proposal as a conflict of interest,
    /// in table order.
    pub coi_reviewers: Vec<String>,
}

/// Per-proposal records in canonical proposal order.
///
/// Derived once from a table and an assignment; neither is modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentResult {
    pub records: Vec<ProposalRecord>,
}

impl AssignmentResult {
    /// Joins the assignment with proposal metadata and COI annotations.
    ///
    /// Proposals absent from the assignment get an empty reviewer list.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_assign::engine::AssignRunner;
    /// use u_assign::preference::{PreferenceTable, ReviewerInput};
    /// use u_assign::result::AssignmentResult;
    ///
    /// let table = PreferenceTable::build(vec![
    ///     ReviewerInput::new("Alice").with_score("P1", 0),
    ///     ReviewerInput::new("Bob").with_score("P1", 4),
    /// ])
    /// .unwrap();
    /// let assignment = AssignRunner::assign(&table, 1).unwrap();
    /// let result = AssignmentResult::derive(&table, &assignment);
    ///
    /// assert_eq!(result.records[0].assigned_reviewers, vec!["Bob".to_string()]);
    /// assert_eq!(result.records[0].coi_reviewers, vec!["Alice".to_string()]);
    /// ```
    pub fn derive(table: &PreferenceTable, assignment: &Assignment) -> Self {
        let records = table
            .proposals()
            .iter()
            .enumerate()
            .map(|(p, proposal)| ProposalRecord {
                proposal_id: proposal.proposal_id.clone(),
                pi_last_name: proposal.pi_last_name.clone(),
                institution: proposal.institution.clone(),
                assigned_reviewers: assignment
                    .get(&proposal.proposal_id)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default(),
                coi_reviewers: table
                    .coi_reviewers(p)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
            .collect();
        Self { records }
    }

    /// Looks up a record by proposal id.
    pub fn get(&self, proposal_id: &str) -> Option<&ProposalRecord> {
        self.records.iter().find(|r| r.proposal_id == proposal_id)
    }

    /// Proposals that received fewer than `requested` reviewers.
    pub fn shortfalls(&self, requested: usize) -> Vec<Shortfall> {
        self.records
            .iter()
            .filter(|r| r.assigned_reviewers.len() < requested)
            .map(|r| Shortfall {
                proposal_id: r.proposal_id.clone(),
                requested,
                assigned: r.assigned_reviewers.len(),
            })
            .collect()
    }

    /// Renders a header row and one string row per proposal, with
    /// `reviewer_slots` reviewer columns (blank when unfilled) and a
    /// `"; "`-joined COI column.
    pub fn table_rows(&self, reviewer_slots: usize) -> Vec<Vec<String>> {
        let mut header = vec![
            "Proposal".to_string(),
            "PI".to_string(),
            "Institution".to_string(),
        ];
        header.extend((1..=reviewer_slots).map(|i| format!("Reviewer {i}")));
        header.push("COI".to_string());

        let mut rows = Vec::with_capacity(self.records.len() + 1);
        rows.push(header);
        for record in &self.records {
            let mut row = vec![
                record.proposal_id.clone(),
                record.pi_last_name.clone(),
                record.institution.clone(),
            ];
            row.extend(
                (0..reviewer_slots)
                    .map(|i| record.assigned_reviewers.get(i).cloned().unwrap_or_default()),
            );
            row.push(record.coi_reviewers.join("; "));
            rows.push(row);
        }
        rows
    }
}
