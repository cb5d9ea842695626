//! Assignment output types.

/// Reviewers assigned to one proposal, best-ranked first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProposalAssignment {
    pub proposal_id: String,
    pub reviewers: Vec<String>,
}

/// Mapping of proposal id to assigned reviewers, in canonical proposal
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    entries: Vec<ProposalAssignment>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the reviewer list for the next proposal.
    pub fn push(&mut self, proposal_id: impl Into<String>, reviewers: Vec<String>) {
        self.entries.push(ProposalAssignment {
            proposal_id: proposal_id.into(),
            reviewers,
        });
    }

    /// Reviewers assigned to a proposal, or `None` for an unknown id.
    pub fn get(&self, proposal_id: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.proposal_id == proposal_id)
            .map(|e| e.reviewers.as_slice())
    }

    /// Entries in canonical proposal order.
    pub fn iter(&self) -> impl Iterator<Item = &ProposalAssignment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of proposals assigning `reviewer`.
    pub fn load_of(&self, reviewer: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.reviewers.iter().any(|r| r == reviewer))
            .count()
    }

    /// Proposals that received fewer than `requested` reviewers.
    pub fn shortfalls(&self, requested: usize) -> Vec<Shortfall> {
        self.entries
            .iter()
            .filter(|e| e.reviewers.len() < requested)
            .map(|e| Shortfall {
                proposal_id: e.proposal_id.clone(),
                requested,
                assigned: e.reviewers.len(),
            })
            .collect()
    }
}

/// A proposal that could not be filled to the requested count because
/// every remaining reviewer was conflicted or at capacity.
///
/// Reported, never raised as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shortfall {
    pub proposal_id: String,
    pub requested: usize,
    pub assigned: usize,
}

impl Shortfall {
    /// Slots left unfilled.
    pub fn missing(&self) -> usize {
        self.requested - self.assigned
    }
}

/// Final load of one reviewer after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReviewerLoad {
    pub reviewer_name: String,
    pub load: usize,
}
