//! Preference aggregation.
//!
//! Merges one preference sheet per reviewer into a single rectangular
//! [`PreferenceTable`]. The first sheet fixes the canonical proposal order
//! and proposal metadata; every later sheet must cover exactly the same
//! proposal ids.
//!
//! Scores use the convention of the review panel sheets:
//!
//! - `0` — conflict of interest; the pair is never assigned.
//! - `1` — strongest preference.
//! - [`MISSING_SCORE`] — not ranked. Blank or malformed cells are coerced
//!   to this value through [`ParsedScore`], never dropped.

mod score;
mod table;

pub use score::{ParsedScore, RawScore, COI_SCORE, MISSING_SCORE};
pub use table::{CoercedCell, PreferenceTable, Proposal, ProposalRow, ReviewerInput};
