use chrono::{DateTime, Utc};

use super::entity_id::CustomQuoteId;

#[derive(Debug, Clone, PartialEq)]
pub struct CustomQuote {
    pub id: CustomQuoteId,
    pub text: String,
    pub author: String,
    pub date_added: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomQuoteDraft {
    pub text: String,
    /// Blank authors are stored as "Unknown".
    pub author: String,
}

/// Quote picked by the rotator for the current period.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedQuote {
    pub text: String,
    pub week_number: u32,
    /// Position in the combined pool the quote was drawn from.
    pub index: usize,
    pub is_custom: bool,
}
