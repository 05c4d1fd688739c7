
use serde::Serialize;

/// High-level counts for one comparison run, logged at the end and saved as JSON
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ComparisonSummary {
    /// Label for the first input
    pub label1: String,
    /// Label for the second input
    pub label2: String,
    /// Number of unique records parsed from the first input
    pub records1: usize,
    /// Number of unique records parsed from the second input
    pub records2: usize,
    /// Number of identities found in both inputs
    pub shared: usize,
    /// Number of identities only in the first input
    pub only_in_first: usize,
    /// Number of identities only in the second input
    pub only_in_second: usize,
    /// Number of shared identities with a different rank score
    pub score_differences: usize,
    /// Number of score differences at or above the threshold
    pub above_threshold: usize,
    /// The threshold used for flagging
    pub score_threshold: i64,
}
