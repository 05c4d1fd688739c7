
use derive_builder::Builder;
use itertools::Itertools;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;

use crate::data_types::score_difference::ScoreDifference;
use crate::data_types::scored_record::ScoredRecord;

/// Controls the flagging and display of score differences
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct ScoreCompareConfig {
    /// A difference is flagged if either side scores at or above this
    score_threshold: i64,
    /// Maximum number of rows in a console preview
    max_display: usize,
    /// if True, the console preview also shows the sub-score columns
    show_sub_scores: bool,
}

impl Default for ScoreCompareConfig {
    fn default() -> Self {
        // main.rs will set each of them based on user input
        Self {
            score_threshold: 17,
            max_display: 15,
            show_sub_scores: false
        }
    }
}

impl ScoreCompareConfig {
    // getters
    pub fn score_threshold(&self) -> i64 {
        self.score_threshold
    }

    pub fn max_display(&self) -> usize {
        self.max_display
    }

    pub fn show_sub_scores(&self) -> bool {
        self.show_sub_scores
    }
}

/// The sorted score differences between two runs, along with the flagged subset
#[derive(Clone, Debug)]
pub struct ScoreDiffResult<'a> {
    /// All differences, sorted by the first run's score (descending, missing last)
    differences: Vec<ScoreDifference<'a>>,
    /// The differences with either score at or above the threshold, same order as `differences`
    above_threshold: Vec<ScoreDifference<'a>>,
    /// The threshold that was applied
    score_threshold: i64,
}

impl<'a> ScoreDiffResult<'a> {
    // getters
    pub fn differences(&self) -> &[ScoreDifference<'a>] {
        &self.differences
    }

    pub fn above_threshold(&self) -> &[ScoreDifference<'a>] {
        &self.above_threshold
    }

    pub fn score_threshold(&self) -> i64 {
        self.score_threshold
    }
}

/// Finds all shared variants whose rank score changed and flags the ones at or above the threshold.
/// Ties on the first run's score are ordered by identity key, so the output does not depend on input order.
/// # Arguments
/// * `shared` - the identity keys present in both runs
/// * `first_records` - identity lookup for the first run
/// * `second_records` - identity lookup for the second run
/// * `score_threshold` - a difference is flagged if either side scores at or above this
/// # Panics
/// * if a shared key is missing from either lookup, which means the inputs did not come from the same comparison
pub fn diff_scores<'a>(
    shared: &FxHashSet<String>,
    first_records: &'a FxHashMap<String, ScoredRecord>,
    second_records: &'a FxHashMap<String, ScoredRecord>,
    score_threshold: i64
) -> ScoreDiffResult<'a> {
    let mut differences: Vec<ScoreDifference<'a>> = shared.iter()
        .sorted()
        .filter_map(|key| {
            let first = &first_records[key];
            let second = &second_records[key];
            ScoreDifference::from_pair(first, second)
        })
        .collect();
    debug!("Found {} score differences out of {} shared variants", differences.len(), shared.len());

    // None < Some(_), so missing scores sort after every integer when reversed; this sort is stable
    differences.sort_by_key(|d| Reverse(d.first().rank_score()));

    let above_threshold: Vec<ScoreDifference<'a>> = differences.iter()
        .filter(|d| d.any_at_or_above(score_threshold))
        .copied()
        .collect();

    ScoreDiffResult {
        differences,
        above_threshold,
        score_threshold
    }
}
