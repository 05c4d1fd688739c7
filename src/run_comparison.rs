
use anyhow::Context;
use log::debug;
use std::path::Path;

use crate::data_types::identity_comparison::IdentitySetComparison;
use crate::data_types::summary::ComparisonSummary;
use crate::parsing::scored_vcf::{parse_scored_vcf, ScoredVcf};
use crate::score_differ::{diff_scores, ScoreDiffResult};
use crate::writers::presence::PresenceReport;
use crate::writers::score_table::ScoreTableFormatter;

/// Two parsed runs of the pipeline and how their variant identities overlap
#[derive(Clone, Debug)]
pub struct RunComparison {
    /// The first run
    first: ScoredVcf,
    /// The second run
    second: ScoredVcf,
    /// Partition of the identity keys
    identities: IdentitySetComparison<String>,
}

impl RunComparison {
    /// Parses both scored VCFs and compares their identities.
    /// The two files are parsed in parallel, and a failure in either aborts the comparison.
    /// # Arguments
    /// * `first_fn` - the first run's scored VCF
    /// * `second_fn` - the second run's scored VCF
    pub fn load(first_fn: &Path, second_fn: &Path) -> anyhow::Result<Self> {
        let (first, second) = rayon::join(
            || parse_scored_vcf(first_fn),
            || parse_scored_vcf(second_fn)
        );
        let first = first.with_context(|| format!("Error while loading first run {first_fn:?}:"))?;
        let second = second.with_context(|| format!("Error while loading second run {second_fn:?}:"))?;
        Ok(Self::new(first, second))
    }

    /// Compares two already parsed runs
    pub fn new(first: ScoredVcf, second: ScoredVcf) -> Self {
        let identities = IdentitySetComparison::compare(&first.identity_keys(), &second.identity_keys());
        debug!(
            "Identity comparison: {} shared, {} first only, {} second only",
            identities.shared().len(), identities.only_in_first().len(), identities.only_in_second().len()
        );
        Self {
            first,
            second,
            identities
        }
    }

    /// Finds the shared variants with a different rank score
    /// # Arguments
    /// * `score_threshold` - a difference is flagged if either side scores at or above this
    pub fn diff_scores(&self, score_threshold: i64) -> ScoreDiffResult<'_> {
        diff_scores(
            self.identities.shared(),
            self.first.records(),
            self.second.records(),
            score_threshold
        )
    }

    /// Formatter for score tables using each run's declared categories
    pub fn score_table(&self) -> ScoreTableFormatter<'_> {
        ScoreTableFormatter::new(self.first.categories(), self.second.categories())
    }

    /// Report on the variants present in only one run
    pub fn presence_report<'a>(&'a self, label1: &'a str, label2: &'a str) -> PresenceReport<'a> {
        PresenceReport::new(label1, label2, &self.identities, &self.first, &self.second)
    }

    /// Gathers the run-level counts
    /// # Arguments
    /// * `label1` - label for the first run
    /// * `label2` - label for the second run
    /// * `score_diffs` - the score differences generated from this comparison
    pub fn summary(&self, label1: &str, label2: &str, score_diffs: &ScoreDiffResult) -> ComparisonSummary {
        ComparisonSummary {
            label1: label1.to_string(),
            label2: label2.to_string(),
            records1: self.first.len(),
            records2: self.second.len(),
            shared: self.identities.shared().len(),
            only_in_first: self.identities.only_in_first().len(),
            only_in_second: self.identities.only_in_second().len(),
            score_differences: score_diffs.differences().len(),
            above_threshold: score_diffs.above_threshold().len(),
            score_threshold: score_diffs.score_threshold()
        }
    }

    // getters
    pub fn first(&self) -> &ScoredVcf {
        &self.first
    }

    pub fn second(&self) -> &ScoredVcf {
        &self.second
    }

    pub fn identities(&self) -> &IdentitySetComparison<String> {
        &self.identities
    }
}
