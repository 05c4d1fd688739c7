
use crate::data_types::scored_record::ScoredRecord;

/// A pair of records for the same variant identity whose rank scores differ between the two runs.
/// Only constructed by the score differ, which guarantees the shared identity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScoreDifference<'a> {
    /// The record from the first run
    first: &'a ScoredRecord,
    /// The record from the second run
    second: &'a ScoredRecord,
}

impl<'a> ScoreDifference<'a> {
    /// Pairs two records if and only if their rank scores differ.
    /// A missing score is different from every integer score, two missing scores are equal.
    pub(crate) fn from_pair(first: &'a ScoredRecord, second: &'a ScoredRecord) -> Option<Self> {
        if first.rank_score() != second.rank_score() {
            Some(Self { first, second })
        } else {
            None
        }
    }

    /// Returns true if either side has a score at or above the threshold.
    /// Missing scores never qualify.
    /// # Arguments
    /// * `threshold` - the minimum score for a difference to be flagged
    pub fn any_at_or_above(&self, threshold: i64) -> bool {
        [self.first.rank_score(), self.second.rank_score()].into_iter()
            .flatten()
            .any(|score| score >= threshold)
    }

    // getters
    pub fn first(&self) -> &'a ScoredRecord {
        self.first
    }

    pub fn second(&self) -> &'a ScoredRecord {
        self.second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rank_score: Option<i64>) -> ScoredRecord {
        ScoredRecord::new(
            "chr1".to_string(), 100, "A".to_string(), "T".to_string(),
            rank_score, Default::default()
        )
    }

    #[test]
    fn test_from_pair() {
        let r20 = record(Some(20));
        let r30 = record(Some(30));
        let missing = record(None);

        assert!(ScoreDifference::from_pair(&r20, &r20.clone()).is_none());
        assert!(ScoreDifference::from_pair(&missing, &missing.clone()).is_none());

        let diff = ScoreDifference::from_pair(&r20, &r30).unwrap();
        assert_eq!(diff.first().rank_score(), Some(20));
        assert_eq!(diff.second().rank_score(), Some(30));

        // missing is distinct from present
        assert!(ScoreDifference::from_pair(&missing, &r20).is_some());
        assert!(ScoreDifference::from_pair(&r20, &missing).is_some());
    }

    #[test]
    fn test_threshold() {
        let r20 = record(Some(20));
        let r30 = record(Some(30));
        let missing = record(None);

        let diff = ScoreDifference::from_pair(&r20, &r30).unwrap();
        assert!(diff.any_at_or_above(25));
        assert!(diff.any_at_or_above(30));
        assert!(!diff.any_at_or_above(31));

        // only the scored side counts
        let negative = record(Some(-100));
        let diff = ScoreDifference::from_pair(&missing, &negative).unwrap();
        assert!(diff.any_at_or_above(-100));
        assert!(!diff.any_at_or_above(-99));
    }
}
