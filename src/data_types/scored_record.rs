
use indexmap::IndexMap;

/// A single annotated variant call with its rank score and the named sub-scores that contribute to it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoredRecord {
    /// The chromosome (CHROM column)
    chromosome: String,
    /// The coordinate of the variant, 1-based as in the VCF
    position: u64,
    /// The reference allele
    reference: String,
    /// The alternate allele
    alternate: String,
    /// The aggregate rank score, if one was assigned
    rank_score: Option<i64>,
    /// Named sub-scores in the category order declared by the header
    sub_scores: IndexMap<String, i64>,
}

impl ScoredRecord {
    /// Constructor
    /// # Arguments
    /// * `chromosome` - the chromosome label
    /// * `position` - 1-based coordinate
    /// * `reference` - the REF allele
    /// * `alternate` - the ALT allele
    /// * `rank_score` - the aggregate score, None if the record was not scored
    /// * `sub_scores` - the category -> score contributions, in header order
    pub fn new(
        chromosome: String, position: u64, reference: String, alternate: String,
        rank_score: Option<i64>, sub_scores: IndexMap<String, i64>
    ) -> Self {
        Self {
            chromosome, position, reference, alternate,
            rank_score, sub_scores
        }
    }

    /// The key used to match this variant across two files, `{chrom}_{pos}_{ref}_{alt}`
    pub fn identity_key(&self) -> String {
        format!("{}_{}_{}_{}", self.chromosome, self.position, self.reference, self.alternate)
    }

    /// The allele change rendered as `REF/ALT`
    pub fn allele_change(&self) -> String {
        format!("{}/{}", self.reference, self.alternate)
    }

    /// Returns the rank score.
    /// # Panics
    /// * if the record does not have a rank score, callers must check `rank_score()` first
    pub fn expect_rank_score(&self) -> i64 {
        match self.rank_score {
            Some(score) => score,
            None => panic!("Rank score not present for {self}, check rank_score() before using expect_rank_score()")
        }
    }

    /// The rank score as a table cell, empty when absent
    pub fn rank_score_str(&self) -> String {
        self.rank_score.map(|s| s.to_string()).unwrap_or_default()
    }

    /// The sub-score for a category as a table cell, empty when the category is absent
    pub fn sub_score_str(&self, category: &str) -> String {
        self.sub_scores.get(category).map(|s| s.to_string()).unwrap_or_default()
    }

    // getters
    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn alternate(&self) -> &str {
        &self.alternate
    }

    pub fn rank_score(&self) -> Option<i64> {
        self.rank_score
    }

    pub fn sub_scores(&self) -> &IndexMap<String, i64> {
        &self.sub_scores
    }
}

impl std::fmt::Display for ScoredRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let score = match self.rank_score {
            Some(s) => s.to_string(),
            None => "None".to_string()
        };
        write!(f, "{}:{} {} (Score: {score})", self.chromosome, self.position, self.allele_change())
    }
}
