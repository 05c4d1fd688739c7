
use anyhow::Context;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::BufRead;
use std::path::Path;

use crate::data_types::scored_record::ScoredRecord;
use crate::parsing::text_io::open_text_file;

/// Any line starting with this is a header line
const HEADER_PREFIX: &str = "#";
/// The header line declaring the sub-score categories starts with this
const CATEGORY_DECLARATION_PREFIX: &str = "##INFO=<ID=RankResult,";
/// Data lines must have at least CHROM through INFO
const MIN_DATA_FIELDS: usize = 8;

// data line columns that we read
const CHROM_COLUMN: usize = 0;
const POS_COLUMN: usize = 1;
const REF_COLUMN: usize = 3;
const ALT_COLUMN: usize = 4;
const INFO_COLUMN: usize = 7;

lazy_static! {
    /// Captures the quoted, pipe-delimited category names in the RankResult declaration
    static ref CATEGORY_DESCRIPTION_REGEX: Regex = Regex::new(r#"ID=RankResult,.*Description="(.*)">"#).unwrap();
    /// Captures the aggregate score, which is the value after the last ':' in the RankScore entry
    static ref RANK_SCORE_REGEX: Regex = Regex::new(r"(?:^|;)RankScore=[^;]*:(-?\d+)(?:;|$)").unwrap();
    /// Captures the pipe-delimited sub-score vector
    static ref RANK_RESULT_REGEX: Regex = Regex::new(r"(?:^|;)RankResult=(-?\d+(?:\|-?\d+)*)(?:;|$)").unwrap();
}

/// Failures where the sub-scores cannot be aligned with the declared categories
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("line {line_number}: found rank sub-scores, but no RankResult categories were declared in the header")]
    MissingCategoryDeclaration { line_number: usize },
    #[error("line {line_number}: {found} rank sub-scores do not match the {expected} declared categories {categories:?}: {line}")]
    SubScoreCountMismatch { line_number: usize, expected: usize, found: usize, categories: Vec<String>, line: String },
    #[error("line {line_number}: category {category:?} is declared more than once")]
    DuplicateCategory { line_number: usize, category: String },
}

/// All the ways parsing a scored VCF can fail
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("I/O error while reading line {line_number}: {source}")]
    Io { line_number: usize, source: std::io::Error },
    #[error("line {line_number}: expected at least 8 tab-separated fields, found {found}: {line}")]
    TooFewFields { line_number: usize, found: usize, line: String },
    #[error("line {line_number}: invalid position {value:?}")]
    InvalidPosition { line_number: usize, value: String },
    #[error("line {line_number}: integer out of range {value:?}")]
    InvalidInteger { line_number: usize, value: String },
    #[error("line {line_number}: RankResult categories expected but not found in: {line}")]
    MalformedCategoryDeclaration { line_number: usize, line: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Everything loaded from one scored VCF
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ScoredVcf {
    /// The sub-score categories declared in the header, empty if none were declared
    categories: Vec<String>,
    /// Lookup from identity key to the record
    records: FxHashMap<String, ScoredRecord>,
}

impl ScoredVcf {
    /// Set of all identity keys in the file
    pub fn identity_keys(&self) -> FxHashSet<String> {
        self.records.keys().cloned().collect()
    }

    /// Number of unique records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // getters
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn records(&self) -> &FxHashMap<String, ScoredRecord> {
        &self.records
    }
}

/// Tracks whether the category declaration has been seen yet.
/// Local to a single parse, so two files can never share categories.
enum HeaderState {
    /// No RankResult declaration yet
    AwaitingCategoryDeclaration,
    /// Categories are known, in declaration order
    Parsing { categories: Vec<String> },
}

impl HeaderState {
    fn categories(&self) -> Option<&[String]> {
        match self {
            HeaderState::AwaitingCategoryDeclaration => None,
            HeaderState::Parsing { categories } => Some(categories.as_slice())
        }
    }
}

/// Opens a (optionally gzipped) scored VCF and parses it.
/// # Arguments
/// * `filename` - path to the .vcf(.gz) file
/// # Errors
/// * if the file cannot be opened
/// * if any line fails to parse, see `parse_scored_records`
pub fn parse_scored_vcf(filename: &Path) -> anyhow::Result<ScoredVcf> {
    debug!("Parsing scored records from {filename:?}...");
    let reader = open_text_file(filename)?;
    let scored_vcf = parse_scored_records(reader)
        .with_context(|| format!("Error while parsing {filename:?}:"))?;
    debug!("Loaded {} records with {} categories from {filename:?}", scored_vcf.len(), scored_vcf.categories().len());
    Ok(scored_vcf)
}

/// Parses a line stream of a scored VCF into identity key -> record.
/// Header lines are skipped except for the RankResult declaration, which provides the sub-score categories.
/// Duplicate identities are allowed, the last record wins.
/// # Arguments
/// * `reader` - the already decompressed line stream
/// # Errors
/// * if reading fails
/// * if a data line has too few fields or a bad position
/// * if sub-scores are found without a declaration, or do not match the declared length
pub fn parse_scored_records<R: BufRead>(reader: R) -> Result<ScoredVcf, ParseError> {
    let mut state = HeaderState::AwaitingCategoryDeclaration;
    let mut records: FxHashMap<String, ScoredRecord> = Default::default();

    for (line_index, line_result) in reader.lines().enumerate() {
        let line_number = line_index + 1;
        let line = line_result.map_err(|source| ParseError::Io { line_number, source })?;
        let line = line.trim_end_matches(['\r', '\n']);

        if line.starts_with(HEADER_PREFIX) {
            if matches!(state, HeaderState::AwaitingCategoryDeclaration) && line.starts_with(CATEGORY_DECLARATION_PREFIX) {
                let categories = parse_category_declaration(line, line_number)?;
                debug!("Found {} RankResult categories: {categories:?}", categories.len());
                state = HeaderState::Parsing { categories };
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        let record = parse_data_line(line, line_number, state.categories())?;
        records.insert(record.identity_key(), record);
    }

    let categories = match state {
        HeaderState::AwaitingCategoryDeclaration => vec![],
        HeaderState::Parsing { categories } => categories
    };

    Ok(ScoredVcf {
        categories,
        records
    })
}

/// Pulls the ordered category names out of the RankResult declaration line
fn parse_category_declaration(line: &str, line_number: usize) -> Result<Vec<String>, ParseError> {
    let captures = CATEGORY_DESCRIPTION_REGEX.captures(line)
        .ok_or_else(|| ParseError::MalformedCategoryDeclaration { line_number, line: line.to_string() })?;

    let mut categories: Vec<String> = vec![];
    for category in captures[1].split('|') {
        if categories.iter().any(|c| c == category) {
            return Err(ValidationError::DuplicateCategory { line_number, category: category.to_string() }.into());
        }
        categories.push(category.to_string());
    }
    Ok(categories)
}

/// Converts a single data line into a record
/// # Arguments
/// * `line` - the data line, no trailing newline
/// * `line_number` - 1-based line number for errors
/// * `categories` - the declared categories, if we have found them
fn parse_data_line(line: &str, line_number: usize, categories: Option<&[String]>) -> Result<ScoredRecord, ParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_DATA_FIELDS {
        return Err(ParseError::TooFewFields { line_number, found: fields.len(), line: line.to_string() });
    }

    let position: u64 = fields[POS_COLUMN].parse()
        .map_err(|_| ParseError::InvalidPosition { line_number, value: fields[POS_COLUMN].to_string() })?;

    let info = fields[INFO_COLUMN];
    let rank_score = match RANK_SCORE_REGEX.captures(info) {
        Some(captures) => Some(parse_integer(&captures[1], line_number)?),
        None => None
    };

    let sub_scores: IndexMap<String, i64> = match RANK_RESULT_REGEX.captures(info) {
        Some(captures) => {
            let values: Vec<i64> = captures[1].split('|')
                .map(|v| parse_integer(v, line_number))
                .collect::<Result<_, _>>()?;

            let categories = categories
                .ok_or(ValidationError::MissingCategoryDeclaration { line_number })?;
            if categories.len() != values.len() {
                return Err(ValidationError::SubScoreCountMismatch {
                    line_number,
                    expected: categories.len(),
                    found: values.len(),
                    categories: categories.to_vec(),
                    line: line.to_string()
                }.into());
            }

            categories.iter().cloned()
                .zip(values)
                .collect()
        },
        None => Default::default()
    };

    Ok(ScoredRecord::new(
        fields[CHROM_COLUMN].to_string(),
        position,
        fields[REF_COLUMN].to_string(),
        fields[ALT_COLUMN].to_string(),
        rank_score,
        sub_scores
    ))
}

/// The regexes only admit digits, so the only failure here is an overflow
fn parse_integer(value: &str, line_number: usize) -> Result<i64, ParseError> {
    value.parse()
        .map_err(|_| ParseError::InvalidInteger { line_number, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    const CATEGORY_HEADER: &str = "##INFO=<ID=RankResult,Number=.,Type=String,Description=\"A|B|C\">";

    fn parse_str(contents: &str) -> Result<ScoredVcf, ParseError> {
        parse_scored_records(Cursor::new(contents.to_string()))
    }

    fn data_line(chrom: &str, pos: u64, reference: &str, alternate: &str, info: &str) -> String {
        format!("{chrom}\t{pos}\t.\t{reference}\t{alternate}\t50\tPASS\t{info}")
    }

    fn build_vcf(lines: &[String]) -> String {
        let mut contents = format!("##fileformat=VCFv4.2\n{CATEGORY_HEADER}\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n");
        for line in lines.iter() {
            contents.push_str(line);
            contents.push('\n');
        }
        contents
    }

    #[test]
    fn test_basic_parse() {
        let contents = build_vcf(&[
            data_line("chr1", 100, "A", "T", "DP=10;RankScore=fam1:20;RankResult=5|10|5"),
            data_line("chr1", 200, "C", "G", "RankScore=fam1:-3;RankResult=-1|0|-2;Other=x"),
        ]);
        let scored_vcf = parse_str(&contents).unwrap();
        assert_eq!(scored_vcf.categories(), &["A", "B", "C"]);
        assert_eq!(scored_vcf.len(), 2);

        let record = &scored_vcf.records()["chr1_100_A_T"];
        assert_eq!(record.chromosome(), "chr1");
        assert_eq!(record.position(), 100);
        assert_eq!(record.reference(), "A");
        assert_eq!(record.alternate(), "T");
        assert_eq!(record.rank_score(), Some(20));
        let expected: IndexMap<String, i64> = [("A".to_string(), 5), ("B".to_string(), 10), ("C".to_string(), 5)].into_iter().collect();
        assert_eq!(record.sub_scores(), &expected);

        // negative values in both annotations
        let record = &scored_vcf.records()["chr1_200_C_G"];
        assert_eq!(record.rank_score(), Some(-3));
        assert_eq!(record.sub_scores().values().copied().collect::<Vec<i64>>(), vec![-1, 0, -2]);
    }

    #[test]
    fn test_rank_score_variants() {
        let contents = build_vcf(&[
            // score after the last colon
            data_line("chr1", 1, "A", "C", "RankScore=fam1:hom:12;"),
            // last entry without trailing semicolon
            data_line("chr1", 2, "A", "C", "DP=3;RankScore=fam1:7"),
            // not scored at all
            data_line("chr1", 3, "A", "C", "DP=3"),
            // non-integer value does not match
            data_line("chr1", 4, "A", "C", "RankScore=fam1:high;"),
            // similarly named keys are not confused with the real one
            data_line("chr1", 5, "A", "C", "RankScoreNormalized=fam1:0.5;RankScore=fam1:9;"),
        ]);
        let scored_vcf = parse_str(&contents).unwrap();
        let records = scored_vcf.records();
        assert_eq!(records["chr1_1_A_C"].rank_score(), Some(12));
        assert_eq!(records["chr1_2_A_C"].rank_score(), Some(7));
        assert_eq!(records["chr1_3_A_C"].rank_score(), None);
        assert_eq!(records["chr1_4_A_C"].rank_score(), None);
        assert_eq!(records["chr1_5_A_C"].rank_score(), Some(9));
        assert!(records["chr1_3_A_C"].sub_scores().is_empty());
    }

    #[test]
    fn test_sub_score_count_mismatch() {
        let contents = build_vcf(&[
            data_line("chr1", 100, "A", "T", "RankScore=fam1:3;RankResult=1|2"),
        ]);
        let result = parse_str(&contents);
        assert!(matches!(
            result,
            Err(ParseError::Validation(ValidationError::SubScoreCountMismatch { line_number: 4, expected: 3, found: 2, .. }))
        ));
    }

    #[test]
    fn test_missing_category_declaration() {
        let contents = format!("##fileformat=VCFv4.2\n{}\n",
            data_line("chr1", 100, "A", "T", "RankScore=fam1:6;RankResult=1|2|3"));
        let result = parse_str(&contents);
        assert!(matches!(
            result,
            Err(ParseError::Validation(ValidationError::MissingCategoryDeclaration { line_number: 2 }))
        ));

        // without sub-scores there is nothing to align, so no declaration is fine
        let contents = format!("##fileformat=VCFv4.2\n{}\n",
            data_line("chr1", 100, "A", "T", "RankScore=fam1:6"));
        let scored_vcf = parse_str(&contents).unwrap();
        assert!(scored_vcf.categories().is_empty());
        assert_eq!(scored_vcf.records()["chr1_100_A_T"].rank_score(), Some(6));
    }

    #[test]
    fn test_too_few_fields() {
        let contents = build_vcf(&[
            data_line("chr1", 100, "A", "T", "RankScore=fam1:3"),
            "chr1\t200\t.\tC\tG".to_string(),
        ]);
        let result = parse_str(&contents);
        assert!(matches!(result, Err(ParseError::TooFewFields { line_number: 5, found: 5, .. })));
    }

    #[test]
    fn test_empty_trailing_info() {
        let scored_vcf = parse_str("chr1\t100\t.\tA\tT\t50\tPASS\t\r\n").unwrap();
        let record = &scored_vcf.records()["chr1_100_A_T"];
        assert_eq!(record.rank_score(), None);
        assert!(record.sub_scores().is_empty());
    }

    #[test]
    fn test_invalid_position() {
        let contents = build_vcf(&[
            data_line("chr1", 100, "A", "T", "RankScore=fam1:3").replace("\t100\t", "\tabc\t"),
        ]);
        let result = parse_str(&contents);
        assert!(matches!(result, Err(ParseError::InvalidPosition { line_number: 4, .. })));
    }

    #[test]
    fn test_malformed_and_duplicate_declaration() {
        let contents = "##INFO=<ID=RankResult,Number=.,Type=String>\n";
        let result = parse_str(contents);
        assert!(matches!(result, Err(ParseError::MalformedCategoryDeclaration { line_number: 1, .. })));

        let contents = "##INFO=<ID=RankResult,Number=.,Type=String,Description=\"A|B|A\">\n";
        let result = parse_str(contents);
        assert!(matches!(
            result,
            Err(ParseError::Validation(ValidationError::DuplicateCategory { line_number: 1, .. }))
        ));
    }

    #[test]
    fn test_first_declaration_wins() {
        let mut contents = build_vcf(&[]);
        contents = contents.replace(
            "#CHROM",
            "##INFO=<ID=RankResult,Number=.,Type=String,Description=\"X|Y\">\n#CHROM"
        );
        contents.push_str(&data_line("chr2", 5, "G", "A", "RankScore=fam1:1;RankResult=1|1|1"));
        let scored_vcf = parse_str(&contents).unwrap();
        assert_eq!(scored_vcf.categories(), &["A", "B", "C"]);
        assert_eq!(scored_vcf.records()["chr2_5_G_A"].sub_scores().len(), 3);
    }

    #[test]
    fn test_duplicate_identity_last_wins() {
        let contents = build_vcf(&[
            data_line("chr1", 100, "A", "T", "RankScore=fam1:3"),
            data_line("chr1", 100, "A", "T", "RankScore=fam1:8"),
        ]);
        let scored_vcf = parse_str(&contents).unwrap();
        assert_eq!(scored_vcf.len(), 1);
        assert_eq!(scored_vcf.records()["chr1_100_A_T"].rank_score(), Some(8));
    }

    #[test]
    fn test_parse_is_pure() {
        let contents = build_vcf(&[
            data_line("chr1", 100, "A", "T", "RankScore=fam1:3;RankResult=1|1|1"),
            data_line("chr1", 200, "C", "G", "RankScore=fam1:4;RankResult=2|1|1"),
        ]);
        let first = parse_str(&contents).unwrap();
        let second = parse_str(&contents).unwrap();
        assert_eq!(first, second);

        // a second file without a declaration does not inherit the first file's categories
        let no_header = format!("{}\n", data_line("chr1", 100, "A", "T", "RankScore=fam1:3;RankResult=1|1|1"));
        assert!(matches!(
            parse_str(&no_header),
            Err(ParseError::Validation(ValidationError::MissingCategoryDeclaration { .. }))
        ));
    }

    #[test]
    fn test_line_order_independence() {
        let lines = vec![
            data_line("chr1", 100, "A", "T", "RankScore=fam1:3;RankResult=1|1|1"),
            data_line("chr1", 200, "C", "G", "RankScore=fam1:4;RankResult=2|1|1"),
            data_line("chr2", 300, "G", "A", "RankScore=fam1:5;RankResult=3|1|1"),
        ];
        let forward = parse_str(&build_vcf(&lines)).unwrap();
        let reversed: Vec<String> = lines.into_iter().rev().collect();
        let backward = parse_str(&build_vcf(&reversed)).unwrap();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_fixture_files() {
        let plain = parse_scored_vcf(&PathBuf::from("test_data/scored_snv/run1.vcf")).unwrap();
        let gzipped = parse_scored_vcf(&PathBuf::from("test_data/scored_snv/run1.vcf.gz")).unwrap();
        assert_eq!(plain, gzipped);
        assert_eq!(plain.len(), 4);
        assert_eq!(plain.categories().len(), 4);

        // every record with sub-scores has one per declared category
        for record in plain.records().values() {
            if !record.sub_scores().is_empty() {
                assert_eq!(record.sub_scores().len(), plain.categories().len());
            }
        }

        assert!(parse_scored_vcf(&PathBuf::from("test_data/scored_snv/missing.vcf")).is_err());
    }
}
