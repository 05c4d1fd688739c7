
use anyhow::Context;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data_types::score_difference::ScoreDifference;

/// Fixed leading columns of every score table
const BASE_COLUMNS: [&str; 5] = ["chr", "pos", "var", "r1", "r2"];

/// Renders score differences as tab-separated tables.
/// Sub-score columns follow each run's declared category order, `r1_<cat>...` then `r2_<cat>...`.
pub struct ScoreTableFormatter<'a> {
    /// Declared categories of the first run
    first_categories: &'a [String],
    /// Declared categories of the second run, may differ from the first across pipeline versions
    second_categories: &'a [String],
}

impl<'a> ScoreTableFormatter<'a> {
    /// Constructor
    /// # Arguments
    /// * `first_categories` - the sub-score categories declared by the first run
    /// * `second_categories` - the sub-score categories declared by the second run
    pub fn new(first_categories: &'a [String], second_categories: &'a [String]) -> Self {
        Self {
            first_categories,
            second_categories
        }
    }

    /// Builds the header row
    /// # Arguments
    /// * `include_sub_scores` - if True, appends the `r1_`/`r2_` sub-score columns
    pub fn header(&self, include_sub_scores: bool) -> Vec<String> {
        let mut header: Vec<String> = BASE_COLUMNS.iter().map(|c| c.to_string()).collect();
        if include_sub_scores {
            header.extend(self.first_categories.iter().map(|c| format!("r1_{c}")));
            header.extend(self.second_categories.iter().map(|c| format!("r2_{c}")));
        }
        header
    }

    /// Builds the row for one difference; missing scores and categories are empty cells
    /// # Arguments
    /// * `difference` - the pair to render
    /// * `include_sub_scores` - if True, appends the sub-score cells
    pub fn row(&self, difference: &ScoreDifference, include_sub_scores: bool) -> Vec<String> {
        let first = difference.first();
        let second = difference.second();
        let mut row = vec![
            first.chromosome().to_string(),
            first.position().to_string(),
            first.allele_change(),
            first.rank_score_str(),
            second.rank_score_str()
        ];
        if include_sub_scores {
            row.extend(self.first_categories.iter().map(|c| first.sub_score_str(c)));
            row.extend(self.second_categories.iter().map(|c| second.sub_score_str(c)));
        }
        row
    }

    /// Writes the bounded console view: a header and at most `max_rows` rows
    /// # Arguments
    /// * `writer` - destination, usually stdout
    /// * `differences` - sorted differences to show
    /// * `max_rows` - the row cap
    /// * `include_sub_scores` - if True, shows the sub-score columns
    pub fn write_preview<W: Write>(
        &self, writer: W, differences: &[ScoreDifference], max_rows: usize, include_sub_scores: bool
    ) -> csv::Result<()> {
        let shown = &differences[..max_rows.min(differences.len())];
        self.write_table(writer, shown, include_sub_scores)
    }

    /// Writes the full table, which always contains the sub-score columns
    /// # Arguments
    /// * `writer` - destination
    /// * `differences` - sorted differences to write
    pub fn write_export<W: Write>(&self, writer: W, differences: &[ScoreDifference]) -> csv::Result<()> {
        self.write_table(writer, differences, true)
    }

    /// Convenience wrapper around `write_export` that creates the file
    /// # Arguments
    /// * `filename` - the output path, will be overwritten
    /// * `differences` - sorted differences to write
    pub fn write_export_file(&self, filename: &Path, differences: &[ScoreDifference]) -> anyhow::Result<()> {
        let file = File::create(filename)
            .with_context(|| format!("Error while creating {filename:?}:"))?;
        self.write_export(file, differences)
            .with_context(|| format!("Error while writing {filename:?}:"))?;
        Ok(())
    }

    fn write_table<W: Write>(&self, writer: W, differences: &[ScoreDifference], include_sub_scores: bool) -> csv::Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .flexible(false)
            .from_writer(writer);

        csv_writer.write_record(self.header(include_sub_scores))?;
        for difference in differences.iter() {
            csv_writer.write_record(self.row(difference, include_sub_scores))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
