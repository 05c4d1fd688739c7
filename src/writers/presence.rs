
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::data_types::identity_comparison::IdentitySetComparison;
use crate::parsing::scored_vcf::ScoredVcf;

/// Writes which variants were only called in one of the two runs
pub struct PresenceReport<'a> {
    /// Label for the first run
    label1: &'a str,
    /// Label for the second run
    label2: &'a str,
    /// The set comparison of identity keys
    comparison: &'a IdentitySetComparison<String>,
    /// Records of the first run
    first: &'a ScoredVcf,
    /// Records of the second run
    second: &'a ScoredVcf,
}

impl<'a> PresenceReport<'a> {
    /// Constructor
    /// # Arguments
    /// * `label1` - label for the first run
    /// * `label2` - label for the second run
    /// * `comparison` - comparison of the identity keys from both runs
    /// * `first` - the parsed first run
    /// * `second` - the parsed second run
    pub fn new(
        label1: &'a str, label2: &'a str,
        comparison: &'a IdentitySetComparison<String>,
        first: &'a ScoredVcf, second: &'a ScoredVcf
    ) -> Self {
        Self {
            label1, label2,
            comparison,
            first, second
        }
    }

    /// Writes the counts and the first `max_display` variants unique to each run
    /// # Arguments
    /// * `writer` - destination, usually stdout
    /// * `max_display` - cap on the variants listed per side
    pub fn write_preview<W: Write>(&self, mut writer: W, max_display: usize) -> std::io::Result<()> {
        self.write_counts(&mut writer)?;

        let first_only = self.comparison.sorted_only_in_first();
        writeln!(writer, "First {} only found in {}", first_only.len().min(max_display), self.label1)?;
        for key in first_only.into_iter().take(max_display) {
            writeln!(writer, "{}", self.first.records()[key])?;
        }

        let second_only = self.comparison.sorted_only_in_second();
        writeln!(writer, "First {} only found in {}", second_only.len().min(max_display), self.label2)?;
        for key in second_only.into_iter().take(max_display) {
            writeln!(writer, "{}", self.second.records()[key])?;
        }
        Ok(())
    }

    /// Writes the counts and every variant unique to each run
    /// # Arguments
    /// * `writer` - destination
    pub fn write_export<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        self.write_counts(&mut writer)?;

        writeln!(writer, "Only found in {}", self.label1)?;
        for key in self.comparison.sorted_only_in_first() {
            writeln!(writer, "{}", self.first.records()[key])?;
        }

        writeln!(writer, "Only found in {}", self.label2)?;
        for key in self.comparison.sorted_only_in_second() {
            writeln!(writer, "{}", self.second.records()[key])?;
        }
        writer.flush()
    }

    /// Convenience wrapper around `write_export` that creates the file
    /// # Arguments
    /// * `filename` - the output path, will be overwritten
    pub fn write_export_file(&self, filename: &Path) -> anyhow::Result<()> {
        let file = File::create(filename)
            .with_context(|| format!("Error while creating {filename:?}:"))?;
        self.write_export(BufWriter::new(file))
            .with_context(|| format!("Error while writing {filename:?}:"))?;
        Ok(())
    }

    /// The shared and per-run unique counts, one line each
    pub fn count_lines(&self) -> Vec<String> {
        vec![
            format!("In common: {}", self.comparison.shared().len()),
            format!("Only in {}: {}", self.label1, self.comparison.only_in_first().len()),
            format!("Only in {}: {}", self.label2, self.comparison.only_in_second().len())
        ]
    }

    fn write_counts<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for line in self.count_lines() {
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}
