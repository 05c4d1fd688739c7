
use anyhow::bail;
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_required_filename, default_labels, AFTER_HELP, FULL_VERSION};

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about,
    after_help = &**AFTER_HELP
)]
pub struct CompareSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    scorediff_version: String,

    /// Scored variant call file (VCF) from the first run
    #[clap(required = true)]
    #[clap(short = 'a')]
    #[clap(long = "vcf1")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub first_vcf_filename: PathBuf,

    /// Scored variant call file (VCF) from the second run
    #[clap(required = true)]
    #[clap(short = 'b')]
    #[clap(long = "vcf2")]
    #[clap(value_name = "VCF")]
    #[clap(help_heading = Some("Input/Output"))]
    pub second_vcf_filename: PathBuf,

    /// Label for the first run in reports [default: file name]
    #[clap(long = "label1")]
    #[clap(value_name = "LABEL")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "", hide_default_value = true)]
    pub label1: String,

    /// Label for the second run in reports [default: file name]
    #[clap(long = "label2")]
    #[clap(value_name = "LABEL")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "", hide_default_value = true)]
    pub label2: String,

    /// Optional output directory for the full reports
    #[clap(short = 'o')]
    #[clap(long = "output-dir")]
    #[clap(value_name = "DIR")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_folder: Option<PathBuf>,

    /// Prefix for the report files in the output directory
    #[clap(long = "output-prefix")]
    #[clap(value_name = "PREFIX")]
    #[clap(help_heading = Some("Input/Output"))]
    #[clap(default_value = "scored_snv")]
    pub output_prefix: String,

    /// Flag score differences where either run scores at or above this
    #[clap(long = "score-threshold")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Score comparison"))]
    #[clap(default_value = "17")]
    #[clap(allow_negative_numbers = true)]
    pub score_threshold: i64,

    /// Maximum number of variants to print to the console for each table
    #[clap(long = "max-display")]
    #[clap(value_name = "INT")]
    #[clap(help_heading = Some("Score comparison"))]
    #[clap(default_value = "15")]
    pub max_display: usize,

    /// Show the rank sub-scores in the console tables (always included in output files)
    #[clap(long = "show-sub-scores")]
    #[clap(help_heading = Some("Score comparison"))]
    pub show_sub_scores: bool,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

pub fn check_compare_settings(mut settings: CompareSettings) -> anyhow::Result<CompareSettings> {
    // hard code the version in
    settings.scorediff_version = FULL_VERSION.clone();
    info!("scorediff version: {:?}", &settings.scorediff_version);
    info!("Sub-command: compare");
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.first_vcf_filename, "First VCF")?;
    check_required_filename(&settings.second_vcf_filename, "Second VCF")?;

    // fill in any missing labels
    let (label1, label2) = default_labels(&settings.first_vcf_filename, &settings.second_vcf_filename);
    if settings.label1.is_empty() {
        settings.label1 = label1;
    }
    if settings.label2.is_empty() {
        settings.label2 = label2;
    }
    if settings.label1 == settings.label2 {
        // same file or same label given twice, keep the reports readable
        settings.label1 = format!("1:{}", settings.label1);
        settings.label2 = format!("2:{}", settings.label2);
    }

    info!("\tFirst VCF: {:?}", &settings.first_vcf_filename);
    info!("\tFirst label: {:?}", &settings.label1);
    info!("\tSecond VCF: {:?}", &settings.second_vcf_filename);
    info!("\tSecond label: {:?}", &settings.label2);

    // outputs
    info!("Outputs:");
    if let Some(output_folder) = settings.output_folder.as_ref() {
        if settings.output_prefix.is_empty() {
            bail!("--output-prefix must not be empty");
        }
        info!("\tOutput folder: {output_folder:?}");
        info!("\tOutput prefix: {:?}", &settings.output_prefix);
    } else {
        info!("\tOutput folder: None, console output only");
    }

    // score comparison parameters
    info!("Score comparison parameters:");
    info!("\tScore threshold: {}", settings.score_threshold);
    info!("\tMax display: {}", settings.max_display);
    info!("\tSub-scores in console: {}", if settings.show_sub_scores { "ENABLED" } else { "DISABLED" });

    Ok(settings)
}
