
use log::{LevelFilter, error, info};
use std::io::Write;
use std::time::Instant;

use scorediff::cli::compare::{CompareSettings, check_compare_settings};
use scorediff::cli::core::{Commands, get_cli};
use scorediff::run_comparison::RunComparison;
use scorediff::score_differ::ScoreCompareConfigBuilder;
use scorediff::util::json_io::save_json;

fn run_compare(settings: CompareSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    let filter_level: LevelFilter = match settings.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();

    let settings = match check_compare_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // build our configuration
    let config = match ScoreCompareConfigBuilder::default()
        .score_threshold(settings.score_threshold)
        .max_display(settings.max_display)
        .show_sub_scores(settings.show_sub_scores)
        .build() {
        Ok(c) => c,
        Err(e) => {
            error!("Error while building score compare config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    // create the output folder if specified, and save the CLI options there
    if let Some(output_folder) = settings.output_folder.as_ref() {
        info!("Creating output folder at {output_folder:?}...");
        if let Err(e) = std::fs::create_dir_all(output_folder) {
            error!("Error while creating output folder: {e}");
            std::process::exit(exitcode::IOERR);
        }

        let cli_json = output_folder.join("cli_settings.json");
        info!("Saving CLI options to {cli_json:?}...");
        if let Err(e) = save_json(&settings, &cli_json) {
            error!("Error while saving CLI options: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // parse both files
    info!("Loading scored variants...");
    let comparison = match RunComparison::load(&settings.first_vcf_filename, &settings.second_vcf_filename) {
        Ok(c) => c,
        Err(e) => {
            error!("Error while loading scored variants: {e:#}");
            std::process::exit(exitcode::DATAERR);
        }
    };
    info!("Loaded {} variants from {} and {} variants from {}.",
        comparison.first().len(), settings.label1, comparison.second().len(), settings.label2);

    let label1 = settings.label1.as_str();
    let label2 = settings.label2.as_str();
    let mut stdout = std::io::stdout().lock();

    // presence of calls in each run
    info!("Comparing variant presence...");
    let presence_report = comparison.presence_report(label1, label2);
    for line in presence_report.count_lines() {
        info!("{line}");
    }
    if let Err(e) = presence_report.write_preview(&mut stdout, config.max_display()) {
        error!("Error while writing presence preview: {e}");
        std::process::exit(exitcode::IOERR);
    }

    // rank score changes for the shared calls
    info!("Comparing rank scores...");
    let score_diffs = comparison.diff_scores(config.score_threshold());
    info!("Number differently scored total: {}", score_diffs.differences().len());
    info!("Number differently scored at or above {}: {}", config.score_threshold(), score_diffs.above_threshold().len());
    if score_diffs.above_threshold().len() > config.max_display() {
        info!("Only printing the first {} variants at or above the threshold", config.max_display());
    }

    let score_table = comparison.score_table();
    let preview_result = score_table.write_preview(
        &mut stdout, score_diffs.above_threshold(), config.max_display(), config.show_sub_scores()
    ).map_err(anyhow::Error::from)
        .and_then(|_| stdout.flush().map_err(anyhow::Error::from));
    if let Err(e) = preview_result {
        error!("Error while writing score preview: {e:#}");
        std::process::exit(exitcode::IOERR);
    }

    let summary = comparison.summary(label1, label2, &score_diffs);
    info!("Summary: {summary:?}");

    // now write all the full reports
    if let Some(output_folder) = settings.output_folder.as_ref() {
        let prefix = settings.output_prefix.as_str();

        let presence_fn = output_folder.join(format!("{prefix}_presence.txt"));
        info!("Saving presence report to {presence_fn:?}...");
        if let Err(e) = presence_report.write_export_file(&presence_fn) {
            error!("Error while saving presence report: {e:#}");
            std::process::exit(exitcode::IOERR);
        }

        let threshold_fn = output_folder.join(format!("{prefix}_score_thres_{}.tsv", config.score_threshold()));
        info!("Saving above-threshold score differences to {threshold_fn:?}...");
        if let Err(e) = score_table.write_export_file(&threshold_fn, score_diffs.above_threshold()) {
            error!("Error while saving score differences: {e:#}");
            std::process::exit(exitcode::IOERR);
        }

        let all_fn = output_folder.join(format!("{prefix}_score_all.tsv"));
        info!("Saving all score differences to {all_fn:?}...");
        if let Err(e) = score_table.write_export_file(&all_fn, score_diffs.differences()) {
            error!("Error while saving score differences: {e:#}");
            std::process::exit(exitcode::IOERR);
        }

        let summary_fn = output_folder.join("summary.json");
        info!("Saving summary to {summary_fn:?}...");
        if let Err(e) = save_json(&summary, &summary_fn) {
            error!("Error while saving summary: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    info!("Comparison completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Compare(settings) => {
            run_compare(*settings);
        }
    }

    info!("Process finished successfully.");
}
