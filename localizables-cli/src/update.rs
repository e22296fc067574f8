use crate::output::Output;
use crate::validation::{
    validate_dir_path, validate_extension, validate_file_path, validate_language_code,
    validate_output_path,
};
use localizables::{
    ApplyOptions, ApplySummary, FilePair, FolderScanner, PairOutcome, ScanOptions, orchestrator,
};
use serde_json::json;

#[derive(Debug, Clone)]
pub struct FileOptions {
    pub destination: String,
    pub update: String,
    pub dry_run: bool,
    pub report_json: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FolderOptions {
    pub destination: String,
    pub update: String,
    pub base_language: String,
    pub extension: String,
    pub jobs: Option<usize>,
    pub dry_run: bool,
    pub report_json: Option<String>,
}

fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {}", e))
}

fn write_report(
    path: &str,
    mode: &str,
    destination: &str,
    update: &str,
    dry_run: bool,
    summary: &ApplySummary,
) -> Result<(), String> {
    let (succeeded, failed) = summary.counts();
    let payload = json!({
        "mode": mode,
        "destination": destination,
        "update": update,
        "dry_run": dry_run,
        "summary": {
            "succeeded": succeeded,
            "failed": failed,
        },
        "reports": summary.reports,
        "failures": summary.failures,
    });

    let text = serde_json::to_string_pretty(&payload)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))?;
    std::fs::write(path, text).map_err(|e| format!("Failed to write report JSON '{}': {}", path, e))
}

/// Update one destination file from one update file.
pub fn run_file_command(opts: FileOptions, output: &Output) -> Result<(), String> {
    validate_file_path(&opts.destination)?;
    validate_file_path(&opts.update)?;
    if let Some(report_path) = &opts.report_json {
        validate_output_path(report_path)?;
    }

    let pair = FilePair::new(&opts.destination, &opts.update);
    let options = ApplyOptions::new().with_dry_run(opts.dry_run);

    let report = runtime()?
        .block_on(orchestrator::merge_pair(&pair, &options))
        .map_err(|e| format!("Failed to update {}: {}", opts.destination, e))?;

    output.report(&report);

    if let Some(report_path) = &opts.report_json {
        let summary = ApplySummary {
            reports: vec![report],
            failures: Vec::new(),
        };
        write_report(
            report_path,
            "file",
            &opts.destination,
            &opts.update,
            opts.dry_run,
            &summary,
        )?;
        println!("Report JSON written: {}", report_path);
    }

    if opts.dry_run {
        println!("Dry-run mode: no files were written");
    }

    Ok(())
}

/// Pair every resource file of two trees by language and update them all.
pub fn run_folder_command(opts: FolderOptions, output: &Output) -> Result<(), String> {
    validate_dir_path(&opts.destination)?;
    validate_dir_path(&opts.update)?;
    validate_language_code(&opts.base_language)?;
    validate_extension(&opts.extension)?;
    if let Some(report_path) = &opts.report_json {
        validate_output_path(report_path)?;
    }

    let scan_options = ScanOptions::new()
        .with_base_language(opts.base_language.as_str())
        .with_extension(opts.extension.as_str());
    let pairs = FolderScanner::new(&opts.destination, &opts.update, scan_options)
        .find_matches()
        .map_err(|e| format!("Cannot match {} with {}: {}", opts.destination, opts.update, e))?;

    if pairs.is_empty() {
        println!(
            "No .{} files found in {}",
            opts.extension.trim_start_matches('.'),
            opts.destination
        );
        return Ok(());
    }

    let options = ApplyOptions::new()
        .with_max_concurrency(opts.jobs)
        .with_dry_run(opts.dry_run);

    let summary = runtime()?.block_on(orchestrator::apply_all_with(
        pairs,
        &options,
        |outcome| match outcome {
            PairOutcome::Merged(report) => output.report(report),
            PairOutcome::Failed(failure) => output.failure(failure),
        },
    ));

    if let Some(report_path) = &opts.report_json {
        write_report(
            report_path,
            "folder",
            &opts.destination,
            &opts.update,
            opts.dry_run,
            &summary,
        )?;
        println!("Report JSON written: {}", report_path);
    }

    output.summary(&summary, opts.dry_run);

    let (succeeded, failed) = summary.counts();
    if failed > 0 {
        return Err(format!(
            "Failed to update {} files, {} files updated successfully",
            failed, succeeded
        ));
    }

    Ok(())
}
