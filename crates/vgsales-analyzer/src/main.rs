mod bootstrap;

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;

use sales_core::error::AnalysisError;
use sales_core::settings::Settings;
use sales_data::analysis::analyze_sales;
use sales_data::cleaner::clean;
use sales_data::reader::load_raw_rows;
use sales_data::writer::write_clean_csv;
use sales_render::charts::render_static_charts;
use sales_render::interactive::render_interactive_charts;
use sales_render::{artifacts, report};

fn main() -> Result<()> {
    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("vgsales-analyzer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Input: {}, output dir: {}, charts: {}",
        settings.input.display(),
        settings.output_dir.display(),
        !settings.no_charts
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    report::banner(&mut out, "VIDEO GAME SALES ANALYSIS")?;
    writeln!(out, "\nData file: {}", settings.input.display())?;

    // The single recovery point: every stage below propagates failures here
    // unmodified, and both failure kinds terminate with a normal exit status.
    match run_pipeline(&settings, &mut out) {
        Ok(files) => report::render_completion(&mut out, &files)?,
        Err(err) => report_failure(&mut out, &err)?,
    }

    Ok(())
}

/// Run the full pipeline: load, clean, analyze, write, render, report.
///
/// Returns the names of every generated file for the completion banner.
fn run_pipeline(settings: &Settings, out: &mut impl Write) -> Result<Vec<String>> {
    bootstrap::ensure_output_dir(&settings.output_dir)?;

    report::banner(out, "LOADING AND CLEANING DATA")?;
    let raw_rows = load_raw_rows(&settings.input)?;
    let (records, cleaning) = clean(raw_rows);
    report::render_cleaning_summary(out, &cleaning)?;

    let analysis = analyze_sales(&records)?;

    let clean_path = settings.output_dir.join(artifacts::CLEAN_CSV);
    write_clean_csv(&clean_path, &records)?;
    let mut files = vec![format!("{} (cleaned data)", artifacts::CLEAN_CSV)];

    if !settings.no_charts {
        report::banner(out, "RENDERING CHARTS")?;
        let static_paths = render_static_charts(&settings.output_dir, &records, &analysis)?;
        let interactive_paths =
            render_interactive_charts(&settings.output_dir, &records, &analysis)?;
        for path in static_paths.iter().chain(interactive_paths.iter()) {
            writeln!(out, "Chart saved: {}", file_name(path))?;
            files.push(file_name(path));
        }
    }

    report::banner(out, "INSIGHTS AND STATISTICS")?;
    report::render_insights(out, &analysis)?;

    Ok(files)
}

/// Print the diagnostic for a failed run.
///
/// A missing input file gets remediation instructions pointing at the public
/// dataset; everything else gets the full error chain. Neither case changes
/// the exit status.
fn report_failure(out: &mut impl Write, err: &anyhow::Error) -> io::Result<()> {
    if let Some(AnalysisError::InputNotFound(path)) = err.downcast_ref::<AnalysisError>() {
        writeln!(out, "\nERROR: data file '{}' not found!", path.display())?;
        writeln!(out, "\nDownload the dataset from:")?;
        writeln!(
            out,
            "https://www.kaggle.com/datasets/gregorut/videogamesales"
        )?;
        writeln!(
            out,
            "\nand place 'vgsales.csv' in the '{}' directory.",
            path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string())
        )?;
    } else {
        writeln!(out, "\nERROR: {err}")?;
        for cause in err.chain().skip(1) {
            writeln!(out, "Caused by: {cause}")?;
        }
        tracing::error!("Analysis failed: {err:?}");
    }
    Ok(())
}

/// File name component of a generated artifact path.
fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::TempDir;

    const HEADER: &str =
        "Rank,Name,Platform,Year,Genre,Publisher,NA_Sales,EU_Sales,JP_Sales,Other_Sales,Global_Sales";

    fn settings(input: &std::path::Path, output_dir: &std::path::Path) -> Settings {
        Settings::parse_from([
            "vgsales-analyzer",
            "--input",
            input.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
            "--no-charts",
        ])
    }

    fn write_csv(dir: &std::path::Path, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.join("vgsales.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── run_pipeline ──────────────────────────────────────────────────────────

    #[test]
    fn test_pipeline_writes_clean_csv_and_reports() {
        let data_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let input = write_csv(
            data_dir.path(),
            &[
                HEADER,
                "1,Wii Sports,Wii,2006,Sports,Nintendo,41.49,29.02,3.77,8.46,82.74",
                "2,Nulled,PS2,N/A,Action,Sony,1.0,0.0,0.0,0.0,1.0",
            ],
        );

        let mut buffer = Vec::new();
        let files = run_pipeline(&settings(&input, out_dir.path()), &mut buffer).unwrap();

        assert!(out_dir.path().join(artifacts::CLEAN_CSV).exists());
        assert_eq!(files.len(), 1);

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Rows in source file: 2"));
        assert!(text.contains("Dropped (missing year): 1"));
        assert!(text.contains("1. TOP 5 BEST-SELLING GAMES:"));
        assert!(text.contains("Wii Sports"));
    }

    #[test]
    fn test_pipeline_missing_input_writes_no_artifacts() {
        let out_dir = TempDir::new().unwrap();
        let missing = out_dir.path().join("nope").join("vgsales.csv");

        let mut buffer = Vec::new();
        let err = run_pipeline(&settings(&missing, out_dir.path()), &mut buffer).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::InputNotFound(_))
        ));
        let leftover: Vec<_> = std::fs::read_dir(out_dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .collect();
        assert!(leftover.is_empty(), "no artifact may be written on failure");
    }

    #[test]
    fn test_pipeline_empty_table_signals_empty_dataset() {
        let data_dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        // Every row is dropped by cleaning, so aggregation must refuse.
        let input = write_csv(
            data_dir.path(),
            &[HEADER, "1,Ghost,PS2,N/A,Action,Sony,1.0,0.0,0.0,0.0,1.0"],
        );

        let mut buffer = Vec::new();
        let err = run_pipeline(&settings(&input, out_dir.path()), &mut buffer).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::EmptyDataset)
        ));
    }

    // ── report_failure ────────────────────────────────────────────────────────

    #[test]
    fn test_report_failure_missing_file_points_at_kaggle() {
        let err = anyhow::Error::new(AnalysisError::InputNotFound(
            std::path::PathBuf::from("database/vgsales.csv"),
        ));

        let mut buffer = Vec::new();
        report_failure(&mut buffer, &err).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("not found"));
        assert!(text.contains("kaggle.com/datasets/gregorut/videogamesales"));
    }

    #[test]
    fn test_report_failure_other_error_prints_chain() {
        let err = anyhow::Error::new(AnalysisError::MissingColumn("Year".to_string()))
            .context("loading failed");

        let mut buffer = Vec::new();
        report_failure(&mut buffer, &err).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("ERROR: loading failed"));
        assert!(text.contains("Caused by: Missing required column: Year"));
    }
}
