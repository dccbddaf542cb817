use clap::Parser;
use std::path::PathBuf;

/// Batch analysis of the video-game sales dataset
#[derive(Parser, Debug, Clone)]
#[command(
    name = "vgsales-analyzer",
    about = "Cleans the video-game sales dataset and renders charts and insights",
    version
)]
pub struct Settings {
    /// Path to the raw sales CSV file
    #[arg(long, default_value = "database/vgsales.csv")]
    pub input: PathBuf,

    /// Directory where the cleaned CSV and chart artifacts are written
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Skip chart rendering; produce only the cleaned CSV and console report
    #[arg(long)]
    pub no_charts: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}
