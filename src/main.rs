//! CLI entry point for the grade generator.
//!
//! Runs one interactive session on stdin/stdout: collects assignments,
//! prints the grade summary and exports the records to `grades.csv`.

use anyhow::Result;
use clap::Parser;
use grade_generator::input::StdinSource;
use grade_generator::report::DEFAULT_EXPORT_PATH;
use grade_generator::session::Session;
use std::ffi::OsStr;
use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grade_generator", version)]
#[command(about = "Interactive weighted grade calculator", long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _cli = Cli::parse();

    // Logging setup: stderr for warnings + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/grade_generator.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_generator.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr shares the terminal with the prompts, so it stays quiet by default
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = Session::new(StdinSource::new(stdin.lock()), stdout.lock());
    session.run(DEFAULT_EXPORT_PATH)?;

    Ok(())
}
