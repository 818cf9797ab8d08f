mod cli;

use cli::Args;
use cvrf2csaf::adapters::outbound::console::TracingDiagnosticReporter;
use cvrf2csaf::adapters::outbound::filesystem::FileSystemReader;
use cvrf2csaf::adapters::outbound::formatters::CsafJsonFormatter;
use cvrf2csaf::application::dto::{ConversionRequest, ConversionResponse};
use cvrf2csaf::application::factories::{PresenterFactory, PresenterType};
use cvrf2csaf::application::use_cases::ConvertAdvisoryUseCase;
use cvrf2csaf::config::{discover_config, load_config_from_path, Settings};
use cvrf2csaf::ports::outbound::CsafFormatter;
use cvrf2csaf::shared::error::ExitCode;
use cvrf2csaf::shared::Result;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\n{} {}", "Caused by:".yellow(), err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    // Resolve settings: defaults < config file < CLI flags
    let settings = resolve_settings(&args)?;

    // Create adapters (Dependency Injection)
    let advisory_reader = FileSystemReader::new();
    let diagnostic_reporter = TracingDiagnosticReporter::new();
    let use_case = ConvertAdvisoryUseCase::new(advisory_reader, diagnostic_reporter);

    // Execute use case
    let request = ConversionRequest::new(args.input_file.clone(), settings.conversion.clone());
    let response = use_case.execute(request)?;

    if response.is_fatal() {
        tracing::error!("Critical problems found, no output written");
        return Ok(ExitCode::InvalidDocument);
    }

    let formatter = CsafJsonFormatter::new(settings.indent, settings.ensure_ascii);
    let content = formatter.format(&response.document)?;

    // Present output
    let targets = PresenterType::targets(output_file(&response, &settings), args.print);
    for presenter in PresenterFactory::create_all(targets) {
        presenter.present(&content)?;
    }

    Ok(if response.is_valid {
        ExitCode::Success
    } else {
        ExitCode::InvalidDocument
    })
}

fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::default();

    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };
    if let Some(config) = &config {
        settings.apply_config(config)?;
    }

    args.apply_to(&mut settings)?;
    Ok(settings)
}

/// Target file of a run; `None` when an invalid document must not be written
fn output_file(response: &ConversionResponse, settings: &Settings) -> Option<PathBuf> {
    if !response.is_valid && !settings.force {
        tracing::error!(
            "CSAF document is invalid, nothing written. Use --force to write it as {}",
            response.file_name
        );
        return None;
    }
    if !response.is_valid {
        tracing::warn!("Writing invalid CSAF document because force is set");
    }
    Some(settings.output_dir.join(&response.file_name))
}
