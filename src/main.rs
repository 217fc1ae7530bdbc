mod cli;
mod config;

use cli::Args;
use config::{discover_config, load_config_from_path, Settings};
use owo_colors::OwoColorize;
use pypi_risk_graph::adapters::outbound::console::StderrProgressReporter;
use pypi_risk_graph::adapters::outbound::licenses::SpdxLicenseCatalog;
use pypi_risk_graph::adapters::outbound::network::{
    GitHubRepositoryClient, OsvClient, PyPiRegistryClient,
};
use pypi_risk_graph::application::dto::{AnalysisRequest, AnalysisResponse};
use pypi_risk_graph::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use pypi_risk_graph::application::use_cases::AnalyzeDependenciesUseCase;
use pypi_risk_graph::dependency_analysis::services::{
    DependencyResolver, ResolutionContext, RiskAggregator,
};
use pypi_risk_graph::shared::error::ExitCode;
use pypi_risk_graph::shared::Result;
use std::process;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> process::ExitCode {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(code) => process_exit(code),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process_exit(ExitCode::ApplicationError)
        }
    }
}

fn process_exit(code: ExitCode) -> process::ExitCode {
    process::ExitCode::from(code.as_i32() as u8)
}

/// Logs go to stderr so stdout stays clean for the exported document.
/// `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&std::env::current_dir()?)?,
    };
    let settings = Settings::merge(&args, config)?;

    // Create adapters (Dependency Injection)
    let registry = PyPiRegistryClient::new()?;
    let scorer = RiskAggregator::new(
        OsvClient::new()?,
        GitHubRepositoryClient::new()?,
        settings.weights,
    );
    let resolver = DependencyResolver::new(registry, scorer, settings.resolver);
    let use_case = AnalyzeDependenciesUseCase::new(
        resolver,
        SpdxLicenseCatalog::new(),
        StderrProgressReporter::new(),
    );

    let cancellation = use_case.cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, stopping the walk");
            cancellation.cancel();
        }
    });

    let request = AnalysisRequest::new(settings.package.clone(), settings.max_depth)
        .with_filter(settings.filter);
    let mut ctx = ResolutionContext::new();
    let response = use_case.execute(&mut ctx, request).await?;

    eprintln!("{}", FormatterFactory::progress_message(settings.format));
    let formatter = FormatterFactory::create(settings.format);
    let formatted_output = formatter.format(&response)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(settings.output.clone()));
    presenter.present(&formatted_output)?;

    print_summary(&response);
    info!(analysis_id = %response.analysis_id, "analysis finished");

    Ok(exit_status(response.has_vulnerabilities(), settings.fail_on_cve))
}

fn print_summary(response: &AnalysisResponse) {
    if response.cancelled {
        eprintln!("{}", "⚠️  Cancelled: the exported graph is partial.".yellow());
    }
    if !response.omitted.is_empty() {
        let names: Vec<&str> = response.omitted.iter().map(|o| o.name.as_str()).collect();
        eprintln!(
            "{}",
            format!("⚠️  {} package(s) omitted: {}", names.len(), names.join(", ")).yellow()
        );
    }

    let vulnerable = response.vulnerable_packages();
    if !vulnerable.is_empty() {
        eprintln!(
            "{}",
            format!("🚨 Known vulnerabilities in: {}", vulnerable.join(", ")).red()
        );
    }
}

fn exit_status(has_vulnerabilities: bool, fail_on_cve: bool) -> ExitCode {
    if has_vulnerabilities && fail_on_cve {
        ExitCode::VulnerablePackagesDetected
    } else {
        ExitCode::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(false, false), ExitCode::Success);
        assert_eq!(exit_status(true, false), ExitCode::Success);
        assert_eq!(exit_status(false, true), ExitCode::Success);
        assert_eq!(
            exit_status(true, true),
            ExitCode::VulnerablePackagesDetected
        );
    }
}
