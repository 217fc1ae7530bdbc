use clap::Parser;
use pypi_risk_graph::application::dto::OutputFormat;
use std::path::PathBuf;

/// Resolve a PyPI package's dependency graph and score its risk
#[derive(Parser, Debug)]
#[command(name = "pypi-risk-graph")]
#[command(version)]
#[command(
    about = "Resolve a PyPI package's transitive dependencies, score their risk and export a force-directed graph",
    long_about = None
)]
pub struct Args {
    /// Root package name on PyPI
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// Deepest dependency level to resolve (root is level 0) [default: 3]
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Output format: graph, tree or flat [default: graph]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep only packages with known vulnerabilities in the graph
    #[arg(long)]
    pub cve_only: bool,

    /// Keep only graph nodes whose risk score is at least this value
    #[arg(long, value_name = "SCORE")]
    pub min_risk_score: Option<f64>,

    /// Keep only graph nodes at or shallower than this level (inclusive)
    #[arg(long, value_name = "N")]
    pub max_level: Option<usize>,

    /// Maximum concurrent registry fetches [default: 1]
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Per-package fetch timeout in seconds [default: 10]
    #[arg(long = "timeout", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to a config file (defaults to ./pypi-risk-graph.config.yml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Exit with code 1 when any resolved package has known vulnerabilities
    #[arg(long)]
    pub fail_on_cve: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let args = Args::try_parse_from(["pypi-risk-graph", "requests"]).unwrap();
        assert_eq!(args.package, "requests");
        assert!(args.format.is_none());
        assert!(args.max_depth.is_none());
        assert!(!args.cve_only);
    }

    #[test]
    fn test_parse_all_flags() {
        let args = Args::try_parse_from([
            "pypi-risk-graph",
            "flask",
            "-d",
            "2",
            "-f",
            "tree",
            "-o",
            "out.json",
            "--cve-only",
            "--min-risk-score",
            "0",
            "--max-level",
            "0",
            "--concurrency",
            "4",
            "--timeout",
            "5",
            "--fail-on-cve",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.max_depth, Some(2));
        assert_eq!(args.format, Some(OutputFormat::Tree));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(args.cve_only);
        assert_eq!(args.min_risk_score, Some(0.0));
        assert_eq!(args.max_level, Some(0));
        assert_eq!(args.concurrency, Some(4));
        assert_eq!(args.timeout, Some(5));
        assert!(args.fail_on_cve);
        assert!(args.verbose);
    }

    #[test]
    fn test_parse_rejects_unsupported_format() {
        let err = Args::try_parse_from(["pypi-risk-graph", "flask", "-f", "markdown"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_package_is_required() {
        assert!(Args::try_parse_from(["pypi-risk-graph"]).is_err());
    }
}
