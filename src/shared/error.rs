use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - analysis completed
    Success = 0,
    /// Packages with known vulnerabilities were found and `--fail-on-cve` was set
    VulnerablePackagesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (invalid config, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerablePackagesDetected => write!(f, "Vulnerable Packages Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid package name: '{name}'\nReason: {reason}\n\n💡 Hint: Package names may contain letters, digits, '-', '_' and '.'")]
    InvalidPackageName { name: String, reason: String },

    #[error("Unsupported output format: '{format}'\n\n💡 Hint: Supported formats are {supported}")]
    UnsupportedFormat { format: String, supported: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid configuration: {message}\n\n💡 Hint: {hint}")]
    InvalidConfig { message: String, hint: String },
}

/// Reason a single package could not be fetched from the registry.
///
/// Fetch failures never abort an analysis; they are recorded per omitted
/// package so callers can tell "missing" apart from "unreachable".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("package '{name}' was not found in the registry")]
    NotFound { name: String },

    #[error("network error while fetching '{name}': {details}")]
    Network { name: String, details: String },

    #[error("fetching '{name}' timed out after {seconds}s")]
    Timeout { name: String, seconds: u64 },

    #[error("invalid package name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl FetchError {
    /// Short machine-readable kind, used in exported omission lists
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::NotFound { .. } => "not_found",
            FetchError::Network { .. } => "network",
            FetchError::Timeout { .. } => "timeout",
            FetchError::InvalidName { .. } => "invalid_name",
        }
    }
}
