/// Data Transfer Objects for application layer
///
/// DTOs carry requests into the use case and results out to the
/// formatters, keeping adapters away from resolver internals.
mod analysis_request;
mod analysis_response;
mod output_format;

pub use analysis_request::AnalysisRequest;
pub use analysis_response::AnalysisResponse;
pub use output_format::OutputFormat;
