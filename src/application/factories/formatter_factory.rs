use crate::adapters::outbound::formatters::{FlatFormatter, GraphFormatter, TreeFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ResultFormatter;

/// Factory for creating result formatters
///
/// Selects the formatter adapter for an output format so the CLI never
/// names concrete formatter types.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Examples
    /// ```
    /// use pypi_risk_graph::application::dto::OutputFormat;
    /// use pypi_risk_graph::application::factories::FormatterFactory;
    ///
    /// let formatter = FormatterFactory::create(OutputFormat::Graph);
    /// ```
    pub fn create(format: OutputFormat) -> Box<dyn ResultFormatter> {
        match format {
            OutputFormat::Graph => Box::new(GraphFormatter::new()),
            OutputFormat::Tree => Box::new(TreeFormatter::new()),
            OutputFormat::Flat => Box::new(FlatFormatter::new()),
        }
    }

    /// Returns the progress message for the specified output format
    pub fn progress_message(format: OutputFormat) -> &'static str {
        match format {
            OutputFormat::Graph => "📝 Generating force graph JSON...",
            OutputFormat::Tree => "📝 Generating dependency tree JSON...",
            OutputFormat::Flat => "📝 Generating flat dependency list JSON...",
        }
    }
}
