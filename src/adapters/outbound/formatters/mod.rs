/// Formatter adapters for the supported export shapes
mod flat_formatter;
mod graph_formatter;
mod tree_formatter;

pub use flat_formatter::FlatFormatter;
pub use graph_formatter::GraphFormatter;
pub use tree_formatter::TreeFormatter;
