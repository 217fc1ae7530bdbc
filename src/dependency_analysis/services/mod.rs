pub mod dependency_resolver;
pub mod fetch_cache;
pub mod graph_builder;
pub mod graph_filter;
pub mod requirement_parser;
pub mod resolution_context;
pub mod risk_aggregator;

pub use dependency_resolver::{
    DependencyResolver, ProgressCallback, ResolutionOutcome, ResolverConfig,
};
pub use fetch_cache::{FetchCache, FetchOutcome};
pub use graph_builder::GraphBuilder;
pub use graph_filter::GraphFilter;
pub use requirement_parser::RequirementParser;
pub use resolution_context::{CancellationFlag, ResolutionContext};
pub use risk_aggregator::{complete_supply_chain, RiskAggregator, RiskScorer};
