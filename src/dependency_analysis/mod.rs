/// Dependency analysis core
///
/// - `domain`: value objects and aggregates (tree, graph, risk signals)
/// - `policies`: business rules (risk grouping, scoring weights, license selection)
/// - `services`: resolution, risk aggregation, graph building and filtering
pub mod domain;
pub mod policies;
pub mod services;
