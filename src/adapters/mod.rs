/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: registry, vulnerability
/// and repository clients, license catalog, formatters and console output.
pub mod outbound;
