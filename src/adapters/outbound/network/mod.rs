/// Network adapters for external API calls
mod github_client;
mod osv_client;
mod pypi_client;

pub use github_client::{parse_github_repo, GitHubRepositoryClient};
pub use osv_client::OsvClient;
pub use pypi_client::PyPiRegistryClient;
