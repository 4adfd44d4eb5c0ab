pub mod analyze;
pub mod normalize;
pub mod parse;
pub mod prompt;
pub mod provider;
pub mod salvage;
pub mod trending;

pub use analyze::run_comparison;
pub use provider::{CredentialSource, PerplexityProvider, SearchProvider};
pub use trending::fetch_trending;

pub mod prelude {
    pub use crate::analyze::run_comparison;
    pub use crate::provider::{ChatQuery, CredentialSource, PerplexityProvider, SearchProvider};
    pub use crate::trending::fetch_trending;
    pub use nl_core::{AnalysisResult, Error, MediaBias, Result, SearchParams, SearchResult};
}
