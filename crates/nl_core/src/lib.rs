pub mod error;
pub mod sources;
pub mod types;

pub use error::Error;
pub use types::{
    AnalysisResult, AnalyzedArticle, DateRange, MediaBias, MediaSource, SearchParams,
    SearchResult, TrendingKeywords,
};

pub type Result<T> = std::result::Result<T, Error>;
