pub mod coordinator;
pub mod embed;
pub mod models;
pub mod normalizer;
pub mod reconciler;
pub mod service;
pub mod title_match;

// Re-exports for easy external access
pub use embed::{DefaultEmbedTemplate, EmbedTemplate};
pub use models::{
    EpisodeRecord, SeasonGrouping, SeasonReport, SourceAvailability, StreamAvailability,
    StreamReport, UnifiedSearchResult,
};
pub use service::{AggregatorService, SourceIds};
pub use title_match::{JaroWinklerMatcher, NormalizedExactMatcher, TitleMatcher};
