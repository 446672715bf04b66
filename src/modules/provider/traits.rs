use crate::modules::provider::domain::{AnimeSource, EpisodeSheet, RawSearchItem, RawStream};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Capability contract each upstream source adapter exposes to the core.
///
/// The aggregator treats every source as an opaque async provider behind
/// this trait; adapters are constructed at startup and injected, which is
/// also what makes per-source test doubles possible.
#[async_trait]
pub trait SourceClient: Send + Sync {
    /// The source this client handles
    fn source(&self) -> AnimeSource;

    /// Search the source's catalog for title candidates
    async fn search(&self, query: &str) -> AppResult<Vec<RawSearchItem>>;

    /// List episodes for one title, flat or season-partitioned
    async fn get_episodes(&self, anime_id: &str) -> AppResult<EpisodeSheet>;

    /// Resolve the stream descriptor for one episode
    async fn get_stream_url(&self, episode_id: &str) -> AppResult<RawStream>;
}
