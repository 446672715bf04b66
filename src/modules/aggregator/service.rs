use crate::modules::aggregator::coordinator::{FanOutCoordinator, SourceOp};
use crate::modules::aggregator::embed::EmbedTemplate;
use crate::modules::aggregator::models::{
    EpisodeRecord, SeasonReport, StreamReport, UnifiedSearchResult,
};
use crate::modules::aggregator::normalizer::ResultNormalizer;
use crate::modules::aggregator::reconciler::Reconciler;
use crate::modules::aggregator::title_match::TitleMatcher;
use crate::modules::provider::{AnimeSource, SourceClient};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use futures::FutureExt;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Per-source identifiers supplied by the caller. A source is only queried
/// when its identifier is present.
pub type SourceIds = BTreeMap<AnimeSource, String>;

/// The aggregation boundary: validates input, fans out to the injected
/// source clients, normalizes each outcome, and reconciles the results.
///
/// Everything it returns is request-scoped; there is no cross-request state
/// here beyond the clients themselves.
pub struct AggregatorService {
    clients: BTreeMap<AnimeSource, Arc<dyn SourceClient>>,
    matcher: Box<dyn TitleMatcher>,
    embed: Box<dyn EmbedTemplate>,
}

impl AggregatorService {
    pub fn new(
        clients: Vec<Arc<dyn SourceClient>>,
        matcher: Box<dyn TitleMatcher>,
        embed: Box<dyn EmbedTemplate>,
    ) -> Self {
        let clients = clients
            .into_iter()
            .map(|client| (client.source(), client))
            .collect();
        Self {
            clients,
            matcher,
            embed,
        }
    }

    /// Search every configured source and return unified, deduplicated
    /// results in first-seen order.
    pub async fn aggregate_search(&self, query: &str) -> AppResult<Vec<UnifiedSearchResult>> {
        Validator::validate_search_query(query)?;

        let ops: Vec<SourceOp<'_, _>> = AnimeSource::ALL
            .iter()
            .filter_map(|source| {
                self.clients
                    .get(source)
                    .map(|client| (*source, client.search(query).boxed()))
            })
            .collect();

        let outcomes = FanOutCoordinator::collect(ops).await?;

        let entries = outcomes
            .into_iter()
            .flat_map(|(source, result)| ResultNormalizer::search(source, result))
            .collect();

        let unified = Reconciler::merge_search(entries, self.matcher.as_ref());
        info!("Search '{}' produced {} unified results", query, unified.len());
        Ok(unified)
    }

    /// Episode lists for the sources named in `ids`, merged by episode
    /// number into one ascending sequence.
    pub async fn aggregate_episodes(&self, ids: &SourceIds) -> AppResult<Vec<EpisodeRecord>> {
        Validator::validate_source_ids(ids)?;

        let outcomes = FanOutCoordinator::collect(self.episode_ops(ids)).await?;

        let per_source = outcomes
            .into_iter()
            .map(|(source, result)| (source, ResultNormalizer::episodes(source, result)))
            .collect();

        let merged = Reconciler::merge_episodes(per_source);
        info!("Episode merge produced {} records", merged.len());
        Ok(merged)
    }

    /// Stream lookups for the sources named in `ids`. Every configured
    /// source appears in the report, unavailable unless its lookup
    /// succeeded.
    pub async fn aggregate_stream(&self, ids: &SourceIds) -> AppResult<StreamReport> {
        Validator::validate_source_ids(ids)?;

        let ops: Vec<SourceOp<'_, _>> = AnimeSource::ALL
            .iter()
            .filter_map(|source| {
                let episode_id = ids.get(source)?;
                let client = self.clients.get(source)?;
                Some((*source, client.get_stream_url(episode_id).boxed()))
            })
            .collect();

        let outcomes = FanOutCoordinator::collect(ops).await?;

        let per_source = outcomes
            .into_iter()
            .map(|(source, result)| (source, ResultNormalizer::stream(result)))
            .collect();

        Ok(Reconciler::report_streams(per_source, self.embed.as_ref()))
    }

    /// Season groupings reported side by side per source. Every configured
    /// source appears; those not named in `ids` get an empty grouping.
    pub async fn aggregate_seasons(&self, ids: &SourceIds) -> AppResult<SeasonReport> {
        Validator::validate_source_ids(ids)?;

        let outcomes = FanOutCoordinator::collect(self.episode_ops(ids)).await?;

        let per_source = outcomes
            .into_iter()
            .map(|(source, result)| (source, ResultNormalizer::seasons(source, result)))
            .collect();

        Ok(Reconciler::merge_seasons(per_source))
    }

    /// Episode-sheet fetches for every source the caller identified, in
    /// canonical source order.
    fn episode_ops<'a>(
        &'a self,
        ids: &'a SourceIds,
    ) -> Vec<SourceOp<'a, crate::modules::provider::EpisodeSheet>> {
        AnimeSource::ALL
            .iter()
            .filter_map(|source| {
                let anime_id = ids.get(source)?;
                let client = self.clients.get(source)?;
                Some((*source, client.get_episodes(anime_id).boxed()))
            })
            .collect()
    }
}
