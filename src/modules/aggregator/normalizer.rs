use crate::modules::provider::{AnimeSource, EpisodeSheet, RawSearchItem, RawStream};
use crate::shared::errors::AppResult;
use std::collections::BTreeMap;
use tracing::debug;

/// Season label assigned to sources that expose a flat episode structure.
pub const DEFAULT_SEASON_LABEL: &str = "S1";

/// Common per-entity search record, one per raw result per source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    pub title: String,
    pub source: AnimeSource,
    pub source_item_id: String,
    pub metadata: BTreeMap<String, String>,
}

/// Common per-entity episode record: number, stable source item id, and the
/// playable/reference URL (already resolved through the url→stream_url
/// fallback).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeItem {
    pub number: u32,
    pub id: String,
    pub url: Option<String>,
}

/// Normalized stream value; both fields absent means unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamItem {
    pub stream_url: Option<String>,
    pub embed: Option<String>,
}

/// Converts each provider's raw success value into the common shape for the
/// operation kind. A failed provider outcome normalizes to an empty
/// sequence (search/episodes) or an unavailable value (stream) — never to
/// an error that reaches the reconciler.
pub struct ResultNormalizer;

impl ResultNormalizer {
    pub fn search(source: AnimeSource, outcome: AppResult<Vec<RawSearchItem>>) -> Vec<SearchEntry> {
        let items = match outcome {
            Ok(items) => items,
            Err(_) => return Vec::new(),
        };

        items
            .into_iter()
            .map(|item| {
                let mut metadata = BTreeMap::new();
                if let Some(url) = item.url {
                    metadata.insert("url".to_string(), url);
                }
                if let Some(poster) = item.poster {
                    metadata.insert("poster".to_string(), poster);
                }
                SearchEntry {
                    title: item.title,
                    source,
                    source_item_id: item.id,
                    metadata,
                }
            })
            .collect()
    }

    /// Flatten a sheet into one ordered episode sequence. Season-partitioned
    /// sheets are walked in label order.
    pub fn episodes(source: AnimeSource, outcome: AppResult<EpisodeSheet>) -> Vec<EpisodeItem> {
        Self::seasons(source, outcome)
            .into_values()
            .flatten()
            .collect()
    }

    /// Per-season episode sequences. Flat sheets land under the single
    /// default label.
    pub fn seasons(
        source: AnimeSource,
        outcome: AppResult<EpisodeSheet>,
    ) -> BTreeMap<String, Vec<EpisodeItem>> {
        let sheet = match outcome {
            Ok(sheet) => sheet,
            Err(_) => return BTreeMap::new(),
        };

        let partitions: Vec<(String, Vec<crate::modules::provider::RawEpisode>)> = match sheet {
            EpisodeSheet::Flat(episodes) => vec![(DEFAULT_SEASON_LABEL.to_string(), episodes)],
            EpisodeSheet::Seasons(seasons) => seasons.into_iter().collect(),
        };

        partitions
            .into_iter()
            .map(|(label, episodes)| {
                let items = episodes
                    .into_iter()
                    .filter(|ep| {
                        // Episode numbers are positive by invariant
                        if ep.number == 0 {
                            debug!("{} reported episode number 0, skipping", source);
                            return false;
                        }
                        true
                    })
                    .map(|ep| EpisodeItem {
                        number: ep.number,
                        url: ep.playable_url(),
                        id: ep.id,
                    })
                    .collect();
                (label, items)
            })
            .collect()
    }

    pub fn stream(outcome: AppResult<RawStream>) -> StreamItem {
        match outcome {
            Ok(raw) => StreamItem {
                stream_url: raw.stream_url,
                embed: raw.embed,
            },
            Err(_) => StreamItem::default(),
        }
    }
}
