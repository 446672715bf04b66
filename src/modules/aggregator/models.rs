use crate::modules::provider::AnimeSource;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-source flag plus optional URL/identifier indicating whether an
/// entity is obtainable from that source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceAvailability {
    pub available: bool,
    pub url: Option<String>,
    pub id: Option<String>,
}

impl SourceAvailability {
    pub fn available(url: Option<String>, id: String) -> Self {
        Self {
            available: true,
            url,
            id: Some(id),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            url: None,
            id: None,
        }
    }
}

/// One logical title, reconciled across every source that reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnifiedSearchResult {
    /// Canonical display title: the first-seen entry that created this record
    pub title: String,
    pub sources_available: Vec<AnimeSource>,
    /// Source-native item id per source
    pub per_source: BTreeMap<AnimeSource, String>,
}

/// One episode, keyed by number, with an availability entry for every
/// configured source (unavailable by default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeRecord {
    pub episode_number: u32,
    pub sources: BTreeMap<AnimeSource, SourceAvailability>,
}

impl EpisodeRecord {
    /// New record with every configured source marked unavailable.
    pub fn new(episode_number: u32) -> Self {
        let sources = AnimeSource::ALL
            .iter()
            .map(|source| (*source, SourceAvailability::unavailable()))
            .collect();
        Self {
            episode_number,
            sources,
        }
    }
}

/// Per-source stream lookup outcome. No cross-source merge happens for
/// streams; each queried source reports independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamAvailability {
    pub available: bool,
    pub stream_url: Option<String>,
    pub embed: Option<String>,
}

impl StreamAvailability {
    pub fn unavailable() -> Self {
        Self {
            available: false,
            stream_url: None,
            embed: None,
        }
    }
}

impl Default for StreamAvailability {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Partition of one source's episodes into labeled seasons.
pub type SeasonGrouping = BTreeMap<String, Vec<EpisodeRecord>>;

/// Full stream lookup response: an entry for every configured source.
pub type StreamReport = BTreeMap<AnimeSource, StreamAvailability>;

/// Full season lookup response: a grouping for every configured source,
/// empty for sources that were not queried or failed.
pub type SeasonReport = BTreeMap<AnimeSource, SeasonGrouping>;
