use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One title candidate as reported by a source's search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSearchItem {
    /// Stable identifier within the source
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
}

/// One episode-like item as reported by a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEpisode {
    pub number: u32,
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub stream_url: Option<String>,
}

impl RawEpisode {
    /// The playable/reference URL, falling back from the primary field to
    /// the stream URL when the primary is absent.
    pub fn playable_url(&self) -> Option<String> {
        self.url.clone().or_else(|| self.stream_url.clone())
    }
}

/// A source's full episode listing. The two shapes observed across sources
/// are resolved here, once, instead of being re-inspected downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EpisodeSheet {
    /// Ordered flat sequence of episodes
    Flat(Vec<RawEpisode>),
    /// Episodes partitioned into labeled seasons (e.g. "S1", "S2")
    Seasons(BTreeMap<String, Vec<RawEpisode>>),
}

/// One stream descriptor as reported by a source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStream {
    #[serde(default)]
    pub stream_url: Option<String>,
    /// Pre-built player/embed markup, when the source supplies one
    #[serde(default)]
    pub embed: Option<String>,
    /// Label of the hoster the source resolved the stream through
    #[serde(default)]
    pub provider: Option<String>,
}
