use crate::config::AppConfig;
use crate::modules::provider::adapters::common::CommonHttpHandler;
use crate::modules::provider::domain::{AnimeSource, EpisodeSheet, RawEpisode, RawSearchItem, RawStream};
use crate::modules::provider::traits::SourceClient;
use crate::shared::errors::AppResult;
use crate::shared::utils::RateLimiter;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::debug;

/// Adapter for the AnimeWorld catalog.
///
/// Extraction is deliberately minimal: a handful of regex captures over the
/// returned pages. The core never sees this module, only `SourceClient`.
pub struct AnimeWorldClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    search_item: Regex,
    episode_item: Regex,
    stream_source: Regex,
}

impl AnimeWorldClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client =
            CommonHttpHandler::create_http_client(config.request_timeout_secs, &config.user_agent)?;

        Ok(Self {
            client,
            base_url: config.animeworld_base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(2.0),
            search_item: Regex::new(r#"<a[^>]+href="/play/([^"?#]+)"[^>]*class="name"[^>]*>([^<]+)</a>"#)
                .expect("static regex"),
            episode_item: Regex::new(
                r#"<li[^>]*class="episode"[^>]*>\s*<a[^>]+data-id="([^"]+)"[^>]+href="([^"]+)"[^>]*>\s*(\d+)"#,
            )
            .expect("static regex"),
            stream_source: Regex::new(r#"<source[^>]+src="([^"]+)""#).expect("static regex"),
        })
    }

    fn parse_search(&self, body: &str) -> Vec<RawSearchItem> {
        self.search_item
            .captures_iter(body)
            .map(|cap| RawSearchItem {
                id: cap[1].to_string(),
                title: cap[2].trim().to_string(),
                url: Some(format!("{}/play/{}", self.base_url, &cap[1])),
                poster: None,
            })
            .collect()
    }

    fn parse_episodes(&self, body: &str) -> Vec<RawEpisode> {
        self.episode_item
            .captures_iter(body)
            .filter_map(|cap| {
                let number = cap[3].parse().ok()?;
                Some(RawEpisode {
                    number,
                    id: cap[1].to_string(),
                    url: Some(format!("{}{}", self.base_url, &cap[2])),
                    stream_url: None,
                })
            })
            .collect()
    }

    fn parse_stream(&self, body: &str) -> RawStream {
        RawStream {
            stream_url: self
                .stream_source
                .captures(body)
                .map(|cap| cap[1].to_string()),
            embed: None,
            provider: Some("AnimeWorld".to_string()),
        }
    }
}

#[async_trait]
impl SourceClient for AnimeWorldClient {
    fn source(&self) -> AnimeSource {
        AnimeSource::AnimeWorld
    }

    async fn search(&self, query: &str) -> AppResult<Vec<RawSearchItem>> {
        self.rate_limiter.wait().await;

        let url = format!(
            "{}/search?keyword={}",
            self.base_url,
            urlencoding::encode(query.trim())
        );
        let body = CommonHttpHandler::fetch_text(&self.client, &url, "AnimeWorld").await?;

        let results = self.parse_search(&body);
        debug!("AnimeWorld search '{}' found {} items", query, results.len());
        Ok(results)
    }

    async fn get_episodes(&self, anime_id: &str) -> AppResult<EpisodeSheet> {
        self.rate_limiter.wait().await;

        let url = format!("{}/play/{}", self.base_url, anime_id);
        let body = CommonHttpHandler::fetch_text(&self.client, &url, "AnimeWorld").await?;

        Ok(EpisodeSheet::Flat(self.parse_episodes(&body)))
    }

    async fn get_stream_url(&self, episode_id: &str) -> AppResult<RawStream> {
        self.rate_limiter.wait().await;

        let url = format!("{}/api/episode/info?id={}", self.base_url, episode_id);
        let body = CommonHttpHandler::fetch_text(&self.client, &url, "AnimeWorld").await?;

        // The episode endpoint answers JSON with a grabber link; fall back to
        // scanning for a <source> tag when it does not.
        if let Ok(info) = serde_json::from_str::<serde_json::Value>(&body) {
            if let Some(grabber) = info.get("grabber").and_then(|v| v.as_str()) {
                return Ok(RawStream {
                    stream_url: Some(grabber.to_string()),
                    embed: None,
                    provider: Some("AnimeWorld".to_string()),
                });
            }
        }

        Ok(self.parse_stream(&body))
    }
}
