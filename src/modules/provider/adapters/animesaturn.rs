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

/// Adapter for the AnimeSaturn catalog. Episode listings here are always a
/// flat sequence; the watch page carries the raw stream link.
pub struct AnimeSaturnClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
    search_item: Regex,
    episode_item: Regex,
    stream_link: Regex,
}

impl AnimeSaturnClient {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let client =
            CommonHttpHandler::create_http_client(config.request_timeout_secs, &config.user_agent)?;

        Ok(Self {
            client,
            base_url: config.animesaturn_base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(2.0),
            search_item: Regex::new(
                r#"<a[^>]+class="badge[^"]*"[^>]+href="[^"]*/anime/([^"?#]+)"[^>]*>([^<]+)</a>"#,
            )
            .expect("static regex"),
            episode_item: Regex::new(
                r#"<a[^>]+href="[^"]*/ep/([^"?#]+)"[^>]*>\s*Episodio\s+(\d+)"#,
            )
            .expect("static regex"),
            stream_link: Regex::new(r#"(https?://[^"'\s]+\.(?:m3u8|mp4)[^"'\s]*)"#)
                .expect("static regex"),
        })
    }

    fn parse_search(&self, body: &str) -> Vec<RawSearchItem> {
        self.search_item
            .captures_iter(body)
            .map(|cap| RawSearchItem {
                id: cap[1].to_string(),
                title: cap[2].trim().to_string(),
                url: Some(format!("{}/anime/{}", self.base_url, &cap[1])),
                poster: None,
            })
            .collect()
    }

    fn parse_episodes(&self, body: &str) -> Vec<RawEpisode> {
        self.episode_item
            .captures_iter(body)
            .filter_map(|cap| {
                let number = cap[2].parse().ok()?;
                Some(RawEpisode {
                    number,
                    id: cap[1].to_string(),
                    url: Some(format!("{}/ep/{}", self.base_url, &cap[1])),
                    stream_url: None,
                })
            })
            .collect()
    }

    fn parse_stream(&self, body: &str) -> RawStream {
        RawStream {
            stream_url: self.stream_link.captures(body).map(|cap| cap[1].to_string()),
            embed: None,
            provider: Some("AnimeSaturn".to_string()),
        }
    }
}

#[async_trait]
impl SourceClient for AnimeSaturnClient {
    fn source(&self) -> AnimeSource {
        AnimeSource::AnimeSaturn
    }

    async fn search(&self, query: &str) -> AppResult<Vec<RawSearchItem>> {
        self.rate_limiter.wait().await;

        let url = format!(
            "{}/animelist?search={}",
            self.base_url,
            urlencoding::encode(query.trim())
        );
        let body = CommonHttpHandler::fetch_text(&self.client, &url, "AnimeSaturn").await?;

        let results = self.parse_search(&body);
        debug!(
            "AnimeSaturn search '{}' found {} items",
            query,
            results.len()
        );
        Ok(results)
    }

    async fn get_episodes(&self, anime_id: &str) -> AppResult<EpisodeSheet> {
        self.rate_limiter.wait().await;

        let url = format!("{}/anime/{}", self.base_url, anime_id);
        let body = CommonHttpHandler::fetch_text(&self.client, &url, "AnimeSaturn").await?;

        Ok(EpisodeSheet::Flat(self.parse_episodes(&body)))
    }

    async fn get_stream_url(&self, episode_id: &str) -> AppResult<RawStream> {
        self.rate_limiter.wait().await;

        let url = format!("{}/watch?file={}", self.base_url, episode_id);
        let body = CommonHttpHandler::fetch_text(&self.client, &url, "AnimeSaturn").await?;

        Ok(self.parse_stream(&body))
    }
}
