use crate::shared::errors::{AppError, AppResult};
use std::time::Duration;

/// Shared HTTP plumbing for the source adapters.
pub struct CommonHttpHandler;

impl CommonHttpHandler {
    pub fn create_http_client(timeout_secs: u64, user_agent: &str) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::ProviderFailure(format!("Failed to create HTTP client: {}", e)))
    }

    /// GET a page and return its body, mapping non-success statuses into
    /// `ProviderFailure` so the coordinator can contain them.
    pub async fn fetch_text(
        client: &reqwest::Client,
        url: &str,
        source_name: &str,
    ) -> AppResult<String> {
        let response = client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ProviderFailure(format!(
                "{} returned HTTP {} for {}",
                source_name,
                response.status(),
                url
            )));
        }

        Ok(response.text().await?)
    }
}
