use crate::modules::provider::AnimeSource;

/// Synthesizes player/embed markup for streams whose source did not supply
/// any. Must be a deterministic pure function of `(source, url)`; it is a
/// trait so deployments can swap the markup without touching the
/// reconciler.
pub trait EmbedTemplate: Send + Sync {
    fn render(&self, source: AnimeSource, url: &str) -> String;
}

/// Default templates: a plain iframe for AnimeWorld, and a proxied `<video>`
/// element for AnimeSaturn (its raw HLS links are not playable cross-origin
/// without the proxy).
pub struct DefaultEmbedTemplate {
    proxy_base_url: String,
}

impl DefaultEmbedTemplate {
    pub fn new(proxy_base_url: impl Into<String>) -> Self {
        Self {
            proxy_base_url: proxy_base_url.into(),
        }
    }
}

impl EmbedTemplate for DefaultEmbedTemplate {
    fn render(&self, source: AnimeSource, url: &str) -> String {
        match source {
            AnimeSource::AnimeWorld => format!(
                r#"<iframe src="{}" width="560" height="315" scrolling="no" frameborder="0" allowfullscreen></iframe>"#,
                url
            ),
            AnimeSource::AnimeSaturn => format!(
                r#"<video src="{}?url={}" class="w-full h-full" controls playsinline preload="metadata" autoplay></video>"#,
                self.proxy_base_url, url
            ),
        }
    }
}
