use std::env;

/// Process configuration, loaded once at startup from the environment
/// (with `.env` support via dotenvy in `main`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP surface binds to
    pub bind_addr: String,
    pub animeworld_base_url: String,
    pub animesaturn_base_url: String,
    /// Per-request timeout applied to upstream calls, in seconds
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Base URL of the stream proxy used when synthesizing embed markup
    pub stream_proxy_url: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("ANIMERGE_BIND_ADDR", "0.0.0.0:8000"),
            animeworld_base_url: env_or("ANIMERGE_ANIMEWORLD_URL", "https://www.animeworld.so"),
            animesaturn_base_url: env_or("ANIMERGE_ANIMESATURN_URL", "https://www.animesaturn.in"),
            request_timeout_secs: env::var("ANIMERGE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            user_agent: env_or("ANIMERGE_USER_AGENT", "animerge/1.0"),
            stream_proxy_url: env_or(
                "ANIMERGE_STREAM_PROXY",
                "https://animesaturn-proxy.onrender.com/proxy",
            ),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
