pub mod adapters;
pub mod domain;
pub mod traits;

// Re-exports for easy external access
pub use domain::{AnimeSource, EpisodeSheet, RawEpisode, RawSearchItem, RawStream};
pub use traits::SourceClient;
