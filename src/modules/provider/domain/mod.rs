pub mod raw;
pub mod source;

pub use raw::{EpisodeSheet, RawEpisode, RawSearchItem, RawStream};
pub use source::AnimeSource;
