use serde::{Deserialize, Serialize};
use std::fmt;

/// One upstream content origin queried independently.
///
/// The set is fixed today but designed to grow: everything downstream
/// iterates `AnimeSource::ALL` instead of naming sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AnimeSource {
    /// AnimeWorld - episode lists may be partitioned into seasons
    #[serde(rename = "AnimeWorld")]
    AnimeWorld,
    /// AnimeSaturn - flat episode lists
    #[serde(rename = "AnimeSaturn")]
    AnimeSaturn,
}

impl AnimeSource {
    /// All configured sources, in canonical fan-out order.
    pub const ALL: [AnimeSource; 2] = [AnimeSource::AnimeWorld, AnimeSource::AnimeSaturn];

    pub fn name(&self) -> &'static str {
        match self {
            AnimeSource::AnimeWorld => "AnimeWorld",
            AnimeSource::AnimeSaturn => "AnimeSaturn",
        }
    }
}

impl fmt::Display for AnimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
