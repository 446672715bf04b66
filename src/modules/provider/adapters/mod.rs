pub mod animesaturn;
pub mod animeworld;
pub mod common;

pub use animesaturn::AnimeSaturnClient;
pub use animeworld::AnimeWorldClient;
