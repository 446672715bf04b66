pub mod config;
pub mod modules;
pub mod shared;

pub use config::AppConfig;
pub use modules::aggregator::AggregatorService;
pub use shared::errors::{AppError, AppResult};
