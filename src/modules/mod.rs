pub mod aggregator;
pub mod api;
pub mod provider;
