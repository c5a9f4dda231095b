//! Stats provider implementations.

mod http;

pub use http::HttpStatsProvider;
