//! HTTP answer oracle.

mod api;
mod client;
mod config;

pub use client::OracleClient;
pub use config::OracleConfig;
