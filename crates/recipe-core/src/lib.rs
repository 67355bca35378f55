pub mod catalog;
pub mod engine;
pub mod error;
pub mod explore;
pub mod http;
pub mod localize;
pub mod mcp_api;
pub mod model;
pub mod scoring;
pub mod throttle;
pub mod translate;

#[cfg(test)]
pub(crate) mod testing;
