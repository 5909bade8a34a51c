//! HTTP client plumbing for the recipe source.
//!
//! Outgoing GETs go through [`HttpClient`] so the recipe adapter can be
//! tested against [`MockClient`] and so production traffic shares one
//! connection pool and one response cache.

mod cache;
mod client;

pub use cache::{CacheStats, ResponseCache};
pub use client::{CachingClient, CachingClientBuilder, HttpClient, MockClient, MockResponse};
