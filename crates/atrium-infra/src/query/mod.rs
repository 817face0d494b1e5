//! Cache-keyed query layer.
//!
//! The Rust rendition of the console's data hooks: a stable cache key bound
//! to a fetch function, with TTL caching and per-key request coalescing.

mod client;
mod memory;

pub use client::QueryClient;
pub use memory::InMemoryQueryCache;
