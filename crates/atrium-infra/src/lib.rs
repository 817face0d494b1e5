//! # Atrium Infrastructure
//!
//! Concrete implementations of the ports defined in `atrium-core`:
//! the in-memory session store, the upstream REST client, and the
//! cache-backed query layer.

pub mod client;
pub mod query;
pub mod session;

pub use client::{RestClient, RestClientConfig, RestResource};
pub use query::{InMemoryQueryCache, QueryClient};
pub use session::MemorySessionStore;
