//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod client;
mod query;
mod session;

pub use client::{AuthClient, ResourceClient};
pub use query::{CacheError, QueryCache};
pub use session::{SessionError, SessionStore};
