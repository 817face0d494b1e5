//! # Atrium Shared
//!
//! Wire-level types shared between the console gateway and the upstream
//! backend: the response envelope and the request/response DTOs.

pub mod dto;
pub mod envelope;

pub use envelope::{ApiError, ApiResult, Envelope, FieldError};
