//! # Atrium Core
//!
//! The domain layer of the console gateway: session token, route
//! classification, the auth-gate decision function, and the ports that
//! infrastructure implements. No I/O and no framework types live here.

pub mod domain;
pub mod ports;

pub use domain::gate::{AuthGate, GateVerdict};
pub use domain::routes::{RouteClass, RouteTable, RouteTableError};
pub use domain::token::SessionToken;
