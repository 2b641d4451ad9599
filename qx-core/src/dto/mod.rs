//! Data transfer objects for the QX web API
//!
//! One module per endpoint group. Every response structure tolerates unknown
//! and missing fields: the platform adds fields without notice, so anything
//! not needed by the client is either optional or simply not modeled.

pub mod auth;
pub mod backend;
pub mod code;
pub mod execution;
pub mod job;
pub mod user;
