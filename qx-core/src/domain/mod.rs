//! Domain types shared by the client and CLI

pub mod backend;
pub mod credential;
pub mod status;

pub use backend::{BackendResolver, EndpointKind};
pub use credential::Credential;
pub use status::{StatusMap, WorkStatus};
