//! QX Core
//!
//! Core types and abstractions for the QX platform client.
//!
//! This crate contains:
//! - Domain types: credentials, status vocabulary, backend name resolution
//! - DTOs: typed request/response structures for the QX web API

pub mod domain;
pub mod dto;
