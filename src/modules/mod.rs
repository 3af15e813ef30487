//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the client for the managed backend (authentication, data store,
//! blob storage).

pub mod backend;
