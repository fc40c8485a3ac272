//! Domain types shared by the taskhub synchronization crates.
//!
//! This crate performs no I/O. It defines the canonical entities, the
//! [`Resource`](resource::Resource) read contract, the
//! [`SyncError`](error::SyncError) taxonomy, the role order used for
//! permission checks, and the [`AuthContext`](auth::AuthContext) session
//! handle.

pub mod auth;
pub mod error;
pub mod models;
pub mod resource;
pub mod roles;
pub mod types;
