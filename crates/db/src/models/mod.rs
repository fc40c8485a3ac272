//! Cache row structs.
//!
//! Each submodule contains a `FromRow` struct matching one table and its
//! conversion into the canonical entity from `taskhub_core::models`. Closed
//! enumerations are stored as text and decoded leniently.

pub mod bookmark;
pub mod comment;
pub mod media;
pub mod member;
pub mod project;
pub mod tag;
pub mod task;
pub mod user;
pub mod workspace;
