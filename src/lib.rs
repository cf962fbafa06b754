//! Vetrina: a corporate site server with tag-driven cache invalidation
//! and optimistic list reordering for its admin surface.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod sync;
