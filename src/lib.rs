//! Data layer of the Silent Whistle moderation console.
//!
//! The console reads user profiles together with their paginated shout feeds
//! from the platform API. This crate owns the accumulated feed cache (replace
//! on page 1, id-deduplicated append on later pages, per-field scalar
//! overlay), the invalidation pathway fired by moderation actions, and the
//! typed gateway to the platform.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
