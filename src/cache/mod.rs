//! Whistle Console Feed Cache
//!
//! A keyed, mergeable read-through cache for one user's profile plus their
//! paginated shout feed:
//!
//! - Entries are keyed by user id only; page and limit never enter the key.
//! - Page 1 responses **replace** the accumulated shout sequence; later pages
//!   **append** only shouts whose id has not been seen for that user.
//! - Scalar profile fields overlay per-field, so a partial response never
//!   clobbers previously accumulated state.
//! - Moderation actions (ban/warn/remove) publish events that invalidate the
//!   affected user's entry; the next read refetches and replaces wholesale.
//!
//! ## Configuration
//!
//! Cache behavior is controlled via `whistle.toml`:
//!
//! ```toml
//! [cache]
//! enable_feed_cache = true
//! feed_entry_limit = 200
//! consume_batch_limit = 100
//! ```

mod config;
mod consumer;
mod events;
mod keys;
mod lock;
mod merge;
mod planner;
mod store;
mod trigger;

pub use config::CacheConfig;
pub use consumer::CacheConsumer;
pub use events::{CacheEvent, Epoch, EventKind, EventQueue};
pub use keys::FeedKey;
pub use merge::{FeedEntry, MergeError, merge, should_refetch};
pub use planner::ConsumptionPlan;
pub use store::FeedStore;
pub use trigger::CacheTrigger;
