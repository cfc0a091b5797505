//! Core data structures backing the eviction policies.
//!
//! All ordering state lives in arenas addressed by [`SlotId`] handles
//! rather than pointers, so removing one entry can never invalidate
//! another entry's locator.
//!
//! | Structure | Backs | Provides |
//! |-----------|-------|----------|
//! | [`SlotArena`] | everything | stable handles, free-list reuse |
//! | [`RecencyList`] | LRU | O(1) move-to-front / pop-back |
//! | [`FrequencyBuckets`] | LFU | O(1) bump / pop-min with LRU tie-break |
//! | [`ExpiryQueue`] | TTL | lazy-deletion deadline min-heap |

pub mod expiry_queue;
pub mod frequency_buckets;
pub mod recency_list;
pub mod slot_arena;

pub use expiry_queue::ExpiryQueue;
pub use frequency_buckets::FrequencyBuckets;
pub use recency_list::RecencyList;
pub use slot_arena::{SlotArena, SlotId};
