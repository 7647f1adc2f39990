//! Eviction policies.
//!
//! | Policy | Type                 | Evicts                                       |
//! |--------|----------------------|----------------------------------------------|
//! | LRU    | [`lru::LruCache`]    | least recently accessed entry                |
//! | LFU    | [`lfu::LfuCache`]    | lowest access count, least recent among ties |

pub mod lfu;
pub mod lru;
