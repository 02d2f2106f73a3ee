//! Command layer: the tag operations, as free functions over a store.
//!
//! Everything here is pure business logic, generic over [`AmiiboStore`]
//! (plus the opened-area cursor where a tag session is involved). Terminal
//! formatting and argument plumbing stay in the binary; the embedding API
//! lives in [`crate::api`].
//!
//! [`AmiiboStore`]: crate::store::AmiiboStore

pub mod areas;
pub mod info;
pub mod uuid;
