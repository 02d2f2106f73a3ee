//! # Storage layer
//!
//! [`AmiiboStore`] abstracts record persistence so command logic can be
//! exercised against [`memory::InMemoryStore`] without touching a disk,
//! while [`fs::FileStore`] is the production backend.
//!
//! ## Storage layout
//!
//! ```text
//! <base>/
//! ├── config.json            # CLI configuration
//! └── system/
//!     └── amiibo/            # the storage root
//!         ├── <amiibo-id>.json
//!         └── ...
//! ```
//!
//! ## Access rules
//!
//! Amiibo ids arrive from outside the trust boundary and become file names,
//! so every operation validates the id first, and the file store proves the
//! resolved path still lives inside the storage root before touching it.
//!
//! Loading an id with no backing record creates and persists the default
//! record. Every load re-reads from storage and every save rewrites the
//! whole record; nothing is cached in between.
//!
//! Nothing here serializes concurrent load-modify-save sequences on one
//! identifier: the last save wins. Callers needing atomicity hold their own
//! lock for the whole span.

use crate::error::Result;
use crate::model::VirtualAmiibo;

pub mod fs;
pub mod memory;

/// Abstract interface for record persistence.
pub trait AmiiboStore {
    /// Loads the record for `amiibo_id`, creating and persisting the
    /// default record on first access.
    fn load(&self, amiibo_id: &str) -> Result<VirtualAmiibo>;

    /// Persists the full record, overwriting any previous contents.
    fn save(&self, record: &VirtualAmiibo) -> Result<()>;
}
