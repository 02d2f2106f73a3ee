//! # Embedding API
//!
//! [`VaultApi`] is the single entry point a host emulation layer talks to.
//! It owns the tag session state (the opened-area cursor) and the injected
//! capabilities (clock, persona source) and dispatches into the command
//! layer; it adds no business logic of its own.
//!
//! ```no_run
//! use amiivault::api::VaultApi;
//! use amiivault::store::fs::FileStore;
//!
//! let api = VaultApi::new(FileStore::new("/path/to/data"));
//! let uuid = api.generate_uuid("01000000000c0002", false)?;
//! # Ok::<(), amiivault::error::VaultError>(())
//! ```

use crate::clock::{Clock, SystemClock};
use crate::commands;
use crate::cursor::AreaCursor;
use crate::error::Result;
use crate::mii::{DefaultMiiSource, MiiSource};
use crate::model::{CommonInfo, RegisterInfo};
use crate::store::AmiiboStore;

/// Facade over a record store plus one tag session.
///
/// Generic over the storage backend: production wires a
/// [`FileStore`](crate::store::fs::FileStore), tests an
/// [`InMemoryStore`](crate::store::memory::InMemoryStore).
pub struct VaultApi<S: AmiiboStore> {
    store: S,
    cursor: AreaCursor,
    clock: Box<dyn Clock>,
    mii: Box<dyn MiiSource>,
}

impl<S: AmiiboStore> VaultApi<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cursor: AreaCursor::new(),
            clock: Box::new(SystemClock),
            mii: Box::new(DefaultMiiSource),
        }
    }

    /// Replaces the clock capability.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the persona capability.
    pub fn with_mii_source(mut self, mii: Box<dyn MiiSource>) -> Self {
        self.mii = mii;
        self
    }

    /// Shares an externally owned cursor. Hosts juggling several views of
    /// one tag session hand the same cursor to each of them.
    pub fn with_cursor(mut self, cursor: AreaCursor) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cursor(&self) -> &AreaCursor {
        &self.cursor
    }

    /// Tag UUID for the record; random mode skips persistence entirely.
    pub fn generate_uuid(&self, amiibo_id: &str, use_random: bool) -> Result<Vec<u8>> {
        commands::uuid::generate(&self.store, amiibo_id, use_random)
    }

    /// Tag metadata snapshot for the record.
    pub fn get_common_info(&self, amiibo_id: &str) -> Result<CommonInfo> {
        commands::info::common(&self.store, amiibo_id)
    }

    /// Console registration info with `nickname` on the persona.
    pub fn get_register_info(&self, amiibo_id: &str, nickname: &str) -> Result<RegisterInfo> {
        commands::info::register(
            &self.store,
            self.clock.as_ref(),
            self.mii.as_ref(),
            amiibo_id,
            nickname,
        )
    }

    /// Opens an application area; `false` means the record has no such area.
    pub fn open_application_area(&self, amiibo_id: &str, area_id: u32) -> Result<bool> {
        commands::areas::open(&self.store, &self.cursor, amiibo_id, area_id)
    }

    /// Payload of the currently opened area (empty when none applies).
    pub fn get_application_area(&self, amiibo_id: &str) -> Result<Vec<u8>> {
        commands::areas::get_current(&self.store, &self.cursor, amiibo_id)
    }

    /// Creates a new area; `false` means the id was already taken.
    pub fn create_application_area(
        &self,
        amiibo_id: &str,
        area_id: u32,
        data: Vec<u8>,
    ) -> Result<bool> {
        commands::areas::create(&self.store, amiibo_id, area_id, data)
    }

    /// Replaces the currently opened area's payload (no-op when none
    /// applies).
    pub fn set_application_area(&self, amiibo_id: &str, data: &[u8]) -> Result<()> {
        commands::areas::set_current(&self.store, &self.cursor, amiibo_id, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::memory::InMemoryStore;
    use crate::tag_uuid::{self, TAG_UUID_SIZE};

    fn test_api() -> VaultApi<InMemoryStore> {
        VaultApi::new(
            InMemoryStore::new().with_clock(Box::new(FixedClock::default_instant())),
        )
        .with_clock(Box::new(FixedClock::default_instant()))
    }

    #[test]
    fn fresh_identifier_full_session() {
        let api = test_api();

        // First touch materializes the default record.
        let info = api.get_common_info("abc123").unwrap();
        assert_eq!(info.write_counter, 0);
        let record = api.store().load("abc123").unwrap();
        assert!(record.tag_uuid.is_empty());
        assert!(record.application_areas.is_empty());

        // UUID assignment is persistent and idempotent.
        let uuid = api.generate_uuid("abc123", false).unwrap();
        assert_eq!(uuid.len(), TAG_UUID_SIZE);
        assert!(tag_uuid::is_well_formed(&uuid));
        assert_eq!(api.generate_uuid("abc123", false).unwrap(), uuid);
        assert_eq!(api.store().load("abc123").unwrap().tag_uuid, uuid);

        // Area session: create, open, read, write, read back.
        assert!(api.create_application_area("abc123", 0x5A, vec![1, 2]).unwrap());
        assert!(api.open_application_area("abc123", 0x5A).unwrap());
        assert_eq!(api.cursor().get(), Some(0x5A));
        assert_eq!(api.get_application_area("abc123").unwrap(), vec![1, 2]);
        api.set_application_area("abc123", &[3, 4, 5]).unwrap();
        assert_eq!(api.get_application_area("abc123").unwrap(), vec![3, 4, 5]);
    }

    #[test]
    fn register_info_goes_through_the_injected_capabilities() {
        let api = test_api();
        let info = api.get_register_info("abc123", "Peach").unwrap();
        assert_eq!(info.mii.nickname, "Peach");
        assert_eq!(info.first_write_year, 2024);
    }

    #[test]
    fn an_external_cursor_is_shared_with_the_api() {
        let cursor = AreaCursor::new();
        let api = test_api().with_cursor(cursor.clone());

        assert!(api.create_application_area("abc123", 9, vec![7]).unwrap());
        assert!(api.open_application_area("abc123", 9).unwrap());
        assert_eq!(cursor.get(), Some(9));

        cursor.clear();
        assert!(api.get_application_area("abc123").unwrap().is_empty());
    }
}
