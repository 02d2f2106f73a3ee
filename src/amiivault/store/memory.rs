//! In-memory record store for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::AmiiboStore;
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::ident::validate_amiibo_id;
use crate::model::VirtualAmiibo;

/// Record store backed by a map. Behaves like [`super::fs::FileStore`]
/// minus the filesystem: same validation, same record lifecycle.
pub struct InMemoryStore {
    records: Mutex<HashMap<String, VirtualAmiibo>>,
    clock: Box<dyn Clock>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the clock used to stamp newly created records.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, VirtualAmiibo>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AmiiboStore for InMemoryStore {
    fn load(&self, amiibo_id: &str) -> Result<VirtualAmiibo> {
        validate_amiibo_id(amiibo_id)?;

        let mut records = self.lock();
        if let Some(record) = records.get(amiibo_id) {
            return Ok(record.clone());
        }

        let record = VirtualAmiibo::new(amiibo_id, self.clock.now());
        records.insert(amiibo_id.to_string(), record.clone());
        Ok(record)
    }

    fn save(&self, record: &VirtualAmiibo) -> Result<()> {
        validate_amiibo_id(&record.amiibo_id)?;
        self.lock().insert(record.amiibo_id.clone(), record.clone());
        Ok(())
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    //! Builders for store states used across the command tests.

    use super::*;
    use crate::clock::FixedClock;
    use crate::model::ApplicationArea;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new().with_clock(Box::new(FixedClock::default_instant())),
            }
        }

        /// Ensures a default record for `amiibo_id` exists.
        pub fn with_record(self, amiibo_id: &str) -> Self {
            self.store.load(amiibo_id).unwrap();
            self
        }

        /// Ensures a record for `amiibo_id` with one application area.
        pub fn with_area(self, amiibo_id: &str, area_id: u32, data: &[u8]) -> Self {
            let mut record = self.store.load(amiibo_id).unwrap();
            record.application_areas.push(ApplicationArea {
                id: area_id,
                data: data.to_vec(),
            });
            self.store.save(&record).unwrap();
            self
        }
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }
}
