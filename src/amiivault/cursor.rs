//! Opened-area cursor.
//!
//! At most one application area is "open" at a time, and that slot belongs
//! to the tag session rather than to any single record. The cursor models
//! that as a small shared handle: every clone points at the same slot, and
//! whichever handle set it last wins.

use std::sync::{Arc, Mutex, MutexGuard};

/// Shared single-slot cursor holding the currently opened application area
/// id. `Clone` hands out another handle to the same slot.
#[derive(Debug, Clone, Default)]
pub struct AreaCursor {
    slot: Arc<Mutex<Option<u32>>>,
}

impl AreaCursor {
    /// A cursor with nothing opened.
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the cursor at `area_id`.
    pub fn set(&self, area_id: u32) {
        *self.lock() = Some(area_id);
    }

    /// The currently opened area id, if any.
    pub fn get(&self) -> Option<u32> {
        *self.lock()
    }

    /// Forgets the opened area.
    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> MutexGuard<'_, Option<u32>> {
        // A poisoned slot still holds a coherent Option; keep going.
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}
