//! Application area operations.
//!
//! Reads and writes of area payloads go through the session-wide opened
//! cursor (see [`AreaCursor`]), mirroring how a physical tag session works:
//! open an area first, then read or write "the current one".

use crate::cursor::AreaCursor;
use crate::error::Result;
use crate::model::ApplicationArea;
use crate::store::AmiiboStore;

/// Opens area `area_id` on the record, pointing the session cursor at it.
///
/// Returns `false` and leaves the cursor untouched when the record has no
/// such area.
pub fn open<S: AmiiboStore>(
    store: &S,
    cursor: &AreaCursor,
    amiibo_id: &str,
    area_id: u32,
) -> Result<bool> {
    let record = store.load(amiibo_id)?;
    if !record.has_application_area(area_id) {
        return Ok(false);
    }
    cursor.set(area_id);
    Ok(true)
}

/// Payload of the area the cursor points at.
///
/// Empty bytes when the cursor is unset, and also when the record has no
/// matching area: the cursor is session-wide, so it may well have been set
/// while a different record was in front of the reader.
pub fn get_current<S: AmiiboStore>(
    store: &S,
    cursor: &AreaCursor,
    amiibo_id: &str,
) -> Result<Vec<u8>> {
    let record = store.load(amiibo_id)?;
    let Some(area_id) = cursor.get() else {
        return Ok(Vec::new());
    };
    Ok(record
        .application_area(area_id)
        .map(|area| area.data.clone())
        .unwrap_or_default())
}

/// Adds a new area to the record and persists it.
///
/// Returns `false` without writing anything when the id is already taken;
/// existing payloads are never clobbered by a create.
pub fn create<S: AmiiboStore>(
    store: &S,
    amiibo_id: &str,
    area_id: u32,
    data: Vec<u8>,
) -> Result<bool> {
    let mut record = store.load(amiibo_id)?;
    if record.has_application_area(area_id) {
        return Ok(false);
    }
    record.application_areas.push(ApplicationArea { id: area_id, data });
    store.save(&record)?;
    Ok(true)
}

/// Replaces the payload of the area the cursor points at and persists the
/// record.
///
/// A cursor that matches nothing on this record makes this a silent no-op.
/// That tolerance is part of the session contract: the host retries writes
/// and treats them as fire-and-forget.
pub fn set_current<S: AmiiboStore>(
    store: &S,
    cursor: &AreaCursor,
    amiibo_id: &str,
    data: &[u8],
) -> Result<()> {
    let mut record = store.load(amiibo_id)?;
    let Some(area_id) = cursor.get() else {
        return Ok(());
    };
    if let Some(area) = record
        .application_areas
        .iter_mut()
        .find(|area| area.id == area_id)
    {
        area.data = data.to_vec();
        store.save(&record)?;
    }
    Ok(())
}
