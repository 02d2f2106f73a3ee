//! Tag UUID assignment.

use crate::error::Result;
use crate::store::AmiiboStore;
use crate::tag_uuid;

/// Returns the tag UUID for `amiibo_id`.
///
/// With `use_random` set, a fresh UUID is handed out every call and the
/// record is never touched. Otherwise the record's UUID is assigned and
/// persisted on first use, then returned unchanged forever after, even if
/// the stored bytes would not pass today's well-formedness check.
pub fn generate<S: AmiiboStore>(store: &S, amiibo_id: &str, use_random: bool) -> Result<Vec<u8>> {
    if use_random {
        return Ok(tag_uuid::generate().to_vec());
    }

    let mut record = store.load(amiibo_id)?;
    if record.tag_uuid.is_empty() {
        record.tag_uuid = tag_uuid::generate().to_vec();
        store.save(&record)?;
    }

    Ok(record.tag_uuid)
}
