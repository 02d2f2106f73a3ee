//! Derived tag metadata: common info and register info.

use crate::clock::Clock;
use crate::error::Result;
use crate::mii::MiiSource;
use crate::model::{CommonInfo, RegisterInfo};
use crate::store::AmiiboStore;

/// Derives the tag metadata snapshot for `amiibo_id`.
pub fn common<S: AmiiboStore>(store: &S, amiibo_id: &str) -> Result<CommonInfo> {
    let record = store.load(amiibo_id)?;
    Ok(CommonInfo::from_record(&record))
}

/// Builds console registration info for `amiibo_id`.
///
/// `nickname` lands on the embedded persona; the record-level nickname
/// buffer always carries the brand literal (see [`RegisterInfo`]).
pub fn register<S: AmiiboStore>(
    store: &S,
    clock: &dyn Clock,
    mii: &dyn MiiSource,
    amiibo_id: &str,
    nickname: &str,
) -> Result<RegisterInfo> {
    let record = store.load(amiibo_id)?;

    let mut char_info = mii.build_default(clock, 0);
    char_info.nickname = nickname.to_string();

    Ok(RegisterInfo::new(char_info, &record))
}
