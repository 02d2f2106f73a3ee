//! File-backed record store.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::AmiiboStore;
use crate::clock::{Clock, SystemClock};
use crate::error::{Result, VaultError};
use crate::ident::validate_amiibo_id;
use crate::model::VirtualAmiibo;

/// Path of the storage root below the base directory.
const STORE_SUBPATH: [&str; 2] = ["system", "amiibo"];

/// Record store that keeps one pretty-printed JSON file per amiibo id
/// under `<base>/system/amiibo/`.
pub struct FileStore {
    base_dir: PathBuf,
    clock: Box<dyn Clock>,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            clock: Box::new(SystemClock),
        }
    }

    /// Replaces the clock used to stamp newly created records.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves (and creates, if missing) the storage root, proving that it
    /// still lives inside the base directory. A symlink planted at `system`
    /// or `amiibo` would otherwise redirect every record file at once.
    fn store_dir(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let base = self.base_dir.canonicalize()?;

        let dir = base.join(STORE_SUBPATH[0]).join(STORE_SUBPATH[1]);
        fs::create_dir_all(&dir)?;
        let dir = dir.canonicalize()?;

        if !dir.starts_with(&base) {
            return Err(VaultError::PathEscape { path: dir, root: base });
        }
        Ok(dir)
    }

    /// Validated, escape-checked path of the record file for `amiibo_id`.
    ///
    /// The directory and the file are checked independently: the first
    /// check catches a redirected storage root, the second a record file
    /// that is itself a link pointing out of the root.
    pub fn record_path(&self, amiibo_id: &str) -> Result<PathBuf> {
        validate_amiibo_id(amiibo_id)?;
        let dir = self.store_dir()?;

        let path = dir.join(format!("{amiibo_id}.json"));
        let resolved = if path.exists() { path.canonicalize()? } else { path };
        if resolved.parent() != Some(dir.as_path()) || !resolved.starts_with(&dir) {
            return Err(VaultError::PathEscape {
                path: resolved,
                root: dir,
            });
        }
        Ok(resolved)
    }

    /// Identifiers of every record currently in the store, sorted.
    pub fn list_ids(&self) -> Result<Vec<String>> {
        let dir = self.store_dir()?;
        let mut ids = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl AmiiboStore for FileStore {
    fn load(&self, amiibo_id: &str) -> Result<VirtualAmiibo> {
        let path = self.record_path(amiibo_id)?;

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            return serde_json::from_str(&content)
                .map_err(|source| VaultError::Corrupt { path, source });
        }

        let record = VirtualAmiibo::new(amiibo_id, self.clock.now());
        self.save(&record)?;
        Ok(record)
    }

    fn save(&self, record: &VirtualAmiibo) -> Result<()> {
        let path = self.record_path(&record.amiibo_id)?;
        let content = serde_json::to_string_pretty(record).map_err(|source| VaultError::Corrupt {
            path: path.clone(),
            source,
        })?;

        // Write-then-rename so a failed save never leaves half a record.
        let tmp_file = path.with_file_name(format!(".{}-{}.tmp", record.amiibo_id, Uuid::new_v4()));
        fs::write(&tmp_file, content)?;
        fs::rename(&tmp_file, &path)?;

        Ok(())
    }
}
