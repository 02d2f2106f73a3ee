//! Core data structures for virtual amiibo records.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::mii::CharInfo;

/// Capacity advertised for a single application area, in bytes.
pub const APPLICATION_AREA_SIZE: usize = 216;

/// Size of the owner nickname buffer inside [`RegisterInfo`].
pub const REGISTER_NICKNAME_SIZE: usize = 41;

/// Brand literal stamped over the head of the register-info nickname
/// buffer on every build. Intentional output, not a placeholder.
pub(crate) const REGISTER_NICKNAME_BRAND: &[u8] = b"amiivault";

/// One persisted virtual amiibo record.
///
/// The serde renames pin the on-disk JSON field names; record files written
/// by earlier versions and by other frontends must keep loading unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VirtualAmiibo {
    /// Record format version. New records start at 0.
    pub file_version: u8,

    /// The 9-byte tag UUID, or empty while none has been assigned yet.
    pub tag_uuid: Vec<u8>,

    /// The identifier this record belongs to. Doubles as the file stem.
    pub amiibo_id: String,

    /// When the record was first created. Naive local time, no offset.
    pub first_write_date: NaiveDateTime,

    /// When the record was last committed by a counted write.
    pub last_write_date: NaiveDateTime,

    /// Number of counted writes. Monotonic, saturating at `u16::MAX`.
    pub write_counter: u16,

    /// Vendor-defined data partitions keyed by area id.
    pub application_areas: Vec<ApplicationArea>,
}

impl VirtualAmiibo {
    /// The default record shape for an identifier seen for the first time:
    /// version 0, no UUID, no areas, both dates set to `now`.
    pub fn new(amiibo_id: impl Into<String>, now: NaiveDateTime) -> Self {
        Self {
            file_version: 0,
            tag_uuid: Vec::new(),
            amiibo_id: amiibo_id.into(),
            first_write_date: now,
            last_write_date: now,
            write_counter: 0,
            application_areas: Vec::new(),
        }
    }

    /// Looks up an application area by id.
    pub fn application_area(&self, area_id: u32) -> Option<&ApplicationArea> {
        self.application_areas.iter().find(|area| area.id == area_id)
    }

    /// Whether an area with the given id exists on this record.
    pub fn has_application_area(&self, area_id: u32) -> bool {
        self.application_area(area_id).is_some()
    }

    /// Records a counted write: bumps the write counter and refreshes the
    /// last-write date. Callers decide which operations count; plain area
    /// edits do not bump anything on their own.
    pub fn mark_written(&mut self, now: NaiveDateTime) {
        self.write_counter = self.write_counter.saturating_add(1);
        self.last_write_date = now;
    }
}

/// A vendor-defined data partition within a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationArea {
    #[serde(rename = "ApplicationAreaId")]
    pub id: u32,

    #[serde(rename = "ApplicationArea")]
    pub data: Vec<u8>,
}

/// Tag metadata snapshot derived from a record at read time. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonInfo {
    pub last_write_year: u16,
    pub last_write_month: u8,
    pub last_write_day: u8,
    pub write_counter: u16,
    pub version: u16,
    pub application_area_size: u32,
    pub reserved: [u8; 52],
}

impl CommonInfo {
    pub fn from_record(record: &VirtualAmiibo) -> Self {
        Self {
            last_write_year: record.last_write_date.year() as u16,
            last_write_month: record.last_write_date.month() as u8,
            last_write_day: record.last_write_date.day() as u8,
            write_counter: record.write_counter,
            // Info version is 1 even though records start at file version 0.
            version: 1,
            application_area_size: APPLICATION_AREA_SIZE as u32,
            reserved: [0; 52],
        }
    }
}

/// Console registration info derived from a record. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInfo {
    pub mii: CharInfo,
    pub first_write_year: u16,
    pub first_write_month: u8,
    pub first_write_day: u8,

    /// Fixed-size owner nickname buffer. The head always carries the brand
    /// literal; the caller-facing nickname lives in [`CharInfo::nickname`].
    pub amiibo_nickname: [u8; REGISTER_NICKNAME_SIZE],

    pub font_region: u8,
    pub reserved1: [u8; 64],
    pub reserved2: [u8; 58],
}

impl RegisterInfo {
    pub fn new(mii: CharInfo, record: &VirtualAmiibo) -> Self {
        let mut amiibo_nickname = [0u8; REGISTER_NICKNAME_SIZE];
        amiibo_nickname[..REGISTER_NICKNAME_BRAND.len()].copy_from_slice(REGISTER_NICKNAME_BRAND);

        Self {
            mii,
            first_write_year: record.first_write_date.year() as u16,
            first_write_month: record.first_write_date.month() as u8,
            first_write_day: record.first_write_date.day() as u8,
            amiibo_nickname,
            font_region: 0,
            reserved1: [0; 64],
            reserved2: [0; 58],
        }
    }

    /// The printable part of the nickname buffer (everything before the
    /// first NUL).
    pub fn nickname_str(&self) -> &str {
        let end = self
            .amiibo_nickname
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(REGISTER_NICKNAME_SIZE);
        std::str::from_utf8(&self.amiibo_nickname[..end]).unwrap_or("")
    }
}
