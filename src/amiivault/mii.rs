//! Default persona (Mii) capability.
//!
//! Register info embeds a character record for the tag's owner. Building a
//! real one is a console-side concern well outside this crate, so the whole
//! subsystem is reduced to a capability trait that answers one question:
//! "give me a default persona".

use crate::clock::Clock;

/// Nickname carried by a freshly built persona before the caller's own
/// nickname is applied.
const DEFAULT_PERSONA_NICKNAME: &str = "no name";

/// A character record embedded in register info.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharInfo {
    /// Stable identity of the persona.
    pub create_id: u64,
    /// Display nickname. Register-info builders overwrite this with the
    /// caller-supplied value.
    pub nickname: String,
}

/// Produces default persona records.
pub trait MiiSource: Send + Sync {
    /// Builds the default persona, seeded from the clock and `seed`.
    fn build_default(&self, clock: &dyn Clock, seed: u32) -> CharInfo;
}

/// Stock persona source used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMiiSource;

impl MiiSource for DefaultMiiSource {
    fn build_default(&self, clock: &dyn Clock, seed: u32) -> CharInfo {
        let ticks = clock
            .now()
            .and_utc()
            .timestamp_nanos_opt()
            .unwrap_or_default() as u64;
        CharInfo {
            create_id: ticks ^ u64::from(seed),
            nickname: DEFAULT_PERSONA_NICKNAME.to_string(),
        }
    }
}
