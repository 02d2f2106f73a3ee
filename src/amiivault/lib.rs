//! # amiivault
//!
//! A file-backed store for virtual amiibo (NFC tag) records, built for
//! emulators that answer NFP requests without physical hardware.
//!
//! Each amiibo identifier owns one pretty-printed JSON record holding the
//! tag UUID, write dates, a write counter, and any application areas a
//! game has created on it. Records materialize on first access and live
//! under `<base>/system/amiibo/<id>.json`.
//!
//! ## Architecture
//!
//! The crate is built lib-first: the binary is a thin veneer over the same
//! API an emulator embeds.
//!
//! ```text
//! main.rs / args.rs          CLI parsing and terminal output
//!        │
//!        ▼
//! api::VaultApi              facade owning session state + capabilities
//!        │
//!        ▼
//! commands::{uuid,info,areas}   business logic, generic over the store
//!        │
//!        ▼
//! store::{fs,memory}         persistence behind the AmiiboStore trait
//! ```
//!
//! Three details carry most of the design weight:
//!
//! - **Identifiers are hostile input.** An amiibo id becomes a file name,
//!   so [`ident`] validates it before any state is touched and
//!   [`store::fs`] additionally proves the resolved path never leaves the
//!   storage root, even through symlinks.
//! - **The opened area is session state, not record state.** A tag reader
//!   has one "current area" slot no matter how many tags pass over it;
//!   [`cursor::AreaCursor`] models that slot as a shared handle the host
//!   can inject.
//! - **Time and personas are capabilities.** [`clock::Clock`] and
//!   [`mii::MiiSource`] are injected so every derived value is testable
//!   against pinned inputs.

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod cursor;
pub mod error;
pub mod ident;
pub mod mii;
pub mod model;
pub mod store;
pub mod tag_uuid;
