//! Facet is a small settings-storage library.
//!
//! # Features
//!
//! - Nested key/value store over `serde_json::Value`
//!     - lazily created on first write, owned by the host
//!     - deep-path addressing (`"server.listen[0].port"`)
//! - Merge-on-write
//!     - writing over an existing container deep-merges, new values win
//!     - forced writes and whole-store replacement skip the merge
//!     - structural conflicts surface as [`Error::MergeConflict`]
//! - Change notification
//!     - one callback invocation per discrete path write, never for reads
//! - Host integration
//!     - the [`Facet`] trait gives any type holding a [`SettingsStore`]
//!       the full operation set
//!
//! Path access and deep merge live in the companion crates `facet-path`
//! and `facet-merge`.

#![forbid(unsafe_code)]

mod error;
mod host;
mod store;

pub mod prelude;

pub use error::{Error, Result};
pub use host::Facet;
pub use store::{ChangeHandle, SettingsStore, SettingsStoreBuilder};

// Re-exported so callers can inspect merge conflicts without naming the
// collaborator crate.
pub use facet_merge::MergeError;

// vim: ts=4
