//! Convenience re-exports for facet users.

pub use crate::error::{Error, Result};
pub use crate::host::Facet;
pub use crate::store::{ChangeHandle, SettingsStore, SettingsStoreBuilder};

// vim: ts=4
