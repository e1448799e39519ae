//! The [`Facet`] trait: settings operations for host types that embed a
//! [`SettingsStore`].

use serde_json::{Map, Value};

use crate::error::Result;
use crate::store::SettingsStore;

/// Settings mixin for host types.
///
/// A host implements the two accessors and gains the full operation set,
/// delegated to its embedded store:
///
/// ```
/// use facet::{Facet, SettingsStore};
///
/// struct Server {
///     settings: SettingsStore,
/// }
///
/// impl Facet for Server {
///     fn settings(&self) -> &SettingsStore {
///         &self.settings
///     }
///     fn settings_mut(&mut self) -> &mut SettingsStore {
///         &mut self.settings
///     }
/// }
///
/// let mut server = Server { settings: SettingsStore::new() };
/// server.enable("tls")?;
/// assert!(server.enabled("tls"));
/// # Ok::<(), facet::Error>(())
/// ```
pub trait Facet {
	fn settings(&self) -> &SettingsStore;
	fn settings_mut(&mut self) -> &mut SettingsStore;

	/// Read the setting at `path`. See [`SettingsStore::get`].
	fn get(&self, path: &str) -> Option<&Value> {
		self.settings().get(path)
	}

	/// Write the setting at `path`, merging into an existing container
	/// there. See [`SettingsStore::set`].
	fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<&mut Self>
	where
		Self: Sized,
	{
		self.settings_mut().set(path, value)?;
		Ok(self)
	}

	/// Overwrite the setting at `path` without merging. See
	/// [`SettingsStore::set_forced`].
	fn set_forced(&mut self, path: &str, value: impl Into<Value>) -> Result<&mut Self>
	where
		Self: Sized,
	{
		self.settings_mut().set_forced(path, value)?;
		Ok(self)
	}

	/// Bulk write, one notification per entry. See [`SettingsStore::update`].
	fn update(&mut self, values: Map<String, Value>) -> Result<&mut Self>
	where
		Self: Sized,
	{
		self.settings_mut().update(values)?;
		Ok(self)
	}

	/// Discard and rebuild the whole store. See [`SettingsStore::replace`].
	fn replace(&mut self, value: Value) -> Result<&mut Self>
	where
		Self: Sized,
	{
		self.settings_mut().replace(value)?;
		Ok(self)
	}

	/// Mark `path` as enabled (`true`).
	fn enable(&mut self, path: &str) -> Result<&mut Self>
	where
		Self: Sized,
	{
		self.settings_mut().enable(path)?;
		Ok(self)
	}

	/// Mark `path` as disabled (`false`).
	fn disable(&mut self, path: &str) -> Result<&mut Self>
	where
		Self: Sized,
	{
		self.settings_mut().disable(path)?;
		Ok(self)
	}

	/// Whether the setting at `path` is truthy.
	fn enabled(&self, path: &str) -> bool {
		self.settings().enabled(path)
	}

	/// Whether the setting at `path` is falsy.
	fn disabled(&self, path: &str) -> bool {
		self.settings().disabled(path)
	}
}

// vim: ts=4
