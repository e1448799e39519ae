//! The settings store: a lazily created nested value tree with
//! merge-on-write semantics and per-write change notification.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Change notification callback, invoked once per discrete path write with
/// `(path, written_value)`. The written value is the value that actually
/// landed in the store, i.e. the merged result when a merge took place.
pub type ChangeHandle = Box<dyn FnMut(&str, &Value) + Send>;

const DEFAULT_STORE_KEY: &str = "settings";

/// Nested key/value settings storage.
///
/// The store root is created lazily on the first write; reads on a fresh
/// store return `None` without allocating. Writes address locations by
/// dotted/bracketed path (`"server.listen[0].port"`) and merge into an
/// existing container at the same path unless forced.
///
/// ```
/// use facet::SettingsStore;
/// use serde_json::json;
///
/// let mut store = SettingsStore::new();
/// store.set("theme.name", "dark")?.set("theme.contrast", 7)?;
/// assert_eq!(store.get("theme"), Some(&json!({"name": "dark", "contrast": 7})));
/// # Ok::<(), facet::Error>(())
/// ```
pub struct SettingsStore {
	store_key: String,
	handle: Option<ChangeHandle>,
	data: Option<Value>,
}

impl std::fmt::Debug for SettingsStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsStore")
			.field("store_key", &self.store_key)
			.field("handle", &self.handle.is_some())
			.field("data", &self.data)
			.finish()
	}
}

impl Default for SettingsStore {
	fn default() -> Self {
		Self::new()
	}
}

impl SettingsStore {
	/// Create a store with the default store key (`"settings"`) and no
	/// change handle.
	pub fn new() -> Self {
		Self { store_key: DEFAULT_STORE_KEY.to_string(), handle: None, data: None }
	}

	/// Start building a store with a custom store key and/or change handle.
	pub fn builder() -> SettingsStoreBuilder {
		SettingsStoreBuilder::default()
	}

	/// The configured name under which the store is exported or embedded.
	pub fn store_key(&self) -> &str {
		&self.store_key
	}

	/// Borrow the store root, if any write has created it yet.
	pub fn data(&self) -> Option<&Value> {
		self.data.as_ref()
	}

	/// Read the value at `path`. Absence is `None`, never an error, and
	/// reading never creates the store.
	pub fn get(&self, path: &str) -> Option<&Value> {
		facet_path::get(self.data.as_ref()?, path)
	}

	/// Write `value` at `path`.
	///
	/// If a value already exists at `path` and is a container (object or
	/// array), the incoming value is deep-merged into it (incoming wins on
	/// conflicting leaves) and the merged result is stored; a structurally
	/// impossible merge is an [`Error::MergeConflict`]. Otherwise the
	/// incoming value is stored as-is. The path must contain at least one
	/// segment. Notifies the change handle once.
	pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<&mut Self> {
		self.write(path, value.into(), false)
	}

	/// Write `value` at `path`, overwriting whatever is there without
	/// attempting a merge. Notifies the change handle once.
	pub fn set_forced(&mut self, path: &str, value: impl Into<Value>) -> Result<&mut Self> {
		self.write(path, value.into(), true)
	}

	/// Bulk write: perform the [`set`](Self::set) path-write for every
	/// entry of `values`, in iteration order. The change handle fires once
	/// per entry. Stops at the first merge conflict.
	pub fn update(&mut self, values: Map<String, Value>) -> Result<&mut Self> {
		for (path, value) in values {
			self.write(&path, value, false)?;
		}
		Ok(self)
	}

	/// Discard the store entirely and replace it with a fresh copy of
	/// `value`, which must be an object or an array. Bulk structural
	/// replacement is not itemized: the change handle does not fire.
	pub fn replace(&mut self, value: Value) -> Result<&mut Self> {
		let empty = match &value {
			Value::Array(_) => Value::Array(Vec::new()),
			Value::Object(_) => Value::Object(Map::new()),
			other => {
				return Err(Error::InvalidOptions(format!(
					"the store can only be replaced with an object or array, got {}",
					value_kind(other)
				)));
			}
		};
		let fresh = facet_merge::merge(&empty, &value)
			.map_err(|source| Error::MergeConflict { path: String::new(), source })?;
		debug!(store_key = %self.store_key, "settings store replaced");
		self.data = Some(fresh);
		Ok(self)
	}

	/// Mark `path` as enabled (`true`). Boolean writes never merge into an
	/// existing structured value, so this always overwrites.
	pub fn enable(&mut self, path: &str) -> Result<&mut Self> {
		self.set_forced(path, true)
	}

	/// Mark `path` as disabled (`false`).
	pub fn disable(&mut self, path: &str) -> Result<&mut Self> {
		self.set_forced(path, false)
	}

	/// Whether the setting at `path` is truthy. Absent, `null`, `false`,
	/// zero, and empty-string settings are all falsy.
	pub fn enabled(&self, path: &str) -> bool {
		self.get(path).is_some_and(is_truthy)
	}

	/// Whether the setting at `path` is falsy. The negation of
	/// [`enabled`](Self::enabled): an untouched key is disabled.
	pub fn disabled(&self, path: &str) -> bool {
		!self.enabled(path)
	}

	/// The store wrapped in an object under its configured store key, for
	/// embedding into a host document. A store that has never been written
	/// exports an empty object.
	pub fn export(&self) -> Value {
		let data = self.data.clone().unwrap_or_else(|| Value::Object(Map::new()));
		let mut wrapper = Map::new();
		wrapper.insert(self.store_key.clone(), data);
		Value::Object(wrapper)
	}

	fn write(&mut self, path: &str, value: Value, force: bool) -> Result<&mut Self> {
		if facet_path::Path::parse(path).is_empty() {
			return Err(Error::InvalidOptions(
				"a write path must contain at least one segment".to_string(),
			));
		}

		let value = if force {
			value
		} else {
			match self.get(path) {
				Some(existing @ (Value::Object(_) | Value::Array(_))) => {
					facet_merge::merge(existing, &value)
						.map_err(|source| Error::MergeConflict { path: path.to_string(), source })?
				}
				_ => value,
			}
		};

		let root = self.data.get_or_insert_with(|| Value::Object(Map::new()));
		facet_path::set(root, path, value);
		debug!(path, store_key = %self.store_key, "setting written");

		if let Some(handle) = self.handle.as_mut() {
			if let Some(written) = self.data.as_ref().and_then(|root| facet_path::get(root, path)) {
				handle(path, written);
			}
		}

		Ok(self)
	}
}

/// Builder for [`SettingsStore`]: configures the store key and the change
/// handle before any data exists.
#[derive(Default)]
pub struct SettingsStoreBuilder {
	store_key: Option<String>,
	handle: Option<ChangeHandle>,
}

impl std::fmt::Debug for SettingsStoreBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingsStoreBuilder")
			.field("store_key", &self.store_key)
			.field("handle", &self.handle.is_some())
			.finish()
	}
}

impl SettingsStoreBuilder {
	/// Name the store is exported under. Defaults to `"settings"`.
	pub fn store_key(mut self, key: impl Into<String>) -> Self {
		self.store_key = Some(key.into());
		self
	}

	/// Callback invoked once per discrete path write with the path and the
	/// value that was written. Host state wanted inside the callback is
	/// captured by the closure.
	pub fn on_change(mut self, handle: impl FnMut(&str, &Value) + Send + 'static) -> Self {
		self.handle = Some(Box::new(handle));
		self
	}

	pub fn build(self) -> SettingsStore {
		SettingsStore {
			store_key: self.store_key.unwrap_or_else(|| DEFAULT_STORE_KEY.to_string()),
			handle: self.handle,
			data: None,
		}
	}
}

fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_fresh_store_has_no_data() {
		let store = SettingsStore::new();
		assert!(store.data().is_none());
		assert_eq!(store.store_key(), "settings");
	}

	#[test]
	fn test_get_does_not_allocate() {
		let store = SettingsStore::new();
		assert_eq!(store.get("anything"), None);
		assert!(store.data().is_none());
	}

	#[test]
	fn test_first_write_creates_object_root() {
		let mut store = SettingsStore::new();
		store.set("hello", "universe").unwrap();
		assert_eq!(store.data(), Some(&json!({"hello": "universe"})));
	}

	#[test]
	fn test_is_truthy_coercion() {
		assert!(!is_truthy(&json!(null)));
		assert!(!is_truthy(&json!(false)));
		assert!(!is_truthy(&json!(0)));
		assert!(!is_truthy(&json!(0.0)));
		assert!(!is_truthy(&json!("")));
		assert!(is_truthy(&json!(true)));
		assert!(is_truthy(&json!(1)));
		assert!(is_truthy(&json!("no")));
		assert!(is_truthy(&json!([])));
		assert!(is_truthy(&json!({})));
	}

	#[test]
	fn test_replace_rejects_scalar() {
		let mut store = SettingsStore::new();
		let err = store.replace(json!(42)).unwrap_err();
		assert!(matches!(err, Error::InvalidOptions(_)));
		assert!(store.data().is_none());
	}

	#[test]
	fn test_replace_with_array_root() {
		let mut store = SettingsStore::new();
		store.replace(json!(["a", "b"])).unwrap();
		assert_eq!(store.data(), Some(&json!(["a", "b"])));
	}
}

// vim: ts=4
