//! Deep merge of nested JSON values.
//!
//! Merge rules:
//! - object + object: recursive key-by-key merge, overlay wins on
//!   conflicting leaves
//! - array + array: merge by index, the longer side's tail survives
//! - object + array (either way): structural conflict, returns [`MergeError`]
//! - anything else: overlay replaces base

#![forbid(unsafe_code)]

use serde_json::Value;
use tracing::trace;

/// Error returned when two structurally incompatible nodes meet during a
/// merge. Carries the node kinds and the path within the merge where the
/// conflict occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeError {
	path: String,
	base_kind: &'static str,
	overlay_kind: &'static str,
}

impl MergeError {
	/// Path within the merged tree where the conflict occurred. Empty when
	/// the roots themselves conflict.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Kind of the existing node (`"object"` or `"array"`).
	pub fn base_kind(&self) -> &'static str {
		self.base_kind
	}

	/// Kind of the incoming node (`"object"` or `"array"`).
	pub fn overlay_kind(&self) -> &'static str {
		self.overlay_kind
	}
}

impl std::fmt::Display for MergeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		if self.path.is_empty() {
			write!(f, "unmergeable scenario: cannot merge {} into {}", self.overlay_kind, self.base_kind)
		} else {
			write!(
				f,
				"unmergeable scenario: cannot merge {} into {} at '{}'",
				self.overlay_kind, self.base_kind, self.path
			)
		}
	}
}

impl std::error::Error for MergeError {}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Deep-merge `overlay` into `base`, returning the merged value.
///
/// Neither input is mutated. See the crate docs for the merge rules.
pub fn merge(base: &Value, overlay: &Value) -> Result<Value, MergeError> {
	merge_at("", base, overlay)
}

fn merge_at(path: &str, base: &Value, overlay: &Value) -> Result<Value, MergeError> {
	match (base, overlay) {
		(Value::Object(base_map), Value::Object(overlay_map)) => {
			let mut merged = base_map.clone();
			for (key, overlay_value) in overlay_map {
				let child_path = if path.is_empty() {
					key.clone()
				} else {
					format!("{path}.{key}")
				};
				let value = match base_map.get(key) {
					Some(base_value) => merge_at(&child_path, base_value, overlay_value)?,
					None => overlay_value.clone(),
				};
				merged.insert(key.clone(), value);
			}
			Ok(Value::Object(merged))
		}
		(Value::Array(base_items), Value::Array(overlay_items)) => {
			let len = base_items.len().max(overlay_items.len());
			let mut merged = Vec::with_capacity(len);
			for i in 0..len {
				let child_path = format!("{path}[{i}]");
				let value = match (base_items.get(i), overlay_items.get(i)) {
					(Some(base_value), Some(overlay_value)) => {
						merge_at(&child_path, base_value, overlay_value)?
					}
					(Some(base_value), None) => base_value.clone(),
					(None, Some(overlay_value)) => overlay_value.clone(),
					(None, None) => break,
				};
				merged.push(value);
			}
			Ok(Value::Array(merged))
		}
		(Value::Object(_), Value::Array(_)) | (Value::Array(_), Value::Object(_)) => {
			trace!(path, base = kind(base), overlay = kind(overlay), "structural merge conflict");
			Err(MergeError {
				path: path.to_string(),
				base_kind: kind(base),
				overlay_kind: kind(overlay),
			})
		}
		_ => Ok(overlay.clone()),
	}
}


// vim: ts=4
