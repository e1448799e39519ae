//! Deep-path access into nested JSON values.
//!
//! A path is a string of dotted segments with optional bracketed numeric
//! indices: `"a.b"`, `"foo.bar[1]"`, `"matrix[0][2].cell"`. Reads walk the
//! tree and report absence as `None`; writes create intermediate containers
//! as needed, so a written path always resolves to a definite location.

#![forbid(unsafe_code)]

use serde_json::{Map, Value};
use tracing::trace;

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// An object key (`foo` in `foo.bar`).
	Key(String),
	/// An array index (`1` in `bar[1]`).
	Index(usize),
}

/// A parsed path: a sequence of key and index segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Segment>);

impl Path {
	/// Parse a dotted/bracketed path string.
	///
	/// The grammar is tolerant: empty segments (`"a..b"`, leading dots) are
	/// skipped, and bracket content that is not a numeric index is treated
	/// as a quoted key, so `"a[b]"` addresses the key `"b"` under `"a"`.
	pub fn parse(path: &str) -> Self {
		let mut segments = Vec::new();
		let mut buf = String::new();
		let mut chars = path.chars();

		while let Some(c) = chars.next() {
			match c {
				'.' => {
					if !buf.is_empty() {
						segments.push(Segment::Key(std::mem::take(&mut buf)));
					}
				}
				'[' => {
					if !buf.is_empty() {
						segments.push(Segment::Key(std::mem::take(&mut buf)));
					}
					let mut inner = String::new();
					for c in chars.by_ref() {
						if c == ']' {
							break;
						}
						inner.push(c);
					}
					match inner.parse::<usize>() {
						Ok(index) => segments.push(Segment::Index(index)),
						Err(_) if !inner.is_empty() => segments.push(Segment::Key(inner)),
						Err(_) => {}
					}
				}
				_ => buf.push(c),
			}
		}
		if !buf.is_empty() {
			segments.push(Segment::Key(buf));
		}

		Self(segments)
	}

	/// The parsed segments, in traversal order.
	pub fn segments(&self) -> &[Segment] {
		&self.0
	}

	/// Whether the path has no segments (addresses the root).
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl std::str::FromStr for Path {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::parse(s))
	}
}

/// Read the value at `path` inside `root`.
///
/// Any miss during traversal (absent key, out-of-range index, descent
/// through a scalar) yields `None`. An empty path addresses the root.
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
	trace!(path, "resolving path");
	let mut current = root;
	for segment in Path::parse(path).segments() {
		current = match segment {
			Segment::Key(key) => current.as_object()?.get(key)?,
			Segment::Index(index) => current.as_array()?.get(*index)?,
		};
	}
	Some(current)
}

/// Write `value` at `path` inside `root`, creating intermediate containers
/// as needed.
///
/// A `Key` segment materializes an object, an `Index` segment an array
/// (padded with `null` up to the index). An existing intermediate of the
/// wrong shape is replaced by a fresh container of the required shape. An
/// empty path replaces the root.
pub fn set(root: &mut Value, path: &str, value: Value) {
	trace!(path, "writing at path");
	let path = Path::parse(path);
	let Some((last, parents)) = path.segments().split_last() else {
		*root = value;
		return;
	};

	let mut current = root;
	for segment in parents {
		current = match segment {
			Segment::Key(key) => {
				if !current.is_object() {
					*current = Value::Object(Map::new());
				}
				let Value::Object(map) = current else { return };
				map.entry(key.clone()).or_insert(Value::Null)
			}
			Segment::Index(index) => {
				if !current.is_array() {
					*current = Value::Array(Vec::new());
				}
				let Value::Array(items) = current else { return };
				if items.len() <= *index {
					items.resize(index + 1, Value::Null);
				}
				let Some(slot) = items.get_mut(*index) else { return };
				slot
			}
		};
	}

	match last {
		Segment::Key(key) => {
			if !current.is_object() {
				*current = Value::Object(Map::new());
			}
			let Value::Object(map) = current else { return };
			map.insert(key.clone(), value);
		}
		Segment::Index(index) => {
			if !current.is_array() {
				*current = Value::Array(Vec::new());
			}
			let Value::Array(items) = current else { return };
			if items.len() <= *index {
				items.resize(index + 1, Value::Null);
			}
			if let Some(slot) = items.get_mut(*index) {
				*slot = value;
			}
		}
	}
}


// vim: ts=4
