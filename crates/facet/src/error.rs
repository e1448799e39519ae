use facet_merge::MergeError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// A write tried to merge an incoming value into an existing stored
	/// value of a structurally incompatible kind.
	MergeConflict { path: String, source: MergeError },

	/// The operation received an argument outside its supported shapes.
	InvalidOptions(String),
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Error::MergeConflict { path, source } => {
				write!(f, "merge conflict at '{}': {}", path, source)
			}
			Error::InvalidOptions(message) => write!(f, "invalid options: {}", message),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::MergeConflict { source, .. } => Some(source),
			Error::InvalidOptions(_) => None,
		}
	}
}

// vim: ts=4
