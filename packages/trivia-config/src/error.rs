use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Cannot read trivia config {path:?}.")]
	ReadConfig { path: PathBuf, source: std::io::Error },
	#[error("Trivia config {path:?} is not valid TOML.")]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	/// A setting parsed but is out of range. Renders as `"{field} {reason}."`.
	#[error("{field} {reason}.")]
	Validation { field: &'static str, reason: &'static str },
}
impl Error {
	fn invalid(field: &'static str, reason: &'static str) -> Self {
		Self::Validation { field, reason }
	}

	pub(crate) fn non_positive(field: &'static str) -> Self {
		Self::invalid(field, "must be greater than zero")
	}

	pub(crate) fn bad_url(reason: &'static str) -> Self {
		Self::invalid("api.base_url", reason)
	}
}
