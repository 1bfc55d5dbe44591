pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Network failure: {message}")]
	Network { message: String },
	#[error("Decode failure: {message}")]
	Decode { message: String },
	#[error("Invalid query: {message}")]
	InvalidQuery { message: String },
	#[error("Category catalog unavailable: {message}")]
	CatalogUnavailable { message: String },
	#[error("Fetch task failed: {message}")]
	Task { message: String },
}
impl From<trivia_api::Error> for Error {
	fn from(err: trivia_api::Error) -> Self {
		if err.is_decode() {
			return Self::Decode { message: err.to_string() };
		}

		match err {
			trivia_api::Error::InvalidRequest { message } => Self::InvalidQuery { message },
			other => Self::Network { message: other.to_string() },
		}
	}
}

impl From<tokio::task::JoinError> for Error {
	fn from(err: tokio::task::JoinError) -> Self {
		Self::Task { message: err.to_string() }
	}
}
