pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Request to {url} failed with status {status}.")]
	Status { status: u16, url: String },
	#[error("{message}")]
	InvalidRequest { message: String },
}
impl Error {
	/// True when the response arrived but its body did not have the expected shape.
	pub fn is_decode(&self) -> bool {
		match self {
			Self::SerdeJson(_) => true,
			Self::Reqwest(err) => err.is_decode(),
			Self::Status { .. } | Self::InvalidRequest { .. } => false,
		}
	}
}
