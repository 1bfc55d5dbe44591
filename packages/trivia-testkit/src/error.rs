pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Mock trivia server could not bind a loopback port.")]
	Bind(#[from] std::io::Error),
}
