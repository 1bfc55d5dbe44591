use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub api: Api,
	pub catalog: Catalog,
	pub search: Search,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
	/// Root of the remote API, e.g. "https://jservice-proxy.netlify.com/api/".
	pub base_url: String,
	pub timeout_ms: u64,
}

/// Paging constants for the bulk category load.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
	pub page_size: u32,
	/// Expected catalog size. A larger server-reported total extends the load.
	pub total_estimate: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	#[serde(default = "default_display_limit")]
	pub display_limit: usize,
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_display_limit() -> usize {
	20
}
