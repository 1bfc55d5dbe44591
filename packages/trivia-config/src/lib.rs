mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Api, Catalog, Config, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let base_url = cfg.api.base_url.trim();

	if base_url.is_empty() {
		return Err(Error::bad_url("must be non-empty"));
	}
	if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
		return Err(Error::bad_url("must start with http:// or https://"));
	}

	let positives = [
		("api.timeout_ms", cfg.api.timeout_ms),
		("catalog.page_size", u64::from(cfg.catalog.page_size)),
		("catalog.total_estimate", u64::from(cfg.catalog.total_estimate)),
		("search.display_limit", cfg.search.display_limit as u64),
	];

	if let Some(&(field, _)) = positives.iter().find(|(_, value)| *value == 0) {
		return Err(Error::non_positive(field));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.api.base_url = cfg.api.base_url.trim().to_string();

	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
