use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use trivia_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("trivia_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse test config.")
}

#[test]
fn sample_config_loads_with_expected_constants() {
	let path = write_temp_config(SAMPLE_CONFIG_TOML.to_string());
	let result = trivia_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected sample config to load.");

	assert_eq!(cfg.catalog.page_size, 100);
	assert_eq!(cfg.catalog.total_estimate, 18_418);
	assert_eq!(cfg.search.display_limit, 20);
	assert_eq!(cfg.api.base_url, "https://jservice-proxy.netlify.com/api/");
}

#[test]
fn display_limit_and_log_level_have_defaults() {
	let payload = SAMPLE_CONFIG_TOML
		.replace("log_level = \"info\"", "")
		.replace("display_limit = 20", "");
	let path = write_temp_config(payload);
	let result = trivia_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let cfg = result.expect("Expected defaults to fill missing keys.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.search.display_limit, 20);
}

#[test]
fn blank_log_level_normalizes_to_info() {
	let payload = SAMPLE_CONFIG_TOML.replace("log_level = \"info\"", "log_level = \"  \"");
	let path = write_temp_config(payload);
	let result = trivia_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	assert_eq!(result.expect("Expected config to load.").service.log_level, "info");
}

#[test]
fn page_size_must_be_positive() {
	let payload = SAMPLE_CONFIG_TOML.replace("page_size      = 100", "page_size      = 0");
	let path = write_temp_config(payload);
	let result = trivia_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	let err = result.expect_err("Expected page size validation error.");

	assert!(
		err.to_string().contains("catalog.page_size must be greater than zero."),
		"Unexpected error: {err}"
	);
}

#[test]
fn base_url_must_be_http() {
	let mut cfg = base_config();

	cfg.api.base_url = "ftp://example.com/api/".to_string();

	let err = trivia_config::validate(&cfg).expect_err("Expected base URL validation error.");

	assert!(
		err.to_string().contains("api.base_url must start with http:// or https://."),
		"Unexpected error: {err}"
	);
}

#[test]
fn zero_bounds_are_rejected() {
	let mut cfg = base_config();

	cfg.catalog.total_estimate = 0;

	let err = trivia_config::validate(&cfg).expect_err("Expected total estimate error.");

	assert!(err.to_string().contains("catalog.total_estimate must be greater than zero."));

	let mut cfg = base_config();

	cfg.search.display_limit = 0;

	let err = trivia_config::validate(&cfg).expect_err("Expected display limit error.");

	assert!(err.to_string().contains("search.display_limit must be greater than zero."));

	let mut cfg = base_config();

	cfg.api.timeout_ms = 0;

	let err = trivia_config::validate(&cfg).expect_err("Expected timeout error.");

	assert!(err.to_string().contains("api.timeout_ms must be greater than zero."));
}

#[test]
fn missing_file_reports_path() {
	let mut path = env::temp_dir();

	path.push("trivia_config_test_missing.toml");

	let err = trivia_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn malformed_toml_is_a_parse_error() {
	let path = write_temp_config("[api\nbase_url = ".to_string());
	let result = trivia_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	assert!(matches!(result, Err(Error::ParseConfig { .. })));
}

#[test]
fn trivia_example_toml_is_valid() {
	let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

	path.push("../../trivia.example.toml");

	trivia_config::load(&path).expect("Expected trivia.example.toml to be a valid config.");
}
