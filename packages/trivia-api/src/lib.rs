pub mod air_date;
pub mod models;

mod error;

pub use error::{Error, Result};
pub use models::{Category, CategoryPage, CategoryRef, ClueQuery, ClueRecord, format_timestamp};

// std
use std::time::Duration as StdDuration;

// crates.io
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// HTTP client for the remote trivia API.
#[derive(Debug, Clone)]
pub struct ApiClient {
	http: Client,
	base_url: String,
}
impl ApiClient {
	pub fn new(cfg: &trivia_config::Api) -> Result<Self> {
		let http = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;

		Ok(Self { http, base_url: cfg.base_url.trim_end_matches('/').to_string() })
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// `GET /categories?count={count}&offset={offset}`.
	pub async fn categories(&self, count: u32, offset: u32) -> Result<CategoryPage> {
		let url = self.endpoint("categories");
		let res = self.http.get(&url).query(&[("count", count), ("offset", offset)]).send().await?;
		let res = check_status(res, &url)?;
		let reported_total = reported_total(&res);
		let categories: Vec<Category> = read_json(res).await?;

		tracing::debug!(offset, count, received = categories.len(), "Category page fetched.");

		Ok(CategoryPage { offset, categories, reported_total })
	}

	/// `GET /clues?category={id}[&value=..][&min_date=..][&max_date=..]`.
	pub async fn clues(&self, query: &ClueQuery) -> Result<Vec<ClueRecord>> {
		let url = self.endpoint("clues");
		let pairs = query.query_pairs()?;
		let res = self.http.get(&url).query(&pairs).send().await?;
		let res = check_status(res, &url)?;
		let clues: Vec<ClueRecord> = read_json(res).await?;

		tracing::debug!(
			category_id = query.category_id,
			received = clues.len(),
			"Clues fetched."
		);

		Ok(clues)
	}

	fn endpoint(&self, path: &str) -> String {
		format!("{}/{path}", self.base_url)
	}
}

fn check_status(res: Response, url: &str) -> Result<Response> {
	let status = res.status();

	if !status.is_success() {
		return Err(Error::Status { status: status.as_u16(), url: url.to_string() });
	}

	Ok(res)
}

fn reported_total(res: &Response) -> Option<u32> {
	res.headers()
		.get(TOTAL_COUNT_HEADER)
		.and_then(|value| value.to_str().ok())
		.and_then(|value| value.trim().parse::<u32>().ok())
}

async fn read_json<T>(res: Response) -> Result<T>
where
	T: DeserializeOwned,
{
	let body = res.text().await?;

	Ok(serde_json::from_str(&body)?)
}
