mod error;

pub use error::{Error, Result};

use std::{
	collections::{HashMap, HashSet},
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};

use axum::{
	Json, Router,
	extract::{Query, State},
	http::{HeaderName, StatusCode},
	response::{IntoResponse, Response},
	routing,
};
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::{
	net::TcpListener,
	sync::oneshot::{self, Sender},
};

const TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Canned catalog served by [`MockTriviaServer`].
#[derive(Debug, Default)]
pub struct MockCatalog {
	categories: Vec<Value>,
	clues: Vec<Value>,
	report_total: bool,
	failing_offsets: HashSet<u32>,
	failing_clue_categories: HashSet<i64>,
	malformed_clue_categories: HashSet<i64>,
}
impl MockCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn category(mut self, id: i64, title: Option<&str>) -> Self {
		self.categories.push(serde_json::json!({ "id": id, "title": title, "clues_count": 0 }));

		self
	}

	pub fn clue(
		mut self,
		category_id: i64,
		question: &str,
		answer: &str,
		value: Option<i64>,
		airdate: Option<&str>,
	) -> Self {
		let id = self.clues.len() + 1;

		self.clues.push(serde_json::json!({
			"id": id,
			"question": question,
			"answer": answer,
			"value": value,
			"airdate": airdate,
			"category_id": category_id,
			"category": { "id": category_id },
		}));

		self
	}

	/// Sends the catalog size in an `X-Total-Count` header on every category page.
	pub fn report_total(mut self) -> Self {
		self.report_total = true;

		self
	}

	pub fn fail_category_offset(mut self, offset: u32) -> Self {
		self.failing_offsets.insert(offset);

		self
	}

	pub fn fail_clues_for(mut self, category_id: i64) -> Self {
		self.failing_clue_categories.insert(category_id);

		self
	}

	/// Answers clue requests for the category with a body that is not JSON.
	pub fn malformed_clues_for(mut self, category_id: i64) -> Self {
		self.malformed_clue_categories.insert(category_id);

		self
	}
}

struct MockState {
	catalog: MockCatalog,
	category_requests: AtomicUsize,
	clue_requests: AtomicUsize,
	clue_params: Mutex<Vec<HashMap<String, String>>>,
}

/// In-process stand-in for the remote API, bound to an ephemeral loopback port.
pub struct MockTriviaServer {
	base_url: String,
	state: Arc<MockState>,
	shutdown: Option<Sender<()>>,
}
impl MockTriviaServer {
	pub async fn start(catalog: MockCatalog) -> Result<Self> {
		let state = Arc::new(MockState {
			catalog,
			category_requests: AtomicUsize::new(0),
			clue_requests: AtomicUsize::new(0),
			clue_params: Mutex::new(Vec::new()),
		});
		let app = Router::new()
			.route("/api/categories", routing::get(categories_handler))
			.route("/api/clues", routing::get(clues_handler))
			.with_state(state.clone());
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let (tx, rx) = oneshot::channel();
		let server = axum::serve(listener, app).with_graceful_shutdown(async move {
			let _ = rx.await;
		});

		tokio::spawn(async move {
			let _ = server.into_future().await;
		});

		Ok(Self { base_url: format!("http://{addr}/api/"), state, shutdown: Some(tx) })
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	pub fn category_requests(&self) -> usize {
		self.state.category_requests.load(Ordering::SeqCst)
	}

	pub fn clue_requests(&self) -> usize {
		self.state.clue_requests.load(Ordering::SeqCst)
	}

	/// Query parameters of every clue request received so far, in arrival order.
	pub fn clue_params(&self) -> Vec<HashMap<String, String>> {
		self.state.clue_params.lock().unwrap_or_else(|err| err.into_inner()).clone()
	}

	pub fn shutdown(mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}
impl Drop for MockTriviaServer {
	fn drop(&mut self) {
		if let Some(tx) = self.shutdown.take() {
			let _ = tx.send(());
		}
	}
}

async fn categories_handler(
	State(state): State<Arc<MockState>>,
	Query(params): Query<HashMap<String, String>>,
) -> Response {
	state.category_requests.fetch_add(1, Ordering::SeqCst);

	let count = parse_param::<usize>(&params, "count").unwrap_or(1);
	let offset = parse_param::<u32>(&params, "offset").unwrap_or(0);
	let catalog = &state.catalog;

	if catalog.failing_offsets.contains(&offset) {
		return StatusCode::INTERNAL_SERVER_ERROR.into_response();
	}

	let page = catalog
		.categories
		.iter()
		.skip(offset as usize)
		.take(count)
		.cloned()
		.collect::<Vec<_>>();

	if catalog.report_total {
		let total = catalog.categories.len().to_string();

		return ([(TOTAL_COUNT_HEADER, total)], Json(page)).into_response();
	}

	Json(page).into_response()
}

async fn clues_handler(
	State(state): State<Arc<MockState>>,
	Query(params): Query<HashMap<String, String>>,
) -> Response {
	state.clue_requests.fetch_add(1, Ordering::SeqCst);
	state.clue_params.lock().unwrap_or_else(|err| err.into_inner()).push(params.clone());

	let Some(category_id) = parse_param::<i64>(&params, "category") else {
		return StatusCode::BAD_REQUEST.into_response();
	};
	let catalog = &state.catalog;

	if catalog.failing_clue_categories.contains(&category_id) {
		return StatusCode::INTERNAL_SERVER_ERROR.into_response();
	}
	if catalog.malformed_clue_categories.contains(&category_id) {
		return (StatusCode::OK, "<html>upstream error</html>").into_response();
	}

	let value = parse_param::<i64>(&params, "value");
	let min_date = params.get("min_date").and_then(|raw| parse_timestamp(raw));
	let max_date = params.get("max_date").and_then(|raw| parse_timestamp(raw));
	let clues = catalog
		.clues
		.iter()
		.filter(|clue| clue.get("category_id").and_then(Value::as_i64) == Some(category_id))
		.filter(|clue| value.is_none() || clue.get("value").and_then(Value::as_i64) == value)
		.filter(|clue| {
			let airdate = clue.get("airdate").and_then(Value::as_str).and_then(parse_timestamp);

			match (airdate, min_date, max_date) {
				(_, None, None) => true,
				(None, _, _) => false,
				(Some(airdate), min, max) =>
					min.is_none_or(|min| airdate >= min) && max.is_none_or(|max| airdate <= max),
			}
		})
		.cloned()
		.collect::<Vec<_>>();

	Json(clues).into_response()
}

fn parse_param<T>(params: &HashMap<String, String>, key: &str) -> Option<T>
where
	T: std::str::FromStr,
{
	params.get(key).and_then(|raw| raw.parse::<T>().ok())
}

fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
	OffsetDateTime::parse(raw, &Rfc3339).ok()
}
