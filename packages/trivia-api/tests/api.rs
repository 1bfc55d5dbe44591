use time::macros::datetime;

use trivia_api::{ApiClient, ClueQuery, Error};
use trivia_testkit::{MockCatalog, MockTriviaServer};

fn api_config(base_url: &str) -> trivia_config::Api {
	trivia_config::Api { base_url: base_url.to_string(), timeout_ms: 5_000 }
}

fn sample_catalog() -> MockCatalog {
	MockCatalog::new()
		.category(1, Some("Animals"))
		.category(2, Some("Plants"))
		.category(3, None)
		.clue(1, "King of beasts", "the lion", Some(200), Some("1996-10-21T12:00:00Z"))
		.clue(1, "Striped horse", "zebra", Some(400), Some("2004-03-02T12:00:00Z"))
		.clue(2, "Grows toward light", "a sunflower", Some(200), None)
}

#[tokio::test]
async fn category_pages_are_sliced_by_count_and_offset() {
	let server = MockTriviaServer::start(sample_catalog()).await.expect("Failed to start server.");
	let client = ApiClient::new(&api_config(server.base_url())).expect("Failed to build client.");
	let first = client.categories(2, 0).await.expect("First page failed.");
	let second = client.categories(2, 2).await.expect("Second page failed.");
	let trailing = client.categories(2, 4).await.expect("Trailing page failed.");

	assert_eq!(first.categories.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);
	assert_eq!(second.categories.len(), 1);
	assert_eq!(second.categories[0].title, None);
	assert!(trailing.categories.is_empty());
	assert_eq!(first.reported_total, None);
	assert_eq!(server.category_requests(), 3);
}

#[tokio::test]
async fn reported_total_is_read_from_header() {
	let server = MockTriviaServer::start(sample_catalog().report_total())
		.await
		.expect("Failed to start server.");
	let client = ApiClient::new(&api_config(server.base_url())).expect("Failed to build client.");
	let page = client.categories(100, 0).await.expect("Page failed.");

	assert_eq!(page.reported_total, Some(3));
}

#[tokio::test]
async fn clue_request_carries_value_and_date_constraints() {
	let server = MockTriviaServer::start(sample_catalog()).await.expect("Failed to start server.");
	let client = ApiClient::new(&api_config(server.base_url())).expect("Failed to build client.");
	let query = ClueQuery {
		category_id: 1,
		value: Some(400),
		min_date: Some(datetime!(2000-01-01 0:00 UTC)),
		max_date: Some(datetime!(2010-01-01 0:00 UTC)),
	};
	let clues = client.clues(&query).await.expect("Clue request failed.");

	assert_eq!(clues.len(), 1);
	assert_eq!(clues[0].answer.as_deref(), Some("zebra"));

	let params = server.clue_params();

	assert_eq!(params.len(), 1);
	assert_eq!(params[0].get("category").map(String::as_str), Some("1"));
	assert_eq!(params[0].get("value").map(String::as_str), Some("400"));
	assert_eq!(params[0].get("min_date").map(String::as_str), Some("2000-01-01T00:00:00Z"));
	assert_eq!(params[0].get("max_date").map(String::as_str), Some("2010-01-01T00:00:00Z"));
}

#[tokio::test]
async fn server_error_is_a_status_error() {
	let server = MockTriviaServer::start(sample_catalog().fail_clues_for(2))
		.await
		.expect("Failed to start server.");
	let client = ApiClient::new(&api_config(server.base_url())).expect("Failed to build client.");
	let err = client.clues(&ClueQuery::for_category(2)).await.expect_err("Expected failure.");

	assert!(matches!(err, Error::Status { status: 500, .. }), "Unexpected error: {err}");
	assert!(!err.is_decode());
}

#[tokio::test]
async fn non_json_body_is_a_decode_error() {
	let server = MockTriviaServer::start(sample_catalog().malformed_clues_for(1))
		.await
		.expect("Failed to start server.");
	let client = ApiClient::new(&api_config(server.base_url())).expect("Failed to build client.");
	let err = client.clues(&ClueQuery::for_category(1)).await.expect_err("Expected failure.");

	assert!(err.is_decode(), "Unexpected error: {err}");
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
	let server =
		MockTriviaServer::start(MockCatalog::new()).await.expect("Failed to start server.");
	let base_url = server.base_url().to_string();

	server.shutdown();
	tokio::time::sleep(std::time::Duration::from_millis(200)).await;

	let client = ApiClient::new(&api_config(&base_url)).expect("Failed to build client.");
	let err = client.categories(10, 0).await.expect_err("Expected failure.");

	assert!(matches!(err, Error::Reqwest(_)), "Unexpected error: {err}");
	assert!(!err.is_decode());
}
