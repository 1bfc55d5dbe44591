use std::sync::Arc;

use tokio::task::JoinSet;

use trivia_api::{ClueQuery, ClueRecord};

use crate::{Clue, DateRange, Result, TriviaProvider};

/// Fans one clue request out per category and joins on all of them.
#[derive(Clone)]
pub struct ClueFetcher {
	provider: Arc<dyn TriviaProvider>,
}
impl ClueFetcher {
	pub fn new(provider: Arc<dyn TriviaProvider>) -> Self {
		Self { provider }
	}

	/// Aggregates valid clues for `category_ids`.
	///
	/// Results are grouped by input category order, each group in response order. A single
	/// failed request fails the whole fetch and the remaining requests are aborted. An empty
	/// id list returns immediately without touching the network.
	pub async fn fetch(
		&self,
		category_ids: &[i64],
		value: Option<i64>,
		date_range: Option<DateRange>,
	) -> Result<Vec<Clue>> {
		if category_ids.is_empty() {
			return Ok(Vec::new());
		}

		let mut set = JoinSet::new();
		let mut slots = category_ids.iter().map(|_| Vec::new()).collect::<Vec<Vec<Clue>>>();

		for (idx, &category_id) in category_ids.iter().enumerate() {
			let provider = Arc::clone(&self.provider);
			let query = ClueQuery {
				category_id,
				value,
				min_date: date_range.map(|range| range.start()),
				max_date: date_range.map(|range| range.end()),
			};

			set.spawn(async move {
				let result = provider.clues(&query).await;

				(idx, category_id, result)
			});
		}

		let mut dropped = 0_usize;

		while let Some(joined) = set.join_next().await {
			let (idx, category_id, result) = joined?;
			let records = match result {
				Ok(records) => records,
				Err(err) => {
					tracing::warn!(category_id, error = %err, "Clue fetch failed.");

					return Err(err.into());
				},
			};
			let received = records.len();

			slots[idx] =
				records.into_iter().filter_map(|record| into_clue(record, category_id)).collect();
			dropped += received - slots[idx].len();
		}

		let clues = slots.into_iter().flatten().collect::<Vec<_>>();

		tracing::debug!(
			categories = category_ids.len(),
			clues = clues.len(),
			dropped,
			"Clue fan-out finished."
		);

		Ok(clues)
	}
}

/// Keeps a record only when question, answer, and value are all present and non-empty.
fn into_clue(record: ClueRecord, requested_category_id: i64) -> Option<Clue> {
	let category_id = record.resolved_category_id(requested_category_id);
	let question = record.question.filter(|question| !question.trim().is_empty())?;
	let answer = record.answer.filter(|answer| !answer.trim().is_empty())?;
	let value = record.value?;

	Some(Clue { question, answer, value, category_id, air_date: record.airdate })
}

#[cfg(test)]
mod tests {
	use trivia_api::CategoryRef;

	use super::*;

	fn record(question: Option<&str>, answer: Option<&str>, value: Option<i64>) -> ClueRecord {
		ClueRecord {
			question: question.map(str::to_string),
			answer: answer.map(str::to_string),
			value,
			category_id: None,
			category: None,
			airdate: None,
		}
	}

	#[test]
	fn complete_record_becomes_clue() {
		let clue = into_clue(record(Some("q"), Some("a"), Some(200)), 4).expect("Expected clue.");

		assert_eq!(clue.question, "q");
		assert_eq!(clue.answer, "a");
		assert_eq!(clue.value, 200);
		assert_eq!(clue.category_id, 4);
	}

	#[test]
	fn incomplete_records_are_dropped() {
		assert!(into_clue(record(None, Some("a"), Some(200)), 1).is_none());
		assert!(into_clue(record(Some("q"), None, Some(200)), 1).is_none());
		assert!(into_clue(record(Some("q"), Some("a"), None), 1).is_none());
		assert!(into_clue(record(Some(""), Some("a"), Some(200)), 1).is_none());
		assert!(into_clue(record(Some("q"), Some("  "), Some(200)), 1).is_none());
	}

	#[test]
	fn category_id_prefers_payload_over_request() {
		let mut nested = record(Some("q"), Some("a"), Some(100));

		nested.category = Some(CategoryRef { id: 12, title: None });

		assert_eq!(into_clue(nested.clone(), 1).map(|clue| clue.category_id), Some(12));

		nested.category_id = Some(13);

		assert_eq!(into_clue(nested, 1).map(|clue| clue.category_id), Some(13));
	}
}
