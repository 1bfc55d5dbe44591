use std::sync::{
	Arc,
	atomic::{AtomicU64, AtomicUsize, Ordering},
};

use crate::{CategoryStore, Clue, ClueFetcher, Result, SearchQuery, TriviaProvider};

pub const DEFAULT_DISPLAY_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	EmptyQuery,
	CatalogNotReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
	/// Nothing was requested.
	Skipped(SkipReason),
	/// `total` counts clues before truncation to the display limit.
	Completed { sequence: u64, clues: Vec<Clue>, total: usize },
	/// A newer search started before this one resolved; its results were discarded.
	Superseded { sequence: u64 },
}
impl SearchOutcome {
	pub fn clues(&self) -> &[Clue] {
		match self {
			Self::Completed { clues, .. } => clues,
			Self::Skipped(_) | Self::Superseded { .. } => &[],
		}
	}

	pub fn into_clues(self) -> Vec<Clue> {
		match self {
			Self::Completed { clues, .. } => clues,
			Self::Skipped(_) | Self::Superseded { .. } => Vec::new(),
		}
	}

	pub fn is_superseded(&self) -> bool {
		matches!(self, Self::Superseded { .. })
	}
}

/// Filter, fan out, truncate. The single entry point for search triggers.
///
/// Every call takes the next sequence number, including calls that are skipped. When a
/// search resolves after a newer call was made, its clues or error are dropped and it reports
/// [`SearchOutcome::Superseded`], so callers never see stale or merged results.
pub struct SearchOrchestrator {
	store: Arc<CategoryStore>,
	fetcher: ClueFetcher,
	display_limit: usize,
	sequence: AtomicU64,
	in_flight: AtomicUsize,
}
impl SearchOrchestrator {
	pub fn new(
		store: Arc<CategoryStore>,
		provider: Arc<dyn TriviaProvider>,
		display_limit: usize,
	) -> Self {
		Self {
			store,
			fetcher: ClueFetcher::new(provider),
			display_limit,
			sequence: AtomicU64::new(0),
			in_flight: AtomicUsize::new(0),
		}
	}

	pub fn store(&self) -> &Arc<CategoryStore> {
		&self.store
	}

	pub fn display_limit(&self) -> usize {
		self.display_limit
	}

	pub fn latest_sequence(&self) -> u64 {
		self.sequence.load(Ordering::SeqCst)
	}

	/// True while at least one search is awaiting its clue fan-out.
	pub fn is_searching(&self) -> bool {
		self.in_flight.load(Ordering::SeqCst) > 0
	}

	pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome> {
		// Taken before any skip so an empty or early search still supersedes older ones.
		let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

		if query.title_substring.is_empty() {
			return Ok(SearchOutcome::Skipped(SkipReason::EmptyQuery));
		}
		if !self.store.is_ready() {
			return Ok(SearchOutcome::Skipped(SkipReason::CatalogNotReady));
		}

		let _in_flight = InFlight::enter(&self.in_flight);
		let category_ids = self.store.filter(&query.title_substring, query.category_id);
		let result = self.fetcher.fetch(&category_ids, query.value, query.date_range).await;

		if self.latest_sequence() != sequence {
			tracing::debug!(
				sequence,
				latest = self.latest_sequence(),
				failed = result.is_err(),
				"Search superseded."
			);

			return Ok(SearchOutcome::Superseded { sequence });
		}

		let mut clues = result?;
		let total = clues.len();

		clues.truncate(self.display_limit);

		tracing::info!(
			sequence,
			categories = category_ids.len(),
			clues = total,
			shown = clues.len(),
			"Search completed."
		);

		Ok(SearchOutcome::Completed { sequence, clues, total })
	}
}

struct InFlight<'a>(&'a AtomicUsize);
impl<'a> InFlight<'a> {
	fn enter(counter: &'a AtomicUsize) -> Self {
		counter.fetch_add(1, Ordering::SeqCst);

		Self(counter)
	}
}
impl Drop for InFlight<'_> {
	fn drop(&mut self) {
		self.0.fetch_sub(1, Ordering::SeqCst);
	}
}
