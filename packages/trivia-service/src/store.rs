use std::{
	sync::{Arc, RwLock},
	time::Instant,
};

use tokio::task::JoinSet;

use trivia_api::{Category, CategoryPage};

use crate::{Error, Result, TriviaProvider, filter};

const LOAD_CANCELLED: &str = "The category load was cancelled.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
	Idle,
	Loading,
	Ready { categories: usize },
	/// Terminal for the session. Search stays unavailable.
	Failed { message: String },
}

/// Session-wide category catalog. Filled once by [`CategoryStore::load`], read-only after.
#[derive(Debug)]
pub struct CategoryStore {
	inner: RwLock<StoreInner>,
}

#[derive(Debug)]
struct StoreInner {
	categories: Vec<Category>,
	state: LoadState,
}

impl Default for CategoryStore {
	fn default() -> Self {
		Self::new()
	}
}

impl CategoryStore {
	pub fn new() -> Self {
		Self { inner: RwLock::new(StoreInner { categories: Vec::new(), state: LoadState::Idle }) }
	}

	pub fn state(&self) -> LoadState {
		self.inner.read().unwrap_or_else(|err| err.into_inner()).state.clone()
	}

	pub fn is_ready(&self) -> bool {
		matches!(self.state(), LoadState::Ready { .. })
	}

	pub fn len(&self) -> usize {
		self.inner.read().unwrap_or_else(|err| err.into_inner()).categories.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Copy of the catalog in load order, e.g. for a category picker.
	pub fn categories(&self) -> Vec<Category> {
		self.inner.read().unwrap_or_else(|err| err.into_inner()).categories.clone()
	}

	pub fn filter(&self, title_substring: &str, selected_category_id: Option<i64>) -> Vec<i64> {
		let inner = self.inner.read().unwrap_or_else(|err| err.into_inner());

		filter::filter_categories(&inner.categories, title_substring, selected_category_id)
	}

	/// Fetches every catalog page concurrently and publishes the result.
	///
	/// Pages past the end of the catalog come back empty and are ignored. When a page
	/// reports a total larger than `total_estimate`, the missing offsets are fetched in a
	/// second concurrent wave. Any page failure aborts the load and leaves the store in
	/// [`LoadState::Failed`] for good.
	pub async fn load(
		&self,
		provider: &Arc<dyn TriviaProvider>,
		catalog: &trivia_config::Catalog,
	) -> Result<usize> {
		let guard = self.begin_load()?;
		let started = Instant::now();

		tracing::info!(
			page_size = catalog.page_size,
			total_estimate = catalog.total_estimate,
			"Category load started."
		);

		match fetch_catalog(provider, catalog.page_size, catalog.total_estimate).await {
			Ok(categories) => {
				let count = categories.len();

				guard.finish(LoadState::Ready { categories: count }, categories);

				tracing::info!(
					categories = count,
					elapsed_ms = started.elapsed().as_millis() as u64,
					"Category load finished."
				);

				Ok(count)
			},
			Err(err) => {
				guard.finish(LoadState::Failed { message: err.to_string() }, Vec::new());

				tracing::warn!(error = %err, "Category load failed.");

				Err(err)
			},
		}
	}

	fn begin_load(&self) -> Result<LoadGuard<'_>> {
		let mut inner = self.inner.write().unwrap_or_else(|err| err.into_inner());

		let rejection = match &inner.state {
			LoadState::Idle => None,
			LoadState::Loading => Some("A category load is already in progress.".to_string()),
			LoadState::Ready { .. } => Some("The category catalog is already loaded.".to_string()),
			LoadState::Failed { message } => Some(message.clone()),
		};

		if let Some(message) = rejection {
			return Err(Error::CatalogUnavailable { message });
		}

		inner.state = LoadState::Loading;

		Ok(LoadGuard { store: self, finished: false })
	}
}

/// Owns the `Loading` state. Dropping it before [`LoadGuard::finish`], e.g. when the load
/// future is cancelled, fails the catalog instead of leaving it loading forever.
struct LoadGuard<'a> {
	store: &'a CategoryStore,
	finished: bool,
}
impl LoadGuard<'_> {
	fn finish(mut self, state: LoadState, categories: Vec<Category>) {
		self.finished = true;

		let mut inner = self.store.inner.write().unwrap_or_else(|err| err.into_inner());

		inner.categories.extend(categories);
		inner.state = state;
	}
}
impl Drop for LoadGuard<'_> {
	fn drop(&mut self) {
		if self.finished {
			return;
		}

		let mut inner = self.store.inner.write().unwrap_or_else(|err| err.into_inner());

		if inner.state == LoadState::Loading {
			inner.state = LoadState::Failed { message: LOAD_CANCELLED.to_string() };

			tracing::warn!("Category load was cancelled before it finished.");
		}
	}
}

async fn fetch_catalog(
	provider: &Arc<dyn TriviaProvider>,
	page_size: u32,
	total_estimate: u32,
) -> Result<Vec<Category>> {
	let page_size = page_size.max(1);
	let mut pages = fetch_pages(provider, page_size, page_offsets(0, total_estimate, page_size))
		.await?;
	let reported_total = pages.iter().filter_map(|page| page.reported_total).max();

	if let Some(total) = reported_total
		&& total > total_estimate
	{
		let resume_at = total_estimate.div_ceil(page_size).saturating_mul(page_size);

		tracing::info!(
			reported_total = total,
			total_estimate,
			"Server reported a larger catalog. Fetching remaining pages."
		);

		pages.extend(
			fetch_pages(provider, page_size, page_offsets(resume_at, total, page_size)).await?,
		);
	}

	Ok(pages.into_iter().flat_map(|page| page.categories).collect())
}

fn page_offsets(start: u32, end: u32, page_size: u32) -> Vec<u32> {
	(start..end).step_by(page_size as usize).collect()
}

/// Returns pages in offset order regardless of completion order.
async fn fetch_pages(
	provider: &Arc<dyn TriviaProvider>,
	page_size: u32,
	offsets: Vec<u32>,
) -> Result<Vec<CategoryPage>> {
	let mut set = JoinSet::new();
	let mut slots = offsets.iter().map(|_| None).collect::<Vec<Option<CategoryPage>>>();

	for (idx, offset) in offsets.into_iter().enumerate() {
		let provider = Arc::clone(provider);

		set.spawn(async move { (idx, offset, provider.categories(page_size, offset).await) });
	}

	while let Some(joined) = set.join_next().await {
		let (idx, offset, result) = joined?;

		match result {
			Ok(page) => slots[idx] = Some(page),
			Err(err) => {
				tracing::warn!(offset, error = %err, "Category page fetch failed.");

				return Err(err.into());
			},
		}
	}

	Ok(slots.into_iter().flatten().collect())
}
