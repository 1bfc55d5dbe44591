pub mod clues;
pub mod filter;
pub mod models;
pub mod search;
pub mod store;

mod error;

pub use clues::ClueFetcher;
pub use error::{Error, Result};
pub use filter::filter_categories;
pub use models::{Clue, DateRange, SearchQuery};
pub use search::{DEFAULT_DISPLAY_LIMIT, SearchOrchestrator, SearchOutcome, SkipReason};
pub use store::{CategoryStore, LoadState};
pub use trivia_api::Category;

use std::{future::Future, pin::Pin, sync::Arc};

use trivia_api::{ApiClient, CategoryPage, ClueQuery, ClueRecord};
use trivia_config::Config;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Seam over the remote API so the pipeline can run against stubs.
pub trait TriviaProvider
where
	Self: Send + Sync,
{
	fn categories<'a>(
		&'a self,
		count: u32,
		offset: u32,
	) -> BoxFuture<'a, trivia_api::Result<CategoryPage>>;

	fn clues<'a>(
		&'a self,
		query: &'a ClueQuery,
	) -> BoxFuture<'a, trivia_api::Result<Vec<ClueRecord>>>;
}

impl TriviaProvider for ApiClient {
	fn categories<'a>(
		&'a self,
		count: u32,
		offset: u32,
	) -> BoxFuture<'a, trivia_api::Result<CategoryPage>> {
		Box::pin(ApiClient::categories(self, count, offset))
	}

	fn clues<'a>(
		&'a self,
		query: &'a ClueQuery,
	) -> BoxFuture<'a, trivia_api::Result<Vec<ClueRecord>>> {
		Box::pin(ApiClient::clues(self, query))
	}
}

/// One search session: the catalog, the provider, and the orchestrator wired together.
pub struct TriviaService {
	pub cfg: Config,
	pub store: Arc<CategoryStore>,
	pub provider: Arc<dyn TriviaProvider>,
	pub orchestrator: SearchOrchestrator,
}
impl TriviaService {
	pub fn new(cfg: Config) -> Result<Self> {
		let client = ApiClient::new(&cfg.api)?;

		Ok(Self::with_provider(cfg, Arc::new(client)))
	}

	pub fn with_provider(cfg: Config, provider: Arc<dyn TriviaProvider>) -> Self {
		let store = Arc::new(CategoryStore::new());
		let orchestrator =
			SearchOrchestrator::new(store.clone(), provider.clone(), cfg.search.display_limit);

		Self { cfg, store, provider, orchestrator }
	}

	pub async fn load_catalog(&self) -> Result<usize> {
		self.store.load(&self.provider, &self.cfg.catalog).await
	}

	pub fn is_ready(&self) -> bool {
		self.store.is_ready()
	}

	pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome> {
		self.orchestrator.search(query).await
	}
}
