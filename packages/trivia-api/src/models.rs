use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, Result};

/// A topical grouping of clues. Titles are nullable upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
	pub id: i64,
	#[serde(default)]
	pub title: Option<String>,
}

/// One page of the category catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPage {
	pub offset: u32,
	pub categories: Vec<Category>,
	/// Catalog size from the `X-Total-Count` header, when the server sends one.
	pub reported_total: Option<u32>,
}

/// Nested category object embedded in a clue payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
	pub id: i64,
	#[serde(default)]
	pub title: Option<String>,
}

/// A clue exactly as the remote API returns it. Every field may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClueRecord {
	#[serde(default)]
	pub question: Option<String>,
	#[serde(default)]
	pub answer: Option<String>,
	#[serde(default)]
	pub value: Option<i64>,
	#[serde(default, alias = "categoryId")]
	pub category_id: Option<i64>,
	#[serde(default)]
	pub category: Option<CategoryRef>,
	#[serde(default, with = "crate::air_date")]
	pub airdate: Option<OffsetDateTime>,
}
impl ClueRecord {
	/// Resolves the owning category, preferring the flat id over the nested object.
	pub fn resolved_category_id(&self, requested: i64) -> i64 {
		self.category_id
			.or_else(|| self.category.as_ref().map(|category| category.id))
			.unwrap_or(requested)
	}
}

/// Parameters for one `GET /clues` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueQuery {
	pub category_id: i64,
	pub value: Option<i64>,
	pub min_date: Option<OffsetDateTime>,
	pub max_date: Option<OffsetDateTime>,
}
impl ClueQuery {
	pub fn for_category(category_id: i64) -> Self {
		Self { category_id, value: None, min_date: None, max_date: None }
	}

	pub fn query_pairs(&self) -> Result<Vec<(&'static str, String)>> {
		let mut pairs = vec![("category", self.category_id.to_string())];

		if let Some(value) = self.value {
			pairs.push(("value", value.to_string()));
		}
		if let Some(min_date) = self.min_date {
			pairs.push(("min_date", format_timestamp(min_date)?));
		}
		if let Some(max_date) = self.max_date {
			pairs.push(("max_date", format_timestamp(max_date)?));
		}

		Ok(pairs)
	}
}

pub fn format_timestamp(value: OffsetDateTime) -> Result<String> {
	value
		.format(&Rfc3339)
		.map_err(|err| Error::InvalidRequest { message: format!("Invalid timestamp: {err}.") })
}
