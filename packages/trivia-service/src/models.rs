use serde::Serialize;
use time::OffsetDateTime;

use crate::{Error, Result};

/// A clue that passed validity filtering: question and answer are non-empty and the
/// dollar value is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clue {
	pub question: String,
	pub answer: String,
	pub value: i64,
	pub category_id: i64,
	#[serde(with = "trivia_api::air_date")]
	pub air_date: Option<OffsetDateTime>,
}

/// Inclusive air-date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
	start: OffsetDateTime,
	end: OffsetDateTime,
}
impl DateRange {
	pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self> {
		if start > end {
			return Err(Error::InvalidQuery {
				message: "Date range start must not be after its end.".to_string(),
			});
		}

		Ok(Self { start, end })
	}

	pub fn start(&self) -> OffsetDateTime {
		self.start
	}

	pub fn end(&self) -> OffsetDateTime {
		self.end
	}
}

/// One search request from the UI layer. Zero ids and values mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
	pub title_substring: String,
	pub category_id: Option<i64>,
	pub value: Option<i64>,
	pub date_range: Option<DateRange>,
}
impl SearchQuery {
	pub fn new(title_substring: impl Into<String>) -> Self {
		Self { title_substring: title_substring.into(), ..Default::default() }
	}

	pub fn with_category_id(mut self, category_id: i64) -> Self {
		self.category_id = (category_id != 0).then_some(category_id);

		self
	}

	pub fn with_value(mut self, value: i64) -> Self {
		self.value = (value != 0).then_some(value);

		self
	}

	pub fn with_date_range(mut self, date_range: DateRange) -> Self {
		self.date_range = Some(date_range);

		self
	}
}
