//! Serde adapter for optional RFC 3339 air dates.
//!
//! The remote API sends `null`, omits the field, or sends an empty string for clues
//! with no recorded air date. All three decode to `None`.

use serde::{Deserialize as _, Deserializer, Serializer};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let Some(value) = value else {
		return serializer.serialize_none();
	};
	let formatted = value.format(&Rfc3339).map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = Option::<String>::deserialize(deserializer)?;

	match raw.as_deref().map(str::trim) {
		Some("") | None => Ok(None),
		Some(value) =>
			OffsetDateTime::parse(value, &Rfc3339).map(Some).map_err(serde::de::Error::custom),
	}
}
