use trivia_api::Category;

/// Returns the ids of categories whose title contains `title_substring`, ignoring case.
///
/// Untitled categories never match. A selected id narrows the result to that single
/// category; it does not replace the title match. Output follows input order.
pub fn filter_categories(
	categories: &[Category],
	title_substring: &str,
	selected_category_id: Option<i64>,
) -> Vec<i64> {
	let needle = title_substring.to_lowercase();
	let mut ids = categories
		.iter()
		.filter(|category| selected_category_id.is_none_or(|id| category.id == id))
		.filter(|category| {
			category.title.as_deref().is_some_and(|title| title.to_lowercase().contains(&needle))
		})
		.map(|category| category.id)
		.collect::<Vec<_>>();

	if selected_category_id.is_some() {
		ids.truncate(1);
	}

	ids
}

#[cfg(test)]
mod tests {
	use super::*;

	fn category(id: i64, title: Option<&str>) -> Category {
		Category { id, title: title.map(str::to_string) }
	}

	fn store() -> Vec<Category> {
		vec![category(1, Some("Animals")), category(2, Some("Plants")), category(3, None)]
	}

	#[test]
	fn matches_substring_case_insensitively() {
		assert_eq!(filter_categories(&store(), "an", None), vec![1, 2]);
		assert_eq!(filter_categories(&store(), "ANIM", None), vec![1]);
		assert_eq!(filter_categories(&store(), "xyz", None), Vec::<i64>::new());
	}

	#[test]
	fn selected_id_intersects_with_title_match() {
		let store = store();

		assert_eq!(filter_categories(&store, "an", Some(1)), vec![1]);
		// Not empty: "Plants" contains "an", and the substring rule wins over any shortcut
		// that treats "an" as matching only "Animals".
		assert_eq!(filter_categories(&store, "an", Some(2)), vec![2]);
		assert_eq!(filter_categories(&store, "nim", Some(2)), Vec::<i64>::new());
		assert_eq!(filter_categories(&store, "an", Some(3)), Vec::<i64>::new());
		assert_eq!(filter_categories(&store, "an", Some(99)), Vec::<i64>::new());
	}

	#[test]
	fn selected_id_outside_title_match_is_empty() {
		let store = store();

		assert_eq!(filter_categories(&store, "ani", None), vec![1]);
		assert_eq!(filter_categories(&store, "ani", Some(2)), Vec::<i64>::new());
	}

	#[test]
	fn untitled_categories_never_match() {
		let store = vec![category(3, None), category(4, Some(""))];

		assert_eq!(filter_categories(&store, "", None), vec![4]);
	}

	#[test]
	fn selected_id_yields_at_most_one_result() {
		let store = vec![category(5, Some("Potent potables")), category(5, Some("Potpourri"))];

		assert_eq!(filter_categories(&store, "pot", Some(5)), vec![5]);
	}

	#[test]
	fn non_ascii_titles_fold_case() {
		let store = vec![category(8, Some("ÉTUDES FRANÇAISES"))];

		assert_eq!(filter_categories(&store, "françaises", None), vec![8]);
	}
}
