use std::fmt::Write as _;

use trivia_service::{Clue, SearchOutcome, SkipReason};

const VALUE_HEADER: &str = "Value";
const QUESTION_HEADER: &str = "Question";
const ANSWER_HEADER: &str = "Answer";

/// Upstream text carries escaped quotes such as `\"`; the escapes are display noise.
pub fn clean_text(raw: &str) -> String {
	raw.replace('\\', "")
}

pub fn render_outcome(outcome: &SearchOutcome, json: bool) -> serde_json::Result<String> {
	match outcome {
		SearchOutcome::Completed { clues, total, .. } =>
			if json {
				serde_json::to_string_pretty(clues)
			} else {
				Ok(render_table(clues, *total))
			},
		SearchOutcome::Skipped(SkipReason::CatalogNotReady) =>
			Ok("Category catalog is not ready.".to_string()),
		SearchOutcome::Skipped(SkipReason::EmptyQuery) | SearchOutcome::Superseded { .. } =>
			Ok(String::new()),
	}
}

pub fn render_table(clues: &[Clue], total: usize) -> String {
	if clues.is_empty() {
		return "No clues found.".to_string();
	}

	let rows = clues
		.iter()
		.map(|clue| {
			(format!("${}", clue.value), clean_text(&clue.question), clean_text(&clue.answer))
		})
		.collect::<Vec<_>>();
	let value_width = column_width(VALUE_HEADER, rows.iter().map(|row| row.0.as_str()));
	let question_width = column_width(QUESTION_HEADER, rows.iter().map(|row| row.1.as_str()));
	let mut out = String::new();

	push_row(&mut out, (VALUE_HEADER, QUESTION_HEADER, ANSWER_HEADER), value_width, question_width);

	let _ = writeln!(
		out,
		"{}  {}  {}",
		"-".repeat(value_width),
		"-".repeat(question_width),
		"-".repeat(ANSWER_HEADER.len())
	);

	for (value, question, answer) in &rows {
		push_row(
			&mut out,
			(value.as_str(), question.as_str(), answer.as_str()),
			value_width,
			question_width,
		);
	}

	if total > clues.len() {
		let _ = writeln!(out, "Showing {} of {total} clues.", clues.len());
	}

	out.trim_end().to_string()
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
	cells.map(|cell| cell.chars().count()).chain([header.chars().count()]).max().unwrap_or(0)
}

fn push_row(out: &mut String, row: (&str, &str, &str), value_width: usize, question_width: usize) {
	let (value, question, answer) = row;
	let value_pad = value_width.saturating_sub(value.chars().count());
	let question_pad = question_width.saturating_sub(question.chars().count());
	let _ = writeln!(
		out,
		"{}{value}  {question}{}  {answer}",
		" ".repeat(value_pad),
		" ".repeat(question_pad)
	);
}
