pub mod render;

use std::{io::Write, path::PathBuf};

use clap::{
	Parser,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use time::{
	Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use trivia_service::{DateRange, SearchQuery, TriviaService};

#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab", styles = styles())]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Category title keyword. Keywords are read line by line from stdin when omitted.
	pub query: Option<String>,
	/// Restrict matches to this category id. 0 means any.
	#[arg(long, value_name = "ID", default_value_t = 0)]
	pub category_id: i64,
	/// Only clues with this dollar value. 0 means any.
	#[arg(long, value_name = "DOLLARS", default_value_t = 0)]
	pub value: i64,
	/// Earliest air date, YYYY-MM-DD or RFC 3339.
	#[arg(long, value_name = "DATE", value_parser = parse_min_date, requires = "max_date")]
	pub min_date: Option<OffsetDateTime>,
	/// Latest air date, YYYY-MM-DD or RFC 3339.
	#[arg(long, value_name = "DATE", value_parser = parse_max_date, requires = "min_date")]
	pub max_date: Option<OffsetDateTime>,
	/// Print results as JSON instead of a table.
	#[arg(long)]
	pub json: bool,
}
impl Args {
	/// Everything but the keyword, which varies per search in line mode.
	pub fn query_for(&self, keyword: &str) -> color_eyre::Result<SearchQuery> {
		let mut query =
			SearchQuery::new(keyword).with_category_id(self.category_id).with_value(self.value);

		if let (Some(start), Some(end)) = (self.min_date, self.max_date) {
			query = query.with_date_range(DateRange::new(start, end)?);
		}

		Ok(query)
	}
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Yellow.on_default() | Effects::BOLD)
		.usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
		.literal(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = trivia_config::load(&args.config)?;

	init_tracing(&config);

	let service = TriviaService::new(config)?;

	if let Err(err) = service.load_catalog().await {
		eprintln!("Search is unavailable for this session: {err}");

		return Err(err.into());
	}

	let mut stdout = std::io::stdout().lock();

	match args.query.as_deref() {
		Some(keyword) => {
			let outcome = service.search(&args.query_for(keyword)?).await?;

			writeln!(stdout, "{}", render::render_outcome(&outcome, args.json)?)?;

			Ok(())
		},
		None => {
			let stdin = BufReader::new(tokio::io::stdin());

			run_lines(&service, &args, stdin, &mut stdout).await
		},
	}
}

/// Runs one search per input line until EOF. A failed search is reported and the loop
/// keeps going.
pub async fn run_lines<R, W>(
	service: &TriviaService,
	args: &Args,
	reader: R,
	out: &mut W,
) -> color_eyre::Result<()>
where
	R: AsyncBufRead + Unpin,
	W: Write,
{
	let mut lines = reader.lines();

	while let Some(line) = lines.next_line().await? {
		let query = args.query_for(line.trim_end_matches('\r'))?;

		match service.search(&query).await {
			Ok(outcome) => {
				let rendered = render::render_outcome(&outcome, args.json)?;

				if !rendered.is_empty() {
					writeln!(out, "{rendered}")?;
				}
			},
			Err(err) => {
				tracing::warn!(error = %err, "Search failed.");
				writeln!(out, "Search failed: {err}")?;
			},
		}
	}

	Ok(())
}

pub fn parse_min_date(raw: &str) -> Result<OffsetDateTime, String> {
	parse_date_bound(raw, false)
}

pub fn parse_max_date(raw: &str) -> Result<OffsetDateTime, String> {
	parse_date_bound(raw, true)
}

/// A bare date covers the whole UTC day: midnight for a lower bound, 23:59:59 for an upper.
fn parse_date_bound(raw: &str, end_of_day: bool) -> Result<OffsetDateTime, String> {
	let raw = raw.trim();

	if let Ok(timestamp) = OffsetDateTime::parse(raw, &Rfc3339) {
		return Ok(timestamp);
	}

	let date = Date::parse(raw, format_description!("[year]-[month]-[day]"))
		.map_err(|_| format!("Expected YYYY-MM-DD or an RFC 3339 timestamp, got {raw:?}."))?;
	let time = if end_of_day {
		date.with_hms(23, 59, 59).map_err(|err| err.to_string())?
	} else {
		date.midnight()
	};

	Ok(time.assume_utc())
}

fn init_tracing(config: &trivia_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
