use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = trivia_search::Args::parse();
	trivia_search::run(args).await
}
