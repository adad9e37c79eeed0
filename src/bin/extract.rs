//! Print the canonical text (or the full prompt) for an invitation URL.

use anyhow::Result;
use clap::Parser;
use voucher_parser::{
    completion::build_prompt,
    config::Config,
    extractor::{ExtractionRules, extract_canonical},
    fetcher::fetch_html,
    telemetry,
};

#[derive(Parser)]
#[command(name = "extract", about = "Flatten a wedding invitation page into canonical text")]
struct Args {
    /// Print the prompt sent to the model instead of the bare canonical text
    #[arg(long)]
    prompt: bool,
    /// Invitation page URL
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format())?;

    let html = fetch_html(&args.url).await;
    let canonical = extract_canonical(&html, ExtractionRules::shared());

    if args.prompt {
        println!("{}", build_prompt(&canonical));
    } else {
        println!("{canonical}");
    }
    Ok(())
}
