use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape metadata from pages listed in a sitemap XML file")]
pub struct Args {
    /// URL to the sitemap XML file
    pub sitemap_url: String,

    /// Number of pages to scrape
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub page_count: u64,

    /// Output file name (default: auto-generated with domain and timestamp)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Delay between requests in seconds
    #[arg(short, long, default_value_t = 1.0)]
    pub delay: f64,
}
