use clap::Parser;
use metacheck::arguments::Args;
use metacheck::pipeline::{self, PipelineConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match PipelineConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    match pipeline::run(&config).await {
        Ok(summary) => {
            println!();
            println!("Results saved to: {}", summary.output.display());
            println!(
                "Scraped {}/{} pages successfully",
                summary.succeeded, summary.processed
            );
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
