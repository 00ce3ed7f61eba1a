use crate::arguments::Args;
use anyhow::{Context, bail};
use chrono::Local;
use metacheck_scanner::domain::check_canonical;
use metacheck_scanner::metadata::fetch_metadata;
use metacheck_scanner::report::ReportWriter;
use metacheck_scanner::sitemap::fetch_sitemap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Validated inputs for one run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub sitemap_url: String,
    pub page_count: usize,
    pub output: PathBuf,
    pub delay: Duration,
}

impl PipelineConfig {
    /// Validate CLI arguments before any network activity.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Url::parse(&args.sitemap_url)
            .with_context(|| format!("invalid sitemap URL: {}", args.sitemap_url))?;

        if !args.delay.is_finite() || args.delay < 0.0 {
            bail!("delay must be a non-negative number of seconds, got {}", args.delay);
        }

        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.sitemap_url));

        Ok(Self {
            sitemap_url: args.sitemap_url.clone(),
            page_count: args.page_count as usize,
            output,
            delay: Duration::from_secs_f64(args.delay),
        })
    }
}

/// What a completed run looked like.
#[derive(Debug)]
pub struct PipelineSummary {
    /// Pages actually processed (min of page_count and sitemap size).
    pub processed: usize,
    /// Pages fetched without error.
    pub succeeded: usize,
    pub output: PathBuf,
}

/// Auto-generated report path: `output/<domain>_metadata_check_<timestamp>.txt`.
///
/// The domain is the sitemap host lowercased, with a leading `www.`
/// stripped and anything outside `[A-Za-z0-9_-]` replaced by `_`.
pub fn default_output_path(sitemap_url: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");

    let host = Url::parse(sitemap_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string));

    match host {
        Some(host) => {
            let host = host.to_lowercase();
            let domain = host.strip_prefix("www.").unwrap_or(&host);
            let domain: String = domain
                .chars()
                .map(|c| {
                    if c.is_alphanumeric() || c == '-' || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            PathBuf::from(format!("output/{domain}_metadata_check_{timestamp}.txt"))
        }
        None => PathBuf::from(format!("output/metadata_check_{timestamp}.txt")),
    }
}

/// Run the whole pipeline: fetch the sitemap once, then walk the first
/// `page_count` URLs strictly in order, one request at a time, writing and
/// flushing a report block per page.
///
/// Sitemap-level failures are fatal and happen before the report file is
/// created. Page-level failures are recorded in the report and never stop
/// the run.
pub async fn run(config: &PipelineConfig) -> anyhow::Result<PipelineSummary> {
    let client = metacheck_scanner::build_client(REQUEST_TIMEOUT)?;

    println!("Fetching sitemap from: {}", config.sitemap_url);
    let urls = fetch_sitemap(&client, &config.sitemap_url)
        .await
        .with_context(|| format!("error fetching sitemap {}", config.sitemap_url))?;

    if urls.is_empty() {
        bail!("No URLs found in sitemap {}", config.sitemap_url);
    }
    println!("Found {} URLs in sitemap", urls.len());

    if urls.len() < config.page_count {
        println!(
            "Sitemap lists only {} of the {} requested pages; scraping all of them",
            urls.len(),
            config.page_count
        );
    }
    let targets: Vec<&String> = urls.iter().take(config.page_count).collect();
    let total = targets.len();

    println!("Scraping {} pages...", total);
    println!("Output will be saved to: {}", config.output.display());

    // Opened only after the sitemap fetch succeeded, so a fatal sitemap
    // error leaves no report file behind.
    let mut writer = ReportWriter::create(&config.output)?;

    let mut succeeded = 0;
    for (i, url) in targets.iter().enumerate() {
        println!("Scraping {}/{}: {}", i + 1, total, url);

        let metadata = fetch_metadata(&client, url).await;
        let match_result = check_canonical(&metadata);
        writer.write_entry(&metadata, match_result)?;

        if let Some(error) = &metadata.fetch_error {
            warn!("Fetch failed for {}: {}", url, error);
        } else {
            succeeded += 1;
        }
        if !match_result.is_matched() {
            println!("!!! CANONICAL DID NOT MATCH - {}", url);
        }

        // Pacing between requests, skipped after the last page.
        if i + 1 < total && !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    info!("Run complete: {}/{} pages succeeded", succeeded, total);
    Ok(PipelineSummary {
        processed: total,
        succeeded,
        output: config.output.clone(),
    })
}
