use std::process::ExitCode;

use ecommerce_scraper::{run, ScraperConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // ログ設定（RUST_LOG が無ければデフォルト）
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ecommerce_scraper=debug")),
        )
        .init();

    let output_dir = std::env::var("SCRAPER_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string());
    let headless = std::env::var("SCRAPER_HEADLESS")
        .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
        .unwrap_or(true);

    let config = ScraperConfig::new(output_dir).with_headless(headless);

    match run(&config).await {
        Ok(report) => {
            for job in &report.jobs {
                info!("{}: {} products", job.path.display(), job.products);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("エラー: {}", e);
            ExitCode::FAILURE
        }
    }
}
