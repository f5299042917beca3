//! ジョブ一覧の実行
//!
//! ブラウザセッションは実行ごとに生成し、成功・失敗に関わらず必ず閉じる。

use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::chrome::ChromeDriver;
use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::jobs::{PageJob, PAGE_JOBS};
use crate::page;
use crate::product::{write_products, ProductExtractor};
use crate::traits::BrowserDriver;

/// 1ジョブの実行結果
#[derive(Debug, Clone, PartialEq)]
pub struct JobReport {
    pub filename: String,
    pub path: PathBuf,
    pub products: usize,
    pub load_more_clicks: usize,
    pub overlay_dismissed: bool,
}

/// 全ジョブの実行結果（実行順）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub jobs: Vec<JobReport>,
}

impl RunReport {
    pub fn total_products(&self) -> usize {
        self.jobs.iter().map(|j| j.products).sum()
    }
}

/// 1ページをスクレイピングしてCSVに保存
pub async fn run_job<D: BrowserDriver>(
    driver: &mut D,
    job: &PageJob,
    extractor: &ProductExtractor,
    config: &ScraperConfig,
) -> Result<JobReport, ScraperError> {
    info!("Scraping {} -> {}", job.url, job.filename);

    let materialized = page::materialize(driver, job.url, job.paginate, config).await?;
    let products = extractor.extract(&materialized.html);

    let path = config.output_dir.join(job.filename);
    let written = write_products(&path, &products)?;

    Ok(JobReport {
        filename: job.filename.to_string(),
        path,
        products: written,
        load_more_clicks: materialized.load_more_clicks,
        overlay_dismissed: materialized.overlay_dismissed,
    })
}

/// ジョブを順番に実行する。最初のエラーで残りのジョブは中止
pub async fn run_jobs<D: BrowserDriver>(
    driver: &mut D,
    jobs: &[PageJob],
    config: &ScraperConfig,
) -> Result<RunReport, ScraperError> {
    std::fs::create_dir_all(&config.output_dir)?;
    let extractor = ProductExtractor::new()?;

    let mut report = RunReport::default();
    for job in jobs {
        let job_report = run_job(driver, job, &extractor, config).await?;
        report.jobs.push(job_report);
    }
    Ok(report)
}

/// ジョブを実行し、結果に関わらずセッションを閉じる
///
/// ジョブのエラーはセッション終了時のエラーより優先される。
pub async fn run_with<D: BrowserDriver>(
    driver: &mut D,
    jobs: &[PageJob],
    config: &ScraperConfig,
) -> Result<RunReport, ScraperError> {
    let result = run_jobs(driver, jobs, config).await;
    let closed = driver.close().await;

    match (result, closed) {
        (Ok(report), Ok(())) => {
            info!(
                "Run complete: {} jobs, {} products",
                report.jobs.len(),
                report.total_products()
            );
            Ok(report)
        }
        (Ok(_), Err(e)) => Err(e),
        (Err(e), closed) => {
            if let Err(close_err) = closed {
                warn!("Failed to close browser after error: {}", close_err);
            }
            error!("Run aborted: {}", e);
            Err(e)
        }
    }
}

/// Chromeを起動して全ページをスクレイピング
pub async fn run(config: &ScraperConfig) -> Result<RunReport, ScraperError> {
    let mut driver = ChromeDriver::launch(config).await?;
    run_with(&mut driver, &PAGE_JOBS, config).await
}
