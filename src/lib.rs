//! e-commerce テストサイト スクレイパーライブラリ
//!
//! - webscraper.io の商品一覧ページをブラウザで開く
//! - Cookie同意ボタン・「Load more」ボタンを処理して全商品を表示
//! - 商品カードを抽出してページごとのCSVに保存
//!
//! # 使用例
//!
//! ```rust,ignore
//! use ecommerce_scraper::{run, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScraperConfig::new("./output").with_headless(false);
//!
//!     let report = run(&config).await.unwrap();
//!     println!("Products: {}", report.total_products());
//! }
//! ```
//!
//! # HTMLのみを解析する例
//!
//! ```rust,ignore
//! use ecommerce_scraper::product::{extract_products, write_products};
//!
//! let products = extract_products(&html)?;
//! write_products(std::path::Path::new("tablets.csv"), &products)?;
//! ```

pub mod chrome;
pub mod config;
pub mod error;
pub mod jobs;
pub mod page;
pub mod product;
pub mod runner;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

// 主要な型をリエクスポート
pub use chrome::ChromeDriver;
pub use config::ScraperConfig;
pub use error::ScraperError;
pub use jobs::{PageJob, PAGE_JOBS};
pub use product::Product;
pub use runner::{run, run_with, JobReport, RunReport};
pub use traits::{BrowserDriver, Locator};
