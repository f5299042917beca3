//! 1ページ分のスクレイピング手順
//!
//! 遷移 → Cookie同意の解除 → (「Load more」による展開) → HTML取得

use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::{BrowserDriver, Locator};

/// Cookie同意ボタン（表示テキストが "Accept" のボタン）
pub const ACCEPT_COOKIES_XPATH: &str = "//button[text()='Accept']";
/// 「Load more」ボタン
pub const LOAD_MORE_SELECTOR: &str = ".load-more-button";

/// ページを開いて読み込み完了を待つ
pub async fn fetch<D: BrowserDriver>(
    driver: &mut D,
    url: &str,
    config: &ScraperConfig,
) -> Result<(), ScraperError> {
    driver.navigate(url, config.timeout).await
}

/// Cookie同意オーバーレイがあれば閉じる
///
/// ボタンが見つからないのは正常系として扱う。閉じた場合は `true`。
pub async fn accept_cookies<D: BrowserDriver>(
    driver: &mut D,
    config: &ScraperConfig,
) -> Result<bool, ScraperError> {
    let locator = Locator::xpath(ACCEPT_COOKIES_XPATH);
    match driver.wait_for_clickable(&locator, config.timeout).await? {
        Some(button) => {
            driver.click(&button).await?;
            info!("Accepted cookies");
            Ok(true)
        }
        None => {
            info!("No cookies button found");
            Ok(false)
        }
    }
}

/// 「Load more」ボタンが消えるまでクリックし続ける
///
/// 戻り値はクリック回数。`max_load_more_clicks` に達した場合は警告して打ち切る。
pub async fn load_all<D: BrowserDriver>(
    driver: &mut D,
    config: &ScraperConfig,
) -> Result<usize, ScraperError> {
    let locator = Locator::css(LOAD_MORE_SELECTOR);
    let mut clicks = 0;

    loop {
        if let Some(max) = config.max_load_more_clicks {
            if clicks >= max {
                warn!("Load more clicked {} times, stopping at limit", clicks);
                break;
            }
        }

        match driver.wait_for_clickable(&locator, config.timeout).await? {
            Some(button) => {
                driver.hover_and_click(&button).await?;
                clicks += 1;
                sleep(config.load_more_pause).await;
            }
            None => {
                info!("No more pages to load ({} clicks)", clicks);
                break;
            }
        }
    }

    Ok(clicks)
}

/// 展開済みのページHTMLを返す
pub async fn materialize<D: BrowserDriver>(
    driver: &mut D,
    url: &str,
    paginate: bool,
    config: &ScraperConfig,
) -> Result<MaterializedPage, ScraperError> {
    fetch(driver, url, config).await?;
    let overlay_dismissed = accept_cookies(driver, config).await?;
    let load_more_clicks = if paginate {
        load_all(driver, config).await?
    } else {
        0
    };
    let html = driver.page_source().await?;

    Ok(MaterializedPage {
        html,
        overlay_dismissed,
        load_more_clicks,
    })
}

/// 展開済みページ
#[derive(Debug, Clone)]
pub struct MaterializedPage {
    pub html: String,
    pub overlay_dismissed: bool,
    pub load_more_clicks: usize,
}
