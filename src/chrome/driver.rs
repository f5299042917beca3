use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::{BrowserDriver, Locator};

/// 表示中・有効な要素かどうかを判定するJS（Selenium の element_to_be_clickable 相当）
const CLICKABLE_JS: &str = r#"
function() {
    if (this.disabled) return false;
    const style = window.getComputedStyle(this);
    if (style.display === 'none' || style.visibility === 'hidden') return false;
    const rect = this.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
}
"#;

pub struct ChromeDriver {
    browser: Option<Browser>,
    page: Option<Page>,
    handler_task: Option<JoinHandle<()>>,
    poll_interval: Duration,
}

impl ChromeDriver {
    /// ブラウザを起動して空ページを開く
    pub async fn launch(config: &ScraperConfig) -> Result<Self, ScraperError> {
        info!("Launching browser (headless={})...", config.headless);

        let mut builder = BrowserConfig::builder().window_size(1280, 800);

        if let Some(path) = config.resolve_chrome_executable() {
            debug!("Using chrome executable: {:?}", path);
            builder = builder.chrome_executable(path);
        }

        if !config.headless {
            builder = builder.with_head();
        }

        builder = builder
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");

        let browser_config = builder
            .build()
            .map_err(|e| ScraperError::BrowserInit(format!("ブラウザ設定エラー: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ブラウザイベントハンドラをバックグラウンドで実行
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {:?}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        info!("Browser launched");
        Ok(Self {
            browser: Some(browser),
            page: Some(page),
            handler_task: Some(handler_task),
            poll_interval: config.poll_interval,
        })
    }

    fn get_page(&self) -> Result<&Page, ScraperError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("ブラウザが初期化されていません".into()))
    }

    async fn find(&self, locator: &Locator) -> Option<Element> {
        let page = self.get_page().ok()?;
        let found = match locator {
            Locator::Css(selector) => page.find_element(selector.as_str()).await,
            Locator::XPath(expr) => page.find_xpath(expr.as_str()).await,
        };
        match found {
            Ok(element) => Some(element),
            Err(e) => {
                debug!("{} not found yet: {}", locator, e);
                None
            }
        }
    }

    async fn is_clickable(element: &Element) -> bool {
        match element.call_js_fn(CLICKABLE_JS, false).await {
            Ok(ret) => ret
                .result
                .value
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            Err(e) => {
                debug!("Clickable check error: {}", e);
                false
            }
        }
    }
}

/// `document.readyState` が complete になるまでポーリング
///
/// 評価エラー（リダイレクト中のコンテキスト破棄など）は記録して待機を続ける。
/// タイムアウトした場合は `false`。
async fn poll_ready_state<F, Fut, E>(
    mut ready_state: F,
    timeout: Duration,
    interval: Duration,
) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, E>>,
    E: fmt::Display,
{
    let start = Instant::now();
    loop {
        match ready_state().await {
            Ok(state) if state == "complete" => {
                debug!("Page load complete after {:?}", start.elapsed());
                return true;
            }
            Ok(state) => debug!("readyState={}", state),
            Err(e) => debug!("readyState check error: {}", e),
        }

        if start.elapsed() >= timeout {
            return false;
        }
        sleep(interval).await;
    }
}

#[async_trait]
impl BrowserDriver for ChromeDriver {
    type Element = Element;

    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError> {
        let page = self.get_page()?;
        info!("Navigating to {}", url);

        page.goto(url)
            .await
            .map_err(|e| ScraperError::Navigation(format!("{}: {}", url, e)))?;

        // ページの完全なロードを待機
        let ready = poll_ready_state(
            || async move {
                page.evaluate("document.readyState")
                    .await
                    .map(|state| state.into_value::<String>().unwrap_or_default())
            },
            timeout,
            self.poll_interval,
        )
        .await;

        if !ready {
            warn!(
                "Page load not complete after {:?}, proceeding anyway: {}",
                timeout, url
            );
        }
        Ok(())
    }

    async fn wait_for_clickable(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Option<Element>, ScraperError> {
        self.get_page()?;
        let start = Instant::now();

        loop {
            if let Some(element) = self.find(locator).await {
                if Self::is_clickable(&element).await {
                    debug!("{} clickable after {:?}", locator, start.elapsed());
                    return Ok(Some(element));
                }
            }

            if start.elapsed() >= timeout {
                debug!("{} not clickable within {:?}", locator, timeout);
                return Ok(None);
            }

            sleep(self.poll_interval).await;
        }
    }

    async fn click(&mut self, element: &Element) -> Result<(), ScraperError> {
        element
            .click()
            .await
            .map_err(|e| ScraperError::Interaction(format!("クリック: {}", e)))?;
        Ok(())
    }

    async fn hover_and_click(&mut self, element: &Element) -> Result<(), ScraperError> {
        element
            .scroll_into_view()
            .await
            .map_err(|e| ScraperError::Interaction(format!("スクロール: {}", e)))?;
        element
            .hover()
            .await
            .map_err(|e| ScraperError::Interaction(format!("ホバー: {}", e)))?;
        self.click(element).await
    }

    async fn page_source(&mut self) -> Result<String, ScraperError> {
        self.get_page()?
            .content()
            .await
            .map_err(|e| ScraperError::JavaScript(format!("HTML取得: {}", e)))
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        info!("Closing browser...");

        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                debug!("Failed to close page: {}", e);
            }
        }

        let result = match self.browser.take() {
            Some(mut browser) => {
                let closed = browser
                    .close()
                    .await
                    .map(|_| ())
                    .map_err(|e| ScraperError::BrowserInit(format!("ブラウザ終了: {}", e)));
                if let Err(e) = browser.wait().await {
                    debug!("Failed to wait for browser process: {}", e);
                }
                closed
            }
            None => Ok(()),
        };

        if let Some(task) = self.handler_task.take() {
            task.abort();
        }

        info!("Browser closed");
        result
    }
}
