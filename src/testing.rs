//! テスト用のインメモリ `BrowserDriver`

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::page::{ACCEPT_COOKIES_XPATH, LOAD_MORE_SELECTOR};
use crate::traits::{BrowserDriver, Locator};

/// 待機なしの設定
pub fn test_config() -> ScraperConfig {
    ScraperConfig::default()
        .with_timeout(Duration::ZERO)
        .with_poll_interval(Duration::ZERO)
        .with_load_more_pause(Duration::ZERO)
}

#[derive(Debug, Clone, Default)]
pub struct FakePage {
    html: String,
    overlay: bool,
    batches: Vec<String>,
    endless: bool,
}

impl FakePage {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Default::default()
        }
    }

    pub fn with_overlay(mut self) -> Self {
        self.overlay = true;
        self
    }

    /// クリックごとに1バッチずつHTML末尾へ追加される
    pub fn with_load_more_batches(mut self, batches: Vec<String>) -> Self {
        self.batches = batches;
        self
    }

    pub fn with_endless_load_more(mut self) -> Self {
        self.endless = true;
        self
    }

    fn has_load_more(&self) -> bool {
        self.endless || !self.batches.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct FakeDriver {
    pages: HashMap<String, FakePage>,
    current: Option<FakePage>,
    calls: Vec<String>,
    closed: bool,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn current_mut(&mut self) -> Result<&mut FakePage, ScraperError> {
        self.current
            .as_mut()
            .ok_or_else(|| ScraperError::Navigation("ページが開かれていません".into()))
    }
}

#[async_trait]
impl BrowserDriver for FakeDriver {
    type Element = Locator;

    async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<(), ScraperError> {
        self.calls.push(format!("navigate {}", url));
        let page = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScraperError::Navigation(format!("unknown url: {}", url)))?;
        self.current = Some(page);
        Ok(())
    }

    async fn wait_for_clickable(
        &mut self,
        locator: &Locator,
        _timeout: Duration,
    ) -> Result<Option<Locator>, ScraperError> {
        self.calls.push(format!("wait {}", locator));
        let page = self.current_mut()?;
        let present = match locator {
            Locator::XPath(expr) if expr == ACCEPT_COOKIES_XPATH => page.overlay,
            Locator::Css(selector) if selector == LOAD_MORE_SELECTOR => page.has_load_more(),
            _ => false,
        };
        Ok(present.then(|| locator.clone()))
    }

    async fn click(&mut self, element: &Locator) -> Result<(), ScraperError> {
        self.calls.push(format!("click {}", element));
        let page = self.current_mut()?;
        if matches!(element, Locator::XPath(expr) if expr == ACCEPT_COOKIES_XPATH) {
            page.overlay = false;
        }
        Ok(())
    }

    async fn hover_and_click(&mut self, element: &Locator) -> Result<(), ScraperError> {
        self.calls.push(format!("hover_and_click {}", element));
        let page = self.current_mut()?;
        if matches!(element, Locator::Css(selector) if selector == LOAD_MORE_SELECTOR)
            && !page.batches.is_empty()
        {
            let batch = page.batches.remove(0);
            page.html.push_str(&batch);
        }
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String, ScraperError> {
        self.calls.push("page_source".to_string());
        Ok(self.current_mut()?.html.clone())
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        self.calls.push("close".to_string());
        self.closed = true;
        Ok(())
    }
}
