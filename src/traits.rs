use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ScraperError;

/// 要素の探し方
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css={}", s),
            Locator::XPath(s) => write!(f, "xpath={}", s),
        }
    }
}

/// ブラウザ操作の境界
///
/// パイプラインはこのトレイト越しにしかブラウザを触らない。
#[async_trait]
pub trait BrowserDriver: Send {
    type Element: Send + Sync;

    /// URLへ遷移し、`document.readyState` が complete になるまで最大 `timeout` 待機
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError>;

    /// クリック可能な要素が現れるまで待機（タイムアウト時は `None`）
    async fn wait_for_clickable(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Option<Self::Element>, ScraperError>;

    /// 要素をクリック
    async fn click(&mut self, element: &Self::Element) -> Result<(), ScraperError>;

    /// ポインタを要素上に移動してからクリック
    async fn hover_and_click(&mut self, element: &Self::Element) -> Result<(), ScraperError>;

    /// 現在のDOMをHTML文字列で取得
    async fn page_source(&mut self) -> Result<String, ScraperError>;

    /// リソース解放
    async fn close(&mut self) -> Result<(), ScraperError>;
}
