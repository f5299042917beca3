use std::path::PathBuf;
use std::time::Duration;

/// 要素待機のデフォルトタイムアウト
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// 要素ポーリング間隔
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
/// 「Load more」クリック後の待機時間
pub const DEFAULT_LOAD_MORE_PAUSE: Duration = Duration::from_secs(1);
/// 「Load more」クリック回数の上限
pub const DEFAULT_MAX_LOAD_MORE_CLICKS: usize = 500;

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub output_dir: PathBuf,
    pub headless: bool,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub load_more_pause: Duration,
    /// `None` の場合はボタンが消えるまでクリックし続ける
    pub max_load_more_clicks: Option<usize>,
    pub chrome_executable: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            headless: true,
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            load_more_pause: DEFAULT_LOAD_MORE_PAUSE,
            max_load_more_clicks: Some(DEFAULT_MAX_LOAD_MORE_CLICKS),
            chrome_executable: None,
        }
    }
}

impl ScraperConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_load_more_pause(mut self, pause: Duration) -> Self {
        self.load_more_pause = pause;
        self
    }

    pub fn with_max_load_more_clicks(mut self, max: Option<usize>) -> Self {
        self.max_load_more_clicks = max;
        self
    }

    pub fn with_chrome_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_executable = Some(path.into());
        self
    }

    /// 明示指定 → CHROME_PATH → CHROMIUM_PATH の順で Chrome パスを解決
    pub fn resolve_chrome_executable(&self) -> Option<PathBuf> {
        self.chrome_executable.clone().or_else(|| {
            std::env::var("CHROME_PATH")
                .or_else(|_| std::env::var("CHROMIUM_PATH"))
                .ok()
                .map(PathBuf::from)
        })
    }
}
