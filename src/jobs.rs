//! スクレイピング対象ページの一覧

/// 1ページ分のジョブ（出力ファイル名, URL, ページ展開の要否）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageJob {
    pub filename: &'static str,
    pub url: &'static str,
    pub paginate: bool,
}

impl PageJob {
    pub const fn new(filename: &'static str, url: &'static str, paginate: bool) -> Self {
        Self {
            filename,
            url,
            paginate,
        }
    }
}

/// 実行順のジョブ一覧
pub const PAGE_JOBS: [PageJob; 6] = [
    PageJob::new(
        "home.csv",
        "https://webscraper.io/test-sites/e-commerce/more/",
        false,
    ),
    PageJob::new(
        "computers.csv",
        "https://webscraper.io/test-sites/e-commerce/more/computers",
        false,
    ),
    PageJob::new(
        "laptops.csv",
        "https://webscraper.io/test-sites/e-commerce/more/computers/laptops",
        true,
    ),
    PageJob::new(
        "tablets.csv",
        "https://webscraper.io/test-sites/e-commerce/more/computers/tablets",
        true,
    ),
    PageJob::new(
        "phones.csv",
        "https://webscraper.io/test-sites/e-commerce/more/phones",
        false,
    ),
    PageJob::new(
        "touch.csv",
        "https://webscraper.io/test-sites/e-commerce/more/phones/touch",
        true,
    ),
];
