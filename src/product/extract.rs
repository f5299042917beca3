//! 商品一覧HTMLからのレコード抽出

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::ScraperError;

use super::types::Product;

const CARD_SELECTOR: &str = ".col-md-4";
const TITLE_SELECTOR: &str = "a.title";
const DESCRIPTION_SELECTOR: &str = "p.card-text";
const PRICE_SELECTOR: &str = "h4.price";
const STAR_SELECTOR: &str = ".fa.fa-star";
const REVIEWS_SELECTOR: &str = ".ratings .pull-right";

const NO_TITLE: &str = "No title";
const NO_DESCRIPTION: &str = "No description";

/// 解析済みセレクタを保持する抽出器
#[derive(Debug)]
pub struct ProductExtractor {
    card: Selector,
    title: Selector,
    description: Selector,
    price: Selector,
    star: Selector,
    reviews: Selector,
}

fn parse_selector(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector(format!("{}: {}", selector, e)))
}

/// セレクタに一致する最初の要素のテキスト（前後の空白除去済み）
///
/// 要素が無い場合は `None`。各フィールドはこの結果に既定値を当てる。
pub(crate) fn optional_text(card: &ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// "$9.99" → 9.99。空文字は 0.0、数値として読めない場合は警告して 0.0
fn parse_price(raw: &str) -> f64 {
    let digits = raw.trim().trim_start_matches('$').trim();
    if digits.is_empty() {
        return 0.0;
    }
    match digits.parse::<f64>() {
        Ok(price) => price,
        Err(e) => {
            warn!("Malformed price {:?}, using 0.0: {}", raw, e);
            0.0
        }
    }
}

/// "3 reviews" → 3。空文字は 0、先頭トークンが整数でない場合は警告して 0
///
/// 件数は `u32` に限定しているため、負数や `u32::MAX` を超える値も不正として 0 になる。
fn parse_review_count(raw: &str) -> u32 {
    let Some(token) = raw.split_whitespace().next() else {
        return 0;
    };
    match token.parse::<u32>() {
        Ok(count) => count,
        Err(e) => {
            warn!("Malformed review count {:?}, using 0: {}", raw, e);
            0
        }
    }
}

impl ProductExtractor {
    pub fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            card: parse_selector(CARD_SELECTOR)?,
            title: parse_selector(TITLE_SELECTOR)?,
            description: parse_selector(DESCRIPTION_SELECTOR)?,
            price: parse_selector(PRICE_SELECTOR)?,
            star: parse_selector(STAR_SELECTOR)?,
            reviews: parse_selector(REVIEWS_SELECTOR)?,
        })
    }

    /// ドキュメント順に全商品カードを抽出
    pub fn extract(&self, html: &str) -> Vec<Product> {
        let document = Html::parse_document(html);
        let products: Vec<Product> = document
            .select(&self.card)
            .map(|card| self.extract_card(&card))
            .collect();

        debug!("Extracted {} products", products.len());
        products
    }

    fn extract_card(&self, card: &ElementRef<'_>) -> Product {
        let title = optional_text(card, &self.title).unwrap_or_else(|| NO_TITLE.to_string());
        let description = optional_text(card, &self.description)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());
        let price = optional_text(card, &self.price)
            .map(|text| parse_price(&text))
            .unwrap_or(0.0);
        let rating = card.select(&self.star).count() as u32;
        let num_of_reviews = optional_text(card, &self.reviews)
            .map(|text| parse_review_count(&text))
            .unwrap_or(0);

        Product {
            title,
            description,
            price,
            rating,
            num_of_reviews,
        }
    }
}

/// HTML文字列から商品一覧を抽出
pub fn extract_products(html: &str) -> Result<Vec<Product>, ScraperError> {
    Ok(ProductExtractor::new()?.extract(html))
}
