//! 商品関連の型定義

use serde::{Deserialize, Serialize};

/// 商品カード1件分のデータ
///
/// フィールド順がそのままCSVの列順になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: String,
    pub price: f64,
    /// 星アイコンの個数
    pub rating: u32,
    pub num_of_reviews: u32,
}

impl Product {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        rating: u32,
        num_of_reviews: u32,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            rating,
            num_of_reviews,
        }
    }
}
