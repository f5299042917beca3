//! 商品データモジュール
//!
//! 商品一覧ページのHTMLから商品レコードを抽出し、CSVに保存する

mod extract;
mod types;
mod writer;

pub use extract::{extract_products, ProductExtractor};
pub use types::Product;
pub use writer::{write_products, CSV_HEADER};
