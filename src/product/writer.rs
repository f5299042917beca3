//! 商品一覧のCSV出力

use std::path::Path;

use tracing::info;

use crate::error::ScraperError;

use super::types::Product;

/// 出力CSVのヘッダ行
pub const CSV_HEADER: [&str; 5] = ["title", "description", "price", "rating", "num_of_reviews"];

/// 商品一覧をCSVに書き出す（既存ファイルは上書き）
///
/// 0件でもヘッダ行は必ず書く。書き込み途中で失敗した場合、ファイルは途中までの内容になる。
pub fn write_products(path: &Path, products: &[Product]) -> Result<usize, ScraperError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(CSV_HEADER)?;
    for product in products {
        writer.serialize(product)?;
    }
    writer.flush()?;

    info!("Saved {} products to {}", products.len(), path.display());
    Ok(products.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Product> {
        vec![
            Product::new("Widget", "A widget.", 9.99, 2, 3),
            Product::new("Lenovo, \"ThinkPad\"", "14\" screen,\n8GB", 1139.54, 5, 0),
            Product::new("No title", "No description", 0.0, 0, 0),
        ]
    }

    #[test]
    fn test_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let written = write_products(&path, &sample()).unwrap();
        assert_eq!(written, 3);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("title,description,price,rating,num_of_reviews\n"));
        assert!(content.contains("Widget,A widget.,9.99,2,3\n"));
        assert!(content.contains("No title,No description,0.0,0,0\n"));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 3);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("round_trip.csv");
        let products = sample();
        write_products(&path, &products).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

        let read_back: Vec<Product> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(read_back, products);
    }

    #[test]
    fn test_empty_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_products(&path, &[]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "title,description,price,rating,num_of_reviews\n");
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overwrite.csv");
        std::fs::write(&path, "stale\nstale\nstale\nstale\nstale\n").unwrap();
        write_products(&path, &sample()[..1]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(!content.contains("stale"));
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("nested").join("out.csv");
        let err = write_products(&path, &sample()).unwrap_err();
        assert!(matches!(err, ScraperError::Csv(_) | ScraperError::FileIO(_)));
    }
}
