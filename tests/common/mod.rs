//! Common test utilities

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use sales_report::Config;
use tempfile::TempDir;

pub const SALESMEN: &str = "CC;1000;Juan;Gomez\nTI;1001;Maria;Lopez\nCC;1002;Carlos;Perez\n";
pub const PRODUCTS: &str = "1;Producto1;10.00\n2;Producto2;2.5\n3;Producto3;99.999\n";

/// Fresh data directory holding the given reference files
pub fn setup_data_dir(salesmen: Option<&str>, products: Option<&str>) -> (TempDir, Config) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    if let Some(salesmen) = salesmen {
        write(dir.path(), "salesmen_info.txt", salesmen);
    }
    if let Some(products) = products {
        write(dir.path(), "products_info.txt", products);
    }
    let config = Config::for_dir(dir.path());
    (dir, config)
}

pub fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("Failed to write fixture file");
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("Failed to read report")
}

/// Data rows of a report, header dropped
pub fn rows(report: &str) -> Vec<Vec<String>> {
    report
        .lines()
        .skip(1)
        .map(|line| line.split(';').map(str::to_string).collect())
        .collect()
}
