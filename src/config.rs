//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::{Path, PathBuf};

/// Default name of the salespeople reference file
pub const DEFAULT_SALESMEN_FILE: &str = "salesmen_info.txt";

/// Default name of the product catalog file
pub const DEFAULT_PRODUCTS_FILE: &str = "products_info.txt";

/// Prefix shared by every per-salesperson sales file
pub const DEFAULT_SALES_FILE_PREFIX: &str = "ventas_";

pub const DEFAULT_SALESMEN_REPORT_FILE: &str = "salesmen_report.csv";
pub const DEFAULT_PRODUCTS_REPORT_FILE: &str = "products_report.csv";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding the reference files and the sales files
    pub data_dir: PathBuf,

    /// Directory the two reports are written to
    pub output_dir: PathBuf,

    /// Salespeople file name (relative to `data_dir`)
    pub salesmen_file: String,

    /// Product catalog file name (relative to `data_dir`)
    pub products_file: String,

    /// Name prefix identifying sales files
    pub sales_file_prefix: String,

    pub salesmen_report_file: String,
    pub products_report_file: String,

    /// When no sales file exists, emit zero-filled reports instead of failing
    pub allow_empty_sales: bool,
}

impl Config {
    /// Defaults rooted at `dir` for both input and output
    pub fn for_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        Self {
            data_dir: dir.clone(),
            output_dir: dir,
            salesmen_file: DEFAULT_SALESMEN_FILE.to_string(),
            products_file: DEFAULT_PRODUCTS_FILE.to_string(),
            sales_file_prefix: DEFAULT_SALES_FILE_PREFIX.to_string(),
            salesmen_report_file: DEFAULT_SALESMEN_REPORT_FILE.to_string(),
            products_report_file: DEFAULT_PRODUCTS_REPORT_FILE.to_string(),
            allow_empty_sales: false,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = env::var("SALES_DATA_DIR").unwrap_or_else(|_| ".".to_string());
        let mut config = Self::for_dir(&data_dir);

        if let Ok(output_dir) = env::var("SALES_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(output_dir);
        }

        config.salesmen_file = file_name_var("SALESMEN_FILE", DEFAULT_SALESMEN_FILE)?;
        config.products_file = file_name_var("PRODUCTS_FILE", DEFAULT_PRODUCTS_FILE)?;
        config.sales_file_prefix = file_name_var("SALES_FILE_PREFIX", DEFAULT_SALES_FILE_PREFIX)?;
        config.salesmen_report_file =
            file_name_var("SALESMEN_REPORT_FILE", DEFAULT_SALESMEN_REPORT_FILE)?;
        config.products_report_file =
            file_name_var("PRODUCTS_REPORT_FILE", DEFAULT_PRODUCTS_REPORT_FILE)?;

        config.allow_empty_sales = env::var("ALLOW_EMPTY_SALES")
            .unwrap_or_else(|_| "false".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("ALLOW_EMPTY_SALES"))?;

        Ok(config)
    }

    pub fn salesmen_path(&self) -> PathBuf {
        self.data_dir.join(&self.salesmen_file)
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn salesmen_report_path(&self) -> PathBuf {
        self.output_dir.join(&self.salesmen_report_file)
    }

    pub fn products_report_path(&self) -> PathBuf {
        self.output_dir.join(&self.products_report_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_dir(".")
    }
}

fn file_name_var(key: &'static str, default: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::InvalidValue(key)),
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_string()),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue(key)),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_dir_uses_default_names() {
        let config = Config::for_dir("/data");

        assert_eq!(config.salesmen_path(), PathBuf::from("/data/salesmen_info.txt"));
        assert_eq!(config.products_path(), PathBuf::from("/data/products_info.txt"));
        assert_eq!(config.sales_file_prefix, "ventas_");
        assert_eq!(
            config.salesmen_report_path(),
            PathBuf::from("/data/salesmen_report.csv")
        );
        assert_eq!(
            config.products_report_path(),
            PathBuf::from("/data/products_report.csv")
        );
        assert!(!config.allow_empty_sales);
    }

    #[test]
    fn test_output_dir_is_independent() {
        let mut config = Config::for_dir("/in");
        config.output_dir = PathBuf::from("/out");

        assert_eq!(config.products_path(), PathBuf::from("/in/products_info.txt"));
        assert_eq!(
            config.products_report_path(),
            PathBuf::from("/out/products_report.csv")
        );
    }
}
