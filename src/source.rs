//! Sales sources
//!
//! Where sales files come from. The aggregation engine only sees the
//! [`SalesSource`] trait, so tests can feed it in-memory batches.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::PathBuf;

use crate::error::{ReportError, ReportResult};

/// Provider of the sales files for one run
pub trait SalesSource {
    /// Names of every sales file, in processing order
    fn discover(&self) -> ReportResult<Vec<String>>;

    /// Open one discovered file for line-by-line reading
    fn open(&self, name: &str) -> io::Result<Box<dyn BufRead + '_>>;

    /// Where the files live, for error messages
    fn describe(&self) -> String;
}

/// Regular files in a directory whose names start with a prefix
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    prefix: String,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }
}

impl SalesSource for DirectorySource {
    fn discover(&self) -> ReportResult<Vec<String>> {
        let discovery_error = |source: io::Error| ReportError::Discovery {
            dir: self.dir.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(discovery_error)? {
            let entry = entry.map_err(discovery_error)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                tracing::debug!(file = ?entry.file_name(), "Skipping non UTF-8 file name");
                continue;
            };
            if !name.starts_with(&self.prefix) {
                continue;
            }
            // follows symlinks, so a link to a regular file counts
            match fs::metadata(entry.path()) {
                Ok(metadata) if metadata.is_file() => names.push(name.to_string()),
                Ok(_) => tracing::debug!(file = name, "Skipping non-regular sales entry"),
                Err(e) => tracing::debug!(file = name, error = %e, "Skipping unreadable sales entry"),
            }
        }

        names.sort();
        Ok(names)
    }

    fn open(&self, name: &str) -> io::Result<Box<dyn BufRead + '_>> {
        let file = File::open(self.dir.join(name))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn describe(&self) -> String {
        format!("{}/{}*", self.dir.display(), self.prefix)
    }
}

/// Named sales batches held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: Vec<(String, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a batch; batches are processed in insertion order
    pub fn with_file(mut self, name: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.push((name.into(), contents.into()));
        self
    }
}

impl SalesSource for MemorySource {
    fn discover(&self) -> ReportResult<Vec<String>> {
        Ok(self.files.iter().map(|(name, _)| name.clone()).collect())
    }

    fn open(&self, name: &str) -> io::Result<Box<dyn BufRead + '_>> {
        let (_, contents) = self
            .files
            .iter()
            .find(|(candidate, _)| candidate == name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no batch named {name}")))?;
        Ok(Box::new(Cursor::new(contents.as_bytes())))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_directory_source_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ventas_TI_1001.txt"), "TI;1001\n").unwrap();
        fs::write(dir.path().join("ventas_CC_1000.txt"), "CC;1000\n").unwrap();
        fs::write(dir.path().join("products_info.txt"), "1;Producto1;1.0\n").unwrap();
        fs::create_dir(dir.path().join("ventas_dir")).unwrap();

        let source = DirectorySource::new(dir.path(), "ventas_");
        let names = source.discover().unwrap();

        assert_eq!(names, vec!["ventas_CC_1000.txt", "ventas_TI_1001.txt"]);
    }

    #[test]
    fn test_directory_source_missing_dir() {
        let source = DirectorySource::new("/nonexistent/sales", "ventas_");
        let result = source.discover();

        assert!(matches!(result, Err(ReportError::Discovery { .. })));
    }

    #[test]
    fn test_directory_source_open() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ventas_CC_1000.txt"), "CC;1000\n1;2\n").unwrap();

        let source = DirectorySource::new(dir.path(), "ventas_");
        let mut contents = String::new();
        source
            .open("ventas_CC_1000.txt")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();

        assert_eq!(contents, "CC;1000\n1;2\n");
    }

    #[test]
    fn test_memory_source_keeps_insertion_order() {
        let source = MemorySource::new()
            .with_file("b", "TI;1\n")
            .with_file("a", "CC;2\n");

        assert_eq!(source.discover().unwrap(), vec!["b", "a"]);
        assert!(source.open("a").is_ok());
        assert_eq!(source.open("c").err().unwrap().kind(), io::ErrorKind::NotFound);
    }
}
