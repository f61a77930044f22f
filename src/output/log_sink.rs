//! Append-only stores for traffic log records.
//!
//! Records are single text lines; see [`crate::models::TrafficEvent`] for the layout.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Append-only sequence of text records.
pub trait LogSink {
    /// Append one record. Records containing a line break are rejected.
    fn append(&mut self, record: &str) -> io::Result<()>;

    /// The most recent `n` records, oldest first.
    fn tail(&self, n: usize) -> io::Result<Vec<String>>;
}

fn check_single_line(record: &str) -> io::Result<()> {
    if record.contains(['\n', '\r']) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "traffic record must be a single line",
        ));
    }
    Ok(())
}

fn last_n(mut records: Vec<String>, n: usize) -> Vec<String> {
    let skip = records.len().saturating_sub(n);
    records.drain(..skip);
    records
}

/// Records appended to a text file, one per line.
#[derive(Debug, Clone)]
pub struct FileLogSink {
    path: PathBuf,
}

impl FileLogSink {
    /// Open the sink at `path`, creating an empty file if it does not exist.
    pub fn open(path: impl AsRef<Path>) -> io::Result<FileLogSink> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            log::info!("Creating traffic log file: {}", path.display());
            File::create(&path)?;
        }
        Ok(FileLogSink { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLogSink {
    fn append(&mut self, record: &str) -> io::Result<()> {
        check_single_line(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{record}")
    }

    fn tail(&self, n: usize) -> io::Result<Vec<String>> {
        let content = std::fs::read_to_string(&self.path)?;
        let records = content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
        Ok(last_n(records, n))
    }
}

/// Records kept in memory, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryLogSink {
    records: Vec<String>,
}

impl MemoryLogSink {
    pub fn new() -> MemoryLogSink {
        MemoryLogSink::default()
    }

    pub fn records(&self) -> &[String] {
        &self.records
    }
}

impl LogSink for MemoryLogSink {
    fn append(&mut self, record: &str) -> io::Result<()> {
        check_single_line(record)?;
        self.records.push(record.to_string());
        Ok(())
    }

    fn tail(&self, n: usize) -> io::Result<Vec<String>> {
        Ok(last_n(self.records.clone(), n))
    }
}
