// Copyright (c) 2025 Solace Health Labs
// SPDX-License-Identifier: BUSL-1.1
//! Append-only persistence for hazard log entries. Entries are never
//! updated or deleted by this subsystem; retention and erasure belong to
//! external data governance.

use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

use super::logger::HazardLogEntry;

#[derive(Debug, Error)]
pub enum HazardError {
    #[error("failed to append hazard entry: {0}")]
    Append(#[source] std::io::Error),
    #[error("failed to read hazard log: {0}")]
    Read(#[source] std::io::Error),
    #[error("corrupt hazard log line: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[async_trait]
pub trait HazardSink: Send + Sync {
    async fn append(&self, entry: &HazardLogEntry) -> Result<(), HazardError>;
    async fn entries(&self) -> Result<Vec<HazardLogEntry>, HazardError>;
}

/// One JSON document per line, appended and flushed under a mutex so
/// concurrent writers cannot interleave partial lines.
pub struct JsonlHazardSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlHazardSink {
    pub fn new(path: PathBuf) -> Self {
        JsonlHazardSink {
            path,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl HazardSink for JsonlHazardSink {
    async fn append(&self, entry: &HazardLogEntry) -> Result<(), HazardError> {
        let line = serde_json::to_string(entry)?;
        let _guard = self.write_lock.lock().await;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(HazardError::Append)?;
        writeln!(file, "{}", line).map_err(HazardError::Append)?;
        file.flush().map_err(HazardError::Append)?;
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<HazardLogEntry>, HazardError> {
        let _guard = self.write_lock.lock().await;
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(HazardError::Read(e)),
        };
        raw.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(HazardError::from))
            .collect()
    }
}

/// In-memory sink for tests and for environments without a writable disk.
#[derive(Default)]
pub struct MemoryHazardSink {
    entries: Arc<Mutex<Vec<HazardLogEntry>>>,
}

impl MemoryHazardSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HazardSink for MemoryHazardSink {
    async fn append(&self, entry: &HazardLogEntry) -> Result<(), HazardError> {
        self.entries.lock().await.push(entry.clone());
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<HazardLogEntry>, HazardError> {
        Ok(self.entries.lock().await.clone())
    }
}

/// Sink that always fails, used to exercise the logging-failure path.
#[cfg(test)]
pub struct FailingHazardSink;

#[cfg(test)]
#[async_trait]
impl HazardSink for FailingHazardSink {
    async fn append(&self, _entry: &HazardLogEntry) -> Result<(), HazardError> {
        Err(HazardError::Append(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "disk unavailable",
        )))
    }

    async fn entries(&self) -> Result<Vec<HazardLogEntry>, HazardError> {
        Ok(Vec::new())
    }
}
