//! Record store: full-read / full-write persistence of the link collection.
//!
//! Single writer only. Every write replaces the whole collection; there is no
//! delta persistence. If several writers ever share a store, `write_all` has to
//! become a read-modify-write under a lock (or a revision-checked swap).

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::ChekError;
use crate::record::LinkRecord;

pub trait RecordStore {
    /// All records in stored order. Empty when nothing was persisted yet.
    fn load_all(&self) -> Result<Vec<LinkRecord>, ChekError>;

    /// Replace the persisted collection with `records`, in order.
    fn write_all(&self, records: &[LinkRecord]) -> Result<(), ChekError>;

    /// Load, reject a duplicate `url`, append and write everything back.
    fn append_one(&self, record: LinkRecord) -> Result<(), ChekError> {
        let mut records = self.load_all()?;
        if records.iter().any(|r| r.url == record.url) {
            return Err(ChekError::Duplicate(record.url));
        }
        records.push(record);
        self.write_all(&records)
    }

    fn contains(&self, url: &str) -> Result<bool, ChekError> {
        Ok(self.load_all()?.iter().any(|r| r.url == url))
    }
}

/// JSON array on disk, written via temp file + rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "links.json".into());
        name.push(format!(".tmp.{}", std::process::id()));
        self.path.with_file_name(name)
    }

    fn write_atomic(&self, data: &[u8]) -> Result<(), ChekError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| ChekError::io(dir, e))?;
            }
        }

        let tmp = self.temp_path();
        let written = fs::File::create(&tmp).and_then(|mut f| {
            f.write_all(data)?;
            f.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(ChekError::io(&tmp, e));
        }

        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(ChekError::io(&self.path, e));
        }
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load_all(&self) -> Result<Vec<LinkRecord>, ChekError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let s = fs::read_to_string(&self.path).map_err(|e| ChekError::io(&self.path, e))?;
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&s).map_err(|source| ChekError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, records: &[LinkRecord]) -> Result<(), ChekError> {
        let json = serde_json::to_string_pretty(records)?;
        self.write_atomic(json.as_bytes())?;
        debug!("wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// In-process store, for embedding callers and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<LinkRecord>>,
}

impl MemoryStore {
    pub fn new(records: Vec<LinkRecord>) -> Self {
        Self {
            records: RefCell::new(records),
        }
    }

    pub fn snapshot(&self) -> Vec<LinkRecord> {
        self.records.borrow().clone()
    }
}

impl RecordStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<LinkRecord>, ChekError> {
        Ok(self.snapshot())
    }

    fn write_all(&self, records: &[LinkRecord]) -> Result<(), ChekError> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}
