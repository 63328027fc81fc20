//! File-backed storage keeping one file per key.

use crate::adapter::{StorageAdapter, check_key};
use crate::error::StoreError;
use async_trait::async_trait;
use log::{debug, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-per-key storage rooted at a single directory.
///
/// Key bytes outside `[A-Za-z0-9_-]` are percent-encoded in the file
/// name so `list` can decode names back into the original keys.
/// Dots are encoded too, which keeps the `.tmp` suffix used during
/// writes disjoint from every value-file name.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Root directory for stored values.
    root: PathBuf,
}

impl FileStorage {
    /// Create a new file-backed store under the given root.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        info!("initialized file storage (root={})", root.display());
        Ok(Self { root })
    }

    /// Path holding the value for `key`.
    fn value_path(&self, key: &str) -> PathBuf {
        self.root.join(encode_key(key))
    }

    /// Path of the temporary file used to replace `key` atomically.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.tmp", encode_key(key)))
    }
}

#[async_trait]
impl StorageAdapter for FileStorage {
    /// Write the value to a temp file, then rename over the target.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        check_key(key)?;
        let temp_path = self.temp_path(key);
        std::fs::write(&temp_path, value)?;
        std::fs::rename(temp_path, self.value_path(key))?;
        debug!("stored value (key={key}, len={})", value.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        match std::fs::read_to_string(self.value_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Remove the key's file. Absent keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        match std::fs::remove_file(self.value_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Scan the root directory and decode file names back into keys.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.ends_with(".tmp") {
                continue;
            }
            match decode_key(name) {
                Some(key) if key.starts_with(prefix) => keys.push(key),
                Some(_) => {}
                None => {
                    // Stray foreign file; skip it rather than fail the scan.
                    debug!("skipping undecodable file name (name={name})");
                }
            }
        }
        Ok(keys)
    }
}

/// Encode a key into a safe file name.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

/// Decode a file name produced by `encode_key`, or `None` if malformed.
fn decode_key(name: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(name.len());
    let mut iter = name.bytes();
    while let Some(byte) = iter.next() {
        if byte == b'%' {
            let high = iter.next()?;
            let low = iter.next()?;
            let hex = [high, low];
            let hex = std::str::from_utf8(&hex).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
        } else {
            bytes.push(byte);
        }
    }
    String::from_utf8(bytes).ok()
}
