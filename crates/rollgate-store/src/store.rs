//! BlobStore — read-only artifact lookup.
//!
//! Keys are bare file names (`rollout.json`, `stable.json`, ...); the
//! directory backend maps them straight onto files under its root, so
//! anything resembling a path traversal is rejected before touching
//! the filesystem. The store performs no writes in production — `put`
//! exists only to seed the in-memory backend in tests.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::{StoreError, StoreResult};

enum Backend {
    Dir(PathBuf),
    Memory(RwLock<HashMap<String, Vec<u8>>>),
}

/// Thread-safe, read-only blob store handle.
#[derive(Clone)]
pub struct BlobStore {
    backend: Arc<Backend>,
}

impl BlobStore {
    /// Open a store backed by a flat directory of artifact files.
    pub fn open_dir(path: &Path) -> Self {
        debug!(?path, "directory blob store opened");
        Self {
            backend: Arc::new(Backend::Dir(path.to_path_buf())),
        }
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> Self {
        debug!("in-memory blob store opened");
        Self {
            backend: Arc::new(Backend::Memory(RwLock::new(HashMap::new()))),
        }
    }

    /// Fetch a document by key. Returns `Ok(None)` when the key does
    /// not exist.
    pub async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        validate_key(key)?;
        match self.backend.as_ref() {
            Backend::Dir(root) => {
                let path = root.join(key);
                match tokio::fs::read(&path).await {
                    Ok(bytes) => {
                        debug!(key, len = bytes.len(), "artifact read");
                        Ok(Some(bytes))
                    }
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                    Err(e) => Err(StoreError::Read {
                        key: key.to_string(),
                        source: e,
                    }),
                }
            }
            Backend::Memory(map) => Ok(map.read().expect("store lock").get(key).cloned()),
        }
    }

    /// Seed a document into an in-memory store.
    ///
    /// # Panics
    ///
    /// Panics on a directory store — the gate never writes artifacts.
    pub fn put(&self, key: &str, bytes: Vec<u8>) {
        match self.backend.as_ref() {
            Backend::Memory(map) => {
                map.write()
                    .expect("store lock")
                    .insert(key.to_string(), bytes);
            }
            Backend::Dir(_) => panic!("put is only supported by the in-memory store"),
        }
    }
}

/// Keys must be bare file names within the artifact root.
fn validate_key(key: &str) -> StoreResult<()> {
    if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
