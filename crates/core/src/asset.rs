//! In-memory store for finished media results.
//!
//! A completed generation is materialized here and addressed through a
//! [`ResultAsset`] handle. The store owns the bytes; the handle is a
//! cheap, cloneable reference. Callers must [`release`](AssetStore::release)
//! a handle once the result is superseded or discarded, otherwise the
//! backing bytes stay resident for the lifetime of the store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use uuid::Uuid;

use crate::types::Timestamp;

/// Identifier of a stored asset.
pub type AssetId = Uuid;

// ---------------------------------------------------------------------------
// ResultAsset
// ---------------------------------------------------------------------------

/// Handle to a finished, locally stored media result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultAsset {
    /// Store-assigned identifier.
    pub id: AssetId,
    /// Media type of the stored bytes, e.g. `video/mp4`.
    pub media_type: String,
    /// Payload size in bytes.
    pub size_bytes: usize,
    /// When the asset was stored (UTC).
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// AssetStore
// ---------------------------------------------------------------------------

struct StoredAsset {
    bytes: Bytes,
    media_type: String,
    created_at: Timestamp,
}

/// Thread-safe in-memory asset store.
///
/// Clones share the same backing map, so the orchestrator and the
/// caller's display layer can hold the same store.
#[derive(Clone, Default)]
pub struct AssetStore {
    inner: Arc<Mutex<HashMap<AssetId, StoredAsset>>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished payload and return its handle.
    pub fn insert(&self, bytes: Bytes, media_type: impl Into<String>) -> ResultAsset {
        let id = Uuid::now_v7();
        let media_type = media_type.into();
        let created_at = chrono::Utc::now();
        let size_bytes = bytes.len();

        self.lock().insert(
            id,
            StoredAsset {
                bytes,
                media_type: media_type.clone(),
                created_at,
            },
        );

        ResultAsset {
            id,
            media_type,
            size_bytes,
            created_at,
        }
    }

    /// Bytes of a stored asset, or `None` if the handle was released
    /// (or never existed).
    pub fn bytes(&self, id: &AssetId) -> Option<Bytes> {
        self.lock().get(id).map(|asset| asset.bytes.clone())
    }

    /// Media type of a stored asset.
    pub fn media_type(&self, id: &AssetId) -> Option<String> {
        self.lock().get(id).map(|asset| asset.media_type.clone())
    }

    /// Drop a stored asset, freeing its bytes.
    ///
    /// Returns `false` if the id is unknown (already released).
    pub fn release(&self, id: &AssetId) -> bool {
        self.lock().remove(id).is_some()
    }

    /// Number of resident assets.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<AssetId, StoredAsset>> {
        self.inner.lock().expect("asset store lock poisoned")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
