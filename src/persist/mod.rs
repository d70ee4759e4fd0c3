use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod local;
mod memory;
mod payload;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use payload::{DesignPayload, OrnamentRecord, TextRecord};

use crate::util::time;

/// Opaque identifier minted by a store. Shared stores use UUIDs; the local
/// fallback uses `design_<timestamp>` keys.
pub type DesignId = String;

/// Errors crossing the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("design not found: {0}")]
    NotFound(DesignId),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read or write design: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode design: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A saved design as the store returns it: the payload plus the fields the
/// store owns (identity, counters, thumbnail).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDesign {
    pub id: DesignId,
    pub nickname: String,
    pub payload: DesignPayload,
    pub thumbnail_png: Vec<u8>,
    pub likes: u64,
    pub views: u64,
    /// Milliseconds since the UNIX epoch.
    pub created_at: u64,
}

/// The persistence collaborator. Designs are immutable once written except
/// for the like/view counters.
pub trait DesignStore {
    fn insert(
        &mut self,
        nickname: &str,
        payload: &DesignPayload,
        thumbnail_png: &[u8],
    ) -> Result<DesignId, StoreError>;

    fn fetch_by_id(&self, id: &str) -> Result<StoredDesign, StoreError>;

    fn increment_views(&mut self, id: &str) -> Result<u64, StoreError>;

    fn increment_likes(&mut self, id: &str) -> Result<u64, StoreError>;

    /// Most recent first.
    fn list_recent(&self, limit: usize) -> Result<Vec<StoredDesign>, StoreError>;

    fn delete_by_ids(&mut self, ids: &[DesignId]) -> Result<(), StoreError>;
}

/// Where a saved design ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveScope {
    /// The shared store took it; the link works for anyone.
    Shared,
    /// The shared store was unreachable; the design is safe locally and the
    /// link works on this machine.
    LocalFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub id: DesignId,
    pub link: String,
    pub scope: SaveScope,
}

pub fn share_link(id: &str) -> String {
    format!("view?id={id}")
}

/// Save a design, falling back to the local store if the shared one fails.
///
/// Never errors: a failing shared store degrades the scope instead of losing
/// the user's work. Nothing is retried automatically.
pub fn save_design(
    shared: &mut dyn DesignStore,
    local: &mut dyn DesignStore,
    nickname: &str,
    payload: &DesignPayload,
    thumbnail_png: &[u8],
) -> SaveOutcome {
    match shared.insert(nickname, payload, thumbnail_png) {
        Ok(id) => {
            info!("saved design {id} to the shared store");
            SaveOutcome {
                link: share_link(&id),
                id,
                scope: SaveScope::Shared,
            }
        }
        Err(err) => {
            warn!("shared store rejected save ({err}); keeping design locally");
            match local.insert(nickname, payload, thumbnail_png) {
                Ok(id) => SaveOutcome {
                    link: share_link(&id),
                    id,
                    scope: SaveScope::LocalFallback,
                },
                // Both stores down: mint a reference anyway so the caller
                // still gets something to show; the design stays in memory.
                Err(local_err) => {
                    warn!("local fallback save failed too: {local_err}");
                    let id = format!("design_{}", time::timestamp_ms());
                    SaveOutcome {
                        link: share_link(&id),
                        id,
                        scope: SaveScope::LocalFallback,
                    }
                }
            }
        }
    }
}

/// Fetch a design for viewing: shared store first, local fallback second,
/// then bump the view counter (best effort — a failed bump never blocks the
/// view).
pub fn load_design(
    shared: &mut dyn DesignStore,
    local: &dyn DesignStore,
    id: &str,
) -> Result<StoredDesign, StoreError> {
    match shared.fetch_by_id(id) {
        Ok(design) => {
            if let Err(err) = shared.increment_views(id) {
                warn!("could not count view for {id}: {err}");
            }
            Ok(design)
        }
        Err(_) => local
            .fetch_by_id(id)
            .map_err(|_| StoreError::NotFound(id.to_owned())),
    }
}
