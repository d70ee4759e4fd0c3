use uuid::Uuid;

use super::{DesignId, DesignPayload, DesignStore, StoreError, StoredDesign};
use crate::util::time;

/// In-memory store. Stands in for the remote collaborator in tests and
/// offline sessions; `set_available(false)` simulates an outage.
#[derive(Default)]
pub struct MemoryStore {
    designs: Vec<StoredDesign>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_available(&mut self, available: bool) {
        self.unavailable = !available;
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unavailable {
            Err(StoreError::Unavailable("store offline".to_owned()))
        } else {
            Ok(())
        }
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut StoredDesign, StoreError> {
        self.designs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))
    }
}

impl DesignStore for MemoryStore {
    fn insert(
        &mut self,
        nickname: &str,
        payload: &DesignPayload,
        thumbnail_png: &[u8],
    ) -> Result<DesignId, StoreError> {
        self.check()?;
        let id = Uuid::new_v4().to_string();
        self.designs.push(StoredDesign {
            id: id.clone(),
            nickname: nickname.to_owned(),
            payload: payload.clone(),
            thumbnail_png: thumbnail_png.to_vec(),
            likes: 0,
            views: 0,
            created_at: time::timestamp_ms(),
        });
        Ok(id)
    }

    fn fetch_by_id(&self, id: &str) -> Result<StoredDesign, StoreError> {
        self.check()?;
        self.designs
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))
    }

    fn increment_views(&mut self, id: &str) -> Result<u64, StoreError> {
        self.check()?;
        let design = self.find_mut(id)?;
        design.views += 1;
        Ok(design.views)
    }

    fn increment_likes(&mut self, id: &str) -> Result<u64, StoreError> {
        self.check()?;
        let design = self.find_mut(id)?;
        design.likes += 1;
        Ok(design.likes)
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<StoredDesign>, StoreError> {
        self.check()?;
        let mut designs = self.designs.clone();
        // Stable sort over the reversed list: same-timestamp designs come
        // back latest-inserted first.
        designs.reverse();
        designs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        designs.truncate(limit);
        Ok(designs)
    }

    fn delete_by_ids(&mut self, ids: &[DesignId]) -> Result<(), StoreError> {
        self.check()?;
        self.designs.retain(|d| !ids.contains(&d.id));
        Ok(())
    }
}
