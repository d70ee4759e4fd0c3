use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use super::{DesignId, DesignPayload, DesignStore, StoreError, StoredDesign};
use crate::util::time;

/// File-per-design JSON store. Doubles as the local-fallback scope when the
/// shared store is unreachable, which is why its ids carry the
/// `design_<timestamp>` shape.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (creating if needed) a store rooted at `dir`. Failing here is a
    /// startup error: no mutating action should proceed without a working
    /// store.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn read(&self, id: &str) -> Result<StoredDesign, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.to_owned()));
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn write(&self, design: &StoredDesign) -> Result<(), StoreError> {
        let json = serde_json::to_string(design)?;
        fs::write(self.path_for(&design.id), json)?;
        Ok(())
    }

    fn all(&self) -> Result<Vec<StoredDesign>, StoreError> {
        let mut designs = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Ok(json) = fs::read_to_string(&path)
                && let Ok(design) = serde_json::from_str::<StoredDesign>(&json)
            {
                designs.push(design);
            }
        }
        Ok(designs)
    }
}

impl DesignStore for LocalStore {
    fn insert(
        &mut self,
        nickname: &str,
        payload: &DesignPayload,
        thumbnail_png: &[u8],
    ) -> Result<DesignId, StoreError> {
        let now = time::timestamp_ms();
        let mut id = format!("design_{now}");
        let mut bump = 0u32;
        while self.path_for(&id).exists() {
            bump += 1;
            id = format!("design_{now}-{bump}");
        }
        let design = StoredDesign {
            id: id.clone(),
            nickname: nickname.to_owned(),
            payload: payload.clone(),
            thumbnail_png: thumbnail_png.to_vec(),
            likes: 0,
            views: 0,
            created_at: now,
        };
        self.write(&design)?;
        info!("stored design {id} in {}", self.dir.display());
        Ok(id)
    }

    fn fetch_by_id(&self, id: &str) -> Result<StoredDesign, StoreError> {
        self.read(id)
    }

    fn increment_views(&mut self, id: &str) -> Result<u64, StoreError> {
        let mut design = self.read(id)?;
        design.views += 1;
        self.write(&design)?;
        Ok(design.views)
    }

    fn increment_likes(&mut self, id: &str) -> Result<u64, StoreError> {
        let mut design = self.read(id)?;
        design.likes += 1;
        self.write(&design)?;
        Ok(design.likes)
    }

    fn list_recent(&self, limit: usize) -> Result<Vec<StoredDesign>, StoreError> {
        let mut designs = self.all()?;
        designs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        designs.truncate(limit);
        Ok(designs)
    }

    fn delete_by_ids(&mut self, ids: &[DesignId]) -> Result<(), StoreError> {
        for id in ids {
            let path = self.path_for(id);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}
