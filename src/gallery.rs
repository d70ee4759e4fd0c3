use log::warn;

use crate::persist::{DesignId, DesignStore, StoreError, StoredDesign};

/// The store keeps at most this many designs; anything older is deleted on
/// refresh. This is the single retention invariant for the whole app.
pub const GALLERY_RETENTION: usize = 2;

/// How often the gallery re-reads the store, in seconds.
pub const REFRESH_INTERVAL: f64 = 5.0;

/// One gallery card.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    pub id: DesignId,
    pub nickname: String,
    pub likes: u64,
    pub views: u64,
    pub created_at: u64,
    pub background: String,
    pub background_tag: String,
    pub thumbnail_png: Vec<u8>,
}

impl From<StoredDesign> for GalleryEntry {
    fn from(design: StoredDesign) -> Self {
        Self {
            id: design.id,
            nickname: design.nickname,
            likes: design.likes,
            views: design.views,
            created_at: design.created_at,
            background: design.payload.background,
            background_tag: design.payload.background_class,
            thumbnail_png: design.thumbnail_png,
        }
    }
}

/// Recent-designs listing with periodic refresh and retention pruning.
#[derive(Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
    last_refresh: Option<f64>,
    pub error: Option<String>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// Refresh if the interval has elapsed (or never refreshed yet).
    pub fn maybe_refresh(&mut self, store: &mut dyn DesignStore, now: f64) {
        let due = self
            .last_refresh
            .is_none_or(|last| now - last >= REFRESH_INTERVAL);
        if due {
            self.last_refresh = Some(now);
            match self.refresh(store) {
                Ok(()) => self.error = None,
                Err(err) => {
                    warn!("gallery refresh failed: {err}");
                    self.error = Some("Could not load the gallery right now.".to_owned());
                }
            }
        }
    }

    /// Re-read the store, enforcing the retention invariant first.
    pub fn refresh(&mut self, store: &mut dyn DesignStore) -> Result<(), StoreError> {
        let all = store.list_recent(usize::MAX)?;
        if all.len() > GALLERY_RETENTION {
            let stale: Vec<DesignId> = all[GALLERY_RETENTION..]
                .iter()
                .map(|d| d.id.clone())
                .collect();
            if let Err(err) = store.delete_by_ids(&stale) {
                warn!("could not prune {} old designs: {err}", stale.len());
            }
        }
        self.entries = all
            .into_iter()
            .take(GALLERY_RETENTION)
            .map(GalleryEntry::from)
            .collect();
        Ok(())
    }

    /// Count a like, updating the card optimistically even if the store
    /// write fails.
    pub fn like(&mut self, store: &mut dyn DesignStore, id: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.likes += 1;
        }
        if let Err(err) = store.increment_likes(id) {
            warn!("could not record like for {id}: {err}");
        }
    }
}
