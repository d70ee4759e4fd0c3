use std::sync::atomic::{AtomicUsize, Ordering};

// Single static counter shared by ornaments and texts, so ids stay unique
// across kinds within a session.
static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(1);

pub fn generate_id() -> usize {
    NEXT_ELEMENT_ID.fetch_add(1, Ordering::SeqCst)
}
