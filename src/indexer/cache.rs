//! Content-addressed cache of finished builds.

use super::{BuildKey, BuiltIndex};
use crate::source::VideoReference;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Finished indexes keyed by everything that went into building them.
#[derive(Debug, Default)]
pub struct IndexCache {
    entries: HashMap<BuildKey, Arc<BuiltIndex>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &BuildKey) -> Option<Arc<BuiltIndex>> {
        self.entries.get(key).cloned()
    }

    /// Store a build, replacing any earlier build with the same key.
    pub fn insert(&mut self, key: BuildKey, index: Arc<BuiltIndex>) {
        debug!(video_id = %key.video_id, "Caching index");
        self.entries.insert(key, index);
    }

    /// Drop one build. Returns whether it was cached.
    pub fn invalidate(&mut self, key: &BuildKey) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every build of a video, whatever its parameters.
    pub fn invalidate_video(&mut self, video_id: &VideoReference) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| &key.video_id != video_id);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
