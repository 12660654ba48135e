//! Required-asset tracking
//!
//! The loading collaborator reports each texture as loaded or failed. The
//! engine refuses to start its loop until every required asset has resolved
//! one way or the other; failed assets only cost their sprites.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::consts::POP_FRAMES;
use crate::sim::Species;

/// A texture the renderer needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AssetId {
    /// Bubble sprite frame (0 is the idle bubble, the rest animate the pop)
    BubbleFrame(u8),
    Fish(Species),
    Shark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    status: BTreeMap<AssetId, AssetStatus>,
}

impl AssetManifest {
    /// Track the given assets, all pending
    pub fn new(required: impl IntoIterator<Item = AssetId>) -> Self {
        Self {
            status: required
                .into_iter()
                .map(|id| (id, AssetStatus::Pending))
                .collect(),
        }
    }

    /// Every texture the game draws
    pub fn standard() -> Self {
        let bubbles = (0..POP_FRAMES as u8).map(AssetId::BubbleFrame);
        let fish = Species::ALL.into_iter().map(AssetId::Fish);
        Self::new(bubbles.chain(fish).chain([AssetId::Shark]))
    }

    /// Nothing to wait for (headless runs and tests)
    pub fn none() -> Self {
        Self::default()
    }

    pub fn mark_loaded(&mut self, id: AssetId) {
        if let Some(status) = self.status.get_mut(&id) {
            *status = AssetStatus::Loaded;
        }
    }

    pub fn mark_failed(&mut self, id: AssetId, reason: &str) {
        log::warn!("Asset {id:?} failed to load: {reason}");
        if let Some(status) = self.status.get_mut(&id) {
            *status = AssetStatus::Failed;
        }
    }

    pub fn status(&self, id: AssetId) -> Option<AssetStatus> {
        self.status.get(&id).copied()
    }

    /// Nothing is still pending
    pub fn is_resolved(&self) -> bool {
        self.status.values().all(|s| *s != AssetStatus::Pending)
    }

    /// Whether sprites using `id` can be drawn. Untracked assets are assumed present.
    pub fn is_usable(&self, id: AssetId) -> bool {
        !matches!(
            self.status(id),
            Some(AssetStatus::Failed | AssetStatus::Pending)
        )
    }

    pub fn failed(&self) -> impl Iterator<Item = AssetId> + '_ {
        self.status
            .iter()
            .filter(|(_, s)| **s == AssetStatus::Failed)
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_manifest_resolves() {
        let mut manifest = AssetManifest::standard();
        assert!(!manifest.is_resolved());

        for frame in 0..POP_FRAMES as u8 {
            manifest.mark_loaded(AssetId::BubbleFrame(frame));
        }
        for species in Species::ALL {
            manifest.mark_loaded(AssetId::Fish(species));
        }
        assert!(!manifest.is_resolved());

        manifest.mark_failed(AssetId::Shark, "404");
        assert!(manifest.is_resolved());
        assert!(!manifest.is_usable(AssetId::Shark));
        assert!(manifest.is_usable(AssetId::Fish(Species::Speedy)));
        assert_eq!(manifest.failed().collect::<Vec<_>>(), vec![AssetId::Shark]);
    }

    #[test]
    fn test_empty_manifest_is_ready() {
        let manifest = AssetManifest::none();
        assert!(manifest.is_resolved());
        assert!(manifest.is_usable(AssetId::Shark));
    }
}
