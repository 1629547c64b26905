//! Track and effect registries

use super::{AudioError, EffectAsset, EffectId, TrackAsset, TrackId};
use crate::assets::ContentSource;
use std::collections::HashMap;

/// Loaded tracks and effects keyed by identifier
#[derive(Default)]
pub(crate) struct AssetStore {
    tracks: HashMap<TrackId, TrackAsset>,
    effects: HashMap<EffectId, EffectAsset>,
}

impl AssetStore {
    /// Load a track unless `id` is already registered
    ///
    /// Returns `true` if a new track was registered.
    pub fn load_track(&mut self, content: &mut ContentSource, id: &TrackId, source: &str) -> Result<bool, AudioError> {
        if self.tracks.contains_key(id) {
            return Ok(false);
        }

        let track: TrackAsset = content.load(source)?;
        self.tracks.insert(id.clone(), track);
        Ok(true)
    }

    /// Load an effect unless `id` is already registered
    ///
    /// `pair` runs on the freshly loaded asset before it is registered; if it fails nothing is
    /// registered. Returns `true` if a new effect was registered.
    pub fn load_effect<F>(
        &mut self,
        content: &mut ContentSource,
        id: &EffectId,
        source: &str,
        pair: F,
    ) -> Result<bool, AudioError>
    where
        F: FnOnce(&EffectAsset) -> Result<(), AudioError>,
    {
        if self.effects.contains_key(id) {
            return Ok(false);
        }

        let effect: EffectAsset = content.load(source)?;
        pair(&effect)?;
        self.effects.insert(id.clone(), effect);
        Ok(true)
    }

    pub fn track(&self, id: &TrackId) -> Option<&TrackAsset> {
        self.tracks.get(id)
    }

    pub fn effect(&self, id: &EffectId) -> Option<&EffectAsset> {
        self.effects.get(id)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.effects.clear();
    }
}
