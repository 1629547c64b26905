//! One playable instance per cached effect
//!
//! Instances are created when their effect is loaded and live until the pool is released.
//! Retriggering an effect reuses its instance instead of decoding a new one.

use super::backend::{AudioBackend, SoundHandle};
use super::{AudioError, EffectAsset, EffectId};
use std::collections::HashMap;

/// Playback cursor for a single cached effect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectInstance {
    handle: SoundHandle,
    looped: bool,
    volume: f32,
}

impl EffectInstance {
    /// Backend handle of the instance
    pub fn handle(&self) -> SoundHandle {
        self.handle
    }

    /// Loop flag used by the last play
    pub fn is_looped(&self) -> bool {
        self.looped
    }

    /// Instance volume
    pub fn volume(&self) -> f32 {
        self.volume
    }
}

#[derive(Default)]
pub(crate) struct EffectInstancePool {
    instances: HashMap<EffectId, EffectInstance>,
}

impl EffectInstancePool {
    /// Create the instance for a freshly loaded effect
    ///
    /// The store only pairs effects it has not registered yet, so `id` has no instance.
    pub fn create(
        &mut self,
        id: &EffectId,
        effect: &EffectAsset,
        volume: f32,
        backend: &mut dyn AudioBackend,
    ) -> Result<(), AudioError> {
        debug_assert!(!self.instances.contains_key(id), "effect '{id}' already has an instance");
        let handle = backend.create_instance(effect, volume)?;
        self.instances.insert(id.clone(), EffectInstance { handle, looped: false, volume });
        Ok(())
    }

    pub fn get(&self, id: &EffectId) -> Option<&EffectInstance> {
        self.instances.get(id)
    }

    /// Play an instance; returns `false` if `id` has no instance
    pub fn play(&mut self, id: &EffectId, looped: bool, backend: &mut dyn AudioBackend) -> Result<bool, AudioError> {
        let Some(instance) = self.instances.get_mut(id) else {
            return Ok(false);
        };

        backend.set_instance_looped(instance.handle, looped)?;
        instance.looped = looped;
        backend.play_instance(instance.handle)?;
        Ok(true)
    }

    /// Stop an instance; returns `false` if `id` has no instance
    pub fn stop(&self, id: &EffectId, backend: &mut dyn AudioBackend) -> Result<bool, AudioError> {
        let Some(instance) = self.instances.get(id) else {
            return Ok(false);
        };

        backend.stop_instance(instance.handle)?;
        Ok(true)
    }

    pub fn stop_all(&self, backend: &mut dyn AudioBackend) {
        for (id, instance) in &self.instances {
            if let Err(e) = backend.stop_instance(instance.handle) {
                log::warn!("Failed to stop effect '{}': {}", id, e);
            }
        }
    }

    /// Push `volume` to every existing instance
    pub fn set_volume_all(&mut self, volume: f32, backend: &mut dyn AudioBackend) -> Result<(), AudioError> {
        for instance in self.instances.values_mut() {
            backend.set_instance_volume(instance.handle, volume)?;
            instance.volume = volume;
        }
        Ok(())
    }

    pub fn is_playing(&self, id: &EffectId, backend: &dyn AudioBackend) -> bool {
        self.instances
            .get(id)
            .is_some_and(|instance| backend.is_instance_playing(instance.handle))
    }

    /// Release every instance in the backend and empty the pool
    pub fn release_all(&mut self, backend: &mut dyn AudioBackend) {
        for (_id, instance) in self.instances.drain() {
            backend.release_instance(instance.handle);
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }
}
