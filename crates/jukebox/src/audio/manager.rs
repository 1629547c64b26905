//! Audio manager
//!
//! Ties the asset registries, the effect instance pool and the music state machine to one
//! content loader and one backend.
//!
//! # Lifecycle
//! - `unload()` stops the music, releases every effect instance, empties the registries and
//!   asks the content loader to drop its cache. It can be called any number of times.
//! - `dispose()` unloads, disposes the content loader if the manager owns it, and shuts the
//!   backend down. It runs once; later calls do nothing. Dropping the manager disposes it.
//! - After `dispose()` every load, play and stop returns [`AudioError::Disposed`].
//!
//! Playing or stopping an identifier that was never loaded is not an error: the call does
//! nothing and returns `Ok(())`.

use super::backend::{create_backend, AudioBackend, AudioBackendConfig};
use super::playback::PlaybackController;
use super::pool::EffectInstancePool;
use super::store::AssetStore;
use super::{volume, AudioError, EffectAsset, EffectId, EffectInstance, TrackAsset, TrackId, TrackState};
use crate::assets::{ContentLoader, ContentManager, ContentSource};
use crate::config::{AudioConfig, AudioManifest};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Cached music tracks and sound effects with exclusive background music
pub struct AudioManager {
    content: ContentSource,
    backend: Box<dyn AudioBackend>,
    store: AssetStore,
    pool: EffectInstancePool,
    playback: PlaybackController,
    disposed: bool,
}

impl AudioManager {
    /// Create a manager reading from `content` and playing through `backend`
    ///
    /// An uninitialized backend is initialized with default settings.
    pub fn new(content: ContentSource, mut backend: Box<dyn AudioBackend>) -> Result<Self, AudioError> {
        if !backend.is_initialized() {
            backend.initialize(&AudioBackendConfig::default())?;
        }

        Ok(Self {
            content,
            backend,
            store: AssetStore::default(),
            pool: EffectInstancePool::default(),
            playback: PlaybackController::new(1.0),
            disposed: false,
        })
    }

    /// Create a manager using the host's content loader
    ///
    /// The loader is never disposed by the manager.
    pub fn with_shared_content<L: ContentLoader + 'static>(
        loader: Rc<RefCell<L>>,
        backend: Box<dyn AudioBackend>,
    ) -> Result<Self, AudioError> {
        Self::new(ContentSource::shared(loader), backend)
    }

    /// Create a manager with its own content loader scoped to `root`
    ///
    /// # Errors
    /// `Content(NotFound)` if `root` is not a directory.
    pub fn with_content_root<P: Into<PathBuf>>(root: P, backend: Box<dyn AudioBackend>) -> Result<Self, AudioError> {
        let content = ContentManager::new(root)?;
        Self::new(ContentSource::owned(content), backend)
    }

    /// Build a manager from configuration and preload its manifest
    pub fn from_config(config: &AudioConfig) -> Result<Self, AudioError> {
        let content = ContentManager::new(&config.content_root)?
            .with_extensions(config.search_extensions.iter().cloned());
        let backend = create_backend(config.backend.clone())?;

        let mut manager = Self::new(ContentSource::owned(content), backend)?;
        manager.set_sound_volume(config.sound_volume);
        if let Some(music_volume) = config.music_volume {
            manager.set_music_volume(music_volume);
        }
        manager.load_manifest(&config.manifest)?;

        log::info!(
            "Audio manager ready: {} track(s), {} effect(s) from {}",
            manager.track_count(),
            manager.effect_count(),
            config.content_root.display()
        );
        Ok(manager)
    }

    fn ensure_live(&self, operation: &str) -> Result<(), AudioError> {
        if self.disposed {
            log::warn!("Audio manager used after dispose: {}", operation);
            return Err(AudioError::Disposed);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Load a track from `source` and cache it under `id`
    ///
    /// Does nothing if `id` is already loaded.
    pub fn load_track(&mut self, id: &TrackId, source: &str) -> Result<(), AudioError> {
        self.ensure_live("load_track")?;
        if self.store.load_track(&mut self.content, id, source)? {
            log::debug!("Loaded track '{}' from {}", id, source);
        }
        Ok(())
    }

    /// Load an effect from `source`, cache it under `id` and create its instance
    ///
    /// Does nothing if `id` is already loaded. The instance gets the current sound volume.
    pub fn load_effect(&mut self, id: &EffectId, source: &str) -> Result<(), AudioError> {
        self.ensure_live("load_effect")?;

        let volume = self.playback.effect_volume();
        let pool = &mut self.pool;
        let backend = self.backend.as_mut();
        let loaded = self.store.load_effect(&mut self.content, id, source, |effect| {
            pool.create(id, effect, volume, backend)
        })?;

        if loaded {
            log::debug!("Loaded effect '{}' from {}", id, source);
        }
        Ok(())
    }

    /// Load every track and effect listed in `manifest`, stopping at the first failure
    pub fn load_manifest(&mut self, manifest: &AudioManifest) -> Result<(), AudioError> {
        for (id, source) in &manifest.tracks {
            self.load_track(&TrackId::new(id), source)?;
        }
        for (id, source) in &manifest.effects {
            self.load_effect(&EffectId::new(id), source)?;
        }
        Ok(())
    }

    /// Whether a track is cached under `id`
    pub fn is_track_loaded(&self, id: &TrackId) -> bool {
        self.store.track(id).is_some()
    }

    /// Whether an effect is cached under `id`
    pub fn is_effect_loaded(&self, id: &EffectId) -> bool {
        self.store.effect(id).is_some()
    }

    /// Cached track
    pub fn track(&self, id: &TrackId) -> Option<&TrackAsset> {
        self.store.track(id)
    }

    /// Cached effect
    pub fn effect(&self, id: &EffectId) -> Option<&EffectAsset> {
        self.store.effect(id)
    }

    /// Instance paired with a cached effect
    pub fn effect_instance(&self, id: &EffectId) -> Option<&EffectInstance> {
        self.pool.get(id)
    }

    /// Number of cached tracks
    pub fn track_count(&self) -> usize {
        self.store.track_count()
    }

    /// Number of cached effects
    pub fn effect_count(&self) -> usize {
        self.store.effect_count()
    }

    /// Number of effect instances
    pub fn instance_count(&self) -> usize {
        self.pool.len()
    }

    // ------------------------------------------------------------------
    // Music
    // ------------------------------------------------------------------

    /// Play the track cached under `id`
    ///
    /// A different current track is stopped first. Replaying the current track only updates
    /// the repeat flag and restarts it.
    pub fn play_track(&mut self, id: &TrackId, looping: bool) -> Result<(), AudioError> {
        self.ensure_live("play_track")?;

        let Some(track) = self.store.track(id) else {
            log::debug!("play_track: no track loaded as '{}'", id);
            return Ok(());
        };

        self.playback.play_track(id, track, looping, self.backend.as_mut())
    }

    /// Stop the current track, if any
    pub fn stop_track(&mut self) -> Result<(), AudioError> {
        self.ensure_live("stop_track")?;
        self.playback.stop_track(self.backend.as_mut());
        Ok(())
    }

    /// Track currently set as playing
    pub fn current_track(&self) -> Option<&TrackAsset> {
        self.playback.current_track()
    }

    /// Identifier the current track was played through
    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.playback.current_track_id()
    }

    /// Music slot state
    pub fn track_state(&self) -> &TrackState {
        self.playback.state()
    }

    /// Process-wide music volume, shared by every manager
    pub fn music_volume(&self) -> f32 {
        volume::music_volume()
    }

    /// Set the process-wide music volume, clamped into `[0, 1]`
    ///
    /// Every manager in the process observes the new value.
    pub fn set_music_volume(&mut self, volume: f32) -> f32 {
        let applied = volume::set_music_volume(volume);
        if !self.disposed {
            self.backend.set_music_volume(applied);
        }
        applied
    }

    // ------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------

    /// Play the effect cached under `id`
    pub fn play_effect(&mut self, id: &EffectId, looped: bool) -> Result<(), AudioError> {
        self.ensure_live("play_effect")?;
        if !self.pool.play(id, looped, self.backend.as_mut())? {
            log::debug!("play_effect: no effect loaded as '{}'", id);
        }
        Ok(())
    }

    /// Stop the effect cached under `id`
    pub fn stop_effect(&mut self, id: &EffectId) -> Result<(), AudioError> {
        self.ensure_live("stop_effect")?;
        if !self.pool.stop(id, self.backend.as_mut())? {
            log::debug!("stop_effect: no effect loaded as '{}'", id);
        }
        Ok(())
    }

    /// Stop every effect instance
    pub fn stop_all_effects(&mut self) -> Result<(), AudioError> {
        self.ensure_live("stop_all_effects")?;
        self.pool.stop_all(self.backend.as_mut());
        Ok(())
    }

    /// Whether the effect cached under `id` is audible
    pub fn is_effect_playing(&self, id: &EffectId) -> bool {
        self.pool.is_playing(id, self.backend.as_ref())
    }

    /// Volume given to effect instances when they are created
    pub fn sound_volume(&self) -> f32 {
        self.playback.effect_volume()
    }

    /// Set the volume for effects loaded from now on, clamped into `[0, 1]`
    ///
    /// Existing instances keep the volume they were created with; see
    /// [`AudioManager::refresh_effect_volumes`].
    pub fn set_sound_volume(&mut self, volume: f32) -> f32 {
        self.playback.set_effect_volume(volume)
    }

    /// Apply the current sound volume to every existing effect instance
    pub fn refresh_effect_volumes(&mut self) -> Result<(), AudioError> {
        self.ensure_live("refresh_effect_volumes")?;
        let volume = self.playback.effect_volume();
        self.pool.set_volume_all(volume, self.backend.as_mut())
    }

    // ------------------------------------------------------------------
    // Frame loop and teardown
    // ------------------------------------------------------------------

    /// Per-frame backend housekeeping
    pub fn update(&mut self) {
        if !self.disposed {
            self.backend.update();
        }
    }

    /// Stop everything, release every instance and empty all registries
    ///
    /// The content loader is asked to drop its cache too. A shared loader that the host has
    /// borrowed at this moment keeps its cache; call [`ContentLoader::unload`] on it directly
    /// once the borrow ends.
    pub fn unload(&mut self) {
        if self.disposed {
            return;
        }

        let instances = self.pool.len();
        self.playback.stop_track(self.backend.as_mut());
        self.pool.release_all(self.backend.as_mut());
        self.store.clear();
        if !self.content.unload() {
            log::warn!("Content cache kept: shared loader is borrowed elsewhere");
        }

        if instances > 0 {
            log::info!("Audio unloaded, released {} effect instance(s)", instances);
        }
    }

    /// Unload, then release the content loader (if owned) and the backend
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        self.unload();
        self.content.dispose();
        self.backend.shutdown();
        self.disposed = true;
        log::info!("Audio manager disposed");
    }

    /// Whether [`AudioManager::dispose`] has run
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Drop for AudioManager {
    fn drop(&mut self) {
        self.dispose();
    }
}
