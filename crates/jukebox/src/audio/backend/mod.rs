//! Audio backend implementations
//!
//! Platform-independent abstraction over the playback transport. The transport has two parts:
//! a single music channel shared by the whole process, and any number of effect instances
//! addressed through [`SoundHandle`]s.

pub mod null_backend;
pub mod rodio_backend;

use crate::audio::{AudioError, EffectAsset, TrackAsset};
use serde::{Deserialize, Serialize};

slotmap::new_key_type! {
    /// Generational handle to an effect instance owned by a backend
    pub struct SoundHandle;
}

/// Audio backend trait for platform abstraction
///
/// Not `Send + Sync`: the manager drives its backend from the frame loop thread.
pub trait AudioBackend {
    /// Initialize the audio backend
    fn initialize(&mut self, config: &AudioBackendConfig) -> Result<(), AudioError>;

    /// Shutdown the audio backend
    fn shutdown(&mut self);

    /// Check if backend is initialized
    fn is_initialized(&self) -> bool;

    /// Per-frame housekeeping (drop finished sinks, etc.)
    fn update(&mut self);

    /// Start `track` on the music channel, replacing whatever it was playing
    fn play_music(&mut self, track: &TrackAsset) -> Result<(), AudioError>;

    /// Stop the music channel
    fn stop_music(&mut self);

    /// Set whether the next music playback repeats
    fn set_music_repeating(&mut self, repeating: bool);

    /// Whether music playback repeats
    fn is_music_repeating(&self) -> bool;

    /// Apply a music volume (already clamped) to the music channel
    fn set_music_volume(&mut self, volume: f32);

    /// Create a playable instance of `effect` with the given volume
    fn create_instance(&mut self, effect: &EffectAsset, volume: f32) -> Result<SoundHandle, AudioError>;

    /// Set whether the instance loops when played
    fn set_instance_looped(&mut self, handle: SoundHandle, looped: bool) -> Result<(), AudioError>;

    /// Set instance volume
    fn set_instance_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError>;

    /// Play the instance from the start
    fn play_instance(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Stop the instance; it can be played again afterwards
    fn stop_instance(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Stop and free the instance. Unknown handles are ignored.
    fn release_instance(&mut self, handle: SoundHandle);

    /// Whether the instance is currently audible
    fn is_instance_playing(&self, handle: SoundHandle) -> bool;
}

/// Which backend [`create_backend`] builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Device output through rodio
    #[default]
    Rodio,
    /// Headless, no device
    Null,
}

/// Configuration for audio backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioBackendConfig {
    /// Backend implementation
    pub kind: BackendKind,
    /// Sample rate (e.g., 44100, 48000)
    pub sample_rate: u32,
    /// Number of output channels (1=mono, 2=stereo)
    pub channels: u16,
    /// Buffer size for audio processing
    pub buffer_size: usize,
}

impl Default for AudioBackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            sample_rate: 44100,
            channels: 2,
            buffer_size: 4096,
        }
    }
}

/// Create and initialize the backend selected by `config`
pub fn create_backend(config: AudioBackendConfig) -> Result<Box<dyn AudioBackend>, AudioError> {
    let mut backend: Box<dyn AudioBackend> = match config.kind {
        BackendKind::Rodio => Box::new(rodio_backend::RodioBackend::new()),
        BackendKind::Null => Box::new(null_backend::NullBackend::new()),
    };
    backend.initialize(&config)?;
    Ok(backend)
}
