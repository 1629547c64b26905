//! Headless audio backend
//!
//! Keeps the transport state a real device backend would have without producing any sound.
//! Useful for dedicated servers, CI, and machines without an output device.

use super::{AudioBackend, AudioBackendConfig, SoundHandle};
use crate::audio::{AudioError, EffectAsset, TrackAsset};
use slotmap::SlotMap;

#[derive(Debug)]
struct NullVoice {
    name: String,
    looped: bool,
    volume: f32,
    playing: bool,
}

/// Backend that tracks playback state but never opens a device
#[derive(Debug)]
pub struct NullBackend {
    initialized: bool,
    music: Option<String>,
    repeating: bool,
    music_volume: f32,
    voices: SlotMap<SoundHandle, NullVoice>,
}

impl NullBackend {
    /// Create a new null backend
    pub fn new() -> Self {
        Self {
            initialized: false,
            music: None,
            repeating: false,
            music_volume: 1.0,
            voices: SlotMap::with_key(),
        }
    }

    /// Name of the track on the music channel
    pub fn playing_track(&self) -> Option<&str> {
        self.music.as_deref()
    }

    /// Volume last applied to the music channel
    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    /// Number of live effect instances
    pub fn instance_count(&self) -> usize {
        self.voices.len()
    }

    /// Volume of an instance
    pub fn instance_volume(&self, handle: SoundHandle) -> Option<f32> {
        self.voices.get(handle).map(|voice| voice.volume)
    }

    /// Whether an instance is set to loop
    pub fn instance_looped(&self, handle: SoundHandle) -> Option<bool> {
        self.voices.get(handle).map(|voice| voice.looped)
    }

    fn voice_mut(&mut self, handle: SoundHandle) -> Result<&mut NullVoice, AudioError> {
        self.voices.get_mut(handle).ok_or(AudioError::InvalidHandle)
    }
}

impl AudioBackend for NullBackend {
    fn initialize(&mut self, _config: &AudioBackendConfig) -> Result<(), AudioError> {
        if !self.initialized {
            self.initialized = true;
            log::info!("Null audio backend initialized");
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        self.music = None;
        self.voices.clear();
        self.initialized = false;
        log::info!("Null audio backend shutdown");
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn update(&mut self) {}

    fn play_music(&mut self, track: &TrackAsset) -> Result<(), AudioError> {
        if !self.initialized {
            return Err(AudioError::BackendNotInitialized);
        }
        self.music = Some(track.name().to_string());
        Ok(())
    }

    fn stop_music(&mut self) {
        self.music = None;
    }

    fn set_music_repeating(&mut self, repeating: bool) {
        self.repeating = repeating;
    }

    fn is_music_repeating(&self) -> bool {
        self.repeating
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume;
    }

    fn create_instance(&mut self, effect: &EffectAsset, volume: f32) -> Result<SoundHandle, AudioError> {
        if !self.initialized {
            return Err(AudioError::BackendNotInitialized);
        }
        Ok(self.voices.insert(NullVoice {
            name: effect.name().to_string(),
            looped: false,
            volume,
            playing: false,
        }))
    }

    fn set_instance_looped(&mut self, handle: SoundHandle, looped: bool) -> Result<(), AudioError> {
        self.voice_mut(handle)?.looped = looped;
        Ok(())
    }

    fn set_instance_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError> {
        self.voice_mut(handle)?.volume = volume;
        Ok(())
    }

    fn play_instance(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let voice = self.voice_mut(handle)?;
        voice.playing = true;
        log::trace!("Null backend playing '{}'", voice.name);
        Ok(())
    }

    fn stop_instance(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.voice_mut(handle)?.playing = false;
        Ok(())
    }

    fn release_instance(&mut self, handle: SoundHandle) {
        self.voices.remove(handle);
    }

    fn is_instance_playing(&self, handle: SoundHandle) -> bool {
        self.voices.get(handle).is_some_and(|voice| voice.playing)
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}
