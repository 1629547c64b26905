//! Rodio audio backend implementation
//!
//! Uses the Rodio library for cross-platform audio playback.
//! Rodio is pure Rust and supports WAV, OGG Vorbis, MP3, and FLAC formats.
//!
//! Music plays on one dedicated sink. Each effect instance keeps its encoded bytes and gets a
//! fresh sink every time it is played, so replaying an instance restarts it.
//!
//! # Example
//!
//! ```no_run
//! use jukebox::audio::backend::{AudioBackend, AudioBackendConfig};
//! use jukebox::audio::backend::rodio_backend::RodioBackend;
//!
//! let mut backend = RodioBackend::new();
//! backend.initialize(&AudioBackendConfig::default()).unwrap();
//!
//! backend.set_music_volume(0.5);
//! backend.update(); // Drops finished sinks
//! backend.shutdown();
//! ```

use super::{AudioBackend, AudioBackendConfig, SoundHandle};
use crate::audio::{AudioError, EffectAsset, TrackAsset};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use slotmap::SlotMap;
use std::io::Cursor;
use std::sync::Arc;

/// Effect instance state
struct EffectVoice {
    /// Encoded clip bytes, decoded anew on every play
    data: Arc<[u8]>,
    looped: bool,
    volume: f32,
    /// Sink of the current playback, if any
    sink: Option<Sink>,
}

/// Rodio-based audio backend
pub struct RodioBackend {
    /// Audio output stream (must be kept alive)
    _output_stream: Option<OutputStream>,
    /// Output stream handle for creating sinks
    stream_handle: Option<OutputStreamHandle>,
    /// Music channel
    music: Option<Sink>,
    music_repeating: bool,
    music_volume: f32,
    /// Effect instances
    voices: SlotMap<SoundHandle, EffectVoice>,
    /// Initialization state
    initialized: bool,
}

impl RodioBackend {
    /// Create a new Rodio backend
    pub fn new() -> Self {
        Self {
            _output_stream: None,
            stream_handle: None,
            music: None,
            music_repeating: false,
            music_volume: 1.0,
            voices: SlotMap::with_key(),
            initialized: false,
        }
    }

    /// Decode `data` into a new sink and start it
    ///
    /// # Errors
    /// - `BackendNotInitialized` if the backend hasn't been initialized
    /// - `PlaybackFailed` if the sink creation or audio decoding fails
    fn start_sink(&self, data: &Arc<[u8]>, looped: bool, volume: f32) -> Result<Sink, AudioError> {
        let stream_handle = self.stream_handle.as_ref()
            .ok_or(AudioError::BackendNotInitialized)?;

        let sink = Sink::try_new(stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {e}")))?;

        let source = Decoder::new(Cursor::new(Arc::clone(data)))
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode audio: {e}")))?;

        sink.set_volume(volume);
        if looped {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }

        Ok(sink)
    }

    fn voice_mut(&mut self, handle: SoundHandle) -> Result<&mut EffectVoice, AudioError> {
        self.voices.get_mut(handle).ok_or(AudioError::InvalidHandle)
    }
}

impl AudioBackend for RodioBackend {
    fn initialize(&mut self, _config: &AudioBackendConfig) -> Result<(), AudioError> {
        if self.initialized {
            return Ok(());
        }

        // Create output stream
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::BackendInitFailed(format!("Failed to create audio output: {e}")))?;

        self._output_stream = Some(stream);
        self.stream_handle = Some(stream_handle);
        self.initialized = true;

        log::info!("Rodio audio backend initialized");
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        self.stop_music();
        for (_handle, voice) in self.voices.drain() {
            if let Some(sink) = voice.sink {
                sink.stop();
            }
        }

        // Drop stream handle and output
        self.stream_handle = None;
        self._output_stream = None;
        self.initialized = false;

        log::info!("Rodio audio backend shutdown");
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn update(&mut self) {
        if self.music.as_ref().is_some_and(Sink::empty) {
            self.music = None;
        }
        for voice in self.voices.values_mut() {
            if voice.sink.as_ref().is_some_and(Sink::empty) {
                voice.sink = None;
            }
        }
    }

    fn play_music(&mut self, track: &TrackAsset) -> Result<(), AudioError> {
        self.stop_music();
        let sink = self.start_sink(track.clip().data(), self.music_repeating, self.music_volume)?;
        self.music = Some(sink);
        log::debug!("Music started: {}", track.name());
        Ok(())
    }

    fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }

    fn set_music_repeating(&mut self, repeating: bool) {
        self.music_repeating = repeating;
    }

    fn is_music_repeating(&self) -> bool {
        self.music_repeating
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume;
        if let Some(sink) = &self.music {
            sink.set_volume(volume);
        }
    }

    fn create_instance(&mut self, effect: &EffectAsset, volume: f32) -> Result<SoundHandle, AudioError> {
        if !self.initialized {
            return Err(AudioError::BackendNotInitialized);
        }

        Ok(self.voices.insert(EffectVoice {
            data: Arc::clone(effect.clip().data()),
            looped: false,
            volume,
            sink: None,
        }))
    }

    fn set_instance_looped(&mut self, handle: SoundHandle, looped: bool) -> Result<(), AudioError> {
        self.voice_mut(handle)?.looped = looped;
        Ok(())
    }

    fn set_instance_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError> {
        let voice = self.voice_mut(handle)?;
        voice.volume = volume;
        if let Some(sink) = &voice.sink {
            sink.set_volume(volume);
        }
        Ok(())
    }

    fn play_instance(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let voice = self.voices.get(handle).ok_or(AudioError::InvalidHandle)?;
        let sink = self.start_sink(&voice.data, voice.looped, voice.volume)?;

        let voice = self.voice_mut(handle)?;
        if let Some(previous) = voice.sink.replace(sink) {
            previous.stop();
        }
        Ok(())
    }

    fn stop_instance(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        if let Some(sink) = self.voice_mut(handle)?.sink.take() {
            sink.stop();
        }
        Ok(())
    }

    fn release_instance(&mut self, handle: SoundHandle) {
        if let Some(voice) = self.voices.remove(handle) {
            if let Some(sink) = voice.sink {
                sink.stop();
            }
        }
    }

    fn is_instance_playing(&self, handle: SoundHandle) -> bool {
        self.voices
            .get(handle)
            .and_then(|voice| voice.sink.as_ref())
            .is_some_and(|sink| !sink.is_paused() && !sink.empty())
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Asset;

    #[test]
    fn test_backend_initialization() {
        let mut backend = RodioBackend::new();
        assert!(!backend.is_initialized());

        let config = AudioBackendConfig::default();
        let result = backend.initialize(&config);

        // May fail in CI/test environments without audio device
        if result.is_ok() {
            assert!(backend.is_initialized());
            backend.shutdown();
            assert!(!backend.is_initialized());
        }
    }

    #[test]
    fn test_double_initialization() {
        let mut backend = RodioBackend::new();
        let config = AudioBackendConfig::default();

        if backend.initialize(&config).is_ok() {
            // Second initialization should succeed
            assert!(backend.initialize(&config).is_ok());
            backend.shutdown();
        }
    }

    #[test]
    fn test_playback_without_initialization() {
        let mut backend = RodioBackend::new();
        let track = TrackAsset::from_bytes("theme.ogg", Arc::from(&b"OggS-not-really"[..])).unwrap();
        let effect = EffectAsset::from_bytes("laser.wav", Arc::from(&b"RIFF-not-really"[..])).unwrap();

        assert!(matches!(backend.play_music(&track), Err(AudioError::BackendNotInitialized)));
        assert!(matches!(backend.create_instance(&effect, 1.0), Err(AudioError::BackendNotInitialized)));
    }

    #[test]
    fn test_invalid_handle_operations() {
        let mut backend = RodioBackend::new();
        let invalid_handle = SoundHandle::default();

        assert!(matches!(backend.play_instance(invalid_handle), Err(AudioError::InvalidHandle)));
        assert!(matches!(backend.stop_instance(invalid_handle), Err(AudioError::InvalidHandle)));
        assert!(matches!(backend.set_instance_volume(invalid_handle, 0.5), Err(AudioError::InvalidHandle)));
        assert!(!backend.is_instance_playing(invalid_handle));

        // Releasing an unknown handle is ignored
        backend.release_instance(invalid_handle);
    }

    #[test]
    fn test_undecodable_instance_fails_to_play() {
        let mut backend = RodioBackend::new();

        if backend.initialize(&AudioBackendConfig::default()).is_ok() {
            let effect = EffectAsset::from_bytes("laser.wav", Arc::from(&b"RIFF-garbage"[..])).unwrap();
            let handle = backend.create_instance(&effect, 1.0).unwrap();

            assert!(matches!(backend.play_instance(handle), Err(AudioError::PlaybackFailed(_))));
            assert!(!backend.is_instance_playing(handle));

            backend.release_instance(handle);
            assert!(backend.voices.is_empty());
            backend.shutdown();
        }
    }

    #[test]
    fn test_music_volume_is_remembered() {
        let mut backend = RodioBackend::new();
        backend.set_music_volume(0.25);
        assert_eq!(backend.music_volume, 0.25);
    }
}
