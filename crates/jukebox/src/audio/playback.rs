//! Background track state machine
//!
//! The music channel is a single process-wide slot. Switching to a different track always
//! stops the current one first, so the transport never has two tracks going at once and the
//! controller's notion of the current track matches what the transport is playing.

use super::backend::AudioBackend;
use super::{volume, AudioError, TrackAsset, TrackId};

/// Music slot state
#[derive(Debug, Clone, Default)]
pub enum TrackState {
    /// Nothing playing
    #[default]
    Idle,
    /// `track` was started under `id`
    Playing {
        /// Identifier the track was played through
        id: TrackId,
        /// Track on the transport
        track: TrackAsset,
    },
}

pub(crate) struct PlaybackController {
    state: TrackState,
    effect_volume: f32,
}

impl PlaybackController {
    pub fn new(effect_volume: f32) -> Self {
        Self {
            state: TrackState::Idle,
            effect_volume: volume::clamp_volume(effect_volume),
        }
    }

    pub fn state(&self) -> &TrackState {
        &self.state
    }

    pub fn current_track(&self) -> Option<&TrackAsset> {
        match &self.state {
            TrackState::Idle => None,
            TrackState::Playing { track, .. } => Some(track),
        }
    }

    pub fn current_track_id(&self) -> Option<&TrackId> {
        match &self.state {
            TrackState::Idle => None,
            TrackState::Playing { id, .. } => Some(id),
        }
    }

    /// Start `track`, stopping a different current track first
    ///
    /// Replaying the current track only re-issues play with the new repeat flag. Tracks loaded
    /// under different identifiers are different tracks even when they share a source. If the
    /// transport refuses to play, the controller ends up idle.
    pub fn play_track(
        &mut self,
        id: &TrackId,
        track: &TrackAsset,
        looping: bool,
        backend: &mut dyn AudioBackend,
    ) -> Result<(), AudioError> {
        let replay = self.current_track().is_some_and(|current| current.ptr_eq(track));
        if !replay {
            self.stop_track(backend);
        }

        self.state = TrackState::Playing {
            id: id.clone(),
            track: track.clone(),
        };

        // Another manager may have changed the shared volume since our last play.
        backend.set_music_volume(volume::music_volume());
        backend.set_music_repeating(looping);
        if let Err(e) = backend.play_music(track) {
            self.state = TrackState::Idle;
            return Err(e);
        }
        Ok(())
    }

    /// Stop the current track; returns `false` when already idle
    pub fn stop_track(&mut self, backend: &mut dyn AudioBackend) -> bool {
        if matches!(self.state, TrackState::Idle) {
            return false;
        }

        backend.stop_music();
        self.state = TrackState::Idle;
        true
    }

    pub fn effect_volume(&self) -> f32 {
        self.effect_volume
    }

    pub fn set_effect_volume(&mut self, volume: f32) -> f32 {
        self.effect_volume = volume::clamp_volume(volume);
        self.effect_volume
    }
}
