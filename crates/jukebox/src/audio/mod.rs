//! Audio system
//!
//! [`AudioManager`] caches music tracks and sound effects under typed identifiers, keeps a
//! single background track playing at a time and owns one retriggerable instance per effect.
//! Actual output goes through an [`backend::AudioBackend`].

pub mod asset;
pub mod backend;
pub mod identifier;
pub mod volume;

mod manager;
mod playback;
mod pool;
mod store;

pub use asset::{AudioClip, AudioFormat, EffectAsset, TrackAsset};
pub use backend::SoundHandle;
pub use identifier::{AssetId, Effect, EffectId, Track, TrackId};
pub use manager::AudioManager;
pub use playback::TrackState;
pub use pool::EffectInstance;

use crate::assets::AssetError;
use thiserror::Error;

/// Audio system errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// Backend used before `initialize`
    #[error("Audio backend not initialized")]
    BackendNotInitialized,

    /// Output device could not be opened
    #[error("Audio backend initialization failed: {0}")]
    BackendInitFailed(String),

    /// Decoding or sink creation failed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Handle does not refer to a live instance
    #[error("Invalid sound handle")]
    InvalidHandle,

    /// Content could not be loaded
    #[error("Content error: {0}")]
    Content(#[from] AssetError),

    /// Manager used after `dispose`
    #[error("Audio manager has been disposed")]
    Disposed,
}
