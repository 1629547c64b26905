//! # Jukebox
//!
//! Audio resource manager for games driven by a frame loop.
//!
//! ## Features
//!
//! - **Cached Assets**: Music tracks and sound effects loaded once under typed identifiers
//! - **Exclusive Music**: A single background track slot, stopped before every switch
//! - **Retriggerable Effects**: One persistent playback instance per effect
//! - **Deterministic Teardown**: Idempotent unload/dispose, also run on drop
//! - **Pluggable Output**: Rodio device output or a headless null backend
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jukebox::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = create_backend(AudioBackendConfig::default())?;
//!     let mut audio = AudioManager::with_content_root("Content", backend)?;
//!
//!     let theme = TrackId::new("bgm");
//!     audio.load_track(&theme, "theme.ogg")?;
//!     audio.play_track(&theme, true)?;
//!
//!     let laser = EffectId::new("laser");
//!     audio.load_effect(&laser, "laser.wav")?;
//!     audio.play_effect(&laser, false)?;
//!
//!     audio.dispose();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod audio;

#[cfg(test)]
mod tests;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        assets::{Asset, AssetError, ContentLoader, ContentManager, ContentSource},
        audio::{
            backend::{create_backend, AudioBackend, AudioBackendConfig, BackendKind},
            AudioError, AudioManager, EffectAsset, EffectId, TrackAsset, TrackId,
        },
        config::{AudioConfig, AudioManifest, Config},
    };
}
