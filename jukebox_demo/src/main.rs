//! Jukebox demo application
//!
//! Loads an audio configuration, preloads its manifest, then runs a short fake frame loop:
//! the first track plays in a loop while each effect is triggered in turn.
//!
//! Usage: `jukebox_demo [config.toml|config.ron] [--headless]`

use jukebox::foundation::logging;
use jukebox::prelude::*;
use std::time::Duration;

const FRAME_TIME: Duration = Duration::from_millis(16);
const FRAMES_PER_EFFECT: usize = 45;

fn run(config: &AudioConfig) -> Result<(), AudioError> {
    let mut audio = AudioManager::from_config(config)?;

    if let Some(id) = config.manifest.tracks.keys().next() {
        log::info!("Playing track '{}'", id);
        audio.play_track(&TrackId::new(id), true)?;
    } else {
        log::warn!("Manifest has no tracks");
    }

    let effects: Vec<EffectId> = config.manifest.effects.keys().map(EffectId::new).collect();
    let frames = FRAMES_PER_EFFECT * effects.len().max(1);

    for frame in 0..frames {
        if frame % FRAMES_PER_EFFECT == 0 {
            if let Some(effect) = effects.get(frame / FRAMES_PER_EFFECT) {
                log::info!("Frame {}: triggering '{}'", frame, effect);
                audio.play_effect(effect, false)?;
            }
        }

        audio.update();
        std::thread::sleep(FRAME_TIME);
    }

    audio.stop_track()?;
    audio.dispose();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default_filter("info");

    let mut config_path = None;
    let mut headless = false;
    for arg in std::env::args().skip(1) {
        if arg == "--headless" {
            headless = true;
        } else {
            config_path = Some(arg);
        }
    }

    let mut config = match &config_path {
        Some(path) => {
            log::info!("Loading audio config from {}", path);
            AudioConfig::load_from_file(path)?
        }
        None => {
            log::info!("No config given, using defaults");
            AudioConfig::default()
        }
    };

    if headless {
        config.backend.kind = BackendKind::Null;
    }

    log::info!("Starting Jukebox demo ({:?} backend)", config.backend.kind);
    run(&config)?;
    log::info!("Jukebox demo finished");
    Ok(())
}
