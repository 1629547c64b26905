//! Test doubles: a backend that records transport calls and an in-memory content loader

use crate::assets::{AssetError, ContentLoader};
use crate::audio::backend::{AudioBackend, AudioBackendConfig, SoundHandle};
use crate::audio::{AudioError, EffectAsset, TrackAsset};
use slotmap::SlotMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Transport call as seen by the backend
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PlayMusic { name: String, repeating: bool },
    StopMusic,
    MusicVolume(f32),
    CreateInstance { name: String, volume: f32 },
    InstanceVolume { name: String, volume: f32 },
    PlayInstance { name: String, looped: bool },
    StopInstance(String),
    ReleaseInstance(String),
    Shutdown,
}

#[derive(Debug)]
struct Voice {
    name: String,
    looped: bool,
    volume: f32,
    playing: bool,
}

/// State shared between a [`RecordingBackend`] and the test holding it
#[derive(Debug, Default)]
pub struct Transport {
    pub calls: Vec<Call>,
    pub playing: Option<(String, bool)>,
    pub repeating: bool,
    pub fail_play_music: bool,
    pub fail_create_instance: bool,
    voices: SlotMap<SoundHandle, Voice>,
}

impl Transport {
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn stops(&self) -> usize {
        self.count(|call| matches!(call, Call::StopMusic))
    }

    /// Calls that touch the music channel or an instance, ignoring volume sync
    pub fn transport_calls(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|call| !matches!(call, Call::MusicVolume(_)))
            .cloned()
            .collect()
    }

    pub fn live_instances(&self) -> usize {
        self.voices.len()
    }

    pub fn instance_volume(&self, name: &str) -> Option<f32> {
        self.voices.values().find(|voice| voice.name == name).map(|voice| voice.volume)
    }
}

pub struct RecordingBackend {
    transport: Rc<RefCell<Transport>>,
    initialized: bool,
}

impl RecordingBackend {
    pub fn new() -> (Box<dyn AudioBackend>, Rc<RefCell<Transport>>) {
        let transport = Rc::new(RefCell::new(Transport::default()));
        let backend = Self {
            transport: Rc::clone(&transport),
            initialized: false,
        };
        (Box::new(backend), transport)
    }

    fn with_voice<R>(&self, handle: SoundHandle, f: impl FnOnce(&mut Voice) -> R) -> Result<R, AudioError> {
        let mut transport = self.transport.borrow_mut();
        transport.voices.get_mut(handle).map(f).ok_or(AudioError::InvalidHandle)
    }

    fn record(&self, call: Call) {
        self.transport.borrow_mut().calls.push(call);
    }
}

impl AudioBackend for RecordingBackend {
    fn initialize(&mut self, _config: &AudioBackendConfig) -> Result<(), AudioError> {
        self.initialized = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.initialized = false;
        self.record(Call::Shutdown);
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn update(&mut self) {}

    fn play_music(&mut self, track: &TrackAsset) -> Result<(), AudioError> {
        let mut transport = self.transport.borrow_mut();
        if transport.fail_play_music {
            transport.playing = None;
            return Err(AudioError::PlaybackFailed("device lost".into()));
        }
        let repeating = transport.repeating;
        transport.playing = Some((track.name().to_string(), repeating));
        transport.calls.push(Call::PlayMusic {
            name: track.name().to_string(),
            repeating,
        });
        Ok(())
    }

    fn stop_music(&mut self) {
        let mut transport = self.transport.borrow_mut();
        transport.playing = None;
        transport.calls.push(Call::StopMusic);
    }

    fn set_music_repeating(&mut self, repeating: bool) {
        self.transport.borrow_mut().repeating = repeating;
    }

    fn is_music_repeating(&self) -> bool {
        self.transport.borrow().repeating
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.record(Call::MusicVolume(volume));
    }

    fn create_instance(&mut self, effect: &EffectAsset, volume: f32) -> Result<SoundHandle, AudioError> {
        let mut transport = self.transport.borrow_mut();
        if transport.fail_create_instance {
            return Err(AudioError::PlaybackFailed("out of voices".into()));
        }
        transport.calls.push(Call::CreateInstance {
            name: effect.name().to_string(),
            volume,
        });
        Ok(transport.voices.insert(Voice {
            name: effect.name().to_string(),
            looped: false,
            volume,
            playing: false,
        }))
    }

    fn set_instance_looped(&mut self, handle: SoundHandle, looped: bool) -> Result<(), AudioError> {
        self.with_voice(handle, |voice| voice.looped = looped)
    }

    fn set_instance_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError> {
        let name = self.with_voice(handle, |voice| {
            voice.volume = volume;
            voice.name.clone()
        })?;
        self.record(Call::InstanceVolume { name, volume });
        Ok(())
    }

    fn play_instance(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let (name, looped) = self.with_voice(handle, |voice| {
            voice.playing = true;
            (voice.name.clone(), voice.looped)
        })?;
        self.record(Call::PlayInstance { name, looped });
        Ok(())
    }

    fn stop_instance(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        let name = self.with_voice(handle, |voice| {
            voice.playing = false;
            voice.name.clone()
        })?;
        self.record(Call::StopInstance(name));
        Ok(())
    }

    fn release_instance(&mut self, handle: SoundHandle) {
        let removed = self.transport.borrow_mut().voices.remove(handle);
        if let Some(voice) = removed {
            self.record(Call::ReleaseInstance(voice.name));
        }
    }

    fn is_instance_playing(&self, handle: SoundHandle) -> bool {
        self.transport
            .borrow()
            .voices
            .get(handle)
            .is_some_and(|voice| voice.playing)
    }
}

/// Counters shared between a [`MemoryContent`] and the test holding it
#[derive(Debug, Default)]
pub struct ContentStats {
    pub reads: Vec<String>,
    pub unloads: usize,
    pub disposals: usize,
}

/// Content loader serving fixed byte blobs, caching by name
pub struct MemoryContent {
    files: HashMap<String, Arc<[u8]>>,
    cache: HashMap<String, Arc<[u8]>>,
    stats: Rc<RefCell<ContentStats>>,
}

impl MemoryContent {
    /// Loader with a few valid clips: `theme.ogg`, `menu.ogg`, `laser.wav`, `boom.wav`
    pub fn with_clips() -> (Self, Rc<RefCell<ContentStats>>) {
        let stats = Rc::new(RefCell::new(ContentStats::default()));
        let mut files: HashMap<String, Arc<[u8]>> = HashMap::new();
        files.insert("theme.ogg".into(), Arc::from(&b"OggS-theme"[..]));
        files.insert("menu.ogg".into(), Arc::from(&b"OggS-menu"[..]));
        files.insert("laser.wav".into(), Arc::from(&b"RIFF-laser"[..]));
        files.insert("boom.wav".into(), Arc::from(&b"RIFF-boom"[..]));
        files.insert("readme.txt".into(), Arc::from(&b"not audio"[..]));

        let content = Self {
            files,
            cache: HashMap::new(),
            stats: Rc::clone(&stats),
        };
        (content, stats)
    }
}

impl ContentLoader for MemoryContent {
    fn read(&mut self, name: &str) -> Result<Arc<[u8]>, AssetError> {
        self.stats.borrow_mut().reads.push(name.to_string());
        if let Some(bytes) = self.cache.get(name) {
            return Ok(Arc::clone(bytes));
        }
        let bytes = self
            .files
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        self.cache.insert(name.to_string(), Arc::clone(&bytes));
        Ok(bytes)
    }

    fn unload(&mut self) {
        self.cache.clear();
        self.stats.borrow_mut().unloads += 1;
    }

    fn dispose(&mut self) {
        self.cache.clear();
        self.stats.borrow_mut().disposals += 1;
    }
}
