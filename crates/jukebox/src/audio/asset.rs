//! Audio asset types
//!
//! A loaded asset keeps the encoded file bytes; decoding happens in the backend when a track or
//! effect instance is played. [`TrackAsset`] and [`EffectAsset`] are cheap handles to a shared
//! [`AudioClip`] and compare by identity through `ptr_eq`.

use crate::assets::{Asset, AssetError};
use std::sync::Arc;

/// Supported audio formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// WAV uncompressed
    Wav,
    /// OGG Vorbis compressed
    Ogg,
    /// MP3 compressed
    Mp3,
    /// FLAC lossless
    Flac,
    /// Unknown format
    Unknown,
}

impl AudioFormat {
    /// Detect audio format from magic bytes
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.len() < 4 {
            return Self::Unknown;
        }

        match &bytes[0..4] {
            b"RIFF" => Self::Wav,
            b"OggS" => Self::Ogg,
            b"fLaC" => Self::Flac,
            // MP3 can start with ID3 tag or frame sync
            [0xFF, 0xFB, _, _] | [0xFF, 0xFA, _, _] | [0xFF, 0xF3, _, _] => Self::Mp3,
            [b'I', b'D', b'3', _] => Self::Mp3,
            _ => Self::Unknown,
        }
    }
}

/// Encoded audio data together with the name it was loaded from
#[derive(Debug)]
pub struct AudioClip {
    name: String,
    data: Arc<[u8]>,
    format: AudioFormat,
}

impl AudioClip {
    fn parse(name: &str, data: Arc<[u8]>) -> Result<Self, AssetError> {
        if data.is_empty() {
            return Err(AssetError::InvalidData(format!("empty audio file: {name}")));
        }

        let format = AudioFormat::detect(&data);
        if format == AudioFormat::Unknown {
            return Err(AssetError::InvalidData(format!("unknown audio format: {name}")));
        }

        Ok(Self {
            name: name.to_string(),
            data,
            format,
        })
    }

    /// Source name the clip was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encoded bytes
    pub fn data(&self) -> &Arc<[u8]> {
        &self.data
    }

    /// Detected format
    pub fn format(&self) -> AudioFormat {
        self.format
    }
}

/// Handle to a loaded music track
#[derive(Debug, Clone)]
pub struct TrackAsset(Arc<AudioClip>);

impl TrackAsset {
    /// Underlying clip
    pub fn clip(&self) -> &AudioClip {
        &self.0
    }

    /// Source name the track was loaded from
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Whether both handles refer to the same loaded track
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Asset for TrackAsset {
    fn from_bytes(name: &str, bytes: Arc<[u8]>) -> Result<Self, AssetError> {
        AudioClip::parse(name, bytes).map(|clip| Self(Arc::new(clip)))
    }
}

/// Handle to a loaded sound effect
#[derive(Debug, Clone)]
pub struct EffectAsset(Arc<AudioClip>);

impl EffectAsset {
    /// Underlying clip
    pub fn clip(&self) -> &AudioClip {
        &self.0
    }

    /// Source name the effect was loaded from
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Whether both handles refer to the same loaded effect
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Asset for EffectAsset {
    fn from_bytes(name: &str, bytes: Arc<[u8]>) -> Result<Self, AssetError> {
        AudioClip::parse(name, bytes).map(|clip| Self(Arc::new(clip)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(AudioFormat::detect(b"RIFF....WAVE"), AudioFormat::Wav);
        assert_eq!(AudioFormat::detect(b"OggS...."), AudioFormat::Ogg);
        assert_eq!(AudioFormat::detect(b"fLaC...."), AudioFormat::Flac);
        assert_eq!(AudioFormat::detect(b"ID3\x03...."), AudioFormat::Mp3);
        assert_eq!(AudioFormat::detect(b"ABCD"), AudioFormat::Unknown);
        assert_eq!(AudioFormat::detect(b"Og"), AudioFormat::Unknown);
    }

    #[test]
    fn test_empty_data_fails() {
        let result = TrackAsset::from_bytes("silence.ogg", Arc::from(Vec::<u8>::new()));
        assert!(matches!(result, Err(AssetError::InvalidData(_))));
    }

    #[test]
    fn test_unknown_format_fails() {
        let result = EffectAsset::from_bytes("notes.txt", Arc::from(&b"hello world"[..]));
        assert!(matches!(result, Err(AssetError::InvalidData(_))));
    }

    #[test]
    fn test_track_identity() {
        let bytes: Arc<[u8]> = Arc::from(&b"OggS-theme"[..]);
        let a = TrackAsset::from_bytes("theme.ogg", Arc::clone(&bytes)).unwrap();
        let b = TrackAsset::from_bytes("theme.ogg", bytes).unwrap();

        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
        assert_eq!(a.clip().format(), AudioFormat::Ogg);
        assert_eq!(a.name(), "theme.ogg");
    }
}
