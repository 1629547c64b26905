//! Volume helpers and the process-wide music volume
//!
//! Music goes to a single output device, so its volume is one value for the whole process.
//! Every [`AudioManager`](super::AudioManager) reads and writes the same setting; changing it
//! from one manager is visible to all others. It starts at 1.0 and is never reset implicitly.

use std::sync::atomic::{AtomicU32, Ordering};

/// Bit pattern of `1.0_f32`
const FULL_VOLUME_BITS: u32 = 0x3F80_0000;

static MUSIC_VOLUME: AtomicU32 = AtomicU32::new(FULL_VOLUME_BITS);

/// Clamp a volume into `[0.0, 1.0]`; NaN becomes silence
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Current process-wide music volume
pub fn music_volume() -> f32 {
    f32::from_bits(MUSIC_VOLUME.load(Ordering::Relaxed))
}

/// Set the process-wide music volume, returning the clamped value that was stored
pub fn set_music_volume(volume: f32) -> f32 {
    let clamped = clamp_volume(volume);
    MUSIC_VOLUME.store(clamped.to_bits(), Ordering::Relaxed);
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_volume_bits() {
        assert_eq!(f32::from_bits(FULL_VOLUME_BITS), 1.0);
    }

    #[test]
    fn test_clamp_volume() {
        assert_eq!(clamp_volume(1.5), 1.0);
        assert_eq!(clamp_volume(-0.2), 0.0);
        assert_eq!(clamp_volume(0.25), 0.25);
        assert_eq!(clamp_volume(f32::NAN), 0.0);
    }
}
