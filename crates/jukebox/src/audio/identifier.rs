//! Typed asset identifiers
//!
//! Tracks and effects live in separate identifier spaces. The kind is a type parameter, so a
//! [`TrackId`] can never be looked up in the effect registry or the other way round.
//!
//! ```compile_fail
//! use jukebox::audio::{AudioManager, TrackId};
//!
//! fn trigger(audio: &mut AudioManager) {
//!     let _ = audio.play_effect(&TrackId::new("bgm"), false);
//! }
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// Marker for music track identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {}

/// Marker for sound effect identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {}

/// Identifier of a music track
pub type TrackId = AssetId<Track>;

/// Identifier of a sound effect
pub type EffectId = AssetId<Effect>;

/// Opaque, cheaply clonable identifier tagged with its asset kind
pub struct AssetId<K> {
    name: Arc<str>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> AssetId<K> {
    /// Create an identifier
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            _kind: PhantomData,
        }
    }

    /// The identifier text
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

// Manual impls: derives would put bounds on the marker type.
impl<K> Clone for AssetId<K> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            _kind: PhantomData,
        }
    }
}

impl<K> PartialEq for AssetId<K> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<K> Eq for AssetId<K> {}

impl<K> Hash for AssetId<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<K> PartialOrd for AssetId<K> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for AssetId<K> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

impl<K> Borrow<str> for AssetId<K> {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl<K> fmt::Debug for AssetId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({:?})", &*self.name)
    }
}

impl<K> fmt::Display for AssetId<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<K> From<&str> for AssetId<K> {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl<K> From<String> for AssetId<K> {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_ids_compare_by_name() {
        assert_eq!(TrackId::new("bgm"), TrackId::from("bgm"));
        assert_ne!(TrackId::new("bgm"), TrackId::new("menu"));
    }

    #[test]
    fn test_ids_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(EffectId::new("laser"), 1);
        assert_eq!(map.get("laser"), Some(&1));
    }

    #[test]
    fn test_display_is_the_name() {
        assert_eq!(EffectId::new("boom").to_string(), "boom");
    }
}
