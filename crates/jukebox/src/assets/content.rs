//! File-system content loader scoped to a single content directory
//!
//! Names are resolved relative to the content root. A name without an extension is tried
//! against each configured extension in order, so `"theme"` finds `theme.ogg`.

use super::{AssetError, ContentLoader};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Extensions tried, in order, for names given without one
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["ogg", "wav", "mp3", "flac"];

/// Content loader reading from a directory and caching by asset name
pub struct ContentManager {
    root: PathBuf,
    extensions: Vec<String>,
    cache: HashMap<String, Arc<[u8]>>,
    disposed: bool,
}

impl ContentManager {
    /// Create a content manager rooted at `root`
    ///
    /// # Errors
    /// `NotFound` if `root` is not an existing directory.
    pub fn new<P: Into<PathBuf>>(root: P) -> Result<Self, AssetError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AssetError::NotFound(root.display().to_string()));
        }

        Ok(Self {
            root,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect(),
            cache: HashMap::new(),
            disposed: false,
        })
    }

    /// Replace the extensions tried for names without one
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Content root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of assets currently cached
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    /// Whether [`ContentLoader::dispose`] has been called
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, AssetError> {
        let relative = Path::new(name);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(AssetError::InvalidData(format!("asset name escapes content root: {name}")));
        }

        let direct = self.root.join(relative);
        if direct.is_file() {
            return Ok(direct);
        }

        if relative.extension().is_none() {
            for ext in &self.extensions {
                let candidate = direct.with_extension(ext);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }

        Err(AssetError::NotFound(name.to_string()))
    }
}

impl ContentLoader for ContentManager {
    fn read(&mut self, name: &str) -> Result<Arc<[u8]>, AssetError> {
        if self.disposed {
            return Err(AssetError::Disposed);
        }

        if let Some(bytes) = self.cache.get(name) {
            return Ok(Arc::clone(bytes));
        }

        let path = self.resolve(name)?;
        let bytes: Arc<[u8]> = Arc::from(fs::read(&path)?);
        log::debug!("Read content '{}' from {} ({} bytes)", name, path.display(), bytes.len());

        self.cache.insert(name.to_string(), Arc::clone(&bytes));
        Ok(bytes)
    }

    fn unload(&mut self) {
        if !self.cache.is_empty() {
            log::debug!("Releasing {} cached content entries", self.cache.len());
        }
        self.cache.clear();
    }

    fn dispose(&mut self) {
        self.unload();
        self.disposed = true;
    }
}
