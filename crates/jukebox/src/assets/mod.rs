//! Asset management system
//!
//! Content is resolved by name through a [`ContentLoader`]. The loader hands out raw bytes and
//! keeps its own cache; typed assets are built from those bytes through the [`Asset`] trait.

pub mod content;

pub use content::ContentManager;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use thiserror::Error;

/// Asset trait for loadable resources
pub trait Asset: Send + Sync + 'static {
    /// Build the asset from the raw bytes the content loader returned for `name`
    fn from_bytes(name: &str, bytes: Arc<[u8]>) -> Result<Self, AssetError>
    where
        Self: Sized;
}

/// Content-loading collaborator
///
/// Resolves asset names into raw data. Implementations are expected to cache what they read
/// until [`ContentLoader::unload`] is called.
pub trait ContentLoader {
    /// Read the named asset, failing with [`AssetError::NotFound`] if it does not exist
    fn read(&mut self, name: &str) -> Result<Arc<[u8]>, AssetError>;

    /// Release everything cached so far
    fn unload(&mut self);

    /// Release the loader itself; only called on loaders the manager owns
    fn dispose(&mut self) {
        self.unload();
    }
}

/// Read `name` through `loader` and build a typed asset from it
pub fn load<T: Asset>(loader: &mut dyn ContentLoader, name: &str) -> Result<T, AssetError> {
    let bytes = loader.read(name)?;
    T::from_bytes(name, bytes)
}

/// Ownership of the content loader an audio manager reads from
///
/// A shared loader belongs to the host application: the manager may ask it to drop its cache
/// but never disposes it. An owned loader lives and dies with the manager.
pub enum ContentSource {
    /// Loader supplied by the host and shared with other subsystems
    Shared(Rc<RefCell<dyn ContentLoader>>),
    /// Loader owned by the manager
    Owned(Box<dyn ContentLoader>),
}

impl ContentSource {
    /// Wrap a host-owned loader
    pub fn shared<L: ContentLoader + 'static>(loader: Rc<RefCell<L>>) -> Self {
        Self::Shared(loader)
    }

    /// Wrap a loader the manager will own
    pub fn owned<L: ContentLoader + 'static>(loader: L) -> Self {
        Self::Owned(Box::new(loader))
    }

    /// Whether the manager owns this loader
    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Load a typed asset
    pub fn load<T: Asset>(&mut self, name: &str) -> Result<T, AssetError> {
        match self {
            Self::Shared(loader) => {
                let mut loader = loader
                    .try_borrow_mut()
                    .map_err(|_| AssetError::LoadFailed(format!("content loader busy while loading {name}")))?;
                load(&mut *loader, name)
            }
            Self::Owned(loader) => load(loader.as_mut(), name),
        }
    }

    /// Ask the loader to drop its cache
    ///
    /// Returns `false` when a shared loader is borrowed elsewhere and could not be unloaded.
    pub fn unload(&mut self) -> bool {
        match self {
            Self::Shared(loader) => match loader.try_borrow_mut() {
                Ok(mut loader) => {
                    loader.unload();
                    true
                }
                Err(_) => false,
            },
            Self::Owned(loader) => {
                loader.unload();
                true
            }
        }
    }

    /// Dispose the loader if it is owned; shared loaders are left alone
    pub fn dispose(&mut self) {
        match self {
            Self::Shared(_) => log::debug!("Leaving shared content loader to its owner"),
            Self::Owned(loader) => loader.dispose(),
        }
    }
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Loader was disposed
    #[error("Content loader has been disposed")]
    Disposed,

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
