//! Bundled asset resolution.
//!
//! Models are addressed by asset URIs of the form
//! `file:///android_asset/<name>`, or by a bare relative name. An
//! [`AssetSource`] turns such a URI into bytes.

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, TfDemoError};

/// URI prefix for files shipped in the asset bundle.
pub const ASSET_URI_PREFIX: &str = "file:///android_asset/";

/// Something that can hand out bundled assets by URI.
pub trait AssetSource {
    /// Map an asset URI to a concrete location.
    fn resolve(&self, uri: &str) -> Result<PathBuf>;

    /// Read the full contents of an asset.
    fn open(&self, uri: &str) -> Result<Vec<u8>> {
        let path = self.resolve(uri)?;
        if !path.is_file() {
            return Err(TfDemoError::FileNotFound(path));
        }
        Ok(std::fs::read(&path)?)
    }
}

/// Asset bundle backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    /// Create a resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory assets are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for AssetDir {
    fn resolve(&self, uri: &str) -> Result<PathBuf> {
        let name = asset_name(uri)?;
        Ok(self.root.join(name))
    }
}

/// Strip the asset prefix and check the remainder stays inside the bundle.
pub fn asset_name(uri: &str) -> Result<&Path> {
    let name = uri.strip_prefix(ASSET_URI_PREFIX).unwrap_or(uri);
    if name.is_empty() {
        return Err(TfDemoError::config(format!("Empty asset name in {:?}", uri)));
    }

    let path = Path::new(name);
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(TfDemoError::config(format!(
            "Asset path must be relative to the bundle: {}",
            uri
        )));
    }
    Ok(path)
}
