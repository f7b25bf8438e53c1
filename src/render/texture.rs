use core::str::FromStr;
use std::path::{Path, PathBuf};

use macroquad::texture::{FilterMode, Texture2D};
use tracing::debug;

use crate::error::{ConfigError, Error, Result};

/// Texture sampling for minification and magnification.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TextureFilter {
    #[default]
    Linear,
    Nearest,
}

impl FromStr for TextureFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(TextureFilter::Linear),
            "nearest" => Ok(TextureFilter::Nearest),
            _ => Err(ConfigError::FilterMode(s.to_owned()).into()),
        }
    }
}

impl From<TextureFilter> for FilterMode {
    fn from(filter: TextureFilter) -> Self {
        match filter {
            TextureFilter::Linear => FilterMode::Linear,
            TextureFilter::Nearest => FilterMode::Nearest,
        }
    }
}

/// Where a texture path is looked up.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AssetScope {
    /// Relative to the bundled asset root.
    #[default]
    Internal,
    /// Used as given on the filesystem.
    External,
}

impl FromStr for AssetScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i" => Ok(AssetScope::Internal),
            "e" => Ok(AssetScope::External),
            _ => Err(ConfigError::AssetScope(s.to_owned()).into()),
        }
    }
}

impl AssetScope {
    pub fn resolve(self, asset_root: &Path, path: &str) -> PathBuf {
        match self {
            AssetScope::Internal => asset_root.join(path),
            AssetScope::External => PathBuf::from(path),
        }
    }
}

pub async fn load_texture(
    scope: AssetScope,
    asset_root: &Path,
    path: &str,
    filter: TextureFilter,
) -> Result<Texture2D> {
    let full = scope.resolve(asset_root, path);
    let full = full.to_string_lossy();

    let texture = macroquad::texture::load_texture(&full)
        .await
        .map_err(|e| Error::TextureLoad {
            path: full.to_string(),
            reason: format!("{e:?}"),
        })?;
    texture.set_filter(filter.into());

    debug!(path = %full, ?filter, "texture loaded");
    Ok(texture)
}
