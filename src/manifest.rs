//! Reading and deriving the `Contents.json` manifest of an icon set.
//!
//! Image descriptors are kept as open JSON objects so fields this tool
//! doesn't know about are carried over untouched.
use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Descriptor field naming the asset directory an image lives in.
pub const FOLDER_KEY: &str = "folder";

/// Default value written to every descriptor's `folder` field.
pub const DEFAULT_FOLDER: &str = "Assets.xcassets/AppIcon-Dev.appiconset/";

pub type Descriptor = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub images: Vec<Descriptor>,
    /// Set-level metadata such as Xcode's `info` block.
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Manifest {
    pub fn read(path: impl AsRef<Path>) -> eyre::Result<Manifest> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read manifest '{}'", path.display()))?;
        Manifest::parse(&data)
            .wrap_err_with(|| format!("failed to parse manifest '{}'", path.display()))
    }

    pub fn parse(data: &str) -> eyre::Result<Manifest> {
        Ok(serde_json::from_str(data)?)
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_pretty_string(&self) -> eyre::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> eyre::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_pretty_string()?)
            .wrap_err_with(|| format!("failed to write manifest '{}'", path.display()))
    }
}

/// Copies `source`, pointing every image descriptor at `folder`. Descriptor
/// order and all other fields are preserved.
pub fn derive_manifest(source: &Manifest, folder: &str) -> Manifest {
    let images = source
        .images
        .iter()
        .map(|descriptor| {
            let mut descriptor = descriptor.clone();
            descriptor.insert(FOLDER_KEY.to_owned(), folder.into());
            descriptor
        })
        .collect();
    Manifest {
        images,
        metadata: source.metadata.clone(),
    }
}
