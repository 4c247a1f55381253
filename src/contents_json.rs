//! Contents.json data model for Apple's Asset Catalog format.
//!
//! Only the subset of the Asset Catalog Format Reference schema that an
//! app icon set and a single-image imageset actually use: per-image
//! filename, idiom, scale, and point size, plus the info block.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Root structure of a Contents.json file.
#[derive(Serialize, Debug, Clone)]
pub struct ContentsFile {
    pub images: Vec<ImageEntry>,
    pub info: Info,
}

/// One image entry within the catalog.
#[derive(Serialize, Debug, Clone)]
pub struct ImageEntry {
    pub filename: String,
    /// Device type, e.g. "iphone", "ipad", "ios-marketing", "universal".
    pub idiom: String,
    /// Scale factor, e.g. "1x", "2x", "3x".
    pub scale: String,
    /// Point size, e.g. "60x60"; omitted for imageset entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Versioning and authorship block required by every catalog file.
#[derive(Serialize, Debug, Clone)]
pub struct Info {
    pub version: u8,
    pub author: String,
}

impl ContentsFile {
    pub fn new(author: String) -> Self {
        ContentsFile {
            images: Vec::new(),
            info: Info { version: 1, author },
        }
    }

    pub fn add_image(&mut self, image: ImageEntry) {
        self.images.push(image);
    }

    /// Serialize into `dir/Contents.json`.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let contents_path = dir.join("Contents.json");
        let contents_json =
            serde_json::to_string_pretty(self).context("Failed to serialize Contents.json")?;
        std::fs::write(&contents_path, contents_json)
            .context("Failed to write Contents.json file")?;
        Ok(())
    }
}

impl ImageEntry {
    pub fn new(filename: String, idiom: String, scale: String, size: Option<String>) -> Self {
        ImageEntry {
            filename,
            idiom,
            scale,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_valid_catalog_json() {
        let mut contents = ContentsFile::new("appicon-gen".to_string());
        contents.add_image(ImageEntry::new(
            "app-icon-60@2x.png".to_string(),
            "iphone".to_string(),
            "2x".to_string(),
            Some("60x60".to_string()),
        ));
        contents.add_image(ImageEntry::new(
            "splash-icon.png".to_string(),
            "universal".to_string(),
            "1x".to_string(),
            None,
        ));

        let json = serde_json::to_string_pretty(&contents).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["info"]["version"], 1);
        assert_eq!(parsed["images"][0]["size"], "60x60");
        // The size key is omitted entirely when not set.
        assert!(parsed["images"][1].get("size").is_none());
    }
}
