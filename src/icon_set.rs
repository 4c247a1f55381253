//! Batch resampling of the master icon into the iOS icon set.
//!
//! The output table is fixed: six `AppIcon.appiconset` entries plus a
//! full-resolution splash copy. Every target is at most the master's
//! 1024 px resolution, downscaling uses Lanczos3, and the whole step is
//! deterministic so re-running it yields byte-identical files.

use crate::contents_json::{ContentsFile, ImageEntry};
use anyhow::{Context, Result};
use image::{imageops::FilterType, DynamicImage};
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Directory under the output root receiving the app icon variants.
pub const APPICONSET_DIR: &str = "AppIcon.appiconset";
/// Directory under the output root receiving the splash copy.
pub const SPLASH_DIR: &str = "SplashIcon.imageset";

/// One row of the fixed output table, with the asset-catalog metadata
/// needed to describe it in a Contents.json.
#[derive(Debug, Clone, Copy)]
pub struct IconEntry {
    pub filename: &'static str,
    pub pixels: u32,
    /// Point size as the catalog spells it, e.g. "83.5x83.5".
    pub points: &'static str,
    pub scale: &'static str,
    pub idiom: &'static str,
}

/// The app icon sizes required by iOS.
pub const APP_ICONS: [IconEntry; 6] = [
    IconEntry { filename: "app-icon-1024.png", pixels: 1024, points: "1024x1024", scale: "1x", idiom: "ios-marketing" },
    IconEntry { filename: "app-icon-60@2x.png", pixels: 120, points: "60x60", scale: "2x", idiom: "iphone" },
    IconEntry { filename: "app-icon-60@3x.png", pixels: 180, points: "60x60", scale: "3x", idiom: "iphone" },
    IconEntry { filename: "app-icon-76.png", pixels: 76, points: "76x76", scale: "1x", idiom: "ipad" },
    IconEntry { filename: "app-icon-76@2x.png", pixels: 152, points: "76x76", scale: "2x", idiom: "ipad" },
    IconEntry { filename: "app-icon-83.5@2x.png", pixels: 167, points: "83.5x83.5", scale: "2x", idiom: "ipad" },
];

/// The in-app splash image keeps the master's full resolution.
pub const SPLASH_ICON: (&str, u32) = ("splash-icon.png", 1024);

/// Failure taxonomy for the resampling step.
#[derive(Debug, Error)]
pub enum IconSetError {
    #[error("master icon not found: {0}")]
    SourceMissing(PathBuf),
    #[error("output directory does not exist: {0}")]
    DestinationMissing(PathBuf),
    #[error("{failed} of {total} icons failed to write")]
    WriteFailure { failed: usize, total: usize },
}

/// Resample the master into every table entry under `out_root`.
///
/// Preconditions are checked fail-fast before any resize: the master
/// file must exist and both destination directories must already be
/// present. Per-file write failures are logged and the remaining
/// entries are still processed; already-written files are never rolled
/// back. When `write_contents` is set a Contents.json is emitted into
/// each asset directory after the images.
pub fn generate_icon_set(master: &Path, out_root: &Path, write_contents: bool) -> Result<()> {
    if !master.is_file() {
        return Err(IconSetError::SourceMissing(master.to_path_buf()).into());
    }

    let appiconset = out_root.join(APPICONSET_DIR);
    let splashset = out_root.join(SPLASH_DIR);
    for dir in [&appiconset, &splashset] {
        if !dir.is_dir() {
            return Err(IconSetError::DestinationMissing(dir.clone()).into());
        }
    }

    let source = image::open(master)
        .with_context(|| format!("failed to load master icon {}", master.display()))?;

    println!("Generating AppIcon.appiconset sizes...");
    let total = APP_ICONS.len() + 1;
    let mut failed = 0;

    for entry in APP_ICONS {
        let output_path = appiconset.join(entry.filename);
        match resample_to(&source, entry.pixels, &output_path) {
            Ok(()) => println!(
                "  ✓ Generated {} ({}x{})",
                entry.filename, entry.pixels, entry.pixels
            ),
            Err(err) => {
                eprintln!("  ✗ Failed to write {}: {err:#}", entry.filename);
                failed += 1;
            }
        }
    }

    println!("Generating SplashIcon.imageset...");
    let (splash_name, splash_size) = SPLASH_ICON;
    let splash_path = splashset.join(splash_name);
    match resample_to(&source, splash_size, &splash_path) {
        Ok(()) => println!("  ✓ Generated {splash_name} ({splash_size}x{splash_size})"),
        Err(err) => {
            eprintln!("  ✗ Failed to write {splash_name}: {err:#}");
            failed += 1;
        }
    }

    if write_contents {
        write_app_icon_contents(&appiconset)?;
        write_splash_contents(&splashset)?;
    }

    if failed > 0 {
        return Err(IconSetError::WriteFailure { failed, total }.into());
    }
    Ok(())
}

/// Resize the source to `size` x `size` with Lanczos3 and save as PNG.
fn resample_to(source: &DynamicImage, size: u32, path: &Path) -> Result<()> {
    let resized = source.resize_exact(size, size, FilterType::Lanczos3);
    let mut file = File::create(path).context("Failed to create PNG file")?;
    resized
        .write_to(&mut file, image::ImageOutputFormat::Png)
        .context("Failed to write PNG")?;
    Ok(())
}

/// Write the appiconset Contents.json describing every table entry.
fn write_app_icon_contents(appiconset: &Path) -> Result<()> {
    let mut contents = ContentsFile::new("appicon-gen".to_string());
    for entry in APP_ICONS {
        contents.add_image(ImageEntry::new(
            entry.filename.to_string(),
            entry.idiom.to_string(),
            entry.scale.to_string(),
            Some(entry.points.to_string()),
        ));
    }
    contents.write_to(appiconset)?;
    println!("  ✓ Generated {APPICONSET_DIR}/Contents.json");
    Ok(())
}

/// Write the imageset Contents.json for the splash copy.
fn write_splash_contents(splashset: &Path) -> Result<()> {
    let mut contents = ContentsFile::new("appicon-gen".to_string());
    contents.add_image(ImageEntry::new(
        SPLASH_ICON.0.to_string(),
        "universal".to_string(),
        "1x".to_string(),
        None,
    ));
    contents.write_to(splashset)?;
    println!("  ✓ Generated {SPLASH_DIR}/Contents.json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_table_matches_required_layout() {
        let expected = [
            ("app-icon-1024.png", 1024),
            ("app-icon-60@2x.png", 120),
            ("app-icon-60@3x.png", 180),
            ("app-icon-76.png", 76),
            ("app-icon-76@2x.png", 152),
            ("app-icon-83.5@2x.png", 167),
        ];
        for (entry, (filename, pixels)) in APP_ICONS.iter().zip(expected) {
            assert_eq!(entry.filename, filename);
            assert_eq!(entry.pixels, pixels);
        }
        assert_eq!(SPLASH_ICON, ("splash-icon.png", 1024));
    }

    #[test]
    fn no_target_exceeds_master_resolution() {
        assert!(APP_ICONS.iter().all(|entry| entry.pixels <= 1024));
        assert!(SPLASH_ICON.1 <= 1024);
    }

    #[test]
    fn filenames_are_unique() {
        let mut names: Vec<&str> = APP_ICONS.iter().map(|entry| entry.filename).collect();
        names.push(SPLASH_ICON.0);
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), APP_ICONS.len() + 1);
    }

    #[test]
    fn missing_source_is_reported_before_any_work() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(APPICONSET_DIR)).unwrap();
        std::fs::create_dir_all(dir.path().join(SPLASH_DIR)).unwrap();

        let err = generate_icon_set(&dir.path().join("no-such-master.png"), dir.path(), false)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IconSetError>(),
            Some(IconSetError::SourceMissing(_))
        ));

        // Nothing was written.
        assert_eq!(
            std::fs::read_dir(dir.path().join(APPICONSET_DIR)).unwrap().count(),
            0
        );
    }

    #[test]
    fn write_failure_is_reported_but_remaining_entries_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let master = dir.path().join("master.png");
        image::RgbImage::from_pixel(64, 64, image::Rgb([255, 0, 0]))
            .save(&master)
            .unwrap();

        let appiconset = dir.path().join(APPICONSET_DIR);
        std::fs::create_dir_all(&appiconset).unwrap();
        std::fs::create_dir_all(dir.path().join(SPLASH_DIR)).unwrap();

        // A directory squatting on one output filename makes that single
        // write fail while the rest of the batch proceeds.
        std::fs::create_dir(appiconset.join("app-icon-76.png")).unwrap();

        let err = generate_icon_set(&master, dir.path(), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IconSetError>(),
            Some(IconSetError::WriteFailure { failed: 1, total: 7 })
        ));

        // Every other table entry was still produced.
        for entry in APP_ICONS {
            if entry.filename == "app-icon-76.png" {
                continue;
            }
            assert!(
                appiconset.join(entry.filename).is_file(),
                "{} should have been written",
                entry.filename
            );
        }
        assert!(dir.path().join(SPLASH_DIR).join(SPLASH_ICON.0).is_file());
    }

    #[test]
    fn missing_destination_is_reported_before_any_resize() {
        let dir = tempfile::tempdir().unwrap();
        let master = dir.path().join("master.png");
        image::RgbImage::from_pixel(8, 8, image::Rgb([255, 0, 0]))
            .save(&master)
            .unwrap();

        let err = generate_icon_set(&master, &dir.path().join("missing"), false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IconSetError>(),
            Some(IconSetError::DestinationMissing(_))
        ));
    }
}
