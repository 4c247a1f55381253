use anyhow::{Context, Result};
use clap::Parser;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

mod contents_json;
mod icon_set;
mod render;

#[derive(Debug, Parser)]
#[clap(
    name = "appicon-gen",
    about = "Render the app's master icon and generate the iOS icon set from it"
)]
struct Args {
    /// Path of the 1024x1024 master icon PNG.
    #[clap(long, value_name = "FILE", default_value = "icons/master-1024.png")]
    master: PathBuf,

    /// Directory receiving AppIcon.appiconset/ and SplashIcon.imageset/.
    #[clap(short, long, value_name = "DIR", default_value = "./icons")]
    output: PathBuf,

    /// Only render the master icon; skip the resampling step.
    #[clap(long, conflicts_with = "resize_only")]
    render_only: bool,

    /// Only resample an existing master; skip rendering. The output
    /// directories must already exist in this mode.
    #[clap(long)]
    resize_only: bool,

    /// Also write a Contents.json into each asset directory.
    #[clap(long)]
    contents_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if !args.resize_only {
        render_master_to(&args.master)?;
    }

    if !args.render_only {
        if !args.resize_only {
            // End-to-end mode prepares its own destination directories;
            // --resize-only leaves the existence check to the resampler.
            for dir in [icon_set::APPICONSET_DIR, icon_set::SPLASH_DIR] {
                create_dir_all(args.output.join(dir))
                    .context("Can't create output directory")?;
            }
        }
        icon_set::generate_icon_set(&args.master, &args.output, args.contents_json)?;
    }

    Ok(())
}

fn render_master_to(path: &Path) -> Result<()> {
    println!("Rendering master icon...");

    let style = render::IconStyle::default();
    let master = render::render_master(&style);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).context("Can't create master icon directory")?;
        }
    }
    master
        .save(path)
        .with_context(|| format!("failed to save master icon {}", path.display()))?;

    println!("✓ Rendered {} ({}x{})", path.display(), style.size, style.size);
    Ok(())
}
