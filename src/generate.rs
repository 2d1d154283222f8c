//! Generates the badged icon set from the source icon set.
use crate::{
    badge::{add_badge, BadgeStyle},
    font::{FontChain, LabelFont},
    icon_filename,
    manifest::{derive_manifest, Manifest},
    ICON_SIZES, MANIFEST_FILENAME,
};
use eyre::WrapErr;
use image::{ImageFormat, RgbaImage};
use std::{
    io::Write,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone)]
pub struct Config {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    /// Value for the `folder` field of each derived descriptor.
    pub folder: String,
    pub style: BadgeStyle,
    pub fonts: FontChain,
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub generated: Vec<(u32, PathBuf)>,
    pub skipped: Vec<u32>,
    pub manifest: PathBuf,
}

/// Badges every icon present in the source directory and writes them, along
/// with the derived manifest, to the destination directory. Existing files
/// are overwritten. Status lines are written to `out`.
pub fn run(config: &Config, out: &mut impl Write) -> eyre::Result<Report> {
    std::fs::create_dir_all(&config.dest_dir).wrap_err_with(|| {
        format!(
            "failed to create output directory '{}'",
            config.dest_dir.display()
        )
    })?;

    let font = config.fonts.resolve();
    let mut report = Report::default();

    for size in ICON_SIZES {
        let filename = icon_filename(size);
        let src_path = config.source_dir.join(&filename);
        if !src_path.exists() {
            writeln!(out, "  [skip] {} not found", filename)?;
            report.skipped.push(size);
            continue;
        }

        let dst_path = config.dest_dir.join(&filename);
        badge_icon(&src_path, &dst_path, size, &config.style, &font)?;
        writeln!(out, "  [ok]   {}x{} -> {}", size, size, dst_path.display())?;
        report.generated.push((size, dst_path));
    }

    let source_manifest = Manifest::read(config.source_dir.join(MANIFEST_FILENAME))?;
    let manifest_path = config.dest_dir.join(MANIFEST_FILENAME);
    derive_manifest(&source_manifest, &config.folder).write(&manifest_path)?;
    writeln!(
        out,
        "  [ok]   {} -> {}",
        MANIFEST_FILENAME,
        manifest_path.display()
    )?;
    report.manifest = manifest_path;

    writeln!(out)?;
    writeln!(
        out,
        "Done! {} icons generated in {}/",
        config.style.label,
        dir_name(&config.dest_dir)
    )?;
    Ok(report)
}

fn badge_icon(
    src_path: &Path,
    dst_path: &Path,
    size: u32,
    style: &BadgeStyle,
    font: &LabelFont,
) -> eyre::Result<()> {
    let icon = load_icon(src_path)?;
    if icon.width() != icon.height() || icon.width() != size {
        tracing::warn!(
            "{} is {}x{}, expected {}x{}",
            src_path.display(),
            icon.width(),
            icon.height(),
            size,
            size
        );
    }
    add_badge(&icon, style, font)
        .save_with_format(dst_path, ImageFormat::Png)
        .wrap_err_with(|| format!("failed to write icon '{}'", dst_path.display()))
}

fn load_icon(path: &Path) -> eyre::Result<RgbaImage> {
    let icon = image::open(path)
        .wrap_err_with(|| format!("failed to read icon '{}'", path.display()))?;
    Ok(icon.to_rgba8())
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
