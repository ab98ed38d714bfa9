use crate::draw::surface::PixelSurface;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

pub const DRAW_EXPORT_SUBDIR: &str = "draw_exports";
const EXPORT_FILE_PREFIX: &str = "annotation";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveResult {
    Saved(PathBuf),
    Skipped,
}

pub fn exe_relative_output_folder_from_path(exe_path: &Path, subdir: &str) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(subdir))
}

pub fn ensure_output_folder(subdir: &str) -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    let output = exe_relative_output_folder_from_path(&exe_path, subdir)?;
    fs::create_dir_all(&output)
        .with_context(|| format!("create draw output folder {}", output.display()))?;
    Ok(output)
}

pub fn timestamped_stem(now: chrono::DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

pub fn timestamped_export_path(output_dir: &Path, now: chrono::DateTime<Local>) -> PathBuf {
    output_dir.join(format!(
        "{}_{}.png",
        EXPORT_FILE_PREFIX,
        timestamped_stem(now)
    ))
}

/// Writes the surface as an RGBA PNG. An empty surface writes nothing.
pub fn export_png(surface: &PixelSurface, path: &Path) -> Result<SaveResult> {
    if surface.is_empty() {
        tracing::debug!(path = %path.display(), "skipping export of empty surface");
        return Ok(SaveResult::Skipped);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create export folder {}", parent.display()))?;
    }

    surface
        .to_image()
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write annotation png {}", path.display()))?;
    tracing::info!(path = %path.display(), "annotation exported");
    Ok(SaveResult::Saved(path.to_path_buf()))
}

/// Exports into `<exe dir>/<subdir>` under a timestamped name.
pub fn export_timestamped(surface: &PixelSurface, subdir: &str) -> Result<SaveResult> {
    if surface.is_empty() {
        return Ok(SaveResult::Skipped);
    }
    let output = ensure_output_folder(subdir)?;
    export_png(surface, &timestamped_export_path(&output, Local::now()))
}
