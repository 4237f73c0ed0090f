//! Screenshot file naming and writing

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use image::RgbaImage;

use crate::capture::Raster;
use crate::domain::ScreenshotTag;
use crate::error::{Result, ScreengrabError};
use crate::storage::permissions;

const NAME_SEPARATOR: &str = "_";
const EXTENSION: &str = ".png";

/// `<tag>_<epoch millis>.png`
pub fn file_name(tag: &ScreenshotTag, taken_at: DateTime<Utc>) -> String {
    name_at(tag, taken_at.timestamp_millis())
}

fn name_at(tag: &ScreenshotTag, millis: i64) -> String {
    format!("{}{}{}{}", tag, NAME_SEPARATOR, millis, EXTENSION)
}

/// Encode the raster as PNG into `dir` and widen the file's permissions
///
/// The file is named from `tag` and `taken_at`. When that name is already taken
/// the next free millisecond is used, so every call produces a new file and no
/// existing file is replaced. The data goes to a temporary file in `dir` first and
/// is moved into place only once fully written. The raster is released on every
/// path.
pub fn write_screenshot(
    raster: Raster,
    dir: &Path,
    tag: &ScreenshotTag,
    taken_at: DateTime<Utc>,
    file_mode: Option<u32>,
) -> Result<PathBuf> {
    let written = write_png_file(&raster, dir, tag, taken_at.timestamp_millis());
    drop(raster);
    let path = written.map_err(ScreengrabError::capture)?;

    permissions::apply(&path, file_mode)
        .with_context(|| format!("setting permissions on {}", path.display()))
        .map_err(ScreengrabError::capture)?;
    Ok(path)
}

fn write_png_file(
    raster: &Raster,
    dir: &Path,
    tag: &ScreenshotTag,
    mut millis: i64,
) -> anyhow::Result<PathBuf> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".screengrab-").suffix(EXTENSION);
    // Request the regular file mode so the host's umask decides, as for any new file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut file = builder
        .tempfile_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(file.as_file_mut());
        write_png(&mut writer, raster.image()).context("encoding PNG")?;
        writer.flush()?;
    }

    loop {
        let path = dir.join(name_at(tag, millis));
        match file.persist_noclobber(&path) {
            Ok(_) => return Ok(path),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                log::debug!("{} exists, trying the next millisecond", path.display());
                file = err.file;
                millis += 1;
            }
            Err(err) => {
                return Err(err.error).with_context(|| format!("writing {}", path.display()));
            }
        }
    }
}

/// Encode an RGBA image as 8-bit PNG
pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> std::result::Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}
