use std::{ffi::OsString, path::Path};

use image::{io::Reader, ImageResult, RgbImage};

use crate::{Error, Result};

/// Decode any supported image as 3-channel RGB. The format is sniffed from
/// the file contents, the extension is only a hint.
pub fn load_img_rgb(path: &Path) -> ImageResult<RgbImage> {
    Ok(Reader::open(path)?
        .with_guessed_format()?
        .decode()?
        .into_rgb8())
}

/// Names of every entry in `dir`, sorted.
pub fn list_file_names(dir: &Path) -> Result<Vec<OsString>> {
    let fs_err = |source| Error::Filesystem { path: dir.to_path_buf(), source };

    let mut names = std::fs::read_dir(dir)
        .map_err(fs_err)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(fs_err)?;
    names.sort();
    Ok(names)
}
