use std::path::PathBuf;

/// Everything that can go wrong while opening or reading a faces dataset.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A class directory could not be listed, or a manifest file written.
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `get` was called with an index outside `[0, len)`.
    #[error("index {index} out of range for dataset of size {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The image file could not be opened or decoded.
    #[error(transparent)]
    Decode(#[from] image::ImageError),

    /// The index snapshot could not be serialized.
    #[error("failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The dataset descriptor could not be read or parsed.
    #[error("bad dataset config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
