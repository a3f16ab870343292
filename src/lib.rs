//! Random-access dataset over a directory of real and fake face images.
//!
//! ```no_run
//! use faces_dataset::{FacesDataset, Label};
//!
//! let ds = FacesDataset::open("data/faces")?;
//! let (image, label) = ds.get(0)?;
//! assert_eq!(label, Label::Real);
//! println!("{}x{}", image.width(), image.height());
//! # Ok::<(), faces_dataset::Error>(())
//! ```

mod config;
mod error;
pub mod dataset;
pub mod transform;
pub mod utilities;

pub use {
    config::*,
    dataset::*,
    error::*,
};
