use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

use image::RgbImage;
use serde::Serialize;

use crate::{
    transform::{Identity, Transform},
    utilities::{list_file_names, load_img_rgb},
    Error, Result,
};

use super::{Dataset, Label};

/// Real and synthetic face images laid out as
///
/// ```text
/// root/
///   real/  <images>
///   fake/  <images>
/// ```
///
/// Both directories are listed once when the dataset is opened. Indices
/// `[0, real_len)` are real images (label 0), the rest are fake (label 1).
/// Images are decoded on every `get`, nothing is cached.
pub struct FacesDataset<T = Identity> {
    root: PathBuf,
    real_names: Vec<OsString>,
    fake_names: Vec<OsString>,
    transform: T,
}

/// One slot of the index, resolved without decoding the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub index: usize,
    pub path: PathBuf,
    pub label: Label,
}

impl FacesDataset<Identity> {
    /// Open `root` yielding plain RGB images.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_transform(root, Identity)
    }
}

impl<T> FacesDataset<T> {
    pub fn with_transform(root: impl AsRef<Path>, transform: T) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let real_names = list_file_names(&root.join(Label::Real.dir_name()))?;
        let fake_names = list_file_names(&root.join(Label::Fake.dir_name()))?;

        log::info!(
            "opened faces dataset {}: {} real, {} fake",
            root.display(),
            real_names.len(),
            fake_names.len()
        );

        Ok(Self { root, real_names, fake_names, transform })
    }

    pub fn root(&self) -> &Path { &self.root }
    pub fn real_len(&self) -> usize { self.real_names.len() }
    pub fn fake_len(&self) -> usize { self.fake_names.len() }
    pub fn transform(&self) -> &T { &self.transform }

    pub fn len(&self) -> usize {
        self.real_names.len() + self.fake_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn locate(&self, index: usize) -> Result<(&OsString, Label)> {
        let n_real = self.real_names.len();
        if index < n_real {
            Ok((&self.real_names[index], Label::Real))
        } else if let Some(name) = self.fake_names.get(index - n_real) {
            Ok((name, Label::Fake))
        } else {
            Err(Error::IndexOutOfRange { index, len: self.len() })
        }
    }

    pub fn label_of(&self, index: usize) -> Result<Label> {
        self.locate(index).map(|(_, label)| label)
    }

    pub fn path_of(&self, index: usize) -> Result<PathBuf> {
        let (name, label) = self.locate(index)?;
        Ok(self.root.join(label.dir_name()).join(name))
    }

    /// Every slot in index order.
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        let real = self.real_names.iter().map(|n| (n, Label::Real));
        let fake = self.fake_names.iter().map(|n| (n, Label::Fake));
        real.chain(fake).enumerate().map(move |(index, (name, label))| Entry {
            index,
            path: self.root.join(label.dir_name()).join(name),
            label,
        })
    }
}

impl<T: Transform<RgbImage>> FacesDataset<T> {
    /// Decode the image at `index` and run it through the transform.
    pub fn get(&self, index: usize) -> Result<(T::Output, Label)> {
        let (name, label) = self.locate(index)?;
        let path = self.root.join(label.dir_name()).join(name);

        log::debug!("decoding {} ({})", path.display(), label);
        let image = load_img_rgb(&path)?;

        Ok((self.transform.apply(image), label))
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<(T::Output, Label)>> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}

impl<T: Transform<RgbImage>> Dataset for FacesDataset<T> {
    type Sample = (T::Output, Label);

    fn len(&self) -> usize {
        FacesDataset::len(self)
    }

    fn get(&self, index: usize) -> Result<Self::Sample> {
        FacesDataset::get(self, index)
    }

    fn class_name(&self, num: usize) -> Option<String> {
        Label::from_index(num).map(|l| l.to_string())
    }
}

impl<T> fmt::Debug for FacesDataset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacesDataset")
            .field("root", &self.root)
            .field("real", &self.real_names.len())
            .field("fake", &self.fake_names.len())
            .finish()
    }
}
