use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::{
    dataset::FacesDataset,
    transform::{ImageTensor, Normalize, Resize, ToTensor, Transform},
    Error, Result,
};

/// YAML descriptor of a faces dataset.
///
/// ```yaml
/// root: ./faces
/// resize: [128, 128]
/// normalize:
///   mean: [0.5, 0.5, 0.5]
///   std: [0.5, 0.5, 0.5]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    pub root: PathBuf,
    #[serde(default)]
    pub resize: Option<(u32, u32)>,
    #[serde(default)]
    pub normalize: Option<Normalize>,
}

impl DatasetConfig {
    /// Read a descriptor. A relative `root` is taken relative to the file.
    pub fn load(yaml_path: &Path) -> Result<Self> {
        let config_err = |reason: String| Error::Config { path: yaml_path.to_path_buf(), reason };

        let text = std::fs::read_to_string(yaml_path).map_err(|e| config_err(e.to_string()))?;
        let mut config: DatasetConfig =
            serde_yaml::from_str(&text).map_err(|e| config_err(e.to_string()))?;

        if let Some(stds) = config.normalize.as_ref().map(|n| n.std) {
            if stds.iter().any(|s| *s == 0.) {
                return Err(config_err("normalize.std must be non-zero".into()));
            }
        }

        if config.root.is_relative() {
            if let Some(dir) = yaml_path.parent() {
                config.root = dir.join(&config.root);
            }
        }
        Ok(config)
    }

    pub fn transform(&self) -> ConfigTransform {
        ConfigTransform {
            resize: self.resize.map(|(w, h)| Resize::new(w, h)),
            normalize: self.normalize.clone(),
        }
    }

    pub fn open(&self) -> Result<FacesDataset<ConfigTransform>> {
        FacesDataset::with_transform(&self.root, self.transform())
    }
}

/// Optional resize, tensor conversion, optional normalization.
#[derive(Debug, Clone, Default)]
pub struct ConfigTransform {
    resize: Option<Resize>,
    normalize: Option<Normalize>,
}

impl Transform<RgbImage> for ConfigTransform {
    type Output = ImageTensor;

    fn apply(&self, image: RgbImage) -> ImageTensor {
        let image = match &self.resize {
            Some(resize) => resize.apply(image),
            None => image,
        };
        let tensor = ToTensor.apply(image);
        match &self.normalize {
            Some(normalize) => normalize.apply(tensor),
            None => tensor,
        }
    }
}
