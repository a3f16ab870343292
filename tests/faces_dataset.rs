use std::path::Path;

use faces_dataset::{
    transform::{Normalize, Resize, ToTensor, Transform},
    Dataset, DatasetConfig, Error, FacesDataset, Label,
};
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;

fn write_png(path: &Path, w: u32, h: u32, color: [u8; 3]) {
    RgbImage::from_pixel(w, h, Rgb(color))
        .save_with_format(path, ImageFormat::Png)
        .unwrap();
}

/// `real/{a,b}.jpg` and `fake/c.jpg`, all PNG-encoded.
fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("real")).unwrap();
    std::fs::create_dir(dir.path().join("fake")).unwrap();
    write_png(&dir.path().join("real/a.jpg"), 4, 2, [10, 20, 30]);
    write_png(&dir.path().join("real/b.jpg"), 3, 3, [40, 50, 60]);
    write_png(&dir.path().join("fake/c.jpg"), 2, 5, [200, 100, 0]);
    dir
}

#[test]
fn labels_follow_partition() {
    let dir = fixture();
    let ds = FacesDataset::open(dir.path()).unwrap();

    assert_eq!(ds.len(), 3);
    assert_eq!((ds.real_len(), ds.fake_len()), (2, 1));

    assert_eq!(ds.get(0).unwrap().1, Label::Real);
    assert_eq!(ds.get(1).unwrap().1, Label::Real);
    assert_eq!(ds.get(2).unwrap().1, Label::Fake);
    assert!(matches!(ds.get(3), Err(Error::IndexOutOfRange { index: 3, len: 3 })));
}

#[test]
fn decodes_rgb_pixels() {
    let dir = fixture();
    let ds = FacesDataset::open(dir.path()).unwrap();

    let (image, _) = ds.get(2).unwrap();
    assert_eq!(image.dimensions(), (2, 5));
    assert_eq!(image.get_pixel(1, 4), &Rgb([200, 100, 0]));
}

#[test]
fn rgba_is_converted_to_three_channels() {
    let dir = fixture();
    RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 128]))
        .save(dir.path().join("fake/d.png"))
        .unwrap();

    let ds = FacesDataset::open(dir.path()).unwrap();
    let (image, label) = ds.get(3).unwrap();
    assert_eq!(label, Label::Fake);
    assert_eq!(image.get_pixel(0, 0), &Rgb([1, 2, 3]));
}

#[test]
fn repeated_get_is_stable() {
    let dir = fixture();
    let ds = FacesDataset::open(dir.path()).unwrap();
    for i in 0..ds.len() {
        let (a, la) = ds.get(i).unwrap();
        let (b, lb) = ds.get(i).unwrap();
        assert_eq!(la, lb);
        assert_eq!(a, b);
    }
}

#[test]
fn constant_transform() {
    let dir = fixture();
    let ds = FacesDataset::with_transform(dir.path(), |_: RgbImage| 42u8).unwrap();
    for i in 0..ds.len() {
        assert_eq!(ds.get(i).unwrap().0, 42);
    }
}

#[test]
fn tensor_pipeline() {
    let dir = fixture();
    let transform = Resize::new(2, 2)
        .then(ToTensor)
        .then(Normalize::new([0.5; 3], [0.5; 3]));
    let ds = FacesDataset::with_transform(dir.path(), transform).unwrap();

    let (tensor, label) = ds.get(2).unwrap();
    assert_eq!(label, Label::Fake);
    assert_eq!(tensor.shape, [3, 2, 2]);
    assert!(tensor.channel(2).unwrap().iter().all(|v| (*v + 1.).abs() < 1e-9));
}

#[test]
fn empty_class_directories() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("real")).unwrap();
    std::fs::create_dir(dir.path().join("fake")).unwrap();

    let ds = FacesDataset::open(dir.path()).unwrap();
    assert_eq!(ds.len(), 0);
    assert!(ds.is_empty());
    assert!(matches!(ds.get(0), Err(Error::IndexOutOfRange { index: 0, len: 0 })));
}

#[test]
fn missing_class_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("real")).unwrap();

    match FacesDataset::open(dir.path()) {
        Err(Error::Filesystem { path, source }) => {
            assert_eq!(path, dir.path().join("fake"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected filesystem error, got {:?}", other),
    }
}

#[test]
fn missing_real_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("fake")).unwrap();
    write_png(&dir.path().join("fake/c.jpg"), 1, 1, [0, 0, 0]);

    match FacesDataset::open(dir.path()) {
        Err(Error::Filesystem { path, source }) => {
            assert_eq!(path, dir.path().join("real"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected filesystem error, got {:?}", other),
    }
}

#[test]
fn corrupt_image_is_a_decode_error() {
    let dir = fixture();
    std::fs::write(dir.path().join("fake/broken.jpg"), b"definitely not an image").unwrap();

    let ds = FacesDataset::open(dir.path()).unwrap();
    // snapshot is sorted: fake/broken.jpg precedes fake/c.jpg
    assert_eq!(ds.path_of(2).unwrap(), dir.path().join("fake/broken.jpg"));
    assert!(matches!(ds.get(2), Err(Error::Decode(_))));
    assert!(ds.get(3).is_ok());
}

#[test]
fn snapshot_ignores_later_files() {
    let dir = fixture();
    let ds = FacesDataset::open(dir.path()).unwrap();
    write_png(&dir.path().join("real/z.jpg"), 1, 1, [0, 0, 0]);
    assert_eq!(ds.len(), 3);
    assert!(ds.get(3).is_err());
}

#[test]
fn iter_and_dataset_trait() {
    fn count_fake<D: Dataset<Sample = (RgbImage, Label)>>(ds: &D) -> usize {
        (0..ds.len())
            .filter(|i| ds.get(*i).unwrap().1 == Label::Fake)
            .count()
    }

    let dir = fixture();
    let ds = FacesDataset::open(dir.path()).unwrap();
    assert_eq!(count_fake(&ds), 1);

    let labels: Vec<Label> = ds.iter().map(|s| s.unwrap().1).collect();
    assert_eq!(labels, vec![Label::Real, Label::Real, Label::Fake]);
}

#[test]
fn config_opens_dataset() {
    let dir = fixture();
    let yaml = dir.path().join("faces.yaml");
    std::fs::write(&yaml, "root: .\nresize: [3, 3]\n").unwrap();

    let ds = DatasetConfig::load(&yaml).unwrap().open().unwrap();
    assert_eq!(ds.len(), 3);
    let (tensor, label) = ds.get(0).unwrap();
    assert_eq!(label, Label::Real);
    assert_eq!(tensor.shape, [3, 3, 3]);
}
