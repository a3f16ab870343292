use image::{imageops::{self, FilterType}, RgbImage};
use serde::{Deserialize, Serialize};

/// Something applied to every sample on its way out of a dataset.
///
/// Any `Fn(I) -> O + Send + Sync` closure is a transform, so callers can pass
/// a plain function where a dedicated type would be overkill.
pub trait Transform<I>: Send + Sync {
    type Output;

    fn apply(&self, input: I) -> Self::Output;

    /// Feed the output of `self` into `next`.
    fn then<B>(self, next: B) -> Then<Self, B>
    where
        Self: Sized,
        B: Transform<Self::Output>,
    {
        Then { first: self, second: next }
    }
}

impl<I, O, F> Transform<I> for F
where
    F: Fn(I) -> O + Send + Sync,
{
    type Output = O;

    fn apply(&self, input: I) -> O {
        self(input)
    }
}

/// Passes the input through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<I> Transform<I> for Identity {
    type Output = I;

    #[inline(always)]
    fn apply(&self, input: I) -> I { input }
}

/// Two transforms run back to back.
#[derive(Debug, Clone)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<I, A, B> Transform<I> for Then<A, B>
where
    A: Transform<I>,
    B: Transform<A::Output>,
{
    type Output = B::Output;

    fn apply(&self, input: I) -> Self::Output {
        self.second.apply(self.first.apply(input))
    }
}

/// Exact resize to `width` x `height`, ignoring aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resize {
    pub width: u32,
    pub height: u32,
}

impl Resize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Transform<RgbImage> for Resize {
    type Output = RgbImage;

    fn apply(&self, image: RgbImage) -> RgbImage {
        if image.dimensions() == (self.width, self.height) {
            return image;
        }
        imageops::resize(&image, self.width, self.height, FilterType::Triangle)
    }
}

/// Planar float image, `shape` is `[channels, height, width]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageTensor {
    pub data: Vec<f64>,
    pub shape: [usize; 3],
}

impl ImageTensor {
    /// Plane `c`, or `None` past the last channel or when `data` is shorter
    /// than `shape` claims.
    pub fn channel(&self, c: usize) -> Option<&[f64]> {
        if c >= self.shape[0] {
            return None;
        }
        let plane = self.shape[1] * self.shape[2];
        self.data.get(c * plane..(c + 1) * plane)
    }
}

/// RGB bytes to a CHW tensor with values in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToTensor;

impl Transform<RgbImage> for ToTensor {
    type Output = ImageTensor;

    fn apply(&self, image: RgbImage) -> ImageTensor {
        let (w, h) = image.dimensions();
        let npix = (w * h) as usize;
        let mut data = vec![0.; 3 * npix];
        for (i, p) in image.pixels().enumerate() {
            for c in 0..3 {
                data[c * npix + i] = p.0[c] as f64 / 255.;
            }
        }
        ImageTensor { data, shape: [3, h as usize, w as usize] }
    }
}

/// Per-channel `(x - mean) / std`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Normalize {
    pub mean: [f64; 3],
    pub std: [f64; 3],
}

impl Normalize {
    pub fn new(mean: [f64; 3], std: [f64; 3]) -> Self {
        Self { mean, std }
    }
}

impl Transform<ImageTensor> for Normalize {
    type Output = ImageTensor;

    fn apply(&self, mut tensor: ImageTensor) -> ImageTensor {
        let plane = tensor.shape[1] * tensor.shape[2];
        for (c, chunk) in tensor.data.chunks_mut(plane.max(1)).enumerate().take(3) {
            for v in chunk {
                *v = (*v - self.mean[c]) / self.std[c];
            }
        }
        tensor
    }
}
