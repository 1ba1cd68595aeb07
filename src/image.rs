use std::num::NonZeroU32;

use crate::pixels::{Sample, SampleType};
use crate::ImageBufferError;

/// Layout of channels of one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channels {
    /// Grayscale
    L,
    /// Grayscale with alpha
    La,
    Rgb,
    Rgba,
}

impl Channels {
    /// Count of samples per pixel.
    #[inline(always)]
    pub fn count(&self) -> usize {
        match self {
            Self::L => 1,
            Self::La => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::La | Self::Rgba)
    }
}

impl TryFrom<u8> for Channels {
    type Error = ImageBufferError;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        match count {
            1 => Ok(Self::L),
            2 => Ok(Self::La),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            _ => Err(ImageBufferError::InvalidChannelsCount),
        }
    }
}

/// Owned image with interleaved samples stored in row-major order.
///
/// Sample of channel `c` of the pixel `(x, y)` lives at
/// position `(y * width + x) * channels + c`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer<S: Sample> {
    width: NonZeroU32,
    height: NonZeroU32,
    channels: Channels,
    samples: Vec<S>,
}

impl<S: Sample> ImageBuffer<S> {
    /// Create image with given dimensions and all samples set to zero.
    pub fn new(width: NonZeroU32, height: NonZeroU32, channels: Channels) -> Self {
        Self::filled(width, height, channels, S::default())
    }

    /// Create image with all samples set to `value`.
    pub fn filled(width: NonZeroU32, height: NonZeroU32, channels: Channels, value: S) -> Self {
        let size = samples_count(width, height, channels);
        Self {
            width,
            height,
            channels,
            samples: vec![value; size],
        }
    }

    pub fn from_vec(
        width: NonZeroU32,
        height: NonZeroU32,
        channels: Channels,
        samples: Vec<S>,
    ) -> Result<Self, ImageBufferError> {
        if samples.len() != samples_count(width, height, channels) {
            return Err(ImageBufferError::InvalidBufferSize);
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Create image from raw dimensions, e.g. received from a decoder.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        samples: Vec<S>,
    ) -> Result<Self, ImageBufferError> {
        let (Some(width), Some(height)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Err(ImageBufferError::ZeroDimensions);
        };
        let channels = Channels::try_from(channels)?;
        Self::from_vec(width, height, channels, samples)
    }

    /// Create image with a copy of the given samples.
    pub fn from_slice(
        width: NonZeroU32,
        height: NonZeroU32,
        channels: Channels,
        samples: &[S],
    ) -> Result<Self, ImageBufferError> {
        Self::from_vec(width, height, channels, samples.to_vec())
    }

    #[inline(always)]
    pub fn width(&self) -> NonZeroU32 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> NonZeroU32 {
        self.height
    }

    #[inline(always)]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    #[inline(always)]
    pub fn sample_type(&self) -> SampleType {
        S::sample_type()
    }

    /// Buffer with image samples.
    #[inline(always)]
    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    #[inline(always)]
    pub fn samples_mut(&mut self) -> &mut [S] {
        &mut self.samples
    }

    pub fn into_vec(self) -> Vec<S> {
        self.samples
    }

    /// Position of the sample `(x, y, c)` inside the buffer.
    #[inline(always)]
    pub fn index(&self, x: u32, y: u32, c: usize) -> usize {
        (y as usize * self.width.get() as usize + x as usize) * self.channels.count() + c
    }

    /// # Panics
    ///
    /// Panics if the coordinates are out of the image boundaries.
    #[inline(always)]
    pub fn sample(&self, x: u32, y: u32, c: usize) -> S {
        self.samples[self.index(x, y, c)]
    }

    /// # Panics
    ///
    /// Panics if the coordinates are out of the image boundaries.
    #[inline(always)]
    pub fn set_sample(&mut self, x: u32, y: u32, c: usize, value: S) {
        let i = self.index(x, y, c);
        self.samples[i] = value;
    }

    /// Count of samples in one row of the image.
    #[inline(always)]
    pub fn row_len(&self) -> usize {
        self.width.get() as usize * self.channels.count()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[S]> {
        self.samples.chunks_exact(self.row_len())
    }

    pub fn iter_rows_mut(&mut self) -> impl Iterator<Item = &mut [S]> {
        let row_len = self.row_len();
        self.samples.chunks_exact_mut(row_len)
    }

    /// Returns `true` if both images have equal width, height and channels.
    pub fn has_same_shape<T: Sample>(&self, other: &ImageBuffer<T>) -> bool {
        self.width == other.width && self.height == other.height && self.channels == other.channels
    }

    fn map_samples<T: Sample>(&self, f: impl Fn(S) -> T) -> ImageBuffer<T> {
        ImageBuffer {
            width: self.width,
            height: self.height,
            channels: self.channels,
            samples: self.samples.iter().map(|&s| f(s)).collect(),
        }
    }
}

impl ImageBuffer<u8> {
    /// Convert samples into normalized `f32` values in range `[0.0, 1.0]`.
    pub fn to_f32(&self) -> ImageBuffer<f32> {
        self.map_samples(|s| s as f32 / 255.)
    }
}

impl ImageBuffer<f32> {
    /// Convert normalized samples into `u8`.
    ///
    /// Values are clamped into `[0.0, 1.0]`, multiplied by 255 and truncated.
    pub fn to_u8(&self) -> ImageBuffer<u8> {
        self.map_samples(|s| (f32::quantize(s) * 255.) as u8)
    }
}

#[inline(always)]
fn samples_count(width: NonZeroU32, height: NonZeroU32, channels: Channels) -> usize {
    width.get() as usize * height.get() as usize * channels.count()
}

/// Image with samples type selected at runtime.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DynamicImageBuffer {
    U8(ImageBuffer<u8>),
    F32(ImageBuffer<f32>),
}

macro_rules! dynamic_map(
    ($dyn_image: expr, |$image: pat_param| $action: expr) => (
        match $dyn_image {
            DynamicImageBuffer::U8($image) => $action,
            DynamicImageBuffer::F32($image) => $action,
        }
    );
);

impl DynamicImageBuffer {
    pub fn width(&self) -> NonZeroU32 {
        dynamic_map!(self, |image| image.width())
    }

    pub fn height(&self) -> NonZeroU32 {
        dynamic_map!(self, |image| image.height())
    }

    pub fn channels(&self) -> Channels {
        dynamic_map!(self, |image| image.channels())
    }

    pub fn sample_type(&self) -> SampleType {
        dynamic_map!(self, |image| image.sample_type())
    }

    /// Convert image into version with `u8` samples.
    pub fn into_u8(self) -> ImageBuffer<u8> {
        match self {
            Self::U8(image) => image,
            Self::F32(image) => image.to_u8(),
        }
    }

    /// Convert image into version with normalized `f32` samples.
    pub fn into_f32(self) -> ImageBuffer<f32> {
        match self {
            Self::U8(image) => image.to_f32(),
            Self::F32(image) => image,
        }
    }
}

impl From<ImageBuffer<u8>> for DynamicImageBuffer {
    fn from(image: ImageBuffer<u8>) -> Self {
        Self::U8(image)
    }
}

impl From<ImageBuffer<f32>> for DynamicImageBuffer {
    fn from(image: ImageBuffer<f32>) -> Self {
        Self::F32(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(v: u32) -> NonZeroU32 {
        NonZeroU32::new(v).unwrap()
    }

    #[test]
    fn interleaved_layout() {
        let samples: Vec<u8> = (0..2 * 3 * 3).collect();
        let image = ImageBuffer::from_vec(nz(2), nz(3), Channels::Rgb, samples).unwrap();
        assert_eq!(image.index(1, 2, 2), (2 * 2 + 1) * 3 + 2);
        assert_eq!(image.sample(0, 0, 0), 0);
        assert_eq!(image.sample(1, 0, 0), 3);
        assert_eq!(image.sample(0, 1, 1), 7);
        assert_eq!(image.iter_rows().count(), 3);
        assert!(image.iter_rows().all(|row| row.len() == 6));
    }

    #[test]
    fn from_raw_validates_shape() {
        assert_eq!(
            ImageBuffer::<u8>::from_raw(0, 4, 1, vec![]).unwrap_err(),
            ImageBufferError::ZeroDimensions
        );
        assert_eq!(
            ImageBuffer::<u8>::from_raw(2, 2, 5, vec![0; 20]).unwrap_err(),
            ImageBufferError::InvalidChannelsCount
        );
        assert_eq!(
            ImageBuffer::<u8>::from_raw(2, 2, 3, vec![0; 11]).unwrap_err(),
            ImageBufferError::InvalidBufferSize
        );
        assert!(ImageBuffer::<u8>::from_raw(2, 2, 3, vec![0; 12]).is_ok());
    }

    #[test]
    fn set_sample() {
        let mut image = ImageBuffer::<f32>::new(nz(3), nz(3), Channels::La);
        image.set_sample(2, 1, 1, 0.75);
        assert_eq!(image.sample(2, 1, 1), 0.75);
        assert_eq!(image.samples().iter().filter(|&&s| s != 0.).count(), 1);
    }

    #[test]
    fn u8_f32_conversions() {
        let image =
            ImageBuffer::<u8>::from_vec(nz(2), nz(1), Channels::L, vec![0, 255]).unwrap();
        let float_image = image.to_f32();
        assert_eq!(float_image.samples(), &[0., 1.]);
        assert_eq!(float_image.to_u8(), image);

        let float_image =
            ImageBuffer::<f32>::from_vec(nz(3), nz(1), Channels::L, vec![-1., 0.5, 2.]).unwrap();
        assert_eq!(float_image.to_u8().samples(), &[0, 127, 255]);
    }

    #[test]
    fn dynamic_image() {
        let image: DynamicImageBuffer = ImageBuffer::<u8>::new(nz(4), nz(2), Channels::Rgba).into();
        assert_eq!(image.sample_type(), SampleType::U8);
        assert_eq!(image.channels(), Channels::Rgba);
        let float_image = image.into_f32();
        assert_eq!(float_image.width().get(), 4);
        assert_eq!(float_image.height().get(), 2);
    }
}
