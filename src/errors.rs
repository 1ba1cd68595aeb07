use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageBufferError {
    #[error("Size of buffer don't match to image dimensions")]
    InvalidBufferSize,
    #[error("Count of channels must be in range 1..=4")]
    InvalidChannelsCount,
    #[error("Width and height of image must be greater than zero")]
    ZeroDimensions,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    #[error("Size of kernel must be odd and positive, got {0}")]
    InvalidKernel(u32),
    #[error("Kernel of size {size}x{size} requires {expected} weights, got {actual}")]
    ShapeMismatch {
        size: u32,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug, Clone, Copy)]
#[error(
    "The dimensions of the source image are not equal to the dimensions of the destination image"
)]
pub struct DifferentDimensionsError;

#[derive(Error, Debug, Clone, Copy)]
#[error("Type of samples of the source image is not equal to sample type of the destination image")]
pub struct DifferentTypesOfSamplesError;

/// Length of a buffer doesn't match to the declared shape
/// of an image or a kernel.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMismatchError {
    #[error(transparent)]
    Image(#[from] ImageBufferError),
    #[error("Kernel of size {size}x{size} requires {expected} weights, got {actual}")]
    Kernel {
        size: u32,
        expected: usize,
        actual: usize,
    },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvolutionError {
    #[error("Size of kernel must be odd and positive, got {0}")]
    InvalidKernel(u32),
    #[error(transparent)]
    ShapeMismatch(#[from] ShapeMismatchError),
    #[error(
        "The dimensions of the source image are not equal to the dimensions of the destination image"
    )]
    DifferentDimensions,
    #[error(
        "Type of samples of the source image is not equal to sample type of the destination image"
    )]
    DifferentTypesOfSamples,
}

impl From<KernelError> for ConvolutionError {
    fn from(err: KernelError) -> Self {
        match err {
            KernelError::InvalidKernel(size) => ConvolutionError::InvalidKernel(size),
            KernelError::ShapeMismatch {
                size,
                expected,
                actual,
            } => ConvolutionError::ShapeMismatch(ShapeMismatchError::Kernel {
                size,
                expected,
                actual,
            }),
        }
    }
}

impl From<ImageBufferError> for ConvolutionError {
    fn from(err: ImageBufferError) -> Self {
        ConvolutionError::ShapeMismatch(err.into())
    }
}

impl From<DifferentDimensionsError> for ConvolutionError {
    fn from(_: DifferentDimensionsError) -> Self {
        ConvolutionError::DifferentDimensions
    }
}

impl From<DifferentTypesOfSamplesError> for ConvolutionError {
    fn from(_: DifferentTypesOfSamplesError) -> Self {
        ConvolutionError::DifferentTypesOfSamples
    }
}

#[cfg(feature = "image")]
pub use image_errors::*;

#[cfg(feature = "image")]
mod image_errors {
    use std::path::PathBuf;

    use thiserror::Error;

    /// Reading of an image file failed. Fatal to this one image only.
    #[derive(Error, Debug)]
    pub enum DecodeError {
        #[error("Failed to read image file {path:?}")]
        Io {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        #[error("Failed to decode image file {path:?}")]
        Image {
            path: PathBuf,
            #[source]
            source: image::ImageError,
        },
        #[error("Unsupported layout of decoded image: {0:?}")]
        UnsupportedColorType(image::ColorType),
        #[error("Decoded image has zero width or height")]
        EmptyImage,
    }

    /// Writing of an image file failed. Fatal to this one image only.
    #[derive(Error, Debug)]
    pub enum EncodeError {
        #[error("Failed to create image file {path:?}")]
        Io {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        #[error("Failed to encode image into {path:?}")]
        Image {
            path: PathBuf,
            #[source]
            source: image::ImageError,
        },
        #[error("Can't guess image format from file name {0:?}")]
        UnsupportedFormat(PathBuf),
        #[error("JPEG quality must be in range 1..=100, got {0}")]
        InvalidQuality(u8),
    }
}
