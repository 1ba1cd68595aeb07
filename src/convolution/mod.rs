pub use presets::*;

use crate::pixels::Sample;
use crate::{ConvolutionError, ConvolveOptions, Convolver, FilterKernel, ImageBuffer};

pub(crate) mod native;
mod presets;

/// Convolves the image with the kernel using default [ConvolveOptions].
///
/// Returns new image with the same dimensions and channels as the source.
pub fn convolve<S: Sample>(
    src_image: &ImageBuffer<S>,
    kernel: &FilterKernel,
) -> Result<ImageBuffer<S>, ConvolutionError> {
    Convolver::new().convolve(src_image, kernel, &ConvolveOptions::new())
}
