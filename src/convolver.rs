use crate::convolution::native;
use crate::pixels::Sample;
use crate::{
    ConvolutionError, DifferentDimensionsError, DifferentTypesOfSamplesError, DynamicImageBuffer,
    FilterKernel, ImageBuffer, KernelOrder,
};

/// Options for the convolution.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct ConvolveOptions {
    pub kernel_order: KernelOrder,
}

impl ConvolveOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Set order in which weights of kernel are stored.
    ///
    /// By default, [KernelOrder::RowMajor] is used.
    pub fn kernel_order(&self, kernel_order: KernelOrder) -> Self {
        let mut options = *self;
        options.kernel_order = kernel_order;
        options
    }
}

/// Methods of this structure used to apply convolution filters to images.
///
/// Source image is never modified. Result is written into a newly
/// allocated image or into the buffer of the destination image.
#[derive(Default, Debug, Clone)]
pub struct Convolver {}

impl Convolver {
    pub fn new() -> Self {
        Default::default()
    }

    /// Convolve source image with the kernel and return the result
    /// as a new image with the same shape.
    pub fn convolve<S: Sample>(
        &self,
        src_image: &ImageBuffer<S>,
        kernel: &FilterKernel,
        options: &ConvolveOptions,
    ) -> Result<ImageBuffer<S>, ConvolutionError> {
        let mut dst_image =
            ImageBuffer::new(src_image.width(), src_image.height(), src_image.channels());
        self.convolve_into(src_image, &mut dst_image, kernel, options)?;
        Ok(dst_image)
    }

    /// Convolve source image with the kernel and save the result
    /// into the buffer of the destination image.
    ///
    /// Both images must have the same dimensions and channels.
    pub fn convolve_into<S: Sample>(
        &self,
        src_image: &ImageBuffer<S>,
        dst_image: &mut ImageBuffer<S>,
        kernel: &FilterKernel,
        options: &ConvolveOptions,
    ) -> Result<(), ConvolutionError> {
        if !src_image.has_same_shape(dst_image) {
            return Err(DifferentDimensionsError.into());
        }
        native::convolve(src_image, dst_image, kernel, options.kernel_order);
        Ok(())
    }

    /// Convolve image which type of samples is known only at runtime.
    pub fn convolve_dynamic(
        &self,
        src_image: &DynamicImageBuffer,
        kernel: &FilterKernel,
        options: &ConvolveOptions,
    ) -> Result<DynamicImageBuffer, ConvolutionError> {
        Ok(match src_image {
            DynamicImageBuffer::U8(src) => self.convolve(src, kernel, options)?.into(),
            DynamicImageBuffer::F32(src) => self.convolve(src, kernel, options)?.into(),
        })
    }

    /// Convolve source image and save the result into the destination image.
    ///
    /// Both images must have the same type of samples.
    pub fn convolve_dynamic_into(
        &self,
        src_image: &DynamicImageBuffer,
        dst_image: &mut DynamicImageBuffer,
        kernel: &FilterKernel,
        options: &ConvolveOptions,
    ) -> Result<(), ConvolutionError> {
        match (src_image, dst_image) {
            (DynamicImageBuffer::U8(src), DynamicImageBuffer::U8(dst)) => {
                self.convolve_into(src, dst, kernel, options)
            }
            (DynamicImageBuffer::F32(src), DynamicImageBuffer::F32(dst)) => {
                self.convolve_into(src, dst, kernel, options)
            }
            _ => Err(DifferentTypesOfSamplesError.into()),
        }
    }
}
