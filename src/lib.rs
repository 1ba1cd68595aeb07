#![doc = include_str!("../README.md")]
//!
//! ## Feature flags
#![doc = document_features::document_features!()]

pub use crate::image::{Channels, DynamicImageBuffer, ImageBuffer};
pub use convolution::{convolve, FilterPreset};
pub use convolver::{ConvolveOptions, Convolver};
pub use errors::*;
#[cfg(feature = "image")]
pub use image_crate::{decode_file, encode_file, DEFAULT_JPEG_QUALITY};
pub use kernel::{FilterKernel, KernelOrder};
pub use pixels::{Sample, SampleType};

mod convolution;
mod convolver;
mod errors;
mod image;
#[cfg(feature = "image")]
mod image_crate;
mod kernel;
pub mod pixels;
