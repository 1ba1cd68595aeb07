use std::str::FromStr;

use image_convolution as ic;

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum Preset {
    /// 1x1 kernel that keeps the image as is.
    Identity,
    /// 3x3 kernel with identical weights.
    BoxBlur,
    /// 3x3 binomial kernel, weights are divided by 16.
    GaussianBlur3,
    /// 5x5 binomial kernel, weights are divided by 256.
    GaussianBlur5,
    /// 3x3 sharpening kernel.
    Sharpen,
    /// 3x3 edge detection kernel `[-1,-1,-1,-1,8,-1,-1,-1,-1]`.
    EdgeDetection,
}

impl From<Preset> for ic::FilterPreset {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Identity => ic::FilterPreset::Identity,
            Preset::BoxBlur => ic::FilterPreset::BoxBlur,
            Preset::GaussianBlur3 => ic::FilterPreset::GaussianBlur3,
            Preset::GaussianBlur5 => ic::FilterPreset::GaussianBlur5,
            Preset::Sharpen => ic::FilterPreset::Sharpen,
            Preset::EdgeDetection => ic::FilterPreset::EdgeDetection,
        }
    }
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum Samples {
    /// Convolve 8-bit samples directly.
    U8,
    /// Normalize samples into [0.0, 1.0], convolve and scale them back.
    F32,
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum KernelOrder {
    /// Weights are listed row by row.
    RowMajor,
    /// Weights are listed column by column.
    ColumnMajor,
}

impl From<KernelOrder> for ic::KernelOrder {
    fn from(order: KernelOrder) -> Self {
        match order {
            KernelOrder::RowMajor => ic::KernelOrder::RowMajor,
            KernelOrder::ColumnMajor => ic::KernelOrder::ColumnMajor,
        }
    }
}

/// Weights of a custom kernel separated by commas.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelWeights(pub Vec<f32>);

impl FromStr for KernelWeights {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let weights = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f32>()
                    .map_err(|_| format!("Invalid weight of kernel: {:?}", part))
            })
            .collect::<Result<Vec<f32>, _>>()?;
        if weights.is_empty() {
            return Err("Kernel must have at least one weight".to_string());
        }
        Ok(Self(weights))
    }
}
