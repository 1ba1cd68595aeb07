use crate::FilterKernel;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum FilterPreset {
    /// 1x1 kernel with weight 1.0. Reproduces the source image.
    Identity,
    /// 3x3 kernel with identical weights.
    BoxBlur,
    /// 3x3 binomial approximation of Gaussian blur
    /// (weights are divided by 16).
    GaussianBlur3,
    /// 5x5 binomial approximation of Gaussian blur
    /// (weights are divided by 256).
    #[default]
    GaussianBlur5,
    /// 3x3 kernel that amplifies difference between a pixel
    /// and its 4-connected neighbours.
    Sharpen,
    /// 3x3 Laplacian-like kernel which sum of weights is zero.
    /// Uniform regions become black, edges become bright.
    EdgeDetection,
}

#[rustfmt::skip]
const GAUSSIAN_3X3: [f32; 9] = [
    1., 2., 1.,
    2., 4., 2.,
    1., 2., 1.,
];

#[rustfmt::skip]
const GAUSSIAN_5X5: [f32; 25] = [
    1.,  4.,  6.,  4., 1.,
    4., 16., 24., 16., 4.,
    6., 24., 36., 24., 6.,
    4., 16., 24., 16., 4.,
    1.,  4.,  6.,  4., 1.,
];

#[rustfmt::skip]
const SHARPEN_3X3: [f32; 9] = [
     0., -1.,  0.,
    -1.,  5., -1.,
     0., -1.,  0.,
];

#[rustfmt::skip]
const EDGE_DETECTION_3X3: [f32; 9] = [
    -1., -1., -1.,
    -1.,  8., -1.,
    -1., -1., -1.,
];

impl FilterPreset {
    /// Size of the preset's kernel.
    pub fn size(&self) -> u32 {
        match self {
            Self::Identity => 1,
            Self::GaussianBlur5 => 5,
            _ => 3,
        }
    }

    /// Build kernel of the preset.
    pub fn kernel(&self) -> FilterKernel {
        let size = self.size();
        let weights = match self {
            Self::Identity => vec![1.],
            Self::BoxBlur => vec![1. / 9.; 9],
            Self::GaussianBlur3 => scaled(&GAUSSIAN_3X3, 16.),
            Self::GaussianBlur5 => scaled(&GAUSSIAN_5X5, 256.),
            Self::Sharpen => SHARPEN_3X3.to_vec(),
            Self::EdgeDetection => EDGE_DETECTION_3X3.to_vec(),
        };
        FilterKernel::new(size, weights).expect("weights of presets match their sizes")
    }
}

fn scaled(weights: &[f32], divisor: f32) -> Vec<f32> {
    weights.iter().map(|w| w / divisor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [FilterPreset; 6] = [
        FilterPreset::Identity,
        FilterPreset::BoxBlur,
        FilterPreset::GaussianBlur3,
        FilterPreset::GaussianBlur5,
        FilterPreset::Sharpen,
        FilterPreset::EdgeDetection,
    ];

    #[test]
    fn kernels_are_valid() {
        for preset in ALL {
            let kernel = preset.kernel();
            assert_eq!(kernel.size(), preset.size(), "{preset:?}");
        }
    }

    #[test]
    fn sums_of_weights() {
        for preset in ALL {
            let sum = preset.kernel().sum();
            let expected = if preset == FilterPreset::EdgeDetection {
                0.
            } else {
                1.
            };
            assert!((sum - expected).abs() < 1e-6, "{preset:?}: {sum}");
        }
    }

    #[test]
    fn gaussian_blur5_is_divided_by_256() {
        let kernel = FilterPreset::GaussianBlur5.kernel();
        assert_eq!(kernel.weights()[12], 36. / 256.);
        assert_eq!(kernel.weights()[0], 1. / 256.);
        assert_eq!(GAUSSIAN_5X5.iter().sum::<f32>(), 256.);
    }

    #[test]
    fn presets_are_symmetric() {
        for preset in ALL {
            let kernel = preset.kernel();
            assert_eq!(kernel.transposed(), kernel, "{preset:?}");
        }
    }
}
