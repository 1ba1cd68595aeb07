use crate::KernelError;

/// Order in which weights of a kernel are stored in its flat buffer.
///
/// For symmetric kernels (blur, sharpen, edge detection) both orders
/// give identical results. For asymmetric kernels (e.g. Sobel)
/// [KernelOrder::ColumnMajor] transposes the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelOrder {
    /// Weight for the offset `(fx, fy)` lives at `(fy + r) * size + (fx + r)`.
    #[default]
    RowMajor,
    /// Weight for the offset `(fx, fy)` lives at `(fx + r) * size + (fy + r)`.
    ColumnMajor,
}

/// Square grid of `size x size` weights.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterKernel {
    size: u32,
    weights: Vec<f32>,
}

impl FilterKernel {
    /// Create kernel from flat sequence of weights.
    ///
    /// `size` must be odd and `weights.len()` must be equal to `size * size`.
    pub fn new(size: u32, weights: Vec<f32>) -> Result<Self, KernelError> {
        if size % 2 == 0 {
            return Err(KernelError::InvalidKernel(size));
        }
        let expected = size as usize * size as usize;
        if weights.len() != expected {
            return Err(KernelError::ShapeMismatch {
                size,
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self { size, weights })
    }

    /// Create kernel and take its size from count of weights.
    pub fn from_weights(weights: Vec<f32>) -> Result<Self, KernelError> {
        let len = weights.len();
        let size = (len as f64).sqrt().round() as u32;
        if size as usize * size as usize != len {
            return Err(KernelError::ShapeMismatch {
                size,
                expected: size as usize * size as usize,
                actual: len,
            });
        }
        Self::new(size, weights)
    }

    /// Kernel that reproduces source image.
    pub fn identity(size: u32) -> Result<Self, KernelError> {
        if size % 2 == 0 {
            return Err(KernelError::InvalidKernel(size));
        }
        let len = size as usize * size as usize;
        let mut weights = vec![0f32; len];
        weights[len / 2] = 1.;
        Ok(Self { size, weights })
    }

    #[inline(always)]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Half of the kernel's side length.
    #[inline(always)]
    pub fn radius(&self) -> i32 {
        (self.size / 2) as i32
    }

    #[inline(always)]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Weight for the offset `(fx, fy)` from the center of kernel.
    ///
    /// # Panics
    ///
    /// Panics if `fx` or `fy` is out of range `[-radius, radius]`.
    #[inline(always)]
    pub fn weight(&self, fx: i32, fy: i32, order: KernelOrder) -> f32 {
        self.weights[self.weight_index(fx, fy, order)]
    }

    #[inline(always)]
    pub(crate) fn weight_index(&self, fx: i32, fy: i32, order: KernelOrder) -> usize {
        let radius = self.radius();
        let size = self.size as usize;
        let col = (fx + radius) as usize;
        let row = (fy + radius) as usize;
        match order {
            KernelOrder::RowMajor => row * size + col,
            KernelOrder::ColumnMajor => col * size + row,
        }
    }

    /// Returns copy of kernel with every weight divided by sum of weights.
    ///
    /// Kernels with zero sum (e.g. edge detection) are returned unchanged.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum == 0. || !sum.is_finite() {
            return self.clone();
        }
        Self {
            size: self.size,
            weights: self.weights.iter().map(|w| w / sum).collect(),
        }
    }

    pub fn transposed(&self) -> Self {
        let size = self.size as usize;
        let mut weights = Vec::with_capacity(self.weights.len());
        for col in 0..size {
            for row in 0..size {
                weights.push(self.weights[row * size + col]);
            }
        }
        Self {
            size: self.size,
            weights,
        }
    }
}
