//! Contains types of samples of images.
use std::fmt::Debug;

use num_traits::AsPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    /// 8-bit unsigned integer in range `[0, 255]`.
    U8,
    /// Normalized floating-point value in range `[0.0, 1.0]`.
    F32,
}

impl SampleType {
    /// Size of one sample in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::F32 => 4,
        }
    }
}

/// Numeric type of image samples.
///
/// Convolution always accumulates in `f32`; implementations differ only
/// in the way an accumulated sum is stored back into a sample.
pub trait Sample: AsPrimitive<f32> + Copy + Default + Debug + PartialOrd + Send + Sync {
    const MIN_VALUE: Self;
    const MAX_VALUE: Self;

    fn sample_type() -> SampleType;

    #[inline(always)]
    fn to_f32(self) -> f32 {
        self.as_()
    }

    /// Stores accumulated sum as a sample of this type.
    fn quantize(sum: f32) -> Self;
}

impl Sample for u8 {
    const MIN_VALUE: Self = 0;
    const MAX_VALUE: Self = 255;

    fn sample_type() -> SampleType {
        SampleType::U8
    }

    /// Truncates toward zero, then clamps into `[0, 255]`.
    #[inline(always)]
    fn quantize(sum: f32) -> Self {
        // NaN falls through to `as`, which maps it to 0.
        let value = sum.trunc();
        if value <= 0. {
            0
        } else if value >= 255. {
            255
        } else {
            value as u8
        }
    }
}

impl Sample for f32 {
    const MIN_VALUE: Self = 0.;
    const MAX_VALUE: Self = 1.;

    fn sample_type() -> SampleType {
        SampleType::F32
    }

    /// Clamps into `[0.0, 1.0]` without rounding.
    #[inline(always)]
    fn quantize(sum: f32) -> Self {
        if sum.is_nan() {
            0.
        } else {
            sum.clamp(0., 1.)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_quantize_truncates_toward_zero() {
        assert_eq!(u8::quantize(99.99), 99);
        assert_eq!(u8::quantize(0.7), 0);
        assert_eq!(u8::quantize(-0.7), 0);
        assert_eq!(u8::quantize(254.9), 254);
    }

    #[test]
    fn u8_quantize_clamps() {
        assert_eq!(u8::quantize(8. * 255.), 255);
        assert_eq!(u8::quantize(-255.), 0);
        assert_eq!(u8::quantize(f32::INFINITY), 255);
        assert_eq!(u8::quantize(f32::NEG_INFINITY), 0);
        assert_eq!(u8::quantize(f32::NAN), 0);
    }

    #[test]
    fn f32_quantize_clamps_without_rounding() {
        assert_eq!(f32::quantize(0.123_456), 0.123_456);
        assert_eq!(f32::quantize(1.5), 1.);
        assert_eq!(f32::quantize(-0.25), 0.);
        assert_eq!(f32::quantize(f32::NAN), 0.);
    }

    #[test]
    fn to_f32() {
        assert_eq!(200u8.to_f32(), 200.);
        assert_eq!(0.5f32.to_f32(), 0.5);
        assert_eq!(u8::sample_type().size(), 1);
        assert_eq!(f32::sample_type().size(), 4);
    }
}
