use crate::pixels::Sample;
use crate::{FilterKernel, ImageBuffer, KernelOrder};

/// Convolves source image with the kernel and stores result into
/// destination image.
///
/// Out-of-range neighbours are replaced by the nearest edge sample
/// (replicate padding). Every channel is filtered independently.
///
/// Caller must guarantee that both images have the same shape.
pub(crate) fn convolve<S: Sample>(
    src_image: &ImageBuffer<S>,
    dst_image: &mut ImageBuffer<S>,
    kernel: &FilterKernel,
    order: KernelOrder,
) {
    debug_assert!(src_image.has_same_shape(dst_image));

    let width = src_image.width().get() as usize;
    let height = src_image.height().get() as usize;
    let channels = src_image.channels().count();
    let radius = kernel.radius();
    let weights = kernel.weights();
    let src_samples = src_image.samples();
    let row_len = src_image.row_len();

    for (y, dst_row) in dst_image.iter_rows_mut().enumerate() {
        for (x, dst_pixel) in dst_row.chunks_exact_mut(channels).enumerate() {
            for (c, dst_sample) in dst_pixel.iter_mut().enumerate() {
                let mut sum = 0f32;
                for fy in -radius..=radius {
                    let ny = replicate_index(y, fy, height);
                    let src_row = &src_samples[ny * row_len..(ny + 1) * row_len];
                    for fx in -radius..=radius {
                        let nx = replicate_index(x, fx, width);
                        let k = weights[kernel.weight_index(fx, fy, order)];
                        sum += src_row[nx * channels + c].to_f32() * k;
                    }
                }
                *dst_sample = S::quantize(sum);
            }
        }
    }
}

/// Position of the neighbour shifted by `offset` from `pos`,
/// clamped to the nearest edge of the range `0..len`.
#[inline(always)]
fn replicate_index(pos: usize, offset: i32, len: usize) -> usize {
    (pos as i64 + offset as i64).clamp(0, len as i64 - 1) as usize
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use crate::Channels;

    fn nz(v: u32) -> NonZeroU32 {
        NonZeroU32::new(v).unwrap()
    }

    #[test]
    fn replicate_border_on_single_row() {
        // 1x3 box filter over [10, 20, 30]; edges see duplicated samples.
        let src = ImageBuffer::<u8>::from_vec(nz(3), nz(1), Channels::L, vec![10, 20, 30]).unwrap();
        let mut dst = ImageBuffer::new(nz(3), nz(1), Channels::L);
        #[rustfmt::skip]
        let kernel = FilterKernel::new(3, vec![
            0., 0., 0.,
            1., 1., 1.,
            0., 0., 0.,
        ]).unwrap();
        convolve(&src, &mut dst, &kernel, KernelOrder::RowMajor);
        assert_eq!(dst.samples(), &[40, 60, 80]);

        // The same weights read in column-major order sum up a column,
        // which is the same sample three times after clamping.
        convolve(&src, &mut dst, &kernel, KernelOrder::ColumnMajor);
        assert_eq!(dst.samples(), &[30, 60, 90]);
    }

    #[test]
    fn replicate_index_clamps_to_edges() {
        assert_eq!(replicate_index(0, -2, 5), 0);
        assert_eq!(replicate_index(1, -1, 5), 0);
        assert_eq!(replicate_index(2, 1, 5), 3);
        assert_eq!(replicate_index(4, 2, 5), 4);
        assert_eq!(replicate_index(0, 3, 1), 0);

        // Dimensions above `i32::MAX` are allowed by `NonZeroU32`.
        let len = u32::MAX as usize;
        assert_eq!(replicate_index(len - 1, 2, len), len - 1);
        assert_eq!(replicate_index(len - 2, 1, len), len - 1);
        assert_eq!(replicate_index(i32::MAX as usize, 1, len), i32::MAX as usize + 1);
    }

    #[test]
    fn one_by_one_image() {
        let src = ImageBuffer::<f32>::from_vec(nz(1), nz(1), Channels::La, vec![0.2, 0.9]).unwrap();
        let mut dst = ImageBuffer::new(nz(1), nz(1), Channels::La);
        let kernel = FilterKernel::new(3, vec![1. / 9.; 9]).unwrap();
        convolve(&src, &mut dst, &kernel, KernelOrder::RowMajor);
        assert!((dst.sample(0, 0, 0) - 0.2).abs() < 1e-6);
        assert!((dst.sample(0, 0, 1) - 0.9).abs() < 1e-6);
    }
}
