//! Decoding and encoding of image files with help of the `image` crate.
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{
    ColorType, DynamicImage, ExtendedColorType, GrayAlphaImage, GrayImage, ImageFormat,
    ImageReader, RgbImage, RgbaImage,
};

use crate::{Channels, DecodeError, EncodeError, ImageBuffer};

/// Quality used by default for JPEG files.
pub const DEFAULT_JPEG_QUALITY: u8 = 100;

/// Read the image file and decode it into an image with `u8` samples.
///
/// 16-bit and floating-point images are converted into 8-bit images
/// with the same layout of channels.
pub fn decode_file(path: impl AsRef<Path>) -> Result<ImageBuffer<u8>, DecodeError> {
    let path = path.as_ref();
    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|source| DecodeError::Io {
            path: path.to_owned(),
            source,
        })?
        .decode()
        .map_err(|source| DecodeError::Image {
            path: path.to_owned(),
            source,
        })?;
    ImageBuffer::try_from(&image)
}

/// Encode the image and write it into the file.
///
/// Format of the file is selected by its extension. For JPEG files
/// the given `quality` is used and alpha channel is dropped.
pub fn encode_file(
    image: &ImageBuffer<u8>,
    path: impl AsRef<Path>,
    quality: u8,
) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)
        .map_err(|_| EncodeError::UnsupportedFormat(path.to_owned()))?;
    let width = image.width().get();
    let height = image.height().get();

    if format == ImageFormat::Jpeg {
        if !(1..=100).contains(&quality) {
            return Err(EncodeError::InvalidQuality(quality));
        }
        let (samples, color_type) = without_alpha(image);
        let file = File::create(path).map_err(|source| EncodeError::Io {
            path: path.to_owned(),
            source,
        })?;
        let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
        encoder
            .encode(&samples, width, height, color_type)
            .map_err(|source| EncodeError::Image {
                path: path.to_owned(),
                source,
            })
    } else {
        image::save_buffer_with_format(
            path,
            image.samples(),
            width,
            height,
            color_type(image.channels()),
            format,
        )
        .map_err(|source| EncodeError::Image {
            path: path.to_owned(),
            source,
        })
    }
}

fn color_type(channels: Channels) -> ColorType {
    match channels {
        Channels::L => ColorType::L8,
        Channels::La => ColorType::La8,
        Channels::Rgb => ColorType::Rgb8,
        Channels::Rgba => ColorType::Rgba8,
    }
}

/// Returns samples of the image with dropped alpha channel.
fn without_alpha(image: &ImageBuffer<u8>) -> (Vec<u8>, ExtendedColorType) {
    let channels = image.channels();
    let (keep, color_type) = match channels {
        Channels::L | Channels::La => (1, ExtendedColorType::L8),
        Channels::Rgb | Channels::Rgba => (3, ExtendedColorType::Rgb8),
    };
    if !channels.has_alpha() {
        return (image.samples().to_vec(), color_type);
    }
    let samples = image
        .samples()
        .chunks_exact(channels.count())
        .flat_map(|pixel| &pixel[..keep])
        .copied()
        .collect();
    (samples, color_type)
}

impl TryFrom<&DynamicImage> for ImageBuffer<u8> {
    type Error = DecodeError;

    fn try_from(image: &DynamicImage) -> Result<Self, Self::Error> {
        let color_type = image.color();
        let (samples, channels) = match color_type {
            ColorType::L8 | ColorType::L16 => (image.to_luma8().into_raw(), 1),
            ColorType::La8 | ColorType::La16 => (image.to_luma_alpha8().into_raw(), 2),
            ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => {
                (image.to_rgb8().into_raw(), 3)
            }
            ColorType::Rgba8 | ColorType::Rgba16 | ColorType::Rgba32F => {
                (image.to_rgba8().into_raw(), 4)
            }
            _ => return Err(DecodeError::UnsupportedColorType(color_type)),
        };
        ImageBuffer::from_raw(image.width(), image.height(), channels, samples)
            .map_err(|_| DecodeError::EmptyImage)
    }
}

impl From<ImageBuffer<u8>> for DynamicImage {
    fn from(image: ImageBuffer<u8>) -> Self {
        let width = image.width().get();
        let height = image.height().get();
        let channels = image.channels();
        let samples = image.into_vec();
        // Size of the buffer always matches to dimensions of `ImageBuffer`.
        const MSG: &str = "size of buffer matches image dimensions";
        match channels {
            Channels::L => {
                DynamicImage::ImageLuma8(GrayImage::from_raw(width, height, samples).expect(MSG))
            }
            Channels::La => DynamicImage::ImageLumaA8(
                GrayAlphaImage::from_raw(width, height, samples).expect(MSG),
            ),
            Channels::Rgb => {
                DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, samples).expect(MSG))
            }
            Channels::Rgba => {
                DynamicImage::ImageRgba8(RgbaImage::from_raw(width, height, samples).expect(MSG))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_alpha_for_jpeg() {
        let image = ImageBuffer::<u8>::from_raw(2, 1, 4, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let (samples, color_type) = without_alpha(&image);
        assert_eq!(samples, vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(color_type, ExtendedColorType::Rgb8);

        let image = ImageBuffer::<u8>::from_raw(2, 1, 2, vec![10, 255, 20, 0]).unwrap();
        let (samples, color_type) = without_alpha(&image);
        assert_eq!(samples, vec![10, 20]);
        assert_eq!(color_type, ExtendedColorType::L8);
    }

    #[test]
    fn dynamic_image_round_trip() {
        let image = ImageBuffer::<u8>::from_raw(3, 2, 3, (0..18).collect()).unwrap();
        let dyn_image: DynamicImage = image.clone().into();
        assert_eq!(dyn_image.color(), ColorType::Rgb8);
        assert_eq!(ImageBuffer::try_from(&dyn_image).unwrap(), image);
    }

    #[test]
    fn convert_16bit_image() {
        let dyn_image = DynamicImage::new_luma16(4, 4);
        let image = ImageBuffer::try_from(&dyn_image).unwrap();
        assert_eq!(image.channels(), Channels::L);
        assert_eq!(image.samples().len(), 16);
    }

    #[test]
    fn convert_float_images() {
        let image = ImageBuffer::try_from(&DynamicImage::new_rgb32f(3, 2)).unwrap();
        assert_eq!(image.channels(), Channels::Rgb);
        assert_eq!(image.samples().len(), 18);

        let image = ImageBuffer::try_from(&DynamicImage::new_rgba32f(3, 2)).unwrap();
        assert_eq!(image.channels(), Channels::Rgba);
    }
}
