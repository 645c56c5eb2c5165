use std::borrow::Cow;
use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage};

use crate::encoders::common::write_icc_and_exif;
use crate::{error::OrientateError, image::Image, orientate_try, plan::Modifiers};

/// Used when `-quality` is not given. The quality of the original file is not known,
/// so this errs on the side of keeping detail.
const DEFAULT_QUALITY: u8 = 92;

pub fn encode<W: Write>(
    image: &Image,
    writer: &mut W,
    modifiers: &Modifiers,
) -> Result<(), OrientateError> {
    let quality = modifiers
        .quality
        .map(|q| q.clamp(1.0, 100.0) as u8)
        .unwrap_or(DEFAULT_QUALITY);
    let mut encoder = JpegEncoder::new_with_quality(writer, quality);
    write_icc_and_exif(&mut encoder, image);
    orientate_try!(to_jpeg_color(&image.pixels).write_with_encoder(encoder));
    Ok(())
}

/// The encoder only accepts 8-bit grayscale and RGB.
fn to_jpeg_color(pixels: &DynamicImage) -> Cow<'_, DynamicImage> {
    match pixels.color() {
        ColorType::L8 | ColorType::Rgb8 => Cow::Borrowed(pixels),
        color if color.has_color() => Cow::Owned(DynamicImage::ImageRgb8(pixels.to_rgb8())),
        _ => Cow::Owned(DynamicImage::ImageLuma8(pixels.to_luma8())),
    }
}
