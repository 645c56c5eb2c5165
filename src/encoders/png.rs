use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::encoders::common::write_icc_and_exif;
use crate::{error::OrientateError, image::Image, orientate_err, orientate_try, plan::Modifiers};

pub fn encode<W: Write>(
    image: &Image,
    writer: &mut W,
    modifiers: &Modifiers,
) -> Result<(), OrientateError> {
    let (compression, filter) = compression_parameters(modifiers.quality)?;
    let mut encoder = PngEncoder::new_with_quality(writer, compression, filter);
    write_icc_and_exif(&mut encoder, image);
    orientate_try!(image.pixels.write_with_encoder(encoder));
    Ok(())
}

/// PNG is lossless, so "quality" selects the zlib level (tens digit) and the filter (ones digit),
/// following <https://www.imagemagick.org/script/command-line-options.php#quality>
fn compression_parameters(
    quality: Option<f64>,
) -> Result<(CompressionType, FilterType), OrientateError> {
    let Some(quality) = quality else {
        // 75
        return Ok((CompressionType::Level(7), FilterType::Adaptive));
    };
    if quality.is_sign_negative() {
        return Err(orientate_err!("PNG quality cannot be negative"));
    }
    let quality = quality as u64;

    // anything past 99 still means the strongest level
    let compression = CompressionType::Level((quality / 10).min(9) as u8);
    let filter = match quality % 10 {
        0 => FilterType::NoFilter,
        1 => FilterType::Sub,
        2 => FilterType::Up,
        3 => FilterType::Avg,
        4 => FilterType::Paeth,
        5..=7 => FilterType::Adaptive,
        // 8 and 9 select fast compression regardless of the level
        8 => return Ok((CompressionType::Fast, FilterType::Adaptive)),
        _ => return Ok((CompressionType::Fast, FilterType::Up)),
    };
    Ok((compression, filter))
}
