use std::path::Path;

use image::{metadata::Orientation, DynamicImage, ImageDecoder, ImageReader, ImageResult};

use crate::{exif_block, image::Image};

/// Guesses the format based on file contents, falling back to the extension.
/// Keeps the Exif and ICC metadata alongside the pixels.
///
/// For formats that report an orientation but carry no Exif block,
/// a block holding just the orientation tag is made up so that it can be handled the same way.
pub fn decode(file: &Path) -> ImageResult<Image> {
    let reader = ImageReader::open(file)?.with_guessed_format()?;
    let format = reader.format();
    let mut decoder = reader.into_decoder()?;
    // metadata has to be extracted before the decoder is consumed
    let exif = match decoder.exif_metadata()? {
        Some(exif) => Some(strip_exif_marker(exif)),
        // TIFF keeps orientation among its own tags and hands out no Exif block
        None => match decoder.orientation()? {
            Orientation::NoTransforms => None,
            orientation => Some(exif_block::orientation_block(orientation.to_exif())),
        },
    };
    let icc = decoder.icc_profile()?;
    let pixels = DynamicImage::from_decoder(decoder)?;
    Ok(Image {
        format,
        exif,
        icc,
        pixels,
    })
}

/// Some decoders hand out the APP1 payload as-is, still prefixed with `Exif\0\0`.
fn strip_exif_marker(mut exif: Vec<u8>) -> Vec<u8> {
    const MARKER: &[u8] = b"Exif\0\0";
    if exif.starts_with(MARKER) {
        exif.drain(..MARKER.len());
    }
    exif
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_exif_marker() {
        assert_eq!(strip_exif_marker(b"Exif\0\0II*\0".to_vec()), b"II*\0");
        assert_eq!(strip_exif_marker(b"MM\0*".to_vec()), b"MM\0*");
        assert_eq!(strip_exif_marker(Vec::new()), b"");
    }
}
