#![no_main]

use std::num::NonZeroU8;

use arbitrary::Arbitrary;
use image::{DynamicImage, GenericImageView};
use libfuzzer_sys::fuzz_target;
use orientate::{auto_orient, handle::ImageHandle, image::Image, orientation::ORIENTATION_TAG};

/// An image with arbitrary dimensions and an arbitrary Exif block
#[derive(Debug, Arbitrary)]
struct Input {
    width: NonZeroU8,
    height: NonZeroU8,
    exif: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let (width, height) = (input.width.get() as u32, input.height.get() as u32);
    let mut image = Image {
        format: None,
        exif: Some(input.exif),
        icc: None,
        pixels: DynamicImage::new_rgb8(width, height),
    };

    let resolution = auto_orient::resolve(&image);
    let exif_len = image.exif.as_ref().map(Vec::len);
    let altered = auto_orient::process(&mut image);

    // the Exif block is edited in place, never resized
    assert_eq!(image.exif.as_ref().map(Vec::len), exif_len);
    match resolution {
        auto_orient::Resolution::Transform(_, transform) => {
            assert!(altered);
            let expected = if transform.swaps_dimensions() {
                (height, width)
            } else {
                (width, height)
            };
            assert_eq!(image.pixels.dimensions(), expected);
        }
        _ => {
            assert!(!altered);
            assert_eq!(image.pixels.dimensions(), (width, height));
        }
    }
    // a second pass must not find anything left to undo, unless the tag could not be removed
    if altered && image.metadata_tag(ORIENTATION_TAG).is_none() {
        assert!(!auto_orient::process(&mut image));
    }
});
