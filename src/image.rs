use image::{DynamicImage, ImageFormat};

use crate::{
    error::OrientateError, exif_block, handle::ImageHandle, orientate_err, orientation::Transform,
};

#[derive(Debug, Clone)]
pub struct Image {
    pub format: Option<ImageFormat>,
    /// Raw Exif block: a TIFF structure without the `Exif\0\0` prefix
    pub exif: Option<Vec<u8>>,
    pub icc: Option<Vec<u8>>,
    pub pixels: DynamicImage,
}

impl ImageHandle for Image {
    fn metadata_tag(&self, tag: u16) -> Option<exif::Value> {
        exif_block::get_tag(self.exif.as_deref()?, tag)
    }

    fn remove_metadata_tag(&mut self, tag: u16) -> Result<(), OrientateError> {
        match &mut self.exif {
            Some(exif) => exif_block::remove_tag(exif, tag),
            None => Err(orientate_err!("image has no Exif metadata")),
        }
    }

    fn apply_transform(&mut self, transform: Transform) {
        self.pixels.apply_orientation(transform.into());
    }
}
