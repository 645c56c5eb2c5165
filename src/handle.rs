use crate::{error::OrientateError, orientation::Transform};

/// Access to an image's pixels and metadata, as required to normalize its orientation.
pub trait ImageHandle {
    /// Reads a tag from the primary image's metadata, or `None` if it is not present.
    fn metadata_tag(&self, tag: u16) -> Option<exif::Value>;

    /// Deletes a tag from the primary image's metadata.
    /// Must leave the pixels untouched on failure.
    fn remove_metadata_tag(&mut self, tag: u16) -> Result<(), OrientateError>;

    fn apply_transform(&mut self, transform: Transform);
}
