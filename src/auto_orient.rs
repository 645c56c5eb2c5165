//! Physically rotates an image based on its Exif orientation, then removes the tag.
//!
//! Some viewers honor the orientation tag and some don't,
//! so the same file can display differently depending on where it is opened.
//! Baking the rotation into the pixels makes every viewer agree.

use exif::Value;

use crate::{
    handle::ImageHandle,
    orientation::{Orientation, Transform, ORIENTATION_TAG},
};

/// What the orientation metadata of an image asks for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The tag is missing or holds a value outside 1..=8.
    NoOrientationData,
    /// The pixels are already stored upright.
    Identity(Orientation),
    Transform(Orientation, Transform),
}

/// Reads the orientation tag and selects the transform it calls for, without modifying the image.
pub fn resolve(image: &impl ImageHandle) -> Resolution {
    let Some(value) = image.metadata_tag(ORIENTATION_TAG) else {
        // suggests the image is already the correct orientation
        return Resolution::NoOrientationData;
    };
    // we're not the orientation police: garbage is treated as if no tag was set
    let Some(orientation) = first_byte(&value).and_then(Orientation::from_exif) else {
        return Resolution::NoOrientationData;
    };
    match orientation.transform() {
        Some(transform) => Resolution::Transform(orientation, transform),
        None => Resolution::Identity(orientation),
    }
}

/// Carries out a previously computed [`Resolution`]. Returns whether the pixels were altered.
pub fn apply(image: &mut impl ImageHandle, resolution: Resolution) -> bool {
    let Resolution::Transform(_, transform) = resolution else {
        return false;
    };
    image.apply_transform(transform);
    // Otherwise viewers that honor the tag would re-apply the rotation we've just done.
    // The pixels are already rotated at this point, so a failure here doesn't change the outcome.
    let _ = image.remove_metadata_tag(ORIENTATION_TAG);
    true
}

/// Applies any transformation the orientation tag calls for and removes the tag.
/// Returns whether the image was altered.
///
/// Never fails: missing or malformed orientation data leaves the image untouched.
pub fn process(image: &mut impl ImageHandle) -> bool {
    let resolution = resolve(image);
    apply(image, resolution)
}

/// The first stored value, if it fits in a byte.
fn first_byte(value: &Value) -> Option<u8> {
    match value {
        Value::Byte(bytes) | Value::Undefined(bytes, _) => bytes.first().copied(),
        other => other.get_uint(0).and_then(|v| u8::try_from(v).ok()),
    }
}
