//! Physically rotates images according to their Exif orientation tag, then removes the tag.
//!
//! Viewers disagree on whether to honor the orientation tag,
//! so the same photo can show up sideways in one and upright in another.
//! Once the rotation is baked into the pixels and the tag is gone, they all agree.
//!
//! The decision logic lives in [`auto_orient`] and works on anything implementing
//! [`handle::ImageHandle`]; [`crate::image::Image`] is the implementation backed by the `image` crate.

#![forbid(unsafe_code)]

#[cfg(feature = "hardened_malloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod arg_parse_err;
mod arg_parsers;
pub mod args;
pub mod auto_orient;
pub mod decode;
pub mod encode;
mod encoders;
pub mod error;
mod exif_block;
pub mod handle;
pub mod help;
pub mod image;
pub mod orientation;
pub mod plan;
