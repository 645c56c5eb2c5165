//! Exif orientation values and the pixel transforms that undo them.

use strum::{Display, IntoStaticStr, VariantArray};

/// The Exif tag under which orientation data is stored.
pub const ORIENTATION_TAG: u16 = 0x112;

/// Position of the camera relative to the captured scene, as recorded in the Exif orientation tag.
///
/// Named after where the first row and the first column of the stored pixels end up,
/// e.g. `RightTop` means the first stored row is the right edge of the scene
/// and the first stored column is its top edge.
///
/// An explanation of Exif orientation:
/// <https://web.archive.org/web/20200412005226/https://www.impulseadventure.com/photo/exif-orientation.html>
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, IntoStaticStr, VariantArray)]
#[strum(serialize_all = "kebab-case")]
pub enum Orientation {
    TopLeft = 1,
    TopRight = 2,
    BottomRight = 3,
    BottomLeft = 4,
    LeftTop = 5,
    RightTop = 6,
    RightBottom = 7,
    LeftBottom = 8,
}

impl Orientation {
    /// Returns `None` for anything outside 1..=8.
    #[must_use]
    pub fn from_exif(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::TopLeft),
            2 => Some(Self::TopRight),
            3 => Some(Self::BottomRight),
            4 => Some(Self::BottomLeft),
            5 => Some(Self::LeftTop),
            6 => Some(Self::RightTop),
            7 => Some(Self::RightBottom),
            8 => Some(Self::LeftBottom),
            0 | 9.. => None,
        }
    }

    #[must_use]
    pub fn to_exif(self) -> u8 {
        self as u8
    }

    /// The transform that physically reorders the pixels so that the image
    /// displays correctly without the tag.
    /// `TopLeft` is already stored upright and needs none.
    #[must_use]
    pub fn transform(self) -> Option<Transform> {
        match self {
            Self::TopLeft => None,
            Self::TopRight => Some(Transform::FlipHorizontal),
            Self::BottomRight => Some(Transform::Rotate180),
            Self::BottomLeft => Some(Transform::Rotate180FlipHorizontal),
            Self::LeftTop => Some(Transform::Rotate90FlipHorizontal),
            Self::RightTop => Some(Transform::Rotate90),
            Self::RightBottom => Some(Transform::Rotate270FlipHorizontal),
            Self::LeftBottom => Some(Transform::Rotate270),
        }
    }
}

/// A rotation by a multiple of 90 degrees clockwise, optionally followed by a horizontal flip.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, IntoStaticStr, VariantArray)]
#[strum(serialize_all = "kebab-case")]
pub enum Transform {
    /// Leaves the pixels as they are. Never selected for an orientation.
    Identity,
    FlipHorizontal,
    Rotate90,
    Rotate90FlipHorizontal,
    Rotate180,
    Rotate180FlipHorizontal,
    Rotate270,
    Rotate270FlipHorizontal,
}

impl Transform {
    /// Clockwise rotation in degrees, applied before the flip.
    #[must_use]
    pub fn degrees(self) -> u16 {
        match self {
            Self::Identity | Self::FlipHorizontal => 0,
            Self::Rotate90 | Self::Rotate90FlipHorizontal => 90,
            Self::Rotate180 | Self::Rotate180FlipHorizontal => 180,
            Self::Rotate270 | Self::Rotate270FlipHorizontal => 270,
        }
    }

    /// Whether width and height trade places.
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        self.degrees() % 180 == 90
    }
}

impl From<Transform> for image::metadata::Orientation {
    fn from(transform: Transform) -> Self {
        match transform {
            Transform::Identity => Self::NoTransforms,
            Transform::FlipHorizontal => Self::FlipHorizontal,
            Transform::Rotate90 => Self::Rotate90,
            Transform::Rotate90FlipHorizontal => Self::Rotate90FlipH,
            Transform::Rotate180 => Self::Rotate180,
            // turning upside down and mirroring left to right leaves a vertical flip
            Transform::Rotate180FlipHorizontal => Self::FlipVertical,
            Transform::Rotate270 => Self::Rotate270,
            Transform::Rotate270FlipHorizontal => Self::Rotate270FlipH,
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Orientation {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(Self::VARIANTS).unwrap()
    }
}
