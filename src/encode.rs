use std::{
    fs,
    io::{BufWriter, Seek, Write},
    path::Path,
};

use image::ImageFormat;
use tempfile::NamedTempFile;

use crate::{
    encoders, error::OrientateError, image::Image, orientate_err, orientate_try, plan::Modifiers,
};

/// Re-encodes the image over the file it was read from.
///
/// The new contents are written to a temporary file next to the original,
/// which then replaces it, so a failed encode never leaves a truncated image behind.
pub fn overwrite(image: &Image, path: &Path, modifiers: &Modifiers) -> Result<(), OrientateError> {
    let format = choose_encoding_format(image, path)?;

    // the temporary file must be on the same filesystem for the rename to be atomic
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(directory).map_err(|error| {
        orientate_err!(
            "unable to create a temporary file in '{}': {}",
            directory.display(),
            error
        )
    })?;
    // NamedTempFile is created with restrictive permissions; keep those of the original instead
    let permissions = orientate_try!(fs::metadata(path)).permissions();
    orientate_try!(temp.as_file().set_permissions(permissions));

    {
        // Wrap in BufWriter for performance
        let mut writer = BufWriter::new(temp.as_file_mut());
        encode(image, &mut writer, format, modifiers)?;
        // The buffers would be flushed when the writer goes out of scope,
        // but that would not report any errors.
        orientate_try!(writer.flush());
    }

    temp.persist(path)
        .map_err(|error| orientate_err!("unable to write '{}': {}", path.display(), error.error))?;
    Ok(())
}

pub fn encode<W: Write + Seek>(
    image: &Image,
    writer: &mut W,
    format: ImageFormat,
    modifiers: &Modifiers,
) -> Result<(), OrientateError> {
    match format {
        #[cfg(feature = "png")]
        ImageFormat::Png => encoders::png::encode(image, writer, modifiers)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => encoders::jpeg::encode(image, writer, modifiers)?,
        #[cfg(feature = "tiff")]
        ImageFormat::Tiff => encoders::tiff::encode(image, writer)?,
        // TODO: carry Exif over for the remaining formats once `write_to` can take metadata
        // (https://github.com/image-rs/image/pull/2554)
        _ => orientate_try!(image.pixels.write_to(writer, format)),
    }
    Ok(())
}

fn choose_encoding_format(image: &Image, path: &Path) -> Result<ImageFormat, OrientateError> {
    // write back in whatever format the file actually contained
    if let Some(format) = image.format {
        return Ok(format);
    }
    if let Ok(format) = ImageFormat::from_path(path) {
        return Ok(format);
    }
    Err(orientate_err!(
        "no encode delegate for this image format `{}'",
        path.extension()
            .unwrap_or_default()
            .to_ascii_uppercase()
            .to_string_lossy()
    ))
}
