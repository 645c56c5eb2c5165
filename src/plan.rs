use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use image::ImageError;

use crate::{
    auto_orient::{self, Resolution},
    decode::decode,
    encode,
    error::OrientateError,
    handle::ImageHandle,
    orientate_err, orientate_try,
    orientation::ORIENTATION_TAG,
};

/// Plan of the whole run over multiple files
#[derive(Debug, Default)]
pub struct ExecutionPlan {
    pub input_files: Vec<PathBuf>,
    pub modifiers: Modifiers,
}

/// Settings that affect how files are processed
#[derive(Debug, Default, Clone)]
pub struct Modifiers {
    /// Encoder quality used when writing a corrected image back
    pub quality: Option<f64>,
    /// Report the outcome for every file on stdout
    pub verbose: bool,
}

impl ExecutionPlan {
    pub fn add_input_file(&mut self, file: PathBuf) {
        self.input_files.push(file);
    }

    /// Processes every file in order. A file that fails is reported on stderr
    /// and does not stop the remaining ones from being processed.
    pub fn execute(&self) -> Result<(), OrientateError> {
        if self.input_files.is_empty() {
            return Err(orientate_err!("no images defined"));
        }
        let mut stdout = io::stdout().lock();
        let mut failures = 0;
        for path in &self.input_files {
            match orientate_file(path, &self.modifiers) {
                Ok(resolution) => {
                    if self.modifiers.verbose {
                        orientate_try!(writeln!(stdout, "{}", describe(path, resolution)));
                    }
                }
                Err(FileError::NotFound) => {
                    failures += 1;
                    eprintln!("Couldn't read the image at {}.", path.display());
                }
                Err(FileError::Other(reason)) => {
                    failures += 1;
                    eprintln!("Unable to process '{}': {}.", path.display(), reason);
                }
            }
        }
        if failures > 0 {
            return Err(orientate_err!(
                "{} of {} files could not be processed",
                failures,
                self.input_files.len()
            ));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum FileError {
    NotFound,
    Other(String),
}

impl From<ImageError> for FileError {
    fn from(error: ImageError) -> Self {
        match error {
            ImageError::IoError(e) if e.kind() == io::ErrorKind::NotFound => Self::NotFound,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<OrientateError> for FileError {
    fn from(error: OrientateError) -> Self {
        Self::Other(error.0)
    }
}

/// Decodes the file, rotates it if its orientation tag says so,
/// and writes it back only if the pixels changed, i.e. for [`Resolution::Transform`].
pub fn orientate_file(path: &Path, modifiers: &Modifiers) -> Result<Resolution, FileError> {
    let mut image = decode(path)?;
    let resolution = auto_orient::resolve(&image);
    if !auto_orient::apply(&mut image, resolution) {
        return Ok(resolution);
    }
    if image.metadata_tag(ORIENTATION_TAG).is_some() {
        // Writing the tag back out would make viewers rotate the image a second time.
        eprintln!(
            "Warning: could not remove the orientation tag from {}, discarding its Exif metadata.",
            path.display()
        );
        image.exif = None;
    }
    encode::overwrite(&image, path, modifiers)?;
    Ok(resolution)
}

fn describe(path: &Path, resolution: Resolution) -> String {
    let path = path.display();
    match resolution {
        Resolution::Transform(orientation, transform) => {
            format!("{path}: {orientation} -> {transform}")
        }
        Resolution::Identity(_) => format!("{path}: already upright"),
        Resolution::NoOrientationData => format!("{path}: no orientation"),
    }
}
