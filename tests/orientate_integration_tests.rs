use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::codecs::jpeg::JpegEncoder;
use image::{GenericImageView, Rgb, RgbImage};
use orientate::{decode::decode, handle::ImageHandle, orientation::ORIENTATION_TAG};

fn setup<'a>() -> (&'a str, &'a str) {
    let binary = env!("CARGO_BIN_EXE_orientate");
    let tmp_dir = env!("CARGO_TARGET_TMPDIR");
    (binary, tmp_dir)
}

fn run<P: AsRef<OsStr>>(args: &[P]) -> Output {
    let (binary, _) = setup();
    Command::new(binary)
        .arg("-verbose")
        .args(args)
        .output()
        .expect("failed to launch orientate")
}

/// A TIFF structure holding only an Orientation entry in IFD0.
fn exif_block(orientation: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x112u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes()); // SHORT
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff
}

/// 16x8 JPEG, red on the left half and blue on the right,
/// with an APP1 Exif segment right after the SOI marker if `orientation` is given.
fn write_jpeg(name: &str, orientation: Option<u16>) -> PathBuf {
    let (_, tmp_dir) = setup();
    let path = PathBuf::from(tmp_dir).join(name);

    let pixels = RgbImage::from_fn(16, 8, |x, _| {
        if x < 8 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    });
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 95)
        .encode_image(&pixels)
        .unwrap();

    let contents = match orientation {
        Some(orientation) => {
            let tiff = exif_block(orientation);
            let mut with_exif = jpeg[..2].to_vec(); // SOI
            with_exif.extend_from_slice(&[0xff, 0xe1]);
            with_exif.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
            with_exif.extend_from_slice(b"Exif\0\0");
            with_exif.extend_from_slice(&tiff);
            with_exif.extend_from_slice(&jpeg[2..]);
            with_exif
        }
        None => jpeg,
    };

    fs::write(&path, contents).unwrap();
    path
}

fn read_orientation(path: &Path) -> Option<u32> {
    let image = decode(path).unwrap();
    image.metadata_tag(ORIENTATION_TAG)?.get_uint(0)
}

fn is_red(pixel: [u8; 4]) -> bool {
    pixel[0] > 200 && pixel[2] < 60
}

fn is_blue(pixel: [u8; 4]) -> bool {
    pixel[2] > 200 && pixel[0] < 60
}

#[test]
fn test_rotates_and_removes_tag() {
    let path = write_jpeg("right_top.jpg", Some(6));
    assert_eq!(read_orientation(&path), Some(6));

    let result = run(&[&path]);
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("right_top.jpg: right-top -> rotate90"));

    let rotated = image::open(&path).unwrap();
    assert_eq!(rotated.dimensions(), (8, 16));
    // the left edge of the stored image is the top of the scene
    assert!(is_red(rotated.get_pixel(4, 3).0));
    assert!(is_blue(rotated.get_pixel(4, 12).0));
    assert_eq!(read_orientation(&path), None);
}

#[test]
fn test_second_run_leaves_file_alone() {
    let path = write_jpeg("twice.jpg", Some(3));
    assert!(run(&[&path]).status.success());
    let after_first_run = fs::read(&path).unwrap();

    let result = run(&[&path]);
    assert!(result.status.success());
    assert!(String::from_utf8(result.stdout)
        .unwrap()
        .contains("twice.jpg: no orientation"));
    assert_eq!(fs::read(&path).unwrap(), after_first_run);
}

#[test]
fn test_upright_and_untagged_files_are_not_rewritten() {
    let upright = write_jpeg("upright.jpg", Some(1));
    let untagged = write_jpeg("untagged.jpg", None);
    let invalid = write_jpeg("invalid.jpg", Some(9));
    let originals: Vec<_> = [&upright, &untagged, &invalid]
        .iter()
        .map(|path| fs::read(path).unwrap())
        .collect();

    let result = run(&[&upright, &untagged, &invalid]);
    assert!(result.status.success());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("upright.jpg: already upright"));
    assert!(stdout.contains("untagged.jpg: no orientation"));
    assert!(stdout.contains("invalid.jpg: no orientation"));

    for (path, original) in [&upright, &untagged, &invalid].iter().zip(originals) {
        assert_eq!(fs::read(path).unwrap(), original);
    }
}

#[test]
fn test_failures_do_not_stop_the_run() {
    let (_, tmp_dir) = setup();
    let missing = PathBuf::from(tmp_dir).join("does_not_exist.jpg");
    let garbage = PathBuf::from(tmp_dir).join("garbage.jpg");
    fs::write(&garbage, b"this is not a JPEG").unwrap();
    let tagged = write_jpeg("after_failures.jpg", Some(8));

    let result = run(&[&missing, &garbage, &tagged]);
    assert!(!result.status.success());
    let stderr = String::from_utf8(result.stderr).unwrap();
    assert!(stderr.contains(&format!("Couldn't read the image at {}.", missing.display())));
    assert!(stderr.contains(&format!("Unable to process '{}'", garbage.display())));

    // the file after the failures was still processed
    assert_eq!(image::open(&tagged).unwrap().dimensions(), (8, 16));
    assert_eq!(read_orientation(&tagged), None);
}

#[test]
fn test_no_arguments_prints_help() {
    let (binary, _) = setup();
    let result = Command::new(binary).output().unwrap();
    assert!(result.status.success());
    assert!(String::from_utf8(result.stdout).unwrap().contains("Usage: orientate"));
}

#[test]
fn test_fixture_carries_orientation() {
    // guards the fixture itself: the decoder must see the spliced-in segment
    let path = write_jpeg("fixture.jpg", Some(5));
    assert_eq!(read_orientation(&path), Some(5));
    assert_eq!(read_orientation(&write_jpeg("fixture_plain.jpg", None)), None);
}
