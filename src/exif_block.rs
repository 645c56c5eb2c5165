//! Reading and deleting tags in a raw Exif block, i.e. a TIFF structure
//! as found in a JPEG APP1 segment after the `Exif\0\0` marker.

use std::io::{Cursor, Read};

use byteorder_lite::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use exif::{Context, In, Tag, Value};

use crate::{error::OrientateError, orientate_err, orientate_try, orientation::ORIENTATION_TAG};

const ENTRY_LEN: usize = 12;

// TIFF field types
const BYTE: u16 = 1;
const SHORT: u16 = 3;
const LONG: u16 = 4;
const UNDEFINED: u16 = 7;

/// Looks up a tag in the primary image directory (IFD0).
///
/// A block without a readable IFD0 is treated as not containing the tag.
pub fn get_tag(raw_exif: &[u8], tag: u16) -> Option<Value> {
    match exif::Reader::new().read_raw(raw_exif.to_vec()) {
        Ok(exif) => {
            let field = exif.get_field(Tag(Context::Tiff, tag), In::PRIMARY)?;
            Some(field.value.clone())
        }
        // Damage past IFD0, such as a broken link to the thumbnail directory,
        // must not hide an entry that is perfectly readable.
        Err(_) => match raw_exif.get(..4)? {
            [0x49, 0x49, 42, 0] => get_inline_tag::<LittleEndian>(raw_exif, tag),
            [0x4d, 0x4d, 0, 42] => get_inline_tag::<BigEndian>(raw_exif, tag),
            _ => None,
        },
    }
}

/// Deletes a tag from the primary image directory (IFD0), editing the block in place.
///
/// The entry is cut out of the directory and the entries after it move up by one,
/// followed by the link to the next directory. The block keeps its length and every
/// offset in it stays valid; the 12 bytes freed at the end of the directory are zeroed.
/// Out-of-line data the entry pointed to is left behind unreferenced.
pub fn remove_tag(raw_exif: &mut [u8], tag: u16) -> Result<(), OrientateError> {
    match raw_exif.get(..4) {
        Some([0x49, 0x49, 42, 0]) => remove_tag_with::<LittleEndian>(raw_exif, tag),
        Some([0x4d, 0x4d, 0, 42]) => remove_tag_with::<BigEndian>(raw_exif, tag),
        _ => Err(orientate_err!("Exif block does not start with a TIFF header")),
    }
}

/// A little-endian block holding nothing but the orientation tag,
/// for formats that report orientation without handing out an Exif block.
pub fn orientation_block(orientation: u8) -> Vec<u8> {
    let mut block = Vec::with_capacity(8 + 2 + ENTRY_LEN + 4);
    block.extend_from_slice(&[0x49, 0x49, 42, 0]);
    block.extend_from_slice(&8u32.to_le_bytes());
    block.extend_from_slice(&1u16.to_le_bytes());
    block.extend_from_slice(&ORIENTATION_TAG.to_le_bytes());
    block.extend_from_slice(&SHORT.to_le_bytes());
    block.extend_from_slice(&1u32.to_le_bytes());
    block.extend_from_slice(&u16::from(orientation).to_le_bytes());
    block.extend_from_slice(&[0, 0]);
    block.extend_from_slice(&0u32.to_le_bytes());
    block
}

fn remove_tag_with<B: ByteOrder>(raw_exif: &mut [u8], tag: u16) -> Result<(), OrientateError> {
    let directory = Directory::locate::<B>(raw_exif)?;
    let entry = directory
        .find::<B>(raw_exif, tag)
        .ok_or_else(|| orientate_err!("tag {:#x} is not present in IFD0", tag))?;

    let entry_start = directory.entries_start() + entry.index * ENTRY_LEN;
    let directory_end = directory.end();
    raw_exif.copy_within(entry_start + ENTRY_LEN..directory_end, entry_start);
    raw_exif[directory_end - ENTRY_LEN..directory_end].fill(0);
    // count was read from a u16, so count - 1 fits
    let mut count_field = &mut raw_exif[directory.offset..directory.offset + 2];
    orientate_try!(count_field.write_u16::<B>((directory.count - 1) as u16));
    Ok(())
}

fn get_inline_tag<B: ByteOrder>(raw_exif: &[u8], tag: u16) -> Option<Value> {
    let directory = Directory::locate::<B>(raw_exif).ok()?;
    directory.find::<B>(raw_exif, tag)?.inline_value::<B>()
}

/// Where IFD0 sits in the block. Only constructed once the whole directory,
/// including the link to the next one, is known to be in bounds.
#[derive(Debug, Clone, Copy)]
struct Directory {
    offset: usize,
    count: usize,
}

impl Directory {
    fn locate<B: ByteOrder>(raw_exif: &[u8]) -> Result<Self, OrientateError> {
        let mut reader = Cursor::new(raw_exif);
        reader.set_position(4);
        let offset = reader
            .read_u32::<B>()
            .map_err(|_| orientate_err!("truncated TIFF header"))?;
        reader.set_position(u64::from(offset));
        let count = reader
            .read_u16::<B>()
            .map_err(|_| orientate_err!("IFD0 offset {} is out of bounds", offset))?;

        let directory = Self {
            offset: offset as usize,
            count: usize::from(count),
        };
        if directory.end() > raw_exif.len() {
            return Err(orientate_err!(
                "IFD0 with {} entries does not fit in {} bytes of Exif",
                count,
                raw_exif.len()
            ));
        }
        Ok(directory)
    }

    fn entries_start(&self) -> usize {
        self.offset + 2
    }

    /// The directory is followed by a 4-byte offset of the next one.
    fn end(&self) -> usize {
        self.entries_start() + self.count * ENTRY_LEN + 4
    }

    /// The first entry with the given tag.
    fn find<B: ByteOrder>(&self, raw_exif: &[u8], tag: u16) -> Option<Entry> {
        let mut reader = Cursor::new(raw_exif);
        reader.set_position(self.entries_start() as u64);
        for index in 0..self.count {
            let entry_tag = reader.read_u16::<B>().ok()?;
            let field_type = reader.read_u16::<B>().ok()?;
            let count = reader.read_u32::<B>().ok()?;
            let mut value = [0; 4];
            reader.read_exact(&mut value).ok()?;
            if entry_tag == tag {
                return Some(Entry {
                    index,
                    field_type,
                    count,
                    value,
                });
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    index: usize,
    field_type: u16,
    count: u32,
    /// The value itself if it fits in 4 bytes, otherwise its offset
    value: [u8; 4],
}

impl Entry {
    /// Values that do not fit in the entry live elsewhere in the block and are not followed.
    fn inline_value<B: ByteOrder>(&self) -> Option<Value> {
        let count = usize::try_from(self.count).ok()?;
        match (self.field_type, count) {
            (BYTE, 1..=4) => Some(Value::Byte(self.value[..count].to_vec())),
            (UNDEFINED, 1..=4) => Some(Value::Undefined(self.value[..count].to_vec(), 0)),
            (SHORT, 1..=2) => Some(Value::Short(
                self.value.chunks_exact(2).take(count).map(B::read_u16).collect(),
            )),
            (LONG, 1) => Some(Value::Long(vec![B::read_u32(&self.value)])),
            _ => None,
        }
    }
}
