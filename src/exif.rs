//! Minimal EXIF reader for capture timestamps.
//!
//! Extracts a single field: `DateTimeOriginal` (tag 0x9003) from the EXIF
//! sub-IFD, the moment the shutter fired in camera-local time.
//!
//! Where the TIFF structure lives depends on the container:
//! - JPEG: APP1 marker whose payload starts with `Exif\0\0`.
//! - PNG: the `eXIf` chunk.
//! - HEIC (and anything else): the first `Exif\0\0` header followed by a
//!   valid TIFF header anywhere in the file. HEIC stores the EXIF item
//!   verbatim, so a byte search finds it without walking the ISOBMFF boxes.

use chrono::NaiveDateTime;
use std::path::Path;

const EXIF_HEADER: &[u8] = b"Exif\0\0";
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const TAG_EXIF_IFD_POINTER: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Read the original capture time from an image file.
///
/// Returns `None` when the file cannot be read, carries no EXIF block, or
/// the block has no parseable `DateTimeOriginal`.
pub fn read_date_time_original(path: &Path) -> Option<NaiveDateTime> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let bytes = std::fs::read(path).ok()?;

    let tiff = match ext.as_str() {
        "jpg" | "jpeg" => find_jpeg_app1_exif(&bytes),
        "png" => find_png_exif(&bytes),
        _ => find_embedded_exif(&bytes),
    }?;
    parse_date_time_original(tiff)
}

// ---------------------------------------------------------------------------
// Container scanning
// ---------------------------------------------------------------------------

/// Find the TIFF bytes inside a JPEG's `Exif` APP1 segment.
fn find_jpeg_app1_exif(data: &[u8]) -> Option<&[u8]> {
    let mut pos = 0;
    while pos + 4 < data.len() {
        if data[pos] != 0xFF || data[pos + 1] == 0x00 || data[pos + 1] == 0xFF {
            pos += 1;
            continue;
        }
        let marker = data[pos + 1];
        // SOS: entropy-coded image data follows, no more metadata
        if marker == 0xDA {
            break;
        }
        // Markers without a length field
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }

        let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let seg_start = pos + 4;
        let seg_end = (pos + 2 + seg_len).min(data.len());
        if marker == 0xE1 && seg_start <= seg_end {
            let segment = &data[seg_start..seg_end];
            if let Some(tiff) = segment.strip_prefix(EXIF_HEADER) {
                return Some(tiff);
            }
        }
        pos += 2 + seg_len;
    }
    None
}

/// Find the TIFF bytes inside a PNG `eXIf` chunk.
///
/// Chunk layout: length (u32 BE) + type (4) + data + CRC (4).
fn find_png_exif(data: &[u8]) -> Option<&[u8]> {
    let mut pos = data.strip_prefix(PNG_SIGNATURE).map(|_| PNG_SIGNATURE.len())?;
    while pos + 8 <= data.len() {
        let len =
            u32::from_be_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]]) as usize;
        let kind = &data[pos + 4..pos + 8];
        let body_start = pos + 8;
        let body_end = body_start.checked_add(len)?;
        if body_end > data.len() {
            return None;
        }
        match kind {
            b"eXIf" => {
                let body = &data[body_start..body_end];
                // Some writers keep the JPEG-style prefix
                return Some(body.strip_prefix(EXIF_HEADER).unwrap_or(body));
            }
            b"IDAT" | b"IEND" => return None,
            _ => pos = body_end + 4,
        }
    }
    None
}

/// Find an `Exif\0\0` header immediately followed by a TIFF header.
fn find_embedded_exif(data: &[u8]) -> Option<&[u8]> {
    data.windows(EXIF_HEADER.len() + 4)
        .position(|w| {
            w.starts_with(EXIF_HEADER)
                && matches!(&w[EXIF_HEADER.len()..], b"II*\0" | b"MM\0*")
        })
        .map(|pos| &data[pos + EXIF_HEADER.len()..])
}

// ---------------------------------------------------------------------------
// TIFF structure
// ---------------------------------------------------------------------------

/// Bounds-checked reader over a TIFF block in either byte order.
struct TiffReader<'a> {
    data: &'a [u8],
    big_endian: bool,
}

impl<'a> TiffReader<'a> {
    fn new(data: &'a [u8]) -> Option<Self> {
        let big_endian = match data.get(0..2)? {
            b"MM" => true,
            b"II" => false,
            _ => return None,
        };
        let reader = Self { data, big_endian };
        // TIFF magic
        (reader.u16(2)? == 42).then_some(reader)
    }

    fn u16(&self, offset: usize) -> Option<u16> {
        let b: [u8; 2] = self.data.get(offset..offset + 2)?.try_into().ok()?;
        Some(if self.big_endian {
            u16::from_be_bytes(b)
        } else {
            u16::from_le_bytes(b)
        })
    }

    fn u32(&self, offset: usize) -> Option<u32> {
        let b: [u8; 4] = self.data.get(offset..offset + 4)?.try_into().ok()?;
        Some(if self.big_endian {
            u32::from_be_bytes(b)
        } else {
            u32::from_le_bytes(b)
        })
    }

    /// Locate `tag` in the IFD at `ifd_offset`, returning the entry offset.
    fn find_entry(&self, ifd_offset: usize, tag: u16) -> Option<usize> {
        let count = self.u16(ifd_offset)? as usize;
        (0..count)
            .map(|i| ifd_offset + 2 + i * 12)
            .take_while(|&entry| entry + 12 <= self.data.len())
            .find(|&entry| self.u16(entry) == Some(tag))
    }

    /// Read an ASCII entry, inline when it fits in four bytes.
    fn ascii(&self, entry: usize) -> Option<&'a str> {
        // type 2 = ASCII
        if self.u16(entry + 2)? != 2 {
            return None;
        }
        let len = self.u32(entry + 4)? as usize;
        let start = if len <= 4 {
            entry + 8
        } else {
            self.u32(entry + 8)? as usize
        };
        let bytes = self.data.get(start..start.checked_add(len)?)?;
        let text = std::str::from_utf8(bytes).ok()?;
        Some(text.trim_end_matches('\0').trim())
    }
}

/// Walk IFD0 → EXIF sub-IFD → `DateTimeOriginal`.
fn parse_date_time_original(tiff: &[u8]) -> Option<NaiveDateTime> {
    let reader = TiffReader::new(tiff)?;
    let ifd0 = reader.u32(4)? as usize;
    let pointer = reader.find_entry(ifd0, TAG_EXIF_IFD_POINTER)?;
    let exif_ifd = reader.u32(pointer + 8)? as usize;
    let entry = reader.find_entry(exif_ifd, TAG_DATE_TIME_ORIGINAL)?;
    let text = reader.ascii(entry)?;
    NaiveDateTime::parse_from_str(text, EXIF_DATE_FORMAT).ok()
}
