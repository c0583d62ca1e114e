//! Shared test utilities for the trip-pages test suite.
//!
//! Builds trip folders on disk and synthesises the smallest image files that
//! still carry a real EXIF block, so timestamp extraction can be exercised
//! without binary fixtures.
//!
//! ```rust
//! let tmp = setup_trip(&[("20210818", "Geneva"), ("20210820", "Col")]);
//! add_photo(tmp.path(), "20210818", "b.jpg", Some("2021:08:18 14:30:00"));
//! add_photo(tmp.path(), "20210818", "a.jpg", None);
//! ```

use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Trip folder setup
// =========================================================================

/// Create a base folder holding `tripreport.csv` and one empty folder per day.
pub fn setup_trip(days: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let mut csv = String::from("Date,Place\n");
    for (date, place) in days {
        csv.push_str(&format!("{date},{place}\n"));
        std::fs::create_dir_all(tmp.path().join(date)).unwrap();
    }
    std::fs::write(tmp.path().join("tripreport.csv"), csv).unwrap();
    tmp
}

/// Write an image into a day folder, with EXIF `DateTimeOriginal` when given.
///
/// `.png` names get a PNG container, everything else a JPEG one.
pub fn add_photo(base: &Path, day: &str, filename: &str, taken: Option<&str>) {
    let dir = base.join(day);
    std::fs::create_dir_all(&dir).unwrap();
    let bytes = if filename.to_lowercase().ends_with(".png") {
        png_with_exif(taken)
    } else {
        jpeg_with_exif(taken)
    };
    std::fs::write(dir.join(filename), bytes).unwrap();
}

// =========================================================================
// Synthetic image bytes
// =========================================================================

/// A TIFF block with IFD0 → EXIF IFD → `DateTimeOriginal`.
pub fn tiff_with_date_time_original(text: &str, big_endian: bool) -> Vec<u8> {
    let u16b = |v: u16| {
        if big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    };
    let u32b = |v: u32| {
        if big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    };

    let mut ascii = text.as_bytes().to_vec();
    ascii.push(0);

    // header (8) + IFD0 (2 + 12 + 4) + EXIF IFD (2 + 12 + 4) + value
    let exif_ifd: u32 = 8 + 18;
    let value_offset: u32 = exif_ifd + 18;

    let mut out = Vec::new();
    out.extend_from_slice(if big_endian { b"MM" } else { b"II" });
    out.extend_from_slice(&u16b(42));
    out.extend_from_slice(&u32b(8));

    out.extend_from_slice(&u16b(1));
    out.extend_from_slice(&u16b(0x8769));
    out.extend_from_slice(&u16b(4));
    out.extend_from_slice(&u32b(1));
    out.extend_from_slice(&u32b(exif_ifd));
    out.extend_from_slice(&u32b(0));

    out.extend_from_slice(&u16b(1));
    out.extend_from_slice(&u16b(0x9003));
    out.extend_from_slice(&u16b(2));
    out.extend_from_slice(&u32b(ascii.len() as u32));
    out.extend_from_slice(&u32b(value_offset));
    out.extend_from_slice(&u32b(0));

    out.extend_from_slice(&ascii);
    out
}

/// A skeletal JPEG: SOI, JFIF APP0, optional EXIF APP1, SOS, EOI.
pub fn jpeg_with_exif(taken: Option<&str>) -> Vec<u8> {
    let mut out = vec![0xFF, 0xD8];
    out.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
    out.extend_from_slice(b"JFIF\0");
    out.extend_from_slice(&[1, 1, 0, 0, 1, 0, 1, 0, 0]);

    if let Some(text) = taken {
        let tiff = tiff_with_date_time_original(text, false);
        let len = (2 + 6 + tiff.len()) as u16;
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(&tiff);
    }

    out.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0x12, 0x34]);
    out.extend_from_slice(&[0xFF, 0xD9]);
    out
}

/// A skeletal PNG: signature, IHDR, optional eXIf, IDAT, IEND. CRCs are zero.
pub fn png_with_exif(taken: Option<&str>) -> Vec<u8> {
    fn chunk(out: &mut Vec<u8>, kind: &[u8], body: &[u8]) {
        out.extend_from_slice(&(body.len() as u32).to_be_bytes());
        out.extend_from_slice(kind);
        out.extend_from_slice(body);
        out.extend_from_slice(&[0, 0, 0, 0]);
    }

    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();
    chunk(&mut out, b"IHDR", &[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0]);
    if let Some(text) = taken {
        chunk(&mut out, b"eXIf", &tiff_with_date_time_original(text, true));
    }
    chunk(&mut out, b"IDAT", &[0x78, 0x9C]);
    chunk(&mut out, b"IEND", &[]);
    out
}
