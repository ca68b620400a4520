use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use nom_exif::*;
use serde::Serialize;
use std::path::Path;

/// One entry of the parsed tag mapping: the parser's tag name and its
/// string-rendered value. Values are opaque; nothing here interprets them.
#[derive(Debug, Clone, Serialize)]
pub struct TagEntry {
    pub name: String,
    pub value: String,
}

/// A GPS position in decimal degrees (south and west are negative).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GpsPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// EXIF metadata extracted from one image: the well-known fields the
/// report calls out, plus the full tag mapping.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExifSummary {
    pub capture_date: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub software: Option<String>,
    pub gps: Option<GpsPosition>,
    pub tags: Vec<TagEntry>,
}

/// Parse all EXIF tags from an image file.
///
/// The file is opened, parsed, and closed within this call. A GPS position
/// is extracted only when both reference characters and both coordinates
/// parse completely; partial GPS data yields `None`. Well-known fields are
/// taken from the primary image IFD, and thumbnail tags are prefixed in the
/// dump so the two sets stay distinguishable.
///
/// Fails when the file cannot be opened or its container holds no
/// parseable EXIF segment (PNG and BMP files commonly do not).
pub fn read_exif(path: &Path) -> Result<ExifSummary> {
    let mut parser = MediaParser::new();
    let ms = MediaSource::file_path(path).context("Failed to open file")?;

    let iter: ExifIter = parser
        .parse(ms)
        .with_context(|| format!("No parseable EXIF data in {}", path.display()))?;

    // Resolve GPS before iterating (iteration consumes the iterator). The
    // IFD walker reads tag 0 as an end sentinel, so a GPS IFD led by
    // GPSVersionID parses as empty and yields no position.
    let gps = iter
        .parse_gps_info()
        .ok()
        .flatten()
        .filter(gps_is_complete)
        .map(|gps| GpsPosition {
            latitude: latlng_to_decimal(&gps.latitude, gps.latitude_ref),
            longitude: latlng_to_decimal(&gps.longitude, gps.longitude_ref),
        });

    let mut summary = ExifSummary {
        gps,
        ..Default::default()
    };

    for entry in iter {
        let Some(value) = entry.get_value().and_then(entry_to_string) else {
            continue;
        };

        let mut name = match entry.tag() {
            Some(tag) => format!("{tag:?}"),
            None => format!("Unknown(0x{:04x})", entry.tag_code()),
        };
        if entry.ifd_index() == 1 {
            name = format!("Thumbnail {name}");
        }

        // Well-known fields come from the primary image IFD only
        if entry.ifd_index() == 0 {
            match entry.tag() {
                Some(ExifTag::DateTimeOriginal) => {
                    summary.capture_date = Some(normalize_datetime(&value));
                }
                Some(ExifTag::Make) => summary.make = Some(value.clone()),
                Some(ExifTag::Model) => summary.model = Some(value.clone()),
                Some(ExifTag::Software) => summary.software = Some(value.clone()),
                _ => {}
            }
        }

        summary.tags.push(TagEntry { name, value });
    }

    log::debug!(
        "Parsed {} EXIF tag(s) from {}",
        summary.tags.len(),
        path.display()
    );
    Ok(summary)
}

/// Convert an EntryValue to a trimmed, non-empty string.
fn entry_to_string(val: &EntryValue) -> Option<String> {
    let s = val.to_string();
    let s = s.trim().trim_matches('"').to_string();
    if s.is_empty() { None } else { Some(s) }
}

/// Normalize a parser-rendered timestamp to EXIF "YYYY:MM:DD HH:MM:SS" form.
///
/// Depending on how the parser interpreted the tag, the value arrives either
/// as the raw EXIF string or as a chrono rendering with an offset; both
/// normalize to the same output. Unrecognized strings pass through unchanged.
fn normalize_datetime(s: &str) -> String {
    if NaiveDateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S").is_ok() {
        return s.to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.format("%Y:%m:%d %H:%M:%S").to_string();
    }
    // Any offset is parsed but ignored; the wall-clock time is what EXIF stores
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f %:z",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive.format("%Y:%m:%d %H:%M:%S").to_string();
        }
    }
    s.to_string()
}

/// Convert a nom-exif LatLng (3 URationals: deg, min, sec) to decimal degrees.
fn latlng_to_decimal(latlng: &LatLng, reference: char) -> f64 {
    let degrees = latlng.0.0 as f64 / latlng.0.1 as f64;
    let minutes = latlng.1.0 as f64 / latlng.1.1 as f64;
    let seconds = latlng.2.0 as f64 / latlng.2.1 as f64;

    let mut coord = degrees + minutes / 60.0 + seconds / 3600.0;

    if reference == 'S' || reference == 'W' {
        coord = -coord;
    }

    coord
}

/// True when the parser resolved both reference characters and all six
/// coordinate rationals.
///
/// `parse_gps_info` yields a value as soon as any recognized GPS tag
/// matches; parts it never saw stay zeroed (NUL refs, 0/0 rationals), and
/// a 0/0 rational would reach the report as NaN.
fn gps_is_complete(gps: &GPSInfo) -> bool {
    let parsed = |l: &LatLng| l.0.1 != 0 && l.1.1 != 0 && l.2.1 != 0;
    gps.latitude_ref != '\0'
        && gps.longitude_ref != '\0'
        && parsed(&gps.latitude)
        && parsed(&gps.longitude)
}

#[cfg(test)]
pub(crate) mod fixtures {
    const ASCII: u16 = 2;
    const LONG: u16 = 4;
    const RATIONAL: u16 = 5;

    fn entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
        out.extend_from_slice(&tag.to_le_bytes());
        out.extend_from_slice(&kind.to_le_bytes());
        out.extend_from_slice(&count.to_le_bytes());
        out.extend_from_slice(&value);
    }

    fn at(offset: u32) -> [u8; 4] {
        offset.to_le_bytes()
    }

    fn rational(out: &mut Vec<u8>, num: u32, den: u32) {
        out.extend_from_slice(&num.to_le_bytes());
        out.extend_from_slice(&den.to_le_bytes());
    }

    fn tiff_header(ifd0_at: u32) -> Vec<u8> {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"II");
        tiff.extend_from_slice(&42u16.to_le_bytes());
        tiff.extend_from_slice(&ifd0_at.to_le_bytes());
        tiff
    }

    fn wrap_jpeg(tiff: &[u8]) -> Vec<u8> {
        let mut jpeg = Vec::new();
        jpeg.extend_from_slice(&[0xFF, 0xD8]); // SOI
        jpeg.extend_from_slice(&[0xFF, 0xE1]); // APP1
        jpeg.extend_from_slice(&((tiff.len() + 8) as u16).to_be_bytes());
        jpeg.extend_from_slice(b"Exif\0\0");
        jpeg.extend_from_slice(tiff);
        jpeg.extend_from_slice(&[0xFF, 0xD9]); // EOI
        jpeg
    }

    /// Build a minimal JPEG whose only content is an EXIF APP1 segment:
    /// IFD0 carries a description, make "Acme", model "X100", and software;
    /// an Exif sub-IFD holds DateTimeOriginal "2021:05:01 10:00:00"; a GPS
    /// IFD holds N 48°51'29.60", E 2°17'40.40". Little-endian TIFF with
    /// hand-laid offsets, asserted at every boundary while building.
    pub(crate) fn exif_jpeg() -> Vec<u8> {
        const IFD0_AT: u32 = 8;
        const DESC_AT: u32 = 86;
        const MAKE_AT: u32 = 96;
        const MODEL_AT: u32 = 102;
        const SOFTWARE_AT: u32 = 108;
        const EXIF_IFD_AT: u32 = 124;
        const DATE_AT: u32 = 142;
        const GPS_IFD_AT: u32 = 162;
        const LAT_AT: u32 = 216;
        const LON_AT: u32 = 240;

        let mut tiff = tiff_header(IFD0_AT);

        // IFD0: six entries in ascending tag order
        assert_eq!(tiff.len() as u32, IFD0_AT);
        tiff.extend_from_slice(&6u16.to_le_bytes());
        entry(&mut tiff, 0x010E, ASCII, 10, at(DESC_AT)); // ImageDescription
        entry(&mut tiff, 0x010F, ASCII, 5, at(MAKE_AT)); // Make
        entry(&mut tiff, 0x0110, ASCII, 5, at(MODEL_AT)); // Model
        entry(&mut tiff, 0x0131, ASCII, 15, at(SOFTWARE_AT)); // Software
        entry(&mut tiff, 0x8769, LONG, 1, at(EXIF_IFD_AT)); // Exif sub-IFD pointer
        entry(&mut tiff, 0x8825, LONG, 1, at(GPS_IFD_AT)); // GPS IFD pointer
        tiff.extend_from_slice(&0u32.to_le_bytes());

        // Out-of-line ASCII values, NUL-terminated, padded to even offsets
        assert_eq!(tiff.len() as u32, DESC_AT);
        tiff.extend_from_slice(b"Test shot\0");
        assert_eq!(tiff.len() as u32, MAKE_AT);
        tiff.extend_from_slice(b"Acme\0\0");
        assert_eq!(tiff.len() as u32, MODEL_AT);
        tiff.extend_from_slice(b"X100\0\0");
        assert_eq!(tiff.len() as u32, SOFTWARE_AT);
        tiff.extend_from_slice(b"PhotoSuite 2.0\0\0");

        // Exif sub-IFD: DateTimeOriginal only
        assert_eq!(tiff.len() as u32, EXIF_IFD_AT);
        tiff.extend_from_slice(&1u16.to_le_bytes());
        entry(&mut tiff, 0x9003, ASCII, 20, at(DATE_AT));
        tiff.extend_from_slice(&0u32.to_le_bytes());

        assert_eq!(tiff.len() as u32, DATE_AT);
        tiff.extend_from_slice(b"2021:05:01 10:00:00\0");

        // GPS IFD. GPSVersionID (tag 0x0000) is omitted: the IFD walker
        // reads tag 0 as an end sentinel and would see an empty IFD.
        assert_eq!(tiff.len() as u32, GPS_IFD_AT);
        tiff.extend_from_slice(&4u16.to_le_bytes());
        entry(&mut tiff, 0x0001, ASCII, 2, [b'N', 0, 0, 0]); // GPSLatitudeRef
        entry(&mut tiff, 0x0002, RATIONAL, 3, at(LAT_AT)); // GPSLatitude
        entry(&mut tiff, 0x0003, ASCII, 2, [b'E', 0, 0, 0]); // GPSLongitudeRef
        entry(&mut tiff, 0x0004, RATIONAL, 3, at(LON_AT)); // GPSLongitude
        tiff.extend_from_slice(&0u32.to_le_bytes());

        // 48° 51' 29.60" N
        assert_eq!(tiff.len() as u32, LAT_AT);
        rational(&mut tiff, 48, 1);
        rational(&mut tiff, 51, 1);
        rational(&mut tiff, 2960, 100);

        // 2° 17' 40.40" E
        assert_eq!(tiff.len() as u32, LON_AT);
        rational(&mut tiff, 2, 1);
        rational(&mut tiff, 17, 1);
        rational(&mut tiff, 4040, 100);

        wrap_jpeg(&tiff)
    }

    /// A variant with an incomplete GPS IFD: the latitude pair is present
    /// but no longitude tag exists anywhere in the file.
    pub(crate) fn partial_gps_jpeg() -> Vec<u8> {
        const IFD0_AT: u32 = 8;
        const MAKE_AT: u32 = 38;
        const GPS_IFD_AT: u32 = 44;
        const LAT_AT: u32 = 74;

        let mut tiff = tiff_header(IFD0_AT);

        assert_eq!(tiff.len() as u32, IFD0_AT);
        tiff.extend_from_slice(&2u16.to_le_bytes());
        entry(&mut tiff, 0x010F, ASCII, 5, at(MAKE_AT)); // Make
        entry(&mut tiff, 0x8825, LONG, 1, at(GPS_IFD_AT)); // GPS IFD pointer
        tiff.extend_from_slice(&0u32.to_le_bytes());

        assert_eq!(tiff.len() as u32, MAKE_AT);
        tiff.extend_from_slice(b"Acme\0\0");

        // GPS IFD: latitude only
        assert_eq!(tiff.len() as u32, GPS_IFD_AT);
        tiff.extend_from_slice(&2u16.to_le_bytes());
        entry(&mut tiff, 0x0001, ASCII, 2, [b'N', 0, 0, 0]); // GPSLatitudeRef
        entry(&mut tiff, 0x0002, RATIONAL, 3, at(LAT_AT)); // GPSLatitude
        tiff.extend_from_slice(&0u32.to_le_bytes());

        assert_eq!(tiff.len() as u32, LAT_AT);
        rational(&mut tiff, 48, 1);
        rational(&mut tiff, 51, 1);
        rational(&mut tiff, 2960, 100);

        // nom-exif sniffs the MIME type from up to 128 bytes and then
        // unconditionally refills its buffer, so any file of 128 bytes or
        // less fails with an EOF error before parsing starts. This TIFF
        // wraps to a 112-byte JPEG; a COM segment spliced in before the
        // EOI marker keeps the file above that threshold without moving
        // any TIFF offset.
        let mut jpeg = wrap_jpeg(&tiff);
        let eoi = jpeg.split_off(jpeg.len() - 2);
        let comment = b"padding past the parser's 128-byte header probe";
        jpeg.extend_from_slice(&[0xFF, 0xFE]); // COM
        jpeg.extend_from_slice(&((comment.len() + 2) as u16).to_be_bytes());
        jpeg.extend_from_slice(comment);
        jpeg.extend_from_slice(&eoi);
        jpeg
    }
}
