//! JPEG is an older image format designed with old-school compression in mind.
//!
//! Exif lives in an `APP1` marker segment, right after an `Exif\0\0`
//! signature. Everything else in the file is skipped.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{MaybeParsedExif, MetadataProvider, MetadataProviderRaw};

mod error;
mod parse;

pub use error::JpegConstructionError;

/// A JPEG file.
#[derive(Clone, Debug)]
pub struct Jpeg {
    exif: Arc<RwLock<Option<MaybeParsedExif>>>,
}

impl MetadataProviderRaw for Jpeg {
    fn exif_raw(&self) -> Arc<RwLock<Option<MaybeParsedExif>>> {
        Arc::clone(&self.exif)
    }
}

impl MetadataProvider for Jpeg {
    type ConstructionError = JpegConstructionError;

    fn magic_number(input: &[u8]) -> bool {
        parse::magic_number(input)
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        parse::parse(input.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use exifscope_types::exif::{FieldData, ifd::IfdGroup, primitives::Primitive, tags::Ifd0Tag};

    use super::{Jpeg, JpegConstructionError};
    use crate::{MetadataProvider, util::logger};

    /// A little-endian Exif blob with one field: `Orientation = 6`.
    fn exif_blob() -> Vec<u8> {
        let mut v = Vec::new();
        v.extend_from_slice(b"II");
        v.extend_from_slice(42_u16.to_le_bytes().as_slice());
        v.extend_from_slice(8_u32.to_le_bytes().as_slice());
        v.extend_from_slice(1_u16.to_le_bytes().as_slice());
        v.extend_from_slice(274_u16.to_le_bytes().as_slice());
        v.extend_from_slice(3_u16.to_le_bytes().as_slice());
        v.extend_from_slice(1_u32.to_le_bytes().as_slice());
        v.extend_from_slice(&[6, 0, 0, 0]);
        v.extend_from_slice(0_u32.to_le_bytes().as_slice());
        v
    }

    /// Wraps a payload in a marker segment.
    fn segment(marker_code: u8, payload: &[u8]) -> Vec<u8> {
        let mut v = vec![0xFF, marker_code];
        v.extend_from_slice((payload.len() as u16 + 2).to_be_bytes().as_slice());
        v.extend_from_slice(payload);
        v
    }

    fn jpeg(app1: Option<&[u8]>) -> Vec<u8> {
        let mut v = vec![0xFF, 0xD8];
        v.extend(segment(0xE0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0"));
        if let Some(payload) = app1 {
            v.extend(segment(0xE1, payload));
        }
        v.extend(segment(0xDA, &[1, 1, 0, 0, 0x3F, 0]));
        v.extend_from_slice(&[0x12, 0xFF, 0x00, 0x34, 0xFF, 0xD0, 0x56]); // scan data
        v.extend_from_slice(&[0xFF, 0xD9]);
        v
    }

    #[test]
    fn jpeg_without_exif() {
        logger();

        let file = jpeg(None);
        assert!(Jpeg::magic_number(&file));

        let jpeg = Jpeg::new(&file).unwrap();
        assert!(jpeg.exif().is_none());
    }

    #[test]
    fn jpeg_with_exif() {
        logger();

        let mut payload = b"Exif\0\0".to_vec();
        payload.extend(exif_blob());
        let file = jpeg(Some(&payload));

        let jpeg = Jpeg::new(&file).unwrap();
        let exif = jpeg.exif().unwrap().unwrap();
        let exif = exif.read();

        let orientation = exif
            .ifd(IfdGroup::_0)
            .and_then(|ifd| ifd.get(Ifd0Tag::Orientation.tag_id()))
            .unwrap();
        assert_eq!(orientation.data, FieldData::Primitive(Primitive::Short(6)));
    }

    /// The decoded Exif is cached after the first call.
    #[test]
    fn exif_is_cached() {
        logger();

        let mut payload = b"Exif\0\0".to_vec();
        payload.extend(exif_blob());
        let file = jpeg(Some(&payload));

        let jpeg = Jpeg::new(&file).unwrap();
        let first = jpeg.exif().unwrap().unwrap();
        let second = jpeg.exif().unwrap().unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
    }

    /// APP1 segments with other signatures (like XMP) are skipped.
    #[test]
    fn other_app1_is_ignored() {
        logger();

        let file = jpeg(Some(b"http://ns.adobe.com/xap/1.0/\0<x/>"));
        let jpeg = Jpeg::new(&file).unwrap();
        assert!(jpeg.exif().is_none());
    }

    #[test]
    fn not_a_jpeg() {
        logger();

        let file = [0xFF_u8, 0xE0, 0x00, 0x02];
        assert!(!Jpeg::magic_number(&file));
        assert_eq!(
            Jpeg::new(&file).unwrap_err(),
            JpegConstructionError::FirstMarkerWasNotSoi { marker_code: 0xE0 }
        );
    }

    #[test]
    fn truncated_segment() {
        logger();

        let mut file = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x40];
        file.extend_from_slice(b"Exif\0\0");

        assert_eq!(
            Jpeg::new(&file).unwrap_err(),
            JpegConstructionError::NoDataForPayload {
                marker_code: 0xE1,
                original_len: 0x3E,
                remaining_input_len: 6,
            }
        );
    }
}
