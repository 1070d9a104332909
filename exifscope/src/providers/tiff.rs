//! TIFF is the container Exif is built on.
//!
//! A TIFF file's bytes are already an Exif blob: the header, IFD 0, and so
//! on. So, this provider hands the whole file to the Exif decoder.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{MaybeParsedExif, MetadataProvider, MetadataProviderRaw};

/// Little-endian TIFF header start: `II`, then 42.
const LE_MAGIC: [u8; 4] = [b'I', b'I', 42, 0];

/// Big-endian TIFF header start: `MM`, then 42.
const BE_MAGIC: [u8; 4] = [b'M', b'M', 0, 42];

/// A TIFF file.
#[derive(Clone, Debug)]
pub struct Tiff {
    exif: Arc<RwLock<Option<MaybeParsedExif>>>,
}

impl MetadataProviderRaw for Tiff {
    fn exif_raw(&self) -> Arc<RwLock<Option<MaybeParsedExif>>> {
        Arc::clone(&self.exif)
    }
}

impl MetadataProvider for Tiff {
    type ConstructionError = TiffConstructionError;

    fn magic_number(input: &[u8]) -> bool {
        input.starts_with(&LE_MAGIC) || input.starts_with(&BE_MAGIC)
    }

    fn new(
        input: &impl AsRef<[u8]>,
    ) -> Result<Self, <Self as MetadataProvider>::ConstructionError> {
        let input: &[u8] = input.as_ref();

        if !Self::magic_number(input) {
            log::error!("Input didn't start with a TIFF header.");
            return Err(TiffConstructionError::NotTiff);
        }

        // the header is 8 bytes: byte order, magic number, IFD 0 offset
        if input.len() < 8 {
            log::error!("TIFF file was too short to hold a header. len: `{}`", input.len());
            return Err(TiffConstructionError::HeaderCutShort {
                len: input.len() as u8,
            });
        }

        Ok(Self {
            exif: Arc::new(RwLock::new(Some(MaybeParsedExif::Raw(input.to_vec())))),
        })
    }
}

/// An error that can occur when constructing a [`Tiff`].
#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum TiffConstructionError {
    /// The input didn't begin with `II*\0` or `MM\0*`.
    NotTiff,

    /// The input ended before the 8-byte header did.
    HeaderCutShort { len: u8 },
}

impl core::fmt::Display for TiffConstructionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotTiff => f.write_str("Input isn't a TIFF file. It has no TIFF header."),
            Self::HeaderCutShort { len } => {
                write!(f, "TIFF header was cut short. expected: `8` bytes, got: `{len}`")
            }
        }
    }
}

impl core::error::Error for TiffConstructionError {}
