//! The thumbnail described by IFD 1.
//!
//! Exif thumbnails come in two layouts. Compressed ones are a single JPEG
//! stream, found through `JPEGInterchangeFormat` and its length tag.
//! Uncompressed ones are stored as strips, like a regular TIFF image.

use super::{
    ExifOptions, StripCountPolicy,
    error::{ExifFatalError, ExifFatalResult},
    ifd::Ifd,
};
use exifscope_types::exif::Field;

pub(crate) const COMPRESSION: u16 = 0x0103;
pub(crate) const IMAGE_LENGTH: u16 = 0x0101;
pub(crate) const STRIP_OFFSETS: u16 = 0x0111;
pub(crate) const SAMPLES_PER_PIXEL: u16 = 0x0115;
pub(crate) const ROWS_PER_STRIP: u16 = 0x0116;
pub(crate) const STRIP_BYTE_COUNTS: u16 = 0x0117;
pub(crate) const PLANAR_CONFIGURATION: u16 = 0x011C;
pub(crate) const JPEG_INTERCHANGE_FORMAT: u16 = 0x0201;
pub(crate) const JPEG_INTERCHANGE_FORMAT_LENGTH: u16 = 0x0202;

/// `Compression` value for JPEG.
pub(crate) const JPEG_COMPRESSION: u32 = 6;

/// The thumbnail image stored alongside the Exif metadata.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Hash)]
pub enum Thumbnail {
    /// One compressed (JPEG) stream.
    Compressed(Vec<u8>),

    /// Uncompressed image data, in strips.
    Strips(Strips),
}

impl Thumbnail {
    /// The thumbnail's bytes, no matter the layout.
    ///
    /// Strips are joined in order.
    pub fn bytes(&self) -> Vec<u8> {
        match self {
            Self::Compressed(jpeg) => jpeg.clone(),
            Self::Strips(strips) => strips.iter().flatten().copied().collect(),
        }
    }
}

/// The strips of an uncompressed thumbnail.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Hash)]
pub struct Strips {
    strips: Vec<Vec<u8>>,
    expected_count: u64,
}

impl Strips {
    /// How many strips were actually extracted.
    pub fn len(&self) -> usize {
        self.strips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strips.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.strips.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.strips.iter().map(Vec::as_slice)
    }

    /// How many strips IFD 1's tags say there should be.
    ///
    /// See [`expected_strip_count`].
    pub fn expected_count(&self) -> u64 {
        self.expected_count
    }

    /// Whether the strip count matches [`Strips::expected_count`].
    pub fn conforms(&self) -> bool {
        self.strips.len() as u64 == self.expected_count
    }
}

/// How an image's components are stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlanarConfiguration {
    /// Components are interleaved (`RGBRGB...`).
    #[default]
    Chunky = 1,

    /// Each component gets its own plane (`RR... GG... BB...`).
    Separate = 2,
}

impl From<u32> for PlanarConfiguration {
    fn from(value: u32) -> Self {
        match value {
            1 => Self::Chunky,
            2 => Self::Separate,
            other => {
                log::warn!("Unknown planar configuration `{other}`. Treating as chunky.");
                Self::Chunky
            }
        }
    }
}

/// Computes how many strips an image should be stored in.
///
/// Each plane takes `ceil(image_length / rows_per_strip)` strips. Chunky
/// images have one plane, while separate images have one per sample.
///
/// Returns `None` if `rows_per_strip` is zero.
///
/// ```
/// use exifscope::exif::thumbnail::{PlanarConfiguration, expected_strip_count};
///
/// assert_eq!(expected_strip_count(100, 30, PlanarConfiguration::Chunky, 3), Some(4));
/// assert_eq!(expected_strip_count(100, 30, PlanarConfiguration::Separate, 3), Some(12));
/// assert_eq!(expected_strip_count(100, 0, PlanarConfiguration::Chunky, 1), None);
/// ```
pub fn expected_strip_count(
    image_length: u32,
    rows_per_strip: u32,
    planar: PlanarConfiguration,
    samples_per_pixel: u16,
) -> Option<u64> {
    if rows_per_strip == 0 {
        return None;
    }

    let per_plane = (image_length as u64).div_ceil(rows_per_strip as u64);
    Some(match planar {
        PlanarConfiguration::Chunky => per_plane,
        PlanarConfiguration::Separate => per_plane * samples_per_pixel as u64,
    })
}

/// Grabs a field that the thumbnail can't be found without.
fn required(ifd: &Ifd, tag: u16) -> ExifFatalResult<&Field> {
    ifd.get(tag).ok_or_else(|| {
        log::error!("IFD1 is missing thumbnail tag `{tag:#06x}`.");
        ExifFatalError::MissingTag { tag }
    })
}

/// Grabs the first value of a required unsigned field.
fn required_unsigned(ifd: &Ifd, tag: u16) -> ExifFatalResult<u32> {
    required(ifd, tag)?.unsigned(0).ok_or_else(|| {
        log::error!("Thumbnail tag `{tag:#06x}` didn't hold an unsigned integer.");
        ExifFatalError::MissingTag { tag }
    })
}

/// Slices `len` bytes at `offset` out of the blob.
fn slice(blob: &[u8], offset: u32, len: u32) -> ExifFatalResult<&[u8]> {
    let start = offset as usize;
    match start.checked_add(len as usize) {
        Some(end) if end <= blob.len() => Ok(&blob[start..end]),
        _ => {
            log::error!(
                "Thumbnail data runs past the blob. offset: `{offset}`, len: `{len}`, blob len: `{}`",
                blob.len()
            );
            Err(ExifFatalError::ThumbnailOutOfBounds { offset, len })
        }
    }
}

/// Finds and extracts the thumbnail described by IFD 1.
///
/// An IFD 1 that doesn't describe any image data yields `None`.
pub(crate) fn resolve(
    ifd: &Ifd,
    blob: &[u8],
    options: &ExifOptions,
) -> ExifFatalResult<Option<Thumbnail>> {
    let compression: Option<u32> = ifd.get(COMPRESSION).and_then(|f| f.unsigned(0));
    let has_jpeg_pointer = ifd.get(JPEG_INTERCHANGE_FORMAT).is_some();
    let has_strips = ifd.get(STRIP_OFFSETS).is_some();

    let compressed = match compression {
        Some(c) => c == JPEG_COMPRESSION,
        None if has_jpeg_pointer => true,
        None if has_strips => false,
        None => {
            log::trace!("IFD1 doesn't describe any thumbnail data.");
            return Ok(None);
        }
    };

    if compressed {
        let offset = required_unsigned(ifd, JPEG_INTERCHANGE_FORMAT)?;
        let len = required_unsigned(ifd, JPEG_INTERCHANGE_FORMAT_LENGTH)?;
        log::trace!("Found compressed thumbnail. offset: `{offset}`, len: `{len}`");

        return Ok(Some(Thumbnail::Compressed(
            slice(blob, offset, len)?.to_vec(),
        )));
    }

    resolve_strips(ifd, blob, options).map(|s| Some(Thumbnail::Strips(s)))
}

fn resolve_strips(ifd: &Ifd, blob: &[u8], options: &ExifOptions) -> ExifFatalResult<Strips> {
    let image_length = required_unsigned(ifd, IMAGE_LENGTH)?;

    // a missing `RowsPerStrip` means "the whole image is one strip"
    let rows_per_strip = ifd
        .get(ROWS_PER_STRIP)
        .and_then(|f| f.unsigned(0))
        .unwrap_or(u32::MAX);

    let planar = ifd
        .get(PLANAR_CONFIGURATION)
        .and_then(|f| f.unsigned(0))
        .map(PlanarConfiguration::from)
        .unwrap_or_default();

    let samples_per_pixel = match planar {
        PlanarConfiguration::Chunky => 1_u16,
        PlanarConfiguration::Separate => {
            let samples = required_unsigned(ifd, SAMPLES_PER_PIXEL)?;
            u16::try_from(samples).map_err(|_| {
                log::error!("`SamplesPerPixel` was too large: `{samples}`");
                ExifFatalError::InvalidTagValue {
                    tag: SAMPLES_PER_PIXEL,
                    value: samples,
                }
            })?
        }
    };

    let expected_count = expected_strip_count(
        image_length,
        rows_per_strip,
        planar,
        samples_per_pixel,
    )
    .ok_or_else(|| {
        log::error!("`RowsPerStrip` was zero!");
        ExifFatalError::InvalidTagValue {
            tag: ROWS_PER_STRIP,
            value: 0,
        }
    })?;

    let offsets = required(ifd, STRIP_OFFSETS)?;
    let byte_counts = required(ifd, STRIP_BYTE_COUNTS)?;
    let actual_count = offsets.count();

    if actual_count as u64 != expected_count {
        match options.strip_count {
            StripCountPolicy::Strict => {
                log::error!(
                    "Thumbnail has `{actual_count}` strips, but `{expected_count}` were expected."
                );
                return Err(ExifFatalError::StripCountMismatch {
                    expected: expected_count,
                    got: actual_count,
                });
            }
            StripCountPolicy::Record => log::warn!(
                "Thumbnail has `{actual_count}` strips, but `{expected_count}` were expected. \
                Extracting them anyway."
            ),
        }
    }

    if byte_counts.count() < actual_count {
        log::error!(
            "`StripByteCounts` has `{}` entries, but there are `{actual_count}` strips.",
            byte_counts.count()
        );
        return Err(ExifFatalError::InvalidTagValue {
            tag: STRIP_BYTE_COUNTS,
            value: byte_counts.count(),
        });
    }

    let mut strips = Vec::with_capacity(actual_count as usize);
    for i in 0..actual_count as usize {
        let offset = offsets.unsigned(i).ok_or_else(|| {
            log::error!("Strip offset #{i} wasn't an unsigned integer.");
            ExifFatalError::MissingTag { tag: STRIP_OFFSETS }
        })?;
        let len = byte_counts.unsigned(i).ok_or_else(|| {
            log::error!("Strip byte count #{i} wasn't an unsigned integer.");
            ExifFatalError::MissingTag {
                tag: STRIP_BYTE_COUNTS,
            }
        })?;

        log::trace!("Strip #{i}: offset `{offset}`, len `{len}`");
        strips.push(slice(blob, offset, len)?.to_vec());
    }

    Ok(Strips {
        strips,
        expected_count,
    })
}
