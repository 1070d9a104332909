//! Checks a decoded [`Exif`] against values from another source.
//!
//! The ground truth is usually produced by another Exif reader. For each IFD,
//! it maps tag IDs to the canonical rendering of their values (see
//! [`Field::value_to_string`][crate::exif::Field::value_to_string]).
//!
//! ```
//! use exifscope::{conformance::{self, GroundTruth}, exif::{Exif, IfdGroup}};
//! use rustc_hash::FxHashMap;
//!
//! // a blob with an empty IFD 0
//! let blob = [b'I', b'I', 42, 0, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0];
//! let exif = Exif::new(&blob).unwrap();
//!
//! let mut truth: FxHashMap<IfdGroup, GroundTruth> = FxHashMap::default();
//! truth.insert(IfdGroup::_0, GroundTruth::default());
//!
//! assert_eq!(conformance::check(&exif, &truth), Ok(()));
//! ```

use rustc_hash::FxHashMap;

use crate::exif::{
    Exif, Ifd, IfdGroup, Thumbnail,
    thumbnail::{
        IMAGE_LENGTH, JPEG_INTERCHANGE_FORMAT_LENGTH, PLANAR_CONFIGURATION, PlanarConfiguration,
        ROWS_PER_STRIP, SAMPLES_PER_PIXEL, STRIP_BYTE_COUNTS, expected_strip_count,
    },
};

/// Expected renderings for one IFD, keyed by tag ID.
pub type GroundTruth = FxHashMap<u16, String>;

/// A way in which a decoded document differs from what was expected.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConformanceError {
    /// A tag was decoded, but the ground truth doesn't have it.
    UnexpectedTag { group: IfdGroup, tag: u16 },

    /// The ground truth has a tag that wasn't decoded.
    MissingTag { group: IfdGroup, tag: u16 },

    /// Both sides have the tag, but render it differently.
    ValueMismatch {
        group: IfdGroup,
        tag: u16,
        expected: String,
        got: String,
    },

    /// A compressed thumbnail's length disagrees with
    /// `JPEGInterchangeFormatLength`.
    CompressedLength { expected: Option<u32>, got: usize },

    /// The strip count disagrees with the Exif strip formula.
    StripCount { expected: Option<u64>, got: usize },

    /// A strip's length disagrees with its `StripByteCounts` entry.
    StripLength {
        index: usize,
        expected: Option<u32>,
        got: usize,
    },
}

impl core::fmt::Display for ConformanceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnexpectedTag { group, tag } => {
                write!(f, "Decoded tag `{tag:#06x}` in the {group} isn't in the ground truth.")
            }
            Self::MissingTag { group, tag } => {
                write!(f, "Expected tag `{tag:#06x}` in the {group}, but it wasn't decoded.")
            }
            Self::ValueMismatch {
                group,
                tag,
                expected,
                got,
            } => write!(
                f,
                "Tag `{tag:#06x}` in the {group} rendered as `{got}`, but `{expected}` was expected."
            ),
            Self::CompressedLength { expected, got } => write!(
                f,
                "Compressed thumbnail is `{got}` bytes long, but its length tag says `{expected:?}`."
            ),
            Self::StripCount { expected, got } => {
                write!(f, "Thumbnail has `{got}` strips, but its tags call for `{expected:?}`.")
            }
            Self::StripLength {
                index,
                expected,
                got,
            } => write!(
                f,
                "Strip #{index} is `{got}` bytes long, but its byte count says `{expected:?}`."
            ),
        }
    }
}

impl core::error::Error for ConformanceError {}

/// Compares one decoded IFD against its ground truth.
///
/// Sub-IFD pointer tags are skipped, since their values are just offsets. An
/// absent IFD matches an empty ground truth.
pub fn check_ifd(
    group: IfdGroup,
    ifd: Option<&Ifd>,
    truth: &GroundTruth,
) -> Result<(), ConformanceError> {
    let fields = ifd.map(Ifd::fields).unwrap_or_default();
    let decoded = fields
        .iter()
        .filter(|f| !IfdGroup::is_sub_ifd_pointer(f.tag_id()));

    for field in decoded.clone() {
        let tag = field.tag_id();
        let Some(expected) = truth.get(&tag) else {
            log::error!("Decoded tag `{tag:#06x}` in the {group} isn't in the ground truth.");
            return Err(ConformanceError::UnexpectedTag { group, tag });
        };

        let got = field.value_to_string();
        if got != expected.trim() {
            log::error!("Tag `{tag:#06x}` in the {group} didn't match. got: `{got}`");
            return Err(ConformanceError::ValueMismatch {
                group,
                tag,
                expected: expected.clone(),
                got,
            });
        }
    }

    // anything left in the truth that we didn't decode?
    let mut missing: Vec<u16> = truth
        .keys()
        .copied()
        .filter(|tag| !IfdGroup::is_sub_ifd_pointer(*tag))
        .filter(|tag| !decoded.clone().any(|f| f.tag_id() == *tag))
        .collect();
    missing.sort_unstable();

    match missing.first() {
        Some(&tag) => {
            log::error!("Expected tag `{tag:#06x}` in the {group}, but it wasn't decoded.");
            Err(ConformanceError::MissingTag { group, tag })
        }
        None => Ok(()),
    }
}

/// Checks that the thumbnail agrees with IFD 1's tags.
///
/// Compressed thumbnails must be as long as `JPEGInterchangeFormatLength`
/// says. Strip thumbnails must have as many strips as the Exif formula
/// expects, and each strip must be as long as its `StripByteCounts` entry.
pub fn check_thumbnail(exif: &Exif) -> Result<(), ConformanceError> {
    let (Some(thumbnail), Some(ifd1)) = (exif.thumbnail(), exif.ifd(IfdGroup::_1)) else {
        log::trace!("No thumbnail to check.");
        return Ok(());
    };

    let unsigned = |tag: u16| ifd1.get(tag).and_then(|f| f.unsigned(0));

    match thumbnail {
        Thumbnail::Compressed(jpeg) => {
            let expected = unsigned(JPEG_INTERCHANGE_FORMAT_LENGTH);
            if expected != Some(jpeg.len() as u32) {
                log::error!("Compressed thumbnail length is off. got: `{}`", jpeg.len());
                return Err(ConformanceError::CompressedLength {
                    expected,
                    got: jpeg.len(),
                });
            }
        }

        Thumbnail::Strips(strips) => {
            let planar = unsigned(PLANAR_CONFIGURATION)
                .map(PlanarConfiguration::from)
                .unwrap_or_default();
            let samples = unsigned(SAMPLES_PER_PIXEL).unwrap_or(1);

            let expected = unsigned(IMAGE_LENGTH).and_then(|image_length| {
                expected_strip_count(
                    image_length,
                    unsigned(ROWS_PER_STRIP).unwrap_or(u32::MAX),
                    planar,
                    u16::try_from(samples).ok()?,
                )
            });

            if expected != Some(strips.len() as u64) {
                log::error!("Strip count is off. got: `{}`", strips.len());
                return Err(ConformanceError::StripCount {
                    expected,
                    got: strips.len(),
                });
            }

            let byte_counts = ifd1.get(STRIP_BYTE_COUNTS);
            for (index, strip) in strips.iter().enumerate() {
                let expected = byte_counts.and_then(|f| f.unsigned(index));
                if expected != Some(strip.len() as u32) {
                    log::error!("Strip #{index} length is off. got: `{}`", strip.len());
                    return Err(ConformanceError::StripLength {
                        index,
                        expected,
                        got: strip.len(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Runs every check: each IFD group against `truth` (groups missing from
/// `truth` must be absent or empty), then the thumbnail.
pub fn check(
    exif: &Exif,
    truth: &FxHashMap<IfdGroup, GroundTruth>,
) -> Result<(), ConformanceError> {
    let empty = GroundTruth::default();

    for group in IfdGroup::ALL {
        check_ifd(group, exif.ifd(group), truth.get(&group).unwrap_or(&empty))?;
    }

    check_thumbnail(exif)
}
