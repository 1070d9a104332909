use exifscope_types::exif::ifd::IfdGroup;

/// This type describes the parsing result.
///
/// If it's the `Err` variant, the parsing failed completely, and you aren't
/// getting any Exif data at all. Offsets in Exif depend on each other, so a
/// partially-parsed document can't be trusted.
pub type ExifFatalResult<T> = Result<T, ExifFatalError>;

/// The broad category of an [`ExifFatalError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExifErrorKind {
    /// The header was wrong: bad byte-order marker, magic number, or first
    /// IFD offset.
    InvalidFormat,

    /// An offset or length ran past the end of the blob.
    TruncatedData,

    /// A tag needed to locate the thumbnail was absent.
    MissingTag,

    /// An entry used a type code we don't know, and we were asked to reject
    /// those.
    UnsupportedType,

    /// The directory chain revisited an offset.
    CyclicDirectory,

    /// The thumbnail's strip count didn't match the Exif formula, and we were
    /// asked to treat that as fatal.
    StripCountMismatch,

    /// Reading the input failed before parsing began.
    Io,
}

#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum ExifFatalError {
    //
    // header
    /// The input was too short to provide a byte order marker.
    NoByteOrderMarker { len: u8 },

    /// The byte order marker was weird - it's not one of the two expected
    /// values (in ASCII, should be either `II` or `MM`).
    WeirdByteOrderMarker { found: [u8; 2] },

    /// Didn't find the TIFF magic number.
    NoTiffMagicNumber,

    /// The magic number indexes had a weird value. It's not TIFF's.
    MagicNumberWasntTiff { found: u16 },

    /// No TIFF header offset was found.
    NoTiffHeaderOffset,

    /// The header offset would place us before the header! That doesn't make
    /// any sense, so we can't keep parsing.
    HeaderOffsetBeforeHeader { offset: u32 },

    /// The header offset is past the end of the blob.
    NotEnoughDataForHeaderOffset { offset: u32, len: usize },

    //
    // directories
    /// A directory's offset is outside the blob.
    IfdOffsetOutOfBounds { group: IfdGroup, offset: u32 },

    /// The IFD didn't say how many entries it has.
    IfdNoEntryCount { group: IfdGroup },

    /// The IFD's entries (or its next-IFD pointer) run past the blob's end.
    IfdEntriesOutOfBounds { group: IfdGroup, entry_count: u16 },

    /// An entry in the IFD was cut short by the end of the blob.
    EntryCutShort { group: IfdGroup },

    /// A directory offset was visited twice.
    CyclicDirectory { group: IfdGroup, offset: u32 },

    /// More directories than [`super::ExifOptions::max_directories`] were
    /// found.
    TooManyDirectories { max: usize },

    //
    // fields
    /// A field's value lies (partly) outside the blob.
    ValueOutOfBounds { tag: u16, offset: u32, len: u64 },

    /// Couldn't parse a primitive from a field's value bytes.
    OuttaData { tag: u16 },

    /// A field used a type code we don't know.
    UnsupportedType { tag: u16, got: u16 },

    //
    // thumbnail
    /// A tag required to find the thumbnail is missing from IFD 1.
    MissingTag { tag: u16 },

    /// A thumbnail tag had a value we can't use.
    InvalidTagValue { tag: u16, value: u32 },

    /// A thumbnail byte range lies (partly) outside the blob.
    ThumbnailOutOfBounds { offset: u32, len: u32 },

    /// The strip count doesn't match what the Exif formula expects.
    StripCountMismatch { expected: u64, got: u32 },

    //
    // input
    /// Reading the input into memory failed.
    Io { kind: std::io::ErrorKind },
}

impl ExifFatalError {
    /// Which broad category this error falls into.
    pub fn kind(&self) -> ExifErrorKind {
        match self {
            Self::NoByteOrderMarker { .. }
            | Self::WeirdByteOrderMarker { .. }
            | Self::NoTiffMagicNumber
            | Self::MagicNumberWasntTiff { .. }
            | Self::NoTiffHeaderOffset
            | Self::HeaderOffsetBeforeHeader { .. }
            | Self::InvalidTagValue { .. } => ExifErrorKind::InvalidFormat,

            Self::NotEnoughDataForHeaderOffset { .. }
            | Self::IfdOffsetOutOfBounds { .. }
            | Self::IfdNoEntryCount { .. }
            | Self::IfdEntriesOutOfBounds { .. }
            | Self::EntryCutShort { .. }
            | Self::ValueOutOfBounds { .. }
            | Self::OuttaData { .. }
            | Self::ThumbnailOutOfBounds { .. } => ExifErrorKind::TruncatedData,

            Self::CyclicDirectory { .. } | Self::TooManyDirectories { .. } => {
                ExifErrorKind::CyclicDirectory
            }

            Self::UnsupportedType { .. } => ExifErrorKind::UnsupportedType,
            Self::MissingTag { .. } => ExifErrorKind::MissingTag,
            Self::StripCountMismatch { .. } => ExifErrorKind::StripCountMismatch,
            Self::Io { .. } => ExifErrorKind::Io,
        }
    }
}

impl From<std::io::Error> for ExifFatalError {
    fn from(value: std::io::Error) -> Self {
        Self::Io { kind: value.kind() }
    }
}

impl core::fmt::Display for ExifFatalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoByteOrderMarker { len } => {
                write!(f, "No byte order marker was found. len: `{len}`")
            }
            Self::WeirdByteOrderMarker { found } => match core::str::from_utf8(found.as_slice()) {
                Ok(found_utf8_bom) => {
                    write!(f, "Got a weird byte-order marker: `{found_utf8_bom}`")
                }
                Err(_) => write!(f, "Got a weird byte-order marker - wasn't ASCII: {found:?}"),
            },
            Self::NoTiffMagicNumber => {
                f.write_str("No TIFF magic number found - the slice was likely cut short.")
            }
            Self::MagicNumberWasntTiff { found } => {
                write!(f, "Magic number was not TIFF! got: `{found}`")
            }
            Self::NoTiffHeaderOffset => f.write_str("No TIFF header offset was found."),
            Self::HeaderOffsetBeforeHeader { offset } => write!(
                f,
                "TIFF header offset asked us to move before the end of the header. \
                Likely a broken file - cannot continue parsing. offset: `{offset}`"
            ),
            Self::NotEnoughDataForHeaderOffset { offset, len } => write!(
                f,
                "Not enough data to skip to TIFF header offset. \
                offset: `{offset}`, blob len: `{len}`"
            ),

            Self::IfdOffsetOutOfBounds { group, offset } => {
                write!(f, "The {group} was said to start outside the blob. offset: `{offset}`")
            }
            Self::IfdNoEntryCount { group } => {
                write!(f, "The {group} didn't say how many entries it has.")
            }
            Self::IfdEntriesOutOfBounds { group, entry_count } => write!(
                f,
                "The {group} claims `{entry_count}` entries, but the blob ends before them."
            ),
            Self::EntryCutShort { group } => {
                write!(f, "An entry in the {group} was cut short by the end of the blob.")
            }
            Self::CyclicDirectory { group, offset } => {
                write!(f, "The {group} points back to an already-visited offset: `{offset}`")
            }
            Self::TooManyDirectories { max } => {
                write!(f, "Found more than `{max}` directories. Refusing to continue.")
            }

            Self::ValueOutOfBounds { tag, offset, len } => write!(
                f,
                "Value of tag `{tag:#06x}` lies outside the blob. \
                offset: `{offset}`, len: `{len}`"
            ),
            Self::OuttaData { tag } => {
                write!(f, "Couldn't parse primitive - no more data for tag `{tag:#06x}`.")
            }
            Self::UnsupportedType { tag, got } => {
                write!(f, "Encountered an unknown type while parsing tag `{tag:#06x}`! got: {got}")
            }

            Self::MissingTag { tag } => {
                write!(f, "The thumbnail IFD is missing required tag `{tag:#06x}`.")
            }
            Self::InvalidTagValue { tag, value } => {
                write!(f, "Thumbnail tag `{tag:#06x}` had an unusable value: `{value}`")
            }
            Self::ThumbnailOutOfBounds { offset, len } => {
                write!(f, "Thumbnail data lies outside the blob. offset: `{offset}`, len: `{len}`")
            }
            Self::StripCountMismatch { expected, got } => {
                write!(f, "Thumbnail has `{got}` strips, but its tags call for `{expected}`.")
            }

            Self::Io { kind } => write!(f, "Failed to read Exif input. kind: `{kind}`"),
        }
    }
}

impl core::error::Error for ExifFatalError {}
