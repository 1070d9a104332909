//! Knobs for the Exif decoder.

/// What to do with an entry whose type code isn't one of the twelve TIFF
/// types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum UnknownTypePolicy {
    /// Keep the entry, storing its four value bytes as-is.
    ///
    /// Vendors occasionally use private type codes, so this is the default.
    #[default]
    Preserve,

    /// Fail the whole decode with
    /// [`ExifFatalError::UnsupportedType`][super::error::ExifFatalError::UnsupportedType].
    Reject,
}

/// What to do when a strip-based thumbnail's strip count disagrees with the
/// Exif strip formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StripCountPolicy {
    /// Extract the strips anyway and record the expected count next to them.
    #[default]
    Record,

    /// Fail the whole decode with
    /// [`ExifFatalError::StripCountMismatch`][super::error::ExifFatalError::StripCountMismatch].
    Strict,
}

/// Options for [`Exif::with_options`][super::Exif::with_options].
///
/// ```
/// use exifscope::exif::{ExifOptions, StripCountPolicy, UnknownTypePolicy};
///
/// let options = ExifOptions::default()
///     .with_unknown_types(UnknownTypePolicy::Reject)
///     .with_strip_count(StripCountPolicy::Strict);
///
/// assert_eq!(options.max_directories, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExifOptions {
    pub unknown_types: UnknownTypePolicy,
    pub strip_count: StripCountPolicy,

    /// The most directories a single blob may contain.
    ///
    /// Only five groups exist, so well-formed files never get close.
    pub max_directories: usize,
}

impl Default for ExifOptions {
    fn default() -> Self {
        Self {
            unknown_types: UnknownTypePolicy::default(),
            strip_count: StripCountPolicy::default(),
            max_directories: 16,
        }
    }
}

impl ExifOptions {
    pub fn with_unknown_types(mut self, policy: UnknownTypePolicy) -> Self {
        self.unknown_types = policy;
        self
    }

    pub fn with_strip_count(mut self, policy: StripCountPolicy) -> Self {
        self.strip_count = policy;
        self
    }

    pub fn with_max_directories(mut self, max: usize) -> Self {
        self.max_directories = max;
        self
    }
}
