//! # `exifscope`
//!
//! A library to decode Exif metadata, including the embedded thumbnail, from
//! TIFF and JPEG files.
//!
//! ## Usage
//!
//! If you already have a TIFF-structured Exif blob, use [`exif::Exif`]
//! directly:
//!
//! ```
//! use exifscope::exif::{Exif, IfdGroup};
//!
//! // a little-endian blob with an empty IFD 0
//! let blob = [b'I', b'I', 42, 0, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0];
//!
//! let exif = Exif::new(&blob).unwrap();
//! assert!(exif.ifd(IfdGroup::_0).is_some());
//! assert!(exif.thumbnail().is_none());
//! ```
//!
//! For whole files, use a provider from [`providers`], or let [`parse`] pick
//! one based on the file's magic number.
//!
//! ## Conformance
//!
//! The [`conformance`] module compares a decoded document against tag values
//! from another reader, and checks the thumbnail against its own tags.
//!
//! ## License
//!
//! This project is dual-licensed under either the Apache License 2.0 or the MIT License at your option.

#![forbid(unsafe_code)]

use std::sync::Arc;

use parking_lot::RwLock;

pub use crate::exif::{Exif, error::ExifFatalError};
pub use crate::magic_number::{AnyProvider, MagicNumber};

pub mod conformance;
pub mod exif;
pub mod magic_number;
pub mod providers;

/// Finds which kind of file `input` is, without parsing it.
///
/// See [`magic_number`] for more info.
pub fn get(input: &impl AsRef<[u8]>) -> Option<MagicNumber> {
    magic_number::get(input)
}

/// Finds which kind of file `input` is, then constructs its provider.
///
/// See [`magic_number`] for more info.
pub fn parse(input: &impl AsRef<[u8]>) -> Option<AnyProvider> {
    magic_number::parse(input)
}

/// A media file that may contain Exif metadata.
///
/// Each file format is a "provider" - it'll yield its metadata through parsing.
pub trait MetadataProvider:
    Clone + core::fmt::Debug + Sized + Send + Sync + MetadataProviderRaw
{
    /// An error that can occur when calling [`MetadataProvider::new`].
    type ConstructionError: Clone
        + core::fmt::Debug
        + PartialEq
        + PartialOrd
        + core::error::Error
        + Sized
        + Send
        + Sync;

    /// Checks whether `input` looks like this provider's file format.
    ///
    /// This only looks at the first few bytes.
    fn magic_number(input: &[u8]) -> bool;

    /// Finds the metadata in a media file.
    ///
    /// The Exif blob itself isn't decoded until [`MetadataProvider::exif`] is
    /// called.
    fn new(input: &impl AsRef<[u8]>)
    -> Result<Self, <Self as MetadataProvider>::ConstructionError>;

    /// Parses `self` to find any Exif metadata.
    ///
    /// This returns `None` if the file has no Exif metadata.
    ///
    /// The blob is only decoded once. Later calls return the cached result.
    ///
    /// # Errors
    ///
    /// This will return an error if the file's metadata is malformed or
    /// corrupted.
    fn exif(&self) -> Option<Result<Arc<RwLock<Exif>>, ExifFatalError>> {
        // these helpers are used under both the read and write locks, since
        // another thread may parse between them
        fn handle_already_parsed(
            p: &Wrapped<Exif>,
        ) -> Option<Result<Arc<RwLock<Exif>>, ExifFatalError>> {
            log::trace!("Cached Exif found! Returning...");
            Some(Ok(Arc::clone(&p.0)))
        }
        fn handle_none<A>() -> Option<A> {
            log::trace!("No Exif is present in this struct. Returning early.");
            None
        }

        match &*self.exif_raw().read() {
            Some(MaybeParsed::Raw(_)) => (),
            Some(MaybeParsed::Parsed(p)) => return handle_already_parsed(p),
            None => return handle_none(),
        }

        // raw, so decode it under the write lock
        let raw = self.exif_raw();
        let locked = &mut *raw.write();
        match locked {
            Some(MaybeParsed::Raw(r)) => match Exif::new(r.as_slice()) {
                Ok(p) => {
                    let wrapped: Wrapped<Exif> = Wrapped(Arc::new(RwLock::new(p)));
                    log::trace!("Completed Exif parsing! Cached internally.");
                    *locked = Some(MaybeParsed::Parsed(wrapped.clone()));
                    Some(Ok(wrapped.0))
                }

                // a broken blob is reported once, then treated as absent
                Err(e) => {
                    log::error!("Failed to parse Exif! err: {e}");
                    *locked = None;
                    Some(Err(e))
                }
            },

            Some(MaybeParsed::Parsed(p)) => handle_already_parsed(p),
            None => handle_none(),
        }
    }
}

/// Raw helpers for [`MetadataProvider`] implementors.
///
/// If you'd like the undecoded blob exactly as the file stored it, you can
/// use these methods instead!
pub trait MetadataProviderRaw {
    /// Returns the raw `Option<MaybeParsedExif>` stored inside the provider.
    ///
    /// Used primarily to implement the [`MetadataProvider::exif`] method
    /// easily.
    fn exif_raw(&self) -> Arc<RwLock<Option<MaybeParsedExif>>> {
        Arc::new(const { RwLock::new(None) })
    }
}

/// Metadata that might have been parsed already.
///
/// This type allows for caching metadata such that media files are not
/// reprocessed each additional time their parse methods are called.
///
/// ## Generics
///
/// - `R`: Raw
/// - `P`: Parsed
#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum MaybeParsed<R, P>
where
    R: Clone + core::fmt::Debug + PartialEq + PartialOrd + core::hash::Hash,
    P: Clone + core::fmt::Debug + PartialEq + PartialOrd + core::hash::Hash,
{
    /// Raw metadata that hasn't been processed.
    Raw(R),

    /// Metadata that's been parsed into its contents.
    Parsed(Wrapped<P>),
}

pub type MaybeParsedExif = MaybeParsed<Vec<u8>, Exif>;

/// A wrapper struct around decoded metadata.
///
/// These provide an easy derive for the [`MaybeParsed`] type above. It
/// should never be returned in non-raw interfaces.
#[derive(Clone, Debug)]
pub struct Wrapped<P: PartialEq + PartialOrd + core::hash::Hash>(
    /// The wrapped value.
    pub Arc<RwLock<P>>,
);

// compared by pointer, so two providers only match if they share a cache
impl<P: PartialEq + PartialOrd + core::hash::Hash> PartialEq for Wrapped<P> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl<P: PartialEq + PartialOrd + core::hash::Hash> PartialOrd for Wrapped<P> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        (Arc::as_ptr(&self.0)).partial_cmp(&(Arc::as_ptr(&other.0)))
    }
}
impl<P: PartialEq + PartialOrd + core::hash::Hash> core::hash::Hash for Wrapped<P> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

/// Internal utility methods.
pub(crate) mod util {
    /// Helper function to initialize the logger for testing.
    #[cfg(test)]
    pub fn logger() {
        _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::max())
            .format_file(true)
            .format_line_number(true)
            .try_init();
    }
}
