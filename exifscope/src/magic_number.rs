//! Picks a provider from a file's leading bytes.
//!
//! TIFF and JPEG files both announce themselves in their first few bytes, so
//! there's no need to know the format ahead of time.
//!
//! # Usage
//!
//! ```
//! use exifscope::magic_number::{AnyProvider, MagicNumber};
//!
//! // a big-endian TIFF file with an empty IFD 0
//! let some_media_you_loaded: &[u8] = &[b'M', b'M', 0, 42, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0];
//!
//! // `get` only looks at the magic number
//! let magic_num: Option<MagicNumber> = exifscope::get(&some_media_you_loaded);
//! assert_eq!(magic_num.unwrap(), MagicNumber::Tiff);
//!
//! // `parse` also constructs the matching provider
//! let maybe_parsed: Option<AnyProvider> = exifscope::parse(&some_media_you_loaded);
//! let parsed: AnyProvider = maybe_parsed.unwrap();
//! assert!(matches!(parsed, AnyProvider::Tiff(..)));
//!
//! // the constructors are shorthand for the same calls
//! assert_eq!(magic_num, MagicNumber::new(&some_media_you_loaded));
//! assert_eq!(
//!     parsed.magic_number(),
//!     AnyProvider::new(&some_media_you_loaded).unwrap().magic_number(),
//! );
//! ```

use crate::providers::{jpeg::Jpeg, tiff::Tiff};

/// Marks the providers listed in `generate!()`.
///
/// Only the macro implements this.
#[doc(hidden)]
#[diagnostic::on_unimplemented(
    message = "Please add this type to the `generate!()` macro in the `exifscope/src/magic_number.rs` file."
)]
pub trait _MagicNumberMarker {
    #[doc(hidden)]
    fn _do_not_implement_this_manually(self);
}

/// Builds the dispatch types for every listed provider.
///
/// - `MagicNumber`: which format a file is.
/// - `AnyProvider`: a provider of whichever format matched.
macro_rules! generate {
    ( $(
        $variant:ident => {
            provider_ty: $provider_ty:ty
        },
    )+) => {
        /// A file format recognized by its leading bytes.
        ///
        /// There's one per [`MetadataProvider`][`crate::MetadataProvider`].
        #[repr(u16)]
        #[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Hash)]
        pub enum MagicNumber {
            $($variant,)+
        }

        /// A provider for whichever format the file turned out to be.
        #[repr(u16)]
        #[derive(Clone, Debug)]
        pub enum AnyProvider {
            $($variant(
                Result<
                    $provider_ty,
                    <$provider_ty as $crate::MetadataProvider>::ConstructionError
                >),
            )+
        }

        impl MagicNumber {
            /// Identifies `input` by its leading bytes.
            #[inline(always)]
            pub fn new(input: &impl AsRef<[u8]>) -> Option<Self> {
                get(input)
            }
        }

        impl AnyProvider {
            /// Identifies `input`, then constructs its provider.
            ///
            /// Unknown formats and files whose container is broken give
            /// `None`.
            #[inline(always)]
            pub fn new(input: &impl AsRef<[u8]>) -> Option<Self> {
                parse(input)
            }

            /// Which format this provider handles.
            pub fn magic_number(&self) -> MagicNumber {
                match self {
                    $(Self::$variant(..) => MagicNumber::$variant,)+
                }
            }

            /// Decodes the inner provider's Exif. See
            /// [`MetadataProvider::exif`][`crate::MetadataProvider::exif`].
            pub fn exif(&self) -> Option<Result<std::sync::Arc<parking_lot::RwLock<crate::Exif>>, crate::ExifFatalError>> {
                match self {
                    $(
                        Self::$variant(maybe_inner) => {
                            let Ok(inner) = maybe_inner else {
                                ::log::error!("Provider failed to construct, so it has no Exif.");
                                return None;
                            };
                            <$provider_ty as $crate::MetadataProvider>::exif(inner)
                        },
                    )+
                }
            }
        }

        $(
            impl From<$provider_ty> for MagicNumber {
                fn from(_item: $provider_ty) -> Self {
                    Self::$variant
                }
            }

            impl From<$provider_ty> for AnyProvider {
                fn from(item: $provider_ty) -> Self {
                    Self::$variant(Ok(item))
                }
            }

            impl _MagicNumberMarker for $provider_ty {
                fn _do_not_implement_this_manually(self) {}
            }
        )+

        impl From<AnyProvider> for MagicNumber {
            fn from(item: AnyProvider) -> MagicNumber {
                item.magic_number()
            }
        }

        // backs `exifscope::parse`
        pub(super) fn parse(input: &impl AsRef<[u8]>) -> Option<AnyProvider> {
            let slice_input: &[u8] = input.as_ref();

            $(
                ::log::trace!("Trying `{}`...", core::any::type_name::<$provider_ty>());
                if <$provider_ty as $crate::MetadataProvider>::magic_number(slice_input) {
                    match <$provider_ty as $crate::MetadataProvider>::new(input) {
                        Ok(provider) => return Some(AnyProvider::from(provider)),
                        Err(e) => ::log::warn!("Magic number matched, but construction failed: {e}"),
                    }
                }
            )+

            ::log::trace!("No provider accepted the blob.");
            None
        }

        // backs `exifscope::get`
        pub(super) fn get(input: &impl AsRef<[u8]>) -> Option<MagicNumber> {
            let slice_input: &[u8] = input.as_ref();

            $(
                if <$provider_ty as $crate::MetadataProvider>::magic_number(slice_input) {
                    ::log::trace!("Blob is `{}`.", core::any::type_name::<$provider_ty>());
                    return Some(MagicNumber::$variant);
                }
            )+

            ::log::trace!("No magic number matched the blob.");
            None
        }
    };
}

generate!(
    Jpeg => { provider_ty: Jpeg },
    Tiff => { provider_ty: Tiff },
);
