//! # Providers
//!
//! Providers represent a source of metadata, such as a media file format.
//! Each one finds the Exif blob inside its file.
//!
//! Each provider has a struct with a `MetadataProvider` implementation. This
//! allows a consistent interface for obtaining metadata from different media
//! sources.

pub mod jpeg;
pub mod tiff;
