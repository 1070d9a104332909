//! # `exifscope_types`
//!
//! Plain data types for `exifscope`: primitives, decoded fields, IFD groups,
//! and the table of known Exif tags.
//!
//! These have no parsing logic of their own, so callers that only need to
//! inspect decoded metadata can depend on this crate alone.

#![forbid(unsafe_code)]

pub mod exif;
