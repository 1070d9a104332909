use std::sync::Arc;

use parking_lot::RwLock;
use winnow::{
    Parser,
    binary::{be_u16, u8},
    error::EmptyError,
    token::take,
};

use crate::MaybeParsedExif;

use super::{Jpeg, JpegConstructionError};

/// A marker code indicating that an APP1 marker is present.
const APP1_MARKER_CODE: u8 = 0xE1;

/// The first marker code, `SOI` (start of image).
const SOI_MARKER_CODE: u8 = 0xD8;

/// The last marker code, `EOI` (end of image).
const EOI_MARKER_CODE: u8 = 0xD9;

/// The start of scan code, `SOS`.
const SOS_MARKER_CODE: u8 = 0xDA;

/// The signature in front of an Exif blob in `APP1`.
const EXIF_SIG: &[u8] = b"Exif\0\0";

/// A part of a JPEG file.
enum Marker {
    /// A marker with no data.
    Standalone {
        /// An identifier for a marker.
        marker_code: u8,
    },

    /// A marker with a payload and length.
    Full {
        /// An identifier for a marker.
        marker_code: u8,

        /// The length of the marker's payload.
        ///
        /// This value does NOT include the two length bytes.
        len: u16,
    },
}

/// Checks for the `SOI` marker at the start of the file.
pub fn magic_number(input: &[u8]) -> bool {
    input.starts_with(&[0xFF, SOI_MARKER_CODE])
}

/// Attempts to parse a JPEG file.
pub fn parse(input: &[u8]) -> Result<Jpeg, JpegConstructionError> {
    let input: &mut &[u8] = &mut &*input;

    // take first marker, which should be `SOI`
    match marker(input)? {
        Marker::Standalone { marker_code } if marker_code == SOI_MARKER_CODE => (),
        Marker::Standalone { marker_code } | Marker::Full { marker_code, .. } => {
            log::error!(
                "The first marker of a JPEG file should be `SOI`, \
                but it wasn't! \
                got: `{marker_code:x?}`"
            );
            return Err(JpegConstructionError::FirstMarkerWasNotSoi { marker_code });
        }
    };

    let mut exif: Option<MaybeParsedExif> = None;

    // loop until the end of the file.
    while !input.is_empty() {
        let marker: Marker = marker(input)?;

        match marker {
            // handle end of image
            Marker::Standalone { marker_code } if marker_code == EOI_MARKER_CODE => {
                log::trace!("EOI detected! Stopping loop.");
                break;
            }

            // skip other standalone markers
            Marker::Standalone { marker_code } => {
                // note: we don't actually skip anything since we've already
                // consumed the marker code bytes
                log::trace!("Got standalone marker with code `{marker_code:x?}`. Skipping...");
            }

            // `SOS` is followed by entropy-coded data with no length, so we
            // consume bytes until we reach the next real marker.
            Marker::Full { marker_code, len } if marker_code == SOS_MARKER_CODE => {
                // the SOS header itself does have a length
                take(len as usize)
                    .void()
                    .parse_next(input)
                    .map_err(|_: EmptyError| JpegConstructionError::OuttaDataForSos)?;

                skip_scan_data(input)?;
            }

            // check "full" markers to see if it's a marker we care abt
            Marker::Full { marker_code, len } => {
                log::trace!("Got full marker! code: `{marker_code:x?}`, len: `{len}`");

                let remaining_input_len: u64 = input.len() as u64;
                let payload: &[u8] = take(len as usize)
                    .parse_next(input)
                    .map_err(|_: EmptyError| {
                        log::error!(
                            "Attempted to parse payload from JPEG marker, \
                            but ran out of data. \
                            marker code: `{marker_code:x?}`, len: `{len}` bytes, \
                            remaining input len: `{remaining_input_len}` bytes"
                        );
                        JpegConstructionError::NoDataForPayload {
                            marker_code,
                            original_len: len,
                            remaining_input_len,
                        }
                    })?;

                // APP1 may hold Exif (or other stuff, like XMP)
                if marker_code != APP1_MARKER_CODE {
                    continue;
                }

                let Some(blob) = payload.strip_prefix(EXIF_SIG) else {
                    log::trace!("APP1 segment wasn't Exif. Skipping...");
                    continue;
                };

                log::trace!("Found Exif in JPEG!");
                if exif.is_none() {
                    exif = Some(MaybeParsedExif::Raw(blob.to_vec()));
                } else {
                    log::warn!("Found more than one Exif payload in JPEG...");
                }
            }
        }
    }

    Ok(Jpeg {
        exif: Arc::new(RwLock::new(exif)),
    })
}

/// Consumes entropy-coded scan data, stopping right before the next marker.
fn skip_scan_data(input: &mut &[u8]) -> Result<(), JpegConstructionError> {
    loop {
        // grab the next two tokens
        let (_, (a, b)): (_, (u8, u8)) = (u8, u8).parse_peek(*input).map_err(|_: EmptyError| {
            log::error!("No more tokens in SOS. Can't get tokens.");
            JpegConstructionError::OuttaDataForSos
        })?;

        // a stuffed `0xFF 0x00` or a restart marker means the scan continues
        let in_scan = a != 0xFF || b == 0x00 || (0xD0..=0xD7).contains(&b);
        if !in_scan {
            // otherwise, it's a new marker!
            return Ok(());
        }

        if a == 0xFF && (0xD0..=0xD7).contains(&b) {
            log::trace!("Hit restart marker! Continuing...");
        }

        u8.void()
            .parse_next(input)
            .map_err(|_: EmptyError| JpegConstructionError::OuttaDataForSos)?;
    }
}

/// Tries to parse out a [`Marker`].
fn marker(input: &mut &[u8]) -> Result<Marker, JpegConstructionError> {
    // each marker must begin with one `0xFF` byte.
    //
    // let's see if that happened...
    let first_marker_byte: u8 = u8.parse_next(input).map_err(|_: EmptyError| {
        log::error!("Failed to get first marker byte!");
        JpegConstructionError::NoMarkerCode
    })?;
    if first_marker_byte != 0xFF {
        log::error!("JPEG marker's first byte was wrong.");
        return Err(JpegConstructionError::FirstMarkerByteWasWrong(first_marker_byte));
    }

    // a marker may have any number of `0xFF`/255 bytes before its code.
    //
    // try to find its code
    let marker_code: u8 = loop {
        let k: u8 = u8.parse_next(input).map_err(|_: EmptyError| {
            log::error!("Failed to parse out marker byte!");
            JpegConstructionError::NoMarkerCode
        })?;

        if k != 0xFF {
            break k;
        }
    };

    // then, parse the code
    if marker_code == 0 {
        log::error!("This JPEG marker byte was `0`, but that value is disallowed.");
        return Err(JpegConstructionError::MarkerCodeDisallowed(marker_code));
    }

    // some markers are "standalone" markers and don't have any payload (or
    // the length of that payload).
    //
    // for that reason, early return if we encounter one...
    const STANDALONE_MARKERS: &[u8] = &[
        0xD0, 0xD1, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0x01,
    ];
    if STANDALONE_MARKERS.contains(&marker_code) {
        return Ok(Marker::Standalone { marker_code });
    }

    // alright, we've taken care of any standalone markers.
    //
    // let's check the length of the payload, then return
    let original_len: u16 = be_u16.parse_next(input).map_err(|_: EmptyError| {
        log::error!("Failed to find `u16` length byte pair when parsing marker.");
        JpegConstructionError::NoLength { marker_code }
    })?;

    // subtract 2 bytes from that (b/c the length includes its own bytes)
    let len: u16 =
        original_len
            .checked_sub(2_u16)
            .ok_or(JpegConstructionError::NegativeLength {
                marker_code,
                original_len,
            })?;

    Ok(Marker::Full { marker_code, len })
}
