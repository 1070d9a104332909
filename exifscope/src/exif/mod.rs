//! Exif is a media metadata format primarily used by cameras.
//!
//! It's a structured binary format built on TIFF. A blob starts with a small
//! header (byte order, magic number, and the offset of the first IFD), then
//! holds a web of IFDs (Image File Directories) that point at each other.
//!
//! Each field on an IFD contains a tag ID, primitive data type, and count
//! saying how many primitives are stored. That makes the format somewhat
//! self-describing! Proprietary fields can be read without knowing what
//! they mean, though they usually use the opaque (`Undefined`) type.
//!
//! IFD 1 may also describe a small thumbnail image. See [`thumbnail`].

pub use exifscope_types::exif::{
    Endianness, Field, FieldData, FieldTag, ifd::IfdGroup, primitives::*,
};

pub use self::{
    ifd::Ifd,
    options::{ExifOptions, StripCountPolicy, UnknownTypePolicy},
    thumbnail::{Strips, Thumbnail},
};

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use winnow::{
    Parser as _, Stateful,
    binary::{Endianness as WinnowEndianness, u16, u32},
    error::EmptyError,
    token::take,
};

use self::{
    error::{ExifFatalError, ExifFatalResult},
    ifd::parse_ifd,
};

pub mod error;
mod ifd;
mod options;
pub mod thumbnail;
mod value;

/// Extracted information from an Exif metadata block.
///
/// Decoding is all-or-nothing: you either get a whole `Exif`, or an error.
/// Sub-IFDs and the thumbnail are optional, though, so they may be absent.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Hash)]
pub struct Exif {
    /// The endianness of the Exif block.
    pub endianness: Endianness,

    /// The IFDs found in the blob, indexed by [`IfdGroup::index`].
    ifds: [Option<Ifd>; IfdGroup::COUNT],

    thumbnail: Option<Thumbnail>,
}

impl Exif {
    /// Parses the given Exif blob into our `Exif` structure.
    ///
    /// The blob must start with the TIFF header (`II` or `MM`).
    pub fn new(blob: &[u8]) -> ExifFatalResult<Self> {
        Self::with_options(blob, ExifOptions::default())
    }

    /// Parses the given Exif blob with custom [`ExifOptions`].
    pub fn with_options(blob: &[u8], options: ExifOptions) -> ExifFatalResult<Self> {
        Decoder::new(blob, &options).run()
    }

    /// Reads everything from `reader`, then parses it as an Exif blob.
    pub fn from_reader<R: std::io::Read>(mut reader: R) -> ExifFatalResult<Self> {
        let mut blob = Vec::new();
        reader.read_to_end(&mut blob).map_err(|e| {
            log::error!("Failed to read Exif blob! err: {e}");
            ExifFatalError::from(e)
        })?;

        Self::new(&blob)
    }

    /// Grabs the IFD for `group`, if the blob had one.
    pub fn ifd(&self, group: IfdGroup) -> Option<&Ifd> {
        self.ifds[group.index()].as_ref()
    }

    /// Every IFD present, in [`IfdGroup::ALL`] order.
    pub fn ifds(&self) -> impl Iterator<Item = &Ifd> {
        self.ifds.iter().flatten()
    }

    /// The thumbnail, in whichever layout it was stored.
    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }

    pub fn has_compressed_thumbnail(&self) -> bool {
        matches!(self.thumbnail, Some(Thumbnail::Compressed(_)))
    }

    /// The JPEG thumbnail, if the thumbnail is compressed.
    pub fn compressed_thumbnail(&self) -> Option<&[u8]> {
        match self.thumbnail {
            Some(Thumbnail::Compressed(ref jpeg)) => Some(jpeg),
            _ => None,
        }
    }

    pub fn has_uncompressed_strips(&self) -> bool {
        matches!(self.thumbnail, Some(Thumbnail::Strips(_)))
    }

    /// The thumbnail's strips, if the thumbnail is uncompressed.
    pub fn strips(&self) -> Option<&Strips> {
        match self.thumbnail {
            Some(Thumbnail::Strips(ref strips)) => Some(strips),
            _ => None,
        }
    }

    /// How many strips were extracted. Zero for compressed (or absent)
    /// thumbnails.
    pub fn strip_count(&self) -> usize {
        self.strips().map_or(0, Strips::len)
    }

    pub fn strip(&self, index: usize) -> Option<&[u8]> {
        self.strips()?.get(index)
    }

    /// The thumbnail's bytes, whether compressed or stored in strips.
    pub fn thumbnail_bytes(&self) -> Option<Vec<u8>> {
        self.thumbnail.as_ref().map(Thumbnail::bytes)
    }
}

/// The TIFF `IFD` type code. It's a `Long` that holds an IFD offset.
const IFD_TYPE_CODE: u16 = 13;

/// Where the decoder is in the blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    ExpectHeader,
    ExpectPrimaryIfd { offset: u32 },
    ExpectSubIfds { thumbnail_offset: NextIfdPointer },
    ExpectThumbnailIfd { offset: u32 },
    ExpectThumbnailData,
    Done,
}

/// Walks an Exif blob, one [`Stage`] at a time.
struct Decoder<'a> {
    blob: &'a [u8],
    options: &'a ExifOptions,
    endianness: Endianness,

    /// Offsets of every IFD we've started parsing.
    visited: FxHashSet<u32>,

    /// Sub-IFDs we've found pointers to, but haven't parsed yet.
    pending: VecDeque<(IfdGroup, u32)>,

    ifds: [Option<Ifd>; IfdGroup::COUNT],
    thumbnail: Option<Thumbnail>,
}

impl<'a> Decoder<'a> {
    fn new(blob: &'a [u8], options: &'a ExifOptions) -> Self {
        Self {
            blob,
            options,
            endianness: Endianness::Little,
            visited: FxHashSet::default(),
            pending: VecDeque::new(),
            ifds: Default::default(),
            thumbnail: None,
        }
    }

    fn winnow_endianness(&self) -> WinnowEndianness {
        match self.endianness {
            Endianness::Little => WinnowEndianness::Little,
            Endianness::Big => WinnowEndianness::Big,
        }
    }

    fn run(mut self) -> ExifFatalResult<Exif> {
        let mut stage = Stage::ExpectHeader;

        loop {
            log::trace!("Decoder is at stage `{stage:?}`");
            stage = match stage {
                Stage::ExpectHeader => match self.parse_header()? {
                    Some(offset) => Stage::ExpectPrimaryIfd { offset },
                    None => Stage::Done,
                },

                Stage::ExpectPrimaryIfd { offset } => {
                    let thumbnail_offset = self.parse_directory(IfdGroup::_0, offset)?;
                    Stage::ExpectSubIfds { thumbnail_offset }
                }

                // sub-IFDs can schedule more sub-IFDs (Exif -> Interop), so
                // keep going until the queue drains
                Stage::ExpectSubIfds { thumbnail_offset } => {
                    while let Some((group, offset)) = self.pending.pop_front() {
                        if let Some(next) = self.parse_directory(group, offset)? {
                            log::trace!("Not following next-IFD link `{next}` on the {group}.");
                        }
                    }

                    match thumbnail_offset {
                        Some(offset) => Stage::ExpectThumbnailIfd { offset },
                        None => {
                            log::trace!("IFD0 has no next IFD, so there's no thumbnail.");
                            Stage::Done
                        }
                    }
                }

                Stage::ExpectThumbnailIfd { offset } => {
                    if let Some(next) = self.parse_directory(IfdGroup::_1, offset)? {
                        log::trace!("Not following next-IFD link `{next}` after IFD1.");
                    }
                    Stage::ExpectThumbnailData
                }

                Stage::ExpectThumbnailData => {
                    if let Some(ref ifd1) = self.ifds[IfdGroup::_1.index()] {
                        self.thumbnail = thumbnail::resolve(ifd1, self.blob, self.options)?;
                    }
                    Stage::Done
                }

                Stage::Done => break,
            };
        }

        Ok(Exif {
            endianness: self.endianness,
            ifds: self.ifds,
            thumbnail: self.thumbnail,
        })
    }

    /// Reads the TIFF header, returning the offset of IFD 0.
    ///
    /// If the offset points right at the end of the blob, there are no IFDs,
    /// and this returns `None`.
    fn parse_header(&mut self) -> ExifFatalResult<NextIfdPointer> {
        let mut input: &[u8] = self.blob;
        self.endianness = parse_blob_endianness(&mut input)?;

        // alright. from here on out, we've got to account for the endianness
        // of everything.
        //
        // to do so, our input is wrapped in `Stateful`
        let stateful_input = &mut Stream {
            input,
            state: State {
                current_ifd: IfdGroup::_0, // we always start with IFD 0
                endianness: self.winnow_endianness(),
                blob: self.blob,
                options: self.options,
            },
        };

        // ensure we've got a TIFF marker (magic number)
        parse_tiff_magic_number(stateful_input)?;

        // grab the offset from the start of the blob where we'll start
        let offset: u32 = parse_tiff_header_offset(stateful_input)?;

        if offset as usize > self.blob.len() {
            log::error!(
                "IFD0 offset `{offset}` is past the end of the blob (len `{}`).",
                self.blob.len()
            );
            return Err(ExifFatalError::NotEnoughDataForHeaderOffset {
                offset,
                len: self.blob.len(),
            });
        }

        // if there are no IFDs, do an early return
        if offset as usize == self.blob.len() {
            log::trace!("There's no more input. Assuming there are zero IFDs.");
            return Ok(None);
        }

        Ok(Some(offset))
    }

    /// Parses the IFD at `offset` as `group`, scheduling any sub-IFDs it
    /// points to.
    fn parse_directory(
        &mut self,
        group: IfdGroup,
        offset: u32,
    ) -> ExifFatalResult<NextIfdPointer> {
        log::trace!("Parsing the {group} at offset `{offset}`...");

        if !self.visited.insert(offset) {
            log::error!("The {group} would revisit offset `{offset}`! Refusing to loop.");
            return Err(ExifFatalError::CyclicDirectory { group, offset });
        }

        if self.visited.len() > self.options.max_directories {
            log::error!(
                "Found more than `{}` directories! Refusing to continue.",
                self.options.max_directories
            );
            return Err(ExifFatalError::TooManyDirectories {
                max: self.options.max_directories,
            });
        }

        let Some(ifd_bytes) = self.blob.get(offset as usize..).filter(|b| !b.is_empty()) else {
            log::error!(
                "The {group} starts outside the blob. offset: `{offset}`, blob len: `{}`",
                self.blob.len()
            );
            return Err(ExifFatalError::IfdOffsetOutOfBounds { group, offset });
        };

        let (ifd, next) = parse_ifd(&mut Stream {
            input: ifd_bytes,
            state: State {
                current_ifd: group,
                endianness: self.winnow_endianness(),
                blob: self.blob,
                options: self.options,
            },
        })
        .inspect_err(|e| log::error!("Failed to parse the {group}! err: {e}"))?;

        // pointer tags stay on the IFD, but we also follow them
        for field in ifd.fields() {
            let Some(sub_group) = group.sub_ifd_for(field.tag_id()) else {
                continue;
            };

            match self.pointer_offset(field) {
                Some(pointer) => self.schedule(sub_group, pointer),
                None => log::warn!(
                    "Pointer to the {sub_group} in the {group} wasn't an offset. Skipping it."
                ),
            }
        }

        self.ifds[group.index()] = Some(ifd);
        Ok(next)
    }

    /// Reads a sub-IFD pointer's offset.
    ///
    /// Pointers are usually `Long`s, but some writers use the TIFF `IFD`
    /// type (13), which is kept as raw bytes.
    fn pointer_offset(&self, field: &Field) -> Option<u32> {
        match field.data {
            FieldData::Unknown {
                code: IFD_TYPE_CODE,
                ref raw,
                ..
            } => {
                let raw: [u8; 4] = raw.as_slice().try_into().ok()?;
                Some(match self.endianness {
                    Endianness::Little => core::primitive::u32::from_le_bytes(raw),
                    Endianness::Big => core::primitive::u32::from_be_bytes(raw),
                })
            }
            _ => field.unsigned(0),
        }
    }

    /// Queues a sub-IFD for parsing, unless that group was already found.
    fn schedule(&mut self, group: IfdGroup, offset: u32) {
        let seen = self.ifds[group.index()].is_some()
            || self.pending.iter().any(|(g, _)| *g == group);

        if seen {
            log::warn!("Found a second pointer to the {group}. Ignoring it.");
            return;
        }

        log::trace!("Scheduled the {group} at offset `{offset}`.");
        self.pending.push_back((group, offset));
    }
}

/// Finds the endianness of the Exif blob.
fn parse_blob_endianness(input: &mut &[u8]) -> ExifFatalResult<Endianness> {
    let input_len = input.len();

    // ensure we've got two good bytes
    log::trace!("Looking for the BOM bytes...");
    let two_ascii_bytes: &[u8] = take(2_usize)
        .parse_next(input)
        .map_err(|_: EmptyError| {
            log::error!("Couldn't find endianness marker!");
            ExifFatalError::NoByteOrderMarker {
                len: input_len as u8,
            }
        })?;
    log::trace!("Found two BOM bytes!");

    // parse the bytes we found
    log::trace!("Grabbing BOM...");
    match *two_ascii_bytes {
        [b'I', b'I'] => Ok(Endianness::Little).inspect(|f| log::trace!("It's LE: {f:?}")),
        [b'M', b'M'] => Ok(Endianness::Big).inspect(|f| log::trace!("It's BE: {f:?}")),

        // found a weird bom!
        [a, b] => {
            let e = ExifFatalError::WeirdByteOrderMarker { found: [a, b] };
            log::error!("Couldn't parse out Exif! err: {e}");
            Err(e)
        }

        _ => unreachable!("winnow took exactly two bytes"),
    }
}

/*
*
*
*
  NOTE:

  all parsers from here on out generally require knowing the endianness. so,
  it's stored inside a custom state struct + a stream wrapper.

  this allows us to easily pass our state between pieces of the parser, all
  without globals or other nasty stuff
*
*
*
*
*/

#[derive(Clone, Debug)]
struct State<'a> {
    current_ifd: IfdGroup,
    endianness: WinnowEndianness,

    /// The whole blob. Offsets are relative to its start.
    blob: &'a [u8],
    options: &'a ExifOptions,
}

/// A stream of the blob wrapped with our endianness.
type Stream<'s> = Stateful<&'s [u8], State<'s>>;

/// Ensures we're working with the correct kind of file.
fn parse_tiff_magic_number(input: &mut Stream) -> ExifFatalResult<()> {
    // we account for endianness from here on out
    let endianness = input.state.endianness;

    // grab the magic number bytes as a u16
    log::trace!("Getting magic number...");
    let magic_number: u16 = u16(endianness)
        .parse_next(input)
        .map_err(|_: EmptyError| {
            log::error!("Couldn't find TIFF magic number!");
            ExifFatalError::NoTiffMagicNumber
        })?;

    // check the magic number
    log::trace!("Checking magic number...");
    if magic_number != 42 {
        log::error!("Magic number wasn't for TIFF. got: `{magic_number}`");
        return Err(ExifFatalError::MagicNumberWasntTiff {
            found: magic_number,
        });
    }

    log::trace!("Magic number was good!");
    Ok(())
}

/// Grabs the TIFF header offset.
///
/// This is the absolute offset of IFD 0. It can't point back into the 8-byte
/// header.
fn parse_tiff_header_offset(input: &mut Stream) -> ExifFatalResult<u32> {
    let endianness = input.state.endianness;

    let offset = u32(endianness)
        .parse_next(&mut input.input)
        .map_err(|_: EmptyError| {
            log::error!("Didn't find a TIFF header offset!");
            ExifFatalError::NoTiffHeaderOffset
        })
        .inspect(|offset| log::trace!("found offset: `{offset}`"))?;

    if offset < 8_u32 {
        log::error!("Exif blob placed offset out of bounds! Can't continue parsing.");
        return Err(ExifFatalError::HeaderOffsetBeforeHeader { offset });
    }

    Ok(offset)
}

/// A pointer in the blob specifying the next IFD, if any.
type NextIfdPointer = Option<u32>;

#[cfg(test)]
mod tests {
    use exifscope_types::exif::{
        Endianness, Field, FieldData, FieldTag,
        ifd::IfdGroup,
        primitives::{Primitive, PrimitiveCount, PrimitiveTy},
        tags::{Ifd0Tag, KnownTag},
    };
    use winnow::binary::Endianness as WinnowEndianness;

    use crate::{
        exif::{
            Exif, ExifOptions,
            error::{ExifErrorKind, ExifFatalError},
            parse_blob_endianness, parse_tiff_header_offset, parse_tiff_magic_number,
        },
        util::logger,
    };

    fn state<'a>(
        endianness: WinnowEndianness,
        blob: &'a [u8],
        options: &'a ExifOptions,
    ) -> super::State<'a> {
        super::State {
            current_ifd: IfdGroup::_0,
            endianness,
            blob,
            options,
        }
    }

    /// Checks that we're able to parse endianness properly.
    #[test]
    fn endianness() {
        logger();

        assert_eq!(
            parse_blob_endianness(&mut b"II".as_slice()),
            Ok(Endianness::Little)
        );
        assert_eq!(
            parse_blob_endianness(&mut b"MM".as_slice()),
            Ok(Endianness::Big)
        );
        assert_eq!(
            parse_blob_endianness(&mut b"other".as_slice()),
            Err(ExifFatalError::WeirdByteOrderMarker { found: *b"ot" }),
            "other strings aren't indicative of endianness"
        );
        assert_eq!(
            parse_blob_endianness(&mut b"I".as_slice()),
            Err(ExifFatalError::NoByteOrderMarker { len: 1 }),
        );
    }

    /// Checks if we can parse the TIFF header correctly.
    #[test]
    fn tiff_header() {
        logger();

        let backing_bytes = {
            let mut v = Vec::new();
            v.append(&mut b"II".to_vec());
            v.push(0x2a);
            v.push(0x00);
            v
        };
        let bytes = &mut backing_bytes.as_slice();

        // first, parse out the endianness
        let endianness = parse_blob_endianness(bytes);
        assert_eq!(endianness, Ok(Endianness::Little));
        log::info!("backing bytes now: {backing_bytes:#?}");

        // then, check for the header
        let options = ExifOptions::default();
        assert_eq!(
            parse_tiff_magic_number(&mut super::Stream {
                state: state(WinnowEndianness::Little, backing_bytes.as_slice(), &options),
                input: bytes
            }),
            Ok(()),
            "should find header"
        );

        // big-endian 42 read as little-endian isn't 42
        assert_eq!(
            parse_tiff_magic_number(&mut super::Stream {
                state: state(WinnowEndianness::Little, backing_bytes.as_slice(), &options),
                input: [0x00, 0x2a].as_slice()
            }),
            Err(ExifFatalError::MagicNumberWasntTiff { found: 0x2a00 }),
        );
    }

    /// Checks if we can parse the TIFF header offset correctly.
    #[test]
    fn tiff_header_offset() {
        logger();

        let backing_bytes = {
            let mut v = Vec::new();
            v.extend_from_slice(b"II".as_slice());
            v.push(0x2a);
            v.push(0x00);
            v.extend_from_slice(8_u32.to_le_bytes().as_slice());
            v
        };
        let bytes = &mut backing_bytes.as_slice();

        // parse out the endianness
        let endianness = parse_blob_endianness(bytes);
        assert_eq!(endianness, Ok(Endianness::Little));

        let options = ExifOptions::default();
        let stream = &mut super::Stream {
            state: state(WinnowEndianness::Little, backing_bytes.as_slice(), &options),
            input: bytes,
        };

        // check for the header
        assert_eq!(parse_tiff_magic_number(stream), Ok(()));

        // the offset is right after the header
        assert_eq!(parse_tiff_header_offset(stream), Ok(8_u32));

        // also, ensure that headers with weird values (i.e. < 8) fail to parse
        for bad in [7_u32, 0_u32] {
            assert_eq!(
                parse_tiff_header_offset(&mut super::Stream {
                    state: state(WinnowEndianness::Little, backing_bytes.as_slice(), &options),
                    input: bad.to_le_bytes().as_slice(),
                }),
                Err(ExifFatalError::HeaderOffsetBeforeHeader { offset: bad }),
            );
        }
    }

    #[test]
    fn parses_minimal_exif() {
        logger();

        let mut backing_bytes = Vec::new();
        backing_bytes.extend_from_slice(b"II");
        backing_bytes.extend_from_slice(42_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(9_u32.to_le_bytes().as_slice()); // 9 bytes to skip - 8 are the header
        backing_bytes.push(u8::MAX); // push a junk byte! should be ignored.

        // there's only one field in this IFD
        backing_bytes.extend_from_slice(1_u16.to_le_bytes().as_slice());

        // make an IFD entry
        backing_bytes.extend_from_slice(
            KnownTag::Ifd0Tag(Ifd0Tag::ImageWidth)
                .tag_id()
                .to_le_bytes()
                .as_slice(),
        );
        backing_bytes.extend_from_slice(3_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(1_u32.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(1920_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(0_u16.to_le_bytes().as_slice());

        // no other IFDs are after this one
        backing_bytes.extend_from_slice(0_u32.to_le_bytes().as_slice());

        let exif = Exif::new(&backing_bytes).unwrap();
        assert_eq!(exif.ifds().count(), 1, "only one IFD");
        assert!(exif.thumbnail().is_none());

        // grab the only IFD and its only field
        let ifd0 = exif.ifd(IfdGroup::_0).expect("IFD0 should be there");
        let field = &ifd0.fields()[0];

        // check that it's right
        assert_eq!(
            field.tag,
            FieldTag::Known(KnownTag::Ifd0Tag(Ifd0Tag::ImageWidth)),
            "field tag"
        );
        assert_eq!(
            field.data,
            FieldData::Primitive(Primitive::Short(1920)),
            "field val"
        );
    }

    /// We should succeed at parsing when no IFDs are present.
    #[test]
    fn no_ifds() {
        logger();

        let mut backing_bytes = Vec::new();

        // header
        backing_bytes.extend_from_slice(b"II");
        backing_bytes.extend_from_slice(42_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(8_u32.to_le_bytes().as_slice());

        let parsed = Exif::new(&backing_bytes).unwrap();
        assert_eq!(parsed.endianness, Endianness::Little);
        assert_eq!(parsed.ifds().count(), 0, "we shouldn't find any IFDs");
    }

    /// The first IFD can't start past the end of the blob.
    #[test]
    fn header_offset_past_end() {
        logger();

        let mut backing_bytes = Vec::new();
        backing_bytes.extend_from_slice(b"MM");
        backing_bytes.extend_from_slice(42_u16.to_be_bytes().as_slice());
        backing_bytes.extend_from_slice(100_u32.to_be_bytes().as_slice());

        let err = Exif::new(&backing_bytes).unwrap_err();
        assert_eq!(
            err,
            ExifFatalError::NotEnoughDataForHeaderOffset {
                offset: 100,
                len: 8
            }
        );
        assert_eq!(err.kind(), ExifErrorKind::TruncatedData);
    }

    /// IFD 0's next link leads to IFD 1. Anything after that is ignored.
    #[test]
    fn primary_and_thumbnail_ifds() {
        logger();

        let mut backing_bytes = Vec::new();
        backing_bytes.extend_from_slice(b"MM");
        backing_bytes.extend_from_slice(42_u16.to_be_bytes().as_slice());
        backing_bytes.extend_from_slice(8_u32.to_be_bytes().as_slice());

        // the first IFD will have width + height
        backing_bytes.extend_from_slice(2_u16.to_be_bytes().as_slice()); // two fields
        backing_bytes.extend_from_slice(
            KnownTag::Ifd0Tag(Ifd0Tag::ImageWidth)
                .tag_id()
                .to_be_bytes()
                .as_slice(),
        ); // f1 id
        backing_bytes.extend_from_slice(3_u16.to_be_bytes().as_slice()); // f1 ty
        backing_bytes.extend_from_slice(1_u32.to_be_bytes().as_slice()); // f1 ct
        backing_bytes.extend_from_slice(1920_u16.to_be_bytes().as_slice()); // f1 val
        backing_bytes.extend_from_slice(0_u16.to_be_bytes().as_slice());
        backing_bytes.extend_from_slice(
            KnownTag::Ifd0Tag(Ifd0Tag::ImageLength)
                .tag_id()
                .to_be_bytes()
                .as_slice(),
        ); // f2 id
        backing_bytes.extend_from_slice(3_u16.to_be_bytes().as_slice()); // f2 ty
        backing_bytes.extend_from_slice(1_u32.to_be_bytes().as_slice()); // f2 ct
        backing_bytes.extend_from_slice(1080_u16.to_be_bytes().as_slice()); // f2 val
        backing_bytes.extend_from_slice(0_u16.to_be_bytes().as_slice());

        // create an offset + some padding for the next IFD
        let next_ifd_offset = backing_bytes.len() as u32 + 4 + 88;
        backing_bytes.extend_from_slice(next_ifd_offset.to_be_bytes().as_slice());
        backing_bytes.extend_from_slice([0_u8; 88].as_slice());

        // IFD #2 gets one veeeery long field
        backing_bytes.extend_from_slice(1_u16.to_be_bytes().as_slice()); // 1 field
        backing_bytes.extend_from_slice(
            KnownTag::Ifd0Tag(Ifd0Tag::TransferFunction)
                .tag_id()
                .to_be_bytes()
                .as_slice(),
        ); // f1 tag
        backing_bytes.extend_from_slice(
            KnownTag::Ifd0Tag(Ifd0Tag::TransferFunction).types()[0]
                .code()
                .to_be_bytes()
                .as_slice(),
        ); // f1 ty
        backing_bytes.extend_from_slice(
            {
                let PrimitiveCount::Known(c) = KnownTag::Ifd0Tag(Ifd0Tag::TransferFunction).count()
                else {
                    panic!("wrong count");
                };
                c
            }
            .to_be_bytes()
            .as_slice(),
        ); // f1 count
        // the f1 data will be after all the IFDs, at blob[2000..]
        let ifd2_f1_data = [99_u8; (3 * 256_usize) * 2].as_slice();
        backing_bytes.extend_from_slice(2000_u32.to_be_bytes().as_slice());

        // IFD1 points on to a third IFD, which we shouldn't parse. it's
        // garbage anyway
        backing_bytes.extend_from_slice(1500_u32.to_be_bytes().as_slice());

        // place the giant [IFD 1, Field 1] data at index 2000.
        //
        // but first, add some padding
        backing_bytes.resize(2000, 0xFF);
        backing_bytes.extend_from_slice(ifd2_f1_data);

        let parsed = Exif::new(&backing_bytes).expect("parsing should work");

        assert_eq!(parsed.endianness, Endianness::Big);
        assert_eq!(parsed.ifds().count(), 2);
        assert_eq!(
            parsed.ifd(IfdGroup::_0).map(|ifd| ifd.fields().to_vec()),
            Some(vec![
                Field {
                    tag: FieldTag::Known(KnownTag::Ifd0Tag(Ifd0Tag::ImageWidth)),
                    data: FieldData::Primitive(Primitive::Short(1920)),
                },
                Field {
                    tag: FieldTag::Known(KnownTag::Ifd0Tag(Ifd0Tag::ImageLength)),
                    data: FieldData::Primitive(Primitive::Short(1080)),
                },
            ])
        );
        assert_eq!(
            parsed.ifd(IfdGroup::_1).map(|ifd| ifd.fields().to_vec()),
            Some(vec![Field {
                tag: FieldTag::Known(KnownTag::Ifd0Tag(Ifd0Tag::TransferFunction)),
                data: FieldData::List {
                    list: [Primitive::Short((99_u16 << 8) | 99_u16); (3 * 256_usize)].into(),
                    ty: PrimitiveTy::Short
                },
            }])
        );

        // IFD1 has no image data tags
        assert!(parsed.thumbnail().is_none());
    }

    /// IFD 0 linking back to itself is a cycle.
    #[test]
    fn self_referencing_primary() {
        logger();

        let mut backing_bytes = Vec::new();
        backing_bytes.extend_from_slice(b"II");
        backing_bytes.extend_from_slice(42_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(8_u32.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(0_u16.to_le_bytes().as_slice()); // no fields
        backing_bytes.extend_from_slice(8_u32.to_le_bytes().as_slice()); // next: ourselves

        let err = Exif::new(&backing_bytes).unwrap_err();
        assert_eq!(
            err,
            ExifFatalError::CyclicDirectory {
                group: IfdGroup::_1,
                offset: 8
            }
        );
        assert_eq!(err.kind(), ExifErrorKind::CyclicDirectory);
    }

    /// The directory cap is a second guard against runaway blobs.
    #[test]
    fn too_many_directories() {
        logger();

        let mut backing_bytes = Vec::new();
        backing_bytes.extend_from_slice(b"II");
        backing_bytes.extend_from_slice(42_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(8_u32.to_le_bytes().as_slice());

        // IFD0 at 8 has one field: a pointer to the Exif IFD at 26
        backing_bytes.extend_from_slice(1_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(0x8769_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(4_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(1_u32.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(26_u32.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(0_u32.to_le_bytes().as_slice());

        // the Exif IFD is empty
        assert_eq!(backing_bytes.len(), 26);
        backing_bytes.extend_from_slice(0_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(0_u32.to_le_bytes().as_slice());

        assert_eq!(Exif::new(&backing_bytes).map(|e| e.ifds().count()), Ok(2));
        assert_eq!(
            Exif::with_options(&backing_bytes, ExifOptions::default().with_max_directories(1)),
            Err(ExifFatalError::TooManyDirectories { max: 1 })
        );
    }

    #[test]
    fn from_reader_matches_new() {
        logger();

        let mut backing_bytes = Vec::new();
        backing_bytes.extend_from_slice(b"II");
        backing_bytes.extend_from_slice(42_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(8_u32.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(0_u16.to_le_bytes().as_slice());
        backing_bytes.extend_from_slice(0_u32.to_le_bytes().as_slice());

        assert_eq!(
            Exif::from_reader(std::io::Cursor::new(backing_bytes.clone())),
            Exif::new(&backing_bytes)
        );
    }
}
