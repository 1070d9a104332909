//! Shared helpers for the integration tests.
//!
//! [`TiffBuilder`] lays out a TIFF-structured Exif blob from a list of
//! entries per IFD, so tests don't have to compute offsets by hand.

#![allow(dead_code)]

use exifscope::exif::{Endianness, IfdGroup};

/// Thumbnail data and other payloads go here, far past the IFDs.
pub const PAYLOAD_BASE: u32 = 4096;

pub fn logger() {
    _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::max())
        .format_file(true)
        .format_line_number(true)
        .try_init();
}

/// A value to store in an entry.
#[derive(Clone, Debug)]
pub enum Value {
    Byte(Vec<u8>),
    Ascii(&'static str),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<(i32, i32)>),
    Float(Vec<f32>),
    Double(Vec<f64>),

    /// An entry with any type code, stored with exactly these 4 value bytes.
    Raw { ty: u16, count: u32, bytes: [u8; 4] },
}

#[derive(Clone, Debug)]
struct Entry {
    tag: u16,
    value: Value,
}

/// Builds Exif blobs.
///
/// IFDs are laid out right after the header in this order: IFD 0, Exif,
/// GPS, Interop, IFD 1. Values too large to store inline follow the IFDs.
/// Payloads start at [`PAYLOAD_BASE`].
///
/// Pointer tags for the Exif, GPS, and Interop IFDs are added for you.
#[derive(Clone, Debug)]
pub struct TiffBuilder {
    endianness: Endianness,
    ifds: [Option<Vec<Entry>>; IfdGroup::COUNT],
    payloads: Vec<u8>,
    primary_next: Option<u32>,
    thumbnail_next: Option<u32>,
    ifd_typed_pointers: bool,
}

const LAYOUT: [IfdGroup; 5] = [
    IfdGroup::_0,
    IfdGroup::Exif,
    IfdGroup::Gps,
    IfdGroup::Interop,
    IfdGroup::_1,
];

impl TiffBuilder {
    pub fn new(endianness: Endianness) -> Self {
        let mut ifds: [Option<Vec<Entry>>; IfdGroup::COUNT] = Default::default();
        ifds[IfdGroup::_0.index()] = Some(Vec::new());

        Self {
            endianness,
            ifds,
            payloads: Vec::new(),
            primary_next: None,
            thumbnail_next: None,
            ifd_typed_pointers: false,
        }
    }

    pub fn little() -> Self {
        Self::new(Endianness::Little)
    }

    pub fn big() -> Self {
        Self::new(Endianness::Big)
    }

    /// Adds an entry to `group`, creating the IFD if needed.
    pub fn add(&mut self, group: IfdGroup, tag: u16, value: Value) -> &mut Self {
        self.ifds[group.index()]
            .get_or_insert_with(Vec::new)
            .push(Entry { tag, value });
        self
    }

    /// Makes sure `group` exists, even with no entries.
    pub fn touch(&mut self, group: IfdGroup) -> &mut Self {
        self.ifds[group.index()].get_or_insert_with(Vec::new);
        self
    }

    /// Stores `bytes` in the payload area, returning their absolute offset.
    pub fn payload(&mut self, bytes: &[u8]) -> u32 {
        let offset = PAYLOAD_BASE + self.payloads.len() as u32;
        self.payloads.extend_from_slice(bytes);
        offset
    }

    /// Overrides IFD 0's next-IFD pointer.
    pub fn primary_next(&mut self, offset: u32) -> &mut Self {
        self.primary_next = Some(offset);
        self
    }

    /// Sets IFD 1's next-IFD pointer, which is normally zero.
    pub fn thumbnail_next(&mut self, offset: u32) -> &mut Self {
        self.thumbnail_next = Some(offset);
        self
    }

    /// Stores the added pointer tags with the TIFF `IFD` type (13) instead
    /// of `Long`.
    pub fn ifd_typed_pointers(&mut self) -> &mut Self {
        self.ifd_typed_pointers = true;
        self
    }

    fn has(&self, group: IfdGroup) -> bool {
        self.ifds[group.index()].is_some()
    }

    /// Pointer tags to add to `group`, as `(tag, target)`.
    fn pointers(&self, group: IfdGroup) -> Vec<(u16, IfdGroup)> {
        let mut v = Vec::new();
        match group {
            IfdGroup::_0 => {
                if self.has(IfdGroup::Exif) {
                    v.push((0x8769, IfdGroup::Exif));
                }
                if self.has(IfdGroup::Gps) {
                    v.push((0x8825, IfdGroup::Gps));
                }
                if self.has(IfdGroup::Interop) && !self.has(IfdGroup::Exif) {
                    v.push((0xA005, IfdGroup::Interop));
                }
            }
            IfdGroup::Exif => {
                if self.has(IfdGroup::Interop) {
                    v.push((0xA005, IfdGroup::Interop));
                }
            }
            _ => (),
        }
        v
    }

    fn u16(&self, v: u16) -> [u8; 2] {
        match self.endianness {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        }
    }

    fn u32(&self, v: u32) -> [u8; 4] {
        match self.endianness {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        }
    }

    fn u64(&self, v: u64) -> [u8; 8] {
        match self.endianness {
            Endianness::Little => v.to_le_bytes(),
            Endianness::Big => v.to_be_bytes(),
        }
    }

    /// Encodes a value into `(type code, count, bytes)`.
    fn encode(&self, value: &Value) -> (u16, u32, Vec<u8>) {
        let mut b = Vec::new();
        let (ty, count) = match value {
            Value::Byte(v) => {
                b.extend_from_slice(v);
                (1, v.len())
            }
            Value::Ascii(s) => {
                b.extend_from_slice(s.as_bytes());
                b.push(0);
                (2, s.len() + 1)
            }
            Value::Short(v) => {
                v.iter().for_each(|x| b.extend(self.u16(*x)));
                (3, v.len())
            }
            Value::Long(v) => {
                v.iter().for_each(|x| b.extend(self.u32(*x)));
                (4, v.len())
            }
            Value::Rational(v) => {
                for (n, d) in v {
                    b.extend(self.u32(*n));
                    b.extend(self.u32(*d));
                }
                (5, v.len())
            }
            Value::SByte(v) => {
                b.extend(v.iter().map(|x| *x as u8));
                (6, v.len())
            }
            Value::Undefined(v) => {
                b.extend_from_slice(v);
                (7, v.len())
            }
            Value::SShort(v) => {
                v.iter().for_each(|x| b.extend(self.u16(*x as u16)));
                (8, v.len())
            }
            Value::SLong(v) => {
                v.iter().for_each(|x| b.extend(self.u32(*x as u32)));
                (9, v.len())
            }
            Value::SRational(v) => {
                for (n, d) in v {
                    b.extend(self.u32(*n as u32));
                    b.extend(self.u32(*d as u32));
                }
                (10, v.len())
            }
            Value::Float(v) => {
                v.iter().for_each(|x| b.extend(self.u32(x.to_bits())));
                (11, v.len())
            }
            Value::Double(v) => {
                v.iter().for_each(|x| b.extend(self.u64(x.to_bits())));
                (12, v.len())
            }
            Value::Raw { ty, count, bytes } => return (*ty, *count, bytes.to_vec()),
        };
        (ty, count as u32, b)
    }

    pub fn build(&self) -> Vec<u8> {
        // find where each IFD goes
        let mut offsets = [0_u32; IfdGroup::COUNT];
        let mut cursor = 8_u32;
        for group in LAYOUT {
            if let Some(ref entries) = self.ifds[group.index()] {
                offsets[group.index()] = cursor;
                let n = entries.len() + self.pointers(group).len();
                cursor += 2 + 12 * n as u32 + 4;
            }
        }
        let data_start = cursor;

        let mut ifd_bytes = Vec::new();
        let mut data = Vec::new();

        for group in LAYOUT {
            let Some(ref entries) = self.ifds[group.index()] else {
                continue;
            };
            let pointers = self.pointers(group);

            ifd_bytes.extend(self.u16((entries.len() + pointers.len()) as u16));

            let pointer_entries = pointers.iter().map(|(tag, target)| {
                let offset = offsets[target.index()];
                let value = if self.ifd_typed_pointers {
                    Value::Raw {
                        ty: 13,
                        count: 1,
                        bytes: self.u32(offset),
                    }
                } else {
                    Value::Long(vec![offset])
                };
                Entry { tag: *tag, value }
            });

            for entry in entries.iter().cloned().chain(pointer_entries) {
                let (ty, count, bytes) = self.encode(&entry.value);
                ifd_bytes.extend(self.u16(entry.tag));
                ifd_bytes.extend(self.u16(ty));
                ifd_bytes.extend(self.u32(count));

                if bytes.len() <= 4 {
                    let mut inline = [0_u8; 4];
                    inline[..bytes.len()].copy_from_slice(&bytes);
                    ifd_bytes.extend(inline);
                } else {
                    let at = data_start + data.len() as u32;
                    ifd_bytes.extend(self.u32(at));
                    data.extend_from_slice(&bytes);
                    if data.len() % 2 == 1 {
                        data.push(0);
                    }
                }
            }

            let next = match group {
                IfdGroup::_0 => self.primary_next.unwrap_or(if self.has(IfdGroup::_1) {
                    offsets[IfdGroup::_1.index()]
                } else {
                    0
                }),
                IfdGroup::_1 => self.thumbnail_next.unwrap_or(0),
                _ => 0,
            };
            ifd_bytes.extend(self.u32(next));
        }

        let mut blob = Vec::new();
        blob.extend_from_slice(match self.endianness {
            Endianness::Little => b"II",
            Endianness::Big => b"MM",
        });
        blob.extend(self.u16(42));
        blob.extend(self.u32(8));
        blob.extend(ifd_bytes);
        blob.extend(data);

        if !self.payloads.is_empty() {
            assert!(blob.len() <= PAYLOAD_BASE as usize, "IFDs ran into the payloads");
            blob.resize(PAYLOAD_BASE as usize, 0);
            blob.extend_from_slice(&self.payloads);
        }

        blob
    }
}
