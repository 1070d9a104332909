use crate::exif::{
    ifd::IfdGroup,
    primitives::{Primitive, PrimitiveTy, Rational},
    tags::KnownTag,
};

pub mod ifd;
pub mod primitives;
pub mod tags;

/// One decoded entry of an image file directory.
///
/// These provide both a field and its value(s).
#[repr(C)]
#[derive(Clone, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Field {
    /// A number to identify the field we're talking about.
    pub tag: FieldTag,

    /// Data stored with this tag.
    ///
    /// The data also specifies the type of primitive used, and how many we're
    /// storing.
    pub data: FieldData,
}

impl Field {
    /// The field's raw tag ID.
    pub fn tag_id(&self) -> u16 {
        self.tag.tag_id()
    }

    /// How many primitives are present in the field.
    pub fn count(&self) -> u32 {
        match self.data {
            FieldData::None(_) => 0_u32,
            FieldData::Primitive(_) => 1_u32,
            FieldData::List { ref list, .. } => list.len() as u32,
            FieldData::Unknown { count, .. } => count,
        }
    }

    /// Describes which primitive is stored inside.
    ///
    /// Fields with an unrecognized type code report
    /// [`PrimitiveTy::Undefined`], since their bytes are kept as-is.
    pub fn ty(&self) -> PrimitiveTy {
        match self.data {
            FieldData::None(primitive_ty) => primitive_ty,
            FieldData::Primitive(primitive) => primitive.ty(),
            FieldData::List { ty, .. } => ty,
            FieldData::Unknown { .. } => PrimitiveTy::Undefined,
        }
    }

    /// Grabs the primitive at `index`, if there is one.
    pub fn primitive(&self, index: usize) -> Option<Primitive> {
        match self.data {
            FieldData::Primitive(p) if index == 0 => Some(p),
            FieldData::List { ref list, .. } => list.get(index).copied(),
            FieldData::None(_) | FieldData::Primitive(_) | FieldData::Unknown { .. } => None,
        }
    }

    /// Reads component `index` as an unsigned integer, whether it was stored
    /// as a `Short` or a `Long`.
    ///
    /// ```
    /// use exifscope_types::exif::{
    ///     Field, FieldData, FieldTag,
    ///     primitives::{Primitive, PrimitiveTy},
    /// };
    ///
    /// let field = Field {
    ///     tag: FieldTag::Unknown(279),
    ///     data: FieldData::List {
    ///         list: vec![Primitive::Short(100), Primitive::Short(28)],
    ///         ty: PrimitiveTy::Short,
    ///     },
    /// };
    /// assert_eq!(field.unsigned(1), Some(28));
    /// assert_eq!(field.unsigned(2), None);
    /// ```
    pub fn unsigned(&self, index: usize) -> Option<u32> {
        match self.primitive(index)? {
            Primitive::Short(s) => Some(s as u32),
            Primitive::Long(l) => Some(l),
            _ => None,
        }
    }

    /// Reads component `index`, only if the field's type is `Short`.
    pub fn unsigned_short(&self, index: usize) -> Option<u16> {
        match self.primitive(index)? {
            Primitive::Short(s) => Some(s),
            _ => None,
        }
    }

    /// Reads component `index`, only if the field's type is `Long`.
    pub fn unsigned_long(&self, index: usize) -> Option<u32> {
        match self.primitive(index)? {
            Primitive::Long(l) => Some(l),
            _ => None,
        }
    }

    /// Reads component `index`, only if the field's type is `Rational`.
    pub fn rational(&self, index: usize) -> Option<Rational> {
        match self.primitive(index)? {
            Primitive::Rational(r) => Some(r),
            _ => None,
        }
    }

    /// Reads an `Ascii` field as text, stopping at the first NUL.
    pub fn ascii(&self) -> Option<String> {
        if self.ty() != PrimitiveTy::Ascii {
            return None;
        }

        let bytes = self.bytes()?;
        let text = bytes.split(|b| *b == 0).next().unwrap_or_default();
        Some(String::from_utf8_lossy(text).into_owned())
    }

    /// Returns the field's bytes if it's made of single-byte components
    /// (`Byte`, `Ascii`, `SByte`, `Undefined`, or a preserved unknown type).
    pub fn bytes(&self) -> Option<Vec<u8>> {
        let one = |p: &Primitive| match *p {
            Primitive::Byte(b) | Primitive::Ascii(b) | Primitive::Undefined(b) => Some(b),
            Primitive::SByte(b) => Some(b as u8),
            _ => None,
        };

        match self.data {
            FieldData::None(ty) if ty.size_bytes() == 1 => Some(Vec::new()),
            FieldData::None(_) => None,
            FieldData::Primitive(ref p) => one(p).map(|b| vec![b]),
            FieldData::List { ref list, .. } => list.iter().map(one).collect(),
            FieldData::Unknown { ref raw, .. } => Some(raw.clone()),
        }
    }

    /// Renders the value in its canonical textual form.
    ///
    /// Components are separated by single spaces and the result is trimmed.
    /// See [`FieldData`]'s `Display` implementation for details.
    pub fn value_to_string(&self) -> String {
        self.data.to_string().trim().to_string()
    }
}

/// Data associated with a field.
#[repr(C)]
#[derive(Clone, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum FieldData {
    /// There's no primitive stored here.
    None(PrimitiveTy),

    /// Stores one primitive.
    Primitive(Primitive),

    /// Stores a number of primitives.
    List {
        /// The actual list of primitives.
        list: Vec<Primitive>,

        /// The type of primitive we're storing.
        ty: PrimitiveTy,
    },

    /// The entry used a type code we don't recognize.
    ///
    /// Its size can't be known, so the entry's four value bytes are kept
    /// exactly as they appeared in the directory.
    Unknown {
        /// The unrecognized type code.
        code: u16,

        /// The component count the entry declared.
        count: u32,

        /// The entry's raw value-or-offset bytes.
        raw: Vec<u8>,
    },
}

/// Renders field data canonically.
///
/// - `Ascii` is shown as text up to the first NUL byte.
/// - `Undefined` and unknown-type bytes are shown as two-digit hex.
/// - Everything else is shown in base 10, rationals as `num/den`.
///
/// ```
/// use exifscope_types::exif::{
///     FieldData,
///     primitives::{Primitive, PrimitiveTy, Rational},
/// };
///
/// let data = FieldData::List {
///     list: vec![
///         Primitive::Rational(Rational { numerator: 72, denominator: 1 }),
///         Primitive::Rational(Rational { numerator: 1, denominator: 3 }),
///     ],
///     ty: PrimitiveTy::Rational,
/// };
/// assert_eq!(data.to_string(), "72/1 1/3");
///
/// let text = FieldData::List {
///     list: b"Canon\0\0".iter().map(|b| Primitive::Ascii(*b)).collect(),
///     ty: PrimitiveTy::Ascii,
/// };
/// assert_eq!(text.to_string(), "Canon");
/// ```
impl core::fmt::Display for FieldData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldData::None(_) => Ok(()),

            FieldData::Primitive(Primitive::Ascii(b)) => write_ascii(f, &[*b]),
            FieldData::Primitive(p) => write!(f, "{p}"),

            FieldData::List {
                list,
                ty: PrimitiveTy::Ascii,
            } => {
                let bytes: Vec<u8> = list
                    .iter()
                    .filter_map(|p| match p {
                        Primitive::Ascii(b) => Some(*b),
                        _ => None,
                    })
                    .collect();
                write_ascii(f, &bytes)
            }
            FieldData::List { list, .. } => {
                for (i, p) in list.iter().enumerate() {
                    if i != 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{p}")?;
                }
                Ok(())
            }

            FieldData::Unknown { raw, .. } => {
                for (i, b) in raw.iter().enumerate() {
                    if i != 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{b:02x}")?;
                }
                Ok(())
            }
        }
    }
}

/// Writes a NUL-terminated (or NUL-padded) text run, trimmed.
fn write_ascii(f: &mut core::fmt::Formatter<'_>, bytes: &[u8]) -> core::fmt::Result {
    let text = bytes.split(|b| *b == 0).next().unwrap_or_default();
    f.write_str(String::from_utf8_lossy(text).trim())
}

/// Each blob of Exif will start with a byte order marker - its endianness.
///
/// It's either `II` (Intel, for little-endian) or `MM` (Motorola, for
/// big-endian).
#[repr(u8)]
#[derive(Copy, Clone, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum Endianness {
    /// `II` for Intel, little-endian.
    Little,

    /// `MM` for Motorola. Big-endian.
    Big,
}

/// A tag might be known by the parser, but others may not be.
#[repr(C)]
#[derive(Copy, Clone, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum FieldTag {
    Known(KnownTag),
    Unknown(u16),
}

impl FieldTag {
    /// Looks up a raw tag ID in the table for `group`.
    pub fn new(group: IfdGroup, tag_id: u16) -> Self {
        KnownTag::try_from((group, tag_id))
            .map(FieldTag::Known)
            .unwrap_or(FieldTag::Unknown(tag_id))
    }

    /// The raw tag ID, whether or not we know the tag.
    pub fn tag_id(&self) -> u16 {
        match self {
            FieldTag::Known(known) => known.tag_id(),
            FieldTag::Unknown(raw) => *raw,
        }
    }
}

impl core::fmt::Display for FieldTag {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            FieldTag::Known(known_tag) => {
                write!(
                    f,
                    "known field with name: `{}` and tag ID: `{}`",
                    known_tag.tag_name(),
                    known_tag.tag_id()
                )
            }
            FieldTag::Unknown(raw_tag) => write!(f, "unknown field with tag ID: `{raw_tag}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, FieldData, FieldTag};
    use crate::exif::{
        ifd::IfdGroup,
        primitives::{Double, Float, Primitive, PrimitiveTy, SRational},
        tags::{Ifd0Tag, KnownTag},
    };

    fn field(data: FieldData) -> Field {
        Field {
            tag: FieldTag::Unknown(0x1234),
            data,
        }
    }

    #[test]
    fn renders_numbers_in_base_ten() {
        let shorts = field(FieldData::List {
            list: vec![Primitive::Short(8), Primitive::Short(8), Primitive::Short(8)],
            ty: PrimitiveTy::Short,
        });
        assert_eq!(shorts.value_to_string(), "8 8 8");

        let bytes = field(FieldData::List {
            list: vec![Primitive::Byte(2), Primitive::Byte(2), Primitive::Byte(0)],
            ty: PrimitiveTy::Byte,
        });
        assert_eq!(bytes.value_to_string(), "2 2 0");

        let signed = field(FieldData::Primitive(Primitive::SRational(SRational {
            numerator: -1,
            denominator: 3,
        })));
        assert_eq!(signed.value_to_string(), "-1/3");

        let floats = field(FieldData::List {
            list: vec![
                Primitive::Float(Float::from_bits(0.5_f32.to_bits())),
                Primitive::Double(Double::from_bits(2.25_f64.to_bits())),
            ],
            ty: PrimitiveTy::Float,
        });
        assert_eq!(floats.value_to_string(), "0.5 2.25");
    }

    #[test]
    fn renders_undefined_as_hex() {
        let version = field(FieldData::List {
            list: b"0220".iter().map(|b| Primitive::Undefined(*b)).collect(),
            ty: PrimitiveTy::Undefined,
        });
        assert_eq!(version.value_to_string(), "30 32 32 30");

        let unknown = field(FieldData::Unknown {
            code: 13,
            count: 1,
            raw: vec![0x00, 0x01, 0xab, 0xff],
        });
        assert_eq!(unknown.value_to_string(), "00 01 ab ff");
        assert_eq!(unknown.ty(), PrimitiveTy::Undefined);
        assert_eq!(unknown.count(), 1);
    }

    #[test]
    fn ascii_is_trimmed_at_nul_and_whitespace() {
        let make = field(FieldData::List {
            list: b"  NIKON \0garbage"
                .iter()
                .map(|b| Primitive::Ascii(*b))
                .collect(),
            ty: PrimitiveTy::Ascii,
        });
        assert_eq!(make.value_to_string(), "NIKON");
        assert_eq!(make.ascii().as_deref(), Some("  NIKON "));

        let empty = field(FieldData::Primitive(Primitive::Ascii(0)));
        assert_eq!(empty.value_to_string(), "");
    }

    #[test]
    fn accessors_respect_declared_type() {
        let long = field(FieldData::Primitive(Primitive::Long(4000)));
        assert_eq!(long.unsigned(0), Some(4000));
        assert_eq!(long.unsigned_long(0), Some(4000));
        assert_eq!(long.unsigned_short(0), None);
        assert_eq!(long.bytes(), None);

        let none = field(FieldData::None(PrimitiveTy::Undefined));
        assert_eq!(none.count(), 0);
        assert_eq!(none.bytes(), Some(Vec::new()));
        assert_eq!(none.value_to_string(), "");
    }

    #[test]
    fn field_tags_resolve_per_group() {
        assert_eq!(
            FieldTag::new(IfdGroup::_1, 257),
            FieldTag::Known(KnownTag::Ifd0Tag(Ifd0Tag::ImageLength))
        );
        assert_eq!(FieldTag::new(IfdGroup::Gps, 257), FieldTag::Unknown(257));
        assert_eq!(FieldTag::new(IfdGroup::Gps, 257).tag_id(), 257);
    }
}
