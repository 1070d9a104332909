/// An enumeration of the possible values of a primitive.
///
/// Used in each IFD entry. The discriminant is the type code written in the
/// entry itself.
#[repr(u16)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum PrimitiveTy {
    Byte = 1,
    Ascii = 2,
    Short = 3,
    Long = 4,
    Rational = 5,
    SByte = 6,
    Undefined = 7,
    SShort = 8,
    SLong = 9,
    SRational = 10,
    Float = 11,
    Double = 12,
}

impl PrimitiveTy {
    /// Grabs the primitive type's size in bytes.
    ///
    /// ```
    /// use exifscope_types::exif::primitives::PrimitiveTy;
    ///
    /// let slong: PrimitiveTy = PrimitiveTy::SLong;
    /// assert_eq!(slong.size_bytes(), 4_u8);
    ///
    /// assert_eq!(PrimitiveTy::Double.size_bytes(), 8_u8);
    /// ```
    pub const fn size_bytes(&self) -> u8 {
        match self {
            PrimitiveTy::Byte
            | PrimitiveTy::Ascii
            | PrimitiveTy::SByte
            | PrimitiveTy::Undefined => {
                1_u8
            }
            PrimitiveTy::Short | PrimitiveTy::SShort => 2_u8,
            PrimitiveTy::Long | PrimitiveTy::SLong | PrimitiveTy::Float => 4_u8,
            PrimitiveTy::Rational | PrimitiveTy::SRational | PrimitiveTy::Double => 8_u8,
        }
    }

    /// The type code used for this type inside an IFD entry.
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

impl TryFrom<u16> for PrimitiveTy {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Byte),
            2 => Ok(Self::Ascii),
            3 => Ok(Self::Short),
            4 => Ok(Self::Long),
            5 => Ok(Self::Rational),
            6 => Ok(Self::SByte),
            7 => Ok(Self::Undefined),
            8 => Ok(Self::SShort),
            9 => Ok(Self::SLong),
            10 => Ok(Self::SRational),
            11 => Ok(Self::Float),
            12 => Ok(Self::Double),

            _ => Err(()),
        }
    }
}

/// How many primitives a known tag is expected to carry.
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum PrimitiveCount {
    /// Exactly this many.
    Known(u32),

    /// The count depends on other fields (e.g. one per strip) or on the
    /// contents (e.g. text).
    Any,
}

impl PrimitiveCount {
    /// Whether `count` is acceptable.
    ///
    /// ```
    /// use exifscope_types::exif::primitives::PrimitiveCount;
    ///
    /// assert!(PrimitiveCount::Known(2).allows(2));
    /// assert!(!PrimitiveCount::Known(2).allows(3));
    /// assert!(PrimitiveCount::Any.allows(5000));
    /// ```
    pub const fn allows(&self, count: u32) -> bool {
        match self {
            PrimitiveCount::Known(n) => *n == count,
            PrimitiveCount::Any => true,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub enum Primitive {
    Byte(Byte),
    Ascii(Ascii),
    Short(Short),
    Long(Long),
    Rational(Rational),
    SByte(SByte),
    Undefined(Undefined),
    SShort(SShort),
    SLong(SLong),
    SRational(SRational),
    Float(Float),
    Double(Double),
}

impl Primitive {
    /// Grabs the type describing this primitive.
    pub fn ty(&self) -> PrimitiveTy {
        match self {
            Primitive::Byte(_) => PrimitiveTy::Byte,
            Primitive::Ascii(_) => PrimitiveTy::Ascii,
            Primitive::Short(_) => PrimitiveTy::Short,
            Primitive::Long(_) => PrimitiveTy::Long,
            Primitive::Rational(_) => PrimitiveTy::Rational,
            Primitive::SByte(_) => PrimitiveTy::SByte,
            Primitive::Undefined(_) => PrimitiveTy::Undefined,
            Primitive::SShort(_) => PrimitiveTy::SShort,
            Primitive::SLong(_) => PrimitiveTy::SLong,
            Primitive::SRational(_) => PrimitiveTy::SRational,
            Primitive::Float(_) => PrimitiveTy::Float,
            Primitive::Double(_) => PrimitiveTy::Double,
        }
    }
}

/// Renders one component in its canonical textual form.
///
/// `Undefined` bytes are shown as two hex digits; everything else uses base
/// 10. Rationals are written as `numerator/denominator`.
impl core::fmt::Display for Primitive {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Primitive::Byte(v) => write!(f, "{v}"),
            Primitive::Ascii(v) => write!(f, "{}", *v as char),
            Primitive::Short(v) => write!(f, "{v}"),
            Primitive::Long(v) => write!(f, "{v}"),
            Primitive::Rational(r) => write!(f, "{}/{}", r.numerator, r.denominator),
            Primitive::SByte(v) => write!(f, "{v}"),
            Primitive::Undefined(v) => write!(f, "{v:02x}"),
            Primitive::SShort(v) => write!(f, "{v}"),
            Primitive::SLong(v) => write!(f, "{v}"),
            Primitive::SRational(r) => write!(f, "{}/{}", r.numerator, r.denominator),
            Primitive::Float(v) => write!(f, "{}", v.value()),
            Primitive::Double(v) => write!(f, "{}", v.value()),
        }
    }
}

/// A `u8` to represent a byte.
pub type Byte = u8;

/// A single ASCII code.
pub type Ascii = u8;

/// A `u16`.
pub type Short = u16;

/// A `u32`.
pub type Long = u32;

/// A fraction that can't be negative.
///
/// Both the numerator (top number) and denominator (bottom number) are always
/// positive numbers.
#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

/// A signed byte.
pub type SByte = i8;

/// A byte with no defined meaning.
///
/// Maker notes and other opaque extensions use this type.
pub type Undefined = u8;

/// A signed short - just an `i16`.
pub type SShort = i16;

/// A signed long - just a `i32`.
pub type SLong = i32;

/// A signed fraction.
///
/// Both the numerator (top number) and denominator (bottom number) can be
/// negative.
#[repr(C)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct SRational {
    pub numerator: i32,
    pub denominator: i32,
}

/// A single-precision float, kept as its exact bit pattern.
///
/// Keeping the bits means two decodes of the same bytes always compare equal,
/// even for `NaN`.
///
/// ```
/// use exifscope_types::exif::primitives::Float;
///
/// let f = Float::from_bits(1.5_f32.to_bits());
/// assert_eq!(f.value(), 1.5_f32);
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Float(u32);

impl Float {
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u32 {
        self.0
    }

    pub fn value(self) -> f32 {
        f32::from_bits(self.0)
    }
}

/// A double-precision float, kept as its exact bit pattern.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, PartialOrd, Eq, Ord)]
pub struct Double(u64);

impl Double {
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn to_bits(self) -> u64 {
        self.0
    }

    pub fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}
