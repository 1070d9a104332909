use winnow::{
    Parser as _, Stateful,
    binary::{Endianness as WinnowEndianness, i8, i16, i32, u8, u16, u32, u64},
    error::EmptyError,
    token::take,
};

use super::{
    Stream,
    error::{ExifFatalError, ExifFatalResult},
    options::UnknownTypePolicy,
};
use exifscope_types::exif::{Field, FieldData, FieldTag, primitives::*};

/// Where a field's value bytes live.
///
/// Values of four bytes or fewer are stored in the entry itself. Larger ones
/// are stored elsewhere in the blob, and the entry holds their offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ValueLocation<'a> {
    /// The value's bytes, taken straight from the entry.
    Inline(&'a [u8]),

    /// An absolute offset into the blob, plus the value's size in bytes.
    Indirect { offset: u32, len: u64 },
}

impl<'a> ValueLocation<'a> {
    /// Picks the location for a value of `len` bytes.
    fn new(raw: &'a [u8], len: u64, endianness: WinnowEndianness) -> Result<Self, EmptyError> {
        if len <= 4_u64 {
            return Ok(Self::Inline(&raw[..len as usize]));
        }

        let offset: u32 = u32::<_, EmptyError>(endianness).parse_next(&mut &*raw)?;
        Ok(Self::Indirect { offset, len })
    }

    /// Grabs the value's bytes.
    ///
    /// Offsets are relative to the beginning of the blob.
    fn resolve(self, blob: &'a [u8], tag: u16) -> ExifFatalResult<&'a [u8]> {
        match self {
            Self::Inline(bytes) => Ok(bytes),
            Self::Indirect { offset, len } => {
                let start = offset as u64;
                let end = start + len;

                if end > blob.len() as u64 {
                    log::error!(
                        "Field said its data is stored outside the blob! \
                        tag: `{tag:#06x}`, offset: `{offset}`, len: `{len}`, \
                        blob len: `{}`",
                        blob.len()
                    );
                    return Err(ExifFatalError::ValueOutOfBounds { tag, offset, len });
                }

                Ok(&blob[start as usize..end as usize])
            }
        }
    }
}

/// Parses out one entry from an IFD, resolving its value.
pub fn parse_value(input: &mut Stream) -> ExifFatalResult<Field> {
    let endianness = input.state.endianness;
    let group = input.state.current_ifd;
    let cut_short = |_: EmptyError| ExifFatalError::EntryCutShort { group };

    // tag (2 bytes), type (2 bytes), count (4 bytes)
    let raw_tag: u16 = u16(endianness)
        .parse_next(&mut input.input)
        .map_err(cut_short)?;
    let raw_ty: u16 = u16(endianness)
        .parse_next(&mut input.input)
        .map_err(cut_short)?;
    let count: u32 = u32(endianness)
        .parse_next(&mut input.input)
        .map_err(cut_short)?;

    // the value or offset (4 bytes. we'll handle deciding in a sec)
    let raw: &[u8] = take(4_usize)
        .parse_next(&mut input.input)
        .map_err(cut_short)?;

    let tag = FieldTag::new(group, raw_tag);
    log::trace!(
        "(field info...
    tag: {tag},
    ty: {raw_ty},
    count: {count},
    value or offset: {raw:x?}
)"
    );

    let ty: PrimitiveTy = match PrimitiveTy::try_from(raw_ty) {
        Ok(ty) => ty,
        Err(()) => match input.state.options.unknown_types {
            UnknownTypePolicy::Reject => {
                log::error!("Encountered unknown field type: `{raw_ty}` on {tag}");
                return Err(ExifFatalError::UnsupportedType {
                    tag: raw_tag,
                    got: raw_ty,
                });
            }
            UnknownTypePolicy::Preserve => {
                log::warn!("Keeping raw bytes for unknown field type `{raw_ty}` on {tag}");
                return Ok(Field {
                    tag,
                    data: FieldData::Unknown {
                        code: raw_ty,
                        count,
                        raw: raw.to_vec(),
                    },
                });
            }
        },
    };

    // warn if the real type or count isn't what the standard says
    if let FieldTag::Known(known_tag) = tag {
        if !known_tag.types().contains(&ty) {
            log::warn!(
                "Field `{known_tag:?}` had a type mismatch! \
                Continuing parsing with wrong type anyway... \
                got: `{ty:?}`, \
                expected: {:?}",
                known_tag.types()
            );
        }
        if !known_tag.count().allows(count) {
            log::warn!(
                "Field `{known_tag:?}` had an unexpected count. got: `{count}`, expected: {:?}",
                known_tag.count()
            );
        }
    }

    // check how large the stored data is
    let total_size: u64 = ty.size_bytes() as u64 * count as u64;
    log::trace!("total size for field: `{total_size}`");

    let data: &[u8] = ValueLocation::new(raw, total_size, endianness)
        .map_err(cut_short)?
        .resolve(input.state.blob, raw_tag)?;

    // construct the stateful stream containing the field's data
    let prim_stream = &mut PrimitiveStream {
        input: data,
        state: PrimitiveState {
            tag: raw_tag,
            endianness,
            count,
            ty,
        },
    };

    let field_data = match count {
        // if the count is zero, we won't perform any work at all
        0_u32 => {
            log::trace!("There are no stored primitives in this field. Returning early!");
            FieldData::None(ty)
        }

        // when we just have one, parse it alone and return immediately
        1_u32 => FieldData::Primitive(parse_primitive(prim_stream)?),

        // other counts are higher; we'll make a list
        _ => FieldData::List {
            list: parse_primitive_list(prim_stream)?,
            ty,
        },
    };

    Ok(Field {
        tag,
        data: field_data,
    })
}

#[derive(Clone, Debug)]
struct PrimitiveState {
    tag: u16,
    endianness: WinnowEndianness,
    count: u32,
    ty: PrimitiveTy,
}
type PrimitiveStream<'s> = Stateful<&'s [u8], PrimitiveState>;

/// Parses a list of primitives.
fn parse_primitive_list(input: &mut PrimitiveStream) -> ExifFatalResult<Vec<Primitive>> {
    let mut v: Vec<Primitive> = Vec::with_capacity(input.state.count as usize);

    for i in 0..input.state.count {
        v.push(parse_primitive(input).inspect_err(|e| {
            log::error!(
                "Failed to create primitive #{i} on tag `{:#06x}`. err: {e}",
                input.state.tag
            )
        })?);
    }

    Ok(v)
}

/// Parses a single primitive.
fn parse_primitive(input: &mut PrimitiveStream) -> ExifFatalResult<Primitive> {
    let endianness = input.state.endianness;
    let tag = input.state.tag;
    let outta_data = |_: EmptyError| ExifFatalError::OuttaData { tag };

    let primitive = match input.state.ty {
        PrimitiveTy::Byte => Primitive::Byte(u8.parse_next(input).map_err(outta_data)?),
        PrimitiveTy::Ascii => Primitive::Ascii(u8.parse_next(input).map_err(outta_data)?),
        PrimitiveTy::Undefined => Primitive::Undefined(u8.parse_next(input).map_err(outta_data)?),
        PrimitiveTy::SByte => Primitive::SByte(i8.parse_next(input).map_err(outta_data)?),

        PrimitiveTy::Short => {
            Primitive::Short(u16(endianness).parse_next(input).map_err(outta_data)?)
        }
        PrimitiveTy::SShort => {
            Primitive::SShort(i16(endianness).parse_next(input).map_err(outta_data)?)
        }

        PrimitiveTy::Long => {
            Primitive::Long(u32(endianness).parse_next(input).map_err(outta_data)?)
        }
        PrimitiveTy::SLong => {
            Primitive::SLong(i32(endianness).parse_next(input).map_err(outta_data)?)
        }

        PrimitiveTy::Rational => Primitive::Rational(Rational {
            numerator: u32(endianness).parse_next(input).map_err(outta_data)?,
            denominator: u32(endianness).parse_next(input).map_err(outta_data)?,
        }),
        PrimitiveTy::SRational => Primitive::SRational(SRational {
            numerator: i32(endianness).parse_next(input).map_err(outta_data)?,
            denominator: i32(endianness).parse_next(input).map_err(outta_data)?,
        }),

        PrimitiveTy::Float => Primitive::Float(Float::from_bits(
            u32(endianness).parse_next(input).map_err(outta_data)?,
        )),
        PrimitiveTy::Double => Primitive::Double(Double::from_bits(
            u64(endianness).parse_next(input).map_err(outta_data)?,
        )),
    };

    Ok(primitive)
}
