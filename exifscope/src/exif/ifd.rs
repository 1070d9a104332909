use winnow::{
    Parser,
    binary::{u16, u32},
    error::EmptyError,
};

use rustc_hash::FxHashMap;

use super::{
    NextIfdPointer, Stream,
    error::{ExifFatalError, ExifFatalResult},
    value::parse_value,
};
use exifscope_types::exif::{Field, ifd::IfdGroup};

/// An image file directory found within Exif metadata.
///
/// Fields keep the order they had in the blob. Tag IDs are unique within an
/// IFD.
#[derive(Clone, Debug)]
pub struct Ifd {
    group: IfdGroup,
    fields: Vec<Field>,

    /// Tag ID to its position in `fields`.
    index: FxHashMap<u16, usize>,
}

impl Ifd {
    fn with_capacity(group: IfdGroup, capacity: usize) -> Self {
        Self {
            group,
            fields: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[cfg(test)]
    pub(crate) fn new(group: IfdGroup, fields: Vec<Field>) -> Self {
        let mut ifd = Self::with_capacity(group, fields.len());
        fields.into_iter().for_each(|f| ifd.insert(f));
        ifd
    }

    /// Which group this IFD was parsed as.
    pub fn group(&self) -> IfdGroup {
        self.group
    }

    /// All fields on this IFD, in blob order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Finds the field with the given tag ID.
    pub fn get(&self, tag_id: u16) -> Option<&Field> {
        self.index.get(&tag_id).map(|&i| &self.fields[i])
    }

    /// Whether this IFD has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Adds a field, replacing any earlier field with the same tag ID.
    fn insert(&mut self, field: Field) {
        match self.index.get(&field.tag_id()) {
            Some(&i) => {
                log::warn!(
                    "The {} repeats tag {}. Keeping the later one.",
                    self.group,
                    field.tag
                );
                self.fields[i] = field;
            }
            None => {
                self.index.insert(field.tag_id(), self.fields.len());
                self.fields.push(field);
            }
        }
    }
}

// the index is derived from `fields`, so it's left out of comparisons
impl PartialEq for Ifd {
    fn eq(&self, other: &Self) -> bool {
        (self.group, &self.fields) == (other.group, &other.fields)
    }
}
impl Eq for Ifd {}
impl PartialOrd for Ifd {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        (self.group, &self.fields).partial_cmp(&(other.group, &other.fields))
    }
}
impl core::hash::Hash for Ifd {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.group.hash(state);
        self.fields.hash(state);
    }
}

/// Parses out an entire IFD.
///
/// `input` must already start at the IFD's entry count.
pub fn parse_ifd(input: &mut Stream) -> ExifFatalResult<(Ifd, NextIfdPointer)> {
    let endianness = input.state.endianness;
    let group = input.state.current_ifd;

    let entry_count: u16 = u16(endianness).parse_next(input).map_err(|_: EmptyError| {
        log::error!("Couldn't find count on {group} - ran out of data!");
        ExifFatalError::IfdNoEntryCount { group }
    })?;

    // each entry is 12 bytes, then there's a 4-byte pointer to the next IFD
    let needed = entry_count as usize * 12 + 4;
    if input.input.len() < needed {
        log::error!(
            "The {group} says it has `{entry_count}` entries, but only `{}` bytes remain.",
            input.input.len()
        );
        return Err(ExifFatalError::IfdEntriesOutOfBounds { group, entry_count });
    }

    if entry_count == 0 {
        log::warn!("The {group} reported itself as having zero fields.");
    }

    log::trace!("Parsing `{entry_count}` fields...");
    let mut ifd = Ifd::with_capacity(group, entry_count as usize);
    for _ in 0..entry_count {
        ifd.insert(parse_value(input)?);
    }
    log::trace!("Completed field parsing!");

    let next_ifd_location = {
        let raw_location: u32 = u32(endianness).parse_next(input).map_err(|_: EmptyError| {
            log::error!("The {group} didn't contain a pointer to the next IFD!");
            ExifFatalError::IfdEntriesOutOfBounds { group, entry_count }
        })?;

        if raw_location == 0_u32 {
            log::trace!("There won't be a next IFD.");
            None
        } else {
            log::trace!("Another IFD was detected! index: `{raw_location}`");
            Some(raw_location)
        }
    };

    Ok((ifd, next_ifd_location))
}
