//! Contains stuff related to IFDs.
//!
//! For more info, see the [`IfdGroup`] enumeration.

/// An IFD is a set of keys found within a media file's Exif metadata.
///
/// An IFD group is NOT an abstraction - they are _literally_ present in the
/// file.
///
/// IFDs aren't self-describing in their type. Instead, IFD 0 will
/// (optionally) contain keys indicating the locations of sub-IFDs within the
/// metadata slice. These are like pointers, not direct embeds. IFD 1, the
/// thumbnail's IFD, is found by following IFD 0's "next IFD" link.
///
/// That means that IFD 0 is always required if Exif metadata is present, as
/// other groups have no way to self-describe.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum IfdGroup {
    /// Refers to "IFD 0", the primary image's IFD.
    ///
    /// Exif matches the TIFF v6.0 (1992) specification with the provided keys
    /// in this group.
    #[doc(alias = "IFD0")]
    #[doc(alias = "TIFF")]
    _0,

    /// Refers to "IFD 1", which describes the embedded thumbnail.
    ///
    /// It uses the same keys as IFD 0.
    #[doc(alias = "IFD1")]
    #[doc(alias = "Thumbnail")]
    _1,

    /// The "Exif" IFD provides camera-based metadata.
    ///
    /// For example, it's home to important values like exposure information.
    #[doc(alias = "ExifIFD")]
    Exif,

    /// The interoperability IFD specifies info about what software was used to
    /// write the Exif metadata.
    #[doc(alias = "Interoperability")]
    #[doc(alias = "InteroperabilityIFD")]
    #[doc(alias = "InteropIFD")]
    Interop,

    /// The GPS IFD contains location metadata.
    #[doc(alias = "GPSIFD")]
    Gps,
}

impl IfdGroup {
    /// How many groups exist.
    pub const COUNT: usize = 5;

    /// Every group, ordered by [`IfdGroup::index`].
    pub const ALL: [IfdGroup; Self::COUNT] = [
        IfdGroup::_0,
        IfdGroup::_1,
        IfdGroup::Exif,
        IfdGroup::Interop,
        IfdGroup::Gps,
    ];

    /// A stable, dense index for this group.
    ///
    /// ```
    /// use exifscope_types::exif::ifd::IfdGroup;
    ///
    /// for (i, group) in IfdGroup::ALL.iter().enumerate() {
    ///     assert_eq!(group.index(), i);
    /// }
    /// ```
    pub const fn index(&self) -> usize {
        match self {
            Self::_0 => 0,
            Self::_1 => 1,
            Self::Exif => 2,
            Self::Interop => 3,
            Self::Gps => 4,
        }
    }

    /// The tag ID of the pointer tag leading to this group, if it's a sub-IFD.
    ///
    /// ```
    /// use exifscope_types::exif::ifd::IfdGroup;
    ///
    /// assert_eq!(IfdGroup::Exif.pointer_tag(), Some(0x8769));
    /// assert_eq!(IfdGroup::_1.pointer_tag(), None);
    /// ```
    pub const fn pointer_tag(&self) -> Option<u16> {
        match self {
            Self::Exif => Some(0x8769),
            Self::Gps => Some(0x8825),
            Self::Interop => Some(0xA005),
            Self::_0 | Self::_1 => None,
        }
    }

    /// Finds the sub-IFD that a tag in this group points to.
    ///
    /// Exif and GPS pointers live in IFD 0. The interoperability pointer lives
    /// in the Exif IFD, though some writers place it in IFD 0 instead.
    ///
    /// ```
    /// use exifscope_types::exif::ifd::IfdGroup;
    ///
    /// assert_eq!(IfdGroup::_0.sub_ifd_for(0x8825), Some(IfdGroup::Gps));
    /// assert_eq!(IfdGroup::Exif.sub_ifd_for(0xA005), Some(IfdGroup::Interop));
    /// assert_eq!(IfdGroup::Gps.sub_ifd_for(0x8769), None);
    /// ```
    pub const fn sub_ifd_for(&self, tag_id: u16) -> Option<IfdGroup> {
        match (self, tag_id) {
            (Self::_0, 0x8769) => Some(Self::Exif),
            (Self::_0, 0x8825) => Some(Self::Gps),
            (Self::_0 | Self::Exif, 0xA005) => Some(Self::Interop),
            _ => None,
        }
    }

    /// Whether `tag_id` is a sub-IFD pointer tag in any group.
    ///
    /// These tags are structural; they don't describe the image itself.
    pub const fn is_sub_ifd_pointer(tag_id: u16) -> bool {
        matches!(tag_id, 0x8769 | 0x8825 | 0xA005)
    }
}

impl core::fmt::Display for IfdGroup {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::_0 => "IFD0",
            Self::_1 => "IFD1",
            Self::Exif => "Exif IFD",
            Self::Interop => "Interoperability IFD",
            Self::Gps => "GPS IFD",
        })
    }
}
