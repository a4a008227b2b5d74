/// The closed set of content kinds a stream can encode, in the order their
/// type codes appear on the wire (code = `0x70 + Self as u8`).
///
/// Re-architects the source's "dispatch by computed handler name" into a
/// closed enum with a single `match`, the way the teacher re-architects
/// DEX's per-item-kind parsing into one struct per section rather than
/// dynamic lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Null,
    Reference,
    ClassDesc,
    Object,
    String,
    Array,
    Class,
    BlockData,
    EndBlockData,
    Reset,
    BlockDataLong,
    Exception,
    LongString,
    ProxyClassDesc,
    Enum,
}

pub const TYPE_CODE_BASE: u8 = 0x70;

impl ContentKind {
    /// The lowest and highest valid type codes on the wire (`0x70..=0x7E`).
    pub const MIN_CODE: u8 = TYPE_CODE_BASE;
    pub const MAX_CODE: u8 = 0x7E;

    pub fn from_code(code: u8) -> Option<Self> {
        if !(Self::MIN_CODE..=Self::MAX_CODE).contains(&code) {
            return None;
        }
        let kind = match code - TYPE_CODE_BASE {
            0 => ContentKind::Null,
            1 => ContentKind::Reference,
            2 => ContentKind::ClassDesc,
            3 => ContentKind::Object,
            4 => ContentKind::String,
            5 => ContentKind::Array,
            6 => ContentKind::Class,
            7 => ContentKind::BlockData,
            8 => ContentKind::EndBlockData,
            9 => ContentKind::Reset,
            10 => ContentKind::BlockDataLong,
            11 => ContentKind::Exception,
            12 => ContentKind::LongString,
            13 => ContentKind::ProxyClassDesc,
            14 => ContentKind::Enum,
            _ => unreachable!("code bounds already checked"),
        };
        Some(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ContentKind::Null => "Null",
            ContentKind::Reference => "Reference",
            ContentKind::ClassDesc => "ClassDesc",
            ContentKind::Object => "Object",
            ContentKind::String => "String",
            ContentKind::Array => "Array",
            ContentKind::Class => "Class",
            ContentKind::BlockData => "BlockData",
            ContentKind::EndBlockData => "EndBlockData",
            ContentKind::Reset => "Reset",
            ContentKind::BlockDataLong => "BlockDataLong",
            ContentKind::Exception => "Exception",
            ContentKind::LongString => "LongString",
            ContentKind::ProxyClassDesc => "ProxyClassDesc",
            ContentKind::Enum => "Enum",
        }
    }
}

/// The content kinds accepted at a "class-descriptor position" (§4.4):
/// an inline descriptor, a proxy descriptor, a null, or a back-reference.
pub const CLASS_DESC_POSITION: &[ContentKind] = &[
    ContentKind::ClassDesc,
    ContentKind::ProxyClassDesc,
    ContentKind::Null,
    ContentKind::Reference,
];
