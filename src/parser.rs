use crate::content::{ContentKind, CLASS_DESC_POSITION};
use crate::cursor::ByteCursor;
use crate::error::{ParseError, Result};
use crate::handle::HandleTable;
use crate::parse_err;
use crate::postprocess::PostProcessorRegistry;
use crate::value::TypedValue;

pub const STREAM_MAGIC: u16 = 0xACED;
pub const STREAM_VERSION: u16 = 5;

/// The main decoder state machine: owns the byte cursor, the handle table,
/// and the post-processor registry, and recursively decodes content items
/// into [`TypedValue`]s.
///
/// Per §5, a `Parser` is single-threaded and single-use: it is driven by one
/// caller over one input buffer and never suspends.
pub struct Parser<'a> {
    pub(crate) cursor: ByteCursor<'a>,
    pub(crate) handles: HandleTable,
    pub(crate) registry: PostProcessorRegistry,
}

/// Decodes every top-level content item in `data` and returns them in wire
/// order. This is the single public entry point into the core; callers are
/// responsible for producing `data` (file I/O is explicitly out of scope).
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
pub fn parse(data: &[u8]) -> Result<Vec<TypedValue>> {
    let mut parser = Parser::new(data);
    parser.parse_stream()
}

impl<'a> Parser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            handles: HandleTable::new(),
            registry: PostProcessorRegistry::default(),
        }
    }

    /// Builds a parser with a caller-supplied post-processor registry,
    /// letting consumers extend or replace the default container shapes.
    pub fn with_registry(data: &'a [u8], registry: PostProcessorRegistry) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            handles: HandleTable::new(),
            registry,
        }
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    fn parse_stream(&mut self) -> Result<Vec<TypedValue>> {
        let magic = self.cursor.u16be()?;
        if magic != STREAM_MAGIC {
            return parse_err!(BadMagic { found: magic });
        }
        let version = self.cursor.u16be()?;
        if version != STREAM_VERSION {
            return parse_err!(UnsupportedVersion { found: version });
        }

        let mut items = Vec::new();
        while !self.cursor.is_at_end() {
            let position = self.cursor.position();
            let item = self.dispatch(None)?;
            if item.is_end_block() {
                return parse_err!(DisallowedContent {
                    kind: "EndBlockData",
                    position
                });
            }
            items.push(item);
        }
        Ok(items)
    }

    /// Decodes one content item. `allow` restricts which kinds are legal at
    /// this call site; `None` means any kind is legal (used at the top
    /// level and inside annotation blocks).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub(crate) fn dispatch(&mut self, allow: Option<&[ContentKind]>) -> Result<TypedValue> {
        let position = self.cursor.position();
        let code = self.cursor.u8()?;
        let kind = ContentKind::from_code(code)
            .ok_or(ParseError::UnknownTypeCode { code, position })?;

        if let Some(allowed) = allow {
            if !allowed.contains(&kind) {
                return parse_err!(DisallowedContent {
                    kind: kind.name(),
                    position
                });
            }
        }

        match kind {
            ContentKind::Null => Ok(TypedValue::Null),
            ContentKind::Reference => {
                let handle = self.cursor.u32be()?;
                self.handles
                    .get(handle)
                    .map(|v| v.clone())
                    .ok_or(ParseError::InvalidHandle {
                        index: handle,
                        position,
                    })
            }
            ContentKind::ClassDesc => {
                let cls = self.read_class_desc_node()?;
                Ok(TypedValue::ClassDesc(cls))
            }
            ContentKind::Object => self.read_object().map(TypedValue::Object),
            ContentKind::String => {
                let s = self.cursor.utf_short()?;
                let (_, value) = self.handles.append(TypedValue::String(s));
                Ok(value)
            }
            ContentKind::Array => self.read_array().map(TypedValue::Array),
            ContentKind::Class => {
                // The class wrapper's only payload is the nested descriptor;
                // the wrapping content item itself owns the handle slot.
                let cls = self.read_class_desc_position()?;
                let value = match cls {
                    Some(c) => TypedValue::ClassDesc(c),
                    None => TypedValue::Null,
                };
                let (_, value) = self.handles.append(value);
                Ok(value)
            }
            ContentKind::BlockData => {
                let len = self.cursor.u8()? as usize;
                Ok(TypedValue::Bytes(self.cursor.slice(len)?))
            }
            ContentKind::BlockDataLong => {
                let len = self.cursor.u32be()? as usize;
                Ok(TypedValue::Bytes(self.cursor.slice(len)?))
            }
            ContentKind::EndBlockData => Ok(TypedValue::EndBlock),
            ContentKind::LongString => {
                let s = self.cursor.utf_long()?;
                let (_, value) = self.handles.append(TypedValue::String(s));
                Ok(value)
            }
            ContentKind::Enum => self.read_enum().map(TypedValue::Enum),
            ContentKind::Reset | ContentKind::Exception | ContentKind::ProxyClassDesc => {
                parse_err!(Unsupported {
                    kind: kind.name(),
                    position
                })
            }
        }
    }

    /// Decodes a "class-descriptor position" (§4.4): a plain descriptor,
    /// a proxy descriptor (fatal), a null, or a back-reference.
    pub(crate) fn read_class_desc_position(&mut self) -> Result<Option<ClassDescResult>> {
        let position = self.cursor.position();
        match self.dispatch(Some(CLASS_DESC_POSITION))? {
            TypedValue::Null => Ok(None),
            TypedValue::ClassDesc(c) => Ok(Some(c)),
            _ => parse_err!(Unsupported {
                kind: "reference at a class-descriptor position resolving to a non-class value",
                position
            }),
        }
    }

    /// Reads content items until the end-of-block sentinel, returning the
    /// items preceding it (the sentinel itself is consumed but not included).
    pub(crate) fn read_annotation_block(&mut self) -> Result<Vec<TypedValue>> {
        let mut items = Vec::new();
        loop {
            let item = self.dispatch(None)?;
            if item.is_end_block() {
                break;
            }
            items.push(item);
        }
        Ok(items)
    }
}

/// Alias kept local to this module so `read_class_desc_position`'s signature
/// reads naturally; it is simply `crate::value::ClassDesc`.
pub(crate) type ClassDescResult = crate::value::ClassDesc;
