use thiserror::Error;

/// Every fatal condition the decoder can hit, each carrying the cursor
/// position it was detected at so callers can point at the offending byte.
#[derive(Error)]
pub enum ParseError {
    #[error("premature end of input at {position}: needed {needed} byte(s), {available} available")]
    PrematureEndOfInput {
        position: usize,
        needed: usize,
        available: usize,
    },

    #[error("bad stream magic: {found:#06x}, expected 0xaced")]
    BadMagic { found: u16 },

    #[error("unsupported stream version: {found}, expected 5")]
    UnsupportedVersion { found: u16 },

    #[error("unknown content type code {code:#04x} at {position}")]
    UnknownTypeCode { code: u8, position: usize },

    #[error("content kind {kind} is not allowed at {position}")]
    DisallowedContent { kind: &'static str, position: usize },

    #[error("unsupported content kind {kind} at {position}")]
    Unsupported { kind: &'static str, position: usize },

    #[error("externalizable class data (legacy layout) is not supported for {class_name} at {position}")]
    ExternalizableUnsupported {
        class_name: String,
        position: usize,
    },

    #[error("unknown class flags {flags:#04x} at {position}")]
    UnknownClassFlags { flags: u8, position: usize },

    #[error("unknown field type code {code:?} at {position}")]
    UnknownFieldType { code: u8, position: usize },

    #[error("long string length overflow at {position}: high word must be zero")]
    LongStringOverflow { position: usize },

    #[error("invalid handle reference {index:#x} at {position}")]
    InvalidHandle { index: u32, position: usize },

    #[error("invalid utf-8 payload at {position}")]
    InvalidUtf8 { position: usize },
}

impl std::fmt::Debug for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Mirrors the teacher's `dex_err!` convenience macro: build an `Err(ParseError::Variant{..})`
/// without repeating the enum path at every call site.
#[macro_export]
macro_rules! parse_err {
    ($name:ident { $($arg:tt)* }) => {
        Err($crate::error::ParseError::$name { $($arg)* })
    };
}
