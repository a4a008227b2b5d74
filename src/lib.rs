//! A decoder for the Java Object Serialization Stream Protocol (version 5):
//! the wire format `ObjectOutputStream`/`ObjectInputStream` use to encode
//! object graphs.
//!
//! The entry point is [`parser::parse`], which turns a byte buffer into the
//! top-level sequence of [`value::TypedValue`]s it encodes. This crate only
//! decodes; it never executes `readResolve`/`readObject` and never
//! instantiates a JVM class.

pub mod array;
pub mod class_desc;
pub mod content;
pub mod cursor;
pub mod error;
pub mod field;
pub mod handle;
pub mod object;
pub mod parser;
pub mod postprocess;
pub mod value;

pub use error::{ParseError, Result};
pub use parser::{parse, Parser};
pub use value::TypedValue;
