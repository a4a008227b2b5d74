use std::collections::HashMap;

use serde::Serialize;

/// A single field in a class descriptor's schema.
///
/// `class_name` is only populated when `ty` is `L` (object reference) or
/// `[` (array reference); for primitive codes it is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDesc {
    pub ty: char,
    pub name: String,
    pub class_name: Option<String>,
}

/// One class in a descriptor chain: name, wire identity, per-class field
/// schema, the class-level annotation block, and a link to the superclass
/// descriptor (root first, oldest ancestor last, terminating in `None`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDesc {
    pub name: String,
    pub serial_version_uid: String,
    pub flags: u8,
    pub is_enum: bool,
    pub fields: Vec<FieldDesc>,
    pub annotations: Vec<TypedValue>,
    pub super_desc: Option<Box<ClassDesc>>,
}

impl ClassDesc {
    /// Walks the descriptor chain from this class up to (and including) the
    /// root ancestor, most-derived first.
    pub fn ancestors_most_derived_first(&self) -> Vec<&ClassDesc> {
        let mut chain = Vec::new();
        let mut cur = Some(self);
        while let Some(c) = cur {
            chain.push(c);
            cur = c.super_desc.as_deref();
        }
        chain
    }
}

/// An object instance: the most-derived class plus a per-ancestor field
/// map (`extends`) and the flattened projection of every ancestor's fields
/// (`fields`), where the most-derived ancestor wins on name collisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectDesc {
    pub class: ClassDesc,
    pub extends: HashMap<String, HashMap<String, TypedValue>>,
    pub fields: HashMap<String, TypedValue>,
}

/// An ordered sequence of values decoded from wire `Array` content (or, for
/// post-processed containers, synthesized from a class's annotation block).
/// Carries the same `class`/`extends` auxiliary attributes as `ObjectDesc`
/// so a consumer can inspect an array's element type; `extends` is always
/// empty for genuine wire arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayDesc {
    pub items: Vec<TypedValue>,
    pub class: ClassDesc,
    pub extends: HashMap<String, HashMap<String, TypedValue>>,
}

/// An enum constant: equal by value to its textual name, but distinguishable
/// from a plain string by carrying the enum's class descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumConstant {
    pub name: String,
    pub class: ClassDesc,
    pub extends: HashMap<String, HashMap<String, TypedValue>>,
}

impl PartialEq<str> for EnumConstant {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for EnumConstant {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

/// The tagged universe of values a stream can decode to.
///
/// `Int` covers every type narrower than or equal to 32 bits (`byte`,
/// `short`, `int`); `Long` is kept distinct to preserve the wire's 64-bit
/// integer type. `Char` holds a single Unicode scalar rendered as a
/// one-character `String` rather than a Rust `char`, since a raw UTF-16
/// code unit is not guaranteed to be a valid scalar value on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypedValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(String),
    String(String),
    Bytes(Vec<u8>),
    ClassDesc(ClassDesc),
    Object(ObjectDesc),
    Array(ArrayDesc),
    Enum(EnumConstant),
    /// Internal marker for the end of an annotation block. Never appears in
    /// the exposed top-level sequence or inside a materialized value.
    EndBlock,
}

impl TypedValue {
    pub fn is_end_block(&self) -> bool {
        matches!(self, TypedValue::EndBlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_class(name: &str) -> ClassDesc {
        ClassDesc {
            name: name.to_string(),
            serial_version_uid: "0000000000000000".to_string(),
            flags: 0x02,
            is_enum: false,
            fields: Vec::new(),
            annotations: Vec::new(),
            super_desc: None,
        }
    }

    #[test]
    fn enum_constant_equals_its_name_by_value_not_identity() {
        let ec = EnumConstant {
            name: "ONE".to_string(),
            class: leaf_class("SomeEnum"),
            extends: HashMap::new(),
        };
        assert_eq!(ec, *"ONE");
        assert_ne!(TypedValue::Enum(ec.clone()), TypedValue::String("ONE".to_string()));
    }

    #[test]
    fn ancestors_most_derived_first_walks_the_chain() {
        let base = leaf_class("Base");
        let mut derived = leaf_class("Derived");
        derived.super_desc = Some(Box::new(base));
        let chain: Vec<&str> = derived
            .ancestors_most_derived_first()
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(chain, vec!["Derived", "Base"]);
    }
}
