mod list;
mod map;

use std::collections::HashMap;

use crate::value::{ArrayDesc, ClassDesc, TypedValue};

/// Interprets the writeObject custom data of one container class, turning
/// its raw annotation block back into a named, structured shape.
///
/// Per §4.9, the protocol carries no schema for this data — only the class
/// whose `writeObject` produced it knows how to read it back. A processor
/// encodes that knowledge for one well-known JDK container class.
pub trait PostProcessor {
    /// The fully-qualified class name this processor understands.
    fn class_name(&self) -> &'static str;

    /// The 16-hex-digit `serialVersionUID` this processor was registered
    /// against; a descriptor must match both name and UID to be handled,
    /// so a same-named class with an incompatible custom-data layout falls
    /// through untouched instead of being misread.
    fn serial_version_uid(&self) -> &'static str;

    /// Turns one class's declared-field group (`fields`) and its raw
    /// annotation-block items (`annotations`) into named synthetic fields to
    /// merge into the owning object, replacing both inputs wholesale.
    fn process(
        &self,
        class: &ClassDesc,
        fields: &HashMap<String, TypedValue>,
        annotations: &[TypedValue],
    ) -> HashMap<String, TypedValue>;
}

/// Looks up a [`PostProcessor`] by `(class name, serialVersionUID)` and
/// applies it to one class's raw annotation block during object
/// materialization (§4.7's 0x03 case).
pub struct PostProcessorRegistry {
    processors: Vec<Box<dyn PostProcessor + Send + Sync>>,
}

impl Default for PostProcessorRegistry {
    /// A registry pre-populated with the processors for the JDK container
    /// classes named in §4.9: `ArrayList`, `ArrayDeque`, `HashSet`,
    /// `HashMap`, `Hashtable`, and `EnumMap`.
    fn default() -> Self {
        let mut registry = Self { processors: Vec::new() };
        registry.register(Box::new(list::ArrayListProcessor));
        registry.register(Box::new(list::ArrayDequeProcessor));
        registry.register(Box::new(list::HashSetProcessor));
        registry.register(Box::new(map::HashMapProcessor));
        registry.register(Box::new(map::HashtableProcessor));
        registry.register(Box::new(map::EnumMapProcessor));
        registry
    }
}

impl PostProcessorRegistry {
    /// An empty registry with no built-in processors, for callers that want
    /// to supply their own set from scratch via [`Self::register`].
    pub fn empty() -> Self {
        Self {
            processors: Vec::new(),
        }
    }

    pub fn register(&mut self, processor: Box<dyn PostProcessor + Send + Sync>) {
        self.processors.push(processor);
    }

    /// Looks up the processor registered for `cls` and, if found, runs it
    /// over `fields` (the declared-field group already read for this class)
    /// and `annotations` (the raw items of its own annotation block).
    pub(crate) fn process(
        &self,
        cls: &ClassDesc,
        fields: &HashMap<String, TypedValue>,
        annotations: &[TypedValue],
    ) -> Option<HashMap<String, TypedValue>> {
        let proc = self.processors.iter().find(|p| {
            p.class_name() == cls.name && p.serial_version_uid() == cls.serial_version_uid
        })?;
        Some(proc.process(cls, fields, annotations))
    }
}

/// Wraps `items` as an `ArrayDesc` tagged with the owning class, the shape
/// every exposed processor output uses for both sequences and entry pairs.
fn synthetic_sequence(class: &ClassDesc, items: Vec<TypedValue>) -> TypedValue {
    TypedValue::Array(ArrayDesc {
        items,
        class: class.clone(),
        extends: HashMap::new(),
    })
}

/// Drops a custom-data block's primitive header (`size`/`capacity`/
/// `loadFactor`, written via plain `writeInt`/`writeFloat` calls) and
/// returns the remainder.
///
/// Consecutive primitive writes inside a `writeObject` body coalesce into
/// one leading `BlockData`/`BlockDataLong` run rather than appearing as
/// distinct content items, so every item at the front of the block that
/// decoded as an opaque byte buffer is header, not data; the first content
/// item of any other kind starts the actual elements/entries.
fn drop_leading_bytes(block: &[TypedValue]) -> &[TypedValue] {
    let header_len = block
        .iter()
        .take_while(|item| matches!(item, TypedValue::Bytes(_)))
        .count();
    &block[header_len..]
}

/// Regroups a flat `[key0, value0, key1, value1, ...]` run into a sequence
/// of 2-element key/value pairs, discarding a trailing unpaired item if the
/// block was truncated.
fn pair_up(class: &ClassDesc, items: &[TypedValue]) -> Vec<TypedValue> {
    items
        .chunks(2)
        .filter(|pair| pair.len() == 2)
        .map(|pair| synthetic_sequence(class, pair.to_vec()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_class(name: &str) -> ClassDesc {
        ClassDesc {
            name: name.to_string(),
            serial_version_uid: "0".repeat(16),
            flags: 0x02,
            is_enum: false,
            fields: Vec::new(),
            annotations: Vec::new(),
            super_desc: None,
        }
    }

    #[test]
    fn drop_leading_bytes_strips_only_the_byte_header() {
        let block = vec![
            TypedValue::Bytes(vec![0, 0, 0, 1]),
            TypedValue::String("a".to_string()),
        ];
        assert_eq!(drop_leading_bytes(&block).len(), 1);
    }

    #[test]
    fn drop_leading_bytes_is_a_no_op_without_a_header() {
        let block = vec![TypedValue::String("a".to_string())];
        assert_eq!(drop_leading_bytes(&block).len(), 1);
    }

    #[test]
    fn pair_up_discards_a_trailing_unpaired_item() {
        let class = leaf_class("x");
        let block = vec![TypedValue::Int(1), TypedValue::Int(2), TypedValue::Int(3)];
        assert_eq!(pair_up(&class, &block).len(), 1);
    }
}
