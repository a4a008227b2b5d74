use std::collections::HashMap;

use super::{drop_leading_bytes, synthetic_sequence, PostProcessor};
use crate::value::{ClassDesc, TypedValue};

/// `ArrayList.writeObject` writes its element count via plain `writeInt`,
/// then each element through the default object stream. The count ends up
/// packed into the block's leading `BlockData` run; only the elements that
/// follow it matter here.
pub(crate) struct ArrayListProcessor;

impl PostProcessor for ArrayListProcessor {
    fn class_name(&self) -> &'static str {
        "java.util.ArrayList"
    }

    fn serial_version_uid(&self) -> &'static str {
        "7881d21d99c7619d"
    }

    fn process(
        &self,
        class: &ClassDesc,
        _fields: &HashMap<String, TypedValue>,
        annotations: &[TypedValue],
    ) -> HashMap<String, TypedValue> {
        let elements = drop_leading_bytes(annotations).to_vec();
        let mut out = HashMap::new();
        out.insert("elements".to_string(), synthetic_sequence(class, elements));
        out
    }
}

/// `ArrayDeque.writeObject` uses the same shape as `ArrayList`: a primitive
/// header, then the elements front-to-back.
pub(crate) struct ArrayDequeProcessor;

impl PostProcessor for ArrayDequeProcessor {
    fn class_name(&self) -> &'static str {
        "java.util.ArrayDeque"
    }

    fn serial_version_uid(&self) -> &'static str {
        "207cda2e240da08b"
    }

    fn process(
        &self,
        class: &ClassDesc,
        _fields: &HashMap<String, TypedValue>,
        annotations: &[TypedValue],
    ) -> HashMap<String, TypedValue> {
        let elements = drop_leading_bytes(annotations).to_vec();
        let mut out = HashMap::new();
        out.insert("elements".to_string(), synthetic_sequence(class, elements));
        out
    }
}

/// `HashSet.writeObject` writes the backing map's capacity, load factor, and
/// size through plain primitive writes ahead of the elements.
pub(crate) struct HashSetProcessor;

impl PostProcessor for HashSetProcessor {
    fn class_name(&self) -> &'static str {
        "java.util.HashSet"
    }

    fn serial_version_uid(&self) -> &'static str {
        "ba44859596b8b734"
    }

    fn process(
        &self,
        class: &ClassDesc,
        _fields: &HashMap<String, TypedValue>,
        annotations: &[TypedValue],
    ) -> HashMap<String, TypedValue> {
        let elements = drop_leading_bytes(annotations).to_vec();
        let mut out = HashMap::new();
        out.insert("elements".to_string(), synthetic_sequence(class, elements));
        out
    }
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
    fn array_list_skips_the_leading_size_and_keeps_elements() {
        let class = leaf_class("java.util.ArrayList");
        let block = vec![
            TypedValue::Bytes(vec![0x00, 0x00, 0x00, 0x02]),
            TypedValue::String("a".to_string()),
            TypedValue::String("b".to_string()),
        ];
        let out = ArrayListProcessor.process(&class, &HashMap::new(), &block);
        match out.get("elements").unwrap() {
            TypedValue::Array(arr) => assert_eq!(arr.items.len(), 2),
            other => panic!("expected Array, got {:?}", other),
        }
    }

    #[test]
    fn hash_set_skips_capacity_load_factor_and_size() {
        let class = leaf_class("java.util.HashSet");
        let block = vec![
            TypedValue::Bytes(vec![0x00, 0x00, 0x00, 0x10, 0x3f, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]),
            TypedValue::String("only".to_string()),
        ];
        let out = HashSetProcessor.process(&class, &HashMap::new(), &block);
        match out.get("elements").unwrap() {
            TypedValue::Array(arr) => assert_eq!(arr.items.len(), 1),
            other => panic!("expected Array, got {:?}", other),
        }
    }
}
