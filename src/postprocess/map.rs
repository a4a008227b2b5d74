use std::collections::HashMap;

use super::{drop_leading_bytes, pair_up, synthetic_sequence, PostProcessor};
use crate::value::{ClassDesc, TypedValue};

/// `HashMap.writeObject` writes capacity, load factor, and size through
/// plain primitive writes ahead of the entries, then each entry as a
/// consecutive key/value pair.
pub(crate) struct HashMapProcessor;

impl PostProcessor for HashMapProcessor {
    fn class_name(&self) -> &'static str {
        "java.util.HashMap"
    }

    fn serial_version_uid(&self) -> &'static str {
        "0507dac1c31660d1"
    }

    fn process(
        &self,
        class: &ClassDesc,
        _fields: &HashMap<String, TypedValue>,
        annotations: &[TypedValue],
    ) -> HashMap<String, TypedValue> {
        let rest = drop_leading_bytes(annotations);
        let entries = pair_up(class, rest);
        let mut out = HashMap::new();
        out.insert("entries".to_string(), synthetic_sequence(class, entries));
        out
    }
}

/// `Hashtable.writeObject` uses the same capacity/load-factor/size header
/// as `HashMap`, followed by key/value pairs.
pub(crate) struct HashtableProcessor;

impl PostProcessor for HashtableProcessor {
    fn class_name(&self) -> &'static str {
        "java.util.Hashtable"
    }

    fn serial_version_uid(&self) -> &'static str {
        "13bb0f25214ae4b8"
    }

    fn process(
        &self,
        class: &ClassDesc,
        _fields: &HashMap<String, TypedValue>,
        annotations: &[TypedValue],
    ) -> HashMap<String, TypedValue> {
        let rest = drop_leading_bytes(annotations);
        let entries = pair_up(class, rest);
        let mut out = HashMap::new();
        out.insert("entries".to_string(), synthetic_sequence(class, entries));
        out
    }
}

/// `EnumMap.writeObject` writes only a leading entry count (its key
/// universe is derived from the enum type, not serialized), then each
/// entry as a consecutive key/value pair.
pub(crate) struct EnumMapProcessor;

impl PostProcessor for EnumMapProcessor {
    fn class_name(&self) -> &'static str {
        "java.util.EnumMap"
    }

    fn serial_version_uid(&self) -> &'static str {
        "065d7df7be907ca1"
    }

    fn process(
        &self,
        class: &ClassDesc,
        _fields: &HashMap<String, TypedValue>,
        annotations: &[TypedValue],
    ) -> HashMap<String, TypedValue> {
        let rest = drop_leading_bytes(annotations);
        let entries = pair_up(class, rest);
        let mut out = HashMap::new();
        out.insert("entries".to_string(), synthetic_sequence(class, entries));
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
    fn hash_map_pairs_up_keys_and_values_after_the_header() {
        let class = leaf_class("java.util.HashMap");
        let block = vec![
            TypedValue::Bytes(vec![0; 12]),
            TypedValue::String("k".to_string()),
            TypedValue::String("v".to_string()),
        ];
        let out = HashMapProcessor.process(&class, &HashMap::new(), &block);
        match out.get("entries").unwrap() {
            TypedValue::Array(arr) => {
                assert_eq!(arr.items.len(), 1);
                match &arr.items[0] {
                    TypedValue::Array(pair) => assert_eq!(pair.items.len(), 2),
                    other => panic!("expected pair Array, got {:?}", other),
                }
            }
            other => panic!("expected Array, got {:?}", other),
        }
    }
}
