use std::collections::HashMap;

use crate::error::Result;
use crate::parser::Parser;
use crate::value::{ArrayDesc, FieldDesc, TypedValue};

impl<'a> Parser<'a> {
    /// Decodes one `Array` content item (§4.8): the array's class
    /// descriptor (whose name is a JVM array signature, e.g. `"[I"` or
    /// `"[Ljava.lang.String;"`), a handle reservation, a `u32` element
    /// count, and that many elements, each read as a field value of the
    /// array's component type.
    pub(crate) fn read_array(&mut self) -> Result<ArrayDesc> {
        let position = self.cursor.position();
        let class = self
            .read_class_desc_position()?
            .ok_or(crate::error::ParseError::DisallowedContent {
                kind: "Null",
                position,
            })?;
        let handle = self.handles.reserve();

        let component_ty = class
            .name
            .as_bytes()
            .get(1)
            .copied()
            .unwrap_or(b'L') as char;
        let component = FieldDesc {
            ty: component_ty,
            name: String::new(),
            class_name: None,
        };

        let len = self.cursor.u32be()? as usize;
        let mut items = Vec::with_capacity(len);
        for _ in 0..len {
            items.push(self.read_field_value(&component)?);
        }

        let array = ArrayDesc {
            items,
            class,
            extends: HashMap::new(),
        };
        self.handles
            .assign(handle, TypedValue::Array(array.clone()));
        Ok(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn header() -> Vec<u8> {
        vec![0xAC, 0xED, 0x00, 0x05]
    }

    #[test]
    fn decodes_an_int_array() {
        let mut data = header();
        data.push(0x75); // TC_ARRAY
        data.push(0x72); // TC_CLASSDESC
        data.extend_from_slice(&[0x00, 0x02, b'[', b'I']);
        data.extend_from_slice(&[0; 8]);
        data.push(0x02); // SC_SERIALIZABLE
        data.extend_from_slice(&[0x00, 0x00]); // no fields
        data.push(0x78); // TC_ENDBLOCKDATA
        data.push(0x70); // TC_NULL superclass
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x02]); // length 2
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]); // elem 0 = 1
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x02]); // elem 1 = 2

        let items = parse(&data).unwrap();
        match &items[0] {
            TypedValue::Array(arr) => {
                assert_eq!(arr.items, vec![TypedValue::Int(1), TypedValue::Int(2)]);
            }
            other => panic!("expected Array, got {:?}", other),
        }
    }

    /// `[[Ljava.lang.String;` two levels deep: `[["a", "b"], ["c"]]`.
    #[test]
    fn decodes_a_nested_string_array() {
        fn push_string_array(
            data: &mut Vec<u8>,
            elem_class_written: &mut bool,
            strings: &[&str],
        ) {
            data.push(0x75); // TC_ARRAY
            if *elem_class_written {
                data.push(0x71); // TC_REFERENCE
                data.extend_from_slice(&0x7E_0002u32.to_be_bytes());
            } else {
                data.push(0x72); // TC_CLASSDESC
                data.extend_from_slice(&[0x00, 0x13]);
                data.extend_from_slice(b"[Ljava.lang.String;");
                data.extend_from_slice(&[0; 8]);
                data.push(0x02); // SC_SERIALIZABLE
                data.extend_from_slice(&[0x00, 0x00]);
                data.push(0x78); // TC_ENDBLOCKDATA
                data.push(0x70); // TC_NULL superclass
                *elem_class_written = true;
            }
            data.extend_from_slice(&(strings.len() as u32).to_be_bytes());
            for s in strings {
                data.push(0x74); // TC_STRING
                let bytes = s.as_bytes();
                data.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
                data.extend_from_slice(bytes);
            }
        }

        let mut data = header();
        data.push(0x75); // TC_ARRAY (outer)
        data.push(0x72); // TC_CLASSDESC
        data.extend_from_slice(&[0x00, 0x14]);
        data.extend_from_slice(b"[[Ljava.lang.String;");
        data.extend_from_slice(&[0; 8]);
        data.push(0x02); // SC_SERIALIZABLE
        data.extend_from_slice(&[0x00, 0x00]);
        data.push(0x78); // TC_ENDBLOCKDATA
        data.push(0x70); // TC_NULL superclass
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x02]); // 2 rows

        let mut written = false;
        push_string_array(&mut data, &mut written, &["a", "b"]);
        push_string_array(&mut data, &mut written, &["c"]);

        let items = parse(&data).unwrap();
        match &items[0] {
            TypedValue::Array(outer) => {
                assert_eq!(outer.items.len(), 2);
                match &outer.items[0] {
                    TypedValue::Array(row) => {
                        assert_eq!(
                            row.items,
                            vec![
                                TypedValue::String("a".to_string()),
                                TypedValue::String("b".to_string())
                            ]
                        );
                    }
                    other => panic!("expected Array, got {:?}", other),
                }
                match &outer.items[1] {
                    TypedValue::Array(row) => {
                        assert_eq!(row.items, vec![TypedValue::String("c".to_string())]);
                    }
                    other => panic!("expected Array, got {:?}", other),
                }
            }
            other => panic!("expected Array, got {:?}", other),
        }
    }
}
