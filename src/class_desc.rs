use crate::error::Result;
use crate::parse_err;
use crate::parser::Parser;
use crate::value::{ClassDesc, FieldDesc, TypedValue};

/// SC_* flag bits (§4.4, §4.7). The low nibble (`SC_WRITE_METHOD`,
/// `SC_SERIALIZABLE`, `SC_EXTERNALIZABLE`, `SC_BLOCK_DATA`) selects the
/// per-class data layout at object-materialization time (§4.7); bit 0x10
/// marks the descriptor as an enum. A class descriptor carries these flags
/// unconditionally — they only affect how the *object data that follows a
/// descriptor* is read, not how the descriptor itself is parsed.
pub(crate) const SC_WRITE_METHOD: u8 = 0x01;
pub(crate) const SC_SERIALIZABLE: u8 = 0x02;
pub(crate) const SC_EXTERNALIZABLE: u8 = 0x04;
pub(crate) const SC_BLOCK_DATA: u8 = 0x08;
const SC_ENUM: u8 = 0x10;

impl<'a> Parser<'a> {
    /// Decodes one `ClassDesc` content item (§4.4): name, handle reservation,
    /// serialVersionUID, flags, field schema, class annotations, and a
    /// recursive superclass descriptor.
    ///
    /// The handle is reserved before any of the descriptor's own fields are
    /// read and assigned only once the whole node (including its superclass
    /// chain) is complete, so a self-referential annotation inside this
    /// descriptor's own block would observe a reserved-but-unassigned slot
    /// rather than recursing forever.
    pub(crate) fn read_class_desc_node(&mut self) -> Result<ClassDesc> {
        let name = self.cursor.utf_short()?;
        let handle = self.handles.reserve();

        let serial_version_uid = self.cursor.hex(8)?;
        let flags = self.cursor.u8()?;
        let is_enum = flags & SC_ENUM != 0;

        let field_count = self.cursor.u16be()? as usize;
        let mut fields = Vec::with_capacity(field_count);
        for _ in 0..field_count {
            fields.push(self.read_field_desc()?);
        }

        let annotations = self.read_annotation_block()?;
        let super_desc = self.read_class_desc_position()?.map(Box::new);

        let desc = ClassDesc {
            name,
            serial_version_uid,
            flags,
            is_enum,
            fields,
            annotations,
            super_desc,
        };
        self.handles.assign(handle, TypedValue::ClassDesc(desc.clone()));
        Ok(desc)
    }

    /// Decodes one field-schema entry (§4.4): a type code, a name, and,
    /// for object and array types, a reference to the field's class name.
    pub(crate) fn read_field_desc(&mut self) -> Result<FieldDesc> {
        let ty = self.cursor.u8()? as char;
        let name = self.cursor.utf_short()?;
        let class_name = match ty {
            'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z' => None,
            'L' | '[' => match self.dispatch(None)? {
                TypedValue::String(s) => Some(s),
                _ => {
                    return parse_err!(UnknownFieldType {
                        code: ty as u8,
                        position: self.cursor.position()
                    })
                }
            },
            _ => {
                return parse_err!(UnknownFieldType {
                    code: ty as u8,
                    position: self.cursor.position()
                })
            }
        };
        Ok(FieldDesc {
            ty,
            name,
            class_name,
        })
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
    fn a_descriptor_carries_its_raw_flags_unvalidated() {
        let mut data = header();
        data.push(0x72); // TC_CLASSDESC
        data.extend_from_slice(&[0x00, 0x01, b'A']);
        data.extend_from_slice(&[0; 8]); // serialVersionUID
        data.push(SC_SERIALIZABLE | SC_EXTERNALIZABLE | 0x80); // nonsensical but parses
        data.extend_from_slice(&[0x00, 0x00]);
        data.push(0x78); // TC_ENDBLOCKDATA
        data.push(0x70); // TC_NULL superclass

        let items = parse(&data).unwrap();
        match &items[0] {
            TypedValue::ClassDesc(cls) => {
                assert_eq!(cls.flags, SC_SERIALIZABLE | SC_EXTERNALIZABLE | 0x80)
            }
            other => panic!("expected ClassDesc, got {:?}", other),
        }
    }

    #[test]
    fn decodes_a_leaf_class_descriptor_with_no_fields() {
        let mut data = header();
        data.push(0x72); // TC_CLASSDESC
        data.extend_from_slice(&[0x00, 0x01, b'A']);
        data.extend_from_slice(&[0; 8]);
        data.push(SC_SERIALIZABLE);
        data.extend_from_slice(&[0x00, 0x00]); // field count
        data.push(0x78); // TC_ENDBLOCKDATA
        data.push(0x70); // TC_NULL (no superclass)

        let items = parse(&data).unwrap();
        match &items[0] {
            TypedValue::ClassDesc(cls) => {
                assert_eq!(cls.name, "A");
                assert!(cls.fields.is_empty());
                assert!(cls.super_desc.is_none());
            }
            other => panic!("expected ClassDesc, got {:?}", other),
        }
    }
}
