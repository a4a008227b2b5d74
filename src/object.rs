use std::collections::HashMap;

use crate::class_desc::{SC_BLOCK_DATA, SC_EXTERNALIZABLE, SC_SERIALIZABLE, SC_WRITE_METHOD};
use crate::content::ContentKind;
use crate::error::Result;
use crate::parse_err;
use crate::parser::Parser;
use crate::value::{ArrayDesc, ClassDesc, EnumConstant, ObjectDesc, TypedValue};

const ANNOTATION_KEY: &str = "@";

impl<'a> Parser<'a> {
    /// Decodes one `Object` content item (§4.7): the class descriptor,
    /// then, walking the ancestor chain from the root class down to the
    /// most-derived one, each class's per-class data (§4.7's flag-selected
    /// layout), composing both the per-ancestor grouping (`extends`) and
    /// the flattened, most-derived-wins field view (`fields`).
    ///
    /// The handle is reserved immediately after the class descriptor and
    /// before any field is read, so a field that refers back to this object
    /// (a cyclic reference, legal on the wire) resolves to the
    /// not-yet-fully-populated slot rather than recursing.
    pub(crate) fn read_object(&mut self) -> Result<ObjectDesc> {
        let position = self.cursor.position();
        let class = self
            .read_class_desc_position()?
            .ok_or(crate::error::ParseError::DisallowedContent {
                kind: "Null",
                position,
            })?;
        let handle = self.handles.reserve();

        let chain: Vec<ClassDesc> = class
            .ancestors_most_derived_first()
            .into_iter()
            .cloned()
            .collect();

        let mut extends: HashMap<String, HashMap<String, TypedValue>> = HashMap::new();
        let mut fields: HashMap<String, TypedValue> = HashMap::new();

        for cls in chain.iter().rev() {
            let group = self.read_class_data(cls)?;
            for (k, v) in &group {
                fields.insert(k.clone(), v.clone());
            }
            extends.insert(cls.name.clone(), group);
        }

        let object = ObjectDesc {
            class,
            extends,
            fields,
        };
        self.handles
            .assign(handle, TypedValue::Object(object.clone()));
        Ok(object)
    }

    /// Reads one class's per-class data (§4.7), selecting its layout from
    /// `flags & 0x0F`.
    fn read_class_data(&mut self, cls: &ClassDesc) -> Result<HashMap<String, TypedValue>> {
        match cls.flags & 0x0F {
            SC_SERIALIZABLE => self.read_declared_fields(cls),
            f if f == SC_SERIALIZABLE | SC_WRITE_METHOD => {
                let mut group = self.read_declared_fields(cls)?;
                let block = self.read_annotation_block()?;
                if let Some(replacement) = self.registry.process(cls, &group, &block) {
                    return Ok(replacement);
                }
                group.insert(ANNOTATION_KEY.to_string(), wrap_annotation_block(cls, block));
                Ok(group)
            }
            SC_EXTERNALIZABLE => parse_err!(ExternalizableUnsupported {
                class_name: cls.name.clone(),
                position: self.cursor.position()
            }),
            f if f == SC_EXTERNALIZABLE | SC_BLOCK_DATA => {
                let block = self.read_annotation_block()?;
                let mut group = HashMap::new();
                group.insert(ANNOTATION_KEY.to_string(), wrap_annotation_block(cls, block));
                Ok(group)
            }
            other => parse_err!(UnknownClassFlags {
                flags: other,
                position: self.cursor.position()
            }),
        }
    }

    fn read_declared_fields(&mut self, cls: &ClassDesc) -> Result<HashMap<String, TypedValue>> {
        let mut group = HashMap::new();
        for field in &cls.fields {
            let value = self.read_field_value(field)?;
            group.insert(field.name.clone(), value);
        }
        Ok(group)
    }

    /// Decodes one `Enum` content item (§4.6): the enum's class descriptor,
    /// then the constant's name. The handle is reserved before the name is
    /// read, matching the ordering the protocol requires for every other
    /// handle-bearing content kind.
    pub(crate) fn read_enum(&mut self) -> Result<EnumConstant> {
        let position = self.cursor.position();
        let class = self
            .read_class_desc_position()?
            .ok_or(crate::error::ParseError::DisallowedContent {
                kind: "Null",
                position,
            })?;
        let handle = self.handles.reserve();

        let name = match self.dispatch(Some(&[ContentKind::String, ContentKind::Reference]))? {
            TypedValue::String(s) => s,
            _ => {
                return parse_err!(Unsupported {
                    kind: "non-string enum constant name",
                    position: self.cursor.position()
                })
            }
        };

        let constant = EnumConstant {
            name,
            class,
            extends: HashMap::new(),
        };
        self.handles
            .assign(handle, TypedValue::Enum(constant.clone()));
        Ok(constant)
    }
}

fn wrap_annotation_block(cls: &ClassDesc, block: Vec<TypedValue>) -> TypedValue {
    TypedValue::Array(ArrayDesc {
        items: block,
        class: cls.clone(),
        extends: HashMap::new(),
    })
}
