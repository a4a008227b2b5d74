use crate::error::Result;
use crate::parse_err;
use crate::parser::Parser;
use crate::value::{FieldDesc, TypedValue};

impl<'a> Parser<'a> {
    /// Decodes the value of one field given its schema entry (§4.5):
    /// primitive types read a fixed-width value directly off the wire;
    /// object and array types recurse through the full content dispatcher,
    /// since their value is itself a content item (object, array, string,
    /// null, or a back-reference).
    pub(crate) fn read_field_value(&mut self, field: &FieldDesc) -> Result<TypedValue> {
        match field.ty {
            'B' => Ok(TypedValue::Int(self.cursor.i8()? as i32)),
            'C' => {
                let unit = self.cursor.u16be()?;
                Ok(TypedValue::Char(
                    char::from_u32(unit as u32)
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| unit.to_string()),
                ))
            }
            'D' => Ok(TypedValue::Double(self.cursor.f64be()?)),
            'F' => Ok(TypedValue::Float(self.cursor.f32be()?)),
            'I' => Ok(TypedValue::Int(self.cursor.i32be()?)),
            'J' => {
                let hi = self.cursor.i32be()? as i64;
                let lo = self.cursor.i32be()? as u32 as i64;
                Ok(TypedValue::Long((hi << 32) | lo))
            }
            'S' => {
                let v = self.cursor.i16be()?;
                Ok(TypedValue::Int(v as i32))
            }
            'Z' => Ok(TypedValue::Bool(self.cursor.u8()? != 0)),
            'L' | '[' => self.dispatch(None),
            other => parse_err!(UnknownFieldType {
                code: other as u8,
                position: self.cursor.position()
            }),
        }
    }
}
