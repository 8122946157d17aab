//! Record codec for MEMEM
//!
//! Rows are kept in the host's own record layout:
//!
//! ```text
//! +----------+-----------+-----------+-----+
//! | presence | field 0   | field 1   | ... |
//! | 1 byte   | i32 (LE)  | i32 (LE)  |     |
//! +----------+-----------+-----------+-----+
//! ```
//!
//! The presence byte is always zero because NULLs are not stored. Only the
//! field payload is kept per row; the presence byte is dropped on write and
//! put back on read, so neither direction looks at individual fields.

use bytes::{BufMut, Bytes, BytesMut};
use byteorder::{ByteOrder, LittleEndian};

use crate::catalog::{FieldType, Schema};
use crate::error::{Error, Result};

/// Length of the leading presence byte
pub const PRESENCE_LEN: usize = 1;

/// Width of a stored `Long` field
pub const LONG_WIDTH: usize = 4;

/// Byte length of a stored payload with `field_count` fields
pub fn payload_width(field_count: usize) -> usize {
    LONG_WIDTH * field_count
}

/// Byte length of a host row buffer with `field_count` fields
pub fn row_width(field_count: usize) -> usize {
    PRESENCE_LEN + payload_width(field_count)
}

/// Converts host row buffers to stored payloads and back for one table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCodec {
    field_count: usize,
}

impl RecordCodec {
    /// Create a codec for rows with `field_count` integer fields
    pub fn new(field_count: usize) -> Self {
        Self { field_count }
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Host row width this codec accepts and produces
    pub fn row_width(&self) -> usize {
        row_width(self.field_count)
    }

    /// Strip the presence byte and copy out the field payload.
    pub fn decode_for_write(&self, buf: &[u8]) -> Result<Bytes> {
        let expected = self.row_width();
        if buf.len() != expected {
            return Err(Error::RowWidthMismatch {
                expected,
                actual: buf.len(),
            });
        }
        Ok(Bytes::copy_from_slice(&buf[PRESENCE_LEN..]))
    }

    /// Prepend a zero presence byte to a stored payload.
    pub fn encode_for_read(&self, payload: &[u8]) -> Result<Bytes> {
        let expected = payload_width(self.field_count);
        if payload.len() != expected {
            return Err(Error::InvariantViolation(format!(
                "stored row is {} bytes, table payload is {}",
                payload.len(),
                expected
            )));
        }
        let mut out = BytesMut::with_capacity(PRESENCE_LEN + payload.len());
        out.put_u8(0);
        out.put_slice(payload);
        Ok(out.freeze())
    }
}

/// A typed field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    /// 32-bit signed integer
    Long(i32),
}

impl FieldValue {
    /// The field type this value is stored as
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Long(_) => FieldType::Long,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            FieldValue::Long(v) => Some(*v),
        }
    }

    fn encode(&self, buf: &mut BytesMut) {
        match self {
            FieldValue::Long(v) => buf.put_i32_le(*v),
        }
    }

    fn decode(field_type: FieldType, field: &str, buf: &[u8]) -> Result<(Self, usize)> {
        match field_type {
            FieldType::Long => {
                if buf.len() < LONG_WIDTH {
                    return Err(Error::RowWidthMismatch {
                        expected: LONG_WIDTH,
                        actual: buf.len(),
                    });
                }
                Ok((FieldValue::Long(LittleEndian::read_i32(buf)), LONG_WIDTH))
            }
            other => Err(Error::UnsupportedFieldType {
                field: field.to_string(),
                field_type: other,
            }),
        }
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Long(v)
    }
}

/// Build a host row buffer from typed values.
pub fn pack_row(values: &[FieldValue]) -> Bytes {
    let mut buf = BytesMut::with_capacity(row_width(values.len()));
    buf.put_u8(0);
    for value in values {
        value.encode(&mut buf);
    }
    buf.freeze()
}

/// Read the typed values out of a host row buffer.
pub fn unpack_row(schema: &Schema, row: &[u8]) -> Result<Vec<FieldValue>> {
    let expected = schema.row_width();
    if row.len() != expected {
        return Err(Error::RowWidthMismatch {
            expected,
            actual: row.len(),
        });
    }

    let mut offset = PRESENCE_LEN;
    let mut values = Vec::with_capacity(schema.field_count());
    for field in schema.fields() {
        let (value, read) = FieldValue::decode(field.field_type, &field.name, &row[offset..])?;
        offset += read;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(row_width(0), 1);
        assert_eq!(row_width(2), 9);
        assert_eq!(payload_width(3), 12);
        assert_eq!(RecordCodec::new(4).row_width(), 17);
    }

    #[test]
    fn test_decode_strips_presence_byte() {
        let codec = RecordCodec::new(2);
        let payload = codec
            .decode_for_write(&[0, 1, 0, 0, 0, 2, 0, 0, 0])
            .unwrap();
        assert_eq!(&payload[..], &[1, 0, 0, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn test_decode_ignores_presence_bits() {
        // The presence byte is skipped, not inspected.
        let codec = RecordCodec::new(1);
        let payload = codec.decode_for_write(&[0xff, 7, 0, 0, 0]).unwrap();
        assert_eq!(&payload[..], &[7, 0, 0, 0]);
    }

    #[test]
    fn test_decode_rejects_wrong_width() {
        let codec = RecordCodec::new(2);
        let result = codec.decode_for_write(&[0, 1, 0, 0, 0]);
        assert!(matches!(
            result,
            Err(Error::RowWidthMismatch {
                expected: 9,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_encode_prepends_zero_byte() {
        let codec = RecordCodec::new(1);
        let row = codec.encode_for_read(&[9, 0, 0, 0]).unwrap();
        assert_eq!(&row[..], &[0, 9, 0, 0, 0]);

        let result = codec.encode_for_read(&[9, 0]);
        assert!(matches!(result, Err(Error::InvariantViolation(_))));
    }

    #[test]
    fn test_pack_and_unpack_negative_values() {
        let schema = Schema::from_types([FieldType::Long, FieldType::Long]);
        let row = pack_row(&[FieldValue::Long(-1), FieldValue::Long(i32::MAX)]);
        assert_eq!(
            &row[..],
            &[0, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]
        );

        let values = unpack_row(&schema, &row).unwrap();
        assert_eq!(values, vec![FieldValue::from(-1), FieldValue::from(i32::MAX)]);
        assert!(values.iter().all(|v| v.field_type() == FieldType::Long));
        assert_eq!(values[0].as_i32(), Some(-1));
    }

    #[test]
    fn test_unpack_rejects_unsupported_schema() {
        let schema = Schema::from_types([FieldType::Long, FieldType::Short]);
        // 1 + 4 + 4 bytes by the Long width rule, but the second field is not storable
        let result = unpack_row(&schema, &[0, 1, 0, 0, 0, 2, 0, 0, 0]);
        assert!(matches!(result, Err(Error::UnsupportedFieldType { .. })));
    }
}
