//! Serde bridge from Rust values to [`HostValue`].
//!
//! [`HostValueSerializer`] turns any `T: Serialize` into the dynamic object
//! graph the encoder works on:
//!
//! - **Structs** become [`Record`] objects, so they are encoded through the
//!   same property-bag path as any other opaque object. A field whose
//!   `Serialize` impl fails does not abort the conversion; it becomes a
//!   failing property and its message is written in its place.
//! - **Maps** become [`HostMap`]s in iteration order. Non-string scalar keys
//!   are stringified; sequence, map or struct keys are rejected.
//! - **Sequences, tuples and byte slices** become sequences.
//! - **Date/time types** that serialize as text (chrono's `NaiveDate`,
//!   `DateTime` and friends) become date/time scalars.
//! - **Unit variants** become enumeration scalars whose underlying value is
//!   the variant index.
//! - **Newtype, tuple and struct variants** become single-entry maps keyed by
//!   the variant name.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Serialize;
//! use tomlconv::{to_host_value, HostValue};
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let value = to_host_value(&Data { x: 1, y: 2 }).unwrap();
//! assert!(value.is_object());
//! ```

use crate::document;
use crate::error::{Error, Result};
use crate::object::{PropertyError, Record};
use crate::scalar::{EnumValue, Scalar};
use crate::{HostMap, HostValue};
use serde::ser::{self, Serialize};

/// Serializer whose output is a [`HostValue`].
pub struct HostValueSerializer;

pub struct SerializeVec {
    vec: Vec<HostValue>,
}

pub struct SerializeMap {
    map: HostMap,
    current_key: Option<String>,
}

pub struct SerializeRecord {
    record: Record,
}

pub struct SerializeVariant<S> {
    variant: &'static str,
    inner: S,
}

impl ser::Serializer for HostValueSerializer {
    type Ok = HostValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVariant<SerializeVec>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = SerializeVariant<SerializeRecord>;

    fn serialize_bool(self, v: bool) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_i8(self, v: i8) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_char(self, v: char) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_str(self, v: &str) -> Result<HostValue> {
        Ok(HostValue::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<HostValue> {
        Ok(HostValue::Seq(v.iter().map(|&b| HostValue::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<HostValue> {
        Ok(HostValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<HostValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<HostValue> {
        Ok(HostValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<HostValue> {
        Ok(HostValue::Null)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
    ) -> Result<HostValue> {
        Ok(HostValue::from(EnumValue::new(
            name,
            variant,
            i128::from(variant_index),
        )))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<HostValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<HostValue>
    where
        T: ?Sized + Serialize,
    {
        let mut map = HostMap::with_capacity(1);
        map.insert(variant.to_string(), to_host_value(value)?);
        Ok(HostValue::Map(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVariant<SerializeVec>> {
        Ok(SerializeVariant {
            variant,
            inner: SerializeVec::new(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0)))
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(name))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVariant<SerializeRecord>> {
        Ok(SerializeVariant {
            variant,
            inner: SerializeRecord::new(name),
        })
    }

    // chrono types serialize through here, so date-time text keeps its type.
    fn collect_str<T>(self, value: &T) -> Result<HostValue>
    where
        T: ?Sized + std::fmt::Display,
    {
        let text = value.to_string();
        Ok(match document::parse_datetime(&text) {
            Some(scalar) => HostValue::Scalar(Scalar::from(scalar)),
            None => HostValue::from(text),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize) -> Self {
        SerializeMap {
            map: HostMap::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl SerializeRecord {
    fn new(name: &'static str) -> Self {
        SerializeRecord {
            record: Record::new(name),
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_host_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<HostValue> {
        Ok(HostValue::Seq(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<HostValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<HostValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeVariant<SerializeVec> {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(&mut self.inner, value)
    }

    fn end(self) -> Result<HostValue> {
        let inner = ser::SerializeSeq::end(self.inner)?;
        Ok(single_entry(self.variant, inner))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_host_value(key)? {
            HostValue::Scalar(Scalar::String(s)) => s,
            container if container.is_container() => {
                return Err(Error::unsupported_type(&format!(
                    "map key must be a scalar, found {}",
                    container.kind()
                )));
            }
            other => other.to_string(),
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_host_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<HostValue> {
        Ok(HostValue::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = to_host_value(value).map_err(|e| PropertyError::new(property_message(e)));
        self.record.push(key.to_string(), value);
        Ok(())
    }

    fn end(self) -> Result<HostValue> {
        Ok(HostValue::object(self.record))
    }
}

impl ser::SerializeStructVariant for SerializeVariant<SerializeRecord> {
    type Ok = HostValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<HostValue> {
        let inner = ser::SerializeStruct::end(self.inner)?;
        Ok(single_entry(self.variant, inner))
    }
}

/// Converts any `T: Serialize` into a [`HostValue`].
///
/// # Errors
///
/// Returns an error only when a `Serialize` impl fails outside of a struct
/// field. Field failures are kept as failing properties instead.
pub fn to_host_value<T: Serialize + ?Sized>(value: &T) -> Result<HostValue> {
    value.serialize(HostValueSerializer)
}

fn single_entry(key: &str, value: HostValue) -> HostValue {
    let mut map = HostMap::with_capacity(1);
    map.insert(key.to_string(), value);
    HostValue::Map(map)
}

// Property failures surface as plain text, without the error-kind prefix.
fn property_message(err: Error) -> String {
    match err {
        Error::Custom(msg) => msg,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serializer as _;
    use serde::Serialize;
    use std::collections::BTreeMap;

    struct Failing;

    impl Serialize for Failing {
        fn serialize<S: ser::Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(ser::Error::custom("boom"))
        }
    }

    #[derive(Serialize)]
    struct Probe {
        ok: u8,
        bad: Failing,
    }

    #[derive(Serialize)]
    enum Shape {
        Empty,
        Circle(f64),
        Rect { w: u32, h: u32 },
        Pair(i8, i8),
    }

    #[test]
    fn test_struct_becomes_record() {
        let value = to_host_value(&Probe { ok: 1, bad: Failing }).unwrap();
        let HostValue::Object(obj) = value else {
            panic!("Expected object");
        };
        assert_eq!(obj.type_name(), "Probe");
        assert_eq!(obj.property_names(), vec!["ok", "bad"]);
        assert_eq!(obj.property("ok"), Ok(HostValue::from(1u8)));
        assert_eq!(obj.property("bad").unwrap_err().message(), "boom");
    }

    #[test]
    fn test_top_level_failure_propagates() {
        assert!(to_host_value(&Failing).is_err());
    }

    #[test]
    fn test_unit_variant_is_enum() {
        let value = to_host_value(&Shape::Empty).unwrap();
        assert_eq!(
            value,
            HostValue::from(EnumValue::new("Shape", "Empty", 0))
        );
    }

    #[test]
    fn test_data_variants_are_single_entry_maps() {
        let circle = to_host_value(&Shape::Circle(1.5)).unwrap();
        assert_eq!(circle.get("Circle"), Some(&HostValue::from(1.5)));

        let pair = to_host_value(&Shape::Pair(1, -1)).unwrap();
        assert_eq!(
            pair.get("Pair"),
            Some(&HostValue::Seq(vec![HostValue::from(1i8), HostValue::from(-1i8)]))
        );

        let rect = to_host_value(&Shape::Rect { w: 2, h: 3 }).unwrap();
        assert!(rect.get("Rect").is_some_and(HostValue::is_object));
    }

    #[test]
    fn test_map_keys_are_stringified() {
        let mut map = BTreeMap::new();
        map.insert(2, "two");
        map.insert(1, "one");
        let value = to_host_value(&map).unwrap();
        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["1", "2"]);
    }

    #[test]
    fn test_container_map_keys_are_unsupported() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8, 2], "pair");
        let err = to_host_value(&map).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
        assert!(err.to_string().contains("found sequence"));
    }

    #[test]
    fn test_dates_keep_their_type() {
        let day = chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            to_host_value(&day).unwrap(),
            HostValue::Scalar(Scalar::Date(day))
        );

        let at = chrono::DateTime::parse_from_rfc3339("2024-03-01T10:30:00+02:00").unwrap();
        assert_eq!(
            to_host_value(&at).unwrap(),
            HostValue::Scalar(Scalar::DateTimeOffset(at))
        );

        let time = chrono::NaiveTime::from_hms_opt(7, 45, 0).unwrap();
        assert_eq!(
            to_host_value(&time).unwrap(),
            HostValue::Scalar(Scalar::Time(time))
        );

        // Plain strings that look like dates stay strings.
        assert_eq!(
            to_host_value("2024-03-01").unwrap(),
            HostValue::from("2024-03-01")
        );
    }

    #[test]
    fn test_wide_integers() {
        assert_eq!(
            to_host_value(&u128::MAX).unwrap(),
            HostValue::Scalar(Scalar::U128(u128::MAX))
        );
        assert_eq!(
            HostValueSerializer.serialize_i128(-3).unwrap(),
            HostValue::Scalar(Scalar::I128(-3))
        );
    }

    #[test]
    fn test_bytes_and_options() {
        assert_eq!(
            HostValueSerializer.serialize_bytes(&[1, 2]).unwrap(),
            HostValue::Seq(vec![HostValue::from(1u8), HostValue::from(2u8)])
        );
        assert_eq!(to_host_value(&None::<i32>).unwrap(), HostValue::Null);
        assert_eq!(to_host_value(&Some(3i32)).unwrap(), HostValue::from(3i32));
    }
}
