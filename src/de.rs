//! Serde bridge from [`HostValue`] to typed Rust values.
//!
//! `HostValue` implements [`serde::Deserializer`], so a decoded document can
//! be read straight into any `T: Deserialize`:
//!
//! ```rust
//! use serde::Deserialize;
//! use tomlconv::from_str;
//!
//! #[derive(Deserialize, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let point: Point = from_str("x = 1\ny = 2").unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```
//!
//! Enumerations accept a variant name, a variant index or a single-key map.
//! Date/time scalars are handed to visitors as their RFC 3339 text, which is
//! what `chrono`'s deserializers expect. Opaque objects read like maps of their
//! properties; a failing property reads as its error message.

use crate::error::{Error, Result};
use crate::scalar::Scalar;
use crate::HostValue;
use serde::de::value::{MapAccessDeserializer, MapDeserializer, SeqDeserializer};
use serde::de::{self, IntoDeserializer, Visitor};
use serde::forward_to_deserialize_any;

impl<'de> de::Deserializer<'de> for HostValue {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            HostValue::Null => visitor.visit_unit(),
            HostValue::Scalar(s) => visit_scalar(s, visitor),
            HostValue::Seq(seq) => {
                let mut access = SeqDeserializer::new(seq.into_iter());
                let value = visitor.visit_seq(&mut access)?;
                access.end()?;
                Ok(value)
            }
            HostValue::Map(map) => {
                let mut access = MapDeserializer::new(map.into_iter());
                let value = visitor.visit_map(&mut access)?;
                access.end()?;
                Ok(value)
            }
            HostValue::Object(obj) => {
                let entries = obj.property_names().into_iter().map(|name| {
                    let value = obj
                        .property(&name)
                        .unwrap_or_else(|e| HostValue::from(e.message()));
                    (name, value)
                });
                let mut access = MapDeserializer::new(entries);
                let value = visitor.visit_map(&mut access)?;
                access.end()?;
                Ok(value)
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            HostValue::Null => visitor.visit_none(),
            other => visitor.visit_some(other),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self {
            HostValue::Scalar(Scalar::String(s)) => visitor.visit_enum(s.into_deserializer()),
            HostValue::Scalar(Scalar::Enum(e)) => {
                visitor.visit_enum(e.variant.into_deserializer())
            }
            // enums are encoded as their variant index
            HostValue::Scalar(s) if s.is_integer() => {
                match s.as_i64().and_then(|i| u32::try_from(i).ok()) {
                    Some(index) => visitor.visit_enum(index.into_deserializer()),
                    None => Err(Error::custom(format!("invalid enum variant index {}", s))),
                }
            }
            HostValue::Map(map) if map.len() == 1 => {
                visitor.visit_enum(MapAccessDeserializer::new(MapDeserializer::new(
                    map.into_iter(),
                )))
            }
            other => Err(Error::custom(format!(
                "expected enum variant name or single-key map, found {}",
                other.kind()
            ))),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for HostValue {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

fn visit_scalar<'de, V>(scalar: Scalar, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    match scalar {
        Scalar::Bool(b) => visitor.visit_bool(b),
        Scalar::I8(v) => visitor.visit_i8(v),
        Scalar::I16(v) => visitor.visit_i16(v),
        Scalar::I32(v) => visitor.visit_i32(v),
        Scalar::I64(v) => visitor.visit_i64(v),
        Scalar::I128(v) => visitor.visit_i128(v),
        Scalar::Isize(v) => visitor.visit_i64(v as i64),
        Scalar::U8(v) => visitor.visit_u8(v),
        Scalar::U16(v) => visitor.visit_u16(v),
        Scalar::U32(v) => visitor.visit_u32(v),
        Scalar::U64(v) => visitor.visit_u64(v),
        Scalar::U128(v) => visitor.visit_u128(v),
        Scalar::Usize(v) => visitor.visit_u64(v as u64),
        Scalar::BigInt(v) => match i64::try_from(&v) {
            Ok(i) => visitor.visit_i64(i),
            Err(_) => visitor.visit_string(v.to_string()),
        },
        Scalar::F32(v) => visitor.visit_f32(v),
        Scalar::F64(v) => visitor.visit_f64(v),
        Scalar::String(s) => visitor.visit_string(s),
        Scalar::Char(c) => visitor.visit_char(c),
        Scalar::Uuid(u) => visitor.visit_string(u.to_string()),
        Scalar::Enum(e) => visitor.visit_string(e.variant),
        other @ (Scalar::DateTime(_)
        | Scalar::DateTimeOffset(_)
        | Scalar::Date(_)
        | Scalar::Time(_)) => visitor.visit_string(other.to_string()),
    }
}

/// Reads a typed value out of a [`HostValue`].
///
/// # Errors
///
/// Returns an error if the value's shape does not match `T`.
pub fn from_host_value<T>(value: HostValue) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(value)
}
