//! Dynamic host value representation.
//!
//! This module provides the [`HostValue`] enum, the object graph the encoder
//! consumes and the decoder produces.
//!
//! ## Core Types
//!
//! - [`HostValue`]: null, scalar, ordered map, sequence or opaque object
//! - [`Scalar`]: every scalar kind, with its original width preserved
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use tomlconv::{host, HostValue};
//!
//! // From primitives
//! let null = HostValue::Null;
//! let boolean = HostValue::from(true);
//! let number = HostValue::from(42u64);
//! let text = HostValue::from("hello");
//!
//! // Using the host! macro
//! let obj = host!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.is_map());
//! ```
//!
//! ### String Form
//!
//! Every value has a plain string form (its `Display`). The encoder uses it
//! when a container is cut off by the depth limit:
//!
//! ```rust
//! use tomlconv::host;
//!
//! let value = host!({ "b": 1, "c": ["x", "y"] });
//! assert_eq!(value.to_string(), "{b = 1, c = [x, y]}");
//! ```

use crate::object::PropertyBag;
use crate::scalar::{EnumValue, Scalar};
use crate::HostMap;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A dynamically-typed host value.
///
/// `Object` holds any [`PropertyBag`]; two objects compare equal only when
/// they are the same allocation.
#[derive(Clone, Debug, Default)]
pub enum HostValue {
    #[default]
    Null,
    Scalar(Scalar),
    Map(HostMap),
    Seq(Vec<HostValue>),
    Object(Arc<dyn PropertyBag>),
}

impl HostValue {
    /// Wraps a property bag as an opaque object value.
    pub fn object<P: PropertyBag + 'static>(bag: P) -> Self {
        HostValue::Object(Arc::new(bag))
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    /// Returns `true` if the value is a scalar.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, HostValue::Scalar(_))
    }

    /// Returns `true` if the value is an ordered map.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, HostValue::Map(_))
    }

    /// Returns `true` if the value is a sequence.
    #[inline]
    #[must_use]
    pub const fn is_seq(&self) -> bool {
        matches!(self, HostValue::Seq(_))
    }

    /// Returns `true` if the value is an opaque object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, HostValue::Object(_))
    }

    /// Returns `true` for maps, sequences and objects, the values that count
    /// against the encoder's depth budget.
    #[inline]
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(
            self,
            HostValue::Map(_) | HostValue::Seq(_) | HostValue::Object(_)
        )
    }

    /// If the value is a scalar, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            HostValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlconv::HostValue;
    ///
    /// assert_eq!(HostValue::from(true).as_bool(), Some(true));
    /// assert_eq!(HostValue::from(42).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Scalar(Scalar::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer of any width that fits in `i64`, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlconv::HostValue;
    ///
    /// assert_eq!(HostValue::from(42u8).as_i64(), Some(42));
    /// assert_eq!(HostValue::from(u64::MAX).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Scalar::as_i64)
    }

    /// If the value is a float, returns it widened to `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HostValue::Scalar(Scalar::F64(f)) => Some(*f),
            HostValue::Scalar(Scalar::F32(f)) => Some(f64::from(*f)),
            _ => None,
        }
    }

    /// If the value is a sequence, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_seq(&self) -> Option<&Vec<HostValue>> {
        match self {
            HostValue::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    /// If the value is a map, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&HostMap> {
        match self {
            HostValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if the value is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&HostValue> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Returns a short name for the value kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            HostValue::Null => "null",
            HostValue::Scalar(_) => "scalar",
            HostValue::Map(_) => "map",
            HostValue::Seq(_) => "sequence",
            HostValue::Object(_) => "object",
        }
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HostValue::Null, HostValue::Null) => true,
            (HostValue::Scalar(a), HostValue::Scalar(b)) => a == b,
            (HostValue::Map(a), HostValue::Map(b)) => a == b,
            (HostValue::Seq(a), HostValue::Seq(b)) => a == b,
            (HostValue::Object(a), HostValue::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Null => Ok(()),
            HostValue::Scalar(s) => write!(f, "{}", s),
            HostValue::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} = {}", k, v)?;
                }
                f.write_str("}")
            }
            HostValue::Seq(seq) => {
                f.write_str("[")?;
                for (i, v) in seq.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            HostValue::Object(obj) => f.write_str(&obj.describe()),
        }
    }
}

impl Serialize for HostValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            HostValue::Null => serializer.serialize_unit(),
            HostValue::Scalar(s) => s.serialize(serializer),
            HostValue::Seq(seq) => {
                use serde::ser::SerializeSeq;
                let mut out = serializer.serialize_seq(Some(seq.len()))?;
                for element in seq {
                    out.serialize_element(element)?;
                }
                out.end()
            }
            HostValue::Map(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            HostValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let names = obj.property_names();
                let mut out = serializer.serialize_map(Some(names.len()))?;
                for name in names {
                    match obj.property(&name) {
                        Ok(v) => out.serialize_entry(&name, &v)?,
                        Err(e) => out.serialize_entry(&name, e.message())?,
                    }
                }
                out.end()
            }
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::I8(v) => serializer.serialize_i8(*v),
            Scalar::I16(v) => serializer.serialize_i16(*v),
            Scalar::I32(v) => serializer.serialize_i32(*v),
            Scalar::I64(v) => serializer.serialize_i64(*v),
            Scalar::I128(v) => serializer.serialize_i128(*v),
            Scalar::Isize(v) => serializer.serialize_i64(*v as i64),
            Scalar::U8(v) => serializer.serialize_u8(*v),
            Scalar::U16(v) => serializer.serialize_u16(*v),
            Scalar::U32(v) => serializer.serialize_u32(*v),
            Scalar::U64(v) => serializer.serialize_u64(*v),
            Scalar::U128(v) => serializer.serialize_u128(*v),
            Scalar::Usize(v) => serializer.serialize_u64(*v as u64),
            Scalar::BigInt(v) => match i64::try_from(v) {
                Ok(i) => serializer.serialize_i64(i),
                Err(_) => serializer.serialize_str(&v.to_string()),
            },
            Scalar::F32(v) => serializer.serialize_f32(*v),
            Scalar::F64(v) => serializer.serialize_f64(*v),
            Scalar::String(s) => serializer.serialize_str(s),
            Scalar::Char(c) => serializer.serialize_char(*c),
            Scalar::Uuid(u) => serializer.serialize_str(&u.to_string()),
            Scalar::Enum(e) => match i64::try_from(e.value) {
                Ok(i) => serializer.serialize_i64(i),
                Err(_) => serializer.serialize_str(&e.value.to_string()),
            },
            Scalar::DateTime(_)
            | Scalar::DateTimeOffset(_)
            | Scalar::Date(_)
            | Scalar::Time(_) => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for HostValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct HostValueVisitor;

        impl<'de> Visitor<'de> for HostValueVisitor {
            type Value = HostValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(HostValue::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(HostValue::from(value))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(HostValue::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                // Keep the signed representation whenever it is lossless.
                match i64::try_from(value) {
                    Ok(i) => Ok(HostValue::from(i)),
                    Err(_) => Ok(HostValue::from(value)),
                }
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(HostValue::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(HostValue::from(value))
            }

            fn visit_char<E>(self, value: char) -> Result<Self::Value, E> {
                Ok(HostValue::from(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(HostValue::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(HostValue::from(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(HostValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(HostValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(HostValue::Seq(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = HostMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(HostValue::Map(values))
            }
        }

        deserializer.deserialize_any(HostValueVisitor)
    }
}

impl<'de> Deserialize<'de> for HostMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match HostValue::deserialize(deserializer)? {
            HostValue::Map(map) => Ok(map),
            other => Err(serde::de::Error::custom(format!(
                "expected map, found {}",
                other.kind()
            ))),
        }
    }
}

impl Serialize for HostMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            out.serialize_entry(k, v)?;
        }
        out.end()
    }
}

// TryFrom implementations for extracting values from HostValue
impl TryFrom<HostValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: HostValue) -> crate::Result<Self> {
        value.as_i64().ok_or_else(|| {
            crate::Error::custom(format!("expected integer, found {:?}", value))
        })
    }
}

impl TryFrom<HostValue> for String {
    type Error = crate::Error;

    fn try_from(value: HostValue) -> crate::Result<Self> {
        match value {
            HostValue::Scalar(Scalar::String(s)) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

macro_rules! host_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for HostValue {
                fn from(value: $ty) -> Self {
                    HostValue::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

host_from_scalar!(
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    BigInt,
    f32,
    f64,
    String,
    &str,
    char,
    Uuid,
    EnumValue,
    NaiveDateTime,
    DateTime<FixedOffset>,
    DateTime<Utc>,
    NaiveDate,
    NaiveTime,
);

impl From<Scalar> for HostValue {
    fn from(value: Scalar) -> Self {
        HostValue::Scalar(value)
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(value: Vec<HostValue>) -> Self {
        HostValue::Seq(value)
    }
}

impl From<HostMap> for HostValue {
    fn from(value: HostMap) -> Self {
        HostValue::Map(value)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(HostValue::Null, Into::into)
    }
}
