//! Host scalar values and their TOML coercion policy.
//!
//! A [`Scalar`] keeps the exact width a value was produced with (an `u8` stays
//! an `u8`, a `u128` stays an `u128`). TOML only knows signed 64-bit integers,
//! so [`Scalar::to_toml`] narrows every integer with the same rule:
//!
//! | Source | Result |
//! |--------|--------|
//! | fits in `i64` | TOML integer |
//! | `u128` fitting in `u64` | the `u64` rule |
//! | anything else | decimal string |
//!
//! Characters and UUIDs become strings, enumerations become their underlying
//! integer, and the four date/time kinds map onto TOML's date/time values.
//!
//! ```rust
//! use tomlconv::{Scalar, TomlScalar};
//!
//! assert_eq!(Scalar::U64(100).to_toml(), TomlScalar::Integer(100));
//! assert_eq!(
//!     Scalar::U64(u64::MAX).to_toml(),
//!     TomlScalar::String("18446744073709551615".to_string())
//! );
//! ```

use crate::node::TomlScalar;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use std::fmt;
use uuid::Uuid;

/// A host scalar value of any supported kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    Usize(usize),
    BigInt(BigInt),
    F32(f32),
    F64(f64),
    String(String),
    Char(char),
    Uuid(Uuid),
    Enum(EnumValue),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Date(NaiveDate),
    Time(NaiveTime),
}

/// An enumeration member: its type, its name and its underlying integer.
///
/// The underlying value is stored as `i128` so that every signed or unsigned
/// 64-bit representation fits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub type_name: String,
    pub variant: String,
    pub value: i128,
}

impl EnumValue {
    pub fn new(type_name: impl Into<String>, variant: impl Into<String>, value: i128) -> Self {
        EnumValue {
            type_name: type_name.into(),
            variant: variant.into(),
            value,
        }
    }
}

/// Narrows an unsigned 64-bit value: integer when it fits in `i64`, decimal
/// string otherwise.
#[inline]
#[must_use]
pub fn narrow_u64(v: u64) -> TomlScalar {
    match i64::try_from(v) {
        Ok(i) => TomlScalar::Integer(i),
        Err(_) => TomlScalar::String(v.to_string()),
    }
}

/// Narrows a signed 128-bit value.
#[inline]
#[must_use]
pub fn narrow_i128(v: i128) -> TomlScalar {
    match i64::try_from(v) {
        Ok(i) => TomlScalar::Integer(i),
        Err(_) => TomlScalar::String(v.to_string()),
    }
}

/// Narrows an unsigned 128-bit value through `u64`.
#[inline]
#[must_use]
pub fn narrow_u128(v: u128) -> TomlScalar {
    match u64::try_from(v) {
        Ok(u) => narrow_u64(u),
        Err(_) => TomlScalar::String(v.to_string()),
    }
}

/// Narrows an arbitrary-precision integer.
#[must_use]
pub fn narrow_bigint(v: &BigInt) -> TomlScalar {
    match i64::try_from(v) {
        Ok(i) => TomlScalar::Integer(i),
        Err(_) => TomlScalar::String(v.to_string()),
    }
}

impl Scalar {
    /// Coerces this scalar into the closest TOML scalar.
    #[must_use]
    pub fn to_toml(&self) -> TomlScalar {
        match self {
            Scalar::Bool(b) => TomlScalar::Boolean(*b),
            Scalar::I8(v) => TomlScalar::Integer(i64::from(*v)),
            Scalar::I16(v) => TomlScalar::Integer(i64::from(*v)),
            Scalar::I32(v) => TomlScalar::Integer(i64::from(*v)),
            Scalar::I64(v) => TomlScalar::Integer(*v),
            Scalar::U8(v) => TomlScalar::Integer(i64::from(*v)),
            Scalar::U16(v) => TomlScalar::Integer(i64::from(*v)),
            Scalar::U32(v) => TomlScalar::Integer(i64::from(*v)),
            Scalar::U64(v) => narrow_u64(*v),
            Scalar::I128(v) => narrow_i128(*v),
            Scalar::U128(v) => narrow_u128(*v),
            // isize/usize are at most 64 bits wide on supported targets, but
            // go through the 128-bit path so nothing is silently truncated.
            Scalar::Isize(v) => narrow_i128(*v as i128),
            Scalar::Usize(v) => narrow_u128(*v as u128),
            Scalar::BigInt(v) => narrow_bigint(v),
            Scalar::F32(v) => TomlScalar::Float(f64::from(*v)),
            Scalar::F64(v) => TomlScalar::Float(*v),
            Scalar::String(s) => TomlScalar::String(s.clone()),
            Scalar::Char(c) => TomlScalar::String(c.to_string()),
            Scalar::Uuid(u) => TomlScalar::String(u.to_string()),
            Scalar::Enum(e) => narrow_i128(e.value),
            Scalar::DateTime(dt) => TomlScalar::LocalDateTime(*dt),
            Scalar::DateTimeOffset(dt) => TomlScalar::OffsetDateTime(*dt),
            Scalar::Date(d) => TomlScalar::LocalDate(*d),
            Scalar::Time(t) => TomlScalar::LocalTime(*t),
        }
    }

    /// Returns the value as `i64` if it is an integer that fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self.to_toml() {
            TomlScalar::Integer(i) if self.is_integer() => Some(i),
            _ => None,
        }
    }

    /// Returns `true` for every integer width, including big integers.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Scalar::I8(_)
                | Scalar::I16(_)
                | Scalar::I32(_)
                | Scalar::I64(_)
                | Scalar::I128(_)
                | Scalar::Isize(_)
                | Scalar::U8(_)
                | Scalar::U16(_)
                | Scalar::U32(_)
                | Scalar::U64(_)
                | Scalar::U128(_)
                | Scalar::Usize(_)
                | Scalar::BigInt(_)
        )
    }
}

impl From<TomlScalar> for Scalar {
    fn from(value: TomlScalar) -> Self {
        match value {
            TomlScalar::Boolean(b) => Scalar::Bool(b),
            TomlScalar::Integer(i) => Scalar::I64(i),
            TomlScalar::Float(f) => Scalar::F64(f),
            TomlScalar::String(s) => Scalar::String(s),
            TomlScalar::OffsetDateTime(dt) => Scalar::DateTimeOffset(dt),
            TomlScalar::LocalDateTime(dt) => Scalar::DateTime(dt),
            TomlScalar::LocalDate(d) => Scalar::Date(d),
            TomlScalar::LocalTime(t) => Scalar::Time(t),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::I8(v) => write!(f, "{}", v),
            Scalar::I16(v) => write!(f, "{}", v),
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::I64(v) => write!(f, "{}", v),
            Scalar::I128(v) => write!(f, "{}", v),
            Scalar::Isize(v) => write!(f, "{}", v),
            Scalar::U8(v) => write!(f, "{}", v),
            Scalar::U16(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::U64(v) => write!(f, "{}", v),
            Scalar::U128(v) => write!(f, "{}", v),
            Scalar::Usize(v) => write!(f, "{}", v),
            Scalar::BigInt(v) => write!(f, "{}", v),
            Scalar::F32(v) => write!(f, "{}", v),
            Scalar::F64(v) => write!(f, "{}", v),
            Scalar::String(s) => f.write_str(s),
            Scalar::Char(c) => write!(f, "{}", c),
            Scalar::Uuid(u) => write!(f, "{}", u),
            Scalar::Enum(e) => f.write_str(&e.variant),
            Scalar::DateTime(_)
            | Scalar::DateTimeOffset(_)
            | Scalar::Date(_)
            | Scalar::Time(_) => write!(f, "{}", self.to_toml()),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value)
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    BigInt => BigInt,
    f32 => F32,
    f64 => F64,
    String => String,
    char => Char,
    Uuid => Uuid,
    EnumValue => Enum,
    NaiveDateTime => DateTime,
    DateTime<FixedOffset> => DateTimeOffset,
    NaiveDate => Date,
    NaiveTime => Time,
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<DateTime<chrono::Utc>> for Scalar {
    fn from(value: DateTime<chrono::Utc>) -> Self {
        Scalar::DateTimeOffset(value.fixed_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_integers_widen() {
        assert_eq!(Scalar::I8(-5).to_toml(), TomlScalar::Integer(-5));
        assert_eq!(Scalar::U8(255).to_toml(), TomlScalar::Integer(255));
        assert_eq!(Scalar::U32(u32::MAX).to_toml(), TomlScalar::Integer(4294967295));
        assert_eq!(Scalar::I64(i64::MIN).to_toml(), TomlScalar::Integer(i64::MIN));
    }

    #[test]
    fn test_u64_boundary() {
        assert_eq!(
            Scalar::U64(i64::MAX as u64).to_toml(),
            TomlScalar::Integer(i64::MAX)
        );
        assert_eq!(
            Scalar::U64(i64::MAX as u64 + 1).to_toml(),
            TomlScalar::string("9223372036854775808")
        );
    }

    #[test]
    fn test_128_bit() {
        assert_eq!(Scalar::I128(-42).to_toml(), TomlScalar::Integer(-42));
        assert_eq!(
            Scalar::I128(i128::MIN).to_toml(),
            TomlScalar::string(i128::MIN.to_string())
        );
        assert_eq!(Scalar::U128(7).to_toml(), TomlScalar::Integer(7));
        // fits in u64, still too large for i64
        assert_eq!(
            Scalar::U128(u64::MAX as u128).to_toml(),
            TomlScalar::string("18446744073709551615")
        );
        assert_eq!(
            Scalar::U128(u128::MAX).to_toml(),
            TomlScalar::string(u128::MAX.to_string())
        );
    }

    #[test]
    fn test_pointer_sized() {
        assert_eq!(Scalar::Isize(-1).to_toml(), TomlScalar::Integer(-1));
        assert_eq!(Scalar::Usize(12).to_toml(), TomlScalar::Integer(12));
        assert_eq!(
            Scalar::Usize(usize::MAX).to_toml(),
            narrow_u128(usize::MAX as u128)
        );
    }

    #[test]
    fn test_bigint() {
        assert_eq!(
            Scalar::BigInt(BigInt::from(-9000)).to_toml(),
            TomlScalar::Integer(-9000)
        );
        let huge: BigInt = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(
            Scalar::BigInt(huge).to_toml(),
            TomlScalar::string("123456789012345678901234567890")
        );
    }

    #[test]
    fn test_enum_uses_underlying_value() {
        let color = EnumValue::new("Color", "Green", 2);
        assert_eq!(Scalar::Enum(color).to_toml(), TomlScalar::Integer(2));

        let flags = EnumValue::new("Flags", "All", u64::MAX as i128);
        assert_eq!(
            Scalar::Enum(flags).to_toml(),
            TomlScalar::string("18446744073709551615")
        );
    }

    #[test]
    fn test_char_and_uuid_become_strings() {
        assert_eq!(Scalar::Char('x').to_toml(), TomlScalar::string("x"));
        let id = Uuid::nil();
        assert_eq!(
            Scalar::Uuid(id).to_toml(),
            TomlScalar::string("00000000-0000-0000-0000-000000000000")
        );
    }

    #[test]
    fn test_f32_widens() {
        assert_eq!(Scalar::F32(0.5).to_toml(), TomlScalar::Float(0.5));
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(Scalar::U16(9).as_i64(), Some(9));
        assert_eq!(Scalar::U64(u64::MAX).as_i64(), None);
        assert_eq!(Scalar::String("9".to_string()).as_i64(), None);
        assert_eq!(Scalar::Bool(true).as_i64(), None);
    }
}
