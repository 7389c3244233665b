//! The generic TOML document tree.
//!
//! [`TomlNode`] is the intermediate representation shared by the encoder and
//! the decoder. It models exactly the shapes a TOML document can hold:
//!
//! - [`TomlNode::Table`]: an ordered key/value mapping
//! - [`TomlNode::TableArray`]: a non-empty array whose elements are all tables
//! - [`TomlNode::Array`]: any other array, possibly of mixed kinds
//! - [`TomlNode::Scalar`]: a leaf value
//!
//! Text conversion lives in [`crate::document`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use std::fmt;

/// An ordered TOML table. Keys keep their insertion order.
pub type TomlTable = IndexMap<String, TomlNode>;

/// A node of the generic TOML document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum TomlNode {
    Table(TomlTable),
    TableArray(Vec<TomlTable>),
    Array(Vec<TomlNode>),
    Scalar(TomlScalar),
}

/// A TOML leaf value.
#[derive(Clone, Debug, PartialEq)]
pub enum TomlScalar {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    OffsetDateTime(DateTime<FixedOffset>),
    LocalDateTime(NaiveDateTime),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
}

impl TomlNode {
    /// Returns `true` if this node is a table.
    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, TomlNode::Table(_))
    }

    /// Returns a short name for the node kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            TomlNode::Table(_) => "table",
            TomlNode::TableArray(_) => "table array",
            TomlNode::Array(_) => "array",
            TomlNode::Scalar(_) => "scalar",
        }
    }

    /// If the node is a table, returns a reference to it.
    #[must_use]
    pub fn as_table(&self) -> Option<&TomlTable> {
        match self {
            TomlNode::Table(t) => Some(t),
            _ => None,
        }
    }

    /// If the node is a scalar, returns a reference to it.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&TomlScalar> {
        match self {
            TomlNode::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Builds an array node, promoting it to a table array when it is
    /// non-empty and every element is a table.
    #[must_use]
    pub fn array_or_table_array(elements: Vec<TomlNode>) -> TomlNode {
        if elements.is_empty() || !elements.iter().all(TomlNode::is_table) {
            return TomlNode::Array(elements);
        }

        let tables = elements
            .into_iter()
            .filter_map(|node| match node {
                TomlNode::Table(t) => Some(t),
                _ => None,
            })
            .collect();
        TomlNode::TableArray(tables)
    }
}

impl TomlScalar {
    /// Convenience constructor for string scalars.
    pub fn string(s: impl Into<String>) -> Self {
        TomlScalar::String(s.into())
    }
}

impl From<TomlScalar> for TomlNode {
    fn from(value: TomlScalar) -> Self {
        TomlNode::Scalar(value)
    }
}

impl From<TomlTable> for TomlNode {
    fn from(value: TomlTable) -> Self {
        TomlNode::Table(value)
    }
}

impl fmt::Display for TomlScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomlScalar::Boolean(b) => write!(f, "{}", b),
            TomlScalar::Integer(i) => write!(f, "{}", i),
            TomlScalar::Float(fl) => write!(f, "{}", fl),
            TomlScalar::String(s) => f.write_str(s),
            TomlScalar::OffsetDateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            TomlScalar::LocalDateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            TomlScalar::LocalDate(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            TomlScalar::LocalTime(t) => write!(f, "{}", t.format("%H:%M:%S%.f")),
        }
    }
}
