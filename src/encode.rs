//! Host value → TOML tree.
//!
//! The encoder walks a [`HostValue`] depth-first and classifies every node:
//!
//! - **Null** becomes an empty string.
//! - **Maps** become tables, keys in iteration order.
//! - **Sequences** become arrays, or table arrays when they are non-empty and
//!   every element turned into a table.
//! - **Objects** become tables of their readable properties. A property that
//!   fails to read is written as its error message.
//! - **Scalars** are coerced with [`Scalar::to_toml`](crate::Scalar::to_toml).
//!
//! Each container level consumes one unit of the depth budget. A container
//! reached with a negative budget is written as its plain string form and the
//! run is marked truncated; nothing below it is visited. Scalars are never cut
//! off.
//!
//! ```rust
//! use tomlconv::encode::to_table;
//! use tomlconv::{host, EncodeOptions, TomlNode, TomlScalar};
//!
//! let value = host!({ "a": { "b": 1 } });
//!
//! let out = to_table(&value, &EncodeOptions::new().with_depth(0)).unwrap();
//! assert!(out.truncated);
//! assert_eq!(out.table["a"], TomlNode::Scalar(TomlScalar::string("{b = 1}")));
//!
//! let out = to_table(&value, &EncodeOptions::new().with_depth(1)).unwrap();
//! assert!(!out.truncated);
//! ```

use crate::document;
use crate::error::{Error, Result};
use crate::node::{TomlNode, TomlScalar, TomlTable};
use crate::object::PropertyBag;
use crate::options::EncodeOptions;
use crate::{HostMap, HostValue};

/// The result of encoding one value.
#[derive(Clone, Debug, PartialEq)]
pub struct Encoded {
    pub table: TomlTable,
    /// `true` if any container was cut off by the depth limit.
    pub truncated: bool,
}

impl Encoded {
    /// Writes the table as TOML text, keeping the truncation flag.
    #[must_use]
    pub fn render(&self) -> EncodedText {
        EncodedText {
            text: document::write(&self.table),
            truncated: self.truncated,
        }
    }
}

/// A TOML document produced by the encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedText {
    pub text: String,
    pub truncated: bool,
}

/// Encodes `value` into a TOML table.
///
/// # Errors
///
/// Returns [`Error::RootNotTable`] if `value` does not classify as a table
/// (scalars, sequences, null, or a root that is itself cut off by the depth
/// limit).
pub fn to_table(value: &HostValue, options: &EncodeOptions) -> Result<Encoded> {
    let mut truncated = false;
    let depth = isize::try_from(options.depth).unwrap_or(isize::MAX);

    match encode_value(value, depth, &mut truncated) {
        TomlNode::Table(table) => Ok(Encoded { table, truncated }),
        other => Err(Error::root_not_table(other.kind())),
    }
}

// `truncated` only ever goes from false to true.
fn encode_value(value: &HostValue, depth: isize, truncated: &mut bool) -> TomlNode {
    match value {
        HostValue::Null => TomlScalar::string("").into(),
        HostValue::Scalar(s) => s.to_toml().into(),
        container if depth < 0 => {
            if !*truncated {
                tracing::debug!(depth, kind = container.kind(), "depth limit reached");
            }
            *truncated = true;
            TomlScalar::String(container.to_string()).into()
        }
        HostValue::Map(map) => TomlNode::Table(encode_map(map, depth, truncated)),
        HostValue::Seq(seq) => {
            let elements = seq
                .iter()
                .map(|v| encode_value(v, depth - 1, truncated))
                .collect();
            TomlNode::array_or_table_array(elements)
        }
        HostValue::Object(obj) => TomlNode::Table(encode_object(obj.as_ref(), depth, truncated)),
    }
}

fn encode_map(map: &HostMap, depth: isize, truncated: &mut bool) -> TomlTable {
    let mut table = TomlTable::with_capacity(map.len());
    for (key, value) in map.iter() {
        table.insert(key.clone(), encode_value(value, depth - 1, truncated));
    }
    table
}

fn encode_object(obj: &dyn PropertyBag, depth: isize, truncated: &mut bool) -> TomlTable {
    let names = obj.property_names();
    let mut table = TomlTable::with_capacity(names.len());

    for name in names {
        let node = match obj.property(&name) {
            Ok(value) => encode_value(&value, depth - 1, truncated),
            Err(err) => {
                tracing::debug!(
                    type_name = obj.type_name(),
                    property = %name,
                    error = %err,
                    "property read failed, writing message instead"
                );
                TomlScalar::String(err.message().to_string()).into()
            }
        };
        table.insert(name, node);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{host, Record};

    fn encode_with_depth(value: &HostValue, depth: usize) -> Encoded {
        to_table(value, &EncodeOptions::new().with_depth(depth)).unwrap()
    }

    #[test]
    fn test_null_becomes_empty_string() {
        let out = encode_with_depth(&host!({ "a": null }), 2);
        assert_eq!(out.table["a"], TomlNode::Scalar(TomlScalar::string("")));
    }

    #[test]
    fn test_root_must_be_table() {
        let opts = EncodeOptions::default();
        for value in [HostValue::from(1), host!([1, 2]), HostValue::Null] {
            let err = to_table(&value, &opts).unwrap_err();
            assert!(matches!(err, Error::RootNotTable { .. }), "{:?}", err);
        }
    }

    #[test]
    fn test_object_root_is_table() {
        let value = HostValue::object(Record::new("Point").with("x", 1).with("y", 2));
        let out = encode_with_depth(&value, 2);
        let keys: Vec<_> = out.table.keys().cloned().collect();
        assert_eq!(keys, vec!["x", "y"]);
    }

    #[test]
    fn test_scalars_below_boundary_are_kept() {
        let value = host!({ "a": { "b": 1 } });
        let out = encode_with_depth(&value, 1);
        assert!(!out.truncated);
        let a = out.table["a"].as_table().unwrap();
        assert_eq!(a["b"], TomlNode::Scalar(TomlScalar::Integer(1)));
    }

    #[test]
    fn test_truncation_is_terminal_and_sticky() {
        let value = host!({
            "deep": { "x": { "y": 1 } },
            "flat": 5
        });
        let out = encode_with_depth(&value, 1);
        assert!(out.truncated);
        let deep = out.table["deep"].as_table().unwrap();
        assert_eq!(deep["x"], TomlNode::Scalar(TomlScalar::string("{y = 1}")));
        // later siblings are still encoded normally
        assert_eq!(out.table["flat"], TomlNode::Scalar(TomlScalar::Integer(5)));
    }

    #[test]
    fn test_root_cut_off_is_an_error() {
        let mut truncated = false;
        let node = encode_value(&host!({ "a": 1 }), -1, &mut truncated);
        assert!(truncated);
        assert!(!node.is_table());
    }

    #[test]
    fn test_sequence_of_maps_becomes_table_array() {
        let value = host!({ "items": [{ "n": 1 }, { "n": 2 }, { "n": 3 }] });
        let out = encode_with_depth(&value, 2);
        match &out.table["items"] {
            TomlNode::TableArray(tables) => assert_eq!(tables.len(), 3),
            other => panic!("Expected table array, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_sequence_stays_array() {
        let value = host!({ "items": [{ "n": 1 }, 2] });
        let out = encode_with_depth(&value, 2);
        assert!(matches!(out.table["items"], TomlNode::Array(_)));
    }

    #[test]
    fn test_truncated_elements_demote_table_array() {
        // elements are maps but get cut off, so they are strings
        let value = host!({ "items": [{ "n": 1 }] });
        let out = encode_with_depth(&value, 0);
        assert!(out.truncated);
        assert_eq!(
            out.table["items"],
            TomlNode::Scalar(TomlScalar::string("[{n = 1}]"))
        );

        let out = encode_with_depth(&value, 1);
        assert!(out.truncated);
        assert_eq!(
            out.table["items"],
            TomlNode::Array(vec![TomlNode::Scalar(TomlScalar::string("{n = 1}"))])
        );
    }

    #[test]
    fn test_property_failure_is_isolated() {
        let obj = Record::new("Thing")
            .with("before", 1)
            .with_failure("broken", "boom")
            .with("after", "ok");
        let mut map = HostMap::new();
        map.insert("thing".to_string(), HostValue::object(obj));

        let out = encode_with_depth(&HostValue::Map(map), 2);
        assert!(!out.truncated);
        let thing = out.table["thing"].as_table().unwrap();
        assert_eq!(thing["before"], TomlNode::Scalar(TomlScalar::Integer(1)));
        assert_eq!(thing["broken"], TomlNode::Scalar(TomlScalar::string("boom")));
        assert_eq!(thing["after"], TomlNode::Scalar(TomlScalar::string("ok")));
    }

    #[test]
    fn test_unsigned_overflow() {
        let value = host!({ "max": (u64::MAX), "small": 100u64 });
        let out = encode_with_depth(&value, 2);
        assert_eq!(
            out.table["max"],
            TomlNode::Scalar(TomlScalar::string("18446744073709551615"))
        );
        assert_eq!(out.table["small"], TomlNode::Scalar(TomlScalar::Integer(100)));
    }
}
