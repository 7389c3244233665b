//! TOML tree → host value.
//!
//! Tables become [`HostMap`]s in document order, arrays and table arrays
//! become sequences, and scalars map onto [`Scalar`] one to one. Nested arrays
//! are normalized all the way down, so an inline table inside an array comes
//! back as a map rather than a TOML-specific node.

use crate::node::{TomlNode, TomlTable};
use crate::scalar::Scalar;
use crate::{HostMap, HostValue};

/// Converts a parsed TOML table into an ordered host map.
#[must_use]
pub fn to_host_map(table: &TomlTable) -> HostMap {
    table
        .iter()
        .map(|(key, node)| (key.clone(), to_host_value(node)))
        .collect()
}

fn to_host_value(node: &TomlNode) -> HostValue {
    match node {
        TomlNode::Table(table) => HostValue::Map(to_host_map(table)),
        TomlNode::TableArray(tables) => HostValue::Seq(
            tables
                .iter()
                .map(|t| HostValue::Map(to_host_map(t)))
                .collect(),
        ),
        TomlNode::Array(nodes) => HostValue::Seq(nodes.iter().map(to_host_value).collect()),
        TomlNode::Scalar(scalar) => HostValue::Scalar(Scalar::from(scalar.clone())),
    }
}
