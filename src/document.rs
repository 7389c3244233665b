//! TOML text ⇄ [`TomlTable`], backed by `toml_edit`.
//!
//! Parsing maps every `toml_edit` item onto the generic tree: standard and
//! inline tables become [`TomlNode::Table`], `[[array.of.tables]]` becomes
//! [`TomlNode::TableArray`], and date-times are told apart by which of their
//! date, time and offset parts are present.
//!
//! Writing keeps key order. TOML forces every `[table]` section after the
//! plain keys of its parent, so a table that is followed by a plain key is
//! written inline instead of as a section:
//!
//! ```rust
//! use tomlconv::{decode, encode, host, EncodeOptions};
//!
//! let value = host!({ "server": { "port": 80 }, "name": "web" });
//! let text = encode(&value, &EncodeOptions::default()).unwrap().text;
//! assert_eq!(text, "server = { port = 80 }\nname = \"web\"\n");
//!
//! let keys: Vec<_> = decode(&text).unwrap().keys().cloned().collect();
//! assert_eq!(keys, vec!["server", "name"]);
//! ```

use crate::error::{Error, Result};
use crate::node::{TomlNode, TomlScalar, TomlTable};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use toml_edit::{Array, ArrayOfTables, Datetime, DocumentMut, InlineTable, Item, Table, Value};

const LOCAL_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f";
const LOCAL_DATE: &str = "%Y-%m-%d";
const LOCAL_TIME: &str = "%H:%M:%S%.f";

/// Parses TOML text into a table.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if `text` is not valid TOML.
pub fn parse(text: &str) -> Result<TomlTable> {
    let doc = text.parse::<DocumentMut>().map_err(|e| {
        let offset = e.span().map_or(0, |span| span.start);
        Error::syntax_at(text, offset, e.message())
    })?;
    Ok(read_table(doc.as_table()))
}

/// Writes a table as TOML text.
#[must_use]
pub fn write(table: &TomlTable) -> String {
    let mut doc = DocumentMut::new();
    fill_table(doc.as_table_mut(), table);
    doc.to_string()
}

fn read_table(table: &Table) -> TomlTable {
    table
        .iter()
        .filter_map(|(key, item)| read_item(item).map(|node| (key.to_string(), node)))
        .collect()
}

fn read_item(item: &Item) -> Option<TomlNode> {
    match item {
        Item::None => None,
        Item::Value(value) => Some(read_value(value)),
        Item::Table(table) => Some(TomlNode::Table(read_table(table))),
        Item::ArrayOfTables(array) => Some(TomlNode::TableArray(
            array.iter().map(read_table).collect(),
        )),
    }
}

fn read_value(value: &Value) -> TomlNode {
    match value {
        Value::String(s) => TomlScalar::String(s.value().clone()).into(),
        Value::Integer(i) => TomlScalar::Integer(*i.value()).into(),
        Value::Float(f) => TomlScalar::Float(*f.value()).into(),
        Value::Boolean(b) => TomlScalar::Boolean(*b.value()).into(),
        Value::Datetime(dt) => read_datetime(dt.value()).into(),
        Value::Array(array) => TomlNode::Array(array.iter().map(read_value).collect()),
        Value::InlineTable(table) => TomlNode::Table(
            table
                .iter()
                .map(|(key, value)| (key.to_string(), read_value(value)))
                .collect(),
        ),
    }
}

/// Reads `text` as a TOML date-time, if it is one chrono can represent.
pub(crate) fn parse_datetime(text: &str) -> Option<TomlScalar> {
    let dt = text.parse::<Datetime>().ok()?;
    match read_datetime(&dt) {
        TomlScalar::String(_) => None,
        scalar => Some(scalar),
    }
}

// The parser has already validated the components, so chrono only fails on
// values it cannot represent (leap seconds, for example). Those keep their
// text form.
fn read_datetime(dt: &Datetime) -> TomlScalar {
    let text = dt.to_string();
    let parsed = match (dt.date.is_some(), dt.time.is_some(), dt.offset.is_some()) {
        (true, true, true) => DateTime::parse_from_rfc3339(&text)
            .ok()
            .map(TomlScalar::OffsetDateTime),
        (true, true, false) => NaiveDateTime::parse_from_str(&text, LOCAL_DATE_TIME)
            .ok()
            .map(TomlScalar::LocalDateTime),
        (true, false, _) => NaiveDate::parse_from_str(&text, LOCAL_DATE)
            .ok()
            .map(TomlScalar::LocalDate),
        (false, true, _) => NaiveTime::parse_from_str(&text, LOCAL_TIME)
            .ok()
            .map(TomlScalar::LocalTime),
        (false, false, _) => None,
    };
    parsed.unwrap_or(TomlScalar::String(text))
}

fn fill_table(target: &mut Table, source: &TomlTable) {
    // Sections may only follow the last plain key; anything earlier goes inline.
    let last_plain = source
        .values()
        .rposition(|node| !matches!(node, TomlNode::Table(_) | TomlNode::TableArray(_)));

    for (index, (key, node)) in source.iter().enumerate() {
        let inline = last_plain.is_some_and(|last| index < last);
        let item = match node {
            TomlNode::Table(table) if !inline => {
                let mut section = Table::new();
                fill_table(&mut section, table);
                Item::Table(section)
            }
            TomlNode::TableArray(tables) if !inline => {
                let mut array = ArrayOfTables::new();
                for table in tables {
                    let mut section = Table::new();
                    fill_table(&mut section, table);
                    array.push(section);
                }
                Item::ArrayOfTables(array)
            }
            other => Item::Value(write_value(other)),
        };
        target.insert(key.as_str(), item);
    }
}

fn write_value(node: &TomlNode) -> Value {
    match node {
        TomlNode::Scalar(scalar) => write_scalar(scalar),
        TomlNode::Table(table) => Value::InlineTable(write_inline_table(table)),
        TomlNode::TableArray(tables) => {
            let mut array = Array::new();
            for table in tables {
                array.push(write_inline_table(table));
            }
            Value::Array(array)
        }
        TomlNode::Array(nodes) => {
            let mut array = Array::new();
            for node in nodes {
                array.push(write_value(node));
            }
            Value::Array(array)
        }
    }
}

fn write_inline_table(table: &TomlTable) -> InlineTable {
    let mut inline = InlineTable::new();
    for (key, node) in table {
        inline.insert(key.as_str(), write_value(node));
    }
    inline
}

fn write_scalar(scalar: &TomlScalar) -> Value {
    match scalar {
        TomlScalar::Boolean(b) => Value::from(*b),
        TomlScalar::Integer(i) => Value::from(*i),
        TomlScalar::Float(f) => Value::from(*f),
        TomlScalar::String(s) => Value::from(s.as_str()),
        TomlScalar::OffsetDateTime(dt) => {
            datetime_value(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        TomlScalar::LocalDateTime(dt) => datetime_value(dt.format(LOCAL_DATE_TIME).to_string()),
        TomlScalar::LocalDate(d) => datetime_value(d.format(LOCAL_DATE).to_string()),
        TomlScalar::LocalTime(t) => datetime_value(t.format(LOCAL_TIME).to_string()),
    }
}

// Years outside 0000-9999 have no TOML form; they are written as strings.
fn datetime_value(text: String) -> Value {
    match text.parse::<Datetime>() {
        Ok(dt) => Value::from(dt),
        Err(_) => Value::from(text),
    }
}
