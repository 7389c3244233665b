//! # tomlconv
//!
//! Converts between TOML documents and a dynamic, ordered object graph.
//!
//! ## What does it do?
//!
//! TOML always has a table at its root, while the values a program hands over
//! for conversion can be anything: maps, lists, plain numbers, or opaque
//! objects that only expose named properties. `tomlconv` bridges the two:
//!
//! - **Encoding** walks a [`HostValue`] and produces TOML text. Deep graphs are
//!   cut off at a configurable depth and the caller is told so.
//! - **Decoding** parses TOML text into ordered maps, sequences and scalars,
//!   keeping document key order.
//!
//! ## Key Features
//!
//! - **Key Order Preserved**: in both directions, including tables that come
//!   before plain keys
//! - **Depth-Limited**: cyclic or very deep graphs finish, with a truncation flag
//! - **Lossless Integers**: unsigned, 128-bit and big integers that do not fit
//!   in TOML's `i64` are written as decimal strings
//! - **Serde Compatible**: any `T: Serialize` can be encoded and any
//!   `T: Deserialize` can be decoded
//! - **Batch Friendly**: per-item errors tagged `ParseError` or
//!   `InputObjectInvalid`, carrying the input that failed
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use tomlconv::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! let config = Config {
//!     name: "web".to_string(),
//!     port: 8080,
//!     tags: vec!["a".to_string(), "b".to_string()],
//! };
//!
//! let text = to_string(&config).unwrap();
//! assert_eq!(text, "name = \"web\"\nport = 8080\ntags = [\"a\", \"b\"]\n");
//!
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! ### Dynamic values
//!
//! ```rust
//! use tomlconv::{decode, encode, host, EncodeOptions, HostValue};
//!
//! let value = host!({
//!     "title": "example",
//!     "owner": { "name": "Tom" },
//!     "points": [{ "x": 1 }, { "x": 2 }]
//! });
//!
//! let out = encode(&value, &EncodeOptions::default()).unwrap();
//! assert!(!out.truncated);
//!
//! let map = decode(&out.text).unwrap();
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["title", "owner", "points"]);
//! assert_eq!(map.get("points").and_then(HostValue::as_seq).map(Vec::len), Some(2));
//! ```
//!
//! ### Depth limit
//!
//! ```rust
//! use tomlconv::{encode, host, EncodeOptions};
//!
//! let value = host!({ "a": { "b": 1 } });
//! let out = encode(&value, &EncodeOptions::new().with_depth(0)).unwrap();
//! assert!(out.truncated);
//! assert_eq!(out.text, "a = \"{b = 1}\"\n");
//! ```
//!
//! ## Logging
//!
//! The library emits [`tracing`](https://docs.rs/tracing) events at `debug`
//! and `trace` level and never installs a subscriber. The `tomlconv` binary
//! (feature `cli`, on by default) logs to stderr, filtered by `RUST_LOG`.

pub mod batch;
pub mod de;
pub mod decode;
pub mod document;
pub mod encode;
pub mod error;
pub mod macros;
pub mod map;
pub mod node;
pub mod object;
pub mod options;
pub mod scalar;
pub mod ser;
pub mod value;

pub use de::from_host_value;
pub use encode::{Encoded, EncodedText};
pub use error::{Error, ErrorCategory, ItemError, Result};
pub use map::HostMap;
pub use node::{TomlNode, TomlScalar, TomlTable};
pub use object::{PropertyBag, PropertyError, Record};
pub use options::EncodeOptions;
pub use scalar::{EnumValue, Scalar};
pub use ser::{to_host_value, HostValueSerializer};
pub use value::HostValue;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes a host value as TOML text.
///
/// # Examples
///
/// ```rust
/// use tomlconv::{encode, host, EncodeOptions};
///
/// let out = encode(&host!({ "max": (u64::MAX) }), &EncodeOptions::default()).unwrap();
/// assert_eq!(out.text, "max = \"18446744073709551615\"\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::RootNotTable`] if `value` is not dictionary-like.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(value: &HostValue, options: &EncodeOptions) -> Result<EncodedText> {
    encode::to_table(value, options).map(|encoded| encoded.render())
}

/// Serialize any `T: Serialize` to a TOML string.
///
/// Content below the default depth is written as strings; use
/// [`encode()`] if you need to know whether that happened.
///
/// # Examples
///
/// ```rust
/// use tomlconv::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let toml = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(toml, "x = 1\ny = 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if `T` does not serialize to a struct or map.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a TOML string with custom options.
///
/// # Examples
///
/// ```rust
/// use tomlconv::{to_string_with_options, EncodeOptions};
/// use std::collections::BTreeMap;
///
/// let mut inner = BTreeMap::new();
/// inner.insert("deep", vec![vec![1, 2]]);
/// let mut outer = BTreeMap::new();
/// outer.insert("outer", inner);
///
/// let toml = to_string_with_options(&outer, EncodeOptions::new().with_depth(4)).unwrap();
/// assert_eq!(toml, "[outer]\ndeep = [[1, 2]]\n");
/// ```
///
/// # Errors
///
/// Returns an error if `T` does not serialize to a struct or map.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_host_value(value)?;
    encode(&value, &options).map(|out| out.text)
}

/// Decodes TOML text into an ordered map.
///
/// # Examples
///
/// ```rust
/// use tomlconv::{decode, HostValue};
///
/// let map = decode("c = 1\na = 2\nb = 3").unwrap();
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["c", "a", "b"]);
/// assert_eq!(map.get("a").and_then(HostValue::as_i64), Some(2));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] with line and column information if `text` is
/// not valid TOML.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(text: &str) -> Result<HostMap> {
    let table = document::parse(text)?;
    Ok(decode::to_host_map(&table))
}

/// Deserialize an instance of type `T` from a string of TOML text.
///
/// # Examples
///
/// ```rust
/// use tomlconv::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid TOML or cannot be deserialized
/// to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_host_value(HostValue::Map(decode(text)?))
}

/// Deserialize an instance of type `T` from TOML text that arrives in pieces.
///
/// The fragments are joined line by line and parsed as one document.
///
/// # Errors
///
/// Returns an error if the joined text is not valid TOML or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_fragments<I, S, T>(fragments: I) -> Result<T>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    T: DeserializeOwned,
{
    let map = batch::decode_fragments(fragments).map_err(|e| e.error)?;
    from_host_value(HostValue::Map(map))
}
