//! Opaque objects exposed as property bags.
//!
//! Values that are neither maps, sequences nor scalars are encoded through the
//! [`PropertyBag`] trait: the encoder asks for the property names, reads each
//! property and builds a table out of them. Reading a property may fail; the
//! encoder then stores the failure message as that property's value and keeps
//! going.
//!
//! [`Record`] is the stock implementation. It is what
//! [`to_host_value`](crate::to_host_value) produces for Rust structs.
//!
//! ```rust
//! use tomlconv::{encode, EncodeOptions, HostMap, HostValue, Record};
//!
//! let service = Record::new("Service")
//!     .with("name", "api")
//!     .with_failure("status", "access denied");
//!
//! let mut root = HostMap::new();
//! root.insert("service".to_string(), HostValue::object(service));
//!
//! let out = encode(&HostValue::Map(root), &EncodeOptions::default()).unwrap();
//! assert!(out.text.contains("status = \"access denied\""));
//! ```

use crate::HostValue;
use std::fmt;
use thiserror::Error;

/// The error returned by a property getter that could not produce a value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PropertyError {
    message: String,
}

impl PropertyError {
    pub fn new(message: impl Into<String>) -> Self {
        PropertyError {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A value that can be encoded as a table of named properties.
///
/// Implementors report their readable property names in a stable order and
/// resolve each name to a value on demand.
pub trait PropertyBag: fmt::Debug + Send + Sync {
    /// The name of the underlying type.
    fn type_name(&self) -> &str;

    /// The readable property names, in encoding order.
    fn property_names(&self) -> Vec<String>;

    /// Reads one property.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] when the value cannot be read. Asking for a
    /// name that was not reported by [`property_names`](Self::property_names)
    /// is also an error.
    fn property(&self, name: &str) -> Result<HostValue, PropertyError>;

    /// The plain string form used when the object is cut off by the depth
    /// limit. Defaults to the type name.
    fn describe(&self) -> String {
        self.type_name().to_string()
    }
}

/// A named list of properties, each either a value or a read failure.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    type_name: String,
    fields: Vec<(String, Result<HostValue, PropertyError>)>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Record {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a readable property. A property with the same name is replaced in
    /// place.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.push(name.into(), Ok(value.into()));
        self
    }

    /// Adds a property whose getter fails with `message`.
    #[must_use]
    pub fn with_failure(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.push(name.into(), Err(PropertyError::new(message)));
        self
    }

    pub fn push(&mut self, name: String, value: Result<HostValue, PropertyError>) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PropertyBag for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn property_names(&self) -> Vec<String> {
        self.fields.iter().map(|(name, _)| name.clone()).collect()
    }

    fn property(&self, name: &str) -> Result<HostValue, PropertyError> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| {
                Err(PropertyError::new(format!(
                    "The property '{}' cannot be found on type '{}'",
                    name, self.type_name
                )))
            })
    }

    fn describe(&self) -> String {
        let body = self
            .fields
            .iter()
            .map(|(name, value)| match value {
                Ok(v) => format!("{}={}", name, v),
                Err(e) => format!("{}={}", name, e),
            })
            .collect::<Vec<_>>()
            .join("; ");
        format!("@{{{}}}", body)
    }
}
