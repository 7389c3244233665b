//! Converting many inputs at once.
//!
//! Each input is converted on its own and yields its own result, so one bad
//! input never stops the rest. Failures keep the input they came from:
//!
//! ```rust
//! use tomlconv::batch::decode_all;
//! use tomlconv::ErrorCategory;
//!
//! let results = decode_all(["a = 1", "not valid toml [", "b = 2"]);
//! assert!(results[0].is_ok());
//! assert!(results[2].is_ok());
//!
//! let err = results[1].as_ref().unwrap_err();
//! assert_eq!(err.category, ErrorCategory::ParseError);
//! assert_eq!(err.target, "not valid toml [");
//! ```

use crate::encode::{to_table, EncodedText};
use crate::error::{ErrorCategory, ItemError};
use crate::options::EncodeOptions;
use crate::{decode, HostMap, HostValue};

/// Encodes every value, in order.
///
/// Failures are tagged [`ErrorCategory::InputObjectInvalid`].
pub fn encode_all<I>(
    values: I,
    options: &EncodeOptions,
) -> Vec<Result<EncodedText, ItemError<HostValue>>>
where
    I: IntoIterator<Item = HostValue>,
{
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            tracing::trace!(index, kind = value.kind(), "encoding item");
            match to_table(&value, options) {
                Ok(encoded) => Ok(encoded.render()),
                Err(error) => Err(ItemError::new(
                    ErrorCategory::InputObjectInvalid,
                    error,
                    value,
                )),
            }
        })
        .collect()
}

/// Decodes every text as its own document, in order.
///
/// Failures are tagged [`ErrorCategory::ParseError`].
pub fn decode_all<I, S>(texts: I) -> Vec<Result<HostMap, ItemError<String>>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let text = text.into();
            tracing::trace!(index, len = text.len(), "decoding item");
            decode(&text).map_err(|error| ItemError::new(ErrorCategory::ParseError, error, text))
        })
        .collect()
}

/// Joins `fragments` line by line and decodes them as one document.
///
/// This is the shape of text streamed in a line at a time, where no single
/// fragment is a complete document.
///
/// ```rust
/// use tomlconv::batch::decode_fragments;
///
/// let map = decode_fragments(["[server]", "port = 80"]).unwrap();
/// assert!(map.get("server").is_some());
/// ```
///
/// # Errors
///
/// Returns an [`ItemError`] tagged [`ErrorCategory::ParseError`] that carries
/// the joined text.
pub fn decode_fragments<I, S>(fragments: I) -> Result<HostMap, ItemError<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for fragment in fragments {
        let fragment = fragment.as_ref();
        text.push_str(fragment);
        if !fragment.ends_with('\n') {
            text.push('\n');
        }
    }
    tracing::trace!(len = text.len(), "decoding joined fragments");
    decode(&text).map_err(|error| ItemError::new(ErrorCategory::ParseError, error, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::host;

    #[test]
    fn test_decode_all_isolates_failures() {
        let results = decode_all(vec!["a = 1", "not valid toml [", "b = 2"]);
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().unwrap().get("a").and_then(HostValue::as_i64),
            Some(1)
        );
        assert_eq!(
            results[2].as_ref().unwrap().get("b").and_then(HostValue::as_i64),
            Some(2)
        );

        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.category, ErrorCategory::ParseError);
        assert!(matches!(err.error, Error::Syntax { .. }));
        assert!(err.to_string().starts_with("ParseError: "));
    }

    #[test]
    fn test_encode_all_isolates_failures() {
        let values = vec![host!({ "a": 1 }), host!([1, 2]), host!({ "b": 2 })];
        let results = encode_all(values, &EncodeOptions::default());

        assert_eq!(results[0].as_ref().unwrap().text, "a = 1\n");
        assert_eq!(results[2].as_ref().unwrap().text, "b = 2\n");

        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.category, ErrorCategory::InputObjectInvalid);
        assert_eq!(err.target, host!([1, 2]));
        assert!(err
            .to_string()
            .contains("Input object must be a dictionary like object"));
    }

    #[test]
    fn test_encode_all_reports_truncation_per_item() {
        let values = vec![host!({ "a": { "b": { "c": { "d": 1 } } } }), host!({ "a": 1 })];
        let results = encode_all(values, &EncodeOptions::default());
        assert!(results[0].as_ref().unwrap().truncated);
        assert!(!results[1].as_ref().unwrap().truncated);
    }

    #[test]
    fn test_decode_fragments_joins_lines() {
        let map = decode_fragments(["title = \"x\"", "[owner]", "name = \"y\""]).unwrap();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["title", "owner"]);
    }

    #[test]
    fn test_decode_fragments_error_carries_joined_text() {
        let err = decode_fragments(["a = 1", "b = "]).unwrap_err();
        assert_eq!(err.category, ErrorCategory::ParseError);
        assert_eq!(err.target, "a = 1\nb = \n");
    }
}
