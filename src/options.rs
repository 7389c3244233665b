//! Configuration options for TOML encoding.
//!
//! ## Examples
//!
//! ```rust
//! use tomlconv::{encode, host, EncodeOptions};
//!
//! let value = host!({ "a": { "b": { "c": 1 } } });
//!
//! // Default depth is 2: `c` still fits
//! let out = encode(&value, &EncodeOptions::default()).unwrap();
//! assert!(!out.truncated);
//!
//! // With a depth of 0 every nested container is written as a string
//! let out = encode(&value, &EncodeOptions::new().with_depth(0)).unwrap();
//! assert!(out.truncated);
//! ```

/// The number of container levels encoded below the root when nothing else
/// is configured.
pub const DEFAULT_DEPTH: usize = 2;

/// Configuration options for TOML encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// How many levels of nested containers are encoded below the root before
    /// the remaining containers are written as strings.
    ///
    /// Only maps, sequences and objects count against the limit. A scalar or
    /// null that sits below the limit is still written with its own type:
    ///
    /// ```rust
    /// use tomlconv::{encode, host, EncodeOptions};
    ///
    /// let value = host!({ "a": { "b": 1, "c": [2] } });
    /// let out = encode(&value, &EncodeOptions::new().with_depth(1)).unwrap();
    /// assert_eq!(out.text, "[a]\nb = 1\nc = \"[2]\"\n");
    /// assert!(out.truncated);
    /// ```
    pub depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            depth: DEFAULT_DEPTH,
        }
    }
}

impl EncodeOptions {
    /// Creates default options (depth 2).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlconv::EncodeOptions;
    ///
    /// let options = EncodeOptions::new();
    /// assert_eq!(options.depth, 2);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the depth limit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tomlconv::EncodeOptions;
    ///
    /// let options = EncodeOptions::new().with_depth(5);
    /// assert_eq!(options.depth, 5);
    /// ```
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}
