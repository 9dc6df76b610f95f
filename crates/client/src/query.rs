//! Query-string construction.
//!
//! Multi-valued parameters are always sent as exactly one `name=v1,v2` pair.
//! The transport's own repeated-key encoding is never used for them.
//! Percent-encoding is left to the transport.

use std::fmt;

use codec::{multi_value, MultiValue};

/// Ordered query parameters of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a single-valued parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.pairs.push((name.into(), value.to_string()));
        self
    }

    /// Sets a multi-valued parameter.
    ///
    /// `None` leaves the parameter out. Otherwise any earlier value under the
    /// same name is replaced by one pair holding the joined token, which is
    /// `""` for an empty [`MultiValue`].
    pub fn push_multi<T: fmt::Display>(
        &mut self,
        name: impl Into<String>,
        value: Option<&MultiValue<T>>,
    ) -> &mut Self {
        if let Some(token) = multi_value::encode(value) {
            let name = name.into();
            self.pairs.retain(|(n, _)| *n != name);
            self.pairs.push((name, token));
        }
        self
    }

    /// Builder form of [`QueryParams::push`].
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.push(name, value);
        self
    }

    /// Builder form of [`QueryParams::push_multi`].
    pub fn with_multi<T: fmt::Display>(
        mut self,
        name: impl Into<String>,
        value: Option<&MultiValue<T>>,
    ) -> Self {
        self.push_multi(name, value);
        self
    }

    /// First value recorded under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All pairs in insertion order, as handed to the transport.
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
