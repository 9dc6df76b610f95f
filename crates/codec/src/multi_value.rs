//! Multi-valued query parameters.
//!
//! The Alfresco v1 REST API expects all values of one query parameter as a
//! single comma-joined token (`include=path,isLink`), not as repeated keys
//! (`include=path&include=isLink`). [`MultiValue`] carries the values and
//! [`encode`] / [`decode`] convert between it and that token.
//!
//! Embedded commas are not escaped. The remote protocol has no escaping rule,
//! so a value containing `,` cannot be transmitted faithfully.

use std::fmt::{self, Write as _};

use tracing::debug;

/// Separator between values in the wire token.
pub const SEPARATOR: char = ',';

/// All values supplied for one named request parameter.
///
/// An empty `MultiValue` means "send the parameter with no values", which is
/// distinct from not sending it at all. Callers model the latter as
/// `Option::<MultiValue<T>>::None`.
///
/// `None` elements stand for `null` entries; they are skipped when encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiValue<T> {
    values: Vec<Option<T>>,
}

impl<T> MultiValue<T> {
    /// Creates a parameter value from a list of values.
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values: values.into_iter().map(Some).collect(),
        }
    }

    /// Creates a parameter value from a list that may contain `null` entries.
    pub fn from_options(values: Vec<Option<T>>) -> Self {
        Self { values }
    }

    /// Creates a parameter value with no values.
    pub fn empty() -> Self {
        Self { values: Vec::new() }
    }

    /// The non-null values in order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter().flatten()
    }

    /// Number of entries, including `null` ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no entries at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> Default for MultiValue<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for MultiValue<T> {
    fn from(values: Vec<T>) -> Self {
        Self::new(values)
    }
}

impl<T> FromIterator<T> for MultiValue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Some).collect(),
        }
    }
}

/// Renders the wire token: non-null values joined by [`SEPARATOR`].
impl<T: fmt::Display> fmt::Display for MultiValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in self.values() {
            if !first {
                f.write_char(SEPARATOR)?;
            }
            first = false;
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// Encodes a parameter value into its single wire token.
///
/// Returns `None` when the parameter is absent; the caller must then omit
/// the parameter from the request entirely. An empty value yields `""`.
pub fn encode<T: fmt::Display>(value: Option<&MultiValue<T>>) -> Option<String> {
    let value = value?;
    let token = value.to_string();
    debug!(entries = value.len(), %token, "encoded multi-valued parameter");
    Some(token)
}

/// Splits a wire token back into its raw string values.
///
/// `None` and whitespace-only tokens mean the parameter carries no value and
/// decode to `None`. The empty token `""` decodes to an empty
/// [`MultiValue`], mirroring [`encode`]. Fragments are not trimmed and are
/// not converted into richer element types.
pub fn decode(raw: Option<&str>) -> Option<MultiValue<String>> {
    let raw = raw?;
    if raw.is_empty() {
        return Some(MultiValue::empty());
    }
    if raw.trim().is_empty() {
        return None;
    }

    debug!(token = raw, "decoding multi-valued parameter");
    Some(raw.split(SEPARATOR).map(str::to_owned).collect())
}
