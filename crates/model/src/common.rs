//! Shapes shared by every collection endpoint: pagination and sorting.
//!
//! [`PaginatedList`] is the one generic LIST-wrapped shape; its elements are
//! decoded according to their own wrapping, so a `PaginatedList<Ticket>`
//! expects `{"list": {"entries": [{"entry": {...}}, ...]}}`.

use std::fmt;
use std::str::FromStr;

use codec::envelope::{self, Shape, WrapSpec};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ModelError;

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Paging state of a collection response.
///
/// Missing numeric fields default to zero, as the repository omits them in
/// some responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationInfo {
    /// Number of entries in this page.
    pub count: u32,
    /// Number of entries skipped before this page.
    pub skip_count: u32,
    /// Page size requested.
    pub max_items: u32,
    /// Total number of entries, if the repository computed it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<u32>,
    /// Whether further pages exist.
    pub has_more_items: bool,
}

impl Shape for PaginationInfo {}

// ---------------------------------------------------------------------------

/// One page of a collection, travelling in the `list` envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedList<T> {
    /// Paging state; absent in some responses.
    pub pagination: Option<PaginationInfo>,
    /// The page's entries, in response order.
    pub entries: Vec<T>,
}

impl<T> PaginatedList<T> {
    /// Creates a page without pagination info.
    pub fn new(entries: Vec<T>) -> Self {
        Self {
            pagination: None,
            entries,
        }
    }

    /// Returns `true` if the repository reported further pages.
    pub fn has_more_items(&self) -> bool {
        self.pagination.is_some_and(|p| p.has_more_items)
    }
}

#[derive(Deserialize)]
struct ListBody<T> {
    #[serde(default)]
    pagination: Option<PaginationInfo>,
    entries: Vec<T>,
}

#[derive(Serialize)]
struct ListBodyRef<'a, T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<&'a PaginationInfo>,
    entries: &'a [T],
}

impl<T: Shape> Shape for PaginatedList<T> {
    const WRAP_SPEC: Option<WrapSpec> = Some(WrapSpec::List);

    fn shape_name() -> &'static str {
        "PaginatedList"
    }

    fn decode_structural<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let body = ListBody::<T>::deserialize(deserializer)?;
        Ok(Self {
            pagination: body.pagination,
            entries: body.entries,
        })
    }

    fn encode_structural<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ListBodyRef {
            pagination: self.pagination.as_ref(),
            entries: &self.entries,
        }
        .serialize(serializer)
    }
}

impl<'de, T: Shape> Deserialize<'de> for PaginatedList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        envelope::deserialize_wrapped::<Self, D>(deserializer)
    }
}

impl<T: Shape> Serialize for PaginatedList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        envelope::serialize_wrapped(self, serializer)
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// A field an endpoint can order its results by.
pub trait SortField: Copy {
    /// Name of the field as used in the `orderBy` parameter.
    fn field_name(self) -> &'static str;
}

/// Sort order of a [`Sort`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// `ASC`
    #[default]
    Ascending,
    /// `DESC`
    Descending,
}

impl SortDirection {
    /// Returns the wire keyword, `ASC` or `DESC`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `orderBy` entry: a field and a direction.
///
/// Renders as `"<fieldName> ASC"` / `"<fieldName> DESC"`; several sorts are
/// sent as one [`codec::MultiValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sort<F> {
    field: F,
    direction: SortDirection,
}

impl<F: SortField> Sort<F> {
    /// Sorts by `field` in the given direction.
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Sorts by `field` in ascending order.
    pub fn ascending(field: F) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    /// Sorts by `field` in descending order.
    pub fn descending(field: F) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// The field results are ordered by.
    pub fn field(&self) -> F {
        self.field
    }

    /// Whether results are ascending or descending.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl<F: SortField> fmt::Display for Sort<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.field_name(), self.direction)
    }
}

/// Parses `"<fieldName>"`, `"<fieldName> ASC"` or `"<fieldName> DESC"`.
impl<F> FromStr for Sort<F>
where
    F: SortField + FromStr<Err = ModelError>,
{
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ModelError::InvalidSort {
            value: s.to_owned(),
            reason,
        };

        let mut parts = s.split_whitespace();
        let field = parts.next().ok_or_else(|| invalid("missing field name"))?;
        let direction = match parts.next() {
            None => SortDirection::Ascending,
            Some(d) if d.eq_ignore_ascii_case("ASC") => SortDirection::Ascending,
            Some(d) if d.eq_ignore_ascii_case("DESC") => SortDirection::Descending,
            Some(_) => return Err(invalid("direction must be ASC or DESC")),
        };
        if parts.next().is_some() {
            return Err(invalid("unexpected trailing text"));
        }

        Ok(Self::new(field.parse()?, direction))
    }
}
