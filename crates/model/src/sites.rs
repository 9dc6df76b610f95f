//! Request parameter values of the sites endpoints.

use crate::common::SortField;

wire_enum! {
    /// Fields sites can be ordered by.
    SiteSortField {
        Id => "id",
        Title => "title",
        Description => "description",
    }
}

impl SortField for SiteSortField {
    fn field_name(self) -> &'static str {
        self.as_str()
    }
}
