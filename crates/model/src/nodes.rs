//! Request parameter values of the nodes endpoints.

use crate::common::SortField;

wire_enum! {
    /// Fields the children of a node can be ordered by.
    NodeSortField {
        IsFolder => "isFolder",
        Name => "name",
        MimeType => "mimeType",
        NodeType => "nodeType",
        Size => "sizeInBytes",
        ModifiedAt => "modifiedAt",
        CreatedAt => "createdAt",
        ModifiedBy => "modifiedByUser",
        CreatedBy => "createdByUser",
    }
}

impl SortField for NodeSortField {
    fn field_name(self) -> &'static str {
        self.as_str()
    }
}

wire_enum! {
    /// Optional properties to add to a node response (`include` parameter).
    IncludeOption {
        /// Operations the current user may perform on the node.
        AllowableOperations => "allowableOperations",
        /// Association to the parent, for child listings.
        Association => "association",
        IsLink => "isLink",
        IsFavorite => "isFavorite",
        IsLocked => "isLocked",
        /// Primary path of the node.
        Path => "path",
        /// Local and inherited permissions.
        Permissions => "permissions",
    }
}
