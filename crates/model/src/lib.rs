//! Data shapes of the Alfresco v1 REST API that the wire codecs need to know
//! about.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`TicketId`, `UserId`) |
//! | [`common`] | `PaginationInfo`, `PaginatedList` (LIST-wrapped), `Sort` and `SortField` |
//! | [`nodes`] | `NodeSortField`, `IncludeOption` |
//! | [`sites`] | `SiteSortField` |
//! | [`authentication`] | `Ticket` (ENTRY-wrapped), `TicketRequest` |
//! | [`errors`] | `ModelError` |
//!
//! ## Architectural Layer
//!
//! **Domain shapes.** No I/O; the `client` crate moves these over HTTP.

#[macro_use]
mod macros;

pub mod authentication;
pub mod common;
pub mod errors;
pub mod identifiers;
pub mod nodes;
pub mod sites;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use authentication::{Ticket, TicketRequest};
pub use common::{PaginatedList, PaginationInfo, Sort, SortDirection, SortField};
pub use errors::ModelError;
pub use identifiers::{TicketId, UserId};
pub use nodes::{IncludeOption, NodeSortField};
pub use sites::SiteSortField;
