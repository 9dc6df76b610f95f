//! Wire codecs for the Alfresco v1 REST API client.
//!
//! Two independent pieces sit at the data-marshalling boundary of every call:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`envelope`] | Strips and adds the `entry` / `list` wrapper layers around response values |
//! | [`multi_value`] | Joins the values of one query parameter into one comma-separated token |
//! | [`errors`] | [`CodecError`] |
//!
//! ## Architectural Layer
//!
//! **Pure transformation.** Nothing here performs I/O, blocks, or keeps
//! mutable state; the `client` crate calls into these functions on the
//! request thread.

pub mod envelope;
pub mod errors;
pub mod multi_value;

pub use envelope::{Shape, WrapSpec};
pub use errors::CodecError;
pub use multi_value::MultiValue;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
