//! Authentication ticket payloads.

use std::fmt;

use codec::Shape;
use serde::{Deserialize, Serialize};

use crate::{TicketId, UserId};

/// An authentication ticket as returned by the tickets endpoints.
///
/// Travels in the `entry` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Ticket {
    /// The ticket value to present on subsequent requests.
    pub id: TicketId,
    /// Owner of the ticket. Omitted by some responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

codec::wrapped_shape!(Ticket => Entry);

/// Credentials posted to obtain a [`Ticket`]. Sent bare, without envelope.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    /// User to authenticate as.
    pub user_id: UserId,
    /// Clear-text password. Never logged.
    pub password: String,
}

impl Shape for TicketRequest {}

impl fmt::Debug for TicketRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TicketRequest")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}
