//! Project membership roles and pending-request kinds.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Role a profile holds inside a project.
///
/// Admins may edit the project, invite/remove members, and answer entry
/// requests; plain members may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    Admin,
    Member,
}

impl ProjectRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectRole::Admin => "admin",
            ProjectRole::Member => "member",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "admin" => Ok(ProjectRole::Admin),
            "member" => Ok(ProjectRole::Member),
            other => Err(CoreError::Internal(format!("unknown project role: {other}"))),
        }
    }
}

/// Discriminator on a pending project request row.
///
/// A request is consumed (deleted) when replied to; acceptance of either
/// kind creates a `member`-role membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Invitation,
    EntryRequest,
}

impl RequestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Invitation => "invitation",
            RequestKind::EntryRequest => "entry_request",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "invitation" => Ok(RequestKind::Invitation),
            "entry_request" => Ok(RequestKind::EntryRequest),
            other => Err(CoreError::Internal(format!("unknown request kind: {other}"))),
        }
    }
}
