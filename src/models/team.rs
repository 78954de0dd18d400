use std::fmt;

use serde::{Deserialize, Serialize};

use super::Connection;
use crate::error::{ConnectorError, ConnectorResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor of the following page, or `None` when this is the last one.
    ///
    /// A page that claims a successor but carries no cursor cannot be
    /// advanced and is reported as a decode error.
    pub fn next_cursor(&self) -> ConnectorResult<Option<&str>> {
        if !self.has_next_page {
            return Ok(None);
        }

        match self.end_cursor.as_deref() {
            Some(cursor) if !cursor.is_empty() => Ok(Some(cursor)),
            _ => Err(ConnectorError::DecodeError(
                "pageInfo reports a next page without an end cursor".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub organization_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Connection<MemberEdge>,
}

impl Team {
    pub fn member_edges(&self) -> impl Iterator<Item = &MemberNode> {
        self.members.edges.iter().map(|edge| &edge.node)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MemberEdge {
    pub node: MemberNode,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MemberNode {
    pub member: Member,
    pub role: MembershipRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipRole {
    Regular,
    Admin,
}

impl MembershipRole {
    pub const ALL: [MembershipRole; 2] = [MembershipRole::Regular, MembershipRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipRole::Regular => "REGULAR",
            MembershipRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for MembershipRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
