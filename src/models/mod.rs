pub mod graphql;
pub mod team;

// Re-export commonly used types
pub use graphql::{GraphQLError, GraphQLRequest, GraphQLResponse, TeamEdge, TeamNode, TeamQuery, TeamSearchRoot};
pub use team::{Member, MemberEdge, MemberNode, MembershipRole, PageInfo, Team};

use serde::{Deserialize, Serialize};

/// Relay-style connection used by every paginated field of the team search.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(bound(deserialize = "E: Deserialize<'de>"))]
pub struct Connection<E> {
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub edges: Vec<E>,
}

impl<E> Default for Connection<E> {
    fn default() -> Self {
        Self {
            page_info: PageInfo::default(),
            edges: Vec::new(),
        }
    }
}
