use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Connection, Team};

/// Outbound GraphQL request body.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest<V> {
    pub query: String,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
    #[serde(default)]
    pub extensions: Option<Value>,
}

// Team search data structures
#[derive(Debug, Clone, Deserialize)]
pub struct TeamQuery {
    pub team: TeamSearchRoot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamSearchRoot {
    #[serde(rename = "teamSearchV2")]
    pub team_search: Connection<TeamEdge>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TeamEdge {
    pub node: TeamNode,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TeamNode {
    pub team: Team,
}

impl TeamQuery {
    pub fn into_search(self) -> Connection<TeamEdge> {
        self.team.team_search
    }
}
