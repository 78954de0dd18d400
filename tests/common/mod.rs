#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{json, Value};

use atlassian_connector::client::{AtlassianClient, HttpRequest, HttpResponse, Transport};
use atlassian_connector::error::{ConnectorError, ConnectorResult};

pub const ORGANIZATION_ID: &str = "organizationTest";
pub const USER_IDS: [&str; 2] = [
    "ea960e6c-f613-4bed-8852-ab012603915b",
    "8b21d0aa-39a4-4c09-86d2-d29dff8d261f",
];

pub fn read_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {}", path.display(), e))
}

pub fn response(status: StatusCode, body: &str) -> HttpResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    HttpResponse {
        status,
        headers,
        body: body.as_bytes().to_vec(),
    }
}

pub fn json_response(body: Value) -> HttpResponse {
    response(StatusCode::OK, &body.to_string())
}

/// `(member id, role)` pairs become member edges named after the id.
pub fn team_json(id: &str, members: &[(&str, &str)], next_member_cursor: Option<&str>) -> Value {
    let edges: Vec<Value> = members
        .iter()
        .map(|(member_id, role)| {
            json!({
                "node": {
                    "role": role,
                    "member": {
                        "id": format!("ari:cloud:identity::user/{}", member_id),
                        "accountId": member_id,
                        "name": format!("Name {}", member_id)
                    }
                }
            })
        })
        .collect();

    json!({
        "node": {
            "team": {
                "id": id,
                "organizationId": ORGANIZATION_ID,
                "displayName": format!("Display {}", id),
                "description": null,
                "members": {
                    "pageInfo": {
                        "hasNextPage": next_member_cursor.is_some(),
                        "endCursor": next_member_cursor
                    },
                    "edges": edges
                }
            }
        }
    })
}

pub fn search_json(teams: Vec<Value>, next_team_cursor: Option<&str>) -> Value {
    json!({
        "data": {
            "team": {
                "teamSearchV2": {
                    "pageInfo": {
                        "hasNextPage": next_team_cursor.is_some(),
                        "endCursor": next_team_cursor
                    },
                    "edges": teams
                }
            }
        }
    })
}

/// Transport answering each request from a routing closure over the
/// request's GraphQL variables, recording everything it was sent.
pub struct RoutedTransport<F> {
    route: F,
    requests: Mutex<Vec<HttpRequest>>,
}

impl<F> RoutedTransport<F>
where
    F: Fn(&Value) -> ConnectorResult<HttpResponse> + Send + Sync,
{
    pub fn new(route: F) -> Arc<Self> {
        Arc::new(Self {
            route,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn variables(&self) -> Vec<Value> {
        self.requests()
            .iter()
            .map(|request| body_of(request)["variables"].clone())
            .collect()
    }
}

#[async_trait]
impl<F> Transport for RoutedTransport<F>
where
    F: Fn(&Value) -> ConnectorResult<HttpResponse> + Send + Sync,
{
    async fn post(&self, request: HttpRequest) -> ConnectorResult<HttpResponse> {
        let variables = body_of(&request)["variables"].clone();
        self.requests.lock().unwrap().push(request);
        (self.route)(&variables)
    }
}

/// Transport replaying a fixed queue of responses.
pub struct QueuedTransport {
    responses: Mutex<VecDeque<ConnectorResult<HttpResponse>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl QueuedTransport {
    pub fn new(responses: Vec<ConnectorResult<HttpResponse>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for QueuedTransport {
    async fn post(&self, request: HttpRequest) -> ConnectorResult<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ConnectorError::TransportError("no scripted response left".to_string())))
    }
}

pub fn body_of(request: &HttpRequest) -> Value {
    serde_json::from_slice(&request.body).expect("request body is JSON")
}

pub fn client_with(transport: Arc<dyn Transport>) -> AtlassianClient {
    AtlassianClient::with_transport(transport, "user@test.com", "api-token", ORGANIZATION_ID, "None")
        .expect("client builds")
}

/// Serves the two-team fixture for every request.
pub fn fixture_transport() -> Arc<RoutedTransport<impl Fn(&Value) -> ConnectorResult<HttpResponse> + Send + Sync>> {
    let body = read_fixture("teams.json");
    RoutedTransport::new(move |_variables: &Value| Ok(response(StatusCode::OK, &body)))
}
