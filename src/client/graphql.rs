use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::ratelimit::extract_rate_limit;
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::annotations::Annotations;
use crate::constants::ATLASSIAN_GRAPHQL_URL;
use crate::error::{ConnectorError, ConnectorResult};
use crate::models::{GraphQLRequest, GraphQLResponse};

/// Builds the `Authorization` value for e-mail + API token credentials.
pub fn basic_auth_header(user_email: &str, api_token: &str) -> String {
    let credentials = STANDARD.encode(format!("{}:{}", user_email, api_token));
    format!("Basic {}", credentials)
}

/// Result of one GraphQL round-trip. Rate-limit annotations are kept even
/// when the call itself failed.
#[derive(Debug)]
pub struct Execution<T> {
    pub result: ConnectorResult<T>,
    pub annotations: Annotations,
}

impl<T> Execution<T> {
    fn failed(error: ConnectorError) -> Self {
        Self {
            result: Err(error),
            annotations: Annotations::new(),
        }
    }

    /// Moves the annotations into `sink` and returns the typed result.
    pub fn into_result(self, sink: &mut Annotations) -> ConnectorResult<T> {
        sink.merge(self.annotations);
        self.result
    }
}

/// GraphQL client bound to one endpoint and one set of credentials.
pub struct GraphQLClient {
    transport: Arc<dyn Transport>,
    api_url: String,
    authorization: HeaderValue,
}

impl GraphQLClient {
    pub fn new(transport: Arc<dyn Transport>, user_email: &str, api_token: &str) -> ConnectorResult<Self> {
        let mut authorization = HeaderValue::from_str(&basic_auth_header(user_email, api_token))
            .map_err(|e| ConnectorError::ConfigError(format!("Invalid credentials: {}", e)))?;
        authorization.set_sensitive(true);

        Ok(Self {
            transport,
            api_url: ATLASSIAN_GRAPHQL_URL.to_string(),
            authorization,
        })
    }

    /// Execute a GraphQL request and decode its `data` into `T`
    pub async fn execute<V, T>(&self, request: &GraphQLRequest<V>) -> Execution<T>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        let http_request = match self.build_request(request) {
            Ok(http_request) => http_request,
            Err(e) => return Execution::failed(e),
        };

        let response = match self.transport.post(http_request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "GraphQL transport failure");
                return Execution::failed(e);
            }
        };

        let mut annotations = Annotations::new();
        if let Some(description) = extract_rate_limit(response.status, &response.headers) {
            debug!(
                remaining = ?description.remaining,
                limit = ?description.limit,
                "upstream rate limit"
            );
            annotations.with_rate_limiting(description);
        }

        Execution {
            result: Self::decode(response),
            annotations,
        }
    }

    fn build_request<V: Serialize>(&self, request: &GraphQLRequest<V>) -> ConnectorResult<HttpRequest> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(AUTHORIZATION, self.authorization.clone());

        Ok(HttpRequest {
            url: self.api_url.clone(),
            headers,
            body: serde_json::to_vec(request)?,
        })
    }

    fn decode<T: DeserializeOwned>(response: HttpResponse) -> ConnectorResult<T> {
        if !response.status.is_success() {
            let error_text = String::from_utf8_lossy(&response.body);
            return Err(ConnectorError::TransportError(format!(
                "API request failed with status {}: {}",
                response.status, error_text
            )));
        }

        let envelope: GraphQLResponse<Value> = serde_json::from_slice(&response.body)
            .map_err(|e| ConnectorError::DecodeError(format!("invalid GraphQL envelope: {}", e)))?;

        Self::extract_data(envelope)
    }

    /// Extract data from GraphQL response, handling errors
    fn extract_data<T: DeserializeOwned>(response: GraphQLResponse<Value>) -> ConnectorResult<T> {
        if let Some(errors) = response.errors {
            let error_messages = errors
                .iter()
                .map(|e| e.message.as_str())
                .filter(|message| !message.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            let error_messages = if error_messages.is_empty() {
                "unspecified error".to_string()
            } else {
                error_messages
            };
            return Err(ConnectorError::UpstreamApplicationError(error_messages));
        }

        match response.data {
            Some(data) => serde_json::from_value(data)
                .map_err(|e| ConnectorError::DecodeError(e.to_string())),
            None => Err(ConnectorError::DecodeError("No data in response".to_string())),
        }
    }
}
