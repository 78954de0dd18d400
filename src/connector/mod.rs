pub mod cache;
pub mod pagination;
pub mod resource;
pub mod teams;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::annotations::Annotations;
use crate::client::AtlassianClient;
use crate::config::Settings;
use crate::constants::{CONNECTOR_DESCRIPTION, CONNECTOR_DISPLAY_NAME};
use crate::error::ConnectorResult;

pub use cache::TeamPages;
pub use pagination::{resolve_page_token, PageBag, PageState};
pub use resource::{
    Entitlement, Grant, Resource, ResourceId, ResourceType, TEAM_RESOURCE_TYPE, USER_RESOURCE_TYPE,
};
pub use teams::TeamBuilder;
pub use users::UserBuilder;

/// Page request handed to a syncer: the opaque token from the previous call
/// and the caller's preferred page size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageToken {
    pub size: i64,
    pub token: String,
}

impl PageToken {
    pub fn first(size: i64) -> Self {
        Self {
            size,
            token: String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Empty once nothing is left to list.
    pub next_page_token: String,
    pub annotations: Annotations,
}

impl<T> ListPage<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_page_token: String::new(),
            annotations: Annotations::new(),
        }
    }
}

/// Per-resource-type sync surface.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    fn resource_type(&self) -> &'static ResourceType;

    async fn list(
        &self,
        cancel: &CancellationToken,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Resource>>;

    async fn entitlements(
        &self,
        cancel: &CancellationToken,
        resource: &Resource,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Entitlement>>;

    async fn grants(
        &self,
        cancel: &CancellationToken,
        resource: &Resource,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Grant>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorMetadata {
    pub display_name: String,
    pub description: String,
}

pub struct Connector {
    client: Arc<AtlassianClient>,
    pages: Arc<TeamPages>,
}

impl Connector {
    pub fn new(client: AtlassianClient) -> Self {
        let client = Arc::new(client);
        let pages = Arc::new(TeamPages::new(client.clone()));
        Self { client, pages }
    }

    pub fn from_settings(settings: &Settings) -> ConnectorResult<Self> {
        Ok(Self::new(AtlassianClient::from_settings(settings)?))
    }

    pub fn resource_syncers(&self) -> Vec<Arc<dyn ResourceSyncer>> {
        vec![
            Arc::new(UserBuilder::new(self.pages.clone())),
            Arc::new(TeamBuilder::new(self.pages.clone())),
        ]
    }

    pub fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: CONNECTOR_DISPLAY_NAME.to_string(),
            description: CONNECTOR_DESCRIPTION.to_string(),
        }
    }

    /// Exercises the configured credentials with a minimal team search.
    pub async fn validate(&self, cancel: &CancellationToken) -> ConnectorResult<Annotations> {
        let annotations = self.client.probe(cancel).await?;
        info!(
            organization = %self.client.organization_id(),
            site = %self.client.site_id(),
            "credentials validated"
        );
        Ok(annotations)
    }

    /// Drops the cached team page so the next listing starts fresh.
    pub async fn reset(&self) {
        self.pages.invalidate().await;
    }
}
