use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map};
use tokio_util::sync::CancellationToken;

use super::cache::TeamPages;
use super::pagination::resolve_page_token;
use super::resource::{
    new_user_resource, Entitlement, Grant, Resource, ResourceId, ResourceType, UserStatus,
    USER_RESOURCE_TYPE,
};
use super::{ListPage, PageToken, ResourceSyncer};
use crate::error::ConnectorResult;
use crate::models::Member;

/// Users have no listing of their own upstream; they are every member of
/// every team, in team order, without de-duplication.
pub struct UserBuilder {
    pages: Arc<TeamPages>,
}

impl UserBuilder {
    pub fn new(pages: Arc<TeamPages>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl ResourceSyncer for UserBuilder {
    fn resource_type(&self) -> &'static ResourceType {
        &USER_RESOURCE_TYPE
    }

    async fn list(
        &self,
        cancel: &CancellationToken,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Resource>> {
        let (mut bag, cursor) = resolve_page_token(&token.token, &USER_RESOURCE_TYPE)?;
        let page = self.pages.fetch(&cursor, token.size, cancel).await?;

        let mut resources = Vec::new();
        for team in &page.teams {
            for edge in team.member_edges() {
                resources.push(member_resource(&edge.member, None)?);
            }
        }

        bag.next(&page.next_page_token)?;

        Ok(ListPage {
            items: resources,
            next_page_token: bag.marshal()?,
            annotations: page.annotations.clone(),
        })
    }

    // Users carry no permissions of their own.
    async fn entitlements(
        &self,
        _cancel: &CancellationToken,
        _resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<ListPage<Entitlement>> {
        Ok(ListPage::last(Vec::new()))
    }

    async fn grants(
        &self,
        _cancel: &CancellationToken,
        _resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<ListPage<Grant>> {
        Ok(ListPage::last(Vec::new()))
    }
}

/// Maps a team member onto an enabled user resource.
pub fn member_resource(member: &Member, parent: Option<&ResourceId>) -> ConnectorResult<Resource> {
    let mut profile = Map::new();
    profile.insert("user_id".to_string(), json!(member.id));
    profile.insert("account_id".to_string(), json!(member.account_id));
    profile.insert("username".to_string(), json!(member.name));

    new_user_resource(
        &member.name,
        &USER_RESOURCE_TYPE,
        &member.id,
        profile,
        UserStatus::Enabled,
        &member.name,
        parent,
    )
}
