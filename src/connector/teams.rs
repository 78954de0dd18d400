use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::cache::TeamPages;
use super::pagination::resolve_page_token;
use super::resource::{
    new_grant, new_group_resource, new_permission_entitlement, Entitlement, Grant, Resource,
    ResourceId, ResourceType, TEAM_RESOURCE_TYPE, USER_RESOURCE_TYPE,
};
use super::users::member_resource;
use super::{ListPage, PageToken, ResourceSyncer};
use crate::annotations::Annotations;
use crate::error::{ConnectorError, ConnectorResult};
use crate::models::{MembershipRole, Team};

pub struct TeamBuilder {
    pages: Arc<TeamPages>,
}

impl TeamBuilder {
    pub fn new(pages: Arc<TeamPages>) -> Self {
        Self { pages }
    }
}

#[async_trait]
impl ResourceSyncer for TeamBuilder {
    fn resource_type(&self) -> &'static ResourceType {
        &TEAM_RESOURCE_TYPE
    }

    async fn list(
        &self,
        cancel: &CancellationToken,
        _parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Resource>> {
        let (mut bag, cursor) = resolve_page_token(&token.token, &TEAM_RESOURCE_TYPE)?;
        let page = self.pages.fetch(&cursor, token.size, cancel).await?;

        let resources = page
            .teams
            .iter()
            .map(|team| team_resource(team, None))
            .collect::<ConnectorResult<Vec<_>>>()?;

        bag.next(&page.next_page_token)?;

        Ok(ListPage {
            items: resources,
            next_page_token: bag.marshal()?,
            annotations: page.annotations.clone(),
        })
    }

    async fn entitlements(
        &self,
        _cancel: &CancellationToken,
        resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<ListPage<Entitlement>> {
        expect_team(resource)?;
        Ok(ListPage::last(team_entitlements(resource)))
    }

    async fn grants(
        &self,
        cancel: &CancellationToken,
        resource: &Resource,
        token: &PageToken,
    ) -> ConnectorResult<ListPage<Grant>> {
        expect_team(resource)?;
        let team_id = resource.id.resource.as_str();
        let (mut bag, cursor) = resolve_page_token(&token.token, &TEAM_RESOURCE_TYPE)?;

        if cursor.is_empty() {
            if let Some(team) = self.pages.find_team(team_id, token.size).await {
                return Ok(ListPage::last(team_grants(resource, &team)?));
            }
        }

        // Not in the snapshot: walk the outer pages until the team turns up.
        let page = self.pages.fetch(&cursor, token.size, cancel).await?;
        if let Some(team) = page.find(team_id) {
            return Ok(ListPage {
                items: team_grants(resource, team)?,
                next_page_token: String::new(),
                annotations: page.annotations.clone(),
            });
        }

        debug!(team = %team_id, "team not on this page, continuing");
        bag.next(&page.next_page_token)?;

        Ok(ListPage {
            items: Vec::new(),
            next_page_token: bag.marshal()?,
            annotations: page.annotations.clone(),
        })
    }
}

fn expect_team(resource: &Resource) -> ConnectorResult<()> {
    if resource.is_type(&TEAM_RESOURCE_TYPE) {
        Ok(())
    } else {
        Err(ConnectorError::InvalidResource(format!(
            "{} is a {}, not a team",
            resource.id.resource, resource.id.resource_type
        )))
    }
}

/// Maps a team onto a group-shaped resource.
pub fn team_resource(team: &Team, parent: Option<&ResourceId>) -> ConnectorResult<Resource> {
    let mut profile = Map::new();
    profile.insert("team_id".to_string(), json!(team.id));
    profile.insert("display_name".to_string(), json!(team.display_name));
    profile.insert(
        "description".to_string(),
        team.description.clone().map(Value::String).unwrap_or(Value::Null),
    );

    new_group_resource(&team.display_name, &TEAM_RESOURCE_TYPE, &team.id, profile, parent)
}

/// One permission entitlement per membership role.
pub fn team_entitlements(resource: &Resource) -> Vec<Entitlement> {
    MembershipRole::ALL
        .iter()
        .map(|role| {
            new_permission_entitlement(
                resource,
                role.as_str(),
                format!("{} Team {}", resource.display_name, role),
                format!("Team Membership Role {} for team {}", role, resource.display_name),
                &[&USER_RESOURCE_TYPE],
            )
        })
        .collect()
}

/// One grant per membership edge of `team`.
pub fn team_grants(resource: &Resource, team: &Team) -> ConnectorResult<Vec<Grant>> {
    team.member_edges()
        .map(|edge| -> ConnectorResult<Grant> {
            let principal = member_resource(&edge.member, Some(&resource.id))?;
            let annotations = Annotations::new()
                .with_v1_identifier(team_grant_id(&resource.id.resource, &edge.member.id, edge.role));
            Ok(new_grant(resource, edge.role.as_str(), principal, annotations))
        })
        .collect()
}

pub fn team_grant_id(team_id: &str, member_id: &str, role: MembershipRole) -> String {
    format!("team-grant:{}:{}:{}", team_id, member_id, role)
}
