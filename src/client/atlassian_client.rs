use std::collections::HashMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use super::graphql::GraphQLClient;
use super::pagination::{page_size, PageOptions};
use super::templates::{QueryTemplate, TeamSearchVariables, TemplateStore};
use super::transport::{HttpTransport, Transport};
use crate::annotations::Annotations;
use crate::config::Settings;
use crate::error::{ConnectorError, ConnectorResult};
use crate::models::{Connection, Team, TeamEdge, TeamQuery};

/// One outer page of teams, each carrying its complete member list.
#[derive(Debug, Clone, Default)]
pub struct TeamPage {
    pub teams: Vec<Team>,
    /// Upstream cursor of the next outer page; empty on the last page.
    pub next_page_token: String,
    pub annotations: Annotations,
}

impl TeamPage {
    pub fn find(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == team_id)
    }
}

pub struct AtlassianClient {
    graphql: GraphQLClient,
    templates: TemplateStore,
    organization_id: String,
    site_id: String,
}

impl AtlassianClient {
    pub fn from_settings(settings: &Settings) -> ConnectorResult<Self> {
        let transport = Arc::new(HttpTransport::new()?);
        let client = Self::with_transport(
            transport,
            &settings.user_email,
            &settings.api_token,
            &settings.organization,
            &settings.site_id,
        )?;

        Ok(client.with_templates(settings.templates()))
    }

    pub fn with_transport(
        transport: Arc<dyn Transport>,
        user_email: &str,
        api_token: &str,
        organization_id: &str,
        site_id: &str,
    ) -> ConnectorResult<Self> {
        Ok(Self {
            graphql: GraphQLClient::new(transport, user_email, api_token)?,
            templates: TemplateStore::bundled(),
            organization_id: organization_id.to_string(),
            site_id: site_id.to_string(),
        })
    }

    pub fn with_templates(mut self, templates: TemplateStore) -> Self {
        self.templates = templates;
        self
    }

    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Fetches one page of teams and drains every team's member pages
    /// before returning it.
    pub async fn list_teams(
        &self,
        options: &PageOptions,
        cancel: &CancellationToken,
    ) -> ConnectorResult<TeamPage> {
        let page_size = page_size(options.page_size);
        let after_team = Some(options.page_token.clone()).filter(|cursor| !cursor.is_empty());
        let variables =
            TeamSearchVariables::new(&self.organization_id, &self.site_id, page_size, after_team)?;

        let mut annotations = Annotations::new();
        let search = self.search(&variables, cancel, &mut annotations).await?;

        let next_page_token = search.page_info.next_cursor()?.unwrap_or_default().to_string();
        if !next_page_token.is_empty() && next_page_token == options.page_token {
            return Err(ConnectorError::DecodeError(format!(
                "team cursor {} did not advance",
                next_page_token
            )));
        }

        let mut teams = Vec::with_capacity(search.edges.len());
        for edge in search.edges {
            let team = self
                .hydrate_members(edge.node.team, &variables, page_size, cancel, &mut annotations)
                .await?;
            teams.push(team);
        }

        debug!(
            teams = teams.len(),
            last_page = next_page_token.is_empty(),
            "fetched team page"
        );

        Ok(TeamPage {
            teams,
            next_page_token,
            annotations,
        })
    }

    /// Issues a single one-team search to check credentials and scope.
    pub async fn probe(&self, cancel: &CancellationToken) -> ConnectorResult<Annotations> {
        let variables = TeamSearchVariables::new(&self.organization_id, &self.site_id, 1, None)?;
        let mut annotations = Annotations::new();
        self.search(&variables, cancel, &mut annotations).await?;
        Ok(annotations)
    }

    // Replaces the team's members with the concatenation of every member
    // page the upstream reports for it.
    async fn hydrate_members(
        &self,
        mut team: Team,
        outer: &TeamSearchVariables,
        page_size: i64,
        cancel: &CancellationToken,
        annotations: &mut Annotations,
    ) -> ConnectorResult<Team> {
        let mut members = Vec::new();
        let mut after_member: Option<String> = None;

        loop {
            let variables = outer.with_members(page_size, after_member.clone());
            let search = self.search(&variables, cancel, annotations).await?;

            let mut by_id: HashMap<String, Team> = search
                .edges
                .into_iter()
                .map(|edge| (edge.node.team.id.clone(), edge.node.team))
                .collect();
            let page = by_id.remove(&team.id).ok_or_else(|| {
                ConnectorError::DecodeError(format!("team {} missing from its member page", team.id))
            })?;

            let page_info = page.members.page_info;
            members.extend(page.members.edges);

            let next = page_info.next_cursor()?.map(str::to_string);
            match next {
                Some(cursor) if after_member.as_deref() == Some(cursor.as_str()) => {
                    return Err(ConnectorError::DecodeError(format!(
                        "member cursor for team {} did not advance",
                        team.id
                    )));
                }
                Some(cursor) => after_member = Some(cursor),
                None => {
                    debug!(team = %team.id, members = members.len(), "hydrated team members");
                    team.members = Connection {
                        page_info,
                        edges: members,
                    };
                    return Ok(team);
                }
            }
        }
    }

    async fn search(
        &self,
        variables: &TeamSearchVariables,
        cancel: &CancellationToken,
        annotations: &mut Annotations,
    ) -> ConnectorResult<Connection<TeamEdge>> {
        if cancel.is_cancelled() {
            return Err(ConnectorError::Cancelled);
        }

        let request = self
            .templates
            .render_template(QueryTemplate::TeamSearch, variables)?;

        debug!(
            after_team = ?variables.after_team,
            after_member = ?variables.after_member,
            "team search"
        );

        let execution = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ConnectorError::Cancelled),
            execution = self.graphql.execute::<_, TeamQuery>(&request) => execution,
        };

        let query = execution.into_result(annotations).map_err(|e| {
            error!(error = %e, "Error getting resources");
            e
        })?;

        Ok(query.into_search())
    }
}
