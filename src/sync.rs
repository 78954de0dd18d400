//! Full sync pass over every resource type, the way a governance platform
//! drives the connector: list to exhaustion, then entitlements and grants for
//! every listed resource.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::connector::{Connector, Entitlement, Grant, PageToken, Resource, ResourceSyncer};
use crate::connector_error;
use crate::error::{ConnectorError, ConnectorResult};

#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub resources: Vec<Resource>,
    pub entitlements: Vec<Entitlement>,
    pub grants: Vec<Grant>,
}

impl SyncReport {
    pub fn resources_of(&self, resource_type_id: &str) -> usize {
        self.resources
            .iter()
            .filter(|resource| resource.id.resource_type == resource_type_id)
            .count()
    }
}

pub async fn run_sync(
    connector: &Connector,
    page_size: i64,
    cancel: &CancellationToken,
) -> ConnectorResult<SyncReport> {
    // Every pass starts from the upstream, never from a previous pass's page.
    connector.reset().await;

    let syncers = connector.resource_syncers();
    let mut report = SyncReport::default();

    for syncer in &syncers {
        let resources = list_all(syncer.as_ref(), page_size, cancel).await?;
        info!(
            resource_type = syncer.resource_type().id,
            count = resources.len(),
            "listed resources"
        );
        report.resources.extend(resources);
    }

    for resource in &report.resources {
        let syncer = syncer_for(&syncers, &resource.id.resource_type)?;

        let mut token = PageToken::first(page_size);
        loop {
            let page = syncer.entitlements(cancel, resource, &token).await?;
            report.entitlements.extend(page.items);
            match advance(&token.token, page.next_page_token)? {
                Some(next) => token.token = next,
                None => break,
            }
        }

        let mut token = PageToken::first(page_size);
        loop {
            let page = syncer.grants(cancel, resource, &token).await?;
            report.grants.extend(page.items);
            match advance(&token.token, page.next_page_token)? {
                Some(next) => token.token = next,
                None => break,
            }
        }
    }

    info!(
        resources = report.resources.len(),
        entitlements = report.entitlements.len(),
        grants = report.grants.len(),
        "sync pass complete"
    );

    Ok(report)
}

async fn list_all(
    syncer: &dyn ResourceSyncer,
    page_size: i64,
    cancel: &CancellationToken,
) -> ConnectorResult<Vec<Resource>> {
    let mut resources = Vec::new();
    let mut token = PageToken::first(page_size);

    loop {
        let page = syncer.list(cancel, None, &token).await?;
        debug!(
            resource_type = syncer.resource_type().id,
            count = page.items.len(),
            "listed page"
        );
        resources.extend(page.items);
        match advance(&token.token, page.next_page_token)? {
            Some(next) => token.token = next,
            None => return Ok(resources),
        }
    }
}

fn syncer_for<'a>(
    syncers: &'a [Arc<dyn ResourceSyncer>],
    resource_type_id: &str,
) -> ConnectorResult<&'a dyn ResourceSyncer> {
    syncers
        .iter()
        .find(|syncer| syncer.resource_type().id == resource_type_id)
        .map(|syncer| syncer.as_ref())
        .ok_or_else(|| connector_error!(InvalidResource, "no syncer for resource type {}", resource_type_id))
}

// `None` when listing is finished; a token handed back unchanged would
// never terminate.
fn advance(previous: &str, next: String) -> ConnectorResult<Option<String>> {
    if next.is_empty() {
        Ok(None)
    } else if next == previous {
        Err(ConnectorError::TokenDecodeError(
            "page token did not advance".to_string(),
        ))
    } else {
        Ok(Some(next))
    }
}
