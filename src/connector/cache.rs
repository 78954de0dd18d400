use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::{page_size, AtlassianClient, PageOptions, TeamPage};
use crate::error::ConnectorResult;
use crate::models::Team;

/// Identifies one outer page: the cursor it starts at and its clamped size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub cursor: String,
    pub page_size: i64,
}

impl PageKey {
    pub fn new(cursor: &str, requested_size: i64) -> Self {
        Self {
            cursor: cursor.to_string(),
            page_size: page_size(requested_size),
        }
    }
}

struct Snapshot {
    key: PageKey,
    page: Arc<TeamPage>,
}

/// Team pages shared by the team and user syncers.
///
/// Holds a single snapshot: the last page fetched. Fetching a page under any
/// other key replaces it.
pub struct TeamPages {
    client: Arc<AtlassianClient>,
    slot: RwLock<Option<Snapshot>>,
}

impl TeamPages {
    pub fn new(client: Arc<AtlassianClient>) -> Self {
        Self {
            client,
            slot: RwLock::new(None),
        }
    }

    pub async fn fetch(
        &self,
        cursor: &str,
        requested_size: i64,
        cancel: &CancellationToken,
    ) -> ConnectorResult<Arc<TeamPage>> {
        let key = PageKey::new(cursor, requested_size);

        if let Some(page) = self.cached(&key).await {
            debug!(cursor = %key.cursor, "team page served from snapshot");
            return Ok(page);
        }

        let mut slot = self.slot.write().await;
        // Another task may have filled the slot while we waited.
        if let Some(snapshot) = slot.as_ref().filter(|snapshot| snapshot.key == key) {
            return Ok(snapshot.page.clone());
        }
        *slot = None;

        let options = PageOptions {
            page_size: key.page_size,
            page_token: key.cursor.clone(),
        };
        let page = Arc::new(self.client.list_teams(&options, cancel).await?);
        *slot = Some(Snapshot {
            key,
            page: page.clone(),
        });

        Ok(page)
    }

    /// Looks a team up in the current snapshot without touching the upstream.
    /// Only a snapshot fetched at the same clamped page size counts.
    pub async fn find_team(&self, team_id: &str, requested_size: i64) -> Option<Team> {
        let page_size = page_size(requested_size);
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|snapshot| snapshot.key.page_size == page_size)
            .and_then(|snapshot| snapshot.page.find(team_id))
            .cloned()
    }

    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    async fn cached(&self, key: &PageKey) -> Option<Arc<TeamPage>> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|snapshot| &snapshot.key == key)
            .map(|snapshot| snapshot.page.clone())
    }
}
