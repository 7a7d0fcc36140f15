use bigfix_client::Result;
use tracing::{debug, instrument};

use crate::action::{Action, ActionDetailResponseXml, ActionListXml};
use crate::kind::EntityKind;

impl super::InventoryClient {
    #[instrument(skip(self))]
    pub async fn list_actions(&self) -> Result<Vec<Action>> {
        let kind = EntityKind::Action;
        let list: ActionListXml = self
            .fetch("/api/actions", kind.list_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context("failed to list actions"))?;

        debug!(count = list.items.len(), "Listed actions");
        Ok(list.items.into_iter().map(Action::from_list_item).collect())
    }

    /// Fetch one action with its script, settings and target.
    #[instrument(skip(self))]
    pub async fn get_action(&self, id: u64) -> Result<Action> {
        let kind = EntityKind::Action;
        let path = format!("/api/action/{id}");
        let detail: ActionDetailResponseXml = self
            .fetch(&path, kind.get_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to fetch action {id}")))?;

        Ok(Action::from_detail(detail, id, self.http.url(&path)))
    }
}
