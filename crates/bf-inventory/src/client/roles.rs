use bigfix_client::Result;
use tracing::{debug, instrument};

use crate::kind::EntityKind;
use crate::role::{Role, RoleDetailResponseXml, RoleListXml};

impl super::InventoryClient {
    #[instrument(skip(self))]
    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        let kind = EntityKind::Role;
        let list: RoleListXml = self
            .fetch("/api/roles", kind.list_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context("failed to list roles"))?;

        debug!(count = list.roles.len(), "Listed roles");
        Ok(list.roles.into_iter().map(Role::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_role(&self, id: u64) -> Result<Role> {
        let kind = EntityKind::Role;
        let path = format!("/api/role/{id}");
        let detail: RoleDetailResponseXml = self
            .fetch(&path, kind.get_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to fetch role {id}")))?;

        Ok(Role::from_detail(detail, id, &self.http.url(&path)))
    }
}
