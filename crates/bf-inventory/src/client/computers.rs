use bigfix_client::{Error, ErrorKind, Result};
use tracing::{debug, instrument};

use crate::computer::{Computer, ComputerDetailResponseXml, ComputerListXml};
use crate::kind::EntityKind;

/// Fields requested by the computer listing.
const LIST_FIELDS: &str = "ID,Name,OS,LastReportTime,CPU,IPAddress";

fn list_path() -> Result<String> {
    let query = serde_urlencoded::to_string([("fields", LIST_FIELDS)])
        .map_err(|e| Error::new(ErrorKind::Config(format!("cannot encode field list: {e}"))))?;
    Ok(format!("/api/computers?{query}"))
}

impl super::InventoryClient {
    /// List every computer with the reduced field set.
    #[instrument(skip(self))]
    pub async fn list_computers(&self) -> Result<Vec<Computer>> {
        let kind = EntityKind::Computer;
        let list: ComputerListXml = self
            .fetch(&list_path()?, kind.list_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context("failed to list computers"))?;

        debug!(count = list.computers.len(), "Listed computers");
        Ok(list.computers.into_iter().map(Computer::from_list_item).collect())
    }

    /// Fetch one computer with its full property bag.
    #[instrument(skip(self))]
    pub async fn get_computer(&self, id: u64) -> Result<Computer> {
        let kind = EntityKind::Computer;
        let path = format!("/api/computer/{id}?fields");
        let detail: ComputerDetailResponseXml = self
            .fetch(&path, kind.get_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to fetch computer {id}")))?;

        Ok(Computer::from_detail(detail.computer, id, &self.http.url(&path)))
    }
}
