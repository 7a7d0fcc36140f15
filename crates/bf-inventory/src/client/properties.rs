use bigfix_client::Result;
use tracing::{debug, instrument};

use crate::kind::EntityKind;
use crate::property::{Property, PropertyDetailResponseXml, PropertyListXml};

impl super::InventoryClient {
    #[instrument(skip(self))]
    pub async fn list_properties(&self) -> Result<Vec<Property>> {
        let kind = EntityKind::Property;
        let list: PropertyListXml = self
            .fetch("/api/properties", kind.list_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context("failed to list properties"))?;

        debug!(count = list.items.len(), "Listed properties");
        Ok(list.items.into_iter().map(Property::from_list_item).collect())
    }

    /// Fetch one property with its relevance definition.
    #[instrument(skip(self))]
    pub async fn get_property(&self, id: u64) -> Result<Property> {
        let kind = EntityKind::Property;
        let path = format!("/api/property/{id}");
        let detail: PropertyDetailResponseXml = self
            .fetch(&path, kind.get_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to fetch property {id}")))?;

        Ok(Property::from_detail(detail, id, self.http.url(&path)))
    }
}
