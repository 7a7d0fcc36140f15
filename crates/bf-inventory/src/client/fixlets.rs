use bigfix_client::Result;
use futures::stream::{BoxStream, Stream};
use tracing::{debug, instrument};

use crate::fixlet::{Fixlet, FixletDetailResponseXml, FixletListXml};
use crate::kind::EntityKind;
use crate::site::Site;
use crate::site_ref::{SiteFilter, SiteRef};

impl super::InventoryClient {
    /// List the fixlets of one site.
    #[instrument(skip(self))]
    pub async fn list_fixlets(&self, site_name: &str, site_type: &str) -> Result<Vec<Fixlet>> {
        let site = SiteRef::parse(site_name, site_type)?;
        self.list_fixlets_in(site).await
    }

    #[instrument(skip(self))]
    pub async fn get_fixlet(&self, site_name: &str, site_type: &str, id: u64) -> Result<Fixlet> {
        let site = SiteRef::parse(site_name, site_type)?;
        let kind = EntityKind::Fixlet;
        let path = site.content_path(kind, id);

        let detail: FixletDetailResponseXml = self
            .fetch(&path, kind.get_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to fetch fixlet {id} in site {site}")))?;

        Ok(Fixlet::from_detail(detail.fixlet, id, self.http.url(&path), &site))
    }

    /// Fixlets of every site in `sites` accepted by `filter`.
    ///
    /// Sites answering "not found" contribute nothing; other failures are
    /// yielded as a single `Err` for that site.
    pub fn fixlets_in_sites<'a, S>(
        &'a self,
        sites: S,
        filter: SiteFilter,
    ) -> BoxStream<'a, Result<Fixlet>>
    where
        S: Stream<Item = Site> + Send + 'a,
    {
        self.fan_out(sites, filter, move |site| self.list_fixlets_in(site))
    }

    async fn list_fixlets_in(&self, site: SiteRef) -> Result<Vec<Fixlet>> {
        let kind = EntityKind::Fixlet;
        let list: FixletListXml = self
            .fetch(&site.content_list_path(kind), kind.list_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to list fixlets in site {site}")))?;

        debug!(site = %site, count = list.items.len(), "Listed fixlets");
        Ok(list
            .items
            .into_iter()
            .map(|item| Fixlet::from_list_item(item, &site))
            .collect())
    }
}
