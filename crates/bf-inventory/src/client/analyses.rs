use bigfix_client::Result;
use futures::stream::{BoxStream, Stream};
use tracing::{debug, instrument};

use crate::analysis::{Analysis, AnalysisDetailResponseXml, AnalysisListXml};
use crate::kind::EntityKind;
use crate::site::Site;
use crate::site_ref::{SiteFilter, SiteRef};

impl super::InventoryClient {
    /// List the analyses of one site.
    #[instrument(skip(self))]
    pub async fn list_analyses(&self, site_name: &str, site_type: &str) -> Result<Vec<Analysis>> {
        let site = SiteRef::parse(site_name, site_type)?;
        self.list_analyses_in(site).await
    }

    /// Fetch one analysis with its properties.
    #[instrument(skip(self))]
    pub async fn get_analysis(&self, site_name: &str, site_type: &str, id: u64) -> Result<Analysis> {
        let site = SiteRef::parse(site_name, site_type)?;
        let kind = EntityKind::Analysis;
        let path = site.content_path(kind, id);

        let detail: AnalysisDetailResponseXml = self
            .fetch(&path, kind.get_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to fetch analysis {id} in site {site}")))?;

        Ok(Analysis::from_detail(detail.analysis, id, self.http.url(&path), &site))
    }

    /// Analyses of every site in `sites` accepted by `filter`.
    pub fn analyses_in_sites<'a, S>(
        &'a self,
        sites: S,
        filter: SiteFilter,
    ) -> BoxStream<'a, Result<Analysis>>
    where
        S: Stream<Item = Site> + Send + 'a,
    {
        self.fan_out(sites, filter, move |site| self.list_analyses_in(site))
    }

    async fn list_analyses_in(&self, site: SiteRef) -> Result<Vec<Analysis>> {
        let kind = EntityKind::Analysis;
        let list: AnalysisListXml = self
            .fetch(&site.content_list_path(kind), kind.list_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to list analyses in site {site}")))?;

        debug!(site = %site, count = list.items.len(), "Listed analyses");
        Ok(list
            .items
            .into_iter()
            .map(|item| Analysis::from_list_item(item, &site))
            .collect())
    }
}
