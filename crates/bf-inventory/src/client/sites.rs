use bigfix_client::{Error, ErrorKind, Result};
use tracing::{debug, instrument};

use crate::kind::EntityKind;
use crate::site::{Site, SiteDetailResponseXml, SiteFile, SiteFilesXml, SiteListXml, SitePermission, SitePermissionsXml};
use crate::site_ref::SiteRef;

impl super::InventoryClient {
    /// List external, operator and action sites, in that order.
    #[instrument(skip(self))]
    pub async fn list_sites(&self) -> Result<Vec<Site>> {
        let kind = EntityKind::Site;
        let list: SiteListXml = self
            .fetch("/api/sites", kind.list_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context("failed to list sites"))?;

        let sites = list.into_sites();
        debug!(count = sites.len(), "Listed sites");
        Ok(sites)
    }

    /// Fetch one site. `master` and `action` both address the master
    /// action site.
    #[instrument(skip(self))]
    pub async fn get_site(&self, site_name: &str, site_type: &str) -> Result<Site> {
        let site = SiteRef::parse(site_name, site_type)?;
        let kind = EntityKind::Site;
        let path = site.site_path();

        let detail: SiteDetailResponseXml = self
            .fetch(&path, kind.get_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to fetch site {site}")))?;

        detail
            .into_site(site.site_type(), self.http.url(&path))
            .ok_or_else(|| Error::new(ErrorKind::NotFound(format!("site {site}"))))
    }

    /// Operator permissions granted on a site.
    #[instrument(skip(self))]
    pub async fn site_permissions(
        &self,
        site_name: &str,
        site_type: &str,
    ) -> Result<Vec<SitePermission>> {
        let site = SiteRef::parse(site_name, site_type)?;
        let permissions: SitePermissionsXml = self
            .fetch(
                &site.site_resource_path("permissions"),
                "bigfix_site_permissions",
                "site permissions",
            )
            .await
            .map_err(|e| e.with_context(format!("failed to fetch permissions of site {site}")))?;

        Ok(permissions.into_permissions())
    }

    /// Files hosted in a site.
    #[instrument(skip(self))]
    pub async fn site_files(&self, site_name: &str, site_type: &str) -> Result<Vec<SiteFile>> {
        let site = SiteRef::parse(site_name, site_type)?;
        let files: SiteFilesXml = self
            .fetch(&site.site_resource_path("files"), "bigfix_site_files", "site files")
            .await
            .map_err(|e| e.with_context(format!("failed to fetch files of site {site}")))?;

        Ok(files.into_files())
    }
}
