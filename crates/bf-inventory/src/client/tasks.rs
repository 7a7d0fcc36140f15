use bigfix_client::Result;
use futures::stream::{BoxStream, Stream};
use tracing::{debug, instrument};

use crate::kind::EntityKind;
use crate::site::Site;
use crate::site_ref::{SiteFilter, SiteRef};
use crate::task::{Task, TaskDetailResponseXml, TaskListXml};

impl super::InventoryClient {
    /// List the tasks of one site.
    #[instrument(skip(self))]
    pub async fn list_tasks(&self, site_name: &str, site_type: &str) -> Result<Vec<Task>> {
        let site = SiteRef::parse(site_name, site_type)?;
        self.list_tasks_in(site).await
    }

    /// Fetch one task with its actions.
    #[instrument(skip(self))]
    pub async fn get_task(&self, site_name: &str, site_type: &str, id: u64) -> Result<Task> {
        let site = SiteRef::parse(site_name, site_type)?;
        let kind = EntityKind::Task;
        let path = site.content_path(kind, id);

        let detail: TaskDetailResponseXml = self
            .fetch(&path, kind.get_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to fetch task {id} in site {site}")))?;

        Ok(Task::from_detail(detail.task, id, self.http.url(&path), &site))
    }

    /// Tasks of every site in `sites` accepted by `filter`.
    pub fn tasks_in_sites<'a, S>(&'a self, sites: S, filter: SiteFilter) -> BoxStream<'a, Result<Task>>
    where
        S: Stream<Item = Site> + Send + 'a,
    {
        self.fan_out(sites, filter, move |site| self.list_tasks_in(site))
    }

    async fn list_tasks_in(&self, site: SiteRef) -> Result<Vec<Task>> {
        let kind = EntityKind::Task;
        let list: TaskListXml = self
            .fetch(&site.content_list_path(kind), kind.list_tag(), kind.as_str())
            .await
            .map_err(|e| e.with_context(format!("failed to list tasks in site {site}")))?;

        debug!(site = %site, count = list.items.len(), "Listed tasks");
        Ok(list
            .items
            .into_iter()
            .map(|item| Task::from_list_item(item, &site))
            .collect())
    }
}
