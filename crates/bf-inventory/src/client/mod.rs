//! BigFix inventory client.
//!
//! Wraps [`BigFixHttpClient`] and exposes one group of typed methods per
//! entity kind. Every method builds its path, runs the request under the
//! shared retry policy, decodes the XML and overlays the request context
//! (id, resource URL, site) the server does not echo back.

use std::future::Future;
use std::sync::Arc;

use bigfix_client::{BigFixHttpClient, ConnectionConfig, RateLimiter, Result, RetryObserver};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::not_found::NotFoundPolicy;
use crate::site::Site;
use crate::site_ref::{SiteFilter, SiteRef};
use crate::xml::decode;

mod actions;
mod analyses;
mod computers;
mod fixlets;
mod properties;
mod roles;
mod sites;
mod tasks;

/// Typed access to computers, sites, site content, actions, properties
/// and roles.
///
/// # Example
///
/// ```rust,ignore
/// use bigfix_inventory::{InventoryClient, SiteFilter};
/// use bigfix_client::ConnectionConfig;
/// use futures::{stream, StreamExt};
///
/// let client = InventoryClient::new(&ConnectionConfig::from_env()?)?;
///
/// let computers = client.list_computers().await?;
/// let sites = client.list_sites().await?;
///
/// let mut fixlets = client.fixlets_in_sites(stream::iter(sites), SiteFilter::all());
/// while let Some(fixlet) = fixlets.next().await {
///     println!("{}", fixlet?.title);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: BigFixHttpClient,
    not_found: NotFoundPolicy,
}

impl InventoryClient {
    /// Build the transport and not-found policy from connection settings.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let http = BigFixHttpClient::new(config)?;
        Ok(Self::from_http(http, NotFoundPolicy::from_config(config)))
    }

    /// Create an inventory client over an existing transport.
    pub fn from_http(http: BigFixHttpClient, not_found: NotFoundPolicy) -> Self {
        Self { http, not_found }
    }

    /// Get the underlying transport.
    pub fn http(&self) -> &BigFixHttpClient {
        &self.http
    }

    pub fn not_found_policy(&self) -> &NotFoundPolicy {
        &self.not_found
    }

    /// Consult `limiter` before every request attempt.
    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.http = self.http.with_rate_limiter(limiter);
        self
    }

    pub fn with_retry_observer(mut self, observer: RetryObserver) -> Self {
        self.http = self.http.with_retry_observer(observer);
        self
    }

    /// Map a "not found" failure of a single-entity fetch to `None`.
    ///
    /// ```rust,ignore
    /// let task = client.optional(client.get_task("BES Support", "external", 42).await)?;
    /// ```
    pub fn optional<T>(&self, result: Result<T>) -> Result<Option<T>> {
        self.not_found.optional(result)
    }

    /// GET `path` and decode the body as `T`.
    async fn fetch<T: DeserializeOwned>(&self, path: &str, tag: &str, what: &str) -> Result<T> {
        let body = self.http.get_xml(path, tag).await?;
        decode(&body, what)
    }

    /// Run `list` for every site in `sites` accepted by `filter`.
    ///
    /// A suppressed error contributes nothing; any other error is yielded
    /// once for that site and the stream moves on to the next one.
    fn fan_out<'a, S, T, F, Fut>(
        &'a self,
        sites: S,
        filter: SiteFilter,
        list: F,
    ) -> BoxStream<'a, Result<T>>
    where
        S: Stream<Item = Site> + Send + 'a,
        T: Send + 'a,
        F: Fn(SiteRef) -> Fut + Send + 'a,
        Fut: Future<Output = Result<Vec<T>>> + Send + 'a,
    {
        sites
            .filter(move |site| futures::future::ready(filter.matches(site)))
            .then(move |site| {
                let pending = site.site_ref().map(&list);
                async move {
                    match pending {
                        Ok(fetch) => fetch.await,
                        Err(err) => Err(err),
                    }
                }
            })
            .flat_map(move |result| {
                let items: Vec<Result<T>> = match result {
                    Ok(items) => items.into_iter().map(Ok).collect(),
                    Err(err) if self.not_found.is_suppressed(&err) => {
                        debug!(error = %err, "Site contributes no rows");
                        Vec::new()
                    }
                    Err(err) => vec![Err(err)],
                };
                stream::iter(items)
            })
            .boxed()
    }
}
