use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use kospect_k8s::ClusterProvider;
use kospect_types::{Error, NamespaceInfo, ResourceKind, ResourceSummary, Result};

use crate::analysis;

/// Sweeps the resource catalog and answers single-kind and single-resource
/// queries.
pub struct InventoryAggregator<P> {
    provider: Arc<P>,
}

impl<P: ClusterProvider> InventoryAggregator<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// List every namespace visible to the provider.
    pub async fn namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        self.provider.list_namespaces().await
    }

    /// Sweep every catalog kind in one namespace.
    ///
    /// A kind that fails to list counts as zero resources; kinds with zero
    /// resources are omitted from the map, so every entry present is
    /// non-empty. Map iteration order is unspecified.
    pub async fn sweep(&self, namespace: &str) -> Result<HashMap<ResourceKind, Vec<String>>> {
        if namespace.is_empty() {
            return Err(Error::MissingParameter("namespace"));
        }

        let mut inventory = HashMap::new();
        for kind in ResourceKind::ALL {
            match self.provider.list_resources(namespace, kind).await {
                Ok(resources) => {
                    if resources.is_empty() {
                        continue;
                    }
                    debug!(%kind, namespace, count = resources.len(), "kind listed");
                    inventory.insert(
                        kind,
                        resources.into_iter().map(|r| r.name).collect::<Vec<_>>(),
                    );
                }
                Err(err) => {
                    warn!(%kind, namespace, error = %err, "skipping kind");
                }
            }
        }
        Ok(inventory)
    }

    /// List the names of one specific kind.
    pub async fn list_kind(&self, namespace: &str, kind: ResourceKind) -> Result<Vec<String>> {
        if namespace.is_empty() {
            return Err(Error::MissingParameter("namespace"));
        }
        if kind == ResourceKind::Unknown {
            return Err(Error::UnsupportedKind(kind.as_str().to_string()));
        }

        let resources = self.provider.list_resources(namespace, kind).await?;
        Ok(resources.into_iter().map(|r| r.name).collect())
    }

    /// Fetch one resource, running the kind's analyzer when it has one.
    ///
    /// Deployment and Service get an extended field bag; every other kind
    /// falls back to its listing summary.
    pub async fn get(
        &self,
        namespace: &str,
        kind: ResourceKind,
        name: &str,
    ) -> Result<ResourceSummary> {
        if namespace.is_empty() {
            return Err(Error::MissingParameter("namespace"));
        }
        if name.is_empty() {
            return Err(Error::MissingParameter("name"));
        }

        match kind {
            ResourceKind::Unknown => Err(Error::UnsupportedKind(kind.as_str().to_string())),
            ResourceKind::Deployment => {
                let info = self.provider.get_deployment(namespace, name).await?;
                Ok(analysis::analyze_deployment(info))
            }
            ResourceKind::Service => {
                let info = self.provider.get_service(namespace, name).await?;
                Ok(analysis::analyze_service(info))
            }
            _ => {
                let resources = self.provider.list_resources(namespace, kind).await?;
                resources
                    .into_iter()
                    .find(|r| r.name == name)
                    .ok_or_else(|| Error::NotFound {
                        kind,
                        namespace: namespace.to_string(),
                        name: name.to_string(),
                    })
            }
        }
    }
}
