use tracing::debug;

use kospect_k8s::ClusterProvider;
use kospect_types::{Error, PodInfo, Result};

/// Resolve request parameters into the candidate pod set.
///
/// A named pod requires a namespace and resolves to exactly that pod; an
/// empty pod name means every pod in the namespace; empty namespace and pod
/// widen the listing to the whole cluster. No running-state filter is
/// applied here.
pub async fn resolve_pods<P: ClusterProvider>(
    provider: &P,
    namespace: &str,
    pod: &str,
) -> Result<Vec<PodInfo>> {
    if !pod.is_empty() {
        if namespace.is_empty() {
            return Err(Error::MissingParameter("namespace"));
        }
        debug!(pod, namespace, "fetching single pod");
        let found = provider.get_pod(namespace, pod).await?;
        return Ok(vec![found]);
    }

    if namespace.is_empty() {
        debug!("listing pods across all namespaces");
    } else {
        debug!(namespace, "listing pods in namespace");
    }
    provider.list_pods(namespace).await
}
