use async_trait::async_trait;
use futures::io::AsyncBufRead;

use kospect_types::{
    DeploymentInfo, NamespaceInfo, PodInfo, ResourceKind, ResourceSummary, Result, ServiceInfo,
};

/// Raw log byte stream handed to the engine. Dropping it releases the
/// underlying connection on every exit path.
pub type LogStream = Box<dyn AsyncBufRead + Send + Unpin>;

/// Capability interface over the cluster API.
///
/// The engine is written against this trait instead of a concrete client so
/// the provider can be injected at construction time and mocked per test.
#[async_trait]
pub trait ClusterProvider: Send + Sync {
    /// List every namespace visible to the provider.
    async fn list_namespaces(&self) -> Result<Vec<NamespaceInfo>>;

    /// List all resources of one kind in a namespace.
    ///
    /// `ResourceKind::Unknown` is rejected with an unsupported-kind error;
    /// sweep callers may choose to swallow per-kind failures.
    async fn list_resources(
        &self,
        namespace: &str,
        kind: ResourceKind,
    ) -> Result<Vec<ResourceSummary>>;

    /// Fetch a single pod with its spec. Fails with `NotFound` when absent.
    async fn get_pod(&self, namespace: &str, name: &str) -> Result<PodInfo>;

    /// List pods in a namespace; an empty namespace lists the whole cluster.
    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodInfo>>;

    /// Fetch a single deployment with its spec.
    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<DeploymentInfo>;

    /// Fetch a single service with its spec.
    async fn get_service(&self, namespace: &str, name: &str) -> Result<ServiceInfo>;

    /// Open a log stream for one pod, optionally scoped to a container and
    /// optionally prefixing each line with its timestamp.
    async fn open_log_stream(
        &self,
        namespace: &str,
        pod: &str,
        container: Option<&str>,
        timestamps: bool,
    ) -> Result<LogStream>;
}
