//! In-memory cluster provider for engine tests.

use std::collections::{HashMap, HashSet};
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use anyhow::anyhow;
use async_trait::async_trait;
use futures::io::{AsyncBufRead, AsyncRead};

use kospect_k8s::{ClusterProvider, LogStream};
use kospect_types::{
    DeploymentInfo, Error, NamespaceInfo, PodInfo, PodStatus, ResourceKind, ResourceSummary,
    Result, ServiceInfo,
};

/// How the mock serves one pod/container log stream.
pub enum LogBehavior {
    /// Serve this text and end the stream.
    Lines(&'static str),
    /// Fail the open call.
    FailOpen,
    /// Never yield data; lets timeout paths fire.
    NeverReady,
}

pub struct MockProvider {
    pods: Vec<PodInfo>,
    resources: Vec<(ResourceKind, ResourceSummary)>,
    failing_kinds: HashSet<ResourceKind>,
    deployments: HashMap<(String, String), DeploymentInfo>,
    services: HashMap<(String, String), ServiceInfo>,
    logs: HashMap<(String, Option<String>), LogBehavior>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            pods: Vec::new(),
            resources: Vec::new(),
            failing_kinds: HashSet::new(),
            deployments: HashMap::new(),
            services: HashMap::new(),
            logs: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_pod(
        mut self,
        namespace: &str,
        name: &str,
        phase: PodStatus,
        containers: &[&str],
    ) -> Self {
        let mut pod = PodInfo::new(name.to_string(), namespace.to_string());
        pod.phase = phase;
        pod.containers = containers.iter().map(|c| c.to_string()).collect();
        self.pods.push(pod);
        self
    }

    pub fn with_resource(mut self, kind: ResourceKind, namespace: &str, name: &str) -> Self {
        self.resources.push((
            kind,
            ResourceSummary::new(namespace.to_string(), name.to_string(), "Active".to_string()),
        ));
        self
    }

    pub fn with_failing_kind(mut self, kind: ResourceKind) -> Self {
        self.failing_kinds.insert(kind);
        self
    }

    pub fn with_deployment(
        mut self,
        namespace: &str,
        name: &str,
        build: impl FnOnce(&mut DeploymentInfo),
    ) -> Self {
        let mut info = DeploymentInfo::new(name.to_string(), namespace.to_string());
        build(&mut info);
        self.deployments
            .insert((namespace.to_string(), name.to_string()), info);
        self
    }

    pub fn with_service(
        mut self,
        namespace: &str,
        name: &str,
        build: impl FnOnce(&mut ServiceInfo),
    ) -> Self {
        let mut info = ServiceInfo::new(name.to_string(), namespace.to_string());
        build(&mut info);
        self.services
            .insert((namespace.to_string(), name.to_string()), info);
        self
    }

    pub fn with_logs(
        mut self,
        pod: &str,
        container: Option<&str>,
        behavior: LogBehavior,
    ) -> Self {
        self.logs
            .insert((pod.to_string(), container.map(str::to_string)), behavior);
        self
    }

    /// Number of provider calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ClusterProvider for MockProvider {
    async fn list_namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        self.record_call();
        let mut seen: Vec<NamespaceInfo> = Vec::new();
        for pod in &self.pods {
            if !seen.iter().any(|ns| ns.name == pod.namespace) {
                seen.push(NamespaceInfo::new(pod.namespace.clone(), "Active".to_string()));
            }
        }
        Ok(seen)
    }

    async fn list_resources(
        &self,
        namespace: &str,
        kind: ResourceKind,
    ) -> Result<Vec<ResourceSummary>> {
        self.record_call();
        if kind == ResourceKind::Unknown {
            return Err(Error::UnsupportedKind(kind.as_str().to_string()));
        }
        if self.failing_kinds.contains(&kind) {
            return Err(Error::Provider(anyhow!("listing {kind} denied")));
        }
        Ok(self
            .resources
            .iter()
            .filter(|(k, r)| *k == kind && r.namespace == namespace)
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn get_pod(&self, namespace: &str, name: &str) -> Result<PodInfo> {
        self.record_call();
        self.pods
            .iter()
            .find(|pod| pod.namespace == namespace && pod.name == name)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: ResourceKind::Pod,
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodInfo>> {
        self.record_call();
        Ok(self
            .pods
            .iter()
            .filter(|pod| namespace.is_empty() || pod.namespace == namespace)
            .cloned()
            .collect())
    }

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<DeploymentInfo> {
        self.record_call();
        self.deployments
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: ResourceKind::Deployment,
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    async fn get_service(&self, namespace: &str, name: &str) -> Result<ServiceInfo> {
        self.record_call();
        self.services
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: ResourceKind::Service,
                namespace: namespace.to_string(),
                name: name.to_string(),
            })
    }

    async fn open_log_stream(
        &self,
        _namespace: &str,
        pod: &str,
        container: Option<&str>,
        _timestamps: bool,
    ) -> Result<LogStream> {
        self.record_call();
        let key = (pod.to_string(), container.map(str::to_string));
        match self.logs.get(&key) {
            Some(LogBehavior::Lines(text)) => {
                Ok(Box::new(futures::io::Cursor::new(text.as_bytes().to_vec())))
            }
            Some(LogBehavior::FailOpen) => {
                Err(Error::Provider(anyhow!("stream open refused for {pod}")))
            }
            Some(LogBehavior::NeverReady) => Ok(Box::new(PendingReader)),
            None => Ok(Box::new(futures::io::Cursor::new(Vec::new()))),
        }
    }
}

/// A stream that stays pending forever; only a deadline gets rid of it.
struct PendingReader;

impl AsyncRead for PendingReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Poll::Pending
    }
}

impl AsyncBufRead for PendingReader {
    fn poll_fill_buf(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        Poll::Pending
    }

    fn consume(self: Pin<&mut Self>, _amt: usize) {}
}
