use std::sync::Arc;
use std::time::Duration;

use futures::{AsyncBufReadExt, TryStreamExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use kospect_k8s::ClusterProvider;
use kospect_types::{Error, LogEntry, PodInfo, PodLogs, PodStatus, PodSummary, Result};

use crate::discovery;
use crate::parser::LogLineParser;

/// Deadline for one pod's bulk log fetch.
const DEFAULT_POD_TIMEOUT: Duration = Duration::from_secs(30);

/// Fans out log retrieval across pods and merges the results.
///
/// Bulk mode sweeps every running pod concurrently with per-pod isolation;
/// per-container mode walks one pod's containers sequentially so entries
/// stay in declared container order.
pub struct LogAggregator<P> {
    provider: Arc<P>,
    pod_timeout: Duration,
}

impl<P: ClusterProvider + 'static> LogAggregator<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            pod_timeout: DEFAULT_POD_TIMEOUT,
        }
    }

    /// Override the per-pod deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.pod_timeout = timeout;
        self
    }

    /// Bulk mode: one combined log blob per running pod.
    ///
    /// Pods that are not running are skipped silently. Each surviving pod
    /// gets its own task and its own deadline; a failed or timed-out fetch
    /// drops that pod from the result set without touching its siblings.
    /// The result is always a well-formed list, possibly empty.
    pub async fn namespace_logs(&self, namespace: &str, pod: &str) -> Result<Vec<PodSummary>> {
        let candidates = discovery::resolve_pods(self.provider.as_ref(), namespace, pod).await?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = Vec::new();

        for pod in candidates {
            if pod.phase != PodStatus::Running {
                debug!(pod = %pod.name, namespace = %pod.namespace, phase = %pod.phase, "skipping pod");
                continue;
            }

            debug!(pod = %pod.name, namespace = %pod.namespace, "pod found");
            let provider = Arc::clone(&self.provider);
            let tx = tx.clone();
            let deadline = self.pod_timeout;
            tasks.push(tokio::spawn(async move {
                match tokio::time::timeout(deadline, fetch_pod_log(provider.as_ref(), &pod)).await {
                    Ok(Ok(summary)) => {
                        let _ = tx.send(summary);
                    }
                    Ok(Err(err)) => {
                        warn!(pod = %pod.name, namespace = %pod.namespace, error = %err, "failed to fetch logs");
                    }
                    Err(_) => {
                        warn!(pod = %pod.name, namespace = %pod.namespace, "log fetch timed out");
                    }
                }
            }));
        }
        drop(tx);

        for task in tasks {
            let _ = task.await;
        }

        let mut pods = Vec::new();
        while let Some(summary) = rx.recv().await {
            pods.push(summary);
        }
        debug!(count = pods.len(), "returning pods with logs");
        Ok(pods)
    }

    /// Per-container mode: structured entries for one pod.
    ///
    /// Containers are read strictly in declared order; a container whose
    /// stream fails contributes zero entries and does not abort the rest.
    pub async fn pod_logs(&self, namespace: &str, pod: &str) -> Result<PodLogs> {
        if namespace.is_empty() {
            return Err(Error::MissingParameter("namespace"));
        }
        if pod.is_empty() {
            return Err(Error::MissingParameter("pod"));
        }

        let info = self.provider.get_pod(namespace, pod).await?;

        let mut entries = Vec::new();
        for container in &info.containers {
            match self.container_entries(&info, container).await {
                Ok(parsed) => entries.extend(parsed),
                Err(err) => {
                    warn!(pod = %info.name, container = %container, error = %err, "failed to read container logs");
                }
            }
        }

        Ok(PodLogs {
            pod: info.name,
            namespace: info.namespace,
            entries,
        })
    }

    async fn container_entries(&self, pod: &PodInfo, container: &str) -> Result<Vec<LogEntry>> {
        let stream = self
            .provider
            .open_log_stream(&pod.namespace, &pod.name, Some(container), true)
            .await?;

        let mut lines = stream.lines();
        let mut text = String::new();
        while let Some(line) = lines.try_next().await.map_err(anyhow::Error::from)? {
            text.push_str(&line);
            text.push('\n');
        }

        Ok(LogLineParser::parse(container, &text))
    }
}

/// One unit of bulk work: read the pod's combined stream to EOF.
async fn fetch_pod_log<P: ClusterProvider + ?Sized>(
    provider: &P,
    pod: &PodInfo,
) -> Result<PodSummary> {
    let stream = provider
        .open_log_stream(&pod.namespace, &pod.name, None, false)
        .await?;

    let mut lines = stream.lines();
    let mut logs = String::new();
    while let Some(line) = lines.try_next().await.map_err(anyhow::Error::from)? {
        logs.push_str(&line);
        logs.push('\n');
    }

    Ok(PodSummary {
        name: pod.name.clone(),
        namespace: pod.namespace.clone(),
        status: pod.phase.to_string(),
        node_name: pod.node_name.clone(),
        logs,
    })
}
