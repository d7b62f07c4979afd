//! Shared types for kospect
//!
//! This crate contains data structures used across multiple kospect crates,
//! plus the error taxonomy for the aggregation engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

mod error;

pub use error::{Error, Result};

// ============================================================================
// Resource Kinds
// ============================================================================

/// A category of cluster resource kospect can enumerate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Pod,
    Service,
    Deployment,
    StatefulSet,
    ConfigMap,
    Secret,
    PersistentVolumeClaim,
    CronJob,
    Job,
    ReplicaSet,
    DaemonSet,
    Ingress,
    NetworkPolicy,
    ServiceAccount,
    Endpoints,
    Role,
    RoleBinding,
    Unknown,
}

impl ResourceKind {
    /// Every concrete kind, in the order the inventory sweep probes them.
    pub const ALL: [ResourceKind; 17] = [
        Self::Pod,
        Self::Service,
        Self::Deployment,
        Self::StatefulSet,
        Self::ConfigMap,
        Self::Secret,
        Self::PersistentVolumeClaim,
        Self::CronJob,
        Self::Job,
        Self::ReplicaSet,
        Self::DaemonSet,
        Self::Ingress,
        Self::NetworkPolicy,
        Self::ServiceAccount,
        Self::Endpoints,
        Self::Role,
        Self::RoleBinding,
    ];

    /// Canonical wire label for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pod => "Pod",
            Self::Service => "Service",
            Self::Deployment => "Deployment",
            Self::StatefulSet => "Statefulset",
            Self::ConfigMap => "Configmap",
            Self::Secret => "Secret",
            Self::PersistentVolumeClaim => "Persistentvolumeclaim",
            Self::CronJob => "Cronjob",
            Self::Job => "Job",
            Self::ReplicaSet => "Replicaset",
            Self::DaemonSet => "Daemonset",
            Self::Ingress => "Ingress",
            Self::NetworkPolicy => "Networkpolicy",
            Self::ServiceAccount => "Serviceaccount",
            Self::Endpoints => "Endpoints",
            Self::Role => "Role",
            Self::RoleBinding => "Rolebinding",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<&str> for ResourceKind {
    fn from(s: &str) -> Self {
        match s {
            "Pod" => Self::Pod,
            "Service" => Self::Service,
            "Deployment" => Self::Deployment,
            "Statefulset" => Self::StatefulSet,
            "Configmap" => Self::ConfigMap,
            "Secret" => Self::Secret,
            "Persistentvolumeclaim" => Self::PersistentVolumeClaim,
            "Cronjob" => Self::CronJob,
            "Job" => Self::Job,
            "Replicaset" => Self::ReplicaSet,
            "Daemonset" => Self::DaemonSet,
            "Ingress" => Self::Ingress,
            "Networkpolicy" => Self::NetworkPolicy,
            "Serviceaccount" => Self::ServiceAccount,
            "Endpoints" => Self::Endpoints,
            "Role" => Self::Role,
            "Rolebinding" => Self::RoleBinding,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResourceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// Resource Summaries
// ============================================================================

/// A single extended field produced by a kind-specific analyzer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

/// One resource as seen by listings and single-resource lookups.
///
/// The `fields` bag is only populated by kinds that define an analysis
/// routine; it stays absent everywhere else.
#[derive(Clone, Debug, Serialize)]
pub struct ResourceSummary {
    pub namespace: String,
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, FieldValue>>,
}

impl ResourceSummary {
    pub fn new(namespace: String, name: String, status: String) -> Self {
        Self {
            namespace,
            name,
            status,
            fields: None,
        }
    }
}

/// Namespace information
#[derive(Clone, Debug, Serialize)]
pub struct NamespaceInfo {
    pub name: String,
    pub status: String,
}

impl NamespaceInfo {
    pub fn new(name: String, status: String) -> Self {
        Self { name, status }
    }
}

// ============================================================================
// Provider-side detail models
// ============================================================================

/// Observed pod lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PodStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl PodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }
}

impl From<&str> for PodStatus {
    fn from(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pod information
#[derive(Clone, Debug)]
pub struct PodInfo {
    pub name: String,
    pub namespace: String,
    pub phase: PodStatus,
    pub node_name: Option<String>,
    /// Container names in the order the pod spec declares them.
    pub containers: Vec<String>,
}

impl PodInfo {
    pub fn new(name: String, namespace: String) -> Self {
        Self {
            name,
            namespace,
            phase: PodStatus::Unknown,
            node_name: None,
            containers: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ContainerInfo {
    pub name: String,
    pub image: Option<String>,
}

/// Deployment information
#[derive(Clone, Debug)]
pub struct DeploymentInfo {
    pub name: String,
    pub namespace: String,
    pub replicas: Option<i32>,
    pub containers: Vec<ContainerInfo>,
    pub selector: BTreeMap<String, String>,
    /// Condition types in the order the cluster reports them.
    pub conditions: Vec<String>,
}

impl DeploymentInfo {
    pub fn new(name: String, namespace: String) -> Self {
        Self {
            name,
            namespace,
            replicas: None,
            containers: Vec::new(),
            selector: BTreeMap::new(),
            conditions: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServicePortInfo {
    pub name: Option<String>,
    pub port: i32,
    pub protocol: Option<String>,
}

/// Service information
#[derive(Clone, Debug)]
pub struct ServiceInfo {
    pub name: String,
    pub namespace: String,
    pub cluster_ip: Option<String>,
    pub ports: Vec<ServicePortInfo>,
    pub selector: BTreeMap<String, String>,
}

impl ServiceInfo {
    pub fn new(name: String, namespace: String) -> Self {
        Self {
            name,
            namespace,
            cluster_ip: None,
            ports: Vec::new(),
            selector: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Log Types
// ============================================================================

/// A single parsed log line from one container.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogEntry {
    pub container: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub message: String,
}

impl LogEntry {
    pub fn new(container: String, timestamp: Option<String>, message: String) -> Self {
        Self {
            container,
            timestamp,
            message,
        }
    }
}

/// Per-container log entries for one pod.
#[derive(Clone, Debug, Serialize)]
pub struct PodLogs {
    pub pod: String,
    pub namespace: String,
    pub entries: Vec<LogEntry>,
}

/// Bulk-mode result: one pod with its combined log text.
#[derive(Clone, Debug, Serialize)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_name: Option<String>,
    pub logs: String,
}

// ============================================================================
// Response Shapes
// ============================================================================

/// Namespace listing response.
#[derive(Clone, Debug, Serialize)]
pub struct Namespaces {
    pub namespaces: Vec<NamespaceInfo>,
}

/// Bulk log response.
#[derive(Clone, Debug, Serialize)]
pub struct Pods {
    pub pods: Vec<PodSummary>,
}

/// Names of every resource of one kind.
#[derive(Clone, Debug, Serialize)]
pub struct KindResources {
    pub kind: ResourceKind,
    pub names: Vec<String>,
}

/// Inventory response for one namespace.
#[derive(Clone, Debug, Serialize)]
pub struct ResourcesResponse {
    pub namespace: String,
    pub resources: Vec<KindResources>,
}
