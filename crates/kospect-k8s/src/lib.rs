//! Kubernetes provider for kospect
//!
//! This crate defines the capability seam the aggregation engine consumes
//! (`ClusterProvider`) and its kube-backed implementation (`KubeProvider`).

mod client;
mod provider;

pub use client::KubeProvider;
pub use provider::{ClusterProvider, LogStream};

// Re-export types that are used in our public API
pub use kospect_types::{
    DeploymentInfo, NamespaceInfo, PodInfo, PodStatus, ResourceKind, ResourceSummary, ServiceInfo,
};
