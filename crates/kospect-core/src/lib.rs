//! Resource and log aggregation engine for kospect
//!
//! Pod discovery, the concurrent log aggregator, the log line parser and the
//! resource inventory sweep, all written against the `ClusterProvider` seam.

mod aggregator;
mod analysis;
mod discovery;
mod inventory;
mod parser;

pub use aggregator::LogAggregator;
pub use discovery::resolve_pods;
pub use inventory::InventoryAggregator;
pub use parser::LogLineParser;

// Re-export the provider seam and types used in our public API
pub use kospect_k8s::{ClusterProvider, LogStream};
pub use kospect_types::{
    LogEntry, NamespaceInfo, PodLogs, PodSummary, ResourceKind, ResourceSummary,
};

#[cfg(test)]
mod testutil;
