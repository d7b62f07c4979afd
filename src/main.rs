use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use kospect_core::{InventoryAggregator, LogAggregator};
use kospect_k8s::KubeProvider;
use kospect_types::{Error, KindResources, Namespaces, Pods, ResourceKind, ResourcesResponse};

mod config;

use config::Config;

/// Kospect - enumerate Kubernetes resources and aggregate pod logs
#[derive(Parser, Debug)]
#[command(name = "kospect")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional TOML config file with a default namespace and timeouts
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List namespaces in the cluster
    Namespaces,

    /// List resources in a namespace, across all kinds or one kind
    Resources {
        namespace: Option<String>,

        /// Restrict the listing to one resource kind
        #[arg(long, value_name = "KIND")]
        kind: Option<String>,
    },

    /// Fetch a single resource with kind-specific detail
    Get {
        namespace: String,
        kind: String,
        name: String,
    },

    /// Aggregate combined logs for running pods (whole namespace or one pod)
    Logs {
        namespace: Option<String>,
        pod: Option<String>,
    },

    /// Fetch per-container structured logs for one pod
    PodLogs { namespace: String, pod: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(args).await;

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

async fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let provider = Arc::new(KubeProvider::new().await?);

    match args.command {
        Command::Namespaces => {
            let inventory = InventoryAggregator::new(provider);
            let namespaces = inventory.namespaces().await?;
            print_json(&Namespaces { namespaces })
        }

        Command::Resources { namespace, kind } => {
            let namespace = config.namespace_or(namespace);
            let inventory = InventoryAggregator::new(provider);

            let resources = match kind {
                Some(label) => {
                    let kind = parse_kind(&label)?;
                    let names = inventory.list_kind(&namespace, kind).await?;
                    vec![KindResources { kind, names }]
                }
                None => {
                    let mut resources: Vec<KindResources> = inventory
                        .sweep(&namespace)
                        .await?
                        .into_iter()
                        .map(|(kind, names)| KindResources { kind, names })
                        .collect();
                    // map iteration order is unspecified; sort for stable output
                    resources.sort_by_key(|r| r.kind.as_str());
                    resources
                }
            };

            print_json(&ResourcesResponse {
                namespace,
                resources,
            })
        }

        Command::Get {
            namespace,
            kind,
            name,
        } => {
            let kind = parse_kind(&kind)?;
            let inventory = InventoryAggregator::new(provider);
            let summary = inventory.get(&namespace, kind, &name).await?;
            print_json(&summary)
        }

        Command::Logs { namespace, pod } => {
            let namespace = config.namespace_or(namespace);
            let aggregator = LogAggregator::new(provider).with_timeout(config.log_timeout());
            let pods = aggregator
                .namespace_logs(&namespace, pod.as_deref().unwrap_or_default())
                .await?;
            print_json(&Pods { pods })
        }

        Command::PodLogs { namespace, pod } => {
            let aggregator = LogAggregator::new(provider).with_timeout(config.log_timeout());
            let logs = aggregator.pod_logs(&namespace, &pod).await?;
            print_json(&logs)
        }
    }
}

/// Parse a kind label, rejecting anything outside the supported catalog.
fn parse_kind(label: &str) -> Result<ResourceKind> {
    let kind = ResourceKind::from(label);
    if kind == ResourceKind::Unknown {
        return Err(Error::UnsupportedKind(label.to_string()).into());
    }
    Ok(kind)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
