use anyhow::Context;
use async_trait::async_trait;
use k8s_openapi::NamespaceResourceScope;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, ReplicaSet, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::{
    ConfigMap, Endpoints, Namespace, PersistentVolumeClaim, Pod, Secret, Service, ServiceAccount,
};
use k8s_openapi::api::networking::v1::{Ingress, NetworkPolicy};
use k8s_openapi::api::rbac::v1::{Role, RoleBinding};
use kube::api::{ListParams, LogParams};
use kube::{Api, ResourceExt};
use serde::de::DeserializeOwned;
use tracing::debug;

use kospect_types::{
    ContainerInfo, DeploymentInfo, Error, NamespaceInfo, PodInfo, PodStatus, ResourceKind,
    ResourceSummary, Result, ServiceInfo, ServicePortInfo,
};

use crate::provider::{ClusterProvider, LogStream};

/// Kubernetes-backed cluster provider.
pub struct KubeProvider {
    client: kube::Client,
}

impl KubeProvider {
    /// Connect using the ambient environment (kubeconfig or in-cluster).
    pub async fn new() -> Result<Self> {
        let client = kube::Client::try_default()
            .await
            .context("Failed to create Kubernetes client. Is kubectl configured?")?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: kube::Client) -> Self {
        Self { client }
    }

    /// Uniform listing for kinds without a dedicated status source.
    async fn list_summaries<K>(
        &self,
        namespace: &str,
        kind: ResourceKind,
    ) -> Result<Vec<ResourceSummary>>
    where
        K: kube::Resource<Scope = NamespaceResourceScope> + Clone + DeserializeOwned + std::fmt::Debug,
        K::DynamicType: Default,
    {
        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default())
            .await
            .with_context(|| format!("Failed to list {} in {}", kind, namespace))?;

        Ok(list
            .items
            .into_iter()
            .map(|item| {
                let name = item.name_any();
                let ns = item.namespace().unwrap_or_else(|| namespace.to_string());
                ResourceSummary::new(ns, name, "Active".to_string())
            })
            .collect())
    }

    /// Deployments report the type of their first condition as status.
    async fn list_deployments(&self, namespace: &str) -> Result<Vec<ResourceSummary>> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let list = api
            .list(&ListParams::default())
            .await
            .with_context(|| format!("Failed to list deployments in {}", namespace))?;

        Ok(list
            .items
            .into_iter()
            .map(|deploy| {
                let name = deploy.name_any();
                let ns = deploy.namespace().unwrap_or_else(|| namespace.to_string());
                let status = Self::deployment_status(&deploy);
                ResourceSummary::new(ns, name, status)
            })
            .collect())
    }

    fn deployment_status(deploy: &Deployment) -> String {
        deploy
            .status
            .as_ref()
            .and_then(|status| status.conditions.as_ref())
            .and_then(|conditions| conditions.first())
            .map(|condition| condition.type_.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Convert a k8s Pod to PodInfo.
    fn pod_to_info(pod: Pod, fallback_namespace: &str) -> PodInfo {
        let name = pod.metadata.name.clone().unwrap_or_default();
        let namespace = pod
            .metadata
            .namespace
            .clone()
            .unwrap_or_else(|| fallback_namespace.to_string());
        let mut info = PodInfo::new(name, namespace);

        if let Some(spec) = pod.spec {
            info.node_name = spec.node_name;
            info.containers = spec.containers.into_iter().map(|c| c.name).collect();
        }

        if let Some(status) = pod.status {
            info.phase = status
                .phase
                .as_deref()
                .map(PodStatus::from)
                .unwrap_or(PodStatus::Unknown);
        }

        info
    }

    /// Convert a k8s Deployment to DeploymentInfo.
    fn deployment_to_info(deploy: Deployment, namespace: &str) -> DeploymentInfo {
        let name = deploy.metadata.name.clone().unwrap_or_default();
        let mut info = DeploymentInfo::new(name, namespace.to_string());

        if let Some(status) = &deploy.status {
            if let Some(conditions) = &status.conditions {
                info.conditions = conditions.iter().map(|c| c.type_.clone()).collect();
            }
        }

        if let Some(spec) = deploy.spec {
            info.replicas = spec.replicas;

            if let Some(selector) = spec.selector.match_labels {
                info.selector = selector;
            }

            if let Some(pod_spec) = spec.template.spec {
                info.containers = pod_spec
                    .containers
                    .into_iter()
                    .map(|c| ContainerInfo {
                        name: c.name,
                        image: c.image,
                    })
                    .collect();
            }
        }

        info
    }

    /// Convert a k8s Service to ServiceInfo.
    fn service_to_info(service: Service, namespace: &str) -> ServiceInfo {
        let name = service.metadata.name.clone().unwrap_or_default();
        let mut info = ServiceInfo::new(name, namespace.to_string());

        if let Some(spec) = service.spec {
            info.cluster_ip = spec.cluster_ip;
            info.selector = spec.selector.unwrap_or_default();
            info.ports = spec
                .ports
                .unwrap_or_default()
                .into_iter()
                .map(|p| ServicePortInfo {
                    name: p.name,
                    port: p.port,
                    protocol: p.protocol,
                })
                .collect();
        }

        info
    }
}

fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

fn lookup_error(err: kube::Error, kind: ResourceKind, namespace: &str, name: &str) -> Error {
    if is_not_found(&err) {
        Error::NotFound {
            kind,
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    } else {
        Error::Provider(
            anyhow::Error::new(err).context(format!("Failed to get {} {}/{}", kind, namespace, name)),
        )
    }
}

#[async_trait]
impl ClusterProvider for KubeProvider {
    async fn list_namespaces(&self) -> Result<Vec<NamespaceInfo>> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let list = namespaces
            .list(&ListParams::default())
            .await
            .context("Failed to list namespaces")?;

        Ok(list
            .items
            .into_iter()
            .map(|ns| {
                let name = ns.metadata.name.unwrap_or_default();
                let status = ns
                    .status
                    .and_then(|s| s.phase)
                    .unwrap_or_else(|| "Unknown".to_string());
                NamespaceInfo::new(name, status)
            })
            .collect())
    }

    async fn list_resources(
        &self,
        namespace: &str,
        kind: ResourceKind,
    ) -> Result<Vec<ResourceSummary>> {
        match kind {
            ResourceKind::Pod => {
                let pods = self.list_pods(namespace).await?;
                Ok(pods
                    .into_iter()
                    .map(|pod| ResourceSummary::new(pod.namespace, pod.name, pod.phase.to_string()))
                    .collect())
            }
            ResourceKind::Deployment => self.list_deployments(namespace).await,
            ResourceKind::Service => self.list_summaries::<Service>(namespace, kind).await,
            ResourceKind::StatefulSet => self.list_summaries::<StatefulSet>(namespace, kind).await,
            ResourceKind::ConfigMap => self.list_summaries::<ConfigMap>(namespace, kind).await,
            ResourceKind::Secret => self.list_summaries::<Secret>(namespace, kind).await,
            ResourceKind::PersistentVolumeClaim => {
                self.list_summaries::<PersistentVolumeClaim>(namespace, kind).await
            }
            ResourceKind::CronJob => self.list_summaries::<CronJob>(namespace, kind).await,
            ResourceKind::Job => self.list_summaries::<Job>(namespace, kind).await,
            ResourceKind::ReplicaSet => self.list_summaries::<ReplicaSet>(namespace, kind).await,
            ResourceKind::DaemonSet => self.list_summaries::<DaemonSet>(namespace, kind).await,
            ResourceKind::Ingress => self.list_summaries::<Ingress>(namespace, kind).await,
            ResourceKind::NetworkPolicy => {
                self.list_summaries::<NetworkPolicy>(namespace, kind).await
            }
            ResourceKind::ServiceAccount => {
                self.list_summaries::<ServiceAccount>(namespace, kind).await
            }
            ResourceKind::Endpoints => self.list_summaries::<Endpoints>(namespace, kind).await,
            ResourceKind::Role => self.list_summaries::<Role>(namespace, kind).await,
            ResourceKind::RoleBinding => self.list_summaries::<RoleBinding>(namespace, kind).await,
            ResourceKind::Unknown => Err(Error::UnsupportedKind(kind.as_str().to_string())),
        }
    }

    async fn get_pod(&self, namespace: &str, name: &str) -> Result<PodInfo> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let pod = api
            .get(name)
            .await
            .map_err(|err| lookup_error(err, ResourceKind::Pod, namespace, name))?;
        Ok(Self::pod_to_info(pod, namespace))
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<PodInfo>> {
        let api: Api<Pod> = if namespace.is_empty() {
            Api::all(self.client.clone())
        } else {
            Api::namespaced(self.client.clone(), namespace)
        };

        let list = api.list(&ListParams::default()).await.with_context(|| {
            if namespace.is_empty() {
                "Failed to list pods across all namespaces".to_string()
            } else {
                format!("Failed to list pods in {}", namespace)
            }
        })?;

        Ok(list
            .items
            .into_iter()
            .map(|pod| Self::pod_to_info(pod, namespace))
            .collect())
    }

    async fn get_deployment(&self, namespace: &str, name: &str) -> Result<DeploymentInfo> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let deploy = api
            .get(name)
            .await
            .map_err(|err| lookup_error(err, ResourceKind::Deployment, namespace, name))?;
        Ok(Self::deployment_to_info(deploy, namespace))
    }

    async fn get_service(&self, namespace: &str, name: &str) -> Result<ServiceInfo> {
        let api: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        let service = api
            .get(name)
            .await
            .map_err(|err| lookup_error(err, ResourceKind::Service, namespace, name))?;
        Ok(Self::service_to_info(service, namespace))
    }

    async fn open_log_stream(
        &self,
        namespace: &str,
        pod: &str,
        container: Option<&str>,
        timestamps: bool,
    ) -> Result<LogStream> {
        debug!(namespace, pod, ?container, "opening log stream");
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let params = LogParams {
            container: container.map(str::to_string),
            timestamps,
            ..Default::default()
        };

        let stream = api
            .log_stream(pod, &params)
            .await
            .with_context(|| format!("Failed to open log stream for pod {}/{}", namespace, pod))?;

        Ok(Box::new(stream))
    }
}
