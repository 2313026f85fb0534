use crate::config::Settings;
use crate::types::{EventSummary, PodSummary};
use anyhow::Context;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Event, Pod};
use kube::api::ListParams;
use kube::{Api, Client, config};
use tracing::{debug, info};

/// Read-only view of the cluster used by triage.
#[async_trait]
pub trait ClusterReader: Send + Sync {
    /// All pods in `namespace`, in the order the API server returned them.
    async fn list_pods(&self, namespace: &str) -> anyhow::Result<Vec<PodSummary>>;

    /// Events in `namespace` whose involved object is named `object_name`.
    async fn list_events(
        &self,
        namespace: &str,
        object_name: &str,
    ) -> anyhow::Result<Vec<EventSummary>>;
}

pub struct KubeClusterReader {
    client: Client,
}

impl KubeClusterReader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// Build a client from an explicit kubeconfig path, or fall back to kube's inference.
pub async fn connect(settings: &Settings) -> anyhow::Result<Client> {
    let config = match &settings.kubeconfig {
        Some(path) => {
            let kubeconfig = config::Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?;
            info!("Using kubeconfig: {}", path.display());
            config::Config::from_custom_kubeconfig(kubeconfig, &config::KubeConfigOptions::default())
                .await
                .with_context(|| format!("Invalid kubeconfig {}", path.display()))?
        }
        None => config::Config::infer()
            .await
            .context("Failed to infer cluster configuration")?,
    };
    debug!("Cluster endpoint: {}", config.cluster_url);
    Ok(Client::try_from(config)?)
}

pub(crate) fn involved_object_selector(object_name: &str) -> String {
    format!("involvedObject.name={}", object_name)
}

#[async_trait]
impl ClusterReader for KubeClusterReader {
    async fn list_pods(&self, namespace: &str) -> anyhow::Result<Vec<PodSummary>> {
        let api: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        let pods = api
            .list(&ListParams::default())
            .await
            .with_context(|| format!("Failed to list pods in namespace {}", namespace))?;
        Ok(pods.items.iter().map(PodSummary::from).collect())
    }

    async fn list_events(
        &self,
        namespace: &str,
        object_name: &str,
    ) -> anyhow::Result<Vec<EventSummary>> {
        let api: Api<Event> = Api::namespaced(self.client.clone(), namespace);
        let lp = ListParams::default().fields(&involved_object_selector(object_name));
        let events = api.list(&lp).await.with_context(|| {
            format!(
                "Failed to list events for pod {}/{}",
                namespace, object_name
            )
        })?;
        Ok(events.items.iter().map(EventSummary::from).collect())
    }
}

