use k8s_openapi::api::core::v1::{Event, Pod};
use kube::ResourceExt;

/// Point-in-time view of a pod, as far as triage cares about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodSummary {
    pub name: String,
    pub namespace: String,
    pub phase: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub type_: String,
    pub reason: String,
    pub message: String,
}

impl From<&Pod> for PodSummary {
    fn from(pod: &Pod) -> Self {
        Self {
            name: pod.name_any(),
            namespace: pod.namespace().unwrap_or_default(),
            phase: pod
                .status
                .as_ref()
                .and_then(|s| s.phase.clone())
                .unwrap_or_default(),
        }
    }
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            type_: event.type_.clone().unwrap_or_default(),
            reason: event.reason.clone().unwrap_or_default(),
            message: event.message.clone().unwrap_or_default(),
        }
    }
}
