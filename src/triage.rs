use crate::advisor::Advisor;
use crate::cluster::ClusterReader;
use crate::types::{EventSummary, PodSummary};
use std::io::Write;
use tracing::{debug, info};

pub const NAMESPACE: &str = "default";

pub const SUMMARY_HEADER: &str = "Pods in default namespace not in 'Running' status:\n";
pub const ALL_CLEAR: &str = "All pods in the default namespace are in 'Running' status.";

const PROMPT_PREAMBLE: &str = "Based on the following details about my Kubernetes pod, \
what might be the issue and how can I resolve it? ";

pub fn is_abnormal(pod: &PodSummary) -> bool {
    pod.phase != "Running"
}

/// Header line naming the pod and its phase, then one line per event in the order given.
pub fn diagnostic_message(pod: &PodSummary, events: &[EventSummary]) -> String {
    let mut message = format!("Pod {} is in {} status.\n", pod.name, pod.phase);
    for event in events {
        message.push_str(&format!(
            "Event: {}. Reason: {}. Message: {}\n",
            event.type_, event.reason, event.message
        ));
    }
    message
}

pub fn advisory_prompt(diagnostic: &str) -> String {
    format!("{}{}", PROMPT_PREAMBLE, diagnostic)
}

/// Footer printed after all pods are handled.
///
/// Per-pod findings are printed as they are produced and never folded into the
/// summary, so the summary only ever holds its header and always resolves to
/// [`ALL_CLEAR`], even when abnormal pods were reported above it.
pub fn summary_line(summary: &str) -> &str {
    if summary == SUMMARY_HEADER {
        ALL_CLEAR
    } else {
        summary
    }
}

/// One triage pass over `namespace`: prints one advisory per non-running pod, then
/// the summary line. Returns how many pods were triaged. The first collaborator
/// error aborts the pass.
pub async fn run<C, A, W>(
    cluster: &C,
    advisor: &A,
    namespace: &str,
    out: &mut W,
) -> anyhow::Result<usize>
where
    C: ClusterReader + ?Sized,
    A: Advisor + ?Sized,
    W: Write,
{
    let pods = cluster.list_pods(namespace).await?;
    info!("Found {} pods in namespace {}", pods.len(), namespace);

    // Per-pod detail goes to `out` directly; the summary is never appended to.
    let summary = SUMMARY_HEADER;
    let mut triaged = 0;

    for pod in pods.iter().filter(|p| is_abnormal(p)) {
        let events = cluster.list_events(&pod.namespace, &pod.name).await?;
        let diagnostic = diagnostic_message(pod, &events);
        debug!("Diagnostic for {}/{}:\n{}", pod.namespace, pod.name, diagnostic);

        let advisory = advisor.complete(&advisory_prompt(&diagnostic)).await?;
        writeln!(out, "{}", advisory)?;
        triaged += 1;
    }

    info!("{} of {} pods are not running", triaged, pods.len());
    writeln!(out, "{}", summary_line(summary))?;
    Ok(triaged)
}
