use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_COMPLETIONS_URL: &str =
    "https://api.openai.com/v1/engines/gpt-3.5-turbo-instruct/completions";

/// Everything the two collaborators need from the environment, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Explicit kubeconfig path. `None` leaves discovery to kube's inference rules.
    pub kubeconfig: Option<PathBuf>,
    pub api_key: String,
    pub completions_url: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let kubeconfig = lookup("KUBECONFIG")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let api_key = lookup("OPENAI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("OPENAI_API_KEY is not set; an empty bearer token will be sent");
        }

        let completions_url = lookup("OPENAI_COMPLETIONS_URL")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_COMPLETIONS_URL.to_string());

        Self {
            kubeconfig,
            api_key,
            completions_url,
        }
    }
}
