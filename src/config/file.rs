use serde::Deserialize;

/// Defaults read from `.recrepo.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecrepoConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub pretty: Option<bool>,
    #[serde(default)]
    pub ignore_dirty: Option<bool>,
    #[serde(default)]
    pub ignore_untracked: Option<bool>,
    #[serde(default)]
    pub git: Option<String>,
}
