use std::path::{Path, PathBuf};

use crate::config::{ConfigError, RecrepoConfig};

pub const CONFIG_FILE_NAME: &str = ".recrepo.toml";

#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// `None` when no config file was found.
    pub path: Option<PathBuf>,
    pub config: RecrepoConfig,
}

impl ResolvedConfig {
    /// Directory relative config values are resolved against.
    pub fn base_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }
}

/// An explicit path must exist; otherwise search `start` and its ancestors.
pub fn resolve_config(
    start: impl AsRef<Path>,
    explicit: Option<PathBuf>,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(path) = explicit {
        let config = load_config(&path)?;
        return Ok(ResolvedConfig {
            path: Some(path),
            config,
        });
    }

    match find_config_from(start.as_ref()) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok(ResolvedConfig {
                path: Some(path),
                config,
            })
        }
        None => Ok(ResolvedConfig::default()),
    }
}

pub fn load_config(path: &Path) -> Result<RecrepoConfig, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

fn find_config_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|ancestor| ancestor.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::config::resolve::{resolve_config, CONFIG_FILE_NAME};
    use crate::config::ConfigError;

    fn unique_temp_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();
        let pid = std::process::id();
        let dir = std::env::temp_dir().join(format!("recrepo-{prefix}-{pid}-{nanos}"));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn finds_config_in_an_ancestor() {
        let root = unique_temp_dir("config-ancestor");
        let nested = root.join("a").join("b");
        fs::create_dir_all(&nested).expect("create nested dirs");
        fs::write(root.join(CONFIG_FILE_NAME), "pretty = true\n").expect("write config");

        let resolved = resolve_config(&nested, None).expect("resolve config");
        assert_eq!(resolved.path, Some(root.join(CONFIG_FILE_NAME)));
        assert_eq!(resolved.base_dir(), Some(root.as_path()));
        assert_eq!(resolved.config.pretty, Some(true));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn explicit_config_must_exist() {
        let root = unique_temp_dir("config-explicit");
        let err = resolve_config(&root, Some(root.join("missing.toml"))).expect_err("missing");
        assert!(matches!(err, ConfigError::ConfigNotFound(_)));
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn parse_errors_name_the_file() {
        let root = unique_temp_dir("config-invalid");
        let path = root.join("bad.toml");
        fs::write(&path, "pretty = \"very\"\n").expect("write config");
        let err = resolve_config(&root, Some(path.clone())).expect_err("invalid");
        assert!(err.to_string().contains(&path.display().to_string()));
        let _ = fs::remove_dir_all(&root);
    }
}
