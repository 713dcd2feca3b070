use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod logseq;

pub use logseq::LogseqConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unsupported file name format {found:?} in {config_path}, expected :triple-lowbar")]
    UnsupportedFileNameFormat {
        config_path: PathBuf,
        found: Option<String>,
    },

    #[error("Unsupported preferred format {found:?} in {config_path}, expected markdown")]
    UnsupportedPreferredFormat {
        config_path: PathBuf,
        found: Option<String>,
    },
}

fn default_ignored_files() -> Vec<String> {
    vec!["Templates.md".to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub graph_path: PathBuf,
    /// Only export the public projection of the graph.
    #[serde(default)]
    pub require_public: bool,
    #[serde(default = "default_ignored_files")]
    pub ignored_files: Vec<String>,
}

impl Config {
    pub fn new(graph_path: impl Into<PathBuf>) -> Self {
        Self {
            graph_path: graph_path.into(),
            require_public: false,
            ignored_files: default_ignored_files(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the graph path
        config.graph_path = Self::expand_path(&config.graph_path).unwrap_or(config.graph_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/logseq-export");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/logseq-export/config.toml"));
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let config: Config = toml::from_str(r#"graph_path = "/graphs/notes""#).unwrap();

        assert_eq!(config, Config::new("/graphs/notes"));
        assert!(!config.require_public);
        assert_eq!(config.ignored_files, vec!["Templates.md"]);
    }

    #[test]
    fn test_explicit_fields_override_defaults() {
        let config_content = r#"
graph_path = "/graphs/notes"
require_public = true
ignored_files = ["Templates.md", "Scratch.md"]
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert!(config.require_public);
        assert_eq!(config.ignored_files, vec!["Templates.md", "Scratch.md"]);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/test/path")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("LOGSEQ_EXPORT_TEST_VAR", "/test/env/path");
        }

        let expanded = Config::expand_path(Path::new("$LOGSEQ_EXPORT_TEST_VAR/subdir"));

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("LOGSEQ_EXPORT_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_leaves_plain_paths_alone() {
        assert_eq!(
            Config::expand_path(Path::new("/absolute/path")),
            Some(PathBuf::from("/absolute/path"))
        );
        assert_eq!(
            Config::expand_path(Path::new("relative/path")),
            Some(PathBuf::from("relative/path"))
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "graph_path = ").unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::new("/tmp/test-graph");
        test_config.require_public = true;

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_graph_path_is_expanded_on_load() {
        unsafe {
            env::set_var("LOGSEQ_EXPORT_GRAPHS", "/custom/graphs");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, r#"graph_path = "$LOGSEQ_EXPORT_GRAPHS/notes""#).unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.graph_path, PathBuf::from("/custom/graphs/notes"));

        unsafe {
            env::remove_var("LOGSEQ_EXPORT_GRAPHS");
        }
    }
}
