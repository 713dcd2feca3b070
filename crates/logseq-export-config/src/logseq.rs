use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::ConfigError;

/// The two settings a graph must use for its files to be readable:
/// `:file/name-format :triple-lowbar` and `:preferred-format "markdown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogseqConfig {
    pub file_name_format: Option<String>,
    pub preferred_format: Option<String>,
}

fn setting_regex(key: &str) -> Regex {
    // Skips `;` comment lines; accepts `:keyword` or `"string"` values.
    let pattern = format!(r#"(?m)^[^;\n]*:{}\s+(?::([\w-]+)|"([^"]*)")"#, regex::escape(key));
    Regex::new(&pattern).expect("Invalid logseq config regex")
}

fn file_name_format_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| setting_regex("file/name-format"))
}

fn preferred_format_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| setting_regex("preferred-format"))
}

fn find_setting(re: &Regex, text: &str) -> Option<String> {
    let caps = re.captures(text)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
}

impl LogseqConfig {
    pub const FILE_NAME_FORMAT: &str = "triple-lowbar";
    pub const PREFERRED_FORMAT: &str = "markdown";

    pub fn config_path(graph_dir: &Path) -> PathBuf {
        graph_dir.join("logseq").join("config.edn")
    }

    pub fn parse(text: &str) -> Self {
        Self {
            file_name_format: find_setting(file_name_format_regex(), text),
            preferred_format: find_setting(preferred_format_regex(), text),
        }
    }

    pub fn load(graph_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = Self::config_path(graph_dir);
        let text = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;
        Ok(Self::parse(&text))
    }

    /// Loads `<graph>/logseq/config.edn` and rejects graphs whose file
    /// naming or page format this tool cannot read.
    pub fn check(graph_dir: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(graph_dir)?;
        let config_path = Self::config_path(graph_dir);

        if config.file_name_format.as_deref() != Some(Self::FILE_NAME_FORMAT) {
            return Err(ConfigError::UnsupportedFileNameFormat {
                config_path,
                found: config.file_name_format,
            });
        }
        if config
            .preferred_format
            .as_deref()
            .is_none_or(|f| !f.eq_ignore_ascii_case(Self::PREFERRED_FORMAT))
        {
            return Err(ConfigError::UnsupportedPreferredFormat {
                config_path,
                found: config.preferred_format,
            });
        }
        Ok(config)
    }
}
