//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::export::ExportFormat;

/// Name of the per-directory config file
pub const PROJECT_CONFIG_FILE: &str = ".seoplan.yaml";

/// seoplan configuration with layered hierarchy
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Artificial pause before results are generated, in milliseconds
    pub processing_latency_ms: Option<u64>,

    /// Fixed seed for reproducible business types and word counts
    pub seed: Option<u64>,

    /// Default export format (json, csv, md)
    pub default_format: Option<String>,

    /// Directory exports are written to when no path is given
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/seoplan/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Config in the working directory
        if let Some(local) = Self::read_file(Path::new(PROJECT_CONFIG_FILE)) {
            config.merge(local);
        }

        // 4. Environment variables
        config.merge(Self::from_env(|key| std::env::var(key).ok()));

        config
    }

    /// Parse a YAML config document
    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yml::Error> {
        serde_yml::from_str(contents)
    }

    fn read_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config");
                return None;
            }
        };
        match Self::from_yaml_str(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Read `SEOPLAN_*` variables through `lookup`
    fn from_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str| {
            lookup(key).and_then(|v| match v.trim().parse::<u64>() {
                Ok(n) => Some(n),
                Err(_) => {
                    tracing::warn!(key, value = %v, "ignoring non-numeric setting");
                    None
                }
            })
        };

        Config {
            processing_latency_ms: number("SEOPLAN_LATENCY_MS"),
            seed: number("SEOPLAN_SEED"),
            default_format: lookup("SEOPLAN_FORMAT"),
            output_dir: lookup("SEOPLAN_OUTPUT_DIR").map(PathBuf::from),
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "seoplan")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.processing_latency_ms.is_some() {
            self.processing_latency_ms = other.processing_latency_ms;
        }
        if other.seed.is_some() {
            self.seed = other.seed;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.output_dir.is_some() {
            self.output_dir = other.output_dir;
        }
    }

    /// Processing latency, zero when unset
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.processing_latency_ms.unwrap_or(0))
    }

    /// The configured export format, falling back to JSON
    pub fn export_format(&self) -> ExportFormat {
        match self.default_format.as_deref().map(str::parse::<ExportFormat>) {
            Some(Ok(format)) => format,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "ignoring default_format");
                ExportFormat::Json
            }
            None => ExportFormat::Json,
        }
    }

    /// Where an export of `format` goes when the user gives no path
    pub fn output_path(&self, format: ExportFormat) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(format.default_filename()),
            None => PathBuf::from(format.default_filename()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_yaml() {
        let config = Config::from_yaml_str(
            "processing_latency_ms: 1200\nseed: 9\ndefault_format: csv\noutput_dir: out\n",
        )
        .unwrap();
        assert_eq!(config.latency(), Duration::from_millis(1200));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.export_format(), ExportFormat::Csv);
        assert_eq!(
            config.output_path(ExportFormat::Csv),
            PathBuf::from("out").join("seo_content_plan.csv")
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.latency(), Duration::ZERO);
        assert_eq!(config.export_format(), ExportFormat::Json);
        assert_eq!(
            config.output_path(ExportFormat::Markdown),
            PathBuf::from("seo_strategy_report.md")
        );
    }

    #[test]
    fn test_invalid_format_falls_back_to_json() {
        let config = Config {
            default_format: Some("xml".to_string()),
            ..Config::default()
        };
        assert_eq!(config.export_format(), ExportFormat::Json);
    }

    #[test]
    fn test_merge_prefers_later_layer() {
        let mut config = Config::from_yaml_str("seed: 1\nprocessing_latency_ms: 50\n").unwrap();
        config.merge(Config::from_yaml_str("seed: 2\n").unwrap());
        assert_eq!(config.seed, Some(2));
        assert_eq!(config.processing_latency_ms, Some(50));
    }

    #[test]
    fn test_env_layer() {
        let vars: HashMap<&str, &str> = [
            ("SEOPLAN_SEED", "77"),
            ("SEOPLAN_LATENCY_MS", "not-a-number"),
            ("SEOPLAN_FORMAT", "md"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_env(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.seed, Some(77));
        assert_eq!(config.processing_latency_ms, None);
        assert_eq!(config.export_format(), ExportFormat::Markdown);
        assert_eq!(config.output_dir, None);
    }
}
