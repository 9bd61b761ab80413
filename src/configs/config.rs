use std::{collections::HashSet, fs, path::PathBuf};

use anyhow::{Context, Result, ensure};
use regex::Regex;
use serde::Deserialize;

use crate::{
    configs::{expand_path, resolve_test_resources},
    engine::PREDEFINED_BINDINGS,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory run when no paths are given on the command line
    pub test_root: PathBuf,
    /// Extension (without dot) of test scripts inside directories
    pub test_extension: String,
    /// Names bound to empty tables in every script
    pub bindings: Vec<String>,
    /// Roots searched for `resource://` URIs, in order
    pub resource_roots: Vec<PathBuf>,
    /// Test-support resource root, overridden by `SUITERUN_TEST_RESOURCES`
    pub test_resources: Option<PathBuf>,
    pub sync: SyncConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_root: PathBuf::from("src/test/lua"),
            test_extension: String::from("lua"),
            bindings: PREDEFINED_BINDINGS.iter().map(|b| b.to_string()).collect(),
            resource_roots: vec![
                PathBuf::from("src/main/resources"),
                PathBuf::from("src/test/resources"),
            ],
            test_resources: None,
            sync: SyncConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Source trees mirrored into build output, applied in order
    pub mappings: Vec<SyncMapping>,
    /// Targets pruned once every mapping has been applied, in order
    pub cleanup: Vec<PathBuf>,
    /// Target-relative paths matching any of these are never deleted
    pub protected_patterns: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            mappings: vec![
                SyncMapping::new("src/main/resources", "target/classes"),
                SyncMapping::new("src/test/resources", "target/test-classes"),
                SyncMapping::new("src/test/lua", "target/test-classes"),
            ],
            cleanup: vec![
                PathBuf::from("target/test-classes"),
                PathBuf::from("target/classes"),
            ],
            protected_patterns: vec![
                String::from(r".*\.class"),
                String::from(r".*\.xml"),
                String::from(r".*\.lua"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncMapping {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl SyncMapping {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// What the script engine needs from the configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub resource_roots: Vec<PathBuf>,
    pub test_resources: PathBuf,
}

impl Config {
    /// Applies `~` and `$VAR` expansion to every configured path.
    pub fn expanded(mut self) -> Result<Self> {
        self.test_root = expand_path(self.test_root)?;
        self.resource_roots = self
            .resource_roots
            .into_iter()
            .map(expand_path)
            .collect::<Result<_>>()?;
        self.test_resources = self.test_resources.map(expand_path).transpose()?;
        for mapping in &mut self.sync.mappings {
            mapping.source = expand_path(mapping.source.clone())?;
            mapping.target = expand_path(mapping.target.clone())?;
        }
        self.sync.cleanup = self
            .sync
            .cleanup
            .into_iter()
            .map(expand_path)
            .collect::<Result<_>>()?;
        Ok(self)
    }

    pub fn engine_settings(&self, test_resources_override: Option<String>) -> Result<EngineSettings> {
        Ok(EngineSettings {
            resource_roots: self.resource_roots.clone(),
            test_resources: resolve_test_resources(
                test_resources_override,
                self.test_resources.clone(),
            )?,
        })
    }
}

pub fn load_config(config_path: PathBuf) -> Result<Config> {
    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {:?}", config_path))?;

    let config: Config =
        toml::from_str(&contents).with_context(|| format!("Failed to parse {:?}", config_path))?;

    Ok(config)
}

pub fn validate_config(config: &Config) -> Result<()> {
    ensure!(
        !config.test_extension.is_empty(),
        "test_extension must not be empty"
    );
    ensure!(
        !config.test_extension.starts_with('.'),
        "test_extension '{}' must be given without a leading dot",
        config.test_extension
    );

    let mut seen = HashSet::new();
    for binding in &config.bindings {
        ensure!(!binding.is_empty(), "Binding names must not be empty");
        ensure!(
            seen.insert(binding.as_str()),
            "Binding '{}' is declared more than once",
            binding
        );
    }

    for pattern in &config.sync.protected_patterns {
        Regex::new(pattern)
            .with_context(|| format!("Invalid protected pattern '{}'", pattern))?;
    }

    Ok(())
}
